// Reading the survey export from an Excel workbook.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use snafu::prelude::*;

use crate::report::*;

/// Reads the responses (RawData) and the question map (QuestionMapper) of a workbook.
pub fn read_survey_tables(path: &str) -> BReportResult<(Table, Table)> {
    info!("Attempting to read survey file {:?}", path);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    debug!("read_survey_tables: worksheets: {:?}", workbook.sheet_names());

    let mut read_sheet = |sheet: &str| -> BReportResult<Table> {
        let wrange = workbook
            .worksheet_range(sheet)
            .context(MissingSheetSnafu { path, sheet })?
            .context(OpeningExcelSnafu { path })?;
        range_to_table(&wrange, sheet)
    };
    let responses = read_sheet(RESPONSES_SHEET)?;
    let question_map = read_sheet(QUESTION_MAP_SHEET)?;
    info!(
        "Read {} responses and {} questions",
        responses.rows.len(),
        question_map.rows.len()
    );
    Ok((responses, question_map))
}

/// The first row is the header. Rows without any value are dropped.
pub fn range_to_table(wrange: &Range<DataType>, sheet: &str) -> BReportResult<Table> {
    let mut iter = wrange.rows();
    let header_row = iter.next().context(EmptySheetSnafu { sheet })?;
    let header: Vec<String> = header_row
        .iter()
        .map(|c| plain_text(&cell_to_raw(c)))
        .collect();
    debug!("range_to_table: {}: header: {:?}", sheet, header);

    let mut rows: Vec<Vec<RawValue>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let values: Vec<RawValue> = row.iter().map(cell_to_raw).collect();
        if values.iter().all(|v| v.is_missing()) {
            debug!("range_to_table: {}: skipping empty row {}", sheet, idx + 2);
            continue;
        }
        rows.push(values);
    }
    Ok(Table { header, rows })
}

pub fn cell_to_raw(cell: &DataType) -> RawValue {
    match cell {
        DataType::String(s) if s.is_empty() => RawValue::Missing,
        DataType::String(s) => RawValue::Text(s.clone()),
        DataType::Float(f) => RawValue::Number(*f),
        DataType::Int(i) => RawValue::Number(*i as f64),
        DataType::Bool(b) => RawValue::Text(if *b { "True" } else { "False" }.to_string()),
        // Excel serial date, kept as a number.
        DataType::DateTime(f) => RawValue::Number(*f),
        DataType::Error(e) => {
            debug!("cell_to_raw: error cell {:?} read as missing", e);
            RawValue::Missing
        }
        DataType::Empty => RawValue::Missing,
    }
}
