use log::{debug, warn};
use std::collections::HashMap;

pub use crate::config::*;
use crate::text::{normalize_column, plain_text};

pub const QUESTION_MAP_COLUMN: &str = "Column";
pub const QUESTION_MAP_QUESTION: &str = "Question";

pub const PATH_COLUMN: &str = "Path";
pub const COURSE_CODE_COLUMN: &str = "CourseCode";
pub const COURSE_TITLE_COLUMN: &str = "CourseTitle";
pub const UNIQUE_ID_COLUMN: &str = "UniqueID";
pub const INSTRUCTOR_NAME_COLUMN: &str = "InstructorName";
pub const ENROLLMENTS_COLUMN: &str = "Enrollments";

/// Metadata columns of the response table. They are never treated as answers.
pub const KNOWN_SKIPS: [&str; 6] = [
    PATH_COLUMN,
    COURSE_CODE_COLUMN,
    COURSE_TITLE_COLUMN,
    UNIQUE_ID_COLUMN,
    INSTRUCTOR_NAME_COLUMN,
    ENROLLMENTS_COLUMN,
];

const QUESTION_MAP_TABLE: &str = "QuestionMapper";
const RESPONSES_TABLE: &str = "RawData";

static MISSING: RawValue = RawValue::Missing;

impl Table {
    pub fn new(header: &[&str], rows: Vec<Vec<RawValue>>) -> Table {
        Table {
            header: header.iter().map(|s| s.to_string()).collect(),
            rows,
        }
    }

    /// The position of the column with this name, after normalization.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let target = normalize_column(name);
        self.header
            .iter()
            .position(|h| normalize_column(h) == target)
    }

    pub fn cell(&self, row: usize, col: usize) -> &RawValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&MISSING)
    }
}

fn require_column(table: &Table, table_name: &str, column: &str) -> Result<usize, CollateErrors> {
    table
        .column_index(column)
        .ok_or_else(|| CollateErrors::MissingColumn {
            table: table_name.to_string(),
            column: column.to_string(),
        })
}

/// Builds the question catalog from the question map.
///
/// Each row gives the column identifier of the response table and the prompt of
/// the question. The row order is the display order.
///
/// ```
/// use survey_collate::builder::*;
///
/// let qmap = Table::new(
///     &["Column", "Question"],
///     vec![
///         vec!["Question 1".into(), "What worked well?".into()],
///         vec!["Question 2".into(), "Name".into()],
///     ],
/// );
/// let catalog = build_catalog(&qmap, &IdentityRule::Position(1))?;
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.identity().unwrap().key, "Question_2");
/// # Ok::<(), CollateErrors>(())
/// ```
pub fn build_catalog(
    question_map: &Table,
    identity: &IdentityRule,
) -> Result<QuestionCatalog, CollateErrors> {
    let col_idx = require_column(question_map, QUESTION_MAP_TABLE, QUESTION_MAP_COLUMN)?;
    let q_idx = require_column(question_map, QUESTION_MAP_TABLE, QUESTION_MAP_QUESTION)?;

    let identity_key: Option<String> = match identity {
        IdentityRule::Key(k) => Some(normalize_column(k)),
        _ => None,
    };

    let mut catalog = QuestionCatalog::default();
    for row_idx in 0..question_map.rows.len() {
        let column = plain_text(question_map.cell(row_idx, col_idx));
        if column.trim().is_empty() {
            debug!("build_catalog: skipping row {} without column", row_idx);
            continue;
        }
        let key = normalize_column(&column);
        let prompt = plain_text(question_map.cell(row_idx, q_idx));
        let is_identity = match identity {
            IdentityRule::Position(p) => *p == row_idx,
            IdentityRule::Key(_) => identity_key.as_deref() == Some(key.as_str()),
            IdentityRule::None => false,
        };

        if let Some(pos) = catalog.by_key.get(&key).cloned() {
            // Last write wins, the question keeps its first position.
            warn!(
                "Question map declares column {:?} more than once, keeping the last question",
                key
            );
            let q = &mut catalog.questions[pos];
            q.prompt = prompt;
            q.is_identity = q.is_identity || is_identity;
        } else {
            catalog.by_key.insert(key.clone(), catalog.questions.len());
            catalog.questions.push(Question {
                key,
                prompt,
                order_index: row_idx,
                is_identity,
            });
        }
    }

    if catalog.identity().is_none() && *identity != IdentityRule::None {
        warn!(
            "No question matches the identity rule {:?}, respondents will not be named",
            identity
        );
    }
    debug!("build_catalog: {:?}", catalog.questions);
    Ok(catalog)
}

/// The enrollment count of the course, if the cell holds a non-negative number.
///
/// Fractional counts are rounded. Blank or unreadable cells only give a warning:
/// the report can be written without the count.
fn read_enrollment(cell: &RawValue) -> Option<u64> {
    let count = match cell {
        RawValue::Number(f) => Some(*f),
        RawValue::Text(s) => s.trim().parse::<f64>().ok(),
        RawValue::Missing => None,
    };
    match count {
        Some(f) if f.is_finite() && f >= 0.0 => {
            if f.fract() != 0.0 {
                warn!("Enrollment count {} is not an integer, rounding it", f);
            }
            Some(f.round() as u64)
        }
        _ => {
            warn!(
                "Could not read the enrollment count from {:?}, it will not be shown",
                cell
            );
            None
        }
    }
}

/// Reads the course metadata from the first row of the response table.
pub fn read_metadata(responses: &Table) -> Result<CourseMetadata, CollateErrors> {
    if responses.rows.is_empty() {
        return Err(CollateErrors::NoRespondents);
    }
    let text_of = |column: &str| -> Result<String, CollateErrors> {
        let idx = require_column(responses, RESPONSES_TABLE, column)?;
        Ok(plain_text(responses.cell(0, idx)))
    };

    let enrollments_idx = require_column(responses, RESPONSES_TABLE, ENROLLMENTS_COLUMN)?;
    let enrollment_count = read_enrollment(responses.cell(0, enrollments_idx));

    Ok(CourseMetadata {
        path: text_of(PATH_COLUMN)?,
        course_code: text_of(COURSE_CODE_COLUMN)?,
        course_title: text_of(COURSE_TITLE_COLUMN)?,
        instructor_name: text_of(INSTRUCTOR_NAME_COLUMN)?,
        enrollment_count,
    })
}

/// Builds one record per row of the response table.
///
/// Columns that match no question are dropped with a warning. The metadata
/// columns are dropped silently.
pub fn build_responses(responses: &Table, catalog: &QuestionCatalog) -> ResponseTable {
    let skips: Vec<String> = KNOWN_SKIPS.iter().map(|s| normalize_column(s)).collect();

    // The header is shared by all the rows: resolve the matching once.
    let mut matched: Vec<(usize, String)> = Vec::new();
    let mut unmatched_columns: Vec<String> = Vec::new();
    for (col_idx, name) in responses.header.iter().enumerate() {
        let key = normalize_column(name);
        if skips.contains(&key) {
            continue;
        }
        if catalog.contains_key(&key) {
            matched.push((col_idx, key));
        } else {
            warn!("Could not find column {:?} in the question map", name);
            unmatched_columns.push(name.clone());
        }
    }
    debug!("build_responses: matched columns: {:?}", matched);

    let mut records: Vec<RespondentRecord> = Vec::new();
    for index in 0..responses.rows.len() {
        let answers: HashMap<String, RawValue> = matched
            .iter()
            .map(|(col_idx, key)| (key.clone(), responses.cell(index, *col_idx).clone()))
            .collect();
        records.push(RespondentRecord { index, answers });
    }

    ResponseTable {
        records,
        unmatched_columns,
    }
}
