use serde_json::json;
use serde_json::Value as JSValue;
use snafu::prelude::*;
use text_diff::print_diff;

use crate::report::*;

fn sections_to_json(doc: &ReportDocument) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for section in doc.sections.iter() {
        let entries: Vec<JSValue> = section
            .entries
            .iter()
            .map(|(label, answer)| json!({"label": label, "answer": answer}))
            .collect();
        l.push(json!({"heading": section.heading, "entries": entries}));
    }
    l
}

/// A JSON description of the report, used for checking outputs against references.
pub fn build_summary_js(
    doc: &ReportDocument,
    frequencies: &FrequencyTable,
    top_n: usize,
) -> JSValue {
    let md = &doc.metadata;
    let words: Vec<JSValue> = frequencies
        .most_common(top_n)
        .iter()
        .map(|(w, c)| json!({"word": w, "count": c}))
        .collect();
    json!({
        "course": {
            "code": md.course_code,
            "title": md.course_title,
            "instructor": md.instructor_name,
            "enrollments": md.enrollment_count,
        },
        "collation": doc.collation.label(),
        "respondents": doc.respondent_count,
        "sections": sections_to_json(doc),
        "mostCommonWords": words,
    })
}

pub fn read_summary(path: &str) -> BReportResult<JSValue> {
    let contents = fs::read_to_string(path).context(ReadingFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Compares a pretty-printed summary with the one stored in a reference file.
pub fn check_reference(pretty_summary: &str, reference_path: &str) -> BReportResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_ref = serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_ref != pretty_summary {
        warn!("Found differences with the reference summary {}", reference_path);
        print_diff(pretty_ref.as_str(), pretty_summary, "\n");
        return ReferenceMismatchSnafu {}.fail().map_err(Box::new);
    }
    info!("The report matches the reference summary {}", reference_path);
    Ok(())
}
