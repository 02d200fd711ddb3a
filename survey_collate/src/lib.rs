mod config;
pub mod builder;
pub mod frequency;
pub mod ordering;
mod text;

use log::{debug, info, warn};

pub use crate::config::*;
pub use crate::frequency::{analyze, count_words, default_stopwords, stopwords_with};
pub use crate::ordering::respondent_order;
pub use crate::text::{
    format_answer, normalize_column, plain_text, resolve_question, INSTRUCTOR_PLACEHOLDER,
    NO_ANSWER,
};

use crate::builder::{build_catalog, build_responses, read_metadata};

static MISSING: RawValue = RawValue::Missing;

// Collects the answers in the order they are emitted.
struct AggregateText {
    parts: Vec<String>,
}

impl AggregateText {
    fn new() -> AggregateText {
        AggregateText { parts: Vec::new() }
    }

    fn push(&mut self, answer: &str) {
        self.parts.push(answer.to_string());
    }

    fn finish(self) -> String {
        self.parts.join(" ")
    }
}

fn answer_of<'a>(record: &'a RespondentRecord, key: &str) -> &'a RawValue {
    record.answers.get(key).unwrap_or(&MISSING)
}

/// The display name of a respondent, taken from the identity question.
fn respondent_name(record: &RespondentRecord, catalog: &QuestionCatalog) -> Option<String> {
    catalog
        .identity()
        .map(|q| format_answer(answer_of(record, &q.key)))
}

fn respondent_heading(record: &RespondentRecord, catalog: &QuestionCatalog) -> String {
    match respondent_name(record, catalog) {
        Some(name) => format!("Student {} ({})", record.index + 1, name),
        None => format!("Student {}", record.index + 1),
    }
}

/// Lays out the report one respondent at a time.
///
/// Every question is listed for every respondent, including the identity
/// question that already appears in the heading.
pub fn collate_by_respondent(
    responses: &ResponseTable,
    catalog: &QuestionCatalog,
    metadata: &CourseMetadata,
    order: RespondentOrder,
) -> (Vec<ReportSection>, String) {
    let mut sections: Vec<ReportSection> = Vec::new();
    let mut aggregate = AggregateText::new();
    for idx in respondent_order(responses.len(), order) {
        let record = &responses.records[idx];
        let mut entries: Vec<(String, String)> = Vec::new();
        for q in catalog.questions() {
            let answer = format_answer(answer_of(record, &q.key));
            aggregate.push(&answer);
            entries.push((resolve_question(&q.prompt, &metadata.instructor_name), answer));
        }
        sections.push(ReportSection {
            heading: respondent_heading(record, catalog),
            entries,
        });
    }
    (sections, aggregate.finish())
}

/// Lays out the report one question at a time.
///
/// The identity question does not get its own section: it labels the answers
/// of the other questions. The respondents are always in spreadsheet order.
pub fn collate_by_question(
    responses: &ResponseTable,
    catalog: &QuestionCatalog,
    metadata: &CourseMetadata,
) -> (Vec<ReportSection>, String) {
    let labels: Vec<String> = responses
        .records
        .iter()
        .map(|r| {
            respondent_name(r, catalog).unwrap_or_else(|| format!("Student {}", r.index + 1))
        })
        .collect();

    let mut sections: Vec<ReportSection> = Vec::new();
    let mut aggregate = AggregateText::new();
    for q in catalog.questions().iter().filter(|q| !q.is_identity) {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (record, label) in responses.records.iter().zip(labels.iter()) {
            let answer = format_answer(answer_of(record, &q.key));
            aggregate.push(&answer);
            entries.push((label.clone(), answer));
        }
        sections.push(ReportSection {
            heading: resolve_question(&q.prompt, &metadata.instructor_name),
            entries,
        });
    }
    (sections, aggregate.finish())
}

/// Collates the responses with the given strategy.
///
/// The order only applies to the by-respondent layout.
pub fn collate(
    responses: &ResponseTable,
    catalog: &QuestionCatalog,
    metadata: &CourseMetadata,
    collation: Collation,
    order: RespondentOrder,
) -> (Vec<ReportSection>, String) {
    match collation {
        Collation::ByRespondent => collate_by_respondent(responses, catalog, metadata, order),
        Collation::ByQuestion => {
            if order != RespondentOrder::Forward {
                debug!("collate: order {:?} ignored when collating by question", order);
            }
            collate_by_question(responses, catalog, metadata)
        }
    }
}

/// Builds the report document from the two tables of a survey export.
///
/// Arguments:
/// * `responses` the raw data, one row per respondent
/// * `question_map` the mapping from response columns to question prompts
/// * `options` the layout of the report
pub fn build_report(
    responses: &Table,
    question_map: &Table,
    options: &ReportOptions,
) -> Result<ReportDocument, CollateErrors> {
    let catalog = build_catalog(question_map, &options.identity)?;
    let metadata = read_metadata(responses)?;
    let table = build_responses(responses, &catalog);
    info!(
        "Processing {} respondents ({:?} enrolled), {} questions",
        table.len(),
        metadata.enrollment_count,
        catalog.len()
    );
    match metadata.enrollment_count {
        Some(enrolled) if table.len() as u64 > enrolled => warn!(
            "More respondents ({}) than enrolled students ({})",
            table.len(),
            enrolled
        ),
        _ => {}
    }

    let (sections, aggregate_text) = collate(
        &table,
        &catalog,
        &metadata,
        options.collation,
        options.order,
    );
    Ok(ReportDocument {
        metadata,
        collation: options.collation,
        respondent_count: table.len(),
        sections,
        aggregate_text,
    })
}

#[cfg(test)]
mod tests {
    use super::builder::Table;
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn question_map() -> Table {
        Table::new(
            &["Column", "Question"],
            vec![
                vec!["q1".into(), "What worked well?".into()],
                vec!["q2".into(), "Name".into()],
            ],
        )
    }

    fn responses() -> Table {
        Table::new(
            &[
                "Path",
                "CourseCode",
                "CourseTitle",
                "UniqueID",
                "InstructorName",
                "Enrollments",
                "q1",
                "q2",
            ],
            vec![
                vec![
                    "/c".into(),
                    "BIO 200".into(),
                    "Genetics".into(),
                    RawValue::Number(11.0),
                    "Dr. Jones".into(),
                    RawValue::Number(25.0),
                    "great labs".into(),
                    "Alice".into(),
                ],
                vec![
                    "/c".into(),
                    "BIO 200".into(),
                    "Genetics".into(),
                    RawValue::Number(12.0),
                    "Dr. Jones".into(),
                    RawValue::Number(25.0),
                    RawValue::Number(f64::NAN),
                    "Bob".into(),
                ],
            ],
        )
    }

    fn options(collation: Collation, order: RespondentOrder) -> ReportOptions {
        ReportOptions {
            collation,
            order,
            identity: IdentityRule::Key("q2".to_string()),
            ..ReportOptions::default()
        }
    }

    fn headings(doc: &ReportDocument) -> Vec<String> {
        doc.sections.iter().map(|s| s.heading.clone()).collect()
    }

    #[test]
    fn by_respondent_forward() {
        init();
        let doc = build_report(
            &responses(),
            &question_map(),
            &options(Collation::ByRespondent, RespondentOrder::Forward),
        )
        .unwrap();
        assert_eq!(headings(&doc), vec!["Student 1 (Alice)", "Student 2 (Bob)"]);
        assert_eq!(
            doc.sections[1].entries,
            vec![
                ("What worked well?".to_string(), NO_ANSWER.to_string()),
                ("Name".to_string(), "Bob".to_string())
            ]
        );
        assert_eq!(doc.aggregate_text, "great labs Alice No answer given. Bob");
        assert_eq!(doc.respondent_count, 2);
        assert_eq!(doc.metadata.course_title, "Genetics");
    }

    #[test]
    fn by_respondent_reverse() {
        init();
        let doc = build_report(
            &responses(),
            &question_map(),
            &options(Collation::ByRespondent, RespondentOrder::Reverse),
        )
        .unwrap();
        assert_eq!(headings(&doc), vec!["Student 2 (Bob)", "Student 1 (Alice)"]);
        assert_eq!(doc.aggregate_text, "No answer given. Bob great labs Alice");
    }

    #[test]
    fn by_respondent_random_keeps_every_respondent() {
        init();
        let doc = build_report(
            &responses(),
            &question_map(),
            &options(Collation::ByRespondent, RespondentOrder::Random(Some(7))),
        )
        .unwrap();
        let mut h = headings(&doc);
        h.sort();
        assert_eq!(h, vec!["Student 1 (Alice)", "Student 2 (Bob)"]);
    }

    #[test]
    fn by_question() {
        init();
        let doc = build_report(
            &responses(),
            &question_map(),
            &options(Collation::ByQuestion, RespondentOrder::Forward),
        )
        .unwrap();
        assert_eq!(headings(&doc), vec!["What worked well?"]);
        assert_eq!(
            doc.sections[0].entries,
            vec![
                ("Alice".to_string(), "great labs".to_string()),
                ("Bob".to_string(), NO_ANSWER.to_string())
            ]
        );
        assert_eq!(doc.aggregate_text, "great labs No answer given.");
    }

    #[test]
    fn by_question_section_sizes() {
        init();
        let qmap = Table::new(
            &["Column", "Question"],
            (0..10)
                .map(|i| {
                    vec![
                        RawValue::Text(format!("Question {}", i + 1)),
                        RawValue::Text(format!("Prompt {}", i + 1)),
                    ]
                })
                .collect(),
        );
        let mut header: Vec<String> = vec!["CourseCode", "Path", "CourseTitle", "InstructorName"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        header.push("Enrollments".to_string());
        header.extend((0..10).map(|i| format!("Question_{}", i + 1)));
        let rows: Vec<Vec<RawValue>> = (0..3)
            .map(|r| {
                let mut row: Vec<RawValue> = vec![
                    "C".into(),
                    "P".into(),
                    "T".into(),
                    "I".into(),
                    RawValue::Number(3.0),
                ];
                row.extend((0..10).map(|i| RawValue::Number((r * 10 + i) as f64)));
                row
            })
            .collect();
        let raw = Table { header, rows };

        let opts = ReportOptions {
            collation: Collation::ByQuestion,
            ..ReportOptions::default()
        };
        let doc = build_report(&raw, &qmap, &opts).unwrap();
        // The 9th question names the respondents.
        assert_eq!(doc.sections.len(), 9);
        assert!(doc.sections.iter().all(|s| s.entries.len() == 3));
        assert!(!headings(&doc).contains(&"Prompt 9".to_string()));
        assert_eq!(doc.sections[0].entries[1].0, "18");
    }

    #[test]
    fn instructor_placeholder_in_headings() {
        init();
        let qmap = Table::new(
            &["Column", "Question"],
            vec![
                vec!["q1".into(), "Was [InstructorName]\u{a0}helpful?".into()],
                vec!["q2".into(), "Name".into()],
            ],
        );
        let doc = build_report(
            &responses(),
            &qmap,
            &options(Collation::ByQuestion, RespondentOrder::Forward),
        )
        .unwrap();
        assert_eq!(headings(&doc), vec!["Was Dr. Jones helpful?"]);
    }

    #[test]
    fn without_identity_question() {
        init();
        let opts = ReportOptions {
            identity: IdentityRule::None,
            ..ReportOptions::default()
        };
        let doc = build_report(&responses(), &question_map(), &opts).unwrap();
        assert_eq!(headings(&doc), vec!["Student 1", "Student 2"]);
    }

    #[test]
    fn missing_question_column_reads_as_no_answer() {
        init();
        let qmap = Table::new(
            &["Column", "Question"],
            vec![
                vec!["q1".into(), "What worked well?".into()],
                vec!["q2".into(), "Name".into()],
                vec!["q3".into(), "Anything else?".into()],
            ],
        );
        let doc = build_report(
            &responses(),
            &qmap,
            &options(Collation::ByRespondent, RespondentOrder::Forward),
        )
        .unwrap();
        assert_eq!(
            doc.sections[0].entries[2],
            ("Anything else?".to_string(), NO_ANSWER.to_string())
        );
    }

    #[test]
    fn blank_enrollment_still_builds() {
        init();
        let mut raw = responses();
        for row in raw.rows.iter_mut() {
            row[5] = RawValue::Missing;
        }
        let doc = build_report(&raw, &question_map(), &ReportOptions::default()).unwrap();
        assert_eq!(doc.metadata.enrollment_count, None);
        assert_eq!(doc.respondent_count, 2);
    }

    #[test]
    fn schema_errors_are_reported() {
        init();
        let qmap = Table::new(&["Col", "Question"], vec![]);
        let err = build_report(&responses(), &qmap, &ReportOptions::default()).unwrap_err();
        assert!(matches!(err, CollateErrors::MissingColumn { .. }));
    }
}
