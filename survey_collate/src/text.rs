use crate::config::RawValue;

/// Displayed in place of a missing answer.
pub const NO_ANSWER: &str = "No answer given.";

/// The placeholder that survey tools put in question prompts.
pub const INSTRUCTOR_PLACEHOLDER: &str = "[InstructorName]";

pub const KEY_SEPARATOR: char = '_';

/// Puts a column identifier into the key space shared by both tables.
///
/// Every run of whitespace becomes a single `_`, leading and trailing runs
/// included. `"Question 1"`, `"Question  1"` and `"Question_1"` all map to
/// `"Question_1"`.
///
/// ```
/// use survey_collate::normalize_column;
///
/// assert_eq!(normalize_column("Question \t 1"), "Question_1");
/// assert_eq!(normalize_column(" Q 1 "), "_Q_1_");
/// assert_eq!(normalize_column("Question_1"), "Question_1");
/// ```
pub fn normalize_column(identifier: &str) -> String {
    let mut key = String::with_capacity(identifier.len());
    let mut in_run = false;
    for c in identifier.chars() {
        if c.is_whitespace() {
            if !in_run {
                key.push(KEY_SEPARATOR);
            }
            in_run = true;
        } else {
            key.push(c);
            in_run = false;
        }
    }
    key
}

/// The display text of an answer.
pub fn format_answer(raw: &RawValue) -> String {
    if raw.is_missing() {
        return NO_ANSWER.to_string();
    }
    match raw {
        RawValue::Text(s) => s.clone(),
        // Display for f64 already drops the decimal point for integral values.
        RawValue::Number(f) => f.to_string(),
        RawValue::Missing => NO_ANSWER.to_string(),
    }
}

/// The text of a cell without any substitution for missing values.
pub fn plain_text(raw: &RawValue) -> String {
    if raw.is_missing() {
        return String::new();
    }
    format_answer(raw)
}

/// The text of a question prompt, as shown in the report.
pub fn resolve_question(prompt: &str, instructor_name: &str) -> String {
    prompt
        .replace(INSTRUCTOR_PLACEHOLDER, instructor_name)
        .replace('\u{a0}', " ")
}
