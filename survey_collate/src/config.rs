// ********* Input data structures ***********

use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::Display;

/// The content of a single cell, as handed over by the tabular-data loader.
///
/// Loaders are expected to map empty cells (and cells holding spreadsheet
/// errors) to `Missing`. A `Number` holding NaN is also treated as missing.
#[derive(PartialEq, Debug, Clone)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Missing,
}

impl RawValue {
    pub fn is_missing(&self) -> bool {
        match self {
            RawValue::Missing => true,
            RawValue::Number(f) => f.is_nan(),
            RawValue::Text(_) => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        RawValue::Number(f)
    }
}

/// A rectangular table: a header row followed by data rows.
///
/// Rows may be shorter than the header, the missing cells are read as `Missing`.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

// ********* Survey model ***********

/// One question of the survey, as declared in the question map.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Question {
    pub key: String,
    pub prompt: String,
    pub order_index: usize,
    /// This question holds the name of the respondent.
    pub is_identity: bool,
}

/// The questions, in display order.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct QuestionCatalog {
    pub(crate) questions: Vec<Question>,
    pub(crate) by_key: HashMap<String, usize>,
}

impl QuestionCatalog {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, key: &str) -> Option<&Question> {
        self.by_key.get(key).map(|idx| &self.questions[*idx])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn identity(&self) -> Option<&Question> {
        self.questions.iter().find(|q| q.is_identity)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CourseMetadata {
    pub path: String,
    pub course_code: String,
    pub course_title: String,
    pub instructor_name: String,
    /// None when the export leaves the count blank or unreadable.
    pub enrollment_count: Option<u64>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RespondentRecord {
    /// 0-based, in spreadsheet row order.
    pub index: usize,
    pub answers: HashMap<String, RawValue>,
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct ResponseTable {
    pub records: Vec<RespondentRecord>,
    /// Response columns that did not match any question, in header order.
    pub unmatched_columns: Vec<String>,
}

impl ResponseTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportSection {
    pub heading: String,
    /// (question or label, answer text)
    pub entries: Vec<(String, String)>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportDocument {
    pub metadata: CourseMetadata,
    pub collation: Collation,
    pub respondent_count: usize,
    pub sections: Vec<ReportSection>,
    /// All the answers placed in the sections, joined by spaces, in emission order.
    pub aggregate_text: String,
}

/// Token counts, remembering the order in which the tokens were first seen.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FrequencyTable {
    pub(crate) counts: Vec<(String, u64)>,
    pub(crate) positions: HashMap<String, usize>,
    pub(crate) total_tokens: u64,
}

/// Errors that prevent a report from being assembled.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum CollateErrors {
    /// A required column is absent from one of the tables.
    MissingColumn { table: String, column: String },
    /// The response table has no rows, so the course metadata cannot be read.
    NoRespondents,
}

impl Error for CollateErrors {}

impl Display for CollateErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollateErrors::MissingColumn { table, column } => {
                write!(f, "table {} has no column named {:?}", table, column)
            }
            CollateErrors::NoRespondents => write!(f, "the response table has no rows"),
        }
    }
}

// ********* Configuration **********

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Collation {
    ByRespondent,
    ByQuestion,
}

impl Collation {
    /// The label used on the command line and in the artifact file names.
    pub fn label(&self) -> &'static str {
        match self {
            Collation::ByRespondent => "bystudent",
            Collation::ByQuestion => "byquestion",
        }
    }
}

/// The order in which the respondents are laid out in the by-respondent report.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RespondentOrder {
    Forward,
    Reverse,
    // Without a seed, a new permutation is drawn each time.
    Random(Option<u32>),
}

/// How the identity question (the one holding the respondent's name) is found.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum IdentityRule {
    /// The question at this row of the question map.
    Position(usize),
    /// The question with this key (normalized before matching).
    Key(String),
    None,
}

/// The row of the question map holding the respondent's name in the standard export.
pub const DEFAULT_IDENTITY_POSITION: usize = 8;

pub const DEFAULT_TOP_N: usize = 20;

/// The layout of the report.
#[derive(PartialEq, Debug, Clone)]
pub struct ReportOptions {
    pub collation: Collation,
    pub order: RespondentOrder,
    pub identity: IdentityRule,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            collation: Collation::ByRespondent,
            order: RespondentOrder::Forward,
            identity: IdentityRule::Position(DEFAULT_IDENTITY_POSITION),
        }
    }
}

/// The settings of the word count run over the aggregate text.
#[derive(PartialEq, Debug, Clone)]
pub struct WordCountOptions {
    /// Lowercase words left out of the count.
    pub stopwords: HashSet<String>,
    /// The number of words shown as the most common ones.
    pub top_n: usize,
}

impl Default for WordCountOptions {
    fn default() -> Self {
        WordCountOptions {
            stopwords: crate::frequency::default_stopwords(),
            top_n: DEFAULT_TOP_N,
        }
    }
}
