use crate::report::*;
use snafu::prelude::*;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::report::external::WordCloudSettings;
use crate::report::render_html::DEFAULT_STYLESHEET;

pub const DEFAULT_WORD_CLOUD_WIDTH: u32 = 1800;
pub const DEFAULT_WORD_CLOUD_HEIGHT: u32 = 1400;
pub const DEFAULT_WORD_CLOUD_COMMAND: &str = "wordcloud_cli";
pub const DEFAULT_PDF_COMMAND: &str = "weasyprint";

/// Optional settings, read from a JSON file.
///
/// All the paths are relative to the directory of the configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "extraStopwords")]
    pub extra_stopwords: Option<Vec<String>>,
    /// A CSS file replacing the default stylesheet.
    pub stylesheet: Option<String>,
    #[serde(rename = "topN")]
    pub top_n: Option<usize>,
    #[serde(rename = "wordCloudWidth")]
    pub word_cloud_width: Option<u32>,
    #[serde(rename = "wordCloudHeight")]
    pub word_cloud_height: Option<u32>,
    #[serde(rename = "fontPath")]
    pub font_path: Option<String>,
    #[serde(rename = "wordCloudCommand")]
    pub word_cloud_command: Option<String>,
    #[serde(rename = "pdfCommand")]
    pub pdf_command: Option<String>,
    /// The column of the question holding the name of the student.
    #[serde(rename = "identityColumn")]
    pub identity_column: Option<String>,
    /// The row of the question map holding the name of the student, starting at 0.
    #[serde(rename = "identityPosition")]
    pub identity_position: Option<usize>,
}

impl ReportConfig {
    /// The column takes precedence over the position.
    pub fn identity_rule(&self) -> IdentityRule {
        match (&self.identity_column, self.identity_position) {
            (Some(c), _) => IdentityRule::Key(c.clone()),
            (None, Some(p)) => IdentityRule::Position(p),
            (None, None) => IdentityRule::Position(DEFAULT_IDENTITY_POSITION),
        }
    }

    pub fn top_n(&self) -> ReportResult<usize> {
        match self.top_n {
            None => Ok(DEFAULT_TOP_N),
            Some(0) => whatever!("topN must be at least 1"),
            Some(x) => Ok(x),
        }
    }

    pub fn word_cloud_settings(&self) -> WordCloudSettings {
        WordCloudSettings {
            command: self
                .word_cloud_command
                .clone()
                .unwrap_or_else(|| DEFAULT_WORD_CLOUD_COMMAND.to_string()),
            width: self.word_cloud_width.unwrap_or(DEFAULT_WORD_CLOUD_WIDTH),
            height: self.word_cloud_height.unwrap_or(DEFAULT_WORD_CLOUD_HEIGHT),
            font_path: self.font_path.clone(),
        }
    }

    pub fn pdf_command(&self) -> String {
        self.pdf_command
            .clone()
            .unwrap_or_else(|| DEFAULT_PDF_COMMAND.to_string())
    }

    pub fn stylesheet_css(&self) -> BReportResult<String> {
        match &self.stylesheet {
            Some(p) => {
                let css = fs::read_to_string(p).context(ReadingFileSnafu { path: p })?;
                Ok(css)
            }
            None => Ok(DEFAULT_STYLESHEET.to_string()),
        }
    }

    // Paths in the file are relative to the file itself.
    fn resolve_paths(mut self, root: &Path) -> ReportConfig {
        let resolve = |p: &String| -> String {
            let pb: PathBuf = [root, Path::new(p)].iter().collect();
            pb.display().to_string()
        };
        self.stylesheet = self.stylesheet.as_ref().map(resolve);
        self.font_path = self.font_path.as_ref().map(resolve);
        self
    }
}

pub fn parse_config(contents: &str) -> BReportResult<ReportConfig> {
    let config: ReportConfig = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_config(path: &str) -> BReportResult<ReportConfig> {
    info!("Reading configuration {:?}", path);
    let contents = fs::read_to_string(path).context(ReadingFileSnafu { path })?;
    let config = parse_config(&contents)?;
    let root = Path::new(path).parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(root))
}
