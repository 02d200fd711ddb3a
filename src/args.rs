use clap::Parser;

/// Turns the survey export of a course evaluation into a printable report.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The Excel file (.xlsx) downloaded from the survey tool. It must contain the
    /// worksheets RawData and QuestionMapper.
    #[clap(value_parser)]
    pub input: String,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(short, long, takes_value = false)]
    pub verbose: bool,

    /// If passed as an argument, the report will include a table with the most common words.
    #[clap(short = 'W', long, takes_value = false)]
    pub include_word_count: bool,

    /// (list of words) Extra stop words, i.e. words NOT to include in the word cloud and the
    /// word count. E.g. -s class course lab
    #[clap(short, long, value_parser, multiple_values = true)]
    pub stop_words: Vec<String>,

    /// (forward, reverse or random, default forward) The order of the students in the report.
    #[clap(long, value_parser, default_value = "forward")]
    pub order: String,

    /// (bystudent or byquestion, default bystudent) Groups the answers by student or by question.
    #[clap(long, value_parser, default_value = "bystudent")]
    pub collate: String,

    /// (file path, optional) A JSON file with extra settings: stop words, stylesheet, external
    /// commands, etc.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, 'stdout' or empty) If specified, a summary of the report will be written in
    /// JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the JSON summary of a report. If provided, the
    /// summary of this report is checked against it.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, the HTML file and the word cloud image are deleted once the
    /// PDF is written.
    #[clap(long, takes_value = false)]
    pub remove_intermediate: bool,

    /// If passed as an argument, only the HTML report is written: the word cloud and the PDF
    /// are not generated.
    #[clap(long, takes_value = false)]
    pub html_only: bool,
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["surveyreport", "eval.xlsx"]).unwrap();
        assert_eq!(args.input, "eval.xlsx");
        assert_eq!(args.order, "forward");
        assert_eq!(args.collate, "bystudent");
        assert!(args.stop_words.is_empty());
        assert!(!args.verbose);
        assert!(!args.include_word_count);
    }

    #[test]
    fn stop_words_and_flags() {
        let args = Args::try_parse_from([
            "surveyreport",
            "eval.xlsx",
            "-W",
            "--collate",
            "byquestion",
            "-s",
            "class",
            "lab",
        ])
        .unwrap();
        assert!(args.include_word_count);
        assert_eq!(args.collate, "byquestion");
        assert_eq!(args.stop_words, vec!["class".to_string(), "lab".to_string()]);
    }
}
