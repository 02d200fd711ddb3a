use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use survey_collate::*;

use crate::args::Args;
use crate::report::config_reader::*;
use crate::report::io_common::*;

pub mod config_reader;
pub mod external;
pub mod io_common;
pub mod io_excel;
pub mod render_html;
pub mod summary;

pub const RESPONSES_SHEET: &str = "RawData";
pub const QUESTION_MAP_SHEET: &str = "QuestionMapper";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ReportError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet named {sheet}"))]
    MissingSheet { path: String, sheet: String },
    #[snafu(display("The worksheet {sheet} is empty"))]
    EmptySheet { sheet: String },
    #[snafu(display("Error reading file {path}"))]
    ReadingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing json"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Could not assemble the report: {source}"))]
    Collate { source: CollateErrors },
    #[snafu(display("You must specify a .xlsx file, likely downloaded from the survey tool: {path}"))]
    NotExcel { path: String },
    #[snafu(display("Order {order:?} is not fully supported yet, only forward is accepted"))]
    UnsupportedOrder { order: String },
    #[snafu(display("Unknown collation {mode:?}, expected bystudent or byquestion"))]
    UnknownCollation { mode: String },
    #[snafu(display("Could not run {command}"))]
    SpawningCommand {
        source: std::io::Error,
        command: String,
    },
    #[snafu(display("{command} failed: {status}"))]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
    },
    #[snafu(display("Difference detected between the report summary and the reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;
pub type BReportResult<T> = Result<T, Box<ReportError>>;

pub fn parse_collation(mode: &str) -> BReportResult<Collation> {
    match mode {
        "bystudent" => Ok(Collation::ByRespondent),
        "byquestion" => Ok(Collation::ByQuestion),
        x => UnknownCollationSnafu { mode: x }.fail().map_err(Box::new),
    }
}

/// Reads the order requested on the command line.
///
/// The reverse and random orders exist in the library but have not been checked
/// against real exports yet: they are refused here.
pub fn parse_order(order: &str) -> BReportResult<RespondentOrder> {
    match order {
        "forward" => Ok(RespondentOrder::Forward),
        x => UnsupportedOrderSnafu { order: x }.fail().map_err(Box::new),
    }
}

fn check_input(path: &str) -> BReportResult<()> {
    if !is_excel_file(path) {
        return NotExcelSnafu { path }.fail().map_err(Box::new);
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> BReportResult<()> {
    let p = path.display().to_string();
    debug!("write_file: {} ({} bytes)", p, content.len());
    fs::write(path, content).context(WritingOutputSnafu { path: p })?;
    Ok(())
}

fn remove_file(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("Could not remove {}: {}", path.display(), e);
    }
}

pub fn run_report(args: &Args) -> BReportResult<()> {
    check_input(&args.input)?;
    let collation = parse_collation(&args.collate)?;
    let order = parse_order(&args.order)?;

    let config = match &args.config {
        Some(p) => read_config(p)?,
        None => ReportConfig::default(),
    };
    debug!("config: {:?}", config);

    let paths = artifact_paths(&args.input, collation);
    println!(
        "I will write out the following files: {} {} {}",
        paths.pdf.display(),
        paths.html.display(),
        paths.word_cloud.display()
    );
    if args.remove_intermediate {
        println!(
            "But I will delete {} and {}.",
            paths.html.display(),
            paths.word_cloud.display()
        );
    }

    let (responses, question_map) = io_excel::read_survey_tables(&args.input)?;

    let mut extra_stopwords: Vec<String> = args.stop_words.clone();
    extra_stopwords.extend(config.extra_stopwords.clone().unwrap_or_default());
    let options = ReportOptions {
        collation,
        order,
        identity: config.identity_rule(),
    };
    let word_options = WordCountOptions {
        top_n: config.top_n()?,
        ..WordCountOptions::with_extra_stopwords(&extra_stopwords)
    };

    let doc = build_report(&responses, &question_map, &options).context(CollateSnafu {})?;
    let frequencies = count_words(&doc.aggregate_text, &word_options);
    info!(
        "Report: {} sections, {} distinct words",
        doc.sections.len(),
        frequencies.len()
    );

    if !args.html_only {
        external::render_word_cloud(
            &config.word_cloud_settings(),
            &doc.aggregate_text,
            &word_options.stopwords,
            &paths.word_cloud,
        )?;
    }

    let stylesheet = config.stylesheet_css()?;
    let word_cloud_name = simplify_file_name(&paths.word_cloud);
    let html_settings = render_html::HtmlSettings {
        stylesheet: &stylesheet,
        word_cloud_file: if args.html_only {
            None
        } else {
            Some(word_cloud_name.as_str())
        },
        word_count: if args.include_word_count {
            Some(word_options.top_n)
        } else {
            None
        },
    };
    let html = render_html::render_report(&doc, &frequencies, &html_settings);
    write_file(&paths.html, &html)?;

    if !args.html_only {
        external::render_pdf(&config.pdf_command(), &paths.html, &paths.pdf)?;
        if args.remove_intermediate {
            remove_file(&paths.html);
            remove_file(&paths.word_cloud);
        }
    }

    if args.out.is_some() || args.reference.is_some() {
        let summary_js = summary::build_summary_js(&doc, &frequencies, word_options.top_n);
        let pretty = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
        match args.out.as_deref() {
            Some("stdout") => println!("{}", pretty),
            Some(p) => write_file(Path::new(p), &pretty)?,
            None => {}
        }
        if let Some(reference_p) = &args.reference {
            summary::check_reference(&pretty, reference_p)?;
        }
    }

    Ok(())
}
