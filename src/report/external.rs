// The word cloud image and the PDF are produced by external programs.

use snafu::prelude::*;
use std::collections::HashSet;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::report::*;

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct WordCloudSettings {
    pub command: String,
    pub width: u32,
    pub height: u32,
    pub font_path: Option<String>,
}

/// The arguments of the word cloud program. The text itself is read from stdin.
pub fn word_cloud_args(
    settings: &WordCloudSettings,
    stopwords_file: &Path,
    image_file: &Path,
) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "--stopwords".to_string(),
        stopwords_file.display().to_string(),
        "--width".to_string(),
        settings.width.to_string(),
        "--height".to_string(),
        settings.height.to_string(),
        "--background".to_string(),
        "white".to_string(),
        "--imagefile".to_string(),
        image_file.display().to_string(),
    ];
    if let Some(font) = &settings.font_path {
        args.push("--fontfile".to_string());
        args.push(font.clone());
    }
    args
}

fn run_command(command: &str, args: &[String], stdin_text: Option<&str>) -> BReportResult<()> {
    info!("Running {} {:?}", command, args);
    let mut child = Command::new(command)
        .args(args)
        .stdin(if stdin_text.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .spawn()
        .context(SpawningCommandSnafu { command })?;
    if let (Some(text), Some(mut stdin)) = (stdin_text, child.stdin.take()) {
        stdin
            .write_all(text.as_bytes())
            .context(SpawningCommandSnafu { command })?;
        // Dropping stdin closes the pipe.
    }
    let status = child.wait().context(SpawningCommandSnafu { command })?;
    debug!("run_command: {} exited with {}", command, status);
    if !status.success() {
        return CommandFailedSnafu { command, status }
            .fail()
            .map_err(Box::new);
    }
    Ok(())
}

pub fn render_word_cloud(
    settings: &WordCloudSettings,
    text: &str,
    stopwords: &HashSet<String>,
    image_file: &Path,
) -> BReportResult<()> {
    let mut sorted: Vec<&String> = stopwords.iter().collect();
    sorted.sort();
    let stopwords_content: String = sorted.iter().map(|s| format!("{}\n", s)).collect();
    let stopwords_file = image_file.with_extension("stopwords.txt");
    let p = stopwords_file.display().to_string();
    fs::write(&stopwords_file, stopwords_content).context(WritingOutputSnafu { path: p })?;

    let args = word_cloud_args(settings, &stopwords_file, image_file);
    let res = run_command(&settings.command, &args, Some(text));
    if let Err(e) = fs::remove_file(&stopwords_file) {
        warn!("Could not remove {}: {}", stopwords_file.display(), e);
    }
    res
}

pub fn render_pdf(command: &str, html_file: &Path, pdf_file: &Path) -> BReportResult<()> {
    let args = vec![
        html_file.display().to_string(),
        pdf_file.display().to_string(),
    ];
    run_command(command, &args, None)
}
