use survey_collate::{Collation, FrequencyTable, ReportDocument};

pub const DEFAULT_STYLESHEET: &str = r#"
p.large-headline {
    font-family: times, Times New Roman, times-roman, georgia, serif;
    color: #444;
    margin: 0px 0px 100px 0px;
    padding: 40px 40px 40px 40px;
    font-size: 55px;
    line-height: 44px;
    letter-spacing: -1px;
    font-weight: bold;
    text-align: center;
    border-radius: 25px;
    border: 2px solid #111;
    width: 90%;
}

p.medium-headline {
    font-family: times, Times New Roman, times-roman, georgia, serif;
    color: #444;
    margin: 0px -10px 0px 0px;
    padding: 0px 0px 0px 0px;
    font-size: 25px;
    line-height: 24px;
    letter-spacing: -1px;
    font-weight: bold;
    text-align: left;
}

p.name {
    font-family: times, Times New Roman, times-roman, georgia, serif;
    font-weight: bold;
    font-size: 20px;
    margin-top: 2em;
    margin-bottom: 0em;
}
p.question {
    font-family: times, Times New Roman, times-roman, georgia, serif;
    font-size: 16px;
    color: #111;
    font-weight: bold;
    margin-top: 0em;
    margin-bottom: 0em;
    width: 90%;
}
p.answer {
    font-family: times, Times New Roman, times-roman, georgia, serif;
    font-size: 14px;
    color: #111;
    text-align: justify;
    margin-top: 0em;
    margin-bottom: 0em;
    width: 90%;
}
table
{
  border-collapse: collapse;
}
th
{
  color: #ffffff;
  background-color: #000000;
}
td
{
  background-color: #cccccc;
}
table, th, td
{
  font-family:Arial, Helvetica, sans-serif;
  border: 1px solid black;
  text-align: right;
}
"#;

pub struct HtmlSettings<'a> {
    pub stylesheet: &'a str,
    /// The word cloud image, relative to the HTML file.
    pub word_cloud_file: Option<&'a str>,
    /// If set, the number of rows of the word count table.
    pub word_count: Option<usize>,
}

pub fn escape(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            c => res.push(c),
        }
    }
    res
}

pub fn render_report(
    doc: &ReportDocument,
    frequencies: &FrequencyTable,
    settings: &HtmlSettings,
) -> String {
    let md = &doc.metadata;
    let answers_line = match md.enrollment_count {
        Some(enrolled) => format!(
            "Answers from {} of {} enrolled students",
            doc.respondent_count, enrolled
        ),
        None => format!("Answers from {} students", doc.respondent_count),
    };
    let mut html = format!(
        r#"<html>
<head>
<meta charset="utf-8">
<style>
{css}
</style>
</head>
<body>
<div>
<p class="large-headline">{title}</p>
<p class="medium-headline">{code}<br>{instructor}<br>{answers}</p>
<div>
"#,
        css = settings.stylesheet,
        title = escape(&md.course_title),
        code = escape(&md.course_code),
        instructor = escape(&md.instructor_name),
        answers = answers_line
    );

    let section_class = match doc.collation {
        Collation::ByRespondent => "response",
        Collation::ByQuestion => "question-block",
    };
    for section in doc.sections.iter() {
        html.push_str(&format!(
            "<div class=\"{}\">\n<p class=\"name\">{}</p>\n",
            section_class,
            escape(&section.heading)
        ));
        for (label, answer) in section.entries.iter() {
            html.push_str(&format!(
                "<p class=\"question\">{}</p>\n<p class=\"answer\">{}</p>\n",
                escape(label),
                escape(answer)
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");

    html.push_str(r#"<div class="content-analysis">"#);
    if let Some(img) = settings.word_cloud_file {
        html.push_str(&format!(
            r#"<img src="{}" style="width:720px;height:560px;"/>"#,
            escape(img)
        ));
    }
    if let Some(n) = settings.word_count {
        html.push_str(
            r#"<table>
<caption>Most common words</caption>
<tr><th>Word</th><th>Count</th></tr>
"#,
        );
        for (w, c) in frequencies.most_common(n) {
            html.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>\n", escape(&w), c));
        }
        html.push_str("</table>");
    }
    html.push_str(
        r#"
</div>
</div>
</body>
</html>
"#,
    );
    html
}
