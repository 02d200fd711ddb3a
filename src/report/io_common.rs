use std::path::{Path, PathBuf};

use survey_collate::Collation;

/// The files written for one report. They sit next to the input file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ArtifactPaths {
    pub html: PathBuf,
    pub pdf: PathBuf,
    pub word_cloud: PathBuf,
}

pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

pub fn is_excel_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false)
}

pub fn artifact_paths(input: &str, collation: Collation) -> ArtifactPaths {
    let p = Path::new(input);
    let stem = p
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let base = format!("{}-{}", stem, collation.label());
    let dir = p.parent().unwrap_or_else(|| Path::new(""));
    ArtifactPaths {
        html: dir.join(format!("{}.html", base)),
        pdf: dir.join(format!("{}.pdf", base)),
        word_cloud: dir.join(format!("{}-wordcloud.png", base)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_next_to_input() {
        let paths = artifact_paths("/data/fall/PHYS101 eval.xlsx", Collation::ByRespondent);
        assert_eq!(
            paths.html,
            PathBuf::from("/data/fall/PHYS101 eval-bystudent.html")
        );
        assert_eq!(paths.pdf, PathBuf::from("/data/fall/PHYS101 eval-bystudent.pdf"));
        assert_eq!(
            paths.word_cloud,
            PathBuf::from("/data/fall/PHYS101 eval-bystudent-wordcloud.png")
        );
        assert_eq!(
            simplify_file_name(&paths.word_cloud),
            "PHYS101 eval-bystudent-wordcloud.png"
        );
    }

    #[test]
    fn relative_input() {
        let paths = artifact_paths("eval.xlsx", Collation::ByQuestion);
        assert_eq!(paths.html, PathBuf::from("eval-byquestion.html"));
    }

    #[test]
    fn excel_extension() {
        assert!(is_excel_file("a.xlsx"));
        assert!(is_excel_file("dir/A.XLSX"));
        assert!(!is_excel_file("a.xls"));
        assert!(!is_excel_file("a.csv"));
        assert!(!is_excel_file("xlsx"));
    }
}
