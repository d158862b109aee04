//! Plain-text report rendering.
//!
//! Combines the extracted text and its [`TextAnalysis`] into the
//! downloadable report. Rendering is total and regenerable; the report is
//! never stored, only derived.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::{analyze, TextAnalysis};

/// File name of the downloadable report artifact.
pub const REPORT_FILE_NAME: &str = "content-analysis-report.txt";

/// Render the analysis report for `text`.
///
/// Computes the analysis when one is not supplied. Empty input yields the
/// literal `"No text extracted."` with no further sections.
pub fn render(text: &str, analysis: Option<&TextAnalysis>) -> String {
    if text.is_empty() {
        return "No text extracted.".to_string();
    }

    let computed;
    let a = match analysis {
        Some(a) => a,
        None => {
            computed = analyze(text);
            &computed
        }
    };

    let mut report = String::from("Social Media Content Analysis Report\n\n");
    report.push_str(&format!("Words: {}\n", a.word_count));
    report.push_str(&format!("Characters: {}\n", a.char_count));
    report.push_str(&format!("Lines: {}\n", a.line_count));
    report.push_str(&format!("Hashtags: {}\n", a.hashtag_count));
    report.push_str(&format!("Mentions: {}\n", a.mention_count));
    report.push_str(&format!("Emojis: {}\n\n", a.emoji_count));

    report.push_str("Suggestions:\n");
    if a.suggestions.is_empty() {
        report.push_str("Looks good! No major issues detected.\n");
    } else {
        for (idx, suggestion) in a.suggestions.iter().enumerate() {
            report.push_str(&format!("{}. {suggestion}\n", idx + 1));
        }
    }

    report.push_str("\n---\n\nExtracted Text:\n\n");
    report.push_str(text.trim());

    report
}

/// Render and write the report to `dir/content-analysis-report.txt` (UTF-8).
///
/// Returns the path of the written file.
pub fn save(text: &str, analysis: Option<&TextAnalysis>, dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(REPORT_FILE_NAME);
    let mut file = std::fs::File::create(&path)?;
    file.write_all(render(text, analysis).as_bytes())?;
    Ok(path)
}
