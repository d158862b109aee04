use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use glean::analysis::report;
use glean::ExtractMode;

pub async fn cmd_report(
    file: &Path,
    mode: ExtractMode,
    lang: Option<&str>,
    output: Option<PathBuf>,
) -> Result<()> {
    let extraction = super::run_extraction(file, mode, lang).await?;
    let analysis = glean::analyze(&extraction.text);

    let path = match output {
        Some(path) => {
            std::fs::write(&path, report::render(&extraction.text, Some(&analysis)))
                .with_context(|| format!("failed to write {}", path.display()))?;
            path
        }
        None => report::save(&extraction.text, Some(&analysis), Path::new("."))
            .context("failed to write report")?,
    };

    eprintln!("💾 Saved report to {}", path.display());
    Ok(())
}
