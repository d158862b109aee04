use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use glean::ExtractMode;

pub async fn cmd_extract(
    file: &Path,
    mode: ExtractMode,
    lang: Option<&str>,
    output: Option<PathBuf>,
) -> Result<()> {
    let extraction = super::run_extraction(file, mode, lang).await?;

    match extraction.page_count {
        Some(pages) => eprintln!(
            "✅ Extracted {pages} page(s) in {:.0}ms",
            extraction.elapsed_ms
        ),
        None => eprintln!("✅ Extracted in {:.0}ms", extraction.elapsed_ms),
    }

    if let Some(path) = output {
        std::fs::write(&path, &extraction.text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("💾 Saved {} bytes to {}", extraction.text.len(), path.display());
    } else {
        println!("{}", extraction.text);
    }

    Ok(())
}
