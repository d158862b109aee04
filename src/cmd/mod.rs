//! CLI subcommand implementations.

pub mod analyze;
pub mod extract;
pub mod report;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tracing::error;

use glean::extract::ProgressFn;
use glean::{ExtractError, ExtractMode, Extraction, GleanConfig, UploadSession};

/// Read the document and run it through the extraction pipeline, echoing
/// OCR progress to stderr.
pub(crate) async fn run_extraction(
    file: &Path,
    mode: ExtractMode,
    lang: Option<&str>,
) -> Result<Extraction> {
    let mut config = GleanConfig::load()?;
    if let Some(lang) = lang {
        config.ocr_lang = lang.to_string();
    }

    let bytes = std::fs::read(file).map_err(|err| {
        error!(file = %file.display(), error = %err, "failed to read input file");
        anyhow::Error::new(ExtractError::Read)
    })?;

    eprintln!("📄 Processing: {}", file.display());

    let reported = Arc::new(AtomicBool::new(false));
    let progress = {
        let reported = Arc::clone(&reported);
        move |value: f32| {
            reported.store(true, Ordering::Relaxed);
            eprint!("\r🔍 OCR progress: {:>3.0}%", value * 100.0);
        }
    };
    let progress: &ProgressFn = &progress;

    let session = UploadSession::new(config.router());
    let result = session
        .submit(&bytes, None, mode, Some(progress))
        .await
        .expect("sole submission is never superseded");

    if reported.load(Ordering::Relaxed) {
        eprintln!();
    }

    Ok(result?)
}
