//! Scanned-image text recognition via the tesseract CLI.
//!
//! Bridges to a system `tesseract` binary (located through `which`): image
//! bytes are staged under the work dir, recognized with
//! `tesseract <file> stdout -l <lang>`, and the recognized text is read back
//! from stdout.
//!
//! Tesseract's CLI emits no machine-readable progress, so progress reporting
//! is coarse best-effort: observers see monotonically non-decreasing values
//! that are not guaranteed to reach 1.0 before completion; completion of the
//! extraction call is authoritative.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};
use uuid::Uuid;

use super::{ExtractError, Extraction, ProgressFn, Result, TextExtractor};

/// Placeholder when recognition succeeds but finds no text.
pub const EMPTY_IMAGE_TEXT: &str = "No readable text found in this image.";

/// Default recognition language passed to tesseract.
pub const DEFAULT_OCR_LANG: &str = "eng";

/// Recognizes text in raster images through the tesseract CLI.
pub struct OcrExtractor {
    lang: String,
    work_dir: PathBuf,
    binary: Option<PathBuf>,
}

impl OcrExtractor {
    pub fn new() -> Self {
        Self {
            lang: DEFAULT_OCR_LANG.to_string(),
            work_dir: std::env::temp_dir().join("glean"),
            binary: None,
        }
    }

    /// Recognition language hint, e.g. `"eng"` or `"eng+fin"`.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Directory for staged image files (created on demand).
    pub fn with_work_dir(mut self, work_dir: PathBuf) -> Self {
        self.work_dir = work_dir;
        self
    }

    /// Explicit tesseract binary, bypassing PATH lookup.
    pub fn with_binary(mut self, binary: PathBuf) -> Self {
        self.binary = Some(binary);
        self
    }

    async fn recognize(&self, bytes: &[u8], progress: &mut ProgressMeter<'_>) -> anyhow::Result<String> {
        progress.report(0.0);

        let format = image::guess_format(bytes).context("unrecognized image format")?;
        let ext = format
            .extensions_str()
            .first()
            .copied()
            .unwrap_or("img");

        let binary = match &self.binary {
            Some(path) => path.clone(),
            None => which::which("tesseract").context("tesseract binary not found in PATH")?,
        };

        tokio::fs::create_dir_all(&self.work_dir)
            .await
            .with_context(|| format!("failed to create work dir {}", self.work_dir.display()))?;
        let staged = self.work_dir.join(format!("{}.{ext}", Uuid::new_v4()));
        tokio::fs::write(&staged, bytes)
            .await
            .with_context(|| format!("failed to stage image at {}", staged.display()))?;

        progress.report(0.1);
        debug!(image = %staged.display(), lang = %self.lang, "running tesseract");

        let output = Command::new(&binary)
            .arg(&staged)
            .arg("stdout")
            .args(["-l", &self.lang])
            .output()
            .await;

        tokio::fs::remove_file(&staged).await.ok();

        let output = output.context("failed to invoke tesseract")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("tesseract exited with {}: {}", output.status, stderr.trim());
        }

        progress.report(1.0);
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for OcrExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for OcrExtractor {
    fn supported_types(&self) -> &[&str] {
        &["image/*"]
    }

    async fn extract(
        &self,
        bytes: &[u8],
        content_type: &str,
        progress: Option<&ProgressFn>,
    ) -> Result<Extraction> {
        let start = Instant::now();
        let mut meter = ProgressMeter::new(progress);

        let text = self.recognize(bytes, &mut meter).await.map_err(|err| {
            error!(error = %err, "OCR failed");
            ExtractError::Ocr
        })?;

        let text = if text.is_empty() {
            EMPTY_IMAGE_TEXT.to_string()
        } else {
            text
        };

        Ok(Extraction {
            text,
            page_count: None,
            content_type: content_type.to_string(),
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

/// Forwards progress values to an observer, clamped to `0.0..=1.0` and
/// monotonically non-decreasing; regressions are dropped.
pub struct ProgressMeter<'a> {
    sink: Option<&'a ProgressFn>,
    last: f32,
}

impl<'a> ProgressMeter<'a> {
    pub fn new(sink: Option<&'a ProgressFn>) -> Self {
        Self { sink, last: -1.0 }
    }

    pub fn report(&mut self, value: f32) {
        let value = value.clamp(0.0, 1.0);
        if value < self.last {
            return;
        }
        self.last = value;
        if let Some(sink) = self.sink {
            sink(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn progress_never_regresses() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |v: f32| seen.lock().unwrap().push(v)
        };
        let sink: &ProgressFn = &sink;
        let mut meter = ProgressMeter::new(Some(sink));
        for v in [0.0, 0.5, 0.3, 0.7, 2.0] {
            meter.report(v);
        }
        assert_eq!(*seen.lock().unwrap(), vec![0.0, 0.5, 0.7, 1.0]);
    }

    #[test]
    fn progress_repeats_are_allowed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |v: f32| seen.lock().unwrap().push(v)
        };
        let sink: &ProgressFn = &sink;
        let mut meter = ProgressMeter::new(Some(sink));
        meter.report(0.4);
        meter.report(0.4);
        assert_eq!(*seen.lock().unwrap(), vec![0.4, 0.4]);
    }

    #[tokio::test]
    async fn undecodable_bytes_normalize_to_ocr_error() {
        let err = OcrExtractor::new()
            .extract(b"definitely not an image", "image/*", None)
            .await
            .unwrap_err();
        assert_eq!(err, ExtractError::Ocr);
    }

    #[tokio::test]
    async fn blank_image_yields_placeholder_when_tesseract_available() {
        if which::which("tesseract").is_err() {
            eprintln!("tesseract not installed; skipping");
            return;
        }

        let mut png = Vec::new();
        image::RgbImage::from_pixel(64, 64, image::Rgb([255, 255, 255]))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let out = OcrExtractor::new()
            .extract(&png, "image/png", None)
            .await
            .unwrap();
        assert_eq!(out.text, EMPTY_IMAGE_TEXT);
    }
}
