//! Type-aware document text extraction.
//!
//! Routes uploaded document bytes to the appropriate extractor based on the
//! declared content type (or byte sniffing when none is declared). Each
//! extractor implements [`TextExtractor`] to turn raw bytes into linear text
//! for analysis.
//!
//! # Supported Content Types
//!
//! | Type | Extractor |
//! |------|-----------|
//! | `application/pdf` | [`PdfExtractor`] |
//! | `image/*` | [`OcrExtractor`] |
//!
//! An explicit [`ExtractMode`] forces one path regardless of the detected
//! type; `auto` rejects anything that is neither PDF nor image.
//!
//! # Failure model
//!
//! Every failure is terminal-and-recoverable: normalized to one
//! [`ExtractError`] variant with a fixed user-facing message, no retry, no
//! partial state. Underlying causes are logged here and never surfaced.

pub mod ocr;
pub mod pdf;

pub use ocr::OcrExtractor;
pub use pdf::PdfExtractor;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Extraction errors shown to the user verbatim.
///
/// Variants carry no cause: detail is logged at the normalization site only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("File is too large. Please upload a file under 10MB.")]
    FileTooLarge { size: usize },

    #[error("Unsupported file type for the selected mode. Please upload a PDF or image.")]
    UnsupportedType,

    #[error("Failed to read PDF. Try another file.")]
    PdfExtraction,

    #[error("Failed to run OCR on this image. Please try a clearer JPG/PNG.")]
    Ocr,

    #[error("Unable to read this file.")]
    Read,
}

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Extraction path selector. `Auto` follows the detected content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractMode {
    #[default]
    Auto,
    Pdf,
    Image,
}

/// Best-effort progress observer, called with values in `0.0..=1.0`.
///
/// Only the OCR path reports intermediate progress; completion of the
/// extraction call is authoritative regardless of the last reported value.
pub type ProgressFn = dyn Fn(f32) + Send + Sync;

/// Result of one extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Extracted text, trimmed; a fixed placeholder when the source had no
    /// readable text.
    pub text: String,
    /// Number of pages (for paginated formats like PDF).
    pub page_count: Option<usize>,
    /// Effective content type the bytes were processed as.
    pub content_type: String,
    /// Extraction time in milliseconds.
    pub elapsed_ms: f64,
}

/// Converts document bytes into linear text.
///
/// Implementations are stateless; the router owns dispatch and the size cap.
/// This is the only async boundary in the crate.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// MIME types this extractor supports. `"image/*"` matches the whole
    /// image family.
    fn supported_types(&self) -> &[&str];

    /// Extract text from raw document bytes.
    async fn extract(
        &self,
        bytes: &[u8],
        content_type: &str,
        progress: Option<&ProgressFn>,
    ) -> Result<Extraction>;
}

/// Sniff a content type from magic bytes.
///
/// Recognizes the PDF header and the common raster image formats; anything
/// else is `None`.
pub fn detect_content_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"%PDF-") {
        return Some("application/pdf");
    }
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

/// Routes document bytes to the appropriate [`TextExtractor`].
pub struct DocumentRouter {
    extractors: Vec<Box<dyn TextExtractor>>,
}

impl DocumentRouter {
    /// Create a router with the default PDF and OCR extractors.
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Box::new(PdfExtractor::default()),
                Box::new(OcrExtractor::default()),
            ],
        }
    }

    /// Create a router over a custom extractor set (used by tests and by
    /// callers that tune extractor parameters).
    pub fn with_extractors(extractors: Vec<Box<dyn TextExtractor>>) -> Self {
        Self { extractors }
    }

    /// Extract text from `bytes`.
    ///
    /// `content_type` is the declared MIME type if one is known (parameters
    /// like `; charset=` are ignored); when absent the bytes are sniffed.
    /// `mode` forces the PDF or OCR path regardless of the detected type.
    pub async fn extract(
        &self,
        bytes: &[u8],
        content_type: Option<&str>,
        mode: ExtractMode,
        progress: Option<&ProgressFn>,
    ) -> Result<Extraction> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            warn!(size = bytes.len(), "upload over size cap rejected");
            return Err(ExtractError::FileTooLarge { size: bytes.len() });
        }

        let declared = content_type
            .map(|t| t.split(';').next().unwrap_or(t).trim().to_lowercase());
        let detected = declared
            .clone()
            .or_else(|| detect_content_type(bytes).map(str::to_string));

        let effective = match mode {
            ExtractMode::Pdf => "application/pdf".to_string(),
            ExtractMode::Image => match detected {
                Some(t) if t.starts_with("image/") => t,
                _ => "image/*".to_string(),
            },
            ExtractMode::Auto => match detected {
                Some(t) if t == "application/pdf" || t.starts_with("image/") => t,
                other => {
                    warn!(detected = ?other, "no extraction path for content type");
                    return Err(ExtractError::UnsupportedType);
                }
            },
        };

        debug!(content_type = %effective, ?mode, size = bytes.len(), "dispatching extraction");

        let extractor = self
            .extractors
            .iter()
            .find(|e| e.supported_types().iter().any(|t| type_matches(t, &effective)))
            .ok_or(ExtractError::UnsupportedType)?;

        extractor.extract(bytes, &effective, progress).await
    }
}

impl Default for DocumentRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Match a supported-type pattern against an effective MIME type, with
/// family wildcards on either side (`image/*`).
fn type_matches(pattern: &str, mime: &str) -> bool {
    if pattern == mime {
        return true;
    }
    if let Some(family) = pattern.strip_suffix("/*") {
        return mime.strip_prefix(family).is_some_and(|rest| rest.starts_with('/'));
    }
    if let Some(family) = mime.strip_suffix("/*") {
        return pattern.strip_prefix(family).is_some_and(|rest| rest.starts_with('/'));
    }
    false
}
