//! `glean` - Document text extractor and engagement analyzer
//!
//! # Features
//!
//! - **PDF text layers**: pure-Rust extraction with reading-order line
//!   reconstruction from positioned fragments
//! - **Scanned images**: OCR through a system tesseract binary with
//!   best-effort progress reporting
//! - **Engagement analytics**: word/character/line/hashtag/mention/emoji
//!   statistics plus rule-based suggestions for short-form platforms
//! - **Reports**: a downloadable plain-text report combining text and stats
//!
//! # Example
//!
//! ```rust,no_run
//! use glean::{DocumentRouter, ExtractMode};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let bytes = std::fs::read("announcement.pdf")?;
//!     let extraction = DocumentRouter::new()
//!         .extract(&bytes, None, ExtractMode::Auto, None)
//!         .await?;
//!     let report = glean::analysis::report::render(&extraction.text, None);
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod extract;
pub mod layout;
pub mod session;

pub use analysis::report::REPORT_FILE_NAME;
pub use analysis::{analyze, TextAnalysis};
pub use config::GleanConfig;
pub use extract::{
    DocumentRouter, ExtractError, ExtractMode, Extraction, OcrExtractor, PdfExtractor,
    TextExtractor, MAX_UPLOAD_BYTES,
};
pub use layout::{LineReconstructor, TextFragment};
pub use session::UploadSession;

/// Version of glean
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
