//! User configuration loaded from `~/.config/glean/config.toml`.
//!
//! Every field is optional; a missing file means defaults. CLI flags
//! override whatever the file provides.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::extract::ocr::{OcrExtractor, DEFAULT_OCR_LANG};
use crate::extract::pdf::PdfExtractor;
use crate::extract::DocumentRouter;
use crate::layout::LineReconstructor;

/// Tunable extraction parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GleanConfig {
    /// Tesseract language hint, e.g. `"eng"` or `"eng+fin"`.
    pub ocr_lang: String,
    /// Baseline bucket size for PDF line reconstruction, in document units.
    pub line_granularity: f32,
    /// Directory for OCR staging files. Defaults to the system temp dir.
    pub work_dir: Option<PathBuf>,
}

impl Default for GleanConfig {
    fn default() -> Self {
        Self {
            ocr_lang: DEFAULT_OCR_LANG.to_string(),
            line_granularity: 1.0,
            work_dir: None,
        }
    }
}

impl GleanConfig {
    /// Load from `~/.config/glean/config.toml`; defaults when the file
    /// does not exist.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }

    /// Effective OCR staging directory.
    pub fn work_dir(&self) -> PathBuf {
        self.work_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("glean"))
    }

    /// Build a [`DocumentRouter`] with extractors tuned to this config.
    pub fn router(&self) -> DocumentRouter {
        DocumentRouter::with_extractors(vec![
            Box::new(PdfExtractor::new(LineReconstructor::new(
                self.line_granularity,
            ))),
            Box::new(
                OcrExtractor::new()
                    .with_lang(&self.ocr_lang)
                    .with_work_dir(self.work_dir()),
            ),
        ])
    }
}

/// Path of the config file.
fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("glean")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let config: GleanConfig = toml::from_str("").unwrap();
        assert_eq!(config.ocr_lang, "eng");
        assert_eq!(config.line_granularity, 1.0);
        assert!(config.work_dir.is_none());
    }

    #[test]
    fn parses_full_config() {
        let config: GleanConfig = toml::from_str(
            r#"
ocr-lang = "eng+fin"
line-granularity = 2.5
work-dir = "/tmp/glean-staging"
"#,
        )
        .unwrap();
        assert_eq!(config.ocr_lang, "eng+fin");
        assert_eq!(config.line_granularity, 2.5);
        assert_eq!(config.work_dir, Some(PathBuf::from("/tmp/glean-staging")));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: GleanConfig = toml::from_str(r#"ocr-lang = "deu""#).unwrap();
        assert_eq!(config.ocr_lang, "deu");
        assert_eq!(config.line_granularity, 1.0);
    }
}
