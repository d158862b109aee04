//! PDF text-layer extraction.
//!
//! Pure-Rust extraction via `lopdf`: walks each page's content stream,
//! collects one positioned [`TextFragment`] per show-text operation, and
//! reassembles reading-order lines with the [`LineReconstructor`]. Pages are
//! joined with a blank line.
//!
//! # Pipeline
//!
//! ```text
//! PDF bytes → content-stream walk → TextFragments → line reconstruction → text
//! ```
//!
//! Decoding is deliberately shallow: string operands are read as UTF-16BE
//! (BOM-marked), UTF-8, or Latin-1. Font `ToUnicode` CMaps are not consulted,
//! so exotic subset-encoded fonts may come out garbled. Scanned PDFs with no
//! text layer yield the fixed placeholder.

use std::time::Instant;

use async_trait::async_trait;
use lopdf::content::Content;
use lopdf::{Document, Object};
use tracing::{debug, warn};

use super::{ExtractError, Extraction, ProgressFn, Result, TextExtractor};
use crate::layout::{LineReconstructor, TextFragment};

/// Placeholder when a PDF parses but carries no readable text.
pub const EMPTY_PDF_TEXT: &str = "No readable text was found in this PDF.";

/// Kerning adjustment (in 1/1000 em, negated) treated as a word gap inside
/// a `TJ` array.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Extracts the embedded text layer of a PDF.
pub struct PdfExtractor {
    reconstructor: LineReconstructor,
}

impl PdfExtractor {
    pub fn new(reconstructor: LineReconstructor) -> Self {
        Self { reconstructor }
    }

    /// Extract and reconstruct the full document text.
    ///
    /// Per-page failures are skipped (logged), so a single corrupt page does
    /// not lose the rest of the document.
    fn document_text(&self, bytes: &[u8]) -> std::result::Result<(String, usize), lopdf::Error> {
        let doc = Document::load_mem(bytes)?;
        let pages = doc.get_pages();
        let page_count = pages.len();

        let mut page_texts = Vec::with_capacity(page_count);
        for (page_num, page_id) in pages {
            match Self::page_fragments(&doc, page_id) {
                Ok(fragments) => {
                    let lines = self.reconstructor.reconstruct(&fragments);
                    page_texts.push(lines.join("\n"));
                }
                Err(err) => {
                    warn!(page = page_num, error = %err, "skipping unreadable PDF page");
                }
            }
        }

        Ok((page_texts.join("\n\n").trim().to_string(), page_count))
    }

    /// Walk one page's content stream and collect positioned fragments.
    ///
    /// Tracks the text-line origin through `Td`/`TD`/`Tm`/`TL`/`T*` and emits
    /// one fragment per `Tj`/`'`/`"`/`TJ`. The full text matrix is not
    /// modelled; rotated or skewed text keeps its translation only.
    fn page_fragments(
        doc: &Document,
        page_id: (u32, u16),
    ) -> std::result::Result<Vec<TextFragment>, lopdf::Error> {
        let content_bytes = doc.get_page_content(page_id)?;
        let content = Content::decode(&content_bytes)?;

        let mut fragments = Vec::new();
        let mut line_x = 0.0_f32;
        let mut line_y = 0.0_f32;
        let mut leading = 0.0_f32;

        for op in content.operations {
            match op.operator.as_ref() {
                "BT" => {
                    line_x = 0.0;
                    line_y = 0.0;
                    leading = 0.0;
                }
                "Td" => {
                    if let [tx, ty] = op.operands.as_slice() {
                        line_x += number(tx).unwrap_or(0.0);
                        line_y += number(ty).unwrap_or(0.0);
                    }
                }
                "TD" => {
                    if let [tx, ty] = op.operands.as_slice() {
                        line_x += number(tx).unwrap_or(0.0);
                        let ty = number(ty).unwrap_or(0.0);
                        line_y += ty;
                        leading = -ty;
                    }
                }
                "TL" => {
                    if let Some(l) = op.operands.first().and_then(number) {
                        leading = l;
                    }
                }
                "Tm" => {
                    // Only the translation component positions fragments.
                    if op.operands.len() >= 6 {
                        line_x = number(&op.operands[4]).unwrap_or(0.0);
                        line_y = number(&op.operands[5]).unwrap_or(0.0);
                    }
                }
                "T*" => {
                    line_y -= leading;
                }
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        push_fragment(&mut fragments, decode_string_bytes(bytes), line_x, line_y);
                    }
                }
                "'" | "\"" => {
                    line_y -= leading;
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        push_fragment(&mut fragments, decode_string_bytes(bytes), line_x, line_y);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = op.operands.first() {
                        push_fragment(&mut fragments, decode_tj_array(items), line_x, line_y);
                    }
                }
                _ => {}
            }
        }

        Ok(fragments)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(LineReconstructor::default())
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    fn supported_types(&self) -> &[&str] {
        &["application/pdf"]
    }

    async fn extract(
        &self,
        bytes: &[u8],
        content_type: &str,
        _progress: Option<&ProgressFn>,
    ) -> Result<Extraction> {
        let start = Instant::now();

        let (text, page_count) = self.document_text(bytes).map_err(|err| {
            warn!(error = %err, "PDF extraction failed");
            ExtractError::PdfExtraction
        })?;

        debug!(pages = page_count, chars = text.chars().count(), "PDF text layer extracted");

        let text = if text.is_empty() {
            EMPTY_PDF_TEXT.to_string()
        } else {
            text
        };

        Ok(Extraction {
            text,
            page_count: Some(page_count),
            content_type: content_type.to_string(),
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

fn push_fragment(fragments: &mut Vec<TextFragment>, text: String, x: f32, y: f32) {
    if !text.trim().is_empty() {
        fragments.push(TextFragment::new(text, x, y));
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(n) => Some(*n as f32),
        Object::Real(n) => Some(*n),
        _ => None,
    }
}

/// Flatten a `TJ` array into one string. Large negative adjustments advance
/// the pen far enough to read as word gaps, so they become spaces.
fn decode_tj_array(items: &[Object]) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode_string_bytes(bytes)),
            Object::Integer(n) => {
                if (-(*n as f32)) > TJ_SPACE_THRESHOLD && !combined.ends_with(' ') {
                    combined.push(' ');
                }
            }
            Object::Real(n) => {
                if -n > TJ_SPACE_THRESHOLD && !combined.ends_with(' ') {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }
    combined
}

/// Decode a PDF string operand without font encoding tables: UTF-16BE when
/// BOM-marked, else UTF-8, else Latin-1.
fn decode_string_bytes(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter(|c| c.len() == 2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Operation;
    use lopdf::{dictionary, Stream};

    /// Build a one-page PDF placing each `(x, y, text)` via `Tm` + `Tj`.
    fn sample_pdf(texts: &[(f32, f32, &str)]) -> Vec<u8> {
        let mut ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
        ];
        for &(x, y, text) in texts {
            ops.push(Operation::new(
                "Tm",
                vec![1.into(), 0.into(), 0.into(), 1.into(), x.into(), y.into()],
            ));
            ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
        }
        ops.push(Operation::new("ET", vec![]));
        build_pdf(ops)
    }

    fn build_pdf(operations: Vec<Operation>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content encodes"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("document serializes");
        bytes
    }

    #[tokio::test]
    async fn extracts_fragments_in_reading_order() {
        // Written out of visual order; reconstruction restores it.
        let bytes = sample_pdf(&[
            (72.0, 650.0, "Second line"),
            (150.0, 700.0, "world"),
            (72.0, 700.0, "Hello"),
        ]);
        let out = PdfExtractor::default()
            .extract(&bytes, "application/pdf", None)
            .await
            .unwrap();
        assert_eq!(out.text, "Hello world\nSecond line");
        assert_eq!(out.page_count, Some(1));
    }

    #[tokio::test]
    async fn tj_kerning_gaps_become_spaces() {
        let ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new(
                "Tm",
                vec![1.into(), 0.into(), 0.into(), 1.into(), 72.into(), 700.into()],
            ),
            Operation::new(
                "TJ",
                vec![Object::Array(vec![
                    Object::string_literal("Hello"),
                    Object::Integer(-320),
                    Object::string_literal("world"),
                ])],
            ),
            Operation::new("ET", vec![]),
        ];
        let out = PdfExtractor::default()
            .extract(&build_pdf(ops), "application/pdf", None)
            .await
            .unwrap();
        assert_eq!(out.text, "Hello world");
    }

    #[tokio::test]
    async fn td_advances_relative_to_the_line_start() {
        let ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal("first")]),
            Operation::new("Td", vec![0.into(), (-20).into()]),
            Operation::new("Tj", vec![Object::string_literal("second")]),
            Operation::new("ET", vec![]),
        ];
        let out = PdfExtractor::default()
            .extract(&build_pdf(ops), "application/pdf", None)
            .await
            .unwrap();
        assert_eq!(out.text, "first\nsecond");
    }

    #[tokio::test]
    async fn pdf_without_text_layer_yields_placeholder() {
        let bytes = sample_pdf(&[]);
        let out = PdfExtractor::default()
            .extract(&bytes, "application/pdf", None)
            .await
            .unwrap();
        assert_eq!(out.text, EMPTY_PDF_TEXT);
    }

    #[tokio::test]
    async fn corrupt_bytes_normalize_to_pdf_extraction_error() {
        let err = PdfExtractor::default()
            .extract(b"%PDF-1.4 not really a pdf", "application/pdf", None)
            .await
            .unwrap_err();
        assert_eq!(err, ExtractError::PdfExtraction);
    }

    #[test]
    fn decodes_utf16be_and_latin1_strings() {
        let utf16 = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_string_bytes(&utf16), "Hi");
        assert_eq!(decode_string_bytes(b"plain"), "plain");
        assert_eq!(decode_string_bytes(&[0xE9]), "é");
    }
}
