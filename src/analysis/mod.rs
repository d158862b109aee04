//! Engagement analytics over extracted text.
//!
//! Computes structural statistics (words, characters, lines, hashtags,
//! mentions, emoji) and a small set of rule-based suggestions for short-form
//! social platforms. [`analyze`] is pure, deterministic, and total: it never
//! fails, and identical input always produces an identical result.

pub mod report;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// `#tag`: one or more Unicode letters/digits/underscore after the marker.
/// Adjacent punctuation does not extend the match.
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[\p{L}\p{N}_]+").expect("valid pattern"));

/// `@handle`: same character class as hashtags.
static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[\p{L}\p{N}_]+").expect("valid pattern"));

/// A scalar that marks a grapheme cluster as emoji: pictographic symbols
/// plus regional indicators (flag pairs). Exact counts can shift between
/// Unicode versions; that tolerance is accepted.
static EMOJI_SCALAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Extended_Pictographic}\x{1F1E6}-\x{1F1FF}]").expect("valid pattern"));

const SUGGEST_TRIM: &str =
    "Your content is quite long; consider trimming it for short-form platforms.";
const SUGGEST_ADD_HASHTAGS: &str =
    "Try adding 1–3 relevant hashtags to improve discoverability.";
const SUGGEST_FEWER_HASHTAGS: &str =
    "Consider reducing the number of hashtags; 2–5 focused tags is usually ideal.";
const SUGGEST_CALL_TO_ACTION: &str =
    "Consider ending with a question or call-to-action to encourage engagement.";

/// Word count above which content is flagged as long for short-form platforms.
const LONG_FORM_WORDS: usize = 280;

/// Hashtag count above which tagging reads as spammy.
const MAX_FOCUSED_HASHTAGS: usize = 6;

/// Structural statistics and suggestions for one piece of text.
///
/// Value object: a pure function of the input text, no identity, no mutation
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub word_count: usize,
    /// Unicode scalar values in the raw, untrimmed text.
    pub char_count: usize,
    /// Lines that are non-blank after trimming.
    pub line_count: usize,
    pub hashtag_count: usize,
    pub mention_count: usize,
    pub emoji_count: usize,
    /// Triggered suggestions in fixed rule order: length, hashtags,
    /// closing punctuation.
    pub suggestions: Vec<String>,
}

/// Analyze a piece of text.
///
/// Counting rules:
/// - words: whitespace-separated tokens of the trimmed text
/// - characters: scalar count of the raw text, no trimming
/// - lines: line-break-separated, blank lines dropped
/// - hashtags/mentions: Unicode-aware `#…`/`@…` token matches
/// - emoji: grapheme clusters containing a pictographic scalar
pub fn analyze(text: &str) -> TextAnalysis {
    let word_count = text.split_whitespace().count();
    let char_count = text.chars().count();
    let line_count = text.lines().filter(|l| !l.trim().is_empty()).count();
    let hashtag_count = HASHTAG.find_iter(text).count();
    let mention_count = MENTION.find_iter(text).count();
    let emoji_count = text
        .graphemes(true)
        .filter(|g| EMOJI_SCALAR.is_match(g))
        .count();

    let mut suggestions = Vec::new();

    if word_count > LONG_FORM_WORDS {
        suggestions.push(SUGGEST_TRIM.to_string());
    }

    if hashtag_count == 0 {
        suggestions.push(SUGGEST_ADD_HASHTAGS.to_string());
    } else if hashtag_count > MAX_FOCUSED_HASHTAGS {
        suggestions.push(SUGGEST_FEWER_HASHTAGS.to_string());
    }

    let trimmed = text.trim();
    if !trimmed.ends_with('!') && !trimmed.ends_with('?') {
        suggestions.push(SUGGEST_CALL_TO_ACTION.to_string());
    }

    TextAnalysis {
        word_count,
        char_count,
        line_count,
        hashtag_count,
        mention_count,
        emoji_count,
        suggestions,
    }
}
