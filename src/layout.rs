//! Reading-order line reconstruction from positioned text fragments.
//!
//! PDF text layers carry no line structure, just fragments of text with
//! coordinates (origin bottom-left, y increasing upward). This module
//! reassembles them into visual lines:
//!
//! 1. Group fragments whose baseline y rounds to the same bucket.
//! 2. Order buckets by descending y (top of page first).
//! 3. Within a bucket, order fragments by ascending x.
//! 4. Join fragment texts with a single space.
//!
//! Fragments on the same typographic line rarely share an exact y value due
//! to font metrics, so grouping uses rounding rather than equality. The
//! rounding granularity is tunable per font/resolution.
//!
//! Known approximation: only y is used for grouping, so multi-column pages
//! interleave columns within the same visual row. Column detection is out of
//! scope.

use std::collections::BTreeMap;

/// One positioned run of text on a page.
///
/// Coordinates are in document space: origin bottom-left, x increasing
/// rightward, y increasing upward (the baseline of the run).
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// Groups positioned fragments into top-to-bottom reading-order lines.
#[derive(Debug, Clone)]
pub struct LineReconstructor {
    /// Baseline bucket size in document units. Fragments whose y coordinates
    /// round to the same multiple of this value share a line.
    granularity: f32,
}

impl LineReconstructor {
    /// Create a reconstructor with the given baseline bucket size.
    ///
    /// Non-positive or non-finite granularities fall back to the default.
    pub fn new(granularity: f32) -> Self {
        let granularity = if granularity.is_finite() && granularity > 0.0 {
            granularity
        } else {
            1.0
        };
        Self { granularity }
    }

    /// Reassemble one page of fragments into ordered lines of text.
    ///
    /// Returns one string per visual line, top of page first. Empty input
    /// yields an empty vec; reconstruction itself cannot fail.
    pub fn reconstruct(&self, fragments: &[TextFragment]) -> Vec<String> {
        let mut rows: BTreeMap<i64, Vec<&TextFragment>> = BTreeMap::new();
        for fragment in fragments {
            let key = (fragment.y / self.granularity).round() as i64;
            rows.entry(key).or_default().push(fragment);
        }

        // BTreeMap iterates ascending y; reading order is descending.
        rows.into_iter()
            .rev()
            .map(|(_, mut row)| {
                // Stable sort: fragments with identical x keep input order.
                row.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
                row.iter()
                    .map(|f| f.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

impl Default for LineReconstructor {
    fn default() -> Self {
        Self::new(1.0)
    }
}
