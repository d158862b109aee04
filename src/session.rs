//! Generation-tagged extraction sessions.
//!
//! The upload surface allows one extraction at a time, but a superseded
//! operation cannot be cancelled; it runs to completion and must not
//! overwrite the newer upload's result when it finally resolves. Each
//! submission is tagged with a generation from an atomic counter; completions
//! whose generation is no longer current are discarded.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::extract::{DocumentRouter, ExtractMode, Extraction, ProgressFn, Result};

/// Monotonic operation counter distinguishing the current upload from
/// superseded ones.
#[derive(Debug, Default)]
pub struct Generation(AtomicU64);

impl Generation {
    /// Start a new operation, superseding all earlier ones. Returns its tag.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `tag` still identifies the latest operation.
    pub fn is_current(&self, tag: u64) -> bool {
        self.0.load(Ordering::SeqCst) == tag
    }
}

/// One logical upload slot: serial submissions, latest-wins results.
pub struct UploadSession {
    router: DocumentRouter,
    generation: Generation,
}

impl UploadSession {
    pub fn new(router: DocumentRouter) -> Self {
        Self {
            router,
            generation: Generation::default(),
        }
    }

    /// Run an extraction tagged with a fresh generation.
    ///
    /// Returns `None` when a newer submission superseded this one while it
    /// was in flight; the stale result (success or failure alike) is
    /// dropped, never surfaced. The extraction itself is not cancelled.
    pub async fn submit(
        &self,
        bytes: &[u8],
        content_type: Option<&str>,
        mode: ExtractMode,
        progress: Option<&ProgressFn>,
    ) -> Option<Result<Extraction>> {
        let tag = self.generation.begin();
        let result = self.router.extract(bytes, content_type, mode, progress).await;

        if !self.generation.is_current(tag) {
            debug!(generation = tag, "discarding result of superseded extraction");
            return None;
        }
        Some(result)
    }
}
