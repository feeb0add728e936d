//! Progress events and cooperative cancellation shared by the search engine
//! and the whole-file loader.

use crate::error::{DirgrepError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One match: a file, a 1-based line number, and the line's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub path: PathBuf,
    pub line_number: usize,
    pub line: String,
}

/// Incremental progress delivered synchronously to the caller. The engine
/// does not continue until the handler returns, so a slow consumer slows the
/// producer instead of overflowing a queue.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Regular files visited so far, monotone non-decreasing across events.
    pub files_processed: usize,
    /// Matches found so far across all files.
    pub matches_found: usize,
    /// Matches discovered since the previous event, at most one batch.
    pub new_matches: Vec<SearchMatch>,
}

/// Shared cancellation flag polled at every traversal and scan checkpoint.
///
/// Cancellation is cooperative: setting the flag does not interrupt the
/// worker, it makes the next checkpoint return [`DirgrepError::Cancelled`],
/// which unwinds the whole pipeline without completing the in-progress file.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Safe to call from any thread, more than once.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Checkpoint: fail with the cancellation outcome once the flag is set.
    pub fn checkpoint(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(DirgrepError::Cancelled)
        } else {
            Ok(())
        }
    }
}
