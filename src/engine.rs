//! Core search pipeline: walk the configured roots, filter and scan each
//! regular file, stream batched progress to the caller, and return a sorted
//! summary.
//!
//! The whole pipeline runs on the calling thread as a single logical worker;
//! concurrency exists only at the boundary with the caller, which may signal
//! cancellation through the engine's [`CancelToken`] from another thread.

use crate::encoding;
use crate::error::{DirgrepError, Result};
use crate::filter::{self, ExtensionRule};
use crate::progress::{CancelToken, ProgressEvent, SearchMatch};
use crate::walker;
use log::debug;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Matches accumulated per file before being flushed as one progress event.
pub const MATCH_BATCH_SIZE: usize = 10;

/// Every Nth zero-match file emits an empty progress event so the caller
/// sees movement during long silent stretches without being flooded.
pub const SILENT_FILE_INTERVAL: usize = 10;

/// A search root directory with an enabled flag; disabled roots are never
/// visited.
#[derive(Debug, Clone)]
pub struct Root {
    pub path: PathBuf,
    pub enabled: bool,
}

impl Root {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            enabled: true,
        }
    }
}

/// Everything one search invocation needs. Immutable once the search starts;
/// the pattern arrives pre-compiled (see [`crate::query`] for the caller-side
/// literal translation).
#[derive(Debug, Clone)]
pub struct SearchSpec {
    pub query: String,
    pub pattern: Regex,
    pub roots: Vec<Root>,
    pub extensions: Vec<ExtensionRule>,
}

/// Terminal result of a completed search. `results` is sorted by file path,
/// then line number, regardless of discovery order.
#[derive(Debug, Clone)]
pub struct SearchSummary {
    pub query: String,
    pub files_processed: usize,
    pub matches_found: usize,
    pub results: Vec<SearchMatch>,
}

/// Search engine handle owning the cancellation token for its invocations.
pub struct SearchEngine {
    cancel: CancelToken,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(CancelToken::new())
    }
}

impl SearchEngine {
    pub fn new(cancel: CancelToken) -> Self {
        Self { cancel }
    }

    /// Token the caller can clone to signal cancellation from another thread.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Run one search to a terminal outcome.
    ///
    /// `on_progress` is invoked synchronously; the engine produces no further
    /// events until it returns. Exactly three outcomes are possible:
    /// `Ok(summary)`, `Err(Cancelled)`, or `Err(_)` for unexpected failures.
    /// Per-file and per-directory I/O problems are recovered internally and
    /// never surface as a failed search.
    pub fn search(
        &self,
        spec: &SearchSpec,
        on_progress: &mut dyn FnMut(ProgressEvent),
    ) -> Result<SearchSummary> {
        let mut run = SearchRun {
            spec,
            cancel: &self.cancel,
            files_processed: 0,
            matches_found: 0,
            results: Vec::new(),
            on_progress,
        };
        for root in spec.roots.iter().filter(|r| r.enabled) {
            self.cancel.checkpoint()?;
            walker::walk(&root.path, &self.cancel, |file| run.process_file(file))?;
        }
        // A cancel that lands after the last file's last line must still win
        // over completion.
        self.cancel.checkpoint()?;
        let mut results = run.results;
        results.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then(a.line_number.cmp(&b.line_number))
        });
        Ok(SearchSummary {
            query: spec.query.clone(),
            files_processed: run.files_processed,
            matches_found: run.matches_found,
            results,
        })
    }
}

/// Mutable state of one search invocation. Owned exclusively by the worker;
/// a fresh one is built per call, never reused.
struct SearchRun<'a> {
    spec: &'a SearchSpec,
    cancel: &'a CancelToken,
    files_processed: usize,
    matches_found: usize,
    results: Vec<SearchMatch>,
    on_progress: &'a mut dyn FnMut(ProgressEvent),
}

impl SearchRun<'_> {
    /// Count, filter, and scan one regular file. Every regular file counts
    /// toward `files_processed`, whether or not the filter admits it.
    fn process_file(&mut self, path: &Path) -> Result<()> {
        self.files_processed += 1;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if !filter::is_included(name, &self.spec.extensions) {
            self.keepalive();
            return Ok(());
        }
        match self.scan_file(path) {
            Err(DirgrepError::Io(e)) => {
                // File vanished, unreadable, or undecodable: abandon it and
                // move on. The reader is dropped, releasing the handle.
                debug!("skipping {}: {e}", path.display());
                Ok(())
            }
            other => other,
        }
    }

    /// Scan one file line by line, flushing match batches as progress events.
    fn scan_file(&mut self, path: &Path) -> Result<()> {
        let mut reader = encoding::open_decoded_reader(path)?;
        let mut line_number = 0usize;
        let mut batch: Vec<SearchMatch> = Vec::new();
        let mut found_in_file = false;
        loop {
            self.cancel.checkpoint()?;
            let Some(line) = reader.next_line()? else { break };
            line_number += 1;
            if self.spec.pattern.is_match(&line) {
                found_in_file = true;
                self.matches_found += 1;
                let record = SearchMatch {
                    path: path.to_path_buf(),
                    line_number,
                    line,
                };
                self.results.push(record.clone());
                batch.push(record);
                if batch.len() >= MATCH_BATCH_SIZE {
                    let flushed = std::mem::take(&mut batch);
                    self.emit(flushed);
                }
            }
        }
        if !batch.is_empty() {
            self.emit(batch);
        } else if !found_in_file {
            self.keepalive();
        }
        Ok(())
    }

    /// Empty progress event on every [`SILENT_FILE_INTERVAL`]th file, to keep
    /// the caller's display alive through long runs without matches.
    fn keepalive(&mut self) {
        if self.files_processed % SILENT_FILE_INTERVAL == 0 {
            self.emit(Vec::new());
        }
    }

    fn emit(&mut self, new_matches: Vec<SearchMatch>) {
        (self.on_progress)(ProgressEvent {
            files_processed: self.files_processed,
            matches_found: self.matches_found,
            new_matches,
        });
    }
}
