//! Whole-file loading for single-file preview.
//!
//! Shares the encoding sniffing and line splitting of the search pipeline
//! but keeps every line, reporting the running line count as it goes.

use crate::encoding;
use crate::error::{DirgrepError, Result};
use crate::progress::CancelToken;
use std::path::Path;

/// Lines between status callbacks while loading.
pub const LINE_PROGRESS_INTERVAL: usize = 200;

/// Decode `path` in full and return its lines together with the total count.
///
/// Fails with [`DirgrepError::FileNotFound`] before any read when the path
/// does not exist. The cancel token is checked once per line, same as the
/// search scanner; `on_progress` receives the running line count every
/// [`LINE_PROGRESS_INTERVAL`] lines.
pub fn load_file_lines(
    path: &Path,
    cancel: &CancelToken,
    on_progress: &mut dyn FnMut(usize),
) -> Result<(Vec<String>, usize)> {
    if !path.exists() {
        return Err(DirgrepError::FileNotFound(path.to_path_buf()));
    }
    let mut reader = encoding::open_decoded_reader(path)?;
    let mut lines = Vec::new();
    let mut count = 0usize;
    loop {
        cancel.checkpoint()?;
        let Some(line) = reader.next_line()? else { break };
        lines.push(line);
        count += 1;
        if count % LINE_PROGRESS_INTERVAL == 0 {
            on_progress(count);
        }
    }
    Ok((lines, count))
}
