//! Breadth-first directory traversal with cooperative cancellation.

use crate::error::Result;
use crate::progress::CancelToken;
use log::debug;
use std::collections::VecDeque;
use std::path::Path;

/// Walk `root` breadth-first, invoking `visit` for every regular file.
///
/// The traversal uses an explicit work queue rather than call-stack
/// recursion, so arbitrarily deep trees cannot overflow the stack. A root
/// that does not exist is skipped silently; directories that cannot be
/// listed (permissions, races) are skipped without aborting the walk.
/// Symlinks are not followed, so link cycles cannot make the queue grow
/// forever. The cancel token is checked before dequeuing each directory and
/// before each child entry, and `visit` may itself fail to unwind the walk.
pub fn walk<F>(root: &Path, cancel: &CancelToken, mut visit: F) -> Result<()>
where
    F: FnMut(&Path) -> Result<()>,
{
    cancel.checkpoint()?;
    if !root.exists() {
        debug!("skipping missing root {}", root.display());
        return Ok(());
    }
    let mut queue = VecDeque::new();
    queue.push_back(root.to_path_buf());
    while let Some(dir) = queue.pop_front() {
        cancel.checkpoint()?;
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("cannot list {}: {e}", dir.display());
                continue;
            }
        };
        for entry in entries {
            cancel.checkpoint()?;
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("bad entry under {}: {e}", dir.display());
                    continue;
                }
            };
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    debug!("cannot stat {}: {e}", entry.path().display());
                    continue;
                }
            };
            let path = entry.path();
            if file_type.is_dir() {
                queue.push_back(path);
            } else if file_type.is_file() {
                visit(&path)?;
            }
        }
    }
    Ok(())
}
