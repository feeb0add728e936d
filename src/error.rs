use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirgrepError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Terminal outcome when the caller's cancel token fires. Distinct from
    /// both completion and failure so callers can tell the three apart.
    #[error("Search cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("An unexpected error occurred: {0}")]
    Other(String),
}

impl DirgrepError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DirgrepError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, DirgrepError>;
