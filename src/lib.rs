pub mod cli;
pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod filter;
pub mod loader;
pub mod progress;
pub mod query;
pub mod walker;

pub use crate::engine::{Root, SearchEngine, SearchSpec, SearchSummary};
pub use crate::error::{DirgrepError, Result};
pub use crate::filter::ExtensionRule;
pub use crate::loader::load_file_lines;
pub use crate::progress::{CancelToken, ProgressEvent, SearchMatch};
pub use crate::query::build_pattern;
