use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(long, value_parser, default_value_t = false)]
    pub verbose: bool,

    /// Write the log to a file instead of stderr.
    #[clap(long, value_parser)]
    pub log: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search files under one or more root directories.
    Search {
        /// Query text; space-separated terms match any term unless --regex.
        query: String,

        /// Root directories to walk.
        #[clap(value_parser, default_value = ".")]
        roots: Vec<PathBuf>,

        /// Only scan files with one of these extensions; "*" means files
        /// without any extension.
        #[clap(short, long, value_parser, use_value_delimiter = true)]
        extensions: Option<Vec<String>>,

        /// Treat the query as a regular expression instead of literal text.
        #[clap(long, value_parser, default_value_t = false)]
        regex: bool,

        /// Match case-sensitively (the default is case-insensitive).
        #[clap(short = 's', long, value_parser, default_value_t = false)]
        case_sensitive: bool,

        /// Match case-insensitively even when the config file defaults to
        /// case-sensitive searching.
        #[clap(
            short = 'i',
            long,
            value_parser,
            default_value_t = false,
            conflicts_with = "case_sensitive"
        )]
        ignore_case: bool,
    },
    /// Load and print one file in full, with the same encoding sniffing the
    /// search uses.
    View {
        file: PathBuf,

        /// Print 1-based line numbers.
        #[clap(short = 'n', long, value_parser, default_value_t = false)]
        line_numbers: bool,
    },
}
