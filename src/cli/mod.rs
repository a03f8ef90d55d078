//! Command-line interface for folder-tagger.
//!
//! Parses the root folder argument and renders tagging progress to the
//! terminal.

mod commands;

pub use commands::{Cli, OutputFormat, run_command};
