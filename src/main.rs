//! Folder Tagger - writes mp3 tags inferred from folder and file names.
//!
//! Album folders named `"Artist - Album (Year)"` hold tracks named
//! `"NN - Title.mp3"` (or `"DD - NN - Title.mp3"` for multi-disc sets).
//! Every track is retagged from those names, replacing whatever tags it had.

pub mod cli;
pub mod error;
pub mod metadata;
pub mod model;
pub mod naming;
pub mod scanner;
pub mod tagger;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging; RUST_LOG overrides the default
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folder_tagger=error"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
