//! CLI argument definitions and dispatch.
//!
//! There is a single command: tag every album folder under a root path.
//! The rendering of progress lives in `tag`.

mod tag;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub use tag::cmd_tag;

/// Folder layout this tool expects, shown in `--help` and when no root is given.
pub const LAYOUT_DOC: &str = "\
Iterate over music folders and tag mp3s by extracting the details from
the structure of the folder and the files.
Note: the structure has to be very specific. E.g.
    Music Band - Album Name (year)/
        01 - First Song.mp3
        02 - Second Song.mp3
        ...
    Another Band - Different Albums/    # 2 cds
        01 - 01 - Song One.mp3          # Track number will appear as 0101
        01 - 02 - Song Two.mp3
        ...
        02 - 01 - Song One, Second CD.mp3
        02 - 02 - Song Two, Second CD.mp3
        ...
Existing tags in every processed file are replaced.";

/// Output format for the run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per file and folder, then a summary line
    #[default]
    Text,
    /// Errors on stderr, the summary as JSON on stdout
    Json,
}

/// Tag mp3 files from "Artist - Album (Year)/NN - Title.mp3" folder names
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = LAYOUT_DOC)]
pub struct Cli {
    /// Root folder holding the album folders
    pub root: Option<PathBuf>,

    /// Show what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Summary output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Usage text printed when no root folder is given.
pub fn usage() -> String {
    let name = env!("CARGO_PKG_NAME");
    format!("{name}\n{LAYOUT_DOC}\n\nUsage:\n\t{name} /path/to/target/folder")
}

/// Run the command described by `cli`.
///
/// Without a root folder this prints usage and returns. An invalid root is
/// reported and exits with status 1 before any file is touched.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.root {
        Some(root) => cmd_tag(root, cli.dry_run, cli.format),
        None => {
            println!("{}", usage());
            Ok(())
        }
    }
}
