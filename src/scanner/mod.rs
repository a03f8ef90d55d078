//! Filesystem enumeration for album folders and their track files.
//!
//! Only one level is ever listed: album folders directly under the root,
//! then `.mp3` files directly inside each album folder. Listings are sorted
//! by file name so runs are deterministic.

use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::naming::AUDIO_EXTENSION;

/// A listed entry that could not be read, such as a dangling symlink.
#[derive(Debug)]
pub struct Unreadable {
    pub path: PathBuf,
    pub error: Error,
}

/// One listed child: its path, or why it could not be read.
pub type Entry = std::result::Result<PathBuf, Unreadable>;

/// Lists the immediate children of `dir` that satisfy `keep`.
///
/// Failing to read `dir` itself is an error. An unreadable child is returned
/// as [`Unreadable`] when `report` accepts its path, otherwise logged and
/// skipped.
fn list_children(
    dir: &Path,
    keep: impl Fn(&DirEntry) -> bool,
    report: impl Fn(&Path) -> bool,
) -> Result<Vec<Entry>> {
    let mut found = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) => {
                if keep(&entry) {
                    found.push(Ok(entry.into_path()));
                }
            }
            Err(e) if e.depth() > 0 => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                if !report(&path) {
                    warn!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
                // The inner io::Error carries no path; the entry already does.
                let message = e.to_string();
                let error = e.into_io_error().unwrap_or_else(|| io::Error::other(message));
                found.push(Err(Unreadable {
                    path,
                    error: Error::Io(error),
                }));
            }
            Err(e) => {
                return Err(Error::Io(e.into()).context(format!("Failed to list {}", dir.display())));
            }
        }
    }
    Ok(found)
}

fn has_audio_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(AUDIO_EXTENSION))
}

fn is_audio_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && has_audio_extension(entry.path())
}

/// Album folders directly under `root`. Plain files are ignored, and so are
/// entries that cannot be read, since nothing shows they were folders.
pub fn album_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = list_children(root, |entry| entry.file_type().is_dir(), |_| false)?;
    Ok(entries.into_iter().filter_map(|entry| entry.ok()).collect())
}

/// `.mp3` files directly inside `folder` (extension compared case-insensitively).
///
/// An `.mp3` entry that cannot be read is returned as [`Unreadable`] in its
/// sorted position.
pub fn audio_files(folder: &Path) -> Result<Vec<Entry>> {
    list_children(folder, is_audio_file, has_audio_extension)
}
