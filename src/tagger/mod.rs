//! Walks a music root and tags every album folder inside it.
//!
//! Processing is strictly sequential: folder by folder, file by file. A bad
//! folder name skips only that folder; a bad file name or a failed write
//! skips only that file. Every outcome is reported as a [`TagEvent`].

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::metadata::{self, TagPreview};
use crate::model::{AlbumInfo, TrackRecord};
use crate::naming;
use crate::scanner;

/// Options for a tagging run
#[derive(Debug, Clone, Default)]
pub struct TagOptions {
    /// Compute and report changes without writing any file
    pub dry_run: bool,
}

/// Progress reported while tagging.
#[derive(Debug)]
pub enum TagEvent {
    /// Tags were written to the file
    Updated(PathBuf),
    /// Dry run: the changes a write would make
    Previewed { path: PathBuf, preview: TagPreview },
    /// All files in an album folder were handled
    AlbumFinished { folder: PathBuf, tracks: usize },
    /// The folder was skipped; none of its files were touched
    AlbumSkipped { folder: PathBuf, error: Error },
    /// A single file was skipped
    TrackSkipped { path: PathBuf, error: Error },
}

/// A folder or file that could not be tagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    pub reason: String,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub root: PathBuf,
    pub dry_run: bool,
    pub albums_processed: usize,
    pub albums_skipped: usize,
    /// Files tagged, or in a dry run, files that would be tagged
    pub tracks_updated: usize,
    pub tracks_skipped: usize,
    pub failures: Vec<Failure>,
    /// RFC 3339 completion time
    pub finished_at: Option<String>,
}

impl RunSummary {
    fn record(&mut self, event: &TagEvent) {
        match event {
            TagEvent::Updated(_) | TagEvent::Previewed { .. } => self.tracks_updated += 1,
            TagEvent::AlbumFinished { .. } => self.albums_processed += 1,
            TagEvent::AlbumSkipped { folder, error } => {
                self.albums_skipped += 1;
                self.failures.push(Failure {
                    path: folder.clone(),
                    reason: error.to_string(),
                });
            }
            TagEvent::TrackSkipped { path, error } => {
                self.tracks_skipped += 1;
                self.failures.push(Failure {
                    path: path.clone(),
                    reason: error.to_string(),
                });
            }
        }
    }

    /// Number of folders and files that failed.
    pub fn error_count(&self) -> usize {
        self.failures.len()
    }
}

/// Drives a tagging run, sending each [`TagEvent`] to `reporter`.
pub struct Tagger<R> {
    options: TagOptions,
    reporter: R,
    summary: RunSummary,
}

impl<R: FnMut(TagEvent)> Tagger<R> {
    pub fn new(options: TagOptions, reporter: R) -> Self {
        let summary = RunSummary {
            dry_run: options.dry_run,
            ..Default::default()
        };
        Self {
            options,
            reporter,
            summary,
        }
    }

    fn emit(&mut self, event: TagEvent) {
        self.summary.record(&event);
        (self.reporter)(event);
    }

    /// Tags every album folder directly under `root`, in file-name order.
    ///
    /// Fails only if `root` is not a directory or cannot be listed.
    pub fn run(mut self, root: &Path) -> Result<RunSummary> {
        if !root.is_dir() {
            return Err(Error::invalid_root(root));
        }
        self.summary.root = root.to_path_buf();

        let albums = scanner::album_dirs(root)?;
        info!(root = %root.display(), albums = albums.len(), "Starting run");

        for folder in &albums {
            self.process_album(folder);
        }

        self.summary.finished_at = Some(chrono::Utc::now().to_rfc3339());
        Ok(self.summary)
    }

    /// Tags one album folder, reporting a skip if its name or listing fails.
    pub fn process_album(&mut self, folder: &Path) {
        match self.tag_album(folder) {
            Ok(tracks) => {
                info!(folder = %folder.display(), tracks, "Finished album");
                self.emit(TagEvent::AlbumFinished {
                    folder: folder.to_path_buf(),
                    tracks,
                });
            }
            Err(error) => {
                warn!(folder = %folder.display(), %error, "Skipping album");
                self.emit(TagEvent::AlbumSkipped {
                    folder: folder.to_path_buf(),
                    error,
                });
            }
        }
    }

    /// Folder-level work; an `Err` here means no file in the folder was touched.
    fn tag_album(&mut self, folder: &Path) -> Result<usize> {
        let album = naming::derive_album(naming::name_of(folder)?)?;
        debug!(?album, "Derived album");

        let entries = scanner::audio_files(folder)?;
        let tracks = entries.len();
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(scanner::Unreadable { path, error }) => {
                    warn!(path = %path.display(), %error, "Skipping unreadable track");
                    self.emit(TagEvent::TrackSkipped { path, error });
                    continue;
                }
            };
            match naming::name_of(&path) {
                Ok(file_name) => self.process_track(folder, file_name, &album),
                Err(e) => self.emit(TagEvent::TrackSkipped {
                    path: path.clone(),
                    error: e.into(),
                }),
            }
        }
        Ok(tracks)
    }

    /// Tags one file, reporting a skip if its name or the write fails.
    pub fn process_track(&mut self, folder: &Path, file_name: &str, album: &AlbumInfo) {
        let path = folder.join(file_name);
        let event = match self.tag_track(&path, file_name, album) {
            Ok(Some(preview)) => TagEvent::Previewed { path, preview },
            Ok(None) => TagEvent::Updated(path),
            Err(error) => {
                warn!(path = %path.display(), %error, "Skipping track");
                TagEvent::TrackSkipped { path, error }
            }
        };
        self.emit(event);
    }

    /// File-level work. Returns the preview in dry-run mode.
    fn tag_track(
        &self,
        path: &Path,
        file_name: &str,
        album: &AlbumInfo,
    ) -> Result<Option<TagPreview>> {
        let track = naming::derive_track(file_name)?;
        let record = TrackRecord::from_album(album).with_track(track);
        debug!(path = %path.display(), ?record, "Derived record");

        if self.options.dry_run {
            return metadata::preview(path, &record).map(Some);
        }
        metadata::apply_tags(path, &record)?;
        Ok(None)
    }
}

/// Convenience wrapper: runs a [`Tagger`] over `root`.
pub fn run(root: &Path, options: TagOptions, reporter: impl FnMut(TagEvent)) -> Result<RunSummary> {
    Tagger::new(options, reporter).run(root)
}
