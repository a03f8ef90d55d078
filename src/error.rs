//! Application-wide error types.
//!
//! Library modules return [`Result`] with the [`Error`] enum below, while
//! the CLI entry point uses `anyhow` for convenient error propagation.
//!
//! # Granularity
//!
//! - [`Error::InvalidRootPath`] stops the whole run before any file is touched
//! - [`Error::Parse`] on a folder name skips that folder
//! - [`Error::Parse`] on a file name, or [`Error::TagWrite`], skips that file
//!
//! # Example
//!
//! ```ignore
//! use folder_tagger::error::{Error, Result};
//!
//! fn tag_one(path: &Path, record: &TrackRecord) -> Result<()> {
//!     let name = naming::name_of(path)?;     // Parse errors auto-convert
//!     metadata::apply_tags(path, record)?;   // already Error::TagWrite
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use crate::naming::ParseError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Root folder is missing or not a directory
    #[error("{} isn't a valid folder to start with", .0.display())]
    InvalidRootPath(PathBuf),

    /// Folder or file name does not follow the naming convention
    #[error("Naming error: {0}")]
    Parse(#[from] ParseError),

    /// Tag container could not be read, cleared or saved
    #[error("Tag error for {path}: {message}")]
    TagWrite { path: PathBuf, message: String },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a tag write error.
    pub fn tag_write(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::TagWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid root error.
    pub fn invalid_root(path: impl Into<PathBuf>) -> Self {
        Self::InvalidRootPath(path.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_root_display() {
        let err = Error::invalid_root("/no/such/folder");
        assert_eq!(
            err.to_string(),
            "/no/such/folder isn't a valid folder to start with"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let err: Error = ParseError::MissingSeparator {
            name: "Loose Folder".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("Loose Folder"));
    }

    #[test]
    fn test_tag_write_error() {
        let err = Error::tag_write("/music/song.mp3", "permission denied");
        let msg = err.to_string();
        assert!(msg.contains("song.mp3"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::Io(std::io::Error::other("disk on fire")).context("Failed to list /music");
        let msg = err.to_string();
        assert!(msg.contains("Failed to list /music"));
        assert!(msg.contains("disk on fire"));
    }
}
