//! Metadata inference from the library naming convention.
//!
//! Album folders are named `"Artist - Album"` with an optional trailing
//! `" (YYYY)"`. Track files are named `"NN - Title.mp3"`, or
//! `"DD - NN - Title.mp3"` for multi-disc releases:
//!
//! ```text
//! Music Band - Album Name (1999)/
//!     01 - First Song.mp3
//!     02 - Second Song.mp3
//! Another Band - Box Set/
//!     01 - 01 - Song One.mp3          # track number 0101
//!     02 - 01 - Song One, CD 2.mp3    # track number 0201
//! ```
//!
//! Everything here is pure string handling; no filesystem access.

use std::path::Path;

use crate::model::{AlbumInfo, TrackInfo};

/// Separator between artist and album, and between number prefixes and title.
pub const SEPARATOR: &str = " - ";

/// Extension of the files this tool tags.
pub const AUDIO_EXTENSION: &str = "mp3";

/// A folder or file name that does not follow the naming convention.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{name:?} contains no \" - \" separator")]
    MissingSeparator { name: String },

    #[error("{name:?} contains more than one \" - \" separator")]
    TooManySeparators { name: String },

    #[error("{name:?} is not valid UTF-8")]
    NotUnicode { name: String },
}

/// The two file-name layouts the convention allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileNameShape<'a> {
    /// `"NN - Title"`: everything before the first separator is the track number
    SingleDisc { track: &'a str },
    /// `"DD - NN - ..."`: two two-digit prefixes
    MultiDisc { disc: &'a str, track: &'a str },
}

impl<'a> FileNameShape<'a> {
    /// Classifies a file name. The multi-disc layout is checked first.
    pub fn classify(name: &'a str) -> Result<Self, ParseError> {
        if let Some((disc, track)) = multi_disc_prefix(name) {
            return Ok(FileNameShape::MultiDisc { disc, track });
        }
        match name.split_once(SEPARATOR) {
            Some((track, _)) => Ok(FileNameShape::SingleDisc { track }),
            None => Err(ParseError::MissingSeparator {
                name: name.to_string(),
            }),
        }
    }

    /// Track number as written to the tag; disc and track are joined with no separator.
    pub fn track_number(&self) -> String {
        match self {
            FileNameShape::SingleDisc { track } => (*track).to_string(),
            FileNameShape::MultiDisc { disc, track } => format!("{disc}{track}"),
        }
    }
}

/// Matches `\d{2} - \d{2} - ` at the start of `name`.
fn multi_disc_prefix(name: &str) -> Option<(&str, &str)> {
    let bytes = name.as_bytes();
    let sep = SEPARATOR.as_bytes();
    if bytes.len() < 10 {
        return None;
    }
    let two_digits = |at: usize| bytes[at].is_ascii_digit() && bytes[at + 1].is_ascii_digit();
    if two_digits(0) && &bytes[2..5] == sep && two_digits(5) && &bytes[7..10] == sep {
        // All checked bytes are ASCII, so these are char boundaries.
        Some((&name[0..2], &name[5..7]))
    } else {
        None
    }
}

/// Splits a trailing `" (YYYY)"` off an album name.
fn split_year(album: &str) -> (&str, Option<&str>) {
    let bytes = album.as_bytes();
    let n = bytes.len();
    if n >= 7
        && bytes[n - 7] == b' '
        && bytes[n - 6] == b'('
        && bytes[n - 5..n - 1].iter().all(u8::is_ascii_digit)
        && bytes[n - 1] == b')'
    {
        (&album[..n - 7], Some(&album[n - 5..n - 1]))
    } else {
        (album, None)
    }
}

/// Strips a trailing `.mp3` (any case).
fn strip_audio_extension(name: &str) -> &str {
    let suffix_len = AUDIO_EXTENSION.len() + 1;
    if name.len() > suffix_len && name.is_char_boundary(name.len() - suffix_len) {
        let (stem, ext) = name.split_at(name.len() - suffix_len);
        if ext.starts_with('.') && ext[1..].eq_ignore_ascii_case(AUDIO_EXTENSION) {
            return stem;
        }
    }
    name
}

/// Returns the final component of `path` as UTF-8.
pub fn name_of(path: &Path) -> Result<&str, ParseError> {
    let name = path.file_name().unwrap_or(path.as_os_str());
    name.to_str().ok_or_else(|| ParseError::NotUnicode {
        name: name.to_string_lossy().into_owned(),
    })
}

/// Derives artist, album and optional year from an album folder name.
///
/// The name must contain exactly one `" - "`.
pub fn derive_album(folder_name: &str) -> Result<AlbumInfo, ParseError> {
    let parts: Vec<&str> = folder_name.split(SEPARATOR).collect();
    let (artist, album) = match parts.as_slice() {
        [artist, album] => (*artist, *album),
        [_] => {
            return Err(ParseError::MissingSeparator {
                name: folder_name.to_string(),
            });
        }
        _ => {
            return Err(ParseError::TooManySeparators {
                name: folder_name.to_string(),
            });
        }
    };

    let (album, year) = split_year(album);
    Ok(AlbumInfo {
        artist: artist.to_string(),
        album: album.to_string(),
        year: year.map(str::to_string),
    })
}

/// Derives track number and title from a track file name.
///
/// The title always starts after the *first* separator, for both shapes.
/// For `"02 - 01 - Track A.mp3"` that yields track number `"0201"` and
/// title `"01 - Track A"`.
pub fn derive_track(file_name: &str) -> Result<TrackInfo, ParseError> {
    let stem = strip_audio_extension(file_name);
    let shape = FileNameShape::classify(stem).map_err(|_| ParseError::MissingSeparator {
        name: file_name.to_string(),
    })?;
    let title = stem
        .split_once(SEPARATOR)
        .map(|(_, title)| title)
        .unwrap_or_default();

    Ok(TrackInfo {
        track_number: shape.track_number(),
        title: title.to_string(),
    })
}
