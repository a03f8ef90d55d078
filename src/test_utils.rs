//! Test utilities and fixtures for folder-tagger tests.
//!
//! Provides synthetic MP3 files that lofty can parse and tag, plus helpers
//! for laying out album folders on disk.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{album_tree, write_silent_mp3};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let album = album_tree(dir.path(), "Pink Moon - Harvest (1972)", &["01 - Second Song.mp3"]);
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::model::TrackRecord;

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, no padding, joint stereo.
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

/// 144 * 128000 / 44100, rounded down.
const FRAME_LEN: usize = 417;

const FRAME_COUNT: usize = 8;

/// Writes a short run of silent MPEG frames with no tags.
pub fn write_silent_mp3(path: &Path) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    let mut frame = vec![0u8; FRAME_LEN];
    frame[..4].copy_from_slice(&FRAME_HEADER);
    for _ in 0..FRAME_COUNT {
        file.write_all(&frame)?;
    }
    Ok(())
}

/// Creates `root/folder` and a silent MP3 for every name in `files`.
///
/// Returns the album folder path.
pub fn album_tree(root: &Path, folder: &str, files: &[&str]) -> PathBuf {
    let album = root.join(folder);
    fs::create_dir_all(&album).expect("Failed to create album folder");
    for name in files {
        write_silent_mp3(&album.join(name)).expect("Failed to write mp3 fixture");
    }
    album
}

/// The record for `"Pink Moon - Harvest (1972)/01 - Second Song.mp3"`.
pub fn harvest_record() -> TrackRecord {
    TrackRecord {
        artist: Some("Pink Moon".to_string()),
        album: Some("Harvest".to_string()),
        year: Some("1972".to_string()),
        title: Some("Second Song".to_string()),
        track_number: Some("01".to_string()),
        track_total: Some("01".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_mp3_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silence.mp3");
        write_silent_mp3(&path).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), (FRAME_LEN * FRAME_COUNT) as u64);
    }

    #[test]
    fn test_album_tree_layout() {
        let dir = tempfile::tempdir().unwrap();
        let album = album_tree(dir.path(), "A - B", &["01 - One.mp3", "02 - Two.mp3"]);
        assert!(album.is_dir());
        assert!(album.join("01 - One.mp3").is_file());
        assert!(album.join("02 - Two.mp3").is_file());
    }

    #[test]
    fn test_harvest_record_track_total_matches_number() {
        let record = harvest_record();
        assert_eq!(record.track_total, record.track_number);
    }
}
