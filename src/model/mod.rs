//! Core data models for folder-derived tagging.
//!
//! Defines the record that is written into each file: [`TrackRecord`],
//! assembled from the album-level [`AlbumInfo`] (one per folder) and the
//! track-level [`TrackInfo`] (one per file).
//!
//! # Tag Mapping
//!
//! Each [`TagField`] maps to exactly one ID3v2 frame:
//! - `TIT2` - title
//! - `TALB` - album
//! - `TPE1` - artist
//! - `TRCK` - track number (raw text, e.g. `"0102"`)
//! - `TDRC` - recording year
//! - `TXXX:TRACKTOTAL` - the track number again, as user text

use std::fmt;

/// Description of the user-defined text frame that repeats the track number.
pub const TRACK_TOTAL_DESCRIPTION: &str = "TRACKTOTAL";

/// Album-level fields derived from an album folder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumInfo {
    pub artist: String,
    pub album: String,
    /// Four-digit year, only when the folder name ends in `" (YYYY)"`
    pub year: Option<String>,
}

/// Track-level fields derived from a file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackInfo {
    /// `"NN"` for single-disc names, disc and track concatenated for multi-disc names
    pub track_number: String,
    pub title: String,
}

/// One tag field this tool knows how to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    Title,
    Album,
    Artist,
    TrackNumber,
    Year,
    TrackTotal,
}

/// Where a [`TagField`] lives inside an ID3v2 tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSlot {
    /// A standard text information frame (`T???`)
    Text(&'static str),
    /// A `TXXX` frame with the given description
    UserText(&'static str),
}

impl TagField {
    /// All fields, in write order.
    pub const ALL: [TagField; 6] = [
        TagField::Title,
        TagField::Album,
        TagField::Artist,
        TagField::TrackNumber,
        TagField::Year,
        TagField::TrackTotal,
    ];

    pub fn slot(self) -> FrameSlot {
        match self {
            TagField::Title => FrameSlot::Text("TIT2"),
            TagField::Album => FrameSlot::Text("TALB"),
            TagField::Artist => FrameSlot::Text("TPE1"),
            TagField::TrackNumber => FrameSlot::Text("TRCK"),
            TagField::Year => FrameSlot::Text("TDRC"),
            TagField::TrackTotal => FrameSlot::UserText(TRACK_TOTAL_DESCRIPTION),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TagField::Title => "title",
            TagField::Album => "album",
            TagField::Artist => "artist",
            TagField::TrackNumber => "track_number",
            TagField::Year => "year",
            TagField::TrackTotal => "track_total",
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The full set of tags written to one file.
///
/// Built fresh for every file: album fields are copied in with
/// [`TrackRecord::from_album`], track fields added with
/// [`TrackRecord::with_track`]. Fields that could not be derived stay `None`
/// and are never written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRecord {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub title: Option<String>,
    pub track_number: Option<String>,
    pub track_total: Option<String>,
}

impl TrackRecord {
    pub fn from_album(album: &AlbumInfo) -> Self {
        Self {
            artist: Some(album.artist.clone()),
            album: Some(album.album.clone()),
            year: album.year.clone(),
            ..Default::default()
        }
    }

    /// Adds track fields. The track number is also stored as the track total.
    pub fn with_track(mut self, track: TrackInfo) -> Self {
        self.track_total = Some(track.track_number.clone());
        self.track_number = Some(track.track_number);
        self.title = Some(track.title);
        self
    }

    pub fn get(&self, field: TagField) -> Option<&str> {
        match field {
            TagField::Title => self.title.as_deref(),
            TagField::Album => self.album.as_deref(),
            TagField::Artist => self.artist.as_deref(),
            TagField::TrackNumber => self.track_number.as_deref(),
            TagField::Year => self.year.as_deref(),
            TagField::TrackTotal => self.track_total.as_deref(),
        }
    }

    pub fn set(&mut self, field: TagField, value: Option<String>) {
        let slot = match field {
            TagField::Title => &mut self.title,
            TagField::Album => &mut self.album,
            TagField::Artist => &mut self.artist,
            TagField::TrackNumber => &mut self.track_number,
            TagField::Year => &mut self.year,
            TagField::TrackTotal => &mut self.track_total,
        };
        *slot = value;
    }

    /// Present fields, in write order.
    pub fn fields(&self) -> impl Iterator<Item = (TagField, &str)> + '_ {
        TagField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }
}
