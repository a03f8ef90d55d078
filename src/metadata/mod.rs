//! Audio file tag reading and writing.
//!
//! Uses the lofty crate to manage the ID3v2 tag of MP3 files.
//!
//! # Features
//! - Replace every tag in a file with a freshly built ID3v2.4 tag
//! - Read back the fields this tool manages
//! - Preview the changes a write would make

use lofty::TextEncoding;
use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::AudioFile;
use lofty::id3::v2::{Frame, FrameId, Id3v2Tag, TextInformationFrame};
use lofty::mpeg::MpegFile;
use lofty::tag::{Accessor, TagExt, TagType};
use std::borrow::Cow;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{FrameSlot, TagField, TrackRecord};

/// Tag containers lofty can find in an MP3 file.
const MPEG_TAG_TYPES: [TagType; 3] = [TagType::Id3v2, TagType::Id3v1, TagType::Ape];

fn open_mpeg(path: &Path) -> Result<MpegFile> {
    let mut file = File::open(path).map_err(|e| Error::tag_write(path, e.to_string()))?;
    MpegFile::read_from(&mut file, ParseOptions::new().read_properties(false))
        .map_err(|e| Error::tag_write(path, format!("Failed to read tags: {e}")))
}

fn frame_id(id: &'static str) -> FrameId<'static> {
    FrameId::Valid(Cow::Borrowed(id))
}

/// Builds an ID3v2 tag holding exactly the present fields of `record`.
fn build_tag(record: &TrackRecord) -> Id3v2Tag {
    let mut tag = Id3v2Tag::new();
    for (field, value) in record.fields() {
        match field.slot() {
            FrameSlot::Text(id) => {
                tag.insert(Frame::Text(TextInformationFrame::new(
                    frame_id(id),
                    TextEncoding::UTF8,
                    value.to_string(),
                )));
            }
            FrameSlot::UserText(description) => {
                tag.insert_user_text(description.to_string(), value.to_string());
            }
        }
    }
    tag
}

/// Remove every existing tag from the file and write `record` as a new ID3v2 tag.
///
/// A file with no tag yet is not an error; it simply gets its first one.
/// Frames this tool does not manage are dropped along with the rest.
pub fn apply_tags(path: &Path, record: &TrackRecord) -> Result<()> {
    let existing = open_mpeg(path)?;

    for tag_type in MPEG_TAG_TYPES {
        if existing.contains_tag_type(tag_type) {
            debug!(path = %path.display(), ?tag_type, "Removing existing tag");
            tag_type
                .remove_from_path(path)
                .map_err(|e| Error::tag_write(path, format!("Failed to remove {tag_type:?} tag: {e}")))?;
        }
    }

    build_tag(record)
        .save_to_path(path, WriteOptions::default())
        .map_err(|e| Error::tag_write(path, format!("Failed to write tags to file: {e}")))
}

/// Tags currently in a file, as far as this tool understands them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingTags {
    /// Managed fields found in the ID3v2 tag
    pub record: TrackRecord,
    /// ID3v2 frames outside the managed set
    pub other_frames: usize,
    /// Tag containers other than ID3v2 (ID3v1, APE)
    pub other_containers: Vec<TagType>,
}

fn read_field(tag: &Id3v2Tag, field: TagField) -> Option<String> {
    match field {
        TagField::Title => tag.title().map(|s| s.into_owned()),
        TagField::Album => tag.album().map(|s| s.into_owned()),
        TagField::Artist => tag.artist().map(|s| s.into_owned()),
        // TDRC is parsed as a timestamp, so go through the year accessor
        TagField::Year => tag.year().map(|y| format!("{y:04}")),
        TagField::TrackNumber | TagField::TrackTotal => match field.slot() {
            FrameSlot::Text(id) => tag.get_text(&frame_id(id)).map(str::to_string),
            FrameSlot::UserText(description) => {
                tag.get_user_text(description).map(str::to_string)
            }
        },
    }
}

/// Read the tags currently stored in a file.
pub fn read_tags(path: &Path) -> Result<ExistingTags> {
    let file = open_mpeg(path)?;

    let mut existing = ExistingTags::default();
    if let Some(tag) = file.id3v2() {
        for field in TagField::ALL {
            existing.record.set(field, read_field(tag, field));
        }
        let managed = existing.record.fields().count();
        existing.other_frames = tag.len().saturating_sub(managed);
    }
    existing.other_containers = MPEG_TAG_TYPES
        .into_iter()
        .filter(|t| *t != TagType::Id3v2 && file.contains_tag_type(*t))
        .collect();

    Ok(existing)
}

/// A single field change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: TagField,
    pub current_value: Option<String>,
    /// `None` when the field will be removed
    pub new_value: Option<String>,
}

/// A preview of changes that would be made
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPreview {
    pub changes: Vec<FieldChange>,
    /// Unmanaged ID3v2 frames that would be dropped
    pub dropped_frames: usize,
    /// Non-ID3v2 containers that would be removed
    pub dropped_containers: Vec<TagType>,
}

impl TagPreview {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.dropped_frames == 0 && self.dropped_containers.is_empty()
    }
}

/// Preview what [`apply_tags`] would change without writing anything.
pub fn preview(path: &Path, record: &TrackRecord) -> Result<TagPreview> {
    let existing = read_tags(path)?;

    let changes = TagField::ALL
        .into_iter()
        .filter_map(|field| {
            let current = existing.record.get(field);
            let new = record.get(field);
            (current != new).then(|| FieldChange {
                field,
                current_value: current.map(str::to_string),
                new_value: new.map(str::to_string),
            })
        })
        .collect();

    Ok(TagPreview {
        changes,
        dropped_frames: existing.other_frames,
        dropped_containers: existing.other_containers,
    })
}
