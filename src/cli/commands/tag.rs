//! Tagging command and terminal rendering.

use anyhow::Context;
use std::path::Path;

use super::OutputFormat;
use crate::error::Error;
use crate::metadata::TagPreview;
use crate::tagger::{self, RunSummary, TagEvent, TagOptions};

/// A rendered line and the stream it belongs on.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Out(String),
    Err(String),
}

fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn render_preview(path: &Path, preview: &TagPreview) -> String {
    let mut out = format!("Would update {}:", path.display());
    if preview.is_empty() {
        out.push_str("\n  (no changes)");
    }
    for change in &preview.changes {
        let current = change.current_value.as_deref().unwrap_or("(empty)");
        let new = change.new_value.as_deref().unwrap_or("(removed)");
        out.push_str(&format!("\n  {} : {} → {}", change.field, current, new));
    }
    if preview.dropped_frames > 0 {
        out.push_str(&format!(
            "\n  {} other frame(s) removed",
            preview.dropped_frames
        ));
    }
    for container in &preview.dropped_containers {
        out.push_str(&format!("\n  {container:?} tag removed"));
    }
    out
}

/// Why a file was skipped, without repeating the path the line already shows.
fn skip_reason(error: &Error) -> String {
    match error {
        Error::TagWrite { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn render_event(event: &TagEvent) -> Line {
    match event {
        TagEvent::Updated(path) => Line::Out(format!("Updated {}", path.display())),
        TagEvent::Previewed { path, preview } => Line::Out(render_preview(path, preview)),
        TagEvent::AlbumFinished { folder, .. } => {
            Line::Out(format!("Finished parsing {}", folder_name(folder)))
        }
        TagEvent::AlbumSkipped { folder, error } => {
            Line::Err(format!("Error parsing {}: {}", folder.display(), error))
        }
        TagEvent::TrackSkipped { path, error } => {
            Line::Err(format!("Error parsing {}: {}", path.display(), skip_reason(error)))
        }
    }
}

fn render_summary(summary: &RunSummary) -> String {
    let verb = if summary.dry_run { "would be updated" } else { "updated" };
    format!(
        "Completed: {} tracks {}, {} errors",
        summary.tracks_updated,
        verb,
        summary.error_count()
    )
}

/// Tag every album folder under `root`.
pub fn cmd_tag(root: &Path, dry_run: bool, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Text && dry_run {
        println!("[DRY RUN MODE - No files will be modified]\n");
    }

    let reporter = |event: TagEvent| match render_event(&event) {
        Line::Out(line) if format == OutputFormat::Text => println!("{line}"),
        Line::Out(_) => {}
        Line::Err(line) => eprintln!("{line}"),
    };

    let summary = match tagger::run(root, TagOptions { dry_run }, reporter) {
        Ok(summary) => summary,
        Err(e @ Error::InvalidRootPath(_)) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Encountered a problem"),
    };

    match format {
        OutputFormat::Text => println!("\n{}", render_summary(&summary)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FieldChange;
    use crate::model::TagField;
    use crate::naming::ParseError;
    use std::path::PathBuf;

    #[test]
    fn test_render_updated() {
        let line = render_event(&TagEvent::Updated(PathBuf::from("/m/A - B/01 - C.mp3")));
        assert_eq!(line, Line::Out("Updated /m/A - B/01 - C.mp3".to_string()));
    }

    #[test]
    fn test_render_album_finished_uses_folder_name() {
        let line = render_event(&TagEvent::AlbumFinished {
            folder: PathBuf::from("/m/Pink Moon - Harvest (1972)"),
            tracks: 3,
        });
        assert_eq!(
            line,
            Line::Out("Finished parsing Pink Moon - Harvest (1972)".to_string())
        );
    }

    #[test]
    fn test_render_errors_go_to_stderr() {
        let line = render_event(&TagEvent::AlbumSkipped {
            folder: PathBuf::from("/m/Loose"),
            error: ParseError::MissingSeparator {
                name: "Loose".to_string(),
            }
            .into(),
        });
        match line {
            Line::Err(text) => {
                assert!(text.starts_with("Error parsing /m/Loose: "));
                assert!(text.contains("no \" - \" separator"));
            }
            other => panic!("expected stderr line, got {other:?}"),
        }

        let line = render_event(&TagEvent::TrackSkipped {
            path: PathBuf::from("/m/A - B/x.mp3"),
            error: Error::tag_write("/m/A - B/x.mp3", "Permission denied"),
        });
        assert_eq!(
            line,
            Line::Err("Error parsing /m/A - B/x.mp3: Permission denied".to_string())
        );

        let line = render_event(&TagEvent::TrackSkipped {
            path: PathBuf::from("/m/A - B/Untitled.mp3"),
            error: ParseError::MissingSeparator {
                name: "Untitled.mp3".to_string(),
            }
            .into(),
        });
        assert!(matches!(
            line,
            Line::Err(text) if text.starts_with("Error parsing /m/A - B/Untitled.mp3: ")
        ));
    }

    #[test]
    fn test_render_preview() {
        let preview = TagPreview {
            changes: vec![
                FieldChange {
                    field: TagField::Title,
                    current_value: None,
                    new_value: Some("Second Song".to_string()),
                },
                FieldChange {
                    field: TagField::Year,
                    current_value: Some("1971".to_string()),
                    new_value: None,
                },
            ],
            dropped_frames: 2,
            dropped_containers: vec![],
        };
        let text = render_preview(Path::new("/m/song.mp3"), &preview);
        assert_eq!(
            text,
            "Would update /m/song.mp3:\n  title : (empty) → Second Song\n  year : 1971 → (removed)\n  2 other frame(s) removed"
        );

        let text = render_preview(Path::new("/m/song.mp3"), &TagPreview::default());
        assert!(text.ends_with("(no changes)"));
    }

    #[test]
    fn test_render_summary() {
        let summary = RunSummary {
            albums_processed: 2,
            tracks_updated: 5,
            ..Default::default()
        };
        assert_eq!(
            render_summary(&summary),
            "Completed: 5 tracks updated, 0 errors"
        );
        let dry = RunSummary {
            dry_run: true,
            ..summary
        };
        assert_eq!(
            render_summary(&dry),
            "Completed: 5 tracks would be updated, 0 errors"
        );
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let summary = RunSummary {
            root: PathBuf::from("/music"),
            tracks_updated: 1,
            ..Default::default()
        };
        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["root"], "/music");
        assert_eq!(json["tracks_updated"], 1);
        assert!(json["failures"].as_array().unwrap().is_empty());
    }
}
