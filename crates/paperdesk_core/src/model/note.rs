//! Note domain model.
//!
//! # Responsibility
//! - Define active board notes and their archived completion records.
//! - Enforce creation-time validation (non-blank text, size class).
//!
//! # Invariants
//! - `id` is stable for the note lifetime and carried into the archive.
//! - `is_large` is derived once when the note is printed and never recomputed.
//! - `CompletedNote::completed_at` is never earlier than `created_at`.

use crate::model::geometry::{Point, Rect, Size};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every note, active or archived.
pub type NoteId = Uuid;

/// Paper stock a note is printed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperColor {
    Yellow,
    Pink,
    Blue,
    White,
}

impl PaperColor {
    /// Column order used by the color arrangement.
    pub const ARRANGE_ORDER: [PaperColor; 4] = [
        PaperColor::Pink,
        PaperColor::Yellow,
        PaperColor::Blue,
        PaperColor::White,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Pink => "pink",
            Self::Blue => "blue",
            Self::White => "white",
        }
    }

    /// Parses a lowercase color name; unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yellow" => Some(Self::Yellow),
            "pink" => Some(Self::Pink),
            "blue" => Some(Self::Blue),
            "white" => Some(Self::White),
            _ => None,
        }
    }

    /// Index of this color in [`PaperColor::ARRANGE_ORDER`].
    pub fn arrange_index(self) -> usize {
        match self {
            Self::Pink => 0,
            Self::Yellow => 1,
            Self::Blue => 2,
            Self::White => 3,
        }
    }
}

/// Nominal footprints used for hit-testing and grid packing.
///
/// Approximate; rendered sizes are not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteFootprint {
    pub small: Size,
    pub large: Size,
}

impl NoteFootprint {
    pub fn size_for(&self, is_large: bool) -> Size {
        if is_large {
            self.large
        } else {
            self.small
        }
    }
}

impl Default for NoteFootprint {
    fn default() -> Self {
        Self {
            small: Size::new(256.0, 160.0),
            large: Size::new(320.0, 240.0),
        }
    }
}

/// Validation failures for note records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Text is empty or whitespace-only.
    BlankText,
    /// `completed_at` precedes `created_at`.
    CompletedBeforeCreated {
        created_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankText => write!(f, "note text must not be blank"),
            Self::CompletedBeforeCreated {
                created_at,
                completed_at,
            } => write!(
                f,
                "completed_at ({completed_at}) must be >= created_at ({created_at})"
            ),
        }
    }
}

impl Error for NoteValidationError {}

/// Active note placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    pub color: PaperColor,
    pub created_at: DateTime<Utc>,
    /// Top-left corner in board space.
    pub position: Point,
    /// Degrees; small jitter only.
    pub rotation: f64,
    pub z_index: i64,
    pub is_large: bool,
    /// Transient UI state owned by the rubber-band gesture.
    #[serde(default)]
    pub is_selected: bool,
}

impl Note {
    /// Prints a fresh note with a generated ID.
    ///
    /// # Errors
    /// - `BlankText` when `text` is empty or whitespace-only.
    pub fn print(
        text: impl Into<String>,
        color: PaperColor,
        created_at: DateTime<Utc>,
        large_text_threshold: usize,
    ) -> Result<Self, NoteValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(NoteValidationError::BlankText);
        }
        let is_large = text.chars().count() > large_text_threshold;

        Ok(Self {
            id: Uuid::new_v4(),
            text,
            color,
            created_at,
            position: Point::default(),
            rotation: 0.0,
            z_index: 0,
            is_large,
            is_selected: false,
        })
    }

    /// Nominal bounding box at the current position.
    pub fn bounds(&self, footprint: &NoteFootprint) -> Rect {
        Rect::from_origin_size(self.position, footprint.size_for(self.is_large))
    }
}

/// Archived, non-spatial record of a finished note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CompletedNoteRecord")]
pub struct CompletedNote {
    pub id: NoteId,
    pub text: String,
    pub color: PaperColor,
    pub created_at: DateTime<Utc>,
    pub is_large: bool,
    pub completed_at: DateTime<Utc>,
}

impl CompletedNote {
    /// Archives `note`, clamping `completed_at` so it never precedes creation.
    pub fn archive(note: Note, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: note.id,
            text: note.text,
            color: note.color,
            created_at: note.created_at,
            is_large: note.is_large,
            completed_at: completed_at.max(note.created_at),
        }
    }

    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.completed_at < self.created_at {
            return Err(NoteValidationError::CompletedBeforeCreated {
                created_at: self.created_at,
                completed_at: self.completed_at,
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct CompletedNoteRecord {
    id: NoteId,
    text: String,
    color: PaperColor,
    created_at: DateTime<Utc>,
    is_large: bool,
    completed_at: DateTime<Utc>,
}

impl TryFrom<CompletedNoteRecord> for CompletedNote {
    type Error = NoteValidationError;

    fn try_from(value: CompletedNoteRecord) -> Result<Self, Self::Error> {
        let note = Self {
            id: value.id,
            text: value.text,
            color: value.color,
            created_at: value.created_at,
            is_large: value.is_large,
            completed_at: value.completed_at,
        };
        note.validate()?;
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::{CompletedNote, Note, PaperColor};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn archive_clamps_completion_to_creation() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let note = Note::print("water plants", PaperColor::Blue, created, 50).unwrap();
        let archived = CompletedNote::archive(note, created - Duration::seconds(5));
        assert_eq!(archived.completed_at, created);
        assert!(archived.validate().is_ok());
    }

    #[test]
    fn parse_accepts_mixed_case_and_rejects_unknown() {
        assert_eq!(PaperColor::parse(" Pink "), Some(PaperColor::Pink));
        assert_eq!(PaperColor::parse("green"), None);
    }

    #[test]
    fn large_threshold_counts_chars_not_bytes() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let note = Note::print("é".repeat(50), PaperColor::White, created, 50).unwrap();
        assert!(!note.is_large);
    }
}
