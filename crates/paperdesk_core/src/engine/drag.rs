//! Drag outcomes and the trash drop target.
//!
//! # Invariants
//! - Drop detection is inclusive on the margin-expanded trash box.
//! - Hover detection is a strict radius around the trash center.

use crate::model::geometry::{Point, Rect};
use crate::model::note::NoteId;

/// Result of one drag update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Notes whose positions changed, dragged note first.
    Moved { moved: Vec<NoteId> },
    /// Notes removed by a trash drop, in store order.
    Deleted { removed: Vec<NoteId> },
    /// The dragged note is unknown; nothing changed.
    Ignored,
}

impl DragOutcome {
    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }
}

/// Trash can bounds as measured by the host, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrashTarget {
    rect: Rect,
}

impl TrashTarget {
    /// Accepts only well-formed measurements.
    pub fn new(rect: Rect) -> Option<Self> {
        rect.is_well_formed().then_some(Self { rect })
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether releasing at `pointer` drops onto the trash.
    pub fn accepts_drop(&self, pointer: Point, margin: f64) -> bool {
        self.rect.expand(margin).contains(pointer)
    }

    /// Whether `pointer` is close enough to reveal the trash.
    pub fn is_hovered(&self, pointer: Point, radius: f64) -> bool {
        pointer.distance_to(self.rect.center()) < radius
    }
}
