//! Rubber-band selection gesture.
//!
//! # Responsibility
//! - Track the origin and current box of an in-progress drag-select.
//! - Recompute every note's selection flag from scratch on each update.
//!
//! # Invariants
//! - Only a pointer-down on the empty background starts a gesture.
//! - Selection flags depend only on the latest box, never on history.

use crate::model::geometry::{Point, Rect};
use crate::model::note::{Note, NoteFootprint, NoteId};

/// What the pointer landed on when a gesture began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty board surface.
    Background,
    Note(NoteId),
    /// Buttons, printer, drawer and other chrome.
    Control,
}

/// Transient state of one drag-select gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectionGesture {
    origin: Option<Point>,
    current: Option<Rect>,
}

impl SelectionGesture {
    pub fn begin(&mut self, origin: Point) {
        self.origin = Some(origin);
        self.current = None;
    }

    /// Updates the box; `None` when no gesture is active.
    pub fn update(&mut self, point: Point) -> Option<Rect> {
        let origin = self.origin?;
        let rect = Rect::spanning(origin, point);
        self.current = Some(rect);
        Some(rect)
    }

    pub fn end(&mut self) {
        self.origin = None;
        self.current = None;
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// Latest box, if the pointer has moved since `begin`.
    pub fn rect(&self) -> Option<Rect> {
        self.current
    }
}

/// Flags every note whose nominal bounds intersect `selection`.
///
/// Returns the number of selected notes.
pub fn apply_selection_box(notes: &mut [Note], selection: &Rect, footprint: &NoteFootprint) -> usize {
    let mut selected = 0;
    for note in notes.iter_mut() {
        note.is_selected = selection.intersects(&note.bounds(footprint));
        if note.is_selected {
            selected += 1;
        }
    }
    selected
}
