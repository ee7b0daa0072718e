//! Board engine facade.
//!
//! # Responsibility
//! - Own all board state: notes, archive, z-order, gesture and mode.
//! - Expose gesture-level operations consumed by the presentation layer.
//!
//! # Invariants
//! - Operations on unknown IDs change nothing.
//! - Blank text never produces a note.
//! - Front-bring and print always hand out `current_max + 1`.
//! - After an arrangement the counter sits at `z_base + note_count`.

use crate::archive::{build_folders, filter_folders, Folder};
use crate::config::BoardConfig;
use crate::engine::drag::{DragOutcome, TrashTarget};
use crate::engine::placement::{
    arrange, dispenser_position, scatter_position, scatter_rotation, ArrangeMode, ScatterBias,
};
use crate::engine::selection::{apply_selection_box, PointerTarget, SelectionGesture};
use crate::engine::sources::{Clock, Jitter, RandomJitter, SystemClock};
use crate::engine::z_order::ZOrderAllocator;
use crate::model::geometry::{Point, Rect, Size};
use crate::model::note::{CompletedNote, Note, NoteId, PaperColor};
use crate::store::NoteStore;
use chrono::{Local, TimeZone};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;

/// Serializable view of the board for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    /// Active notes in store order.
    pub notes: Vec<Note>,
    /// Archive, most recent completion first.
    pub completed: Vec<CompletedNote>,
    pub mode: ArrangeMode,
    pub max_z_index: i64,
}

/// In-memory note board.
pub struct BoardEngine<J: Jitter = RandomJitter, C: Clock = SystemClock> {
    config: BoardConfig,
    store: NoteStore,
    archive: Vec<CompletedNote>,
    z_order: ZOrderAllocator,
    selection: SelectionGesture,
    mode: ArrangeMode,
    trash: Option<TrashTarget>,
    window: Size,
    jitter: J,
    clock: C,
}

impl BoardEngine {
    /// Engine with entropy-seeded jitter and the system clock.
    pub fn new(config: BoardConfig) -> Self {
        Self::with_sources(config, RandomJitter::from_entropy(), SystemClock)
    }
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl<J: Jitter, C: Clock> BoardEngine<J, C> {
    pub fn with_sources(config: BoardConfig, jitter: J, clock: C) -> Self {
        Self {
            z_order: ZOrderAllocator::new(config.initial_z_index),
            window: config.window,
            config,
            store: NoteStore::new(),
            archive: Vec::new(),
            selection: SelectionGesture::default(),
            mode: ArrangeMode::Messy,
            trash: None,
            jitter,
            clock,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Size used when the board cannot be measured.
    pub fn window_size(&self) -> Size {
        self.window
    }

    /// Records the full-window size used when the board cannot be measured.
    ///
    /// Returns `false` (keeping the previous size) for unmeasurable input.
    pub fn set_window_size(&mut self, window: Size) -> bool {
        if window.is_measurable() {
            self.window = window;
            true
        } else {
            warn!(
                "event=window_resize module=board status=ignored width={} height={}",
                window.width, window.height
            );
            false
        }
    }

    /// Prints a note at the dispenser.
    ///
    /// Returns `None` (and leaves the board untouched) for blank text.
    pub fn create_note(
        &mut self,
        text: impl Into<String>,
        color: PaperColor,
        board: Size,
    ) -> Option<Note> {
        let board = self.resolve_board(board);
        let created_at = self.clock.now();
        let mut note = match Note::print(text, color, created_at, self.config.large_text_threshold)
        {
            Ok(note) => note,
            Err(err) => {
                debug!("event=note_print module=board status=rejected reason={err}");
                return None;
            }
        };

        let size = self.config.footprint.size_for(note.is_large);
        note.position = dispenser_position(board, size, self.config.dispenser_offset_y);
        note.z_index = self.z_order.next();
        self.store.insert(note.clone());

        info!(
            "event=note_print module=board status=ok note_id={} color={} large={} z_index={} notes={}",
            note.id,
            note.color.as_str(),
            note.is_large,
            note.z_index,
            self.store.len()
        );
        Some(note)
    }

    /// Tosses an existing note to a random spot with a small tilt.
    pub fn scatter_note(&mut self, id: NoteId, board: Size, bias: ScatterBias) -> bool {
        let board = self.resolve_board(board);
        let Some(note) = self.store.get_mut(id) else {
            return false;
        };
        note.position = scatter_position(board, bias, &self.config.scatter, &mut self.jitter);
        note.rotation = scatter_rotation(&self.config.scatter, &mut self.jitter);
        debug!("event=note_scatter module=board status=ok note_id={id}");
        true
    }

    /// Moves `id` above every other note.
    pub fn bring_to_front(&mut self, id: NoteId) -> Option<i64> {
        if !self.store.contains(id) {
            return None;
        }
        let z_index = self.z_order.next();
        if let Some(note) = self.store.get_mut(id) {
            note.z_index = z_index;
        }
        debug!("event=note_front module=board status=ok note_id={id} z_index={z_index}");
        Some(z_index)
    }

    /// Sets or clears the trash drop target; malformed rects clear it.
    pub fn set_trash_target(&mut self, rect: Option<Rect>) {
        self.trash = rect.and_then(|rect| {
            let target = TrashTarget::new(rect);
            if target.is_none() {
                warn!("event=trash_measure module=board status=ignored rect={rect:?}");
            }
            target
        });
    }

    pub fn trash_target(&self) -> Option<Rect> {
        self.trash.map(|trash| trash.rect())
    }

    /// Whether `pointer` is close enough to the trash to reveal it.
    pub fn is_hovering_trash(&self, pointer: Point) -> bool {
        self.trash
            .is_some_and(|trash| trash.is_hovered(pointer, self.config.trash_hover_radius))
    }

    /// Applies one drag update for note `id`.
    ///
    /// A pointer over the trash deletes the note (or its whole selection
    /// group when the note is selected). Otherwise the note snaps to
    /// `position` and its selected peers follow by `delta`.
    pub fn update_position(
        &mut self,
        id: NoteId,
        position: Point,
        pointer: Point,
        delta: Point,
    ) -> DragOutcome {
        let Some(dragged) = self.store.get(id) else {
            return DragOutcome::Ignored;
        };
        let group_drag = dragged.is_selected;

        let over_trash = self
            .trash
            .is_some_and(|trash| trash.accepts_drop(pointer, self.config.trash_margin));
        if over_trash {
            let doomed: HashSet<NoteId> = if group_drag {
                self.store.selected_ids().into_iter().collect()
            } else {
                HashSet::from([id])
            };
            let removed = self.store.remove_all(&doomed);
            info!(
                "event=note_trash module=board status=ok note_id={id} removed={}",
                removed.len()
            );
            return DragOutcome::Deleted { removed };
        }

        let mut moved = vec![id];
        for note in self.store.iter_mut() {
            if note.id == id {
                note.position = position;
            } else if group_drag && note.is_selected {
                note.position = note.position.translate(delta);
                moved.push(note.id);
            }
        }
        DragOutcome::Moved { moved }
    }

    /// Starts a rubber-band gesture if the pointer went down on the background.
    pub fn begin_selection(&mut self, origin: Point, target: PointerTarget) -> bool {
        if target != PointerTarget::Background {
            return false;
        }
        for note in self.store.iter_mut() {
            note.is_selected = false;
        }
        self.selection.begin(origin);
        true
    }

    /// Re-evaluates every note against the box spanning origin and `current`.
    pub fn update_selection(&mut self, current: Point) -> Option<Rect> {
        let rect = self.selection.update(current)?;
        // Recomputed from scratch each move.
        let count = apply_selection_box(self.store.as_mut_slice(), &rect, &self.config.footprint);
        debug!("event=selection_update module=board status=ok selected={count}");
        Some(rect)
    }

    /// Ends the gesture; selection flags stay as they are.
    pub fn end_selection(&mut self) {
        self.selection.end();
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_active()
    }

    pub fn selection_rect(&self) -> Option<Rect> {
        self.selection.rect()
    }

    pub fn selected_ids(&self) -> Vec<NoteId> {
        self.store.selected_ids()
    }

    pub fn clear_selection(&mut self) {
        for note in self.store.iter_mut() {
            note.is_selected = false;
        }
    }

    /// Archives `id`; the record is prepended to the archive.
    pub fn complete_note(&mut self, id: NoteId) -> Option<CompletedNote> {
        let note = self.store.remove(id)?;
        let completed = CompletedNote::archive(note, self.clock.now());
        self.archive.insert(0, completed.clone());
        info!(
            "event=note_complete module=board status=ok note_id={id} archived={}",
            self.archive.len()
        );
        Some(completed)
    }

    /// Discards `id` without an archive record.
    pub fn delete_note(&mut self, id: NoteId) -> bool {
        let removed = self.store.remove(id).is_some();
        if removed {
            info!("event=note_delete module=board status=ok note_id={id}");
        }
        removed
    }

    /// Advances to the next arrangement mode and lays out the board.
    pub fn cycle_arrange(&mut self, board: Size) -> ArrangeMode {
        let board = self.resolve_board(board);
        self.mode = self.mode.next();
        let count = arrange(
            self.mode,
            self.store.as_mut_slice(),
            board,
            &self.config,
            &mut self.jitter,
        );
        self.z_order
            .reset_to(self.config.arrange.z_base.saturating_add(count as i64));
        info!(
            "event=board_arrange module=board status=ok mode={} notes={count}",
            self.mode.label()
        );
        self.mode
    }

    pub fn arrange_mode(&self) -> ArrangeMode {
        self.mode
    }

    pub fn max_z_index(&self) -> i64 {
        self.z_order.current_max()
    }

    pub fn notes(&self) -> &[Note] {
        self.store.as_slice()
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.store.get(id)
    }

    /// Archive, most recent completion first.
    pub fn completed_notes(&self) -> &[CompletedNote] {
        &self.archive
    }

    /// Day folders in the local time zone, filtered by `query`.
    pub fn folders(&self, query: &str) -> Vec<Folder> {
        self.folders_in(&Local, query)
    }

    pub fn folders_in<Tz: TimeZone>(&self, tz: &Tz, query: &str) -> Vec<Folder> {
        filter_folders(build_folders(&self.archive, tz), query)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            notes: self.store.as_slice().to_vec(),
            completed: self.archive.clone(),
            mode: self.mode,
            max_z_index: self.z_order.current_max(),
        }
    }

    fn resolve_board(&self, board: Size) -> Size {
        board.or_fallback(self.window)
    }
}
