//! Placement and arrangement strategies.
//!
//! # Responsibility
//! - Compute the dispenser position for freshly printed notes.
//! - Compute random "tossed" positions with optional left/right bias.
//! - Lay out the whole board for each arrangement mode.
//!
//! # Invariants
//! - Arrangements assign z-indices `z_base..z_base + n` with no gaps.
//! - Within every arranged group, newer notes come first.
//! - `ArrangeMode::next` never yields `Messy`.

use crate::config::{ArrangeConfig, BoardConfig, ScatterConfig};
use crate::engine::sources::Jitter;
use crate::model::geometry::{Point, Size};
use crate::model::note::{Note, NoteFootprint, PaperColor};
use serde::{Deserialize, Serialize};

/// Automatic layout strategy currently applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrangeMode {
    /// Freeform; notes stay where creation and drags left them.
    #[default]
    Messy,
    /// Small notes in one column, large notes in another.
    Columns,
    /// One column per paper color.
    Colors,
    /// Row-packed grid that wraps at the board edge.
    Grid,
}

impl ArrangeMode {
    /// Stable numeric code (`0..=3`).
    pub fn code(self) -> u8 {
        match self {
            Self::Messy => 0,
            Self::Columns => 1,
            Self::Colors => 2,
            Self::Grid => 3,
        }
    }

    /// Short label for the mode indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::Messy => "messy",
            Self::Columns => "columns",
            Self::Colors => "colors",
            Self::Grid => "grid",
        }
    }

    /// Mode that follows `self` in the arrange cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Messy | Self::Grid => Self::Columns,
            Self::Columns => Self::Colors,
            Self::Colors => Self::Grid,
        }
    }
}

/// Horizontal preference for a tossed note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScatterBias {
    Left,
    Right,
    #[default]
    Any,
}

/// Top-left of a note emerging from the dispenser, centered horizontally.
pub fn dispenser_position(board: Size, note_size: Size, offset_y: f64) -> Point {
    Point::new(board.width / 2.0 - note_size.width / 2.0, board.height - offset_y)
}

/// Random position inside the free area of the board.
///
/// Degenerate ranges (small boards) collapse to their lower bound.
pub fn scatter_position(
    board: Size,
    bias: ScatterBias,
    config: &ScatterConfig,
    jitter: &mut impl Jitter,
) -> Point {
    let mut min_x = config.padding;
    let mut max_x = board.width - config.paper_reserved;
    match bias {
        ScatterBias::Left => max_x = board.width / 2.0 - 100.0,
        ScatterBias::Right => min_x = board.width / 2.0 + 50.0,
        ScatterBias::Any => {}
    }
    let min_y = config.padding;
    let max_y = board.height - config.bottom_reserved;

    Point::new(
        sample_range(min_x, max_x, jitter),
        sample_range(min_y, max_y, jitter),
    )
}

/// Random tilt centered on zero.
pub fn scatter_rotation(config: &ScatterConfig, jitter: &mut impl Jitter) -> f64 {
    centered_sample(config.rotation_range, jitter)
}

/// Applies `mode` to every note in `notes`.
///
/// Returns the number of notes laid out (zero for `Messy`).
pub fn arrange(
    mode: ArrangeMode,
    notes: &mut [Note],
    board: Size,
    config: &BoardConfig,
    jitter: &mut impl Jitter,
) -> usize {
    match mode {
        ArrangeMode::Messy => return 0,
        ArrangeMode::Columns => arrange_columns(notes, &config.arrange, jitter),
        ArrangeMode::Colors => arrange_colors(notes, &config.arrange),
        ArrangeMode::Grid => arrange_grid(notes, board, &config.footprint, &config.arrange),
    }
    notes.len()
}

fn arrange_columns(notes: &mut [Note], config: &ArrangeConfig, jitter: &mut impl Jitter) {
    let small = newest_first(notes, |note| !note.is_large);
    let large = newest_first(notes, |note| note.is_large);

    let columns = [
        (config.small_column_x, &small, 0),
        (config.large_column_x, &large, small.len()),
    ];
    for (column_x, members, z_offset) in columns {
        for (row, &index) in members.iter().enumerate() {
            let note = &mut notes[index];
            note.position = Point::new(
                column_x + jitter.next_unit() * config.column_jitter,
                row_y(config, row),
            );
            note.rotation = centered_sample(config.rotation_jitter, jitter);
            note.z_index = config.z_base + (z_offset + row) as i64;
        }
    }
}

fn arrange_colors(notes: &mut [Note], config: &ArrangeConfig) {
    let mut z_offset = 0usize;
    for color in PaperColor::ARRANGE_ORDER {
        let column_x =
            config.color_origin_x + color.arrange_index() as f64 * config.color_column_spacing;
        for (row, index) in newest_first(notes, |note| note.color == color)
            .into_iter()
            .enumerate()
        {
            let note = &mut notes[index];
            note.position = Point::new(column_x, row_y(config, row));
            note.rotation = 0.0;
            note.z_index = config.z_base + z_offset as i64;
            z_offset += 1;
        }
    }
}

fn arrange_grid(notes: &mut [Note], board: Size, footprint: &NoteFootprint, config: &ArrangeConfig) {
    let right_limit = board.width - config.grid_right_margin;
    let mut cursor = Point::new(config.grid_origin_x, config.origin_y);

    for (rank, index) in newest_first(notes, |_| true).into_iter().enumerate() {
        let note = &mut notes[index];
        let width = footprint.size_for(note.is_large).width;
        if cursor.x + width > right_limit {
            cursor.x = config.grid_origin_x;
            cursor.y += config.grid_row_height;
        }
        note.position = cursor;
        note.rotation = 0.0;
        note.z_index = config.z_base + rank as i64;
        cursor.x += width + config.grid_gap;
    }
}

/// Indices of notes matching `filter`, newest `created_at` first.
///
/// The sort is stable, so equal timestamps keep store order.
fn newest_first(notes: &[Note], filter: impl Fn(&Note) -> bool) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..notes.len()).filter(|&i| filter(&notes[i])).collect();
    indices.sort_by(|&a, &b| notes[b].created_at.cmp(&notes[a].created_at));
    indices
}

fn row_y(config: &ArrangeConfig, row: usize) -> f64 {
    config.origin_y + row as f64 * config.row_spacing
}

fn sample_range(min: f64, max: f64, jitter: &mut impl Jitter) -> f64 {
    if max <= min {
        return min;
    }
    min + jitter.next_unit() * (max - min)
}

fn centered_sample(width: f64, jitter: &mut impl Jitter) -> f64 {
    jitter.next_unit() * width - width / 2.0
}
