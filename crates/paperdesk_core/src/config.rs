//! Board geometry configuration.
//!
//! # Responsibility
//! - Hold every layout constant the engine uses (sizes, offsets, cadences).
//! - Load host-provided overrides from JSON and reject unusable values.
//!
//! # Invariants
//! - `BoardConfig::default()` always validates.
//! - Missing JSON fields take their default values.

use crate::model::geometry::Size;
use crate::model::note::NoteFootprint;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for configured z-index seeds; leaves the counter room to grow.
pub const MAX_Z_SEED: i64 = 1 << 40;

/// Configuration loading/validation error.
#[derive(Debug)]
pub enum ConfigError {
    /// Input is not valid JSON for `BoardConfig`.
    Parse(serde_json::Error),
    /// A size is zero, negative or non-finite.
    InvalidSize { field: &'static str, value: Size },
    /// A scalar is negative or non-finite.
    InvalidValue { field: &'static str, value: f64 },
    /// A z-index seed is outside `0..=MAX_Z_SEED`.
    InvalidZIndex { field: &'static str, value: i64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid board config: {err}"),
            Self::InvalidSize { field, value } => write!(
                f,
                "`{field}` must be a positive finite size, got {}x{}",
                value.width, value.height
            ),
            Self::InvalidValue { field, value } => {
                write!(f, "`{field}` must be finite and >= 0, got {value}")
            }
            Self::InvalidZIndex { field, value } => {
                write!(f, "`{field}` must be within 0..={MAX_Z_SEED}, got {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Constants for the automatic arrangement modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrangeConfig {
    /// First row y for every column layout and the grid.
    pub origin_y: f64,
    pub row_spacing: f64,
    pub small_column_x: f64,
    pub large_column_x: f64,
    /// Upper bound of the horizontal jitter in the size columns.
    pub column_jitter: f64,
    /// Full width of the rotation jitter band, centered on zero.
    pub rotation_jitter: f64,
    pub color_origin_x: f64,
    pub color_column_spacing: f64,
    pub grid_origin_x: f64,
    pub grid_gap: f64,
    pub grid_row_height: f64,
    /// Distance kept clear at the right edge before the grid wraps.
    pub grid_right_margin: f64,
    /// First z-index handed out by an arrangement.
    pub z_base: i64,
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self {
            origin_y: 120.0,
            row_spacing: 80.0,
            small_column_x: 80.0,
            large_column_x: 450.0,
            column_jitter: 2.0,
            rotation_jitter: 1.0,
            color_origin_x: 100.0,
            color_column_spacing: 260.0,
            grid_origin_x: 100.0,
            grid_gap: 40.0,
            grid_row_height: 280.0,
            grid_right_margin: 100.0,
            z_base: 100,
        }
    }
}

/// Constants for random ("tossed") placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub padding: f64,
    /// Space kept free above the bottom edge for the printer.
    pub bottom_reserved: f64,
    /// Space kept free at the right edge for the widest paper.
    pub paper_reserved: f64,
    /// Full width of the rotation band, centered on zero.
    pub rotation_range: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            padding: 50.0,
            bottom_reserved: 250.0,
            paper_reserved: 350.0,
            rotation_range: 6.0,
        }
    }
}

/// Full board configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub footprint: NoteFootprint,
    /// Notes whose text has more chars than this are large.
    pub large_text_threshold: usize,
    /// Distance from the bottom edge where printed notes appear.
    pub dispenser_offset_y: f64,
    pub trash_margin: f64,
    pub trash_hover_radius: f64,
    pub initial_z_index: i64,
    /// Used whenever the host cannot measure the board.
    pub window: Size,
    pub arrange: ArrangeConfig,
    pub scatter: ScatterConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            footprint: NoteFootprint::default(),
            large_text_threshold: 50,
            dispenser_offset_y: 340.0,
            trash_margin: 20.0,
            trash_hover_radius: 150.0,
            initial_z_index: 1,
            window: Size::new(1280.0, 800.0),
            arrange: ArrangeConfig::default(),
            scatter: ScatterConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Parses and validates a JSON override document.
    ///
    /// # Errors
    /// - `Parse` for malformed JSON or mistyped fields.
    /// - `InvalidSize` / `InvalidValue` when validation fails.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_size("footprint.small", self.footprint.small)?;
        check_size("footprint.large", self.footprint.large)?;
        check_size("window", self.window)?;

        let scalars = [
            ("dispenser_offset_y", self.dispenser_offset_y),
            ("trash_margin", self.trash_margin),
            ("trash_hover_radius", self.trash_hover_radius),
            ("arrange.origin_y", self.arrange.origin_y),
            ("arrange.row_spacing", self.arrange.row_spacing),
            ("arrange.column_jitter", self.arrange.column_jitter),
            ("arrange.rotation_jitter", self.arrange.rotation_jitter),
            ("arrange.color_column_spacing", self.arrange.color_column_spacing),
            ("arrange.grid_gap", self.arrange.grid_gap),
            ("arrange.grid_row_height", self.arrange.grid_row_height),
            ("arrange.grid_right_margin", self.arrange.grid_right_margin),
            ("scatter.padding", self.scatter.padding),
            ("scatter.bottom_reserved", self.scatter.bottom_reserved),
            ("scatter.paper_reserved", self.scatter.paper_reserved),
            ("scatter.rotation_range", self.scatter.rotation_range),
        ];
        for (field, value) in scalars {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        let positions = [
            ("arrange.small_column_x", self.arrange.small_column_x),
            ("arrange.large_column_x", self.arrange.large_column_x),
            ("arrange.color_origin_x", self.arrange.color_origin_x),
            ("arrange.grid_origin_x", self.arrange.grid_origin_x),
        ];
        for (field, value) in positions {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        for (field, value) in [
            ("initial_z_index", self.initial_z_index),
            ("arrange.z_base", self.arrange.z_base),
        ] {
            if !(0..=MAX_Z_SEED).contains(&value) {
                return Err(ConfigError::InvalidZIndex { field, value });
            }
        }

        Ok(())
    }
}

fn check_size(field: &'static str, value: Size) -> Result<(), ConfigError> {
    if value.is_measurable() {
        Ok(())
    } else {
        Err(ConfigError::InvalidSize { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardConfig, ConfigError};

    #[test]
    fn default_config_validates() {
        BoardConfig::default()
            .validate()
            .expect("defaults should validate");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = BoardConfig::from_json(r#"{"trash_margin": 32, "arrange": {"grid_gap": 24}}"#)
            .expect("partial config should parse");
        assert_eq!(config.trash_margin, 32.0);
        assert_eq!(config.arrange.grid_gap, 24.0);
        assert_eq!(config.arrange.grid_row_height, 280.0);
        assert_eq!(config.large_text_threshold, 50);
    }

    #[test]
    fn rejects_non_positive_footprint() {
        let err = BoardConfig::from_json(
            r#"{"footprint": {"small": {"width": 0, "height": 160}, "large": {"width": 320, "height": 240}}}"#,
        )
        .expect_err("zero width must be rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidSize {
                field: "footprint.small",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_margin() {
        let err = BoardConfig::from_json(r#"{"trash_margin": -1}"#)
            .expect_err("negative margin must be rejected");
        assert!(err.to_string().contains("trash_margin"));
    }

    #[test]
    fn rejects_z_seeds_near_overflow() {
        let err = BoardConfig::from_json(r#"{"initial_z_index": 9223372036854775807}"#)
            .expect_err("counter seed at i64::MAX must be rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidZIndex {
                field: "initial_z_index",
                ..
            }
        ));

        let err = BoardConfig::from_json(r#"{"arrange": {"z_base": 9223372036854775000}}"#)
            .expect_err("arrange base near i64::MAX must be rejected");
        assert!(err.to_string().contains("arrange.z_base"));

        let err = BoardConfig::from_json(r#"{"initial_z_index": -5}"#)
            .expect_err("negative seed must be rejected");
        assert!(matches!(err, ConfigError::InvalidZIndex { value: -5, .. }));
    }

    #[test]
    fn accepts_z_seed_at_bound() {
        let raw = format!(r#"{{"initial_z_index": {}}}"#, super::MAX_Z_SEED);
        let config = BoardConfig::from_json(&raw).expect("bound is inclusive");
        assert_eq!(config.initial_z_index, super::MAX_Z_SEED);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = BoardConfig::from_json("{not json").expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
