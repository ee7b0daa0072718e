//! Core domain logic for PaperDesk.
//! This crate owns board state, layout math and the completion archive.

pub mod archive;
pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
mod store;

pub use archive::{build_folders, filter_folders, Folder};
pub use config::{ArrangeConfig, BoardConfig, ConfigError, ScatterConfig, MAX_Z_SEED};
pub use engine::{
    ArrangeMode, BoardEngine, BoardSnapshot, Clock, DragOutcome, FixedJitter, Jitter, ManualClock,
    PointerTarget, RandomJitter, ScatterBias, SystemClock,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::geometry::{Point, Rect, Size};
pub use model::note::{
    CompletedNote, Note, NoteFootprint, NoteId, NoteValidationError, PaperColor,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
