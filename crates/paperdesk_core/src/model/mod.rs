//! Board domain model.
//!
//! # Responsibility
//! - Define notes, archived notes and the geometry they live in.
//! - Keep the model free of engine state (counters, gestures, modes).
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Spatial fields exist only on active notes.

pub mod geometry;
pub mod note;
