//! In-memory note storage.
//!
//! # Responsibility
//! - Hold active notes keyed by stable ID.
//! - Preserve insertion order for default listing.
//!
//! # Invariants
//! - At most one note per `NoteId`.
//! - Removal never reorders the remaining notes.

mod note_store;

pub use note_store::NoteStore;
