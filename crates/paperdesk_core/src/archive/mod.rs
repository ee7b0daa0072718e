//! Completion archive views.
//!
//! # Responsibility
//! - Derive day folders from completed notes on demand.
//! - Apply the archive search filter.
//!
//! # Invariants
//! - Folders are a pure view; they are never stored or mutated.
//! - Folder order is newest day first, item order newest completion first.

pub mod folders;

pub use folders::{build_folders, filter_folders, Folder};
