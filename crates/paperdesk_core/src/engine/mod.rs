//! Board engine: state ownership and gesture-level operations.
//!
//! # Responsibility
//! - Orchestrate the note store, z-order counter, placement strategies and
//!   hit-testing into one synchronous API.
//! - Keep presentation layers free of layout math.
//!
//! # Invariants
//! - Every operation runs to completion; nothing is deferred.
//! - Failures are absorbed as no-ops and reported through return values.

pub mod board;
pub mod drag;
pub mod placement;
pub mod selection;
pub mod sources;
pub mod z_order;

pub use board::{BoardEngine, BoardSnapshot};
pub use drag::{DragOutcome, TrashTarget};
pub use placement::{ArrangeMode, ScatterBias};
pub use selection::PointerTarget;
pub use sources::{Clock, FixedJitter, Jitter, ManualClock, RandomJitter, SystemClock};
pub use z_order::ZOrderAllocator;
