//! Flutter bridge crate for PaperDesk.
//! Dart-facing functions live in [`api`].

pub mod api;
