//! Path normalization for boards about to be saved.
//!
//! # Responsibility
//! - Keep saved boards portable when moved together with their images.
//!
//! # Invariants
//! - Normalization is best-effort and never fails a save.
//! - No normalization happens on load; stored paths are interpreted as-is.

pub mod photo_paths;

pub use photo_paths::{normalize_photo_paths, NormalizeReport};
