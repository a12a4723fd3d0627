//! Board domain model.
//!
//! # Responsibility
//! - Define the persisted board formats and chooser filter metadata.
//! - Keep the board document itself untyped (`serde_json::Value`), so caller
//!   fields pass through the core losslessly.
//!
//! # Invariants
//! - Only `photos[].path` has structure known to core.

pub mod board;
