//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, normalization and repository calls into
//!   save/load APIs.
//! - Keep host/UI layers decoupled from storage details.

pub mod board_store;
pub mod chooser;
