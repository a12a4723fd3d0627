//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define one storage contract shared by the flat-file and SQLite backends.
//! - Isolate SQL and file I/O details from service orchestration.
//!
//! # Invariants
//! - Repositories never validate or normalize board contents.
//! - Every write replaces the whole stored board.

pub mod board_repo;
