//! Core persistence logic for YarnBoard.
//! This crate is the single source of truth for board storage invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, logging_status, resolve_log_level, sanitize_message, LogLevel,
    LoggingError,
};
pub use model::board::{BoardKind, FileFilter};
pub use normalize::{normalize_photo_paths, NormalizeReport};
pub use repo::board_repo::{
    board_repository_for, BoardRepository, FlatFileBoardRepository, RepoError, RepoResult,
    SqliteBoardRepository,
};
pub use service::board_store::{
    parse_board, BoardStore, LoadOutcome, LoadedBoard, SaveOutcome, StoreError, StoreResult,
};
pub use service::chooser::{FixedPathChooser, PathChooser};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
