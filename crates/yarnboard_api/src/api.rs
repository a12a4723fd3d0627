//! Board save/load API for UI hosts.
//!
//! # Responsibility
//! - Expose stable use-case functions to the host shell.
//! - Flatten core outcomes and errors into serializable envelopes.
//!
//! # Invariants
//! - Exported functions never panic and never return `Err`.
//! - Absent envelope fields are omitted when serialized, so a cancellation
//!   serializes to exactly `{"ok":false,"cancelled":true}`.

use log::info;
use serde::Serialize;
use std::path::Path;
use yarnboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, sanitize_message,
    BoardKind, BoardStore, LoadOutcome, PathChooser, SaveOutcome,
};

const MAX_HOST_LOG_CHARS: usize = 512;

/// Response envelope for `save_board`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveBoardResponse {
    /// Whether the board was written.
    pub ok: bool,
    /// Destination path on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Human-readable failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set when the user declined the save prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<bool>,
}

impl SaveBoardResponse {
    fn saved(path: &Path) -> Self {
        Self {
            ok: true,
            path: Some(path.display().to_string()),
            error: None,
            cancelled: None,
        }
    }

    fn cancelled() -> Self {
        Self {
            ok: false,
            path: None,
            error: None,
            cancelled: Some(true),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            path: None,
            error: Some(message.into()),
            cancelled: None,
        }
    }
}

/// Response envelope for `load_board`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadBoardResponse {
    pub ok: bool,
    /// Stored board JSON text, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Backend tag, `yb` or `sqlite`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<BoardKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<bool>,
}

impl LoadBoardResponse {
    fn cancelled() -> Self {
        Self {
            ok: false,
            json: None,
            path: None,
            kind: None,
            error: None,
            cancelled: Some(true),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            json: None,
            path: None,
            kind: None,
            error: Some(message.into()),
            cancelled: None,
        }
    }
}

/// Validates, normalizes and saves a board chosen through `chooser`.
///
/// Input semantics:
/// - `save_format`: `sqlite` (case-insensitive) selects the database backend;
///   any other value selects the flat `.yb` file.
/// - `json_text`: complete board JSON produced by the host.
pub fn save_board(
    chooser: &dyn PathChooser,
    save_format: &str,
    json_text: &str,
) -> SaveBoardResponse {
    let kind = BoardKind::from_format(save_format);
    match BoardStore::new(chooser).save(kind, json_text) {
        Ok(SaveOutcome::Saved { path }) => SaveBoardResponse::saved(&path),
        Ok(SaveOutcome::Cancelled) => SaveBoardResponse::cancelled(),
        Err(err) => SaveBoardResponse::failure(err.to_string()),
    }
}

/// Loads a board from `path`, or from a chooser-selected path.
///
/// A missing or blank `path` opens the chooser.
pub fn load_board(chooser: &dyn PathChooser, path: Option<&str>) -> LoadBoardResponse {
    let explicit = path
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(Path::new);

    match BoardStore::new(chooser).load(explicit) {
        Ok(LoadOutcome::Loaded(board)) => LoadBoardResponse {
            ok: true,
            json: Some(board.json),
            path: Some(board.path.display().to_string()),
            kind: Some(board.kind),
            error: None,
            cancelled: None,
        },
        Ok(LoadOutcome::Cancelled) => LoadBoardResponse::cancelled(),
        Err(err) => LoadBoardResponse::failure(err.to_string()),
    }
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message on failure.
/// Safe to call repeatedly with the same `level + log_dir`.
pub fn init_logging(level: &str, log_dir: &str) -> String {
    match init_logging_inner(level, log_dir) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Records a diagnostic line sent by the host UI.
pub fn host_log(message: &str) {
    info!(
        "event=host_log module=api message={}",
        sanitize_message(message, MAX_HOST_LOG_CHARS)
    );
}

/// Exposes the core crate version.
pub fn core_version() -> String {
    core_version_inner().to_owned()
}
