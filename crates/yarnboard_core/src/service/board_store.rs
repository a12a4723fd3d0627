//! Board save/load use-case service.
//!
//! # Responsibility
//! - Validate board JSON before any I/O.
//! - Ask the chooser for a location, normalize photo paths, and delegate the
//!   write to the backend for the requested kind.
//! - Load boards with backend detection by file extension.
//!
//! # Invariants
//! - Empty or invalid input never reaches the chooser or the filesystem.
//! - Cancellation is an outcome, not an error.
//! - Normalization problems never fail a save.
//! - Loads return stored text verbatim after validating it parses.

use crate::model::board::BoardKind;
use crate::normalize::normalize_photo_paths;
use crate::repo::board_repo::{board_repository_for, RepoError};
use crate::service::chooser::PathChooser;
use log::{error, info};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure taxonomy for board save/load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Input text is empty or whitespace only.
    EmptyDocument,
    /// Input or stored text is not valid JSON; carries the parser message.
    InvalidJson(String),
    /// Load path does not exist.
    NotFound(PathBuf),
    /// Database file holds no board row.
    NoData(PathBuf),
    /// Filesystem or database failure.
    Io(String),
}

impl StoreError {
    /// Stable error code for diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyDocument => "empty_document",
            Self::InvalidJson(_) => "invalid_json",
            Self::NotFound(_) => "not_found",
            Self::NoData(_) => "no_data",
            Self::Io(_) => "io_failure",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDocument => write!(f, "Empty board JSON"),
            Self::InvalidJson(message) => write!(f, "Invalid board JSON: {message}"),
            Self::NotFound(path) => write!(f, "File not found: {}", path.display()),
            Self::NoData(_) => write!(f, "No board data found in sqlite DB"),
            Self::Io(message) => write!(f, "{message}"),
        }
    }
}

impl Error for StoreError {}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

/// Result of a save call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Board written to `path`.
    Saved { path: PathBuf },
    /// User declined to choose a destination.
    Cancelled,
}

/// Board text read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBoard {
    /// Stored JSON text, exactly as persisted.
    pub json: String,
    /// Resolved source path.
    pub path: PathBuf,
    /// Backend the board was read from.
    pub kind: BoardKind,
}

/// Result of a load call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(LoadedBoard),
    /// User declined to choose a source.
    Cancelled,
}

/// Save/load orchestration over the board backends.
pub struct BoardStore<C: PathChooser> {
    chooser: C,
}

impl<C: PathChooser> BoardStore<C> {
    /// Creates a store that asks `chooser` for locations.
    pub fn new(chooser: C) -> Self {
        Self { chooser }
    }

    /// Validates, normalizes and writes a board.
    ///
    /// # Contract
    /// - `EmptyDocument` / `InvalidJson` are returned before the chooser runs.
    /// - The destination's parent directories are created as needed.
    /// - Existing destination contents are replaced.
    pub fn save(&self, kind: BoardKind, json_text: &str) -> StoreResult<SaveOutcome> {
        let started_at = Instant::now();
        info!("event=board_save module=service status=start kind={kind}");

        let result = self.save_inner(kind, json_text);
        match &result {
            Ok(SaveOutcome::Saved { .. }) => info!(
                "event=board_save module=service status=ok kind={} duration_ms={}",
                kind,
                started_at.elapsed().as_millis()
            ),
            Ok(SaveOutcome::Cancelled) => {
                info!("event=board_save module=service status=cancelled kind={kind}")
            }
            Err(err) => error!(
                "event=board_save module=service status=error kind={} duration_ms={} error_code={}",
                kind,
                started_at.elapsed().as_millis(),
                err.code()
            ),
        }
        result
    }

    /// Reads a board from `path`, or from a chooser-selected path when absent.
    ///
    /// # Contract
    /// - `.db` / `.sqlite` files load through SQLite, everything else as text.
    /// - Returned JSON is the stored text, not a re-serialization.
    pub fn load(&self, path: Option<&Path>) -> StoreResult<LoadOutcome> {
        let started_at = Instant::now();
        info!("event=board_load module=service status=start");

        let result = self.load_inner(path);
        match &result {
            Ok(LoadOutcome::Loaded(board)) => info!(
                "event=board_load module=service status=ok kind={} bytes={} duration_ms={}",
                board.kind,
                board.json.len(),
                started_at.elapsed().as_millis()
            ),
            Ok(LoadOutcome::Cancelled) => info!("event=board_load module=service status=cancelled"),
            Err(err) => error!(
                "event=board_load module=service status=error duration_ms={} error_code={}",
                started_at.elapsed().as_millis(),
                err.code()
            ),
        }
        result
    }

    fn save_inner(&self, kind: BoardKind, json_text: &str) -> StoreResult<SaveOutcome> {
        let mut document = parse_board(json_text)?;

        let Some(destination) = self
            .chooser
            .choose_save_destination(kind.default_file_name(), &kind.save_filter())
        else {
            return Ok(SaveOutcome::Cancelled);
        };

        let base_dir = destination
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(base_dir)?;

        normalize_photo_paths(&mut document, base_dir);

        board_repository_for(kind, destination.as_path()).write_board(&document)?;
        Ok(SaveOutcome::Saved { path: destination })
    }

    fn load_inner(&self, path: Option<&Path>) -> StoreResult<LoadOutcome> {
        let explicit = path.filter(|path| !path.as_os_str().is_empty());
        let source = match explicit {
            Some(path) => path.to_path_buf(),
            None => match self.chooser.choose_open_source(&BoardKind::open_filters()) {
                Some(path) => path,
                None => return Ok(LoadOutcome::Cancelled),
            },
        };

        if !source.exists() {
            return Err(StoreError::NotFound(source));
        }

        let kind = BoardKind::from_path(&source);
        let Some(json) = board_repository_for(kind, source.as_path()).read_board()? else {
            return Err(StoreError::NoData(source));
        };
        validate_json(&json)?;

        Ok(LoadOutcome::Loaded(LoadedBoard {
            json,
            path: source,
            kind,
        }))
    }
}

/// Parses board input, rejecting blank text before the JSON parser runs.
pub fn parse_board(json_text: &str) -> StoreResult<Value> {
    if json_text.trim().is_empty() {
        return Err(StoreError::EmptyDocument);
    }
    serde_json::from_str(json_text).map_err(|err| StoreError::InvalidJson(err.to_string()))
}

fn validate_json(text: &str) -> StoreResult<()> {
    serde_json::from_str::<serde::de::IgnoredAny>(text)
        .map(|_| ())
        .map_err(|err| StoreError::InvalidJson(err.to_string()))
}
