//! Board repository contracts and the two storage backends.
//!
//! # Responsibility
//! - Write a board document as the complete contents of one store.
//! - Read the stored board back as raw JSON text.
//!
//! # Invariants
//! - Flat-file writes replace the destination atomically (temp file + rename).
//! - SQLite writes leave exactly one row in `board`, inside one transaction.
//! - Reads return stored text verbatim; validation belongs to the caller.

use crate::db::{open_board_db, open_board_db_read_only, DbError};
use crate::model::board::BoardKind;
use log::{error, info};
use rusqlite::{params, OptionalExtension};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::{Builder, NamedTempFile};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for board persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize board: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Repository interface over one board store location.
pub trait BoardRepository {
    /// Storage format of this repository.
    fn kind(&self) -> BoardKind;
    /// Replaces the stored board with `document`, serialized compactly.
    fn write_board(&self, document: &Value) -> RepoResult<()>;
    /// Returns the stored JSON text, or `None` when the store holds no board.
    fn read_board(&self) -> RepoResult<Option<String>>;
}

/// Returns the repository implementation for `kind` at `path`.
pub fn board_repository_for(kind: BoardKind, path: impl Into<PathBuf>) -> Box<dyn BoardRepository> {
    match kind {
        BoardKind::Yb => Box::new(FlatFileBoardRepository::new(path)),
        BoardKind::Sqlite => Box::new(SqliteBoardRepository::new(path)),
    }
}

/// Board stored as the entire contents of one UTF-8 JSON file.
#[derive(Debug, Clone)]
pub struct FlatFileBoardRepository {
    path: PathBuf,
}

impl FlatFileBoardRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Temp file that takes over the destination's mode on rename.
    ///
    /// New boards get `0o666` filtered by the umask, like a plain write;
    /// overwritten boards keep their existing permissions.
    fn temp_file_in(&self, dir: &Path) -> std::io::Result<NamedTempFile> {
        let existing = fs::metadata(&self.path).ok().map(|meta| meta.permissions());

        let mut builder = Builder::new();
        builder.prefix(".yarnboard-");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }

        let temp = builder.tempfile_in(dir)?;
        if let Some(permissions) = existing {
            temp.as_file().set_permissions(permissions)?;
        }
        Ok(temp)
    }
}

impl BoardRepository for FlatFileBoardRepository {
    fn kind(&self) -> BoardKind {
        BoardKind::Yb
    }

    fn write_board(&self, document: &Value) -> RepoResult<()> {
        let started_at = Instant::now();
        let text = serde_json::to_string(document)?;

        // Temp file must share the destination's filesystem for the rename.
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let result = self.temp_file_in(dir).and_then(|mut temp| {
            temp.write_all(text.as_bytes())?;
            temp.as_file().sync_all()?;
            temp.persist(&self.path).map(|_| ()).map_err(|err| err.error)
        });

        match result {
            Ok(()) => {
                info!(
                    "event=board_write module=repo status=ok kind=yb bytes={} duration_ms={}",
                    text.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=board_write module=repo status=error kind=yb duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    fn read_board(&self) -> RepoResult<Option<String>> {
        let text = fs::read_to_string(&self.path)?;
        Ok(Some(text))
    }
}

/// Board stored as the only row of the `board` table in a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteBoardRepository {
    path: PathBuf,
}

impl SqliteBoardRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BoardRepository for SqliteBoardRepository {
    fn kind(&self) -> BoardKind {
        BoardKind::Sqlite
    }

    fn write_board(&self, document: &Value) -> RepoResult<()> {
        let started_at = Instant::now();
        let text = serde_json::to_string(document)?;

        let mut conn = open_board_db(&self.path)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM board;", [])?;
        tx.execute("INSERT INTO board (json) VALUES (?1);", params![text])?;
        tx.commit()?;

        info!(
            "event=board_write module=repo status=ok kind=sqlite bytes={} duration_ms={}",
            text.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn read_board(&self) -> RepoResult<Option<String>> {
        let conn = open_board_db_read_only(&self.path)?;
        let text = conn
            .query_row("SELECT json FROM board ORDER BY id LIMIT 1;", [], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(text)
    }
}
