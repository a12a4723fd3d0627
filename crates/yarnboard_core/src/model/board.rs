//! Board storage kinds and file filter metadata.
//!
//! # Responsibility
//! - Name the two persisted board formats and their wire tags.
//! - Map host format strings and file extensions onto a format.
//!
//! # Invariants
//! - `.db` and `.sqlite` (case-insensitive) always map to `BoardKind::Sqlite`.
//! - Every other extension, or none, maps to `BoardKind::Yb`.
//! - The extensions offered when saving SQLite boards are exactly the ones
//!   recognized when loading, so boards round-trip without a format hint.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::Path;

const YB_EXTENSIONS: &[&str] = &["yb"];
const SQLITE_EXTENSIONS: &[&str] = &["db", "sqlite"];

/// Persisted board format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardKind {
    /// Flat JSON text file (`.yb`).
    Yb,
    /// Single-row SQLite database file (`.db` / `.sqlite`).
    Sqlite,
}

impl BoardKind {
    /// Maps a host-supplied format string onto a board kind.
    ///
    /// Matching is case-insensitive. Unknown values fall back to `Yb` so a
    /// host typo never blocks a save.
    pub fn from_format(format: &str) -> Self {
        if format.trim().eq_ignore_ascii_case("sqlite") {
            Self::Sqlite
        } else {
            Self::Yb
        }
    }

    /// Infers the board kind from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let is_sqlite = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                SQLITE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);

        if is_sqlite {
            Self::Sqlite
        } else {
            Self::Yb
        }
    }

    /// Stable wire tag (`yb` or `sqlite`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yb => "yb",
            Self::Sqlite => "sqlite",
        }
    }

    /// File name suggested by the save chooser.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Yb => "board.yb",
            Self::Sqlite => "board.db",
        }
    }

    /// Filter offered by the save chooser for this kind.
    pub fn save_filter(self) -> FileFilter {
        match self {
            Self::Yb => FileFilter::new("YarnBoard", YB_EXTENSIONS),
            Self::Sqlite => FileFilter::new("SQLite Board", SQLITE_EXTENSIONS),
        }
    }

    /// Filters offered by the open chooser.
    ///
    /// The combined filter comes first: some native dialogs only expose the
    /// first entry.
    pub fn open_filters() -> Vec<FileFilter> {
        vec![
            FileFilter::new("YarnBoard", &["yb", "db", "sqlite"]),
            FileFilter::new("YarnBoard", YB_EXTENSIONS),
            FileFilter::new("SQLite Board", SQLITE_EXTENSIONS),
            FileFilter::new("All files", &["*"]),
        ]
    }
}

impl Display for BoardKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named extension filter handed to path choosers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// Human-readable label, e.g. `SQLite Board`.
    pub name: String,
    /// Extensions without leading dot. `*` means any file.
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|ext| (*ext).to_string()).collect(),
        }
    }

    /// Dialog label in the `Name (*.a;*.b)` convention.
    pub fn label(&self) -> String {
        let patterns = self
            .extensions
            .iter()
            .map(|ext| format!("*.{ext}"))
            .collect::<Vec<_>>()
            .join(";");
        format!("{} ({patterns})", self.name)
    }
}
