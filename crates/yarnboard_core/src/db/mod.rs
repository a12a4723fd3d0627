//! SQLite storage bootstrap for single-row board databases.
//!
//! # Responsibility
//! - Open board database files for writing (creating them when absent) or
//!   read-only for loading.
//! - Own the one-table board schema.
//!
//! # Invariants
//! - Writable connections have the `board` table before they are returned.
//! - Read-only connections never create files or tables.
//! - Connections are short-lived: opened and dropped within one store call.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_board_db, open_board_db_read_only};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
