//! Board table schema.
//!
//! The whole backend is one table with one row after every successful save.

use crate::db::DbResult;
use rusqlite::Connection;

/// Name of the only table in a board database.
pub const BOARD_TABLE: &str = "board";

const CREATE_BOARD_TABLE_SQL: &str =
    "CREATE TABLE IF NOT EXISTS board (id INTEGER PRIMARY KEY, json TEXT NOT NULL);";

/// Creates the board table when missing. Existing rows are left alone.
pub fn ensure_board_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_BOARD_TABLE_SQL)?;
    Ok(())
}
