//! Connection bootstrap utilities for board databases.
//!
//! # Responsibility
//! - Open board database files for writing or read-only loading.
//! - Ensure the board schema on writable connections.
//!
//! # Invariants
//! - Writable connections have the `board` table.
//! - Read-only connections fail instead of creating a missing file.

use super::schema::ensure_board_schema;
use super::DbResult;
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens (creating when absent) a board database file for writing.
///
/// # Side effects
/// - Creates the database file and `board` table when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_board_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_bootstrap(conn, started_at)
}

/// Opens an existing board database without write access.
///
/// The schema is not touched; a file without a `board` table surfaces as a
/// query error on first read.
pub fn open_board_db_read_only(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=read_only");

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    match Connection::open_with_flags(path, flags) {
        Ok(conn) => {
            conn.busy_timeout(Duration::from_secs(5))?;
            info!(
                "event=db_open module=db status=ok mode=read_only duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=read_only duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err.into())
        }
    }
}

fn finish_bootstrap(conn: Connection, started_at: Instant) -> DbResult<Connection> {
    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode=file duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    ensure_board_schema(conn)?;
    Ok(())
}
