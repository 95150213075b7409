//! Database Module
//!
//! Read-only access to the `users` table. Every failure is tagged with the
//! phase it happened in so callers can tell connectivity problems from
//! schema problems.

use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use thiserror::Error;

/// Exact-match lookup; both values are bound, never interpolated.
pub const FIND_USER_SQL: &str =
    "SELECT id FROM users WHERE unique_code = ?1 AND password = ?2 LIMIT 1";

/// VM instructions between deadline checks
const PROGRESS_INTERVAL: i32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Open,
    Prepare,
    Query,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::Prepare => "prepare",
            Self::Query => "query",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("{source}")]
pub struct DbError {
    pub phase: Phase,
    #[source]
    pub source: rusqlite::Error,
}

impl DbError {
    fn at(phase: Phase) -> impl Fn(rusqlite::Error) -> Self {
        move |source| Self { phase, source }
    }

    pub fn code(&self) -> Option<rusqlite::ErrorCode> {
        self.source.sqlite_error_code()
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Open an existing database read-only.
///
/// `busy_timeout` bounds the wait for a locked database. Any statement still
/// running once `deadline` has elapsed (measured from now) is interrupted.
pub fn open_read_only(
    path: &Path,
    busy_timeout: Duration,
    deadline: Duration,
) -> DbResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags).map_err(DbError::at(Phase::Open))?;
    conn.busy_timeout(busy_timeout).map_err(DbError::at(Phase::Open))?;

    let started = Instant::now();
    conn.progress_handler(PROGRESS_INTERVAL, Some(move || started.elapsed() > deadline));

    Ok(conn)
}

/// Id of the user whose unique code and password both match, if any.
pub fn find_user_id(conn: &Connection, unique_code: &str, password: &str) -> DbResult<Option<i64>> {
    let mut stmt = conn.prepare(FIND_USER_SQL).map_err(DbError::at(Phase::Prepare))?;
    stmt.query_row(params![unique_code, password], |row| row.get(0))
        .optional()
        .map_err(DbError::at(Phase::Query))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const USERS_SCHEMA: &str = "CREATE TABLE users (
        id INTEGER PRIMARY KEY,
        unique_code TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )";

    pub(crate) fn seed_users(conn: &Connection) {
        conn.execute_batch(USERS_SCHEMA).unwrap();
        let users = [
            (7, "ABC123", "hunter2"),
            (8, "XYZ789", "correct horse"),
            (9, "' OR '1'='1", "' OR '1'='1"),
        ];
        for (id, code, password) in users {
            conn.execute(
                "INSERT INTO users (id, unique_code, password) VALUES (?1, ?2, ?3)",
                params![id, code, password],
            )
            .unwrap();
        }
    }

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        seed_users(&conn);
        conn
    }

    #[test]
    fn test_find_matching_user() {
        let conn = memory_db();
        assert_eq!(find_user_id(&conn, "ABC123", "hunter2").unwrap(), Some(7));
        assert_eq!(find_user_id(&conn, "XYZ789", "correct horse").unwrap(), Some(8));
    }

    #[test]
    fn test_no_match() {
        let conn = memory_db();
        assert_eq!(find_user_id(&conn, "ABC123", "wrong").unwrap(), None);
        assert_eq!(find_user_id(&conn, "NOPE", "hunter2").unwrap(), None);
        assert_eq!(find_user_id(&conn, "NOPE", "wrong").unwrap(), None);
    }

    #[test]
    fn test_comparison_is_exact() {
        let conn = memory_db();
        assert_eq!(find_user_id(&conn, "abc123", "hunter2").unwrap(), None);
        assert_eq!(find_user_id(&conn, "ABC123", "Hunter2").unwrap(), None);
        assert_eq!(find_user_id(&conn, "ABC12%", "hunter2").unwrap(), None);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let conn = memory_db();
        assert_eq!(find_user_id(&conn, "ABC123", "' OR '1'='1").unwrap(), None);
        assert_eq!(find_user_id(&conn, "' OR '1'='1' --", "x").unwrap(), None);
        // Only the record whose stored values are these literal strings
        assert_eq!(find_user_id(&conn, "' OR '1'='1", "' OR '1'='1").unwrap(), Some(9));
    }

    #[test]
    fn test_missing_table_fails_at_prepare() {
        let conn = Connection::open_in_memory().unwrap();
        let err = find_user_id(&conn, "ABC123", "hunter2").unwrap_err();
        assert_eq!(err.phase, Phase::Prepare);
        assert!(err.to_string().contains("no such table"));
    }

    #[test]
    fn test_null_id_fails_at_query() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE users (id INTEGER, unique_code TEXT, password TEXT);
             INSERT INTO users VALUES (NULL, 'ABC123', 'hunter2');",
        )
        .unwrap();
        let err = find_user_id(&conn, "ABC123", "hunter2").unwrap_err();
        assert_eq!(err.phase, Phase::Query);
    }

    #[test]
    fn test_open_missing_file_fails_at_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let err =
            open_read_only(&path, Duration::from_secs(1), Duration::from_secs(2)).unwrap_err();
        assert_eq!(err.phase, Phase::Open);
        assert!(!path.exists());
    }
}
