// SPDX-FileCopyrightText: 2026 rowkit contributors
// SPDX-License-Identifier: MIT

//! Database handle and statement dispatch.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

use rusqlite::{Connection, OpenFlags, Params, params, params_from_iter};
use tracing::{debug, warn};

use crate::content::Content;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::query::{SelectQuery, build_delete, build_insert, build_update, table_info_sql};

/// Database open mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Read-only access to an existing database
    ReadOnly,
    /// Read-write access to an existing database
    ReadWrite,
    /// Create new database if it doesn't exist
    #[default]
    Create,
}

/// SQLite journal mode applied when a database is opened for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JournalMode {
    Delete,
    Truncate,
    Persist,
    Memory,
    #[default]
    Wal,
    Off,
}

impl JournalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalMode::Delete => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Persist => "PERSIST",
            JournalMode::Memory => "MEMORY",
            JournalMode::Wal => "WAL",
            JournalMode::Off => "OFF",
        }
    }
}

impl fmt::Display for JournalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JournalMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DELETE" => Ok(JournalMode::Delete),
            "TRUNCATE" => Ok(JournalMode::Truncate),
            "PERSIST" => Ok(JournalMode::Persist),
            "MEMORY" => Ok(JournalMode::Memory),
            "WAL" => Ok(JournalMode::Wal),
            "OFF" => Ok(JournalMode::Off),
            _ => Err(format!("unknown journal mode '{s}'")),
        }
    }
}

/// Settings for [`Database::open_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub path: PathBuf,
    pub mode: OpenMode,
    /// How long a statement waits on a locked database before failing
    pub busy_timeout: Duration,
    pub journal_mode: JournalMode,
    pub foreign_keys: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("rowkit.db"),
            mode: OpenMode::Create,
            busy_timeout: Duration::from_secs(5),
            journal_mode: JournalMode::Wal,
            foreign_keys: true,
        }
    }
}

/// An open SQLite database.
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    /// Open or create a database at `path`.
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();
        let db = Self::open_raw(path, mode)?;

        if mode == OpenMode::Create {
            db.configure_pragmas(JournalMode::Wal, true)?;
        }

        debug!("Opened database at {} ({:?})", path.display(), mode);
        Ok(db)
    }

    /// Open a database described by `config`.
    pub fn open_with(config: &DbConfig) -> Result<Self> {
        let db = Self::open_raw(&config.path, config.mode)?;
        db.conn.busy_timeout(config.busy_timeout)?;
        if config.mode != OpenMode::ReadOnly {
            db.configure_pragmas(config.journal_mode, config.foreign_keys)?;
        }

        debug!(
            "Opened database at {} ({:?}, journal {})",
            config.path.display(),
            config.mode,
            config.journal_mode
        );
        Ok(db)
    }

    /// Create an empty in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.configure_pragmas(JournalMode::Memory, true)?;
        debug!("Created in-memory database");
        Ok(db)
    }

    fn open_raw(path: &Path, mode: OpenMode) -> Result<Self> {
        let flags = match mode {
            OpenMode::ReadOnly => {
                if !path.exists() {
                    return Err(Error::DatabaseNotFound(path.to_owned()));
                }
                OpenFlags::SQLITE_OPEN_READ_ONLY
            }
            OpenMode::ReadWrite => {
                if !path.exists() {
                    return Err(Error::DatabaseNotFound(path.to_owned()));
                }
                OpenFlags::SQLITE_OPEN_READ_WRITE
            }
            OpenMode::Create => OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        };

        let conn = Connection::open_with_flags(path, flags).map_err(|e| Error::DatabaseOpen {
            path: path.to_owned(),
            source: e,
        })?;
        Ok(Self { conn })
    }

    fn configure_pragmas(&self, journal_mode: JournalMode, foreign_keys: bool) -> Result<()> {
        let foreign_keys = if foreign_keys { "ON" } else { "OFF" };
        self.conn.execute_batch(&format!(
            "PRAGMA journal_mode = {journal_mode};
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = {foreign_keys};"
        ))?;
        Ok(())
    }

    /// Close the connection, reporting any error the engine raises.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Sqlite(e))?;
        debug!("Closed database");
        Ok(())
    }

    /// Get raw connection (for advanced usage).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get mutable raw connection (for transactions).
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Execute one or more raw SQL statements.
    pub fn exec_sql(&self, sql: &str) -> Result<()> {
        timed("exec", sql, || Ok(self.conn.execute_batch(sql)?))
    }

    /// Run a built `SELECT` and hand the cursor to `f`.
    pub fn query<T, F>(&self, query: &SelectQuery, f: F) -> Result<T>
    where
        F: FnOnce(Cursor<'_>) -> Result<T>,
    {
        let sql = query.build()?;
        self.query_sql(&sql, f)
    }

    /// Run a raw query and hand the cursor to `f`.
    pub fn query_sql<T, F>(&self, sql: &str, f: F) -> Result<T>
    where
        F: FnOnce(Cursor<'_>) -> Result<T>,
    {
        self.query_sql_with(sql, [], f)
    }

    /// Run a raw query with bound parameters and hand the cursor to `f`.
    pub fn query_sql_with<P, T, F>(&self, sql: &str, params: P, f: F) -> Result<T>
    where
        P: Params,
        F: FnOnce(Cursor<'_>) -> Result<T>,
    {
        timed("query", sql, || {
            let mut stmt = self.conn.prepare(sql)?;
            let cursor = Cursor::open(&mut stmt, params)?;
            f(cursor)
        })
    }

    /// Insert `content` as one row of `table`.
    ///
    /// Returns the rowid of the new row.
    pub fn insert(&self, table: &str, content: &Content) -> Result<i64> {
        let sql = build_insert(table, content)?;
        timed("insert", &sql, || {
            let mut stmt = self.conn.prepare_cached(&sql)?;
            stmt.execute(params_from_iter(content.values()))?;
            Ok(self.conn.last_insert_rowid())
        })
    }

    /// Set the columns in `content` on every row matching `filter`.
    ///
    /// Returns the number of rows changed.
    pub fn update(&self, table: &str, content: &Content, filter: Option<&str>) -> Result<usize> {
        let sql = build_update(table, content, filter)?;
        timed("update", &sql, || {
            let mut stmt = self.conn.prepare_cached(&sql)?;
            Ok(stmt.execute(params_from_iter(content.values()))?)
        })
    }

    /// Delete the rows of `table` matching `filter`, or all rows without one.
    ///
    /// Returns the number of rows removed.
    pub fn delete(&self, table: &str, filter: Option<&str>) -> Result<usize> {
        let sql = build_delete(table, filter)?;
        timed("delete", &sql, || Ok(self.conn.execute(&sql, [])?))
    }

    /// Column names of `table` in declaration order.
    ///
    /// Unknown tables yield an empty list.
    pub fn table_info(&self, table: &str) -> Result<Vec<String>> {
        let sql = table_info_sql(table)?;
        let mut stmt = self.conn.prepare(&sql)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    pub fn column_exists(&self, table: &str, column: &str) -> Result<bool> {
        Ok(self.table_info(table)?.iter().any(|c| c == column))
    }

    pub fn table_exists(&self, table: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

/// Run `f`, logging the statement, its outcome and how long it took.
fn timed<T>(op: &str, sql: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    debug!("{op} start: {sql}");
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed().as_millis();
    match &result {
        Ok(_) => debug!("{op} done ({elapsed} ms)"),
        Err(e) => warn!("{op} failed after {elapsed} ms: {sql}: {e}"),
    }
    result
}
