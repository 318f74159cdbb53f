// SPDX-FileCopyrightText: 2026 rowkit contributors
// SPDX-License-Identifier: MIT

//! Error types for database operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or running statements.
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to open database with context
    #[error("Failed to open database at '{path}': {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Database file not found
    #[error("Database not found at: {0}")]
    DatabaseNotFound(PathBuf),

    /// A statement was requested without a table name
    #[error("Table name is empty")]
    EmptyTableName,

    /// INSERT or UPDATE was requested with no columns to write
    #[error("{statement} requires at least one column")]
    EmptyContent { statement: &'static str },

    /// HAVING is only meaningful together with GROUP BY
    #[error("HAVING clauses are only permitted when using a GROUP BY clause")]
    HavingWithoutGroupBy,

    /// A column accessor was called before `step()` or after the last row
    #[error("Cursor is not positioned on a row")]
    NoCurrentRow,

    /// Column index past the end of the result set
    #[error("Column index {index} out of range ({count} columns)")]
    ColumnOutOfRange { index: usize, count: usize },
}
