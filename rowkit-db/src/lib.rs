// SPDX-FileCopyrightText: 2026 rowkit contributors
// SPDX-License-Identifier: MIT

//! Row building, query text assembly and result cursors over SQLite.
//!
//! SQL execution, storage and locking are left to SQLite itself (through
//! `rusqlite`); this crate only adds the conveniences around it.
//!
//! # Key Types
//!
//! - [`Content`] - ordered column-name to value map used to build rows
//! - [`Columns`] - projection list for `SELECT`
//! - [`SelectQuery`] and the `build_*` functions - statement text with `?` placeholders
//! - [`Cursor`] - forward-only access to result rows
//! - [`Database`] - opens the engine and dispatches insert/update/delete/query
//!
//! # Example
//!
//! ```no_run
//! use rowkit_db::{Content, Database, OpenMode, SelectQuery};
//!
//! let db = Database::open("example.db", OpenMode::Create)?;
//! db.exec_sql("CREATE TABLE IF NOT EXISTS test (id INTEGER PRIMARY KEY, value INTEGER, data TEXT)")?;
//!
//! let mut content = Content::new();
//! content.insert_int("value", 1);
//! content.insert_text("data", "test");
//! db.insert("test", &content)?;
//!
//! db.query(&SelectQuery::new("test"), |mut cursor| {
//!     while cursor.step()? {
//!         println!("{:?}", cursor.to_content()?);
//!     }
//!     Ok(())
//! })?;
//! # Ok::<(), rowkit_db::Error>(())
//! ```

mod columns;
mod content;
mod cursor;
mod database;
mod error;
mod query;
mod value;

pub use columns::Columns;
pub use content::{Content, Iter};
pub use cursor::Cursor;
pub use database::{Database, DbConfig, JournalMode, OpenMode};
pub use error::{Error, Result};
pub use query::{
    SelectQuery, build_delete, build_insert, build_select, build_update, table_info_sql,
};
pub use value::{Value, ValueType};
