// SPDX-FileCopyrightText: 2026 rowkit contributors
// SPDX-License-Identifier: MIT

//! Forward-only cursor over a prepared statement's result rows.

use std::borrow::Cow;

use rusqlite::{Params, Rows, Statement};
use tracing::debug;

use crate::content::Content;
use crate::error::{Error, Result};
use crate::value::{Value, ValueType};

/// Forward-only cursor.
///
/// A fresh cursor sits before the first row; call [`Cursor::step`] to move
/// onto each row in turn. Column accessors read the current row and apply
/// SQLite's usual type coercions.
pub struct Cursor<'stmt> {
    rows: Rows<'stmt>,
    columns: Vec<String>,
    current: Option<Vec<Value>>,
    done: bool,
}

impl<'stmt> Cursor<'stmt> {
    /// Start executing `stmt` with `params`.
    pub fn open<P: Params>(stmt: &'stmt mut Statement<'_>, params: P) -> Result<Self> {
        let columns = stmt
            .column_names()
            .into_iter()
            .map(str::to_owned)
            .collect();
        let rows = stmt.query(params)?;
        Ok(Self {
            rows,
            columns,
            current: None,
            done: false,
        })
    }

    /// Advance to the next row.
    ///
    /// Returns `false` once every row has been consumed, and keeps returning
    /// `false` afterwards. After an error there is no current row.
    pub fn step(&mut self) -> Result<bool> {
        if self.done {
            return Ok(false);
        }

        self.current = None;
        match self.rows.next()? {
            Some(row) => {
                let values = (0..self.columns.len())
                    .map(|i| row.get_ref(i).map(Value::from))
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                self.current = Some(values);
                Ok(true)
            }
            None => {
                debug!("Processed all rows");
                self.done = true;
                Ok(false)
            }
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_name(&self, col: usize) -> Option<&str> {
        self.columns.get(col).map(String::as_str)
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Position of the first column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Raw value of column `col` in the current row.
    pub fn value(&self, col: usize) -> Result<&Value> {
        let row = self.current.as_ref().ok_or(Error::NoCurrentRow)?;
        row.get(col).ok_or(Error::ColumnOutOfRange {
            index: col,
            count: self.columns.len(),
        })
    }

    pub fn column_type(&self, col: usize) -> Result<ValueType> {
        Ok(self.value(col)?.value_type())
    }

    pub fn get_int(&self, col: usize) -> Result<i64> {
        Ok(self.value(col)?.to_integer())
    }

    pub fn get_real(&self, col: usize) -> Result<f64> {
        Ok(self.value(col)?.to_real())
    }

    /// Column as text; `None` for NULL, numbers are formatted.
    pub fn get_text(&self, col: usize) -> Result<Option<Cow<'_, str>>> {
        Ok(self.value(col)?.to_text())
    }

    /// Column bytes for blob and text values, `None` otherwise.
    pub fn get_blob(&self, col: usize) -> Result<Option<&[u8]>> {
        Ok(match self.value(col)? {
            Value::Blob(b) => Some(b.as_slice()),
            Value::Text(s) => Some(s.as_bytes()),
            _ => None,
        })
    }

    /// The current row keyed by column name.
    ///
    /// When a result set repeats a column name the last occurrence wins.
    pub fn to_content(&self) -> Result<Content> {
        let row = self.current.as_ref().ok_or(Error::NoCurrentRow)?;
        Ok(self.columns.iter().cloned().zip(row.iter().cloned()).collect())
    }

    /// Consume the remaining rows.
    pub fn collect_contents(mut self) -> Result<Vec<Content>> {
        let mut out = Vec::new();
        while self.step()? {
            out.push(self.to_content()?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rusqlite::Connection;

    use super::*;

    fn fixture() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE t (id INTEGER PRIMARY KEY, n INTEGER, r REAL, s TEXT, b BLOB);
            INSERT INTO t VALUES (1, 10, 1.5, '7up', x'0102');
            INSERT INTO t VALUES (2, NULL, NULL, NULL, NULL);
            "#,
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_step_and_accessors() {
        let conn = fixture();
        let mut stmt = conn.prepare("SELECT id, n, r, s, b FROM t ORDER BY id").unwrap();
        let mut cursor = Cursor::open(&mut stmt, []).unwrap();

        assert_eq!(cursor.column_count(), 5);
        assert_eq!(cursor.column_name(3), Some("s"));
        assert_eq!(cursor.column_name(5), None);
        assert_eq!(cursor.column_index("r"), Some(2));
        assert_eq!(cursor.column_index("R"), None);
        assert!(matches!(cursor.value(0), Err(Error::NoCurrentRow)));

        assert!(cursor.step().unwrap());
        assert_eq!(cursor.get_int(0).unwrap(), 1);
        assert_eq!(cursor.column_type(1).unwrap(), ValueType::Integer);
        assert_eq!(cursor.get_real(2).unwrap(), 1.5);
        assert_eq!(cursor.get_text(3).unwrap().as_deref(), Some("7up"));
        assert_eq!(cursor.get_int(3).unwrap(), 7);
        assert_eq!(cursor.get_blob(4).unwrap(), Some(&[1u8, 2][..]));
        assert_eq!(cursor.column_type(4).unwrap(), ValueType::Blob);

        assert!(cursor.step().unwrap());
        assert_eq!(cursor.column_type(1).unwrap(), ValueType::Null);
        assert_eq!(cursor.get_int(1).unwrap(), 0);
        assert_eq!(cursor.get_text(3).unwrap(), None);

        assert!(!cursor.step().unwrap());
        assert!(!cursor.step().unwrap());
        assert!(matches!(cursor.get_int(0), Err(Error::NoCurrentRow)));
    }

    #[test]
    fn test_column_out_of_range() {
        let conn = fixture();
        let mut stmt = conn.prepare("SELECT id FROM t").unwrap();
        let mut cursor = Cursor::open(&mut stmt, []).unwrap();
        assert!(cursor.step().unwrap());

        match cursor.get_int(3) {
            Err(Error::ColumnOutOfRange { index, count }) => {
                assert_eq!(index, 3);
                assert_eq!(count, 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_params_and_contents() {
        let conn = fixture();
        let mut stmt = conn.prepare("SELECT id, s FROM t WHERE id >= ?1").unwrap();
        let rows = Cursor::open(&mut stmt, [1]).unwrap().collect_contents().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get_int("id"), Some(1));
        assert_eq!(rows[0].get_text("s"), Some("7up"));
        assert_eq!(rows[1].value_type("s"), Some(ValueType::Null));
    }

    #[test]
    fn test_empty_result() {
        let conn = fixture();
        let mut stmt = conn.prepare("SELECT * FROM t WHERE id > 100").unwrap();
        let mut cursor = Cursor::open(&mut stmt, []).unwrap();
        assert_eq!(cursor.column_count(), 5);
        assert!(!cursor.step().unwrap());
    }

    #[test]
    fn test_failed_step_clears_row() {
        let conn = Connection::open_in_memory().unwrap();
        let mut stmt = conn
            .prepare("SELECT abs(column1) FROM (VALUES (1), (-9223372036854775808))")
            .unwrap();
        let mut cursor = Cursor::open(&mut stmt, []).unwrap();

        assert!(cursor.step().unwrap());
        assert_eq!(cursor.get_int(0).unwrap(), 1);

        match cursor.step() {
            Err(Error::Sqlite(e)) => assert!(e.to_string().contains("integer overflow")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(cursor.value(0), Err(Error::NoCurrentRow)));
        assert!(matches!(cursor.to_content(), Err(Error::NoCurrentRow)));
    }

    /// Each accessor must agree with the engine's own CAST of the same expression.
    #[rstest]
    #[case::integer("7")]
    #[case::exponent_text("'1e3'")]
    #[case::fraction_text("'3.9'")]
    #[case::padded_text("'  42abc'")]
    #[case::signed_text("'+12.5e1'")]
    #[case::overflow_text("'99999999999999999999'")]
    #[case::negative_overflow_text("'-99999999999999999999'")]
    #[case::rounded_sum("0.1 + 0.2")]
    #[case::seventeen_digits("123456789.123456789")]
    #[case::fifteen_digit_integer("123456789012345.0")]
    #[case::integral_real("100.0")]
    #[case::negative_real("-2.5")]
    #[case::large_real("1e20")]
    #[case::huge_real("1.5e300")]
    #[case::tiny_real("1.5e-7")]
    #[case::third("1.0 / 3")]
    fn test_coercion_matches_engine(#[case] expr: &str) {
        let conn = Connection::open_in_memory().unwrap();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {expr}, CAST({expr} AS INTEGER), CAST({expr} AS REAL), CAST({expr} AS TEXT)"
            ))
            .unwrap();
        let mut cursor = Cursor::open(&mut stmt, []).unwrap();
        assert!(cursor.step().unwrap());

        assert_eq!(
            Some(cursor.get_int(0).unwrap()),
            cursor.value(1).unwrap().as_integer(),
            "integer of {expr}"
        );
        assert_eq!(
            Some(cursor.get_real(0).unwrap()),
            cursor.value(2).unwrap().as_real(),
            "real of {expr}"
        );
        assert_eq!(
            cursor.get_text(0).unwrap().as_deref(),
            cursor.value(3).unwrap().as_text(),
            "text of {expr}"
        );
    }
}
