// SPDX-FileCopyrightText: 2026 rowkit contributors
// SPDX-License-Identifier: MIT

//! Subcommand implementations. Output goes to the given writer so callers
//! can capture it.

use std::io::Write;

use log::info;
use rowkit_db::{Content, Database, SelectQuery, Value, ValueType};

use crate::error::{CliError, IoContext};

fn write_err() -> String {
    "Failed to write output".to_string()
}

/// Create a `test` table, fill it through both entry points and print it back.
pub fn demo(db: &Database, out: &mut impl Write) -> Result<(), CliError> {
    db.exec_sql(
        "CREATE TABLE IF NOT EXISTS test (id INTEGER PRIMARY KEY, value INTEGER, data TEXT)",
    )?;

    let mut content = Content::new();
    content.insert_int("value", 1);
    content.insert_text("data", "test");
    let rowid = db.insert("test", &content)?;
    info!("Inserted row {rowid} from content");

    db.exec_sql("INSERT INTO test VALUES (NULL, 2, 'test')")?;

    let lines = db.query(&SelectQuery::new("test"), |mut cursor| {
        let mut lines = Vec::new();
        while cursor.step()? {
            for col in 0..cursor.column_count() {
                let name = cursor.column_name(col).unwrap_or_default();
                match cursor.column_type(col)? {
                    ValueType::Integer => lines.push(format!("{name}, {}", cursor.get_int(col)?)),
                    ValueType::Text => lines.push(format!(
                        "{name}, {}",
                        cursor.get_text(col)?.unwrap_or_default()
                    )),
                    _ => {}
                }
            }
        }
        Ok(lines)
    })?;
    write_lines(out, &lines)
}

/// Run raw SQL.
pub fn exec(db: &Database, sql: &str) -> Result<(), CliError> {
    db.exec_sql(sql)?;
    Ok(())
}

/// Print the rows of `query` as a tab-separated table with a header line.
///
/// Returns the number of rows printed.
pub fn query(db: &Database, query: &SelectQuery, out: &mut impl Write) -> Result<usize, CliError> {
    let lines = db.query(query, |mut cursor| {
        let mut lines = vec![cursor.column_names().join("\t")];
        while cursor.step()? {
            let cells = (0..cursor.column_count())
                .map(|col| cursor.value(col).map(Value::to_string))
                .collect::<rowkit_db::Result<Vec<_>>>()?;
            lines.push(cells.join("\t"));
        }
        Ok(lines)
    })?;
    write_lines(out, &lines)?;
    Ok(lines.len() - 1)
}

/// Insert one row built from `key=value` assignments.
pub fn insert(db: &Database, table: &str, assignments: &[String]) -> Result<i64, CliError> {
    let content = assignments
        .iter()
        .map(|a| parse_assignment(a))
        .collect::<Result<Content, CliError>>()?;
    Ok(db.insert(table, &content)?)
}

/// Print the column names of `table`, one per line.
pub fn columns(db: &Database, table: &str, out: &mut impl Write) -> Result<(), CliError> {
    if !db.table_exists(table)? {
        return Err(CliError::invalid_argument(format!("no such table: {table}")));
    }
    for name in db.table_info(table)? {
        writeln!(out, "{name}").io_context(write_err)?;
    }
    Ok(())
}

/// Split `key=value`. The value is read as an integer, then a finite real,
/// then text; the literal `NULL` becomes a null value. Words like `nan` or
/// `inf` stay text.
pub fn parse_assignment(assignment: &str) -> Result<(String, Value), CliError> {
    let (key, raw) = assignment.split_once('=').ok_or_else(|| {
        CliError::invalid_argument(format!("expected key=value, got '{assignment}'"))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "missing column name in '{assignment}'"
        )));
    }

    let value = if raw == "NULL" {
        Value::Null
    } else if let Ok(i) = raw.parse::<i64>() {
        Value::Integer(i)
    } else if let Some(r) = raw.parse::<f64>().ok().filter(|r| r.is_finite()) {
        Value::Real(r)
    } else {
        Value::Text(raw.to_string())
    };
    Ok((key.to_string(), value))
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> Result<(), CliError> {
    for line in lines {
        writeln!(out, "{line}").io_context(write_err)?;
    }
    Ok(())
}
