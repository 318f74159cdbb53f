// SPDX-FileCopyrightText: 2026 rowkit contributors
// SPDX-License-Identifier: MIT

//! SQL statement text builders.
//!
//! These are pure functions: they only assemble statement text with `?`
//! placeholders and never touch a connection. Identifiers and clause bodies
//! are inserted verbatim, so callers are responsible for quoting.

use crate::columns::Columns;
use crate::content::Content;
use crate::error::{Error, Result};

/// Builder for `SELECT` statements.
///
/// Empty or whitespace-only clauses are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    table: String,
    distinct: bool,
    columns: Columns,
    filter: Option<String>,
    group_by: Option<String>,
    having: Option<String>,
    order_by: Option<String>,
    limit: Option<String>,
}

impl SelectQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// Project these columns instead of `*`.
    pub fn columns(mut self, columns: impl Into<Columns>) -> Self {
        self.columns = columns.into();
        self
    }

    /// `WHERE` clause body.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn group_by(mut self, group_by: impl Into<String>) -> Self {
        self.group_by = Some(group_by.into());
        self
    }

    pub fn having(mut self, having: impl Into<String>) -> Self {
        self.having = Some(having.into());
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// `LIMIT` clause body, e.g. `"10"` or `"10 OFFSET 20"`.
    pub fn limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn build(&self) -> Result<String> {
        let table = require_table(&self.table)?;
        if clause(self.group_by.as_deref()).is_none() && clause(self.having.as_deref()).is_some()
        {
            return Err(Error::HavingWithoutGroupBy);
        }

        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
        }
        sql.push_str(" FROM ");
        sql.push_str(table);
        push_clause(&mut sql, " WHERE ", self.filter.as_deref());
        push_clause(&mut sql, " GROUP BY ", self.group_by.as_deref());
        push_clause(&mut sql, " HAVING ", self.having.as_deref());
        push_clause(&mut sql, " ORDER BY ", self.order_by.as_deref());
        push_clause(&mut sql, " LIMIT ", self.limit.as_deref());
        Ok(sql)
    }
}

/// Build a `SELECT` statement from positional clauses.
#[allow(clippy::too_many_arguments)]
pub fn build_select(
    distinct: bool,
    table: &str,
    columns: &Columns,
    filter: Option<&str>,
    group_by: Option<&str>,
    having: Option<&str>,
    order_by: Option<&str>,
    limit: Option<&str>,
) -> Result<String> {
    SelectQuery {
        table: table.to_owned(),
        distinct,
        columns: columns.clone(),
        filter: filter.map(str::to_owned),
        group_by: group_by.map(str::to_owned),
        having: having.map(str::to_owned),
        order_by: order_by.map(str::to_owned),
        limit: limit.map(str::to_owned),
    }
    .build()
}

/// Build `INSERT INTO table(k1, k2) VALUES (?, ?)` for the keys of `content`.
pub fn build_insert(table: &str, content: &Content) -> Result<String> {
    let table = require_table(table)?;
    if content.is_empty() {
        return Err(Error::EmptyContent {
            statement: "INSERT",
        });
    }

    let keys: Vec<&str> = content.keys().collect();
    let placeholders = vec!["?"; keys.len()];
    Ok(format!(
        "INSERT INTO {table}({}) VALUES ({})",
        keys.join(", "),
        placeholders.join(", ")
    ))
}

/// Build `UPDATE table SET k1 = ?, k2 = ?[ WHERE filter]`.
pub fn build_update(table: &str, content: &Content, filter: Option<&str>) -> Result<String> {
    let table = require_table(table)?;
    if content.is_empty() {
        return Err(Error::EmptyContent {
            statement: "UPDATE",
        });
    }

    let assignments: Vec<String> = content.keys().map(|k| format!("{k} = ?")).collect();
    let mut sql = format!("UPDATE {table} SET {}", assignments.join(", "));
    push_clause(&mut sql, " WHERE ", filter);
    Ok(sql)
}

/// Build `DELETE FROM table[ WHERE filter]`.
///
/// Without a filter the statement removes every row.
pub fn build_delete(table: &str, filter: Option<&str>) -> Result<String> {
    let table = require_table(table)?;
    let mut sql = format!("DELETE FROM {table}");
    push_clause(&mut sql, " WHERE ", filter);
    Ok(sql)
}

pub fn table_info_sql(table: &str) -> Result<String> {
    let table = require_table(table)?;
    Ok(format!("PRAGMA table_info({table})"))
}

fn require_table(table: &str) -> Result<&str> {
    if table.trim().is_empty() {
        return Err(Error::EmptyTableName);
    }
    Ok(table)
}

fn clause(body: Option<&str>) -> Option<&str> {
    body.filter(|b| !b.trim().is_empty())
}

fn push_clause(sql: &mut String, keyword: &str, body: Option<&str>) {
    if let Some(body) = clause(body) {
        sql.push_str(keyword);
        sql.push_str(body);
    }
}
