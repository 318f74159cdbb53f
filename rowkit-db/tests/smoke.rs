// SPDX-FileCopyrightText: 2026 rowkit contributors
// SPDX-License-Identifier: MIT

//! Smoke tests for rowkit-db.
//!
//! These tests drive the public API end to end against in-memory and
//! on-disk databases.

use rowkit_db::{
    Columns, Content, Database, DbConfig, Error, JournalMode, OpenMode, SelectQuery, Value,
    ValueType,
};

const CREATE_TEST: &str =
    "CREATE TABLE IF NOT EXISTS test (id INTEGER PRIMARY KEY, value INTEGER, data TEXT)";

fn row(value: i64, data: &str) -> Content {
    let mut content = Content::new();
    content.insert_int("value", value);
    content.insert_text("data", data);
    content
}

fn test_db() -> Database {
    let db = Database::open_memory().unwrap();
    db.exec_sql(CREATE_TEST).unwrap();
    db
}

/// Insert through content and raw SQL, then read everything back.
#[test]
fn test_insert_and_query() {
    let db = test_db();

    let id = db.insert("test", &row(1, "test")).unwrap();
    assert_eq!(id, 1);
    db.exec_sql("INSERT INTO test VALUES (NULL, 2, 'test')")
        .unwrap();

    let rows = db
        .query(&SelectQuery::new("test").order_by("id"), |cursor| {
            cursor.collect_contents()
        })
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get_int("id"), Some(1));
    assert_eq!(rows[0].get_int("value"), Some(1));
    assert_eq!(rows[1].get_int("value"), Some(2));
    assert_eq!(rows[1].get_text("data"), Some("test"));
}

/// Walk a cursor column by column the way a caller printing rows would.
#[test]
fn test_cursor_walk() {
    let db = test_db();
    db.insert("test", &row(7, "seven")).unwrap();

    let seen = db
        .query_sql("SELECT id, value, data FROM test", |mut cursor| {
            let mut seen = Vec::new();
            while cursor.step()? {
                for col in 0..cursor.column_count() {
                    let name = cursor.column_name(col).unwrap_or_default().to_owned();
                    match cursor.column_type(col)? {
                        ValueType::Integer => seen.push((name, cursor.get_int(col)?.to_string())),
                        ValueType::Text => {
                            seen.push((name, cursor.get_text(col)?.unwrap_or_default().into_owned()))
                        }
                        _ => {}
                    }
                }
            }
            Ok(seen)
        })
        .unwrap();

    assert_eq!(
        seen,
        vec![
            ("id".to_owned(), "1".to_owned()),
            ("value".to_owned(), "7".to_owned()),
            ("data".to_owned(), "seven".to_owned()),
        ]
    );
}

/// Content values bind positionally in insertion order, including NULL and blobs.
#[test]
fn test_binding_types() {
    let db = Database::open_memory().unwrap();
    db.exec_sql("CREATE TABLE t (a TEXT, b INTEGER, c REAL, d BLOB, e TEXT)")
        .unwrap();

    let mut content = Content::new();
    content.insert_text("a", "x");
    content.insert_int("b", i64::MAX);
    content.insert_real("c", 2.25);
    content.insert_blob("d", vec![0u8, 255]);
    content.insert_null("e");
    db.insert("t", &content).unwrap();

    let back = db
        .query_sql("SELECT a, b, c, d, e FROM t", |cursor| cursor.collect_contents())
        .unwrap();
    assert_eq!(back, vec![content]);
}

#[test]
fn test_update_and_delete() {
    let db = test_db();
    for i in 1..=4 {
        db.insert("test", &row(i, "old")).unwrap();
    }

    let mut change = Content::new();
    change.insert_text("data", "new");
    assert_eq!(db.update("test", &change, Some("value > 2")).unwrap(), 2);

    let count_new = |db: &Database| {
        db.query(
            &SelectQuery::new("test")
                .columns(["count(*)"])
                .filter("data = 'new'"),
            |mut cursor| {
                cursor.step()?;
                cursor.get_int(0)
            },
        )
        .unwrap()
    };
    assert_eq!(count_new(&db), 2);

    assert_eq!(db.delete("test", Some("data = 'new'")).unwrap(), 2);
    assert_eq!(count_new(&db), 0);

    assert_eq!(db.delete("test", None).unwrap(), 2);
}

#[test]
fn test_update_without_filter_touches_all_rows() {
    let db = test_db();
    db.insert("test", &row(1, "a")).unwrap();
    db.insert("test", &row(2, "b")).unwrap();

    let change: Content = [("value", Value::Null)].into_iter().collect();
    assert_eq!(db.update("test", &change, None).unwrap(), 2);
}

#[test]
fn test_grouped_query() {
    let db = test_db();
    for (value, data) in [(1, "a"), (2, "a"), (3, "b"), (4, "c"), (5, "c"), (6, "c")] {
        db.insert("test", &row(value, data)).unwrap();
    }

    let query = SelectQuery::new("test")
        .distinct(false)
        .columns(Columns::from(["data", "count(*) AS n"]))
        .group_by("data")
        .having("count(*) > 1")
        .order_by("n DESC")
        .limit("1");
    let top = db.query(&query, |cursor| cursor.collect_contents()).unwrap();

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].get_text("data"), Some("c"));
    assert_eq!(top[0].get_int("n"), Some(3));
}

#[test]
fn test_query_with_params() {
    let db = test_db();
    db.insert("test", &row(10, "ten")).unwrap();
    db.insert("test", &row(20, "twenty")).unwrap();

    let data = db
        .query_sql_with("SELECT data FROM test WHERE value = ?1", [20], |mut cursor| {
            cursor.step()?;
            Ok(cursor.get_text(0)?.map(|s| s.into_owned()))
        })
        .unwrap();
    assert_eq!(data.as_deref(), Some("twenty"));
}

#[test]
fn test_table_info() {
    let db = test_db();

    assert_eq!(db.table_info("test").unwrap(), ["id", "value", "data"]);
    assert!(db.column_exists("test", "data").unwrap());
    assert!(!db.column_exists("test", "missing").unwrap());
    assert!(db.table_info("nope").unwrap().is_empty());
    assert!(db.table_exists("test").unwrap());
    assert!(!db.table_exists("nope").unwrap());
}

#[test]
fn test_errors_surface() {
    let db = test_db();

    let err = db.insert("test", &Content::new()).unwrap_err();
    assert!(matches!(err, Error::EmptyContent { .. }));

    let err = db.insert("missing", &row(1, "x")).unwrap_err();
    assert!(matches!(err, Error::Sqlite(_)));

    let err = db.exec_sql("NOT SQL").unwrap_err();
    assert!(matches!(err, Error::Sqlite(_)));

    let err = db
        .query(&SelectQuery::new("test").having("x"), |_| Ok(()))
        .unwrap_err();
    assert!(matches!(err, Error::HavingWithoutGroupBy));
}

/// Data written through one handle is visible after reopening the file.
#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("example.db");

    let db = Database::open(&path, OpenMode::Create).unwrap();
    db.exec_sql(CREATE_TEST).unwrap();
    db.insert("test", &row(42, "persisted")).unwrap();
    db.close().unwrap();

    let config = DbConfig {
        path: path.clone(),
        mode: OpenMode::ReadOnly,
        journal_mode: JournalMode::Delete,
        ..Default::default()
    };
    let db = Database::open_with(&config).unwrap();
    let rows = db
        .query(&SelectQuery::new("test"), |cursor| cursor.collect_contents())
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_text("data"), Some("persisted"));

    let err = db.insert("test", &row(1, "x")).unwrap_err();
    assert!(matches!(err, Error::Sqlite(_)));
}
