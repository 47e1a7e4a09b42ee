// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{MemoryStore, SqliteStore, StoreError, Table, TableStore};

fn sample_table() -> Table {
    let mut table: Table = Table::new(
        "requests_2025-11",
        vec![String::from("staff"), String::from("category")],
    );
    table.push(vec![String::from("Kim"), String::from("vacation")]);
    table.push(vec![String::from("Lee"), String::from("conference")]);
    table
}

fn round_trip(store: &mut dyn TableStore) {
    let table: Table = sample_table();
    store.put_table(&table).unwrap();

    let loaded: Table = store.get_table("requests_2025-11").unwrap();
    assert_eq!(loaded, table);
}

fn append_then_clear(store: &mut dyn TableStore) {
    store.put_table(&sample_table()).unwrap();
    store
        .append_rows(
            "requests_2025-11",
            &[vec![String::from("Park"), String::from("vacation")]],
        )
        .unwrap();
    assert_eq!(store.get_table("requests_2025-11").unwrap().rows.len(), 3);

    store.clear_table("requests_2025-11").unwrap();
    let cleared: Table = store.get_table("requests_2025-11").unwrap();
    assert!(cleared.is_empty());
    assert_eq!(cleared.header.len(), 2);
}

#[test]
fn test_memory_round_trip() {
    round_trip(&mut MemoryStore::new());
}

#[test]
fn test_sqlite_round_trip() {
    round_trip(&mut SqliteStore::open_in_memory().unwrap());
}

#[test]
fn test_memory_append_and_clear() {
    append_then_clear(&mut MemoryStore::new());
}

#[test]
fn test_sqlite_append_and_clear() {
    append_then_clear(&mut SqliteStore::open_in_memory().unwrap());
}

#[test]
fn test_missing_table_is_not_found() {
    let store: MemoryStore = MemoryStore::new();
    assert_eq!(
        store.get_table("nope"),
        Err(StoreError::TableNotFound(String::from("nope")))
    );
}

#[test]
fn test_append_creates_the_table() {
    let mut store: SqliteStore = SqliteStore::open_in_memory().unwrap();
    store
        .append_rows("audit_log", &[vec![String::from("admin")]])
        .unwrap();
    assert_eq!(store.get_table("audit_log").unwrap().rows.len(), 1);
}

#[test]
fn test_delete_is_idempotent() {
    let mut store: SqliteStore = SqliteStore::open_in_memory().unwrap();
    store.put_table(&sample_table()).unwrap();
    store.delete_table("requests_2025-11").unwrap();
    store.delete_table("requests_2025-11").unwrap();
    assert!(store.get_table("requests_2025-11").is_err());
}

#[test]
fn test_list_tables_is_sorted() {
    let mut store: MemoryStore = MemoryStore::new();
    store
        .put_table(&Table::new("b_sheet", Vec::new()))
        .unwrap();
    store
        .put_table(&Table::new("a_sheet", Vec::new()))
        .unwrap();
    assert_eq!(
        store.list_tables().unwrap(),
        vec![String::from("a_sheet"), String::from("b_sheet")]
    );
}
