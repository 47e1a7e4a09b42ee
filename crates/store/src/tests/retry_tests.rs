// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{MAX_ATTEMPTS, MemoryStore, StoreError, Table, TableStore, with_retry};

#[test]
fn test_retry_recovers_from_transient_failures() {
    let mut store: MemoryStore = MemoryStore::new();
    store.put_table(&Table::new("sheet", Vec::new())).unwrap();
    store.fail_next(2);

    let loaded: Table = with_retry("get sheet", || store.get_table("sheet")).unwrap();
    assert_eq!(loaded.name, "sheet");
}

#[test]
fn test_retry_gives_up_after_max_attempts() {
    let mut store: MemoryStore = MemoryStore::new();
    store.put_table(&Table::new("sheet", Vec::new())).unwrap();
    store.fail_next(MAX_ATTEMPTS + 1);

    let result: Result<Table, StoreError> = with_retry("get sheet", || store.get_table("sheet"));
    assert_eq!(
        result,
        Err(StoreError::RetryExhausted {
            attempts: MAX_ATTEMPTS
        })
    );
}

#[test]
fn test_non_transient_errors_pass_straight_through() {
    let store: MemoryStore = MemoryStore::new();
    let result: Result<Table, StoreError> = with_retry("get sheet", || store.get_table("absent"));
    assert_eq!(
        result,
        Err(StoreError::TableNotFound(String::from("absent")))
    );
}
