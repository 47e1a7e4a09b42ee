// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::TableStore;
use crate::error::StoreError;
use crate::table::Table;
use std::cell::Cell;
use std::collections::HashMap;

/// An in-memory store, used in tests and as the no-database server mode.
///
/// A transient-failure counter can be armed to make the next N calls fail
/// with [`StoreError::RateLimited`], which is how the retry path is
/// exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<String, Table>,
    failures_remaining: Cell<u32>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the store to fail its next `count` calls transiently.
    pub fn fail_next(&mut self, count: u32) {
        self.failures_remaining.set(count);
    }

    fn trip(&self) -> Result<(), StoreError> {
        let remaining: u32 = self.failures_remaining.get();
        if remaining > 0 {
            self.failures_remaining.set(remaining - 1);
            return Err(StoreError::RateLimited(String::from(
                "injected transient failure",
            )));
        }
        Ok(())
    }
}

impl TableStore for MemoryStore {
    fn get_table(&self, name: &str) -> Result<Table, StoreError> {
        self.trip()?;
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::TableNotFound(name.to_owned()))
    }

    fn put_table(&mut self, table: &Table) -> Result<(), StoreError> {
        self.trip()?;
        self.tables.insert(table.name.clone(), table.clone());
        Ok(())
    }

    fn append_rows(&mut self, name: &str, rows: &[Vec<String>]) -> Result<(), StoreError> {
        self.trip()?;
        let table: &mut Table = self
            .tables
            .entry(name.to_owned())
            .or_insert_with(|| Table::new(name, Vec::new()));
        table.rows.extend(rows.iter().cloned());
        Ok(())
    }

    fn clear_table(&mut self, name: &str) -> Result<(), StoreError> {
        self.trip()?;
        let table: &mut Table = self
            .tables
            .get_mut(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_owned()))?;
        table.rows.clear();
        Ok(())
    }

    fn delete_table(&mut self, name: &str) -> Result<(), StoreError> {
        self.trip()?;
        self.tables.remove(name);
        Ok(())
    }

    fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        self.trip()?;
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
