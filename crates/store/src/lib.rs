// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! The roster store: named tables of string cells, with in-memory and
//! SQLite backends, retry/backoff, and the persistence-boundary codecs.

pub mod codec;
mod error;
mod memory;
mod retry;
mod sqlite;
mod table;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use retry::{MAX_ATTEMPTS, with_retry};
pub use sqlite::SqliteStore;
pub use table::Table;

/// The named-table repository every backend implements.
///
/// Tables are whole-sheet units: `put_table` replaces the entire sheet,
/// which matches how versions are saved (a version's sheets are always
/// rewritten together, never patched cell by cell).
pub trait TableStore {
    /// Reads a whole table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TableNotFound`] if the table does not exist.
    fn get_table(&self, name: &str) -> Result<Table, StoreError>;

    /// Writes a whole table, replacing any existing one of that name.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the write fails.
    fn put_table(&mut self, table: &Table) -> Result<(), StoreError>;

    /// Appends rows to a table, creating it (with an empty header) if it
    /// does not exist. This is the log-style write path.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the write fails.
    fn append_rows(&mut self, name: &str, rows: &[Vec<String>]) -> Result<(), StoreError>;

    /// Removes every row of a table, keeping its header.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TableNotFound`] if the table does not exist.
    fn clear_table(&mut self, name: &str) -> Result<(), StoreError>;

    /// Deletes a table entirely. Deleting a missing table is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the delete fails.
    fn delete_table(&mut self, name: &str) -> Result<(), StoreError>;

    /// Lists every table name, sorted.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the listing fails.
    fn list_tables(&self) -> Result<Vec<String>, StoreError>;
}
