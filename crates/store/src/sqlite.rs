// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::TableStore;
use crate::error::StoreError;
use crate::table::Table;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS sheets (
    name TEXT PRIMARY KEY,
    header TEXT NOT NULL,
    rows TEXT NOT NULL
)";

/// A SQLite-backed store: one `sheets` row per named table, the header
/// and rows JSON-encoded.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) a store at the given path.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Backend`] if the database cannot be opened
    /// or the schema cannot be created.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn: Connection = Connection::open(path)?;
        conn.execute(SCHEMA, [])?;
        Ok(Self { conn })
    }

    /// Opens an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Backend`] if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn: Connection = Connection::open_in_memory()?;
        conn.execute(SCHEMA, [])?;
        Ok(Self { conn })
    }

    fn write(&self, name: &str, header: &[String], rows: &[Vec<String>]) -> Result<(), StoreError> {
        let header_json: String = serde_json::to_string(header)?;
        let rows_json: String = serde_json::to_string(rows)?;
        self.conn.execute(
            "INSERT INTO sheets (name, header, rows) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET header = ?2, rows = ?3",
            params![name, header_json, rows_json],
        )?;
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Option<Table>, StoreError> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT header, rows FROM sheets WHERE name = ?1",
                params![name],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let Some((header_json, rows_json)) = row else {
            return Ok(None);
        };
        Ok(Some(Table {
            name: name.to_owned(),
            header: serde_json::from_str(&header_json)?,
            rows: serde_json::from_str(&rows_json)?,
        }))
    }
}

impl TableStore for SqliteStore {
    fn get_table(&self, name: &str) -> Result<Table, StoreError> {
        self.read(name)?
            .ok_or_else(|| StoreError::TableNotFound(name.to_owned()))
    }

    fn put_table(&mut self, table: &Table) -> Result<(), StoreError> {
        self.write(&table.name, &table.header, &table.rows)
    }

    fn append_rows(&mut self, name: &str, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let mut table: Table = self
            .read(name)?
            .unwrap_or_else(|| Table::new(name, Vec::new()));
        table.rows.extend(rows.iter().cloned());
        self.write(name, &table.header, &table.rows)
    }

    fn clear_table(&mut self, name: &str) -> Result<(), StoreError> {
        let table: Table = self.get_table(name)?;
        self.write(name, &table.header, &[])
    }

    fn delete_table(&mut self, name: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM sheets WHERE name = ?1", params![name])?;
        Ok(())
    }

    fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sheets ORDER BY name")?;
        let names: Result<Vec<String>, rusqlite::Error> =
            stmt.query_map([], |row| row.get(0))?.collect();
        Ok(names?)
    }
}
