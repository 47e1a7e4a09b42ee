// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use endo_rota_store::Table;

/// Renders a stored table as CSV, header row first.
///
/// # Errors
///
/// Returns [`ApiError::Export`] if the writer or UTF-8 conversion fails.
pub fn table_to_csv(table: &Table) -> Result<String, ApiError> {
    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&table.header)
        .map_err(|e| ApiError::Export(e.to_string()))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|e| ApiError::Export(e.to_string()))?;
    }
    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(|e| ApiError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ApiError::Export(e.to_string()))
}
