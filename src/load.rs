//! Input decoding and CSV parsing.
//!
//! The export arrives with no declared encoding: attempt strict UTF-8
//! first, then fall back to Shift_JIS. Bytes valid under neither encoding
//! surface as a user-facing `LoadError::Encoding`.

use std::path::Path;

use encoding_rs::SHIFT_JIS;
use log::{debug, info};

use crate::error::LoadError;
use crate::models::{Table, Value};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Decode raw bytes: strict UTF-8 (BOM tolerated), then Shift_JIS.
pub fn decode(bytes: &[u8]) -> Result<String, LoadError> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(body) {
        return Ok(text.to_string());
    }
    let (text, _, had_errors) = SHIFT_JIS.decode(bytes);
    if had_errors {
        return Err(LoadError::Encoding);
    }
    debug!("input decoded via Shift_JIS fallback");
    Ok(text.into_owned())
}

/// Parse decoded CSV text into a table. Header names are taken exactly as
/// written, embedded line breaks included. Empty cells load as `Null`;
/// short rows are padded with `Null`.
pub fn parse_table(text: &str) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?
        .clone();
    let mut table = Table::new(headers.iter().map(str::to_string).collect());
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::Malformed(e.to_string()))?;
        table.push_row(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Value::Null
                    } else {
                        Value::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(table)
}

pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    let bytes = std::fs::read(path)?;
    let text = decode(&bytes)?;
    let table = parse_table(&text)?;
    info!(
        "loaded {} rows, {} columns from {}",
        table.row_count(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}
