//! CSV export of the projected table.
//!
//! Two artifacts of the same table are produced: Shift_JIS for the Windows
//! ecosystem and UTF-8 with a byte-order mark for macOS. Both use comma
//! separators, identical headers, and carry no row index column.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use encoding_rs::SHIFT_JIS;
use log::info;

use crate::error::ExportError;
use crate::models::{Table, Value};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportEncoding {
    ShiftJis,
    Utf8Bom,
}

impl ExportEncoding {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ShiftJis => "Shift_JIS",
            Self::Utf8Bom => "UTF-8 (BOM)",
        }
    }
}

fn table_to_csv_string(table: &Table) -> Result<String, ExportError> {
    let mut w = WriterBuilder::new().from_writer(Vec::new());
    w.write_record(table.columns())
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    for row in table.rows() {
        let fields: Vec<String> = row.iter().map(Value::render).collect();
        w.write_record(&fields)
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }
    let bytes = w
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))
}

/// Encode the table as Shift_JIS CSV. A value outside the Shift_JIS
/// repertoire aborts the export, naming the offending field.
pub fn encode_shift_jis(table: &Table) -> Result<Vec<u8>, ExportError> {
    let text = table_to_csv_string(table)?;
    let (bytes, _, had_errors) = SHIFT_JIS.encode(&text);
    if had_errors {
        let culprit = table
            .columns()
            .iter()
            .cloned()
            .chain(table.rows().iter().flat_map(|r| r.iter().map(Value::render)))
            .find(|field| SHIFT_JIS.encode(field).2)
            .unwrap_or_default();
        return Err(ExportError::Unencodable(culprit));
    }
    Ok(bytes.into_owned())
}

/// Encode the table as UTF-8 CSV prefixed with a byte-order mark.
pub fn encode_utf8_bom(table: &Table) -> Result<Vec<u8>, ExportError> {
    let text = table_to_csv_string(table)?;
    let mut out = Vec::with_capacity(UTF8_BOM.len() + text.len());
    out.extend_from_slice(UTF8_BOM);
    out.extend_from_slice(text.as_bytes());
    Ok(out)
}

pub fn write_artifact(
    table: &Table,
    path: &Path,
    encoding: ExportEncoding,
) -> Result<(), ExportError> {
    let bytes = match encoding {
        ExportEncoding::ShiftJis => encode_shift_jis(table)?,
        ExportEncoding::Utf8Bom => encode_utf8_bom(table)?,
    };
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    w.write_all(&bytes)?;
    w.flush()?;
    info!(
        "wrote {} rows as {} to {}",
        table.row_count(),
        encoding.label(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new(vec!["店舗名".into(), "id".into()]);
        t.push_row(vec![Value::Text("店".into()), Value::Text("X1".into())]);
        t.push_row(vec![Value::Null, Value::Text("X2".into())]);
        t
    }

    #[test]
    fn utf8_artifact_starts_with_bom() {
        let bytes = encode_utf8_bom(&sample()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        assert!(text.starts_with("店舗名,id\n"));
    }

    #[test]
    fn shift_jis_artifact_uses_legacy_bytes() {
        let bytes = encode_shift_jis(&sample()).unwrap();
        // "店" is 0x93 0x58 in Shift_JIS
        assert!(bytes.windows(2).any(|w| w == [0x93, 0x58]));
        assert!(std::str::from_utf8(&bytes).is_err());
    }

    #[test]
    fn artifacts_are_byte_distinct() {
        let sjis = encode_shift_jis(&sample()).unwrap();
        let utf8 = encode_utf8_bom(&sample()).unwrap();
        assert_ne!(sjis, utf8);
    }

    #[test]
    fn null_cells_export_as_empty_fields() {
        let bytes = encode_utf8_bom(&sample()).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.contains("\n,X2"));
    }

    #[test]
    fn unencodable_value_is_named() {
        let mut t = Table::new(vec!["name".into()]);
        t.push_row(vec![Value::Text("caf\u{20ac}".into())]);
        let err = encode_shift_jis(&t).unwrap_err();
        assert!(matches!(
            err,
            ExportError::Unencodable(field) if field.contains('\u{20ac}')
        ));
    }
}
