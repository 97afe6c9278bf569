pub mod csv_export;

pub use csv_export::{ExportEncoding, encode_shift_jis, encode_utf8_bom, write_artifact};
