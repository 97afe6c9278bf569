use chrono::{NaiveDate, NaiveDateTime};
use log::debug;

use crate::error::PipelineError;
use crate::models::{Table, Value};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

/// Parse a calendar date out of a raw cell, discarding any time-of-day
/// component. Returns `None` for values that parse under no accepted form.
pub fn parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

fn parse_cell(cell: &Value) -> Value {
    match cell {
        Value::Date(d) => Value::Date(*d),
        Value::Text(s) => parse_date_lenient(s).map(Value::Date).unwrap_or(Value::Null),
        Value::Null => Value::Null,
    }
}

/// Rewrite each named column into `Date` values (`Null` where unparseable).
/// Every named column must exist; a missing one aborts with
/// `MissingColumn`, never a silent default.
pub fn coerce_date_columns(table: &Table, columns: &[&str]) -> Result<Table, PipelineError> {
    let mut out = table.clone();
    for name in columns {
        let idx = out
            .column_index(name)
            .ok_or_else(|| PipelineError::MissingColumn {
                column: name.to_string(),
            })?;
        let parsed: Vec<Value> = out.rows().iter().map(|r| parse_cell(&r[idx])).collect();
        out = out.with_column(name, parsed);
    }
    Ok(out)
}

/// Split `table` on `date_column` against an explicit reference date:
/// equal goes to `today`, strictly earlier goes to `past`, later or
/// unparseable goes to neither. Both outputs are independent copies with
/// the date column carried as parsed `Date` values.
pub fn partition(
    table: &Table,
    date_column: &str,
    reference_date: NaiveDate,
) -> Result<(Table, Table), PipelineError> {
    let idx = table
        .column_index(date_column)
        .ok_or_else(|| PipelineError::MissingColumn {
            column: date_column.to_string(),
        })?;

    let mut today = Table::new(table.columns().to_vec());
    let mut past = Table::new(table.columns().to_vec());
    let mut dropped = 0usize;

    for row in table.rows() {
        let date = match parse_cell(&row[idx]) {
            Value::Date(d) => d,
            _ => {
                dropped += 1;
                continue;
            }
        };
        let mut copy = row.clone();
        copy[idx] = Value::Date(date);
        if date == reference_date {
            today.push_row(copy);
        } else if date < reference_date {
            past.push_row(copy);
        } else {
            // Future-dated rows are due on a later run.
            dropped += 1;
        }
    }

    debug!(
        "partitioned {} rows on {:?}: {} today, {} past, {} dropped",
        table.row_count(),
        date_column,
        today.row_count(),
        past.row_count(),
        dropped
    );
    Ok((today, past))
}
