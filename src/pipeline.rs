//! End-to-end processing of a loaded table: date coercion, partitioning
//! against the reference date, matching, projection. Pure over its inputs;
//! the binary owns IO and error presentation.

use chrono::NaiveDate;
use log::info;

use crate::error::PipelineError;
use crate::matching::{MatchColumns, enrich};
use crate::models::{ColumnMapping, Table};
use crate::partition::{coerce_date_columns, partition};
use crate::project::project;

/// Run the reconciliation over `input` and return the projected output
/// table. Any failure aborts the whole run; no partial table is returned.
pub fn process(
    input: &Table,
    mapping: &ColumnMapping,
    reference_date: NaiveDate,
) -> Result<Table, PipelineError> {
    let coerced = coerce_date_columns(input, &mapping.date_columns())?;
    let (today, past) = partition(&coerced, &mapping.deadline_date, reference_date)?;
    info!(
        "{} records due on {}, {} historical records",
        today.row_count(),
        reference_date,
        past.row_count()
    );
    let enriched = enrich(&today, &past, &MatchColumns::from(mapping));
    project(
        &enriched,
        &mapping.output_columns(),
        &mapping.required_columns(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;

    fn mapping() -> ColumnMapping {
        ColumnMapping::default()
    }

    fn input_table(m: &ColumnMapping) -> Table {
        let mut t = Table::new(vec![
            m.row_no.clone(),
            m.store_name.clone(),
            m.link_id.clone(),
            m.access_token.clone(),
            m.deadline_date.clone(),
            m.entry_date.clone(),
            m.address.clone(),
            m.phone.clone(),
        ]);
        // Historical record, due yesterday
        t.push_row(vec![
            Value::Text("1".into()),
            Value::Text("店舗A".into()),
            Value::Text("X1".into()),
            Value::Text("tok-1".into()),
            Value::Text("2025-06-09".into()),
            Value::Text("2025-06-02".into()),
            Value::Text("123 Main St".into()),
            Value::Text("03-1111-2222".into()),
        ]);
        // Due today, same address modulo whitespace
        t.push_row(vec![
            Value::Text("2".into()),
            Value::Text("店舗A別端末".into()),
            Value::Text("X2".into()),
            Value::Text("tok-2".into()),
            Value::Text("2025-06-10".into()),
            Value::Text("2025-06-03".into()),
            Value::Text("123  Main  St".into()),
            Value::Text("03-9999-0000".into()),
        ]);
        // Due today, no historical counterpart
        t.push_row(vec![
            Value::Text("3".into()),
            Value::Text("店舗B".into()),
            Value::Text("X3".into()),
            Value::Text("tok-3".into()),
            Value::Text("2025-06-10".into()),
            Value::Text("2025-06-03".into()),
            Value::Text("456 Side St".into()),
            Value::Text("03-3333-4444".into()),
        ]);
        t
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[test]
    fn end_to_end_links_matching_store() {
        let m = mapping();
        let out = process(&input_table(&m), &m, reference()).unwrap();
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.columns(), m.output_columns().as_slice());
        assert_eq!(
            out.value(0, &m.same_store_link_id).unwrap().render(),
            "X1"
        );
        assert!(out.value(1, &m.same_store_link_id).unwrap().is_null());
        // deadline column is reformatted text, not a raw date cell
        assert_eq!(
            out.value(0, &m.deadline_date),
            Some(&Value::Text("2025-06-10".into()))
        );
    }

    #[test]
    fn missing_access_token_column_aborts_with_its_name() {
        let m = mapping();
        let full = input_table(&m);
        let kept: Vec<String> = full
            .columns()
            .iter()
            .filter(|c| *c != &m.access_token)
            .cloned()
            .collect();
        let mut trimmed = Table::new(kept.clone());
        for row in full.rows() {
            let projected: Vec<Value> = kept
                .iter()
                .map(|c| {
                    let idx = full.column_index(c).unwrap();
                    row[idx].clone()
                })
                .collect();
            trimmed.push_row(projected);
        }
        let err = process(&trimmed, &m, reference()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingRequiredColumn { column } if column == m.access_token
        ));
    }

    #[test]
    fn missing_entry_date_column_aborts_early() {
        let m = mapping();
        let mut t = Table::new(vec![m.deadline_date.clone()]);
        t.push_row(vec![Value::Text("2025-06-10".into())]);
        let err = process(&t, &m, reference()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingColumn { column } if column == m.entry_date
        ));
    }
}
