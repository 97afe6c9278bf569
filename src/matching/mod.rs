//! First-match-wins linking of current-day records to historical records
//! for the same physical store.
//!
//! A today record links to the earliest past record (in the past set's
//! original order) whose normalized address or normalized phone equals its
//! own. Address and phone are independent signals: a phone match links two
//! records even when their addresses differ. Empty normalized keys never
//! match.

use log::info;

use crate::models::{ColumnMapping, Table, Value};
use crate::normalize::normalize_key;

/// Column names the matcher reads and writes.
#[derive(Debug, Clone)]
pub struct MatchColumns {
    pub address: String,
    pub phone: String,
    pub link_id: String,
    pub output: String,
}

impl From<&ColumnMapping> for MatchColumns {
    fn from(m: &ColumnMapping) -> Self {
        Self {
            address: m.address.clone(),
            phone: m.phone.clone(),
            link_id: m.link_id.clone(),
            output: m.same_store_link_id.clone(),
        }
    }
}

fn key_at(idx: Option<usize>, row: &[Value]) -> String {
    normalize_key(idx.and_then(|i| row.get(i)).and_then(Value::as_text))
}

/// Scan `past` in order for the first row matching either key; return its
/// linking identifier. O(|past|) per call by design.
fn find_link(
    past: &Table,
    address_key: &str,
    phone_key: &str,
    cols: &MatchColumns,
) -> Option<Value> {
    let addr_idx = past.column_index(&cols.address);
    let phone_idx = past.column_index(&cols.phone);
    let id_idx = past.column_index(&cols.link_id);

    for row in past.rows() {
        let past_addr = key_at(addr_idx, row);
        let past_phone = key_at(phone_idx, row);
        let address_match = !address_key.is_empty() && address_key == past_addr;
        let phone_match = !phone_key.is_empty() && phone_key == past_phone;
        if address_match || phone_match {
            return Some(id_idx.map(|i| row[i].clone()).unwrap_or(Value::Null));
        }
    }
    None
}

/// Produce a copy of `today` carrying the output column: for each row, the
/// linking identifier of the first matching past row, or `Null` when no
/// past row matches. Neither input is mutated.
pub fn enrich(today: &Table, past: &Table, cols: &MatchColumns) -> Table {
    let addr_idx = today.column_index(&cols.address);
    let phone_idx = today.column_index(&cols.phone);

    let links: Vec<Value> = today
        .rows()
        .iter()
        .map(|row| {
            let address_key = key_at(addr_idx, row);
            let phone_key = key_at(phone_idx, row);
            find_link(past, &address_key, &phone_key, cols).unwrap_or(Value::Null)
        })
        .collect();

    let matched = links.iter().filter(|v| !v.is_null()).count();
    info!(
        "matched {} of {} current-day records against {} past records",
        matched,
        today.row_count(),
        past.row_count()
    );
    today.with_column(&cols.output, links)
}
