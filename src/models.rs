use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell of the input table. CSV cells load as `Text`; empty cells
/// load as `Null`; date coercion rewrites date-bearing columns to `Date`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Date(NaiveDate),
    Null,
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Textual form used when writing CSV fields. Dates render as
    /// `YYYY-MM-DD`; null renders as the empty field.
    pub fn render(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Null => String::new(),
        }
    }
}

/// An owned, row-oriented table: ordered column names plus rows of values.
/// Every row has exactly one value per column. All pipeline stages derive
/// new tables from their inputs; nothing hands out views or mutates a
/// caller's table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating to the schema width.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Return a copy of this table with `name` set to `values` (one per
    /// row). Replaces the column in place if it already exists, otherwise
    /// appends it after the existing columns.
    pub fn with_column(&self, name: &str, mut values: Vec<Value>) -> Table {
        values.resize(self.rows.len(), Value::Null);
        let mut out = self.clone();
        match out.column_index(name) {
            Some(idx) => {
                for (row, v) in out.rows.iter_mut().zip(values) {
                    row[idx] = v;
                }
            }
            None => {
                out.columns.push(name.to_string());
                for (row, v) in out.rows.iter_mut().zip(values) {
                    row.push(v);
                }
            }
        }
        out
    }
}

/// The expected column set of the onboarding export, by exact header name.
/// Several production headers embed a line break; the defaults reproduce
/// them verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub row_no: String,
    pub store_name: String,
    pub link_id: String,
    pub access_token: String,
    pub deadline_date: String,
    pub entry_date: String,
    pub address: String,
    pub phone: String,
    /// Generated column carrying the propagated linking identifier.
    pub same_store_link_id: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            row_no: "no.".into(),
            store_name: "店舗名".into(),
            link_id: "CAMEL連携ID\n=店舗コード（自動）".into(),
            access_token: "アクセストークン".into(),
            deadline_date: "設定完了締切日\n（記入日+N日　自動）".into(),
            entry_date: "記入日".into(),
            address: "店舗住所".into(),
            phone: "店舗電話番号\n（固定）".into(),
            same_store_link_id: "同一店舗CAMEL連携ID".into(),
        }
    }
}

impl ColumnMapping {
    /// Columns coerced to dates before partitioning. Both must exist.
    pub fn date_columns(&self) -> Vec<&str> {
        vec![self.deadline_date.as_str(), self.entry_date.as_str()]
    }

    /// Columns the projected output must contain; absence of any one of
    /// these aborts the run. The generated column is not required since the
    /// matcher produces it.
    pub fn required_columns(&self) -> Vec<String> {
        vec![
            self.row_no.clone(),
            self.store_name.clone(),
            self.link_id.clone(),
            self.access_token.clone(),
            self.deadline_date.clone(),
        ]
    }

    /// Output column selection, in export order.
    pub fn output_columns(&self) -> Vec<String> {
        vec![
            self.row_no.clone(),
            self.store_name.clone(),
            self.link_id.clone(),
            self.access_token.clone(),
            self.deadline_date.clone(),
            self.same_store_link_id.clone(),
        ]
    }
}
