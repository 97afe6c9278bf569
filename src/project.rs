use crate::error::PipelineError;
use crate::models::{Table, Value};

/// Select `desired` columns (those actually present, in the order given)
/// into a new table, after verifying every `required` column exists.
/// Validation is fail-fast: the first missing required column aborts.
/// Date cells are reformatted to `YYYY-MM-DD` text in the output.
pub fn project(
    table: &Table,
    desired: &[String],
    required: &[String],
) -> Result<Table, PipelineError> {
    for column in required {
        if !table.has_column(column) {
            return Err(PipelineError::MissingRequiredColumn {
                column: column.clone(),
            });
        }
    }

    let selected: Vec<(String, usize)> = desired
        .iter()
        .filter_map(|name| table.column_index(name).map(|idx| (name.clone(), idx)))
        .collect();

    let mut out = Table::new(selected.iter().map(|(name, _)| name.clone()).collect());
    for row in table.rows() {
        let projected = selected
            .iter()
            .map(|(_, idx)| match &row[*idx] {
                Value::Date(d) => Value::Text(d.format("%Y-%m-%d").to_string()),
                other => other.clone(),
            })
            .collect();
        out.push_row(projected);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Table {
        let mut t = Table::new(vec!["b".into(), "a".into(), "due".into()]);
        t.push_row(vec![
            Value::Text("bee".into()),
            Value::Text("ay".into()),
            Value::Date(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()),
        ]);
        t
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn output_order_follows_desired_not_input() {
        let out = project(&sample(), &names(&["a", "b"]), &[]).unwrap();
        assert_eq!(out.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(out.value(0, "a").unwrap().render(), "ay");
    }

    #[test]
    fn absent_desired_columns_are_skipped() {
        let out = project(&sample(), &names(&["a", "missing", "b"]), &[]).unwrap();
        assert_eq!(out.columns(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn first_missing_required_column_is_named() {
        let err = project(
            &sample(),
            &names(&["a"]),
            &names(&["a", "access token", "also missing"]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingRequiredColumn { column } if column == "access token"
        ));
    }

    #[test]
    fn date_cells_become_formatted_text() {
        let out = project(&sample(), &names(&["due"]), &[]).unwrap();
        assert_eq!(
            out.value(0, "due"),
            Some(&Value::Text("2025-01-05".into()))
        );
    }

    #[test]
    fn input_is_untouched() {
        let t = sample();
        let _ = project(&t, &names(&["a"]), &[]).unwrap();
        assert_eq!(t.columns().len(), 3);
    }
}
