//! Date normalization: temporal columns become text, missing temporals become
//! null.
//!
//! A column is treated as date/time-typed when every non-null cell in it is
//! temporal and at least one holds a real date. In those columns a valid
//! date/time is rendered as text and the invalid-temporal sentinel becomes an
//! explicit null. Every other column passes through untouched.

use crate::config::DATETIME_FORMAT;
use crate::table::{Cell, Table};

/// Applies the date normalization pass in place.
pub fn normalize_dates(table: &mut Table) {
    let temporal_columns: Vec<usize> = (0..table.columns.len())
        .filter(|&col| is_datetime_column(table, col))
        .collect();

    if temporal_columns.is_empty() {
        return;
    }

    log::debug!(
        "Normalizing {} date/time column(s): {:?}",
        temporal_columns.len(),
        temporal_columns
            .iter()
            .map(|&c| table.columns[c].as_str())
            .collect::<Vec<_>>()
    );

    for row in &mut table.rows {
        for &col in &temporal_columns {
            if let Some(cell) = row.get_mut(col) {
                *cell = match std::mem::replace(cell, Cell::Null) {
                    Cell::DateTime(dt) => Cell::Text(dt.format(DATETIME_FORMAT).to_string()),
                    Cell::InvalidDateTime => Cell::Null,
                    other => other,
                };
            }
        }
    }
}

/// Column type inference for the normalization pass: all non-null cells must
/// be temporal, and at least one must be a real date/time.
fn is_datetime_column(table: &Table, col: usize) -> bool {
    let mut saw_datetime = false;
    for row in &table.rows {
        match row.get(col) {
            Some(Cell::DateTime(_)) => saw_datetime = true,
            Some(Cell::InvalidDateTime) | Some(Cell::Null) | None => {}
            Some(_) => return false,
        }
    }
    saw_datetime
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32) -> Cell {
        Cell::DateTime(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(8, 15, 30)
                .unwrap(),
        )
    }

    #[test]
    fn test_datetime_column_converted_to_text() {
        let mut table = Table::new(
            vec!["id".into(), "joined".into()],
            vec![
                vec![Cell::Int(1), dt(2024, 1, 15)],
                vec![Cell::Int(2), Cell::InvalidDateTime],
                vec![Cell::Int(3), Cell::Null],
            ],
        );
        normalize_dates(&mut table);

        assert_eq!(table.rows[0][1], Cell::Text("2024-01-15 08:15:30".into()));
        assert_eq!(table.rows[1][1], Cell::Null);
        assert_eq!(table.rows[2][1], Cell::Null);
        // Non-temporal column untouched
        assert_eq!(table.rows[0][0], Cell::Int(1));
    }

    #[test]
    fn test_mixed_column_not_converted() {
        let mut table = Table::new(
            vec!["mixed".into()],
            vec![
                vec![dt(2024, 1, 15)],
                vec![Cell::Text("n/a".into())],
            ],
        );
        normalize_dates(&mut table);

        // Column is not datetime-typed, so the date cell survives as-is
        assert_eq!(table.rows[0][0], dt(2024, 1, 15));
        assert_eq!(table.rows[1][0], Cell::Text("n/a".into()));
    }

    #[test]
    fn test_sentinel_only_column_not_converted() {
        // No real datetime anywhere, so there is nothing to infer from
        let mut table = Table::new(
            vec!["maybe_dates".into()],
            vec![vec![Cell::InvalidDateTime], vec![Cell::Null]],
        );
        normalize_dates(&mut table);
        assert_eq!(table.rows[0][0], Cell::InvalidDateTime);
    }

    #[test]
    fn test_nulls_do_not_block_inference() {
        let mut table = Table::new(
            vec!["d".into()],
            vec![vec![Cell::Null], vec![dt(2023, 6, 1)]],
        );
        normalize_dates(&mut table);
        assert_eq!(table.rows[1][0], Cell::Text("2023-06-01 08:15:30".into()));
    }

    #[test]
    fn test_empty_table_is_a_no_op() {
        let mut table = Table::new(vec!["a".into()], vec![]);
        normalize_dates(&mut table);
        assert!(table.is_empty());
    }
}
