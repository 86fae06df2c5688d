use std::collections::BTreeSet;
use std::sync::Arc;

use colcalc_engine::engine::{ColumnRef, Formula, FormulaError};

use super::column::{Column, ColumnId, ColumnKind};
use super::state::{Sheet, SheetData};
use crate::error::{Result, SheetError};

impl SheetData {
    /// Build the snapshot that results from adding a derived column.
    ///
    /// `self` is never modified. Every row is evaluated before anything is
    /// written, so an error leaves no trace.
    pub fn with_derived_column(&self, source: &str) -> Result<(SheetData, ColumnId)> {
        let formula = Formula::parse(source).map_err(|e| SheetError::Evaluation {
            formula: source.to_string(),
            row: None,
            cause: e,
        })?;

        self.check_columns(&formula)?;
        let values = self.evaluate_rows(&formula)?;

        let mut next = self.clone();
        let id = next.catalog.next_id();
        let col = next
            .catalog
            .append(Column::new(source, ColumnKind::Data, id.clone()));
        next.store.set_column_values(col, &values);
        Ok((next, id))
    }

    /// Resolve every placeholder and require a single column kind.
    fn check_columns(&self, formula: &Formula) -> Result<BTreeSet<ColumnKind>> {
        let column_count = self.catalog.len();
        let mut kinds = BTreeSet::new();
        for col_ref in formula.columns() {
            let column = col_ref
                .index()
                .and_then(|i| self.catalog.get(i))
                .ok_or(SheetError::UnknownColumn {
                    ordinal: col_ref.ordinal,
                    column_count,
                })?;
            kinds.insert(column.kind);
        }
        if kinds.len() > 1 {
            return Err(SheetError::TypeMismatch {
                kinds: kinds.into_iter().collect(),
            });
        }
        Ok(kinds)
    }

    /// Evaluate the formula for rows `[0, row_count)`; the first failing row aborts.
    pub fn evaluate_rows(&self, formula: &Formula) -> Result<Vec<f64>> {
        let mut values = Vec::with_capacity(self.row_count);
        for row in 0..self.row_count {
            values.push(self.evaluate_row(formula, row)?);
        }
        Ok(values)
    }

    /// Evaluate the formula for one row. Missing cells read as zero.
    pub fn evaluate_row(&self, formula: &Formula, row: usize) -> Result<f64> {
        let column_count = self.catalog.len();
        let resolve = |col_ref: ColumnRef| match col_ref.index() {
            Some(col) if col < column_count => Ok(self.store.value_or_zero(row, col)),
            _ => Err(FormulaError::UnknownColumn {
                ordinal: col_ref.ordinal,
            }),
        };

        match formula.eval(resolve) {
            Ok(value) => {
                log::debug!("row {}: `{}` = {}", row, formula, value);
                Ok(value)
            }
            Err(FormulaError::UnknownColumn { ordinal }) => Err(SheetError::UnknownColumn {
                ordinal,
                column_count,
            }),
            Err(e) => Err(SheetError::Evaluation {
                formula: formula.source().to_string(),
                row: Some(row),
                cause: e,
            }),
        }
    }
}

impl Sheet {
    /// Evaluate `formula` over every row and append the result as a new data
    /// column named after the formula text.
    ///
    /// On error the sheet keeps its current snapshot.
    pub fn add_derived_column(&mut self, formula: &str) -> Result<ColumnId> {
        match self.data.with_derived_column(formula) {
            Ok((next, id)) => {
                log::info!(
                    "added column {} (`{}`) over {} rows",
                    id,
                    formula,
                    next.row_count
                );
                self.data = Arc::new(next);
                Ok(id)
            }
            Err(e) => {
                log::warn!("rejected formula `{}`: {}", formula, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// Time column plus two data columns, four rows.
    fn sample() -> Sheet {
        let mut data = SheetData::new(4);
        data.push_column(
            Column::time("Time", "time_col"),
            &[Some(0.0), Some(1.0), Some(2.0), Some(3.0)],
        );
        data.push_column(
            Column::data("Density", "var_col_1"),
            &[Some(10.0), Some(20.0), Some(30.0), None],
        );
        data.push_column(
            Column::data("Volume", "var_col_2"),
            &[Some(2.0), Some(4.0), Some(5.0), Some(1.0)],
        );
        Sheet::from(data)
    }

    #[test]
    fn test_ratio_column() {
        let mut sheet = sample();
        let id = sheet.add_derived_column("c2 / c3").unwrap();
        assert_eq!(id.as_str(), "var_col_4");
        assert_eq!(sheet.column_count(), 4);
        assert_eq!(sheet.get_cell(0, 3), Some(5.0));
        assert_eq!(sheet.get_cell(1, 3), Some(5.0));
        assert_eq!(sheet.get_cell(2, 3), Some(6.0));
        assert_eq!(sheet.get_cell(3, 3), Some(0.0));

        let column = &sheet.list_columns()[3];
        assert_eq!(column.name, "c2 / c3");
        assert_eq!(column.kind, ColumnKind::Data);
    }

    #[test]
    fn test_missing_value_reads_as_zero() {
        let mut sheet = sample();
        sheet.add_derived_column("c2 + 5").unwrap();
        assert_eq!(sheet.get_cell(3, 3), Some(5.0));
    }

    #[test]
    fn test_division_by_zero_aborts() {
        let mut sheet = sample();
        let before = sheet.snapshot();
        let err = sheet.add_derived_column("c2 / 0").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::EvaluationError));
        assert!(matches!(
            err,
            SheetError::Evaluation {
                row: Some(0),
                cause: FormulaError::NonFinite { .. },
                ..
            }
        ));
        assert!(Arc::ptr_eq(&before, &sheet.snapshot()));
        assert_eq!(sheet.column_count(), 3);
    }

    #[test]
    fn test_failure_on_late_row_commits_nothing() {
        let mut sheet = sample();
        // Row 3 has a missing density, so 1 / c2 divides by zero there only.
        let err = sheet.add_derived_column("1 / c2").unwrap_err();
        assert!(matches!(err, SheetError::Evaluation { row: Some(3), .. }));
        assert_eq!(sheet.column_count(), 3);
        assert_eq!(sheet.get_cell(0, 3), None);
    }

    #[test]
    fn test_type_mismatch() {
        let mut sheet = sample();
        let before = sheet.snapshot();
        let err = sheet.add_derived_column("c1 + c2").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::TypeMismatch));
        assert!(Arc::ptr_eq(&before, &sheet.snapshot()));
    }

    #[test]
    fn test_type_mismatch_detected_before_rows() {
        // The same formula would also divide by zero; the type check wins.
        let mut sheet = sample();
        let err = sheet.add_derived_column("c1 / (c2 - c2)").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::TypeMismatch));
    }

    #[test]
    fn test_time_only_formula_is_allowed() {
        let mut sheet = sample();
        sheet.add_derived_column("c1 * 60").unwrap();
        assert_eq!(sheet.get_cell(2, 3), Some(120.0));
    }

    #[test]
    fn test_unknown_column() {
        let mut sheet = sample();
        let err = sheet.add_derived_column("c4 + 1").unwrap_err();
        assert!(matches!(
            err,
            SheetError::UnknownColumn {
                ordinal: 4,
                column_count: 3
            }
        ));
        assert_eq!(err.kind(), Some(ErrorKind::UnknownColumn));

        let err = sheet.add_derived_column("c0").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::UnknownColumn));
    }

    #[test]
    fn test_oversized_placeholder_is_unknown_column() {
        let mut sheet = sample();
        let before = sheet.snapshot();
        let err = sheet
            .add_derived_column("c99999999999999999999999 + 1")
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::UnknownColumn));
        assert!(Arc::ptr_eq(&before, &sheet.snapshot()));
    }

    #[test]
    fn test_deeply_nested_formula_is_rejected() {
        let mut sheet = sample();
        let before = sheet.snapshot();

        let parens = format!("{}c2{}", "(".repeat(200_000), ")".repeat(200_000));
        let err = sheet.add_derived_column(&parens).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::EvaluationError));
        assert!(matches!(err, SheetError::Evaluation { row: None, .. }));

        let signs = format!("{}c2", "-".repeat(100_000));
        let err = sheet.add_derived_column(&signs).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::EvaluationError));
        assert!(Arc::ptr_eq(&before, &sheet.snapshot()));
    }

    #[test]
    fn test_syntax_error_is_evaluation_error() {
        let mut sheet = sample();
        let err = sheet.add_derived_column("c2 +").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::EvaluationError));
        assert!(matches!(err, SheetError::Evaluation { row: None, .. }));
    }

    #[test]
    fn test_derived_columns_chain() {
        let mut sheet = sample();
        sheet.add_derived_column("c2 * c3").unwrap();
        let id = sheet.add_derived_column("c4 - c2").unwrap();
        assert_eq!(id.as_str(), "var_col_5");
        assert_eq!(sheet.get_cell(1, 4), Some(60.0));
    }

    #[test]
    fn test_old_snapshot_survives_commit() {
        let mut sheet = sample();
        let before = sheet.snapshot();
        sheet.add_derived_column("c2 + c3").unwrap();
        assert_eq!(before.column_count(), 3);
        assert_eq!(before.get_cell(0, 3), None);
        assert_eq!(sheet.get_cell(0, 3), Some(12.0));
    }

    #[test]
    fn test_constant_formula_fills_every_row() {
        let mut sheet = sample();
        sheet.add_derived_column("2 ^ 3").unwrap();
        for row in 0..sheet.row_count() {
            assert_eq!(sheet.get_cell(row, 3), Some(8.0));
        }
    }
}
