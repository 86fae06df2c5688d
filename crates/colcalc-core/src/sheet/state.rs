use colcalc_engine::engine::format_number;
use std::sync::Arc;

use super::catalog::ColumnCatalog;
use super::column::Column;
use super::store::{CellPos, ValueStore};

/// Number of rows in every sheet.
pub const ROW_COUNT: usize = 95;

/// A consistent catalog + store pair.
///
/// Once published inside a [`Sheet`] a `SheetData` is never mutated; commits
/// build a new one and swap it in.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetData {
    pub(crate) catalog: ColumnCatalog,
    pub(crate) store: ValueStore,
    pub(crate) row_count: usize,
}

impl SheetData {
    pub fn new(row_count: usize) -> Self {
        SheetData {
            catalog: ColumnCatalog::new(),
            store: ValueStore::new(),
            row_count,
        }
    }

    /// Append a column with its values. `values[row]` of `None` leaves the
    /// cell empty; entries past the row count are ignored.
    pub fn push_column(&mut self, column: Column, values: &[Option<f64>]) -> usize {
        let col = self.catalog.append(column);
        for (row, value) in values.iter().enumerate().take(self.row_count) {
            if let Some(v) = value {
                self.store.insert(CellPos::new(col, row), *v);
            }
        }
        col
    }

    pub fn catalog(&self) -> &ColumnCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &ValueStore {
        &self.store
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Option<f64> {
        self.store.get(row, col)
    }

    /// Text shown for a cell; empty when the cell has no value.
    pub fn cell_display(&self, row: usize, col: usize) -> String {
        self.get_cell(row, col).map(format_number).unwrap_or_default()
    }
}

/// The sheet as seen by a front-end: a handle to the current snapshot.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub(crate) data: Arc<SheetData>,
}

impl Sheet {
    /// An empty sheet with [`ROW_COUNT`] rows and no columns.
    pub fn new() -> Self {
        Self::with_row_count(ROW_COUNT)
    }

    pub fn with_row_count(row_count: usize) -> Self {
        Sheet::from(SheetData::new(row_count))
    }

    /// The current snapshot. It stays valid and unchanged across later commits.
    pub fn snapshot(&self) -> Arc<SheetData> {
        Arc::clone(&self.data)
    }

    pub fn list_columns(&self) -> &[Column] {
        self.data.catalog.as_slice()
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get_cell(row, col)
    }

    pub fn cell_display(&self, row: usize, col: usize) -> String {
        self.data.cell_display(row, col)
    }

    pub fn row_count(&self) -> usize {
        self.data.row_count
    }

    pub fn column_count(&self) -> usize {
        self.data.column_count()
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

impl From<SheetData> for Sheet {
    fn from(data: SheetData) -> Self {
        Sheet {
            data: Arc::new(data),
        }
    }
}
