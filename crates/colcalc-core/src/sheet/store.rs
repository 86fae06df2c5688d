//! Sparse value store.
//!
//! Values are keyed by [`CellPos`] (zero-based column and row). A missing key
//! means the cell has no value; that is the only representation of a missing
//! cell in colcalc, and callers decide what it means through
//! [`ValueStore::get`] or [`ValueStore::value_or_zero`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A cell position. Ordered column-major so sorted iteration walks one
/// column at a time.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellPos {
    pub col: usize,
    pub row: usize,
}

impl CellPos {
    pub fn new(col: usize, row: usize) -> CellPos {
        CellPos { col, row }
    }
}

/// Sparse key form `"<col>-<row>"`.
impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.col, self.row)
    }
}

impl std::str::FromStr for CellPos {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid sparse key: {}", s);
        let (col, row) = s.split_once('-').ok_or_else(invalid)?;
        let col = col.parse::<usize>().map_err(|_| invalid())?;
        let row = row.parse::<usize>().map_err(|_| invalid())?;
        Ok(CellPos::new(col, row))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueStore {
    values: HashMap<CellPos, f64>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value at (row, col), None when absent.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(&CellPos::new(col, row)).copied()
    }

    /// Value used by formula evaluation: a missing cell counts as zero.
    pub fn value_or_zero(&self, row: usize, col: usize) -> f64 {
        self.get(row, col).unwrap_or(0.0)
    }

    pub fn insert(&mut self, pos: CellPos, value: f64) {
        self.values.insert(pos, value);
    }

    /// Write rows `[0, row_count)` of column `col` from `value_at(row)`.
    /// Entries of other columns are left alone.
    pub fn set_column<F>(&mut self, col: usize, row_count: usize, mut value_at: F)
    where
        F: FnMut(usize) -> f64,
    {
        for row in 0..row_count {
            self.values.insert(CellPos::new(col, row), value_at(row));
        }
    }

    /// Write a precomputed column, one value per row starting at row 0.
    pub fn set_column_values(&mut self, col: usize, values: &[f64]) {
        self.set_column(col, values.len(), |row| values[row]);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of values stored for one column.
    pub fn column_len(&self, col: usize) -> usize {
        self.values.keys().filter(|pos| pos.col == col).count()
    }
}
