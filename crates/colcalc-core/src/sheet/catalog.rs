//! Ordered column catalog.
//!
//! A column's position in the catalog is also its index in the value store
//! and the ordinal (minus one) that formulas use to refer to it.

use super::column::{Column, ColumnId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnCatalog {
    columns: Vec<Column>,
}

impl ColumnCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column and return its positional index (the length before the append).
    pub fn append(&mut self, column: Column) -> usize {
        let index = self.columns.len();
        self.columns.push(column);
        index
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    pub fn as_slice(&self) -> &[Column] {
        &self.columns
    }

    /// Id for the next appended column: `var_col_<n>` where `n` is the new
    /// column's 1-based position.
    pub fn next_id(&self) -> ColumnId {
        ColumnId::new(format!("var_col_{}", self.columns.len() + 1))
    }
}

impl<'a> IntoIterator for &'a ColumnCatalog {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
