//! Column descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a column. A formula may only combine columns of one kind.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Time,
    Data,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Time => "time",
            ColumnKind::Data => "data",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable column identity (e.g. `time_col`, `var_col_3`).
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        ColumnId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A column in the sheet. `name` is the header shown to the user; for derived
/// columns it is the formula text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub id: ColumnId,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, id: ColumnId) -> Column {
        Column {
            name: name.into(),
            kind,
            id,
        }
    }

    pub fn time(name: impl Into<String>, id: impl Into<String>) -> Column {
        Column::new(name, ColumnKind::Time, ColumnId::new(id))
    }

    pub fn data(name: impl Into<String>, id: impl Into<String>) -> Column {
        Column::new(name, ColumnKind::Data, ColumnId::new(id))
    }
}
