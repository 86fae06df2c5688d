//! Error types for colcalc core.

use thiserror::Error;

use colcalc_engine::engine::FormulaError;

use crate::sheet::ColumnKind;

/// The three ways adding a derived column can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    TypeMismatch,
    UnknownColumn,
    EvaluationError,
}

/// Errors that can occur while working with a sheet.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("formula mixes column types: {}", join_kinds(.kinds))]
    TypeMismatch { kinds: Vec<ColumnKind> },

    #[error("unknown column c{ordinal}: the sheet has {column_count} columns")]
    UnknownColumn { ordinal: usize, column_count: usize },

    #[error("cannot evaluate `{formula}`{}: {cause}", row_suffix(.row))]
    Evaluation {
        formula: String,
        /// Zero-based row, None when the formula failed to parse.
        row: Option<usize>,
        cause: FormulaError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    /// Classify the error, or None for errors outside the derived-column taxonomy.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            SheetError::TypeMismatch { .. } => Some(ErrorKind::TypeMismatch),
            SheetError::UnknownColumn { .. } => Some(ErrorKind::UnknownColumn),
            SheetError::Evaluation { .. } => Some(ErrorKind::EvaluationError),
            SheetError::Io(_) => None,
        }
    }
}

fn join_kinds(kinds: &[ColumnKind]) -> String {
    kinds
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(" at row {}", r + 1),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
