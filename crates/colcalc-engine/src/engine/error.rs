//! Formula errors.

use thiserror::Error;

/// Errors produced while parsing or evaluating a formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    /// The formula text is not a well-formed expression.
    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    /// A placeholder could not be resolved to a column.
    #[error("unknown column c{ordinal}")]
    UnknownColumn { ordinal: usize },

    /// The expression evaluated to NaN or an infinity.
    #[error("result is not a finite number ({value})")]
    NonFinite { value: f64 },
}

impl FormulaError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        FormulaError::Syntax {
            position,
            message: message.into(),
        }
    }
}
