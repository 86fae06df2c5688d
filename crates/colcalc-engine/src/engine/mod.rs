//! Formula engine API.
//!
//! This module provides everything needed to turn formula text into numbers:
//!
//! - [`ColumnRef`] - Column placeholder parsing (`c1` ↔ column ordinal)
//! - [`tokenize`] - Split formula text into tokens
//! - [`parse_expr`], [`Expr`] - Recursive-descent parser and syntax tree
//! - [`Formula`] - Parsed formula with per-row evaluation
//! - [`extract_columns`] - Columns a formula depends on
//! - [`format_number`] - Format values for display

mod column_ref;
mod deps;
mod error;
mod eval;
mod format;
mod lexer;
mod parser;

pub use column_ref::ColumnRef;
pub use deps::extract_columns;
pub use error::FormulaError;
pub use eval::{Formula, eval_expr};
pub use format::format_number;
pub use lexer::{Spanned, Token, tokenize};
pub use parser::{BinaryOp, Expr, UnaryOp, parse_expr};
