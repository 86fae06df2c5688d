//! Column dependency extraction.
//!
//! Walks a parsed formula and collects every column placeholder it reads.
//! The sheet uses this to resolve columns and check their types once, before
//! evaluating any row.

use std::collections::BTreeSet;

use super::column_ref::ColumnRef;
use super::parser::Expr;

/// Collect the distinct columns referenced by an expression, in ordinal order.
pub fn extract_columns(expr: &Expr) -> BTreeSet<ColumnRef> {
    let mut out = BTreeSet::new();
    collect(expr, &mut out);
    out
}

fn collect(expr: &Expr, out: &mut BTreeSet<ColumnRef>) {
    match expr {
        Expr::Number(_) => {}
        Expr::Column(c) => {
            out.insert(*c);
        }
        Expr::Unary { operand, .. } => collect(operand, out),
        Expr::Binary { lhs, rhs, .. } => {
            collect(lhs, out);
            collect(rhs, out);
        }
    }
}
