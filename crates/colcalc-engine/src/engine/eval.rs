//! Parsed formulas and their evaluation.
//!
//! A [`Formula`] keeps the text the user typed next to its syntax tree. It is
//! evaluated once per row; the caller supplies a resolver that turns each
//! column placeholder into that row's value.

use std::collections::BTreeSet;
use std::fmt;

use super::column_ref::ColumnRef;
use super::deps::extract_columns;
use super::error::FormulaError;
use super::parser::{BinaryOp, Expr, UnaryOp, parse_expr};

#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    /// Parse formula text.
    pub fn parse(source: &str) -> Result<Formula, FormulaError> {
        let expr = parse_expr(source)?;
        log::trace!("parsed formula `{}` as {}", source, expr);
        Ok(Formula {
            source: source.to_string(),
            expr,
        })
    }

    /// The formula text exactly as entered.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Distinct columns referenced by the formula.
    pub fn columns(&self) -> BTreeSet<ColumnRef> {
        extract_columns(&self.expr)
    }

    /// Evaluate the formula, resolving each placeholder through `resolve`.
    ///
    /// Fails with [`FormulaError::NonFinite`] when the final result is NaN or
    /// infinite (division by zero included).
    pub fn eval<F>(&self, resolve: F) -> Result<f64, FormulaError>
    where
        F: Fn(ColumnRef) -> Result<f64, FormulaError>,
    {
        let value = eval_expr(&self.expr, &resolve)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FormulaError::NonFinite { value })
        }
    }
}

impl std::str::FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Evaluate an expression tree. No finiteness check is applied here;
/// intermediate infinities are allowed as long as the caller accepts them.
pub fn eval_expr<F>(expr: &Expr, resolve: &F) -> Result<f64, FormulaError>
where
    F: Fn(ColumnRef) -> Result<f64, FormulaError>,
{
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Column(c) => resolve(*c),
        Expr::Unary { op, operand } => {
            let v = eval_expr(operand, resolve)?;
            Ok(match op {
                UnaryOp::Plus => v,
                UnaryOp::Neg => -v,
            })
        }
        Expr::Binary { op, lhs, rhs } => {
            let a = eval_expr(lhs, resolve)?;
            let b = eval_expr(rhs, resolve)?;
            Ok(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
                BinaryOp::Rem => a % b,
                BinaryOp::Pow => a.powf(b),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(values: &'static [f64]) -> impl Fn(ColumnRef) -> Result<f64, FormulaError> {
        move |c: ColumnRef| {
            c.index()
                .and_then(|i| values.get(i).copied())
                .ok_or(FormulaError::UnknownColumn { ordinal: c.ordinal })
        }
    }

    fn eval(source: &str, values: &'static [f64]) -> Result<f64, FormulaError> {
        Formula::parse(source)?.eval(columns(values))
    }

    #[test]
    fn test_eval_arithmetic() {
        assert_eq!(eval("1 + 2 * 3", &[]), Ok(7.0));
        assert_eq!(eval("(1 + 2) * 3", &[]), Ok(9.0));
        assert_eq!(eval("7 % 4", &[]), Ok(3.0));
        assert_eq!(eval("2 ^ 10", &[]), Ok(1024.0));
        assert_eq!(eval("-2 ^ 2", &[]), Ok(-4.0));
        assert_eq!(eval("2 ^ 3 ^ 2", &[]), Ok(512.0));
    }

    #[test]
    fn test_eval_columns() {
        assert_eq!(eval("c2 / c3", &[0.0, 10.0, 2.0]), Ok(5.0));
        assert_eq!(eval("c1 * c1 - c2", &[3.0, 1.0]), Ok(8.0));
    }

    #[test]
    fn test_eval_division_by_zero_is_non_finite() {
        let err = eval("c1 / 0", &[10.0]).unwrap_err();
        assert_eq!(
            err,
            FormulaError::NonFinite {
                value: f64::INFINITY
            }
        );
    }

    #[test]
    fn test_eval_zero_over_zero_is_non_finite() {
        let err = eval("0 / 0", &[]).unwrap_err();
        assert!(matches!(err, FormulaError::NonFinite { value } if value.is_nan()));
    }

    #[test]
    fn test_eval_intermediate_infinity_can_recover() {
        assert_eq!(eval("1 / (1 / 0)", &[]), Ok(0.0));
    }

    #[test]
    fn test_eval_propagates_resolver_error() {
        let err = eval("c1 + c4", &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, FormulaError::UnknownColumn { ordinal: 4 });
    }

    #[test]
    fn test_formula_keeps_source_text() {
        let formula: Formula = "c1  *c2".parse().unwrap();
        assert_eq!(formula.source(), "c1  *c2");
        assert_eq!(formula.to_string(), "c1  *c2");
        assert_eq!(formula.expr().to_string(), "(c1 * c2)");
    }
}
