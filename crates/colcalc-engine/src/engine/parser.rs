//! Recursive-descent parser producing the formula AST.
//!
//! Precedence, loosest first:
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | additive | `+` `-` | left |
//! | multiplicative | `*` `/` `%` | left |
//! | unary | `+x` `-x` | prefix |
//! | power | `^` `**` | right |
//!
//! Unary minus binds looser than power, so `-2^2` is `-(2^2)`.

use std::fmt;

use super::column_ref::ColumnRef;
use super::error::FormulaError;
use super::lexer::{Spanned, Token, tokenize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "^",
        }
    }
}

/// Formula syntax tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Column(ColumnRef),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Column(c) => write!(f, "{}", c),
            Expr::Unary { op, operand } => match op {
                UnaryOp::Plus => write!(f, "(+{})", operand),
                UnaryOp::Neg => write!(f, "(-{})", operand),
            },
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
        }
    }
}

/// Deepest chain of nested parentheses, signs or exponents a formula may use.
pub const MAX_NESTING: usize = 64;

/// Tallest syntax tree a formula may produce, counting long operator chains.
pub const MAX_TREE_DEPTH: usize = 1024;

/// Parse formula text into an expression tree.
///
/// Formulas nested past [`MAX_NESTING`] or deeper than [`MAX_TREE_DEPTH`] are
/// rejected as syntax errors, which bounds every later walk over the tree.
pub fn parse_expr(source: &str) -> Result<Expr, FormulaError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(FormulaError::syntax(0, "formula is empty"));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: source.len(),
        nesting: 0,
    };
    let parsed = parser.expr()?;
    if let Some(extra) = parser.peek() {
        return Err(FormulaError::syntax(
            extra.position,
            format!("unexpected {} after end of expression", extra.token.describe()),
        ));
    }
    Ok(parsed.expr)
}

/// A subtree together with its height.
struct Parsed {
    expr: Expr,
    depth: usize,
}

impl Parsed {
    fn leaf(expr: Expr) -> Parsed {
        Parsed { expr, depth: 1 }
    }
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    /// Offset reported for errors at end of input.
    end: usize,
    /// Current recursion depth through `unary`.
    nesting: usize,
}

impl Parser {
    fn peek(&self) -> Option<Spanned> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Spanned> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn position(&self) -> usize {
        self.peek().map_or(self.end, |s| s.position)
    }

    fn expr(&mut self) -> Result<Parsed, FormulaError> {
        let mut lhs = self.term()?;
        while let Some(next) = self.peek() {
            let op = match next.token {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = binary(next.position, op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Parsed, FormulaError> {
        let mut lhs = self.unary()?;
        while let Some(next) = self.peek() {
            let op = match next.token {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                Token::Percent => BinaryOp::Rem,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = binary(next.position, op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    /// Every recursive path (parentheses, signs, exponents) passes through here.
    fn unary(&mut self) -> Result<Parsed, FormulaError> {
        if self.nesting >= MAX_NESTING {
            return Err(too_deep(self.position()));
        }
        self.nesting += 1;
        let result = self.signed();
        self.nesting -= 1;
        result
    }

    fn signed(&mut self) -> Result<Parsed, FormulaError> {
        let Some(next) = self.peek() else {
            return self.power();
        };
        let op = match next.token {
            Token::Plus => UnaryOp::Plus,
            Token::Minus => UnaryOp::Neg,
            _ => return self.power(),
        };
        self.pos += 1;
        let operand = self.unary()?;
        node(
            next.position,
            Expr::Unary {
                op,
                operand: Box::new(operand.expr),
            },
            operand.depth,
        )
    }

    fn power(&mut self) -> Result<Parsed, FormulaError> {
        let base = self.primary()?;
        if let Some(next) = self.peek().filter(|s| s.token == Token::Caret) {
            self.pos += 1;
            // Right operand goes back through unary: `2^-1` and `2^3^2` both parse.
            let exponent = self.unary()?;
            return binary(next.position, BinaryOp::Pow, base, exponent);
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Parsed, FormulaError> {
        let Some(tok) = self.advance() else {
            return Err(FormulaError::syntax(self.end, "unexpected end of formula"));
        };
        match tok.token {
            Token::Number(n) => Ok(Parsed::leaf(Expr::Number(n))),
            Token::Column(c) => Ok(Parsed::leaf(Expr::Column(c))),
            Token::LParen => {
                let inner = self.expr()?;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(FormulaError::syntax(
                        other.position,
                        format!("expected ')' but found {}", other.token.describe()),
                    )),
                    None => Err(FormulaError::syntax(
                        self.end,
                        format!("missing ')' for '(' at position {}", tok.position),
                    )),
                }
            }
            other => Err(FormulaError::syntax(
                tok.position,
                format!("expected a number, column or '(' but found {}", other.describe()),
            )),
        }
    }
}

fn too_deep(position: usize) -> FormulaError {
    FormulaError::syntax(position, "formula nests too deeply")
}

fn node(position: usize, expr: Expr, child_depth: usize) -> Result<Parsed, FormulaError> {
    let depth = child_depth + 1;
    if depth > MAX_TREE_DEPTH {
        return Err(too_deep(position));
    }
    Ok(Parsed { expr, depth })
}

fn binary(
    position: usize,
    op: BinaryOp,
    lhs: Parsed,
    rhs: Parsed,
) -> Result<Parsed, FormulaError> {
    let child_depth = lhs.depth.max(rhs.depth);
    node(
        position,
        Expr::Binary {
            op,
            lhs: Box::new(lhs.expr),
            rhs: Box::new(rhs.expr),
        },
        child_depth,
    )
}
