//! Column placeholder parsing and formatting.
//!
//! Formulas refer to columns by position with placeholder tokens such as
//! `c1`, `c2`, ... where the number is the 1-based column ordinal.
//!
//! # Examples
//!
//! ```
//! use colcalc_engine::engine::ColumnRef;
//!
//! let col = ColumnRef::from_str("c3").unwrap();
//! assert_eq!(col.ordinal, 3);
//! assert_eq!(col.index(), Some(2));
//! assert_eq!(col.to_string(), "c3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A reference to a column by its 1-based ordinal, as written in a formula.
///
/// The ordinal is kept as typed: `c0` is a syntactically valid placeholder that
/// simply never resolves to a column.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ColumnRef {
    pub ordinal: usize,
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[cC](?<ordinal>[0-9]+)$").expect("placeholder regex"))
}

impl ColumnRef {
    pub fn new(ordinal: usize) -> ColumnRef {
        ColumnRef { ordinal }
    }

    /// Parse a placeholder token (`c1`, `C12`, ...).
    /// Returns None if the input is not a placeholder. An ordinal too large
    /// for `usize` saturates, so it still names a column that does not exist.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(token: &str) -> Option<ColumnRef> {
        let caps = placeholder_re().captures(token)?;
        let ordinal = caps["ordinal"].parse::<usize>().unwrap_or(usize::MAX);
        Some(ColumnRef::new(ordinal))
    }

    /// Zero-based catalog index, or None for `c0`.
    pub fn index(&self) -> Option<usize> {
        self.ordinal.checked_sub(1)
    }
}

impl std::str::FromStr for ColumnRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnRef::from_str(s).ok_or_else(|| format!("Invalid column placeholder: {}", s))
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.ordinal)
    }
}
