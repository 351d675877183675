//! Display and Debug formatting for cubes and expressions

use super::{Cube, Expr};
use itertools::Itertools;
use std::fmt;

/// Display formatting for cubes
///
/// Literals are concatenated in alphabetical order with no separator, so the
/// cube `a * d * f` prints as `adf`. The empty cube prints as `1`.
impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            write!(f, "1")
        } else {
            write!(f, "{}", self.literals().join(""))
        }
    }
}

impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Display formatting for expressions
///
/// Terms are printed in canonical order joined by `" + "`, so that equal
/// expressions always render identically. The empty expression prints as `0`.
///
/// # Examples
///
/// ```
/// use factor_logic::Expr;
///
/// # fn main() -> std::io::Result<()> {
/// let f = Expr::parse("df*a + h + bfg")?;
/// assert_eq!(f.to_string(), "adf + bfg + h");
/// # Ok(())
/// # }
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            write!(f, "0")
        } else {
            write!(f, "{}", self.cubes().join(" + "))
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Expr {
    /// Render the expression one cube per line, indented
    ///
    /// An inspection format for wide expressions, used by the command line
    /// tool when listing cubes.
    pub fn cube_lines(&self) -> String {
        self.cubes().map(|c| format!("  {}", c)).join("\n")
    }
}
