//! Parsing support for sum-of-products expressions

use super::error::ParseSopError;
use super::Expr;
use lalrpop_util::ParseError;
use std::sync::Arc;

// Lalrpop-generated parser module (generated in OUT_DIR at build time)
#[allow(clippy::all)]
mod grammar {
    #![allow(clippy::all)]
    #![allow(dead_code)]
    #![allow(unused_imports)]
    include!(concat!(env!("OUT_DIR"), "/sop/grammar.rs"));
}

impl Expr {
    /// Parse a sum-of-products expression from a string
    ///
    /// A literal is one alphabetic character followed by optional digits, so
    /// adjacent names need no separator: `adf` is the cube `a * d * f` and
    /// `dt1` is `d * t1`. Supported syntax:
    /// - `+` between product terms
    /// - optional `*` between the factors of a term
    /// - `1` for the empty cube (constant true)
    /// - `0` for the empty expression (constant false)
    ///
    /// # Examples
    ///
    /// ```
    /// use factor_logic::Expr;
    ///
    /// # fn main() -> std::io::Result<()> {
    /// let f = Expr::parse("ab + a*c + dt1")?;
    /// assert_eq!(f.len(), 3);
    /// assert_eq!(f.literal_count(), 6);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseSopError> {
        grammar::SopParser::new().parse(input).map_err(|e| {
            let position = error_position(&e);
            ParseSopError::InvalidSyntax {
                message: Arc::from(e.to_string().as_str()),
                input: Arc::from(input),
                position,
            }
        })
    }
}

/// Extract the byte offset at which a generated-parser error occurred
fn error_position<T, E>(error: &ParseError<usize, T, E>) -> Option<usize> {
    match error {
        ParseError::InvalidToken { location } => Some(*location),
        ParseError::UnrecognizedEof { location, .. } => Some(*location),
        ParseError::UnrecognizedToken {
            token: (start, _, _),
            ..
        } => Some(*start),
        ParseError::ExtraToken {
            token: (start, _, _),
        } => Some(*start),
        ParseError::User { .. } => None,
    }
}
