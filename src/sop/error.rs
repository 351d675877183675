//! Error types for sum-of-products parsing

use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors related to parsing a sum-of-products expression
///
/// These errors occur when the textual form of an expression is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseSopError {
    /// Failed to parse an expression due to invalid syntax
    InvalidSyntax {
        /// The error message from the parser
        message: Arc<str>,
        /// The original input string that failed to parse
        input: Arc<str>,
        /// Byte offset in the input where the error occurred, if known
        position: Option<usize>,
    },
}

impl fmt::Display for ParseSopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseSopError::InvalidSyntax {
                message,
                input,
                position,
            } => {
                if let Some(pos) = position {
                    write!(
                        f,
                        "Failed to parse expression at position {}: {}. Input: {:?}",
                        pos, message, input
                    )
                } else {
                    write!(
                        f,
                        "Failed to parse expression: {}. Input: {:?}",
                        message, input
                    )
                }
            }
        }
    }
}

impl std::error::Error for ParseSopError {}

impl From<ParseSopError> for io::Error {
    fn from(err: ParseSopError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
