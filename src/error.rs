//! Error types for the synthesis core

use crate::sop::{Cube, Literal};
use std::fmt;
use std::io;

/// Errors related to synthesis and network validation
///
/// `RectangleNotRealized` is an internal consistency signal: a selected
/// rectangle promised product cubes that the expression does not contain.
/// It never occurs when the kernel and matrix construction are correct; the
/// driver treats it as a recoverable skip and moves to the next candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// A rectangle's product cube is absent from the expression
    RectangleNotRealized {
        /// The first missing product cube
        cube: Cube,
    },
    /// A definition participates in a reference cycle
    CyclicDefinitions {
        /// The name on which the cycle was detected
        name: Literal,
    },
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisError::RectangleNotRealized { cube } => {
                write!(
                    f,
                    "Rectangle not realized: product cube '{}' is missing from the expression",
                    cube
                )
            }
            SynthesisError::CyclicDefinitions { name } => {
                write!(f, "Definition '{}' participates in a reference cycle", name)
            }
        }
    }
}

impl std::error::Error for SynthesisError {}

impl From<SynthesisError> for io::Error {
    fn from(err: SynthesisError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
