use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors surfaced by cube, cover, and column-cover construction/manipulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QmError {
    /// A bit-string contained a character outside `{0, 1, -}`.
    MalformedCube { bits: String, position: usize, found: char },
    /// Two cubes (or a cube and a cover) of differing width were combined.
    WidthMismatch { expected: usize, found: usize },
    /// The requested encoding cannot hold this many variables.
    TooManyVariables { n_variables: usize, max_vars: usize },
    /// Rows of an incidence matrix were not all the same length.
    RaggedMatrix { expected: usize, found: usize, row: usize },
}

impl fmt::Display for QmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QmError::MalformedCube { bits, position, found } => write!(
                f,
                "malformed cube {:?}: character {:?} at position {} is not one of '0', '1', '-'",
                bits, found, position
            ),
            QmError::WidthMismatch { expected, found } => {
                write!(f, "width mismatch: expected {} but found {}", expected, found)
            }
            QmError::TooManyVariables { n_variables, max_vars } => write!(
                f,
                "{} variables exceeds this encoding's maximum of {}",
                n_variables, max_vars
            ),
            QmError::RaggedMatrix { expected, found, row } => write!(
                f,
                "incidence matrix row {} has length {} but expected {}",
                row, found, expected
            ),
        }
    }
}

impl std::error::Error for QmError {}

pub type QmResult<T> = Result<T, QmError>;
