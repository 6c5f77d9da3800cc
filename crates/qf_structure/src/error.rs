use std::fmt;

/// Error type for sequence parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A character outside the {A, C, G, U} alphabet at the given position.
    InvalidSymbol { index: usize, symbol: char },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::InvalidSymbol { index, symbol } => {
                write!(f, "invalid symbol '{symbol}' at position {index}")
            }
        }
    }
}

impl std::error::Error for SequenceError {}
