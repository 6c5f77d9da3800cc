//! Decoded secondary structure.
//!
//! A `Structure` is the final, validated output of a folding request:
//! an ordered list of base pairs over a sequence of known length.
//! Construction does not re-check crossing or base occupancy; that is
//! the decoder's job, which only hands over pair sets it has validated.

use std::fmt;

use crate::Pair;
use crate::PairSet;

/// An ordered, non-crossing set of base pairs over a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    length: usize,
    pairs: Vec<Pair>,
}

impl Structure {
    /// Sequence length this structure refers to.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of base pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in ascending (i, j) order.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Render as dot-bracket notation. Assumes pairs are non-crossing.
    pub fn dot_bracket(&self) -> String {
        let mut db = vec!['.'; self.length];
        for pair in &self.pairs {
            debug_assert!(!self.pairs.iter().any(|other| pair.crosses(other)));
            db[pair.i() as usize] = '(';
            db[pair.j() as usize] = ')';
        }
        db.into_iter().collect()
    }
}

impl From<&PairSet> for Structure {
    fn from(ps: &PairSet) -> Self {
        Structure {
            length: ps.length(),
            pairs: ps.to_vec(),
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dot_bracket())
    }
}
