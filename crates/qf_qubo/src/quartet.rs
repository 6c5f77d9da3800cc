//! Quartet enumeration.
//!
//! A quartet is one helix step: two stacked base pairs (i, j) and
//! (i+1, j-1). Quartets are the binary decision units of the model;
//! each carries its intrinsic stack energy and a stable id that doubles
//! as the variable index.

use log::debug;

use qf_energy::EnergyTable;
use qf_energy::LookupError;
use qf_energy::StackContext;
use qf_structure::Base;
use qf_structure::NAIDX;
use qf_structure::Pair;
use qf_structure::PairingRule;
use qf_structure::RnaSequence;

use crate::QKEY;

/// Enumeration parameters.
#[derive(Debug, Clone)]
pub struct EnumParams {
    /// Minimum index distance between the two sides of a pair.
    pub min_loop: usize,
    /// Which base combinations may pair.
    pub pairing: PairingRule,
}

impl Default for EnumParams {
    fn default() -> Self {
        EnumParams {
            min_loop: 3,
            pairing: PairingRule::Wobble,
        }
    }
}

/// A candidate helix step: outer pair (i, j) stacked on inner pair
/// (i+1, j-1). Immutable once enumerated; identity is (outer, inner).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartet {
    id: QKEY,
    outer: Pair,
    inner: Pair,
    energy: f64,
    ua_end: bool,
}

impl Quartet {
    /// The binary variable index of this quartet.
    pub fn id(&self) -> QKEY {
        self.id
    }

    pub fn outer(&self) -> Pair {
        self.outer
    }

    pub fn inner(&self) -> Pair {
        self.inner
    }

    /// Intrinsic stack free energy (kcal/mol).
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// True if the outer pair is U-A or A-U.
    pub fn ua_end(&self) -> bool {
        self.ua_end
    }

    /// Both base pairs of this helix step.
    pub fn pairs(&self) -> [Pair; 2] {
        [self.outer, self.inner]
    }

    /// True if `self` stacks on `other`: self.inner == other.outer,
    /// the direct vertical continuation of the helix.
    pub fn stacks_on(&self, other: &Quartet) -> bool {
        self.inner == other.outer
    }

    /// True if any base pair of `self` properly crosses any base pair
    /// of `other` (pseudoknot geometry).
    pub fn crosses(&self, other: &Quartet) -> bool {
        self.pairs()
            .iter()
            .any(|p| other.pairs().iter().any(|q| p.crosses(q)))
    }

    /// True if the two quartets claim a common base.
    pub fn overlaps(&self, other: &Quartet) -> bool {
        self.pairs()
            .iter()
            .any(|p| other.pairs().iter().any(|q| p.shares_base(q)))
    }

    /// True if the two quartets cannot coexist in one structure:
    /// crossing, or overlapping outside the stacking relation.
    /// Adjacent stacked steps share their boundary pair by
    /// construction; that shared pair is not a conflict.
    pub fn excludes(&self, other: &Quartet) -> bool {
        if self.stacks_on(other) || other.stacks_on(self) {
            return false;
        }
        self.crosses(other) || self.overlaps(other)
    }
}

/// Enumerate all valid quartets of `seq` in deterministic scan order
/// (outer i ascending, then j).
///
/// Validity checks run inline during the O(n²) scan; no candidate pair
/// list is ever materialized. A sequence too short to hold a stacked
/// helix step yields an empty result, which is a valid (trivially
/// unfolded) outcome rather than an error.
///
/// `seq` is already alphabet-validated, so with a table covering every
/// pairable stack context the lookup cannot fail; an incomplete custom
/// table surfaces here as a `LookupError`.
pub fn enumerate_quartets(
    seq: &RnaSequence,
    table: &EnergyTable,
    params: &EnumParams,
) -> Result<Vec<Quartet>, LookupError> {
    let n = seq.len();
    // Two closing pairs on each flank plus the enclosed loop.
    if n < 2 * params.min_loop + 4 {
        debug!("sequence of {n} nt too short to stack, no quartets");
        return Ok(Vec::new());
    }

    let mut quartets = Vec::new();
    for i in 0..n {
        // Start where the inner pair (i+1, j-1) meets the loop
        // allowance as well; the outer pair then does trivially.
        for j in (i + params.min_loop + 2)..n {
            if !params.pairing.allows(seq[i], seq[j]) {
                continue;
            }
            if !params.pairing.allows(seq[i + 1], seq[j - 1]) {
                continue;
            }
            let outer = (seq[i], seq[j]);
            let inner = (seq[i + 1], seq[j - 1]);
            let energy = table.stack(&StackContext::new(outer, inner))?;
            let ua_end = matches!(outer, (Base::A, Base::U) | (Base::U, Base::A));
            quartets.push(Quartet {
                id: quartets.len() as QKEY,
                outer: Pair::new(i as NAIDX, j as NAIDX),
                inner: Pair::new((i + 1) as NAIDX, (j - 1) as NAIDX),
                energy,
                ua_end,
            });
        }
    }
    debug!("enumerated {} quartets from {} nt", quartets.len(), n);
    Ok(quartets)
}
