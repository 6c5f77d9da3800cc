//! Energy table lookups.
//!
//! A `StackContext` names one helix step: the outer pair (i, j) and the
//! inner pair (i+1, j-1), each as (5'-side base, 3'-side base). Reading
//! the duplex from the other strand gives the flipped context, which is
//! the same physical step; tables store both orientations so lookups
//! never have to canonicalize.

use std::fmt;
use ahash::AHashMap;

use qf_structure::Base;

/// One helix step: outer pair stacked on inner pair.
///
/// `outer` is (base at i, base at j), `inner` is (base at i+1, base at j-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StackContext {
    pub outer: (Base, Base),
    pub inner: (Base, Base),
}

impl StackContext {
    pub fn new(outer: (Base, Base), inner: (Base, Base)) -> Self {
        StackContext { outer, inner }
    }

    /// The same duplex step read from the opposite strand.
    pub fn flipped(&self) -> Self {
        StackContext {
            outer: (self.inner.1, self.inner.0),
            inner: (self.outer.1, self.outer.0),
        }
    }
}

impl fmt::Display for StackContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "5'{}{}3'/3'{}{}5'",
            self.outer.0, self.inner.0, self.outer.1, self.inner.1
        )
    }
}

/// Error type for energy table lookups.
///
/// A miss means the caller let an unvalidated pair context through;
/// it is fatal to the folding request, never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// No entry for this helix step.
    UnknownStack(StackContext),
    /// No entry for this terminal pair.
    UnknownTerminal(Base, Base),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::UnknownStack(ctx) => {
                write!(f, "no stack energy for {ctx}")
            }
            LookupError::UnknownTerminal(a, b) => {
                write!(f, "no terminal energy for pair {a}-{b}")
            }
        }
    }
}

impl std::error::Error for LookupError {}

/// Read-only map from stack/terminal contexts to free energies (kcal/mol).
#[derive(Debug, Clone, Default)]
pub struct EnergyTable {
    stacks: AHashMap<StackContext, f64>,
    terminal: AHashMap<(Base, Base), f64>,
}

impl EnergyTable {
    /// Build a table from raw entries. Each stack entry is inserted in
    /// both orientations; an explicit flipped entry with a different
    /// value would be a malformed parameter set, so insertion asserts
    /// agreement in debug builds.
    pub fn from_entries(
        stacks: impl IntoIterator<Item = (StackContext, f64)>,
        terminal: impl IntoIterator<Item = ((Base, Base), f64)>,
    ) -> Self {
        let mut table = EnergyTable::default();
        for (ctx, dg) in stacks {
            let prev = table.stacks.insert(ctx, dg);
            debug_assert!(prev.is_none_or(|v| v == dg));
            let prev = table.stacks.insert(ctx.flipped(), dg);
            debug_assert!(prev.is_none_or(|v| v == dg));
        }
        for ((a, b), dg) in terminal {
            table.terminal.insert((a, b), dg);
            table.terminal.insert((b, a), dg);
        }
        table
    }

    /// Free energy of a helix step.
    pub fn stack(&self, ctx: &StackContext) -> Result<f64, LookupError> {
        self.stacks
            .get(ctx)
            .copied()
            .ok_or(LookupError::UnknownStack(*ctx))
    }

    /// Closure penalty for a helix-terminal pair.
    pub fn terminal(&self, a: Base, b: Base) -> Result<f64, LookupError> {
        self.terminal
            .get(&(a, b))
            .copied()
            .ok_or(LookupError::UnknownTerminal(a, b))
    }

    /// Number of distinct stack contexts (both orientations counted).
    pub fn num_stacks(&self) -> usize {
        self.stacks.len()
    }
}
