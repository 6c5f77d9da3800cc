//! The qf_energy crate.
//!
//! Wraps experimentally derived nearest-neighbor energies for RNA
//! helix steps:
//!  - stack free energies (two adjacent base pairs).
//!  - terminal pair closure penalties.
//!
//! Tables are read-only after construction and safe to share across
//! threads without synchronization. A default table built from
//! published parameters is available via [`turner2004`].

mod table;
mod turner;

pub use table::*;
pub use turner::*;
