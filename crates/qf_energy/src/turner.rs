//! Embedded nearest-neighbor parameters for RNA.
//!
//! Stack free energies (ΔG°37, kcal/mol):
//! Watson-Crick steps from Xia et al. (1998), Biochemistry 37:14719-14735.
//! Wobble steps from Mathews, Sabina, Zuker & Turner (1999),
//! J Mol Biol 288:911-940.
//!
//! Terminal AU/GU closure penalty from Xia et al. (1998).
//!
//! Each entry is one duplex step ((outer 5', outer 3'), (inner 5', inner 3'));
//! the flipped orientation is inserted by `EnergyTable::from_entries`.

use once_cell::sync::Lazy;

use qf_structure::Base::{self, A, C, G, U};

use crate::EnergyTable;
use crate::StackContext;

type RawStack = ((Base, Base), (Base, Base), f64);

static RAW_STACKS: [RawStack; 21] = [
    // Watson-Crick on Watson-Crick.
    ((A, U), (A, U), -0.93),
    ((A, U), (U, A), -1.10),
    ((U, A), (A, U), -1.33),
    ((C, G), (U, A), -2.08),
    ((C, G), (A, U), -2.11),
    ((G, C), (U, A), -2.24),
    ((G, C), (A, U), -2.35),
    ((C, G), (G, C), -2.36),
    ((G, C), (G, C), -3.26),
    ((G, C), (C, G), -3.42),
    // Steps involving the G-U wobble pair.
    ((A, U), (G, U), -0.55),
    ((A, U), (U, G), -1.36),
    ((U, A), (G, U), -1.27),
    ((U, A), (U, G), -1.00),
    ((C, G), (G, U), -1.41),
    ((C, G), (U, G), -2.11),
    ((G, C), (G, U), -1.53),
    ((G, C), (U, G), -2.51),
    ((G, U), (G, U), -0.50),
    ((G, U), (U, G), 1.29),
    ((U, G), (G, U), 0.30),
];

static RAW_TERMINAL: [((Base, Base), f64); 3] = [
    ((A, U), 0.45),
    ((G, U), 0.45),
    ((C, G), 0.0),
];

static TURNER2004: Lazy<EnergyTable> = Lazy::new(|| {
    EnergyTable::from_entries(
        RAW_STACKS
            .iter()
            .map(|&(outer, inner, dg)| (StackContext::new(outer, inner), dg)),
        RAW_TERMINAL.iter().copied(),
    )
});

/// The default parameter set, built once per process.
pub fn turner2004() -> &'static EnergyTable {
    &TURNER2004
}
