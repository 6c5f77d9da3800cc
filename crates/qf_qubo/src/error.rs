use std::fmt;

use crate::QKEY;

/// Error type for model assembly parameter validation.
///
/// Raised before any coefficients leave the assembler; a model built
/// from rejected parameters could make an invalid structure optimal.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The stacking reward must be supplied as a negative energy, so
    /// that selecting stacked quartets strictly lowers the objective.
    RewardNotNegative { reward: f64 },

    /// The UA end penalty must be non-negative.
    NegativeUaPenalty { penalty: f64 },

    /// The crossing penalty must strictly exceed the sum of absolute
    /// linear and reward magnitudes, so no optimal solution can afford
    /// a crossing.
    CrossingPenaltyTooSmall { penalty: f64, required: f64 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::RewardNotNegative { reward } => {
                write!(f, "stacking reward {reward} must be negative")
            }
            ConfigurationError::NegativeUaPenalty { penalty } => {
                write!(f, "UA end penalty {penalty} must be non-negative")
            }
            ConfigurationError::CrossingPenaltyTooSmall { penalty, required } => {
                write!(
                    f,
                    "crossing penalty {penalty} does not dominate the model \
                     (needs to exceed {required})"
                )
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// A decoded assignment that violates structural invariants.
///
/// Reported, not fatal: the usual cause is a heuristic solver
/// returning a non-optimal sample, or a penalty weight chosen too
/// small. Callers may re-solve with a reweighted model or repair the
/// structure by an external policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfeasibleSolutionError {
    /// Every pair of selected quartet ids that cannot coexist.
    pub conflicts: Vec<(QKEY, QKEY)>,
}

impl fmt::Display for InfeasibleSolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "assignment selects mutually exclusive quartets:")?;
        for (a, b) in &self.conflicts {
            write!(f, " ({a},{b})")?;
        }
        Ok(())
    }
}

impl std::error::Error for InfeasibleSolutionError {}
