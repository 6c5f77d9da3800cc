//! QUBO coefficient assembly.
//!
//! Objective over binary variables q_i, one per quartet:
//!
//!   F(q) = Σ e_i·q_i  +  Σ r·q_i·q_j  +  Σ p·q_i·(1-q_j)  +  Σ t·q_i·q_j
//!          energies      stackable        UA helix ends       incompatible
//!
//! The UA end term penalizes a helix whose outward-facing pair is U-A
//! and is not continued by a selected outward quartet. Its expansion
//! p·q_i - p·q_i·q_j contributes to both the linear and the quadratic
//! part, once per (flagged i, j in StackableWith(i)) relation.
//!
//! Selecting any incompatible pair must never be optimal, so `t` is
//! required to strictly dominate the sum of absolute energy and reward
//! magnitudes; this is validated, not assumed.

use log::debug;
use nohash_hasher::IntSet;

use crate::ConfigurationError;
use crate::Q2KEY;
use crate::QKEY;
use crate::Quartet;
use crate::QuboModel;
use crate::split_pair_key;

/// Objective weights. All three are in the energy unit of the quartet
/// energies (kcal/mol for the default tables).
#[derive(Debug, Clone, Copy)]
pub struct QuboParams {
    /// Bonus per selected stackable pair. Supply a negative value:
    /// more stacking must strictly lower the objective.
    pub stacking_reward: f64,
    /// Penalty for a helix ending in a U-A pair. Non-negative.
    pub ua_penalty: f64,
    /// Penalty per selected incompatible pair. Required; must exceed
    /// the model's total energy/reward magnitude.
    pub crossing_penalty: f64,
}

impl QuboParams {
    fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.stacking_reward < 0.0) {
            return Err(ConfigurationError::RewardNotNegative {
                reward: self.stacking_reward,
            });
        }
        if !(self.ua_penalty >= 0.0) {
            return Err(ConfigurationError::NegativeUaPenalty {
                penalty: self.ua_penalty,
            });
        }
        Ok(())
    }
}

/// Accumulate the penalty-free part of the model: intrinsic energies,
/// stacking rewards, and the UA end expansion.
fn base_terms(
    quartets: &[Quartet],
    stackable: &IntSet<Q2KEY>,
    stacking_reward: f64,
    ua_penalty: f64,
) -> QuboModel {
    let mut model = QuboModel::new(quartets.len());

    for q in quartets {
        model.add_linear(q.id(), q.energy());
    }

    for &key in stackable {
        model.add_quadratic_key(key, stacking_reward);

        // UA end expansion, both directions when both qualify.
        let (a, b) = split_pair_key(key);
        let (qa, qb) = (&quartets[a as usize], &quartets[b as usize]);
        for (flagged, outward) in [(qa, qb), (qb, qa)] {
            if flagged.ua_end() && outward.stacks_on(flagged) {
                model.add_linear(flagged.id(), ua_penalty);
                model.add_quadratic_key(key, -ua_penalty);
            }
        }
    }

    model
}

/// Smallest crossing penalty that dominates the model built from these
/// inputs. Any `t` strictly greater than this is safe.
pub fn safe_crossing_penalty(
    quartets: &[Quartet],
    stackable: &IntSet<Q2KEY>,
    stacking_reward: f64,
    ua_penalty: f64,
) -> f64 {
    base_terms(quartets, stackable, stacking_reward, ua_penalty).magnitude()
}

/// Assemble the full coefficient matrix.
///
/// Deterministic: identical inputs yield identical coefficient maps.
/// Quartet ids are their positions in `quartets` (enumeration order).
pub fn assemble(
    quartets: &[Quartet],
    stackable: &IntSet<Q2KEY>,
    incompatible: &IntSet<Q2KEY>,
    params: &QuboParams,
) -> Result<QuboModel, ConfigurationError> {
    debug_assert!(
        quartets
            .iter()
            .enumerate()
            .all(|(idx, q)| q.id() == idx as QKEY)
    );
    params.validate()?;

    let mut model = base_terms(
        quartets,
        stackable,
        params.stacking_reward,
        params.ua_penalty,
    );

    let required = model.magnitude();
    if !(params.crossing_penalty > required) {
        return Err(ConfigurationError::CrossingPenaltyTooSmall {
            penalty: params.crossing_penalty,
            required,
        });
    }

    for &key in incompatible {
        model.add_quadratic_key(key, params.crossing_penalty);
    }

    debug!(
        "assembled model: {} vars, {} quadratic terms, penalty floor {:.3}",
        model.num_vars(),
        model.num_quadratic(),
        required
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EnumParams;
    use crate::enumerate_quartets;
    use crate::incompatible_pairs;
    use crate::stackable_pairs;
    use qf_energy::turner2004;
    use qf_structure::Pair;
    use qf_structure::RnaSequence;

    fn pipeline(seq: &str) -> (Vec<Quartet>, IntSet<Q2KEY>, IntSet<Q2KEY>) {
        let seq: RnaSequence = seq.parse().unwrap();
        let quartets = enumerate_quartets(&seq, turner2004(), &EnumParams::default()).unwrap();
        let stackable = stackable_pairs(&quartets);
        let incompatible = incompatible_pairs(&quartets);
        (quartets, stackable, incompatible)
    }

    fn params(t: f64) -> QuboParams {
        QuboParams {
            stacking_reward: -1.0,
            ua_penalty: 0.5,
            crossing_penalty: t,
        }
    }

    fn find(quartets: &[Quartet], outer: Pair) -> &Quartet {
        quartets.iter().find(|q| q.outer() == outer).unwrap()
    }

    #[test]
    fn test_rejects_unsafe_parameters() {
        let (quartets, stackable, incompatible) = pipeline("GGGAAAUCCC");

        let bad_reward = QuboParams {
            stacking_reward: 1.0,
            ..params(100.0)
        };
        assert!(matches!(
            assemble(&quartets, &stackable, &incompatible, &bad_reward),
            Err(ConfigurationError::RewardNotNegative { .. })
        ));

        let bad_ua = QuboParams {
            ua_penalty: -0.5,
            ..params(100.0)
        };
        assert!(matches!(
            assemble(&quartets, &stackable, &incompatible, &bad_ua),
            Err(ConfigurationError::NegativeUaPenalty { .. })
        ));

        let floor = safe_crossing_penalty(&quartets, &stackable, -1.0, 0.5);
        let err = assemble(&quartets, &stackable, &incompatible, &params(floor)).unwrap_err();
        match err {
            ConfigurationError::CrossingPenaltyTooSmall { penalty, required } => {
                assert_eq!(penalty, floor);
                assert_eq!(required, floor);
            }
            other => panic!("expected CrossingPenaltyTooSmall, got {other:?}"),
        }
        assert!(
            assemble(&quartets, &stackable, &incompatible, &params(floor + 0.1)).is_ok()
        );
    }

    #[test]
    fn test_hairpin_coefficients() {
        let (quartets, stackable, incompatible) = pipeline("GGGAAAUCCC");
        let model = assemble(&quartets, &stackable, &incompatible, &params(100.0)).unwrap();

        let q1 = find(&quartets, Pair::new(0, 9));
        let q2 = find(&quartets, Pair::new(1, 8));
        let q3 = find(&quartets, Pair::new(2, 7));

        // No UA flags anywhere: linear terms are the bare energies.
        assert_eq!(model.linear(q1.id()), q1.energy());
        assert_eq!(model.linear(q2.id()), q2.energy());
        assert_eq!(model.linear(q3.id()), q3.energy());

        // Stackable pairs carry the reward, nothing else.
        assert_eq!(model.quadratic(q1.id(), q2.id()), -1.0);
        assert_eq!(model.quadratic(q2.id(), q3.id()), -1.0);
        assert_eq!(model.quadratic(q1.id(), q3.id()), 0.0);
    }

    #[test]
    fn test_ua_flag_without_outward_neighbor_stays_bare() {
        // U(0)-A(11) closes the outermost step; nothing can stack
        // outward of position 0, so no penalty path exists.
        let (quartets, stackable, incompatible) = pipeline("UGGGAAAUCCCA");
        let model = assemble(&quartets, &stackable, &incompatible, &params(1000.0)).unwrap();

        let q0 = find(&quartets, Pair::new(0, 11));
        assert!(q0.ua_end());
        assert_eq!(model.linear(q0.id()), q0.energy());
    }

    #[test]
    fn test_ua_flag_with_outward_neighbor_splits_penalty() {
        // X = (1,12)/(2,11) has a U-A outer pair and Y = (0,13)/(1,12)
        // continues the helix outward of it.
        let (quartets, stackable, incompatible) = pipeline("GUGGGAAAUCCCAC");
        let model = assemble(&quartets, &stackable, &incompatible, &params(1000.0)).unwrap();

        let x = find(&quartets, Pair::new(1, 12));
        let y = find(&quartets, Pair::new(0, 13));
        assert!(x.ua_end());
        assert!(!y.ua_end());

        // p·qx·(1-qy) = p·qx - p·qx·qy.
        assert_eq!(model.linear(x.id()), x.energy() + 0.5);
        assert_eq!(model.quadratic(x.id(), y.id()), -1.0 - 0.5);
        // Y's own linear term is untouched.
        assert_eq!(model.linear(y.id()), y.energy());
    }

    #[test]
    fn test_crossing_pairs_get_the_penalty() {
        let (quartets, stackable, incompatible) = pipeline("GGAAAAGGAACCAAAACCAA");
        assert!(!incompatible.is_empty());
        let model = assemble(&quartets, &stackable, &incompatible, &params(500.0)).unwrap();

        let qa = find(&quartets, Pair::new(0, 11));
        let qb = find(&quartets, Pair::new(6, 17));
        assert_eq!(model.quadratic(qa.id(), qb.id()), 500.0);

        // Compatible nested stems carry no penalty.
        let qc = find(&quartets, Pair::new(0, 17));
        let qd = find(&quartets, Pair::new(6, 11));
        assert_eq!(model.quadratic(qc.id(), qd.id()), 0.0);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let (quartets, stackable, incompatible) = pipeline("GUGGGAAAUCCCAC");
        let a = assemble(&quartets, &stackable, &incompatible, &params(1000.0)).unwrap();
        let b = assemble(&quartets, &stackable, &incompatible, &params(1000.0)).unwrap();
        assert_eq!(a, b);
    }
}
