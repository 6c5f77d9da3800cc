//! Decoding solver assignments.
//!
//! The decoder is deliberately tolerant about the assignment shape
//! (ids missing from the map count as 0, unknown ids are ignored) and
//! deliberately strict about the result: a conflicting selection is
//! reported in full, never repaired or silently trimmed. Repair
//! policies belong to the caller.

use itertools::Itertools;
use log::debug;
use nohash_hasher::IntMap;

use qf_structure::PairSet;
use qf_structure::Structure;

use crate::InfeasibleSolutionError;
use crate::QKEY;
use crate::Quartet;

/// Map a 0/1 assignment back to the structure implied by the selected
/// quartets, over a sequence of `length` bases.
///
/// The boundary pair shared by two adjacent stacked quartets
/// deduplicates through the pair set. If any two selected quartets are
/// mutually exclusive (crossing or non-stacking overlap), every
/// offending id pair is reported; such an assignment usually means the
/// crossing penalty was too small or a heuristic solver returned an
/// infeasible sample.
pub fn decode(
    assignment: &IntMap<QKEY, bool>,
    quartets: &[Quartet],
    length: usize,
) -> Result<Structure, InfeasibleSolutionError> {
    let selected: Vec<&Quartet> = quartets
        .iter()
        .filter(|q| assignment.get(&q.id()).copied().unwrap_or(false))
        .collect();

    let conflicts: Vec<(QKEY, QKEY)> = selected
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.excludes(b))
        .map(|(a, b)| (a.id(), b.id()))
        .collect();
    if !conflicts.is_empty() {
        debug!(
            "{} of {} selected quartets form conflicting pairs",
            conflicts.len(),
            selected.len()
        );
        return Err(InfeasibleSolutionError { conflicts });
    }

    let mut pairs = PairSet::new(length);
    for q in &selected {
        for pair in q.pairs() {
            pairs.insert(pair);
        }
    }

    // With exclusions ruled out above, no base can appear in two pairs
    // and no two pairs can cross; keep both as debug invariants.
    #[cfg(debug_assertions)]
    {
        let mut seen = nohash_hasher::IntSet::default();
        for pair in pairs.iter() {
            debug_assert!(seen.insert(pair.i()));
            debug_assert!(seen.insert(pair.j()));
        }
        for (a, b) in pairs.to_vec().into_iter().tuple_combinations() {
            debug_assert!(!a.crosses(&b));
        }
    }

    Ok(Structure::from(&pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EnumParams;
    use crate::enumerate_quartets;
    use qf_energy::turner2004;
    use qf_structure::Pair;
    use qf_structure::RnaSequence;

    fn enumerate(seq: &str) -> (Vec<Quartet>, usize) {
        let seq: RnaSequence = seq.parse().unwrap();
        let quartets = enumerate_quartets(&seq, turner2004(), &EnumParams::default()).unwrap();
        (quartets, seq.len())
    }

    fn find(quartets: &[Quartet], outer: Pair) -> &Quartet {
        quartets.iter().find(|q| q.outer() == outer).unwrap()
    }

    fn select(ids: &[QKEY]) -> IntMap<QKEY, bool> {
        ids.iter().map(|&i| (i, true)).collect()
    }

    #[test]
    fn test_stem_roundtrip_with_deduplication() {
        let (quartets, n) = enumerate("GGGAAAUCCC");
        let q1 = find(&quartets, Pair::new(0, 9));
        let q2 = find(&quartets, Pair::new(1, 8));
        let q3 = find(&quartets, Pair::new(2, 7));

        let structure = decode(&select(&[q1.id(), q2.id(), q3.id()]), &quartets, n).unwrap();
        // Six pair mentions collapse to four distinct pairs.
        assert_eq!(
            structure.pairs(),
            &[
                Pair::new(0, 9),
                Pair::new(1, 8),
                Pair::new(2, 7),
                Pair::new(3, 6),
            ]
        );
        assert_eq!(structure.dot_bracket(), "((((..))))");
    }

    #[test]
    fn test_empty_assignment_decodes_to_open_chain() {
        let (quartets, n) = enumerate("GGGAAAUCCC");
        let structure = decode(&IntMap::default(), &quartets, n).unwrap();
        assert!(structure.is_empty());
        assert_eq!(structure.dot_bracket(), "..........");
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let (quartets, n) = enumerate("GGGAAAUCCC");
        let q1 = find(&quartets, Pair::new(0, 9));
        let mut assignment = select(&[q1.id()]);
        assignment.insert(9999, true);
        let structure = decode(&assignment, &quartets, n).unwrap();
        assert_eq!(structure.pairs(), &[Pair::new(0, 9), Pair::new(1, 8)]);
    }

    #[test]
    fn test_crossing_selection_is_rejected_with_both_ids() {
        let (quartets, n) = enumerate("GGAAAAGGAACCAAAACCAA");
        let qa = find(&quartets, Pair::new(0, 11));
        let qb = find(&quartets, Pair::new(6, 17));

        let err = decode(&select(&[qa.id(), qb.id()]), &quartets, n).unwrap_err();
        assert_eq!(err.conflicts, vec![(qa.id(), qb.id())]);
        let msg = format!("{err}");
        assert!(msg.contains(&format!("({},{})", qa.id(), qb.id())));
    }

    #[test]
    fn test_nested_selection_is_accepted() {
        let (quartets, n) = enumerate("GGAAAAGGAACCAAAACCAA");
        let qc = find(&quartets, Pair::new(0, 17));
        let qd = find(&quartets, Pair::new(6, 11));

        let structure = decode(&select(&[qc.id(), qd.id()]), &quartets, n).unwrap();
        assert_eq!(
            structure.pairs(),
            &[
                Pair::new(0, 17),
                Pair::new(1, 16),
                Pair::new(6, 11),
                Pair::new(7, 10),
            ]
        );
    }

    #[test]
    fn test_overlap_selection_reports_every_conflict() {
        let (quartets, n) = enumerate("GGAAAAGGAACCAAAACCAA");
        let qa = find(&quartets, Pair::new(0, 11));
        let qb = find(&quartets, Pair::new(6, 17));
        let qc = find(&quartets, Pair::new(0, 17));

        // qa/qb cross; qa/qc and qb/qc overlap on shared bases.
        let err = decode(&select(&[qa.id(), qb.id(), qc.id()]), &quartets, n).unwrap_err();
        assert_eq!(err.conflicts.len(), 3);
    }
}
