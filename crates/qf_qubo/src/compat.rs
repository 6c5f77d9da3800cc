//! Pairwise quartet relations.
//!
//! Pure functions over the enumerated quartet set: nothing here is
//! cached or mutated in place, callers recompute per folding request.
//! Both relations are symmetric and stored once per unordered id pair
//! under the canonical packed key.

use log::debug;
use nohash_hasher::IntMap;
use nohash_hasher::IntSet;
use rayon::prelude::*;

use qf_structure::P1KEY;

use crate::Q2KEY;
use crate::QKEY;
use crate::Quartet;
use crate::pair_key;

/// Unordered id pairs where one quartet stacks directly on the other
/// (vertical helix continuation). Each related pair appears exactly
/// once.
///
/// With single-step stacking a quartet is uniquely identified by its
/// outer pair, so the relation resolves through an outer-pair index
/// in O(m) instead of an O(m²) sweep.
pub fn stackable_pairs(quartets: &[Quartet]) -> IntSet<Q2KEY> {
    let outer_idx: IntMap<P1KEY, QKEY> = quartets
        .iter()
        .map(|q| (q.outer().key(), q.id()))
        .collect();

    let mut pairs = IntSet::default();
    for q in quartets {
        // q stacks on the quartet whose outer pair is q's inner pair.
        if let Some(&inward) = outer_idx.get(&q.inner().key()) {
            pairs.insert(pair_key(q.id(), inward));
        }
    }
    debug!(
        "{} stackable pairs among {} quartets",
        pairs.len(),
        quartets.len()
    );
    pairs
}

/// Unordered id pairs that are mutually exclusive in any structure:
/// proper crossings (pseudoknot geometry) plus base overlaps outside
/// the stacking relation. This is the set the crossing penalty
/// applies to.
///
/// The O(m²) sweep shards by quartet index across the thread pool;
/// shard results merge by set union, with no ordering dependency
/// between shards.
pub fn incompatible_pairs(quartets: &[Quartet]) -> IntSet<Q2KEY> {
    let keys: Vec<Q2KEY> = quartets
        .par_iter()
        .enumerate()
        .flat_map_iter(|(a, qa)| {
            quartets[a + 1..].iter().filter_map(move |qb| {
                qa.excludes(qb).then(|| pair_key(qa.id(), qb.id()))
            })
        })
        .collect();

    let pairs: IntSet<Q2KEY> = keys.into_iter().collect();
    debug!(
        "{} incompatible pairs among {} quartets",
        pairs.len(),
        quartets.len()
    );
    pairs
}
