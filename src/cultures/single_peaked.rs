use super::urn::reference_ranking;
use crate::error::ConsensusResult;
use crate::profile::{Alternative, Ranking, WeightedProfile};
use fastrand::Rng;

/// Impartial culture restricted to rankings single-peaked on `alternatives`.
pub fn single_peaked<A: Alternative>(
    rng: &mut Rng,
    num_votes: usize,
    alternatives: &[A],
) -> ConsensusResult<WeightedProfile<A>> {
    reference_ranking(alternatives)?;
    let mut profile = WeightedProfile::new();
    for _ in 0..num_votes {
        profile.add_vote(single_peaked_vote(rng, alternatives)?)?;
    }
    Ok(profile)
}

/// Builds the ranking from the worst end: repeatedly peel the leftmost or
/// rightmost remaining alternative off the axis with a fair coin.
pub fn single_peaked_vote<A: Alternative>(rng: &mut Rng, axis: &[A]) -> ConsensusResult<Ranking<A>> {
    let mut order = Vec::with_capacity(axis.len());
    if let Some(last) = axis.len().checked_sub(1) {
        let (mut lo, mut hi) = (0, last);
        while lo != hi {
            if rng.bool() {
                order.push(axis[lo].clone());
                lo += 1;
            } else {
                order.push(axis[hi].clone());
                hi -= 1;
            }
        }
        order.push(axis[lo].clone());
    }
    order.reverse();
    Ranking::new(order)
}
