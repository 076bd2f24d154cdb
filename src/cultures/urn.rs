use crate::error::{invalid_parameter, ConsensusResult};
use crate::profile::{Alternative, Ranking, WeightedProfile};
use fastrand::Rng;
use std::collections::HashMap;

/// Every ranking equally likely.
pub fn impartial_culture<A: Alternative>(
    rng: &mut Rng,
    num_votes: usize,
    alternatives: &[A],
) -> ConsensusResult<WeightedProfile<A>> {
    urn(rng, num_votes, 0, alternatives)
}

/// Every anonymous profile equally likely (urn with one replacement).
pub fn impartial_anonymous_culture<A: Alternative>(
    rng: &mut Rng,
    num_votes: usize,
    alternatives: &[A],
) -> ConsensusResult<WeightedProfile<A>> {
    urn(rng, num_votes, 1, alternatives)
}

/// Pólya-Eggenberger urn.
///
/// The urn starts with one copy of each of the n! rankings. Each vote draws a
/// ranking from the urn and puts `replacements` extra copies of it back.
pub fn urn<A: Alternative>(
    rng: &mut Rng,
    num_votes: usize,
    replacements: u64,
    alternatives: &[A],
) -> ConsensusResult<WeightedProfile<A>> {
    let reference = reference_ranking(alternatives)?;
    let num_orders = factorial(alternatives.len());

    let mut profile = WeightedProfile::new();
    let mut pool: Vec<(Ranking<A>, u128)> = Vec::new();
    let mut pool_index: HashMap<Ranking<A>, usize> = HashMap::new();
    let mut pool_size: u128 = 0;

    for _ in 0..num_votes {
        let flip = rng.u128(1..=num_orders.saturating_add(pool_size));

        let slot = if flip <= num_orders {
            let fresh = random_ranking(rng, &reference)?;
            match pool_index.get(&fresh) {
                Some(&slot) => slot,
                None => {
                    pool_index.insert(fresh.clone(), pool.len());
                    pool.push((fresh, 0));
                    pool.len() - 1
                }
            }
        } else {
            let mut left = flip - num_orders;
            pool.iter()
                .position(|(_, copies)| {
                    if left <= *copies {
                        true
                    } else {
                        left -= copies;
                        false
                    }
                })
                .ok_or_else(|| invalid_parameter("urn draw fell through the replacement pool"))?
        };

        pool[slot].1 += replacements as u128;
        pool_size += replacements as u128;
        profile.add_vote(pool[slot].0.clone())?;
    }

    Ok(profile)
}

/// Uniformly shuffled copy of `reference`.
pub fn random_ranking<A: Alternative>(rng: &mut Rng, reference: &Ranking<A>) -> ConsensusResult<Ranking<A>> {
    let mut order = reference.as_slice().to_vec();
    rng.shuffle(&mut order);
    Ranking::new(order)
}

/// Validates a generator's alternative list and returns it as a ranking.
pub(crate) fn reference_ranking<A: Alternative>(alternatives: &[A]) -> ConsensusResult<Ranking<A>> {
    if alternatives.is_empty() {
        return Err(invalid_parameter("at least one alternative is required"));
    }
    Ranking::new(alternatives.to_vec())
        .map_err(|_| invalid_parameter(format!("{:?} repeats an alternative", alternatives)))
}

/// n!, saturating.
pub fn factorial(n: usize) -> u128 {
    (1..=n as u128).fold(1u128, |acc, k| acc.saturating_mul(k))
}
