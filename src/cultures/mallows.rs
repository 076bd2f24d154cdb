use super::urn::{random_ranking, reference_ranking};
use crate::error::{invalid_parameter, ConsensusResult};
use crate::profile::{Alternative, Ranking, WeightedProfile};
use fastrand::Rng;

/// One component of a Mallows mixture.
#[derive(Debug, Clone)]
pub struct MallowsModel<A> {
    /// Mixture probability; weights across a mixture sum to 1.
    pub weight: f64,
    /// Dispersion in [0, 1]: 0 returns the reference only, 1 is uniform.
    pub phi: f64,
    pub reference: Ranking<A>,
}

/// Insertion-position distributions for the repeated insertion model.
///
/// Entry `i - 1` is the distribution for inserting the i-th reference item:
/// position j (1-based, of i) has probability phi^(i-j) / sum_{k<i} phi^k.
pub fn mallows_insertion_distribution(num_alternatives: usize, phi: f64) -> Vec<Vec<f64>> {
    (1..=num_alternatives)
        .map(|i| {
            let denom: f64 = (0..i).map(|k| phi.powi(k as i32)).sum();
            (1..=i).map(|j| phi.powi((i - j) as i32) / denom).collect()
        })
        .collect()
}

/// Draws from a mixture of Mallows models over `alternatives`.
pub fn mallows<A: Alternative>(
    rng: &mut Rng,
    num_votes: usize,
    alternatives: &[A],
    models: &[MallowsModel<A>],
) -> ConsensusResult<WeightedProfile<A>> {
    let base = reference_ranking(alternatives)?;
    if models.is_empty() {
        return Err(invalid_parameter("a Mallows mixture needs at least one model"));
    }
    for model in models {
        if !(0.0..=1.0).contains(&model.phi) {
            return Err(invalid_parameter(format!("phi {} is outside [0, 1]", model.phi)));
        }
        if model.reference.alternative_set() != base.alternative_set() {
            return Err(invalid_parameter(format!(
                "reference {:?} does not rank {:?}",
                model.reference.as_slice(),
                alternatives
            )));
        }
    }
    let mix: Vec<f64> = models.iter().map(|m| m.weight).collect();
    if mix.iter().any(|w| *w < 0.0) || ((mix.iter().sum::<f64>() - 1.0).abs() > 1e-5) {
        return Err(invalid_parameter(format!(
            "mixture weights {:?} are not a distribution",
            mix
        )));
    }

    let insertion: Vec<Vec<Vec<f64>>> = models
        .iter()
        .map(|m| mallows_insertion_distribution(alternatives.len(), m.phi))
        .collect();

    let mut profile = WeightedProfile::new();
    for _ in 0..num_votes {
        let which = draw(rng, &mix);
        let reference = models[which].reference.as_slice();

        let mut vote: Vec<A> = Vec::with_capacity(reference.len());
        for (item, dist) in reference.iter().zip(&insertion[which]) {
            vote.insert(draw(rng, dist), item.clone());
        }
        profile.add_vote(Ranking::new(vote)?)?;
    }
    Ok(profile)
}

/// A mixture of `num_references` Mallows models with random references,
/// random phis and random mixture weights.
pub fn mallows_mix<A: Alternative>(
    rng: &mut Rng,
    num_votes: usize,
    alternatives: &[A],
    num_references: usize,
) -> ConsensusResult<WeightedProfile<A>> {
    let base = reference_ranking(alternatives)?;
    if num_references == 0 {
        return Err(invalid_parameter("a Mallows mixture needs at least one reference"));
    }

    let raw: Vec<u32> = (0..num_references).map(|_| rng.u32(1..=100)).collect();
    let total: u32 = raw.iter().sum();
    let models = raw
        .iter()
        .map(|&w| {
            Ok(MallowsModel {
                weight: w as f64 / total as f64,
                phi: (rng.f64() * 1e5).round() / 1e5,
                reference: random_ranking(rng, &base)?,
            })
        })
        .collect::<ConsensusResult<Vec<_>>>()?;

    mallows(rng, num_votes, alternatives, &models)
}

/// Index drawn from a discrete distribution.
fn draw(rng: &mut Rng, distro: &[f64]) -> usize {
    let mut remaining = rng.f64();
    for (i, p) in distro.iter().enumerate() {
        remaining -= p;
        if remaining < 0.0 {
            return i;
        }
    }
    // rounding left a sliver past the last bucket
    distro.iter().rposition(|p| *p > 0.0).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_respects_point_mass() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..100 {
            assert_eq!(draw(&mut rng, &[0.0, 0.0, 1.0]), 2);
            assert_eq!(draw(&mut rng, &[1.0]), 0);
        }
    }
}
