use super::ConsensusMode;
use crate::error::ConsensusResult;
use crate::metric::InversionEngine;
use crate::profile::{Alternative, Ranking, WeightedProfile};
use serde::Serialize;

/// One profile ranking scored against a candidate axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "A: Alternative + Serialize"))]
pub struct ScoredRecord<'a, A> {
    pub ranking: &'a Ranking<A>,
    pub weight: u64,
    pub distance: u64,
}

/// Why a candidate axis was accepted or rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum AxisVerdict {
    Consensus,
    /// A heavier ranking is not closer to the axis than the next lighter one.
    NotMonotone {
        position: usize,
        heavier_distance: u64,
        lighter_distance: u64,
    },
    /// The shell at `distance` has more permutations than rankings remain.
    Incomplete {
        distance: u64,
        required: u128,
        available: usize,
    },
    /// Rankings remain after every shell up to the cutoff is filled.
    Surplus { remaining: usize },
}

impl AxisVerdict {
    pub fn is_consensus(&self) -> bool {
        matches!(self, AxisVerdict::Consensus)
    }
}

/// Distances to `axis`, grouped by weight descending and by distance
/// ascending within a weight. Ties keep profile order.
pub fn score_records<'a, A: Alternative>(
    engine: &InversionEngine,
    profile: &'a WeightedProfile<A>,
    axis: &Ranking<A>,
) -> ConsensusResult<Vec<ScoredRecord<'a, A>>> {
    let mut records = profile
        .iter()
        .map(|(ranking, weight)| {
            Ok(ScoredRecord {
                ranking,
                weight,
                distance: engine.distance(ranking, axis)?,
            })
        })
        .collect::<ConsensusResult<Vec<_>>>()?;

    records.sort_by(|x, y| {
        y.weight
            .cmp(&x.weight)
            .then_with(|| x.distance.cmp(&y.distance))
    });
    Ok(records)
}

/// At every weight drop the distance has to grow (strict) or not shrink
/// (flexible).
pub fn check_monotone<A>(records: &[ScoredRecord<'_, A>], mode: ConsensusMode) -> AxisVerdict {
    for (position, pair) in records.windows(2).enumerate() {
        let (heavier, lighter) = (&pair[0], &pair[1]);
        if heavier.weight <= lighter.weight {
            continue;
        }
        let ok = match mode {
            ConsensusMode::Strict => heavier.distance < lighter.distance,
            ConsensusMode::Flexible => heavier.distance <= lighter.distance,
        };
        if !ok {
            return AxisVerdict::NotMonotone {
                position,
                heavier_distance: heavier.distance,
                lighter_distance: lighter.distance,
            };
        }
    }
    AxisVerdict::Consensus
}

/// The support must be exactly the ball of permutations around the axis out
/// to the farthest ranking present. In flexible mode the outermost shell may
/// be partial, so only the rankings strictly inside it are counted.
pub fn check_complete<A>(
    engine: &InversionEngine,
    records: &[ScoredRecord<'_, A>],
    num_alternatives: usize,
    mode: ConsensusMode,
) -> AxisVerdict {
    let Some(last) = records.last() else {
        return AxisVerdict::Consensus;
    };
    let cutoff = last.distance;

    let (mut remaining, shells) = match mode {
        ConsensusMode::Strict => (records.len(), 0..cutoff + 1),
        ConsensusMode::Flexible => (
            records.iter().filter(|r| r.distance < cutoff).count(),
            0..cutoff,
        ),
    };

    for distance in shells {
        let required = engine.permutations_with_inversions(num_alternatives, distance as usize);
        if required > remaining as u128 {
            return AxisVerdict::Incomplete {
                distance,
                required,
                available: remaining,
            };
        }
        remaining -= required as usize;
    }

    if remaining == 0 {
        AxisVerdict::Consensus
    } else {
        AxisVerdict::Surplus { remaining }
    }
}
