pub mod verdict;

pub use self::verdict::{check_complete, check_monotone, score_records, AxisVerdict, ScoredRecord};
use crate::error::ConsensusResult;
use crate::metric::InversionEngine;
use crate::profile::{Alternative, Ranking, WeightedProfile};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// Strict level-1 consensus, or the relaxed variant that lets a lighter
/// ranking sit at the same distance as a heavier one.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ConsensusMode {
    #[default]
    Strict,
    Flexible,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DetectorOptions {
    /// Evaluate candidate axes on the rayon pool. The answer is still the
    /// first passing candidate in profile order.
    pub parallel: bool,
}

/// Searches the maximum-weight rankings of a profile for a consensus axis.
pub struct ConsensusDetector {
    engine: Arc<InversionEngine>,
    options: DetectorOptions,
}

impl Default for ConsensusDetector {
    fn default() -> Self {
        Self::new(Arc::new(InversionEngine::new()))
    }
}

impl ConsensusDetector {
    pub fn new(engine: Arc<InversionEngine>) -> Self {
        Self::with_options(engine, DetectorOptions::default())
    }

    pub fn with_options(engine: Arc<InversionEngine>, options: DetectorOptions) -> Self {
        Self { engine, options }
    }

    pub fn engine(&self) -> &InversionEngine {
        &self.engine
    }

    pub fn options(&self) -> DetectorOptions {
        self.options
    }

    /// The first maximum-weight ranking that passes both the monotonicity and
    /// the completeness check, or `None` when no candidate does.
    pub fn find_axis<A: Alternative>(
        &self,
        profile: &WeightedProfile<A>,
        mode: ConsensusMode,
    ) -> ConsensusResult<Option<Ranking<A>>> {
        profile.ensure_non_empty()?;
        let candidates = candidate_axes(profile);

        if self.options.parallel && candidates.len() > 1 {
            return candidates
                .par_iter()
                .find_map_first(|axis| match self.evaluate_axis(profile, axis, mode) {
                    Ok(verdict) if verdict.is_consensus() => Some(Ok((*axis).clone())),
                    Ok(_) => None,
                    Err(e) => Some(Err(e)),
                })
                .transpose();
        }

        for axis in candidates {
            if self.evaluate_axis(profile, axis, mode)?.is_consensus() {
                return Ok(Some(axis.clone()));
            }
        }
        Ok(None)
    }

    /// Runs both checks for one hypothesised axis.
    pub fn evaluate_axis<A: Alternative>(
        &self,
        profile: &WeightedProfile<A>,
        axis: &Ranking<A>,
        mode: ConsensusMode,
    ) -> ConsensusResult<AxisVerdict> {
        profile.ensure_non_empty()?;
        let records = score_records(&self.engine, profile, axis)?;

        let mut verdict = check_monotone(&records, mode);
        if verdict.is_consensus() {
            verdict = check_complete(&self.engine, &records, profile.num_alternatives(), mode);
        }

        debug!(
            "axis {:?} ({}): {:?} over {} rankings",
            axis.as_slice(),
            mode,
            verdict,
            records.len()
        );
        Ok(verdict)
    }

    pub fn score_records<'a, A: Alternative>(
        &self,
        profile: &'a WeightedProfile<A>,
        axis: &Ranking<A>,
    ) -> ConsensusResult<Vec<ScoredRecord<'a, A>>> {
        score_records(&self.engine, profile, axis)
    }
}

/// Rankings carrying the profile's maximum weight, in profile order.
pub fn candidate_axes<A: Alternative>(profile: &WeightedProfile<A>) -> Vec<&Ranking<A>> {
    let Some(max_weight) = profile.max_weight() else {
        return Vec::new();
    };
    profile
        .iter()
        .filter(|(_, weight)| *weight == max_weight)
        .map(|(ranking, _)| ranking)
        .collect()
}

/// One-shot search with a throwaway engine.
pub fn level1_consensus<A: Alternative>(
    profile: &WeightedProfile<A>,
    mode: ConsensusMode,
) -> ConsensusResult<Option<Ranking<A>>> {
    ConsensusDetector::default().find_axis(profile, mode)
}
