use crate::config::{CultureParams, ExperimentParams};
use crate::consensus::{ConsensusDetector, ConsensusMode};
use crate::cultures::Culture;
use crate::domain::single_peaked_axis;
use crate::error::{invalid_parameter, ConsensusResult};
use crate::profile::{Alternative, WeightedProfile};
use fastrand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub trials: usize,
    pub strict: usize,
    pub flexible: usize,
    pub single_peaked: usize,
}

impl Tally {
    fn add(&mut self, other: Tally) {
        self.trials += other.trials;
        self.strict += other.strict;
        self.flexible += other.flexible;
        self.single_peaked += other.single_peaked;
    }
}

/// Counts how often strict consensus, flexible consensus and a single-peaked
/// support occur, keyed by the number of alternatives.
#[derive(Debug, Default, Clone)]
pub struct ConsensusCounter {
    tallies: BTreeMap<usize, Tally>,
}

impl ConsensusCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs both detections and the single-peakedness test on `profile` and
    /// records the outcome.
    pub fn count<A: Alternative>(
        &mut self,
        detector: &ConsensusDetector,
        profile: &WeightedProfile<A>,
    ) -> ConsensusResult<()> {
        let start = Instant::now();
        let strict = detector.find_axis(profile, ConsensusMode::Strict)?;
        let flexible = detector.find_axis(profile, ConsensusMode::Flexible)?;
        let axis = single_peaked_axis(profile);
        debug!(
            "{} rankings: strict={:?} flexible={:?} single-peaked on {:?} in {:?}",
            profile.len(),
            strict.as_ref().map(|r| r.as_slice()),
            flexible.as_ref().map(|r| r.as_slice()),
            axis,
            start.elapsed()
        );

        self.record(
            profile.num_alternatives(),
            strict.is_some(),
            flexible.is_some(),
            axis.is_some(),
        );
        Ok(())
    }

    pub fn record(
        &mut self,
        num_alternatives: usize,
        strict: bool,
        flexible: bool,
        single_peaked: bool,
    ) {
        let tally = self.tallies.entry(num_alternatives).or_default();
        tally.trials += 1;
        tally.strict += strict as usize;
        tally.flexible += flexible as usize;
        tally.single_peaked += single_peaked as usize;
    }

    pub fn tally(&self, num_alternatives: usize) -> Tally {
        self.tallies.get(&num_alternatives).copied().unwrap_or_default()
    }

    pub fn totals(&self) -> Tally {
        let mut total = Tally::default();
        for tally in self.tallies.values() {
            total.add(*tally);
        }
        total
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Tally)> + '_ {
        self.tallies.iter().map(|(n, t)| (*n, *t))
    }
}

/// One cell of an experiment grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentRow {
    pub culture: Culture,
    pub iterations: usize,
    pub num_votes: usize,
    pub phi: Option<f64>,
    pub num_alternatives: usize,
    pub strict_consensus: usize,
    pub flexible_consensus: usize,
    /// Trials whose support is single-peaked on some axis.
    pub single_peaked_consensus: usize,
}

impl ExperimentRow {
    pub fn strict_percent(&self) -> f64 {
        percent(self.strict_consensus, self.iterations)
    }

    pub fn flexible_percent(&self) -> f64 {
        percent(self.flexible_consensus, self.iterations)
    }

    pub fn single_peaked_percent(&self) -> f64 {
        percent(self.single_peaked_consensus, self.iterations)
    }
}

fn percent(hits: usize, trials: usize) -> f64 {
    if trials == 0 {
        0.0
    } else {
        100.0 * hits as f64 / trials as f64
    }
}

pub struct ExperimentRunner {
    detector: ConsensusDetector,
}

impl ExperimentRunner {
    pub fn new(detector: ConsensusDetector) -> Self {
        Self { detector }
    }

    /// Walks the grid alternatives x votes x phi. Cultures without a
    /// dispersion parameter get one cell per (alternatives, votes).
    pub fn run(&self, params: &ExperimentParams) -> ConsensusResult<Vec<ExperimentRow>> {
        if params.num_alternatives.is_empty() || params.num_votes.is_empty() {
            return Err(invalid_parameter("experiment grid is empty"));
        }
        let phis: Vec<Option<f64>> = if params.culture.uses_phi() {
            if params.phis.is_empty() {
                return Err(invalid_parameter("culture needs at least one phi"));
            }
            params.phis.iter().copied().map(Some).collect()
        } else {
            vec![None]
        };

        let mut rows = Vec::new();
        for &num_alternatives in &params.num_alternatives {
            for &num_votes in &params.num_votes {
                for &phi in &phis {
                    let cell = params.cell(num_alternatives, num_votes, phi.unwrap_or(1.0));
                    rows.push(self.run_cell(params.culture, &cell, params.iterations, params.seed)?);
                }
            }
        }
        Ok(rows)
    }

    /// Trials run one after another; trial t is seeded with `seed + t`.
    pub fn run_cell(
        &self,
        culture: Culture,
        cell: &CultureParams,
        iterations: usize,
        seed: Option<u64>,
    ) -> ConsensusResult<ExperimentRow> {
        if cell.num_votes == 0 {
            return Err(invalid_parameter("a trial needs at least one vote"));
        }
        let start = Instant::now();
        let mut counter = ConsensusCounter::new();

        for trial in 0..iterations {
            let mut rng = match seed {
                Some(s) => Rng::with_seed(s.wrapping_add(trial as u64)),
                None => Rng::new(),
            };
            let profile = culture.generate(&mut rng, cell)?;
            counter.count(&self.detector, &profile)?;
        }

        let tally = counter.totals();
        info!(
            "{} n={} votes={} phi={:.2}: strict {}/{} flexible {}/{} single-peaked {}/{} ({:?})",
            culture,
            cell.num_alternatives,
            cell.num_votes,
            cell.phi,
            tally.strict,
            tally.trials,
            tally.flexible,
            tally.trials,
            tally.single_peaked,
            tally.trials,
            start.elapsed()
        );

        Ok(ExperimentRow {
            culture,
            iterations,
            num_votes: cell.num_votes,
            phi: culture.uses_phi().then_some(cell.phi),
            num_alternatives: cell.num_alternatives,
            strict_consensus: tally.strict,
            flexible_consensus: tally.flexible,
            single_peaked_consensus: tally.single_peaked,
        })
    }
}
