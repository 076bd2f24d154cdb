pub mod mallows;
pub mod single_peaked;
pub mod urn;

pub use self::mallows::{mallows, mallows_insertion_distribution, mallows_mix, MallowsModel};
pub use self::single_peaked::{single_peaked, single_peaked_vote};
pub use self::urn::{factorial, impartial_anonymous_culture, impartial_culture, random_ranking, urn};

use crate::config::CultureParams;
use crate::error::{invalid_parameter, ConsensusResult};
use crate::profile::{Ranking, WeightedProfile};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Statistical cultures available to `generate` and `experiment`.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum Culture {
    ImpartialCulture,
    ImpartialAnonymous,
    Urn,
    SinglePeaked,
    /// Single Mallows model around the identity ranking.
    Mallows,
    /// Mixture of Mallows models with random references and phis.
    MallowsMix,
}

impl Culture {
    /// Whether the dispersion parameter phi affects this culture.
    pub fn uses_phi(&self) -> bool {
        matches!(self, Culture::Mallows)
    }

    /// Generates a profile over alternatives `0..num_alternatives`.
    pub fn generate(&self, rng: &mut Rng, params: &CultureParams) -> ConsensusResult<WeightedProfile<u32>> {
        let n = u32::try_from(params.num_alternatives).map_err(|_| {
            invalid_parameter(format!("{} alternatives do not fit in u32", params.num_alternatives))
        })?;
        let alternatives: Vec<u32> = (0..n).collect();
        let votes = params.num_votes;

        match self {
            Culture::ImpartialCulture => impartial_culture(rng, votes, &alternatives),
            Culture::ImpartialAnonymous => impartial_anonymous_culture(rng, votes, &alternatives),
            Culture::Urn => urn(rng, votes, params.replacements, &alternatives),
            Culture::SinglePeaked => single_peaked(rng, votes, &alternatives),
            Culture::Mallows => {
                let model = MallowsModel {
                    weight: 1.0,
                    phi: params.phi,
                    reference: Ranking::new(alternatives.clone())?,
                };
                mallows(rng, votes, &alternatives, &[model])
            }
            Culture::MallowsMix => mallows_mix(rng, votes, &alternatives, params.references),
        }
    }
}
