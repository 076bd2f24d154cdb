use crate::consensus::DetectorOptions;
use crate::cultures::Culture;
use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct DetectorParams {
    /// Evaluate candidate axes in parallel
    #[arg(long, default_value_t = false)]
    pub parallel: bool,
}

impl From<&DetectorParams> for DetectorOptions {
    fn from(params: &DetectorParams) -> Self {
        Self {
            parallel: params.parallel,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CultureParams {
    #[arg(long = "votes", default_value_t = 100)]
    pub num_votes: usize,
    #[arg(long = "alternatives", default_value_t = 3)]
    pub num_alternatives: usize,
    /// Copies returned to the urn per draw (urn culture)
    #[arg(long, default_value_t = 0)]
    pub replacements: u64,
    /// Mallows dispersion
    #[arg(long, default_value_t = 0.5)]
    pub phi: f64,
    /// Reference rankings in a Mallows mixture
    #[arg(long, default_value_t = 5)]
    pub references: usize,
}

impl Default for CultureParams {
    fn default() -> Self {
        Self {
            num_votes: 100,
            num_alternatives: 3,
            replacements: 0,
            phi: 0.5,
            references: 5,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ExperimentParams {
    #[arg(long, value_enum, default_value_t = Culture::Mallows)]
    pub culture: Culture,
    /// Trials per grid cell
    #[arg(long, default_value_t = 1000)]
    pub iterations: usize,
    #[arg(long = "votes", value_delimiter = ',', default_values_t = [100, 1000])]
    pub num_votes: Vec<usize>,
    #[arg(long = "alternatives", value_delimiter = ',', default_values_t = [3, 4, 5])]
    pub num_alternatives: Vec<usize>,
    /// Ignored by cultures without a dispersion parameter
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [0.0, 0.05, 0.1, 0.15, 0.2, 0.25, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
    )]
    pub phis: Vec<f64>,
    #[arg(long, default_value_t = 0)]
    pub replacements: u64,
    #[arg(long, default_value_t = 5)]
    pub references: usize,
    /// Trial t of every cell uses seed + t
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for ExperimentParams {
    fn default() -> Self {
        Self {
            culture: Culture::Mallows,
            iterations: 1000,
            num_votes: vec![100, 1000],
            num_alternatives: vec![3, 4, 5],
            phis: vec![
                0.0, 0.05, 0.1, 0.15, 0.2, 0.25, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0,
            ],
            replacements: 0,
            references: 5,
            seed: None,
        }
    }
}

impl ExperimentParams {
    /// Culture parameters for one grid cell.
    pub fn cell(&self, num_alternatives: usize, num_votes: usize, phi: f64) -> CultureParams {
        CultureParams {
            num_votes,
            num_alternatives,
            replacements: self.replacements,
            phi,
            references: self.references,
        }
    }
}
