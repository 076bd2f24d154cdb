pub mod config;
pub mod consensus;
pub mod cultures;
pub mod domain;
pub mod error;
pub mod experiment;
pub mod metric;
pub mod profile;
// cmd and reports belong to the binary (main.rs).

pub use consensus::{ConsensusDetector, ConsensusMode};
pub use error::{ConsensusError, ConsensusResult};
pub use metric::InversionEngine;
pub use profile::{Alternative, Ranking, WeightedProfile};
