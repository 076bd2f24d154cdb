use crate::reports;
use clap::Args;
use consensus_axis::config::{DetectorParams, ExperimentParams};
use consensus_axis::consensus::ConsensusDetector;
use consensus_axis::experiment::ExperimentRunner;
use consensus_axis::{ConsensusResult, InversionEngine};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ExperimentArgs {
    #[command(flatten)]
    pub params: ExperimentParams,

    /// Write rows as CSV to stdout instead of a table
    #[arg(long, default_value_t = false)]
    pub csv: bool,

    #[command(flatten)]
    pub detector: DetectorParams,
}

pub fn run(args: ExperimentArgs, engine: Arc<InversionEngine>) -> ConsensusResult<()> {
    let detector = ConsensusDetector::with_options(engine, (&args.detector).into());
    let runner = ExperimentRunner::new(detector);

    info!(
        "🔬 {} x {} trials over alternatives {:?}, votes {:?}",
        args.params.culture, args.params.iterations, args.params.num_alternatives, args.params.num_votes
    );
    let start = Instant::now();
    let rows = runner.run(&args.params)?;
    info!("Finished {} cells in {:.2?}", rows.len(), start.elapsed());

    if args.csv {
        reports::write_experiment_csv(&rows, io::stdout())
    } else {
        reports::print_experiment_table(&rows);
        Ok(())
    }
}
