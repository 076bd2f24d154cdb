use crate::reports;
use clap::Args;
use consensus_axis::config::DetectorParams;
use consensus_axis::consensus::{candidate_axes, ConsensusDetector, ConsensusMode};
use consensus_axis::domain::single_peaked_axis;
use consensus_axis::{ConsensusResult, InversionEngine, WeightedProfile};
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Profile as JSON, e.g. '[{"ranking":[1,2,3],"weight":3}]'
    #[arg(short, long)]
    pub profile: String,

    #[arg(short, long, value_enum, default_value_t = ConsensusMode::Strict)]
    pub mode: ConsensusMode,

    /// Check strict and flexible consensus
    #[arg(long, default_value_t = false)]
    pub both: bool,

    /// Print every candidate axis with its scored rankings
    #[arg(long, default_value_t = false)]
    pub explain: bool,

    #[command(flatten)]
    pub detector: DetectorParams,
}

pub fn run(args: CheckArgs, engine: Arc<InversionEngine>) -> ConsensusResult<()> {
    let profile: WeightedProfile<u32> = serde_json::from_str(&args.profile)?;
    profile.ensure_non_empty()?;
    info!(
        "📂 Profile: {} rankings over {} alternatives, {} votes",
        profile.len(),
        profile.num_alternatives(),
        profile.total_weight()
    );

    let detector = ConsensusDetector::with_options(engine, (&args.detector).into());
    let modes = if args.both {
        vec![ConsensusMode::Strict, ConsensusMode::Flexible]
    } else {
        vec![args.mode]
    };

    for mode in modes {
        if args.explain {
            for axis in candidate_axes(&profile) {
                let records = detector.score_records(&profile, axis)?;
                let verdict = detector.evaluate_axis(&profile, axis, mode)?;
                reports::print_axis_report(axis, mode, &records, &verdict);
            }
        }
        let axis = detector.find_axis(&profile, mode)?;
        reports::print_verdict(mode, axis.as_ref());
    }

    match single_peaked_axis(&profile) {
        Some(axis) => info!("Support is single-peaked on {:?}", axis),
        None => info!("Support is not single-peaked"),
    }
    Ok(())
}
