use clap::Args;
use consensus_axis::config::CultureParams;
use consensus_axis::consensus::{ConsensusDetector, ConsensusMode};
use consensus_axis::cultures::Culture;
use consensus_axis::{ConsensusResult, InversionEngine};
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(short, long, value_enum, default_value_t = Culture::Mallows)]
    pub culture: Culture,

    #[command(flatten)]
    pub params: CultureParams,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

pub fn run(args: GenerateArgs, engine: Arc<InversionEngine>) -> ConsensusResult<()> {
    let mut rng = match args.seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };

    info!(
        "🎲 {} culture: {} votes over {} alternatives",
        args.culture, args.params.num_votes, args.params.num_alternatives
    );
    let profile = args.culture.generate(&mut rng, &args.params)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&profile)?
    } else {
        serde_json::to_string(&profile)?
    };
    println!("{}", json);

    if !profile.is_empty() {
        let detector = ConsensusDetector::new(engine);
        for mode in [ConsensusMode::Strict, ConsensusMode::Flexible] {
            match detector.find_axis(&profile, mode)? {
                Some(axis) => info!("{} consensus around {}", mode, axis),
                None => info!("{} consensus: none", mode),
            }
        }
    }
    Ok(())
}
