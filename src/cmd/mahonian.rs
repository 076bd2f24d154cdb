use crate::reports;
use clap::Args;
use consensus_axis::error::ConsensusError;
use consensus_axis::{ConsensusResult, InversionEngine};

/// Largest n for which every T(n, k) fits in a u128.
const MAX_EXACT_N: usize = 34;

#[derive(Args, Debug, Clone)]
pub struct MahonianArgs {
    /// Print rows 1..=n
    #[arg(short, long, default_value_t = 5)]
    pub n: usize,
}

pub fn run(args: MahonianArgs, engine: &InversionEngine) -> ConsensusResult<()> {
    if args.n > MAX_EXACT_N {
        return Err(ConsensusError::InvalidParameter(format!(
            "n = {} exceeds {}, where Mahonian numbers stop fitting in 128 bits",
            args.n, MAX_EXACT_N
        )));
    }
    let rows: Vec<(usize, Vec<u128>)> = (1..=args.n).map(|n| (n, engine.mahonian_row(n))).collect();
    reports::print_mahonian_table(&rows);
    Ok(())
}
