use clap::{Parser, Subcommand};
use consensus_axis::InversionEngine;
use std::process;
use std::sync::Arc;
use tracing::{error, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look for a level-1 consensus axis in a profile given as JSON
    Check(cmd::check::CheckArgs),
    /// Draw a profile from a statistical culture and print it as JSON
    Generate(cmd::generate::GenerateArgs),
    /// Estimate how often consensus exists under a culture
    Experiment(cmd::experiment::ExperimentArgs),
    /// Print Mahonian numbers T(n, k)
    Mahonian(cmd::mahonian::MahonianArgs),
}

fn main() {
    let cli = Cli::parse();

    // stdout carries JSON and CSV, logs go to stderr
    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let engine = Arc::new(InversionEngine::new());

    let result = match cli.command {
        Commands::Check(args) => cmd::check::run(args, engine),
        Commands::Generate(args) => cmd::generate::run(args, engine),
        Commands::Experiment(args) => cmd::experiment::run(args, engine),
        Commands::Mahonian(args) => cmd::mahonian::run(args, &engine),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
