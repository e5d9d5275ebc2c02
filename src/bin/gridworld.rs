//! Gridworld CLI - train and evaluate a tabular gridworld agent

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gridworld")]
#[command(version, about = "Tabular Q-learning on a deterministic gridworld", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent and print the learned value table
    Train(gridworld::cli::commands::train::TrainArgs),

    /// Evaluate a saved agent's greedy policy
    Evaluate(gridworld::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => gridworld::cli::commands::train::execute(args),
        Commands::Evaluate(args) => gridworld::cli::commands::evaluate::execute(args),
    }
}
