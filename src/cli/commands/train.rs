//! Train command - run episodic training and dump the learned values

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output::{print_kv, print_policy, print_value_table},
    pipeline::{
        JsonlObserver, ProgressObserver, TrainingConfig, TrainingPipeline, TrainingResult,
    },
    serialization::SavedAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Train a gridworld agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Grid side length N (states are the N*N cells, goal at bottom-right)
    #[arg(long, default_value_t = 5)]
    pub grid_size: usize,

    /// Learning rate alpha (0.0-1.0)
    #[arg(long, alias = "alpha", default_value_t = 0.5)]
    pub learning_rate: f64,

    /// Discount factor gamma (0.0-1.0)
    #[arg(long, alias = "gamma", default_value_t = 0.9)]
    pub discount_factor: f64,

    /// Initial exploration rate epsilon
    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// Multiplicative epsilon decay per episode
    #[arg(long, alias = "decay", default_value_t = 0.99)]
    pub epsilon_decay: f64,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 100)]
    pub episodes: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file for the trained agent (JSON)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional file for JSONL per-episode observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,

    /// Also print the greedy policy as arrows
    #[arg(long, default_value_t = false)]
    pub show_policy: bool,
}

impl TrainArgs {
    fn to_config(&self) -> TrainingConfig {
        TrainingConfig {
            grid_size: self.grid_size,
            learning_rate: self.learning_rate,
            discount_factor: self.discount_factor,
            initial_epsilon: self.epsilon,
            epsilon_decay: self.epsilon_decay,
            episodes: self.episodes,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    config: TrainingConfig,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.to_config();
    let mut pipeline = TrainingPipeline::new(config.clone())?;

    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::create(path)?));
    }

    let outcome = pipeline.run()?;

    print_kv("Episodes", &outcome.result.episodes.to_string());
    print_kv("Total steps", &outcome.result.total_steps.to_string());
    print_kv(
        "Final epsilon",
        &format!("{:.6}", outcome.result.final_epsilon),
    );
    println!();
    print_value_table(&outcome.grid, &outcome.table);
    if args.show_policy {
        println!();
        print_policy(&outcome.grid, &outcome.table);
    }

    if let Some(path) = &args.output {
        SavedAgent::from_outcome(&outcome)
            .save_to_file(path)
            .with_context(|| format!("failed to save agent to {}", path.display()))?;
        println!("\nSaved agent to: {}", path.display());
    }

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let file = std::fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(
            file,
            &TrainingSummaryFile {
                training: outcome.result.clone(),
                config,
            },
        )?;
        println!("Saved summary to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_path_keeps_json_extension() {
        let path = sanitize_summary_path(Path::new("runs/summary.json"));
        assert_eq!(path, PathBuf::from("runs/summary.json"));
    }

    #[test]
    fn summary_path_appends_json_extension() {
        let path = sanitize_summary_path(Path::new("runs/summary.txt"));
        assert_eq!(path, PathBuf::from("runs/summary.json"));
    }

    #[test]
    fn summary_path_directory_gets_default_name() {
        let raw = format!("runs{}", std::path::MAIN_SEPARATOR);
        let path = sanitize_summary_path(Path::new(&raw));
        assert_eq!(path, Path::new("runs").join("training_summary.json"));
    }
}
