//! Evaluate command - run greedy rollouts from a saved agent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_policy},
    grid::{Grid, State},
    serialization::SavedAgent,
    value_table::ValueTable,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent's greedy policy")]
pub struct EvaluateArgs {
    /// Path to a saved agent file
    pub agent: PathBuf,

    /// Step cap per rollout (default: 4 * N * N)
    ///
    /// A frozen greedy policy can cycle forever, so evaluation rollouts are
    /// capped, unlike training episodes.
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Print the greedy policy as arrows
    #[arg(long, default_value_t = true)]
    pub show_policy: bool,
}

/// Follow the greedy policy from `start` until the goal or the step cap.
///
/// Returns the number of steps taken, or `None` if the cap was reached
/// before the goal.
fn greedy_rollout(grid: &Grid, table: &ValueTable, start: State, cap: usize) -> Option<usize> {
    let mut state = start;
    let mut steps = 0;
    while !grid.is_terminal(state) {
        if steps == cap {
            return None;
        }
        state = grid.transition(state, table.best_action(grid, state));
        steps += 1;
    }
    Some(steps)
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    println!("Loading agent from: {}", args.agent.display());
    let saved = SavedAgent::load_from_file(&args.agent)
        .with_context(|| format!("failed to load agent from {}", args.agent.display()))?;
    let (grid, table) = saved.to_table()?;

    print_kv("Grid size", &grid.size().to_string());
    print_kv("Learning rate", &table.learning_rate().to_string());
    print_kv("Discount factor", &table.discount_factor().to_string());
    print_kv("Final epsilon", &format!("{:.6}", saved.final_epsilon));
    println!();

    let cap = args.max_steps.unwrap_or(4 * grid.cell_count());
    let mut reached = 0;
    let mut total_steps = 0;
    let mut stuck: Vec<State> = Vec::new();
    let starts = grid.cell_count() - 1;

    for state in grid.states().filter(|&s| !grid.is_terminal(s)) {
        match greedy_rollout(&grid, &table, state, cap) {
            Some(steps) => {
                reached += 1;
                total_steps += steps;
            }
            None => stuck.push(state),
        }
    }

    println!("Goal reached from {reached}/{starts} start states (cap {cap} steps)");
    if reached > 0 {
        println!("Mean steps to goal: {:.2}", total_steps as f64 / reached as f64);
    }
    if !stuck.is_empty() {
        let cells: Vec<String> = stuck
            .iter()
            .map(|&s| {
                let (row, col) = grid.decode(s);
                format!("({row},{col})")
            })
            .collect();
        println!("Greedy policy never reaches the goal from: {}", cells.join(" "));
    }

    if args.show_policy {
        println!();
        print_policy(&grid, &table);
    }

    Ok(())
}
