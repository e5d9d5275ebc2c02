//! Tabular Q-learning demonstrator on a deterministic gridworld
//!
//! This crate provides:
//! - A clamped N x N grid environment with a single goal cell
//! - A per-state value table with an epsilon-greedy learning agent
//! - A seeded episodic training pipeline with composable observers
//! - Saving, loading, and evaluation of trained value tables
//!
//! ```no_run
//! use gridworld::{TrainingConfig, TrainingPipeline};
//!
//! let config = TrainingConfig {
//!     seed: Some(42),
//!     ..TrainingConfig::default()
//! };
//! let outcome = TrainingPipeline::new(config)?.run()?;
//! let goal_neighbor = outcome.grid.encode(4, 3);
//! assert!(outcome.table.get(goal_neighbor) > 0.0);
//! # Ok::<(), gridworld::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod policy;
pub mod serialization;
pub mod value_table;

pub use error::{Error, Result};
pub use grid::{Action, Grid, State};
pub use pipeline::{
    EpisodeStats, JsonlObserver, Observer, ProgressObserver, TrainingConfig, TrainingOutcome,
    TrainingPipeline, TrainingResult,
};
pub use policy::EpsilonGreedy;
pub use serialization::SavedAgent;
pub use value_table::ValueTable;
