//! Episodic training pipeline
//!
//! This module ties the environment, value table, and exploration policy
//! together into seeded training runs, with composable observers for
//! progress reporting and data collection.

pub mod observers;
pub mod training;

pub use observers::{JsonlObserver, Observer, ProgressObserver};
pub use training::{EpisodeStats, TrainingConfig, TrainingOutcome, TrainingPipeline, TrainingResult};
