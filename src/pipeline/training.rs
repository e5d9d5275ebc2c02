//! Training configuration and the episodic training loop

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::observers::Observer;
use crate::{
    error::{Error, Result},
    grid::{Grid, State},
    policy::EpsilonGreedy,
    value_table::ValueTable,
};

/// Training configuration
///
/// Defaults match the reference demonstration: a 5x5 grid, α = 0.5,
/// γ = 0.9, ε = 0.1 decaying by 0.99 per episode, 100 episodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Grid side length `N`
    pub grid_size: usize,

    /// Learning rate α
    pub learning_rate: f64,

    /// Discount factor γ
    pub discount_factor: f64,

    /// Initial exploration rate ε
    pub initial_epsilon: f64,

    /// Multiplicative ε decay applied once per episode
    pub epsilon_decay: f64,

    /// Number of training episodes
    pub episodes: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            grid_size: 5,
            learning_rate: 0.5,
            discount_factor: 0.9,
            initial_epsilon: 0.1,
            epsilon_decay: 0.99,
            episodes: 100,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Reject invalid configurations before any training begins.
    ///
    /// The grid must have at least one cell and every probability-like
    /// parameter must lie in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(Error::InvalidGridSize { got: 0 });
        }
        for (name, value) in [
            ("learning rate", self.learning_rate),
            ("discount factor", self.discount_factor),
            ("initial epsilon", self.initial_epsilon),
            ("epsilon decay", self.epsilon_decay),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}

/// Per-episode record emitted to observers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeStats {
    /// Episode index (0-based)
    pub episode: usize,

    /// Uniformly sampled start state
    pub start_state: State,

    /// Transitions taken to reach the goal (zero when the start was the goal)
    pub steps: usize,

    /// Exploration rate in effect during the episode
    pub epsilon: f64,
}

/// Summary of a completed training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes completed
    pub episodes: usize,

    /// Transitions taken across all episodes
    pub total_steps: usize,

    /// Exploration rate after the final decay
    pub final_epsilon: f64,
}

impl TrainingResult {
    /// Save the result to a JSON file.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Everything produced by a training run: the environment, the learned
/// table, and the run summary.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub grid: Grid,
    pub table: ValueTable,
    pub result: TrainingResult,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Episodic training pipeline
///
/// Runs the configured number of episodes strictly sequentially. Each
/// episode starts from a uniformly sampled state (the goal itself is a
/// valid sample and yields a zero-transition episode) and steps until the
/// goal is reached, updating the value table after every transition and
/// decaying ε once the episode completes.
///
/// Episodes carry no step cap: termination relies on the exploring walk
/// eventually reaching the goal corner, which on a clamped finite grid
/// with nonzero ε happens with probability 1 but is not bounded in steps.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a pipeline for a validated configuration.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the pipeline.
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run all configured episodes and return the trained table.
    pub fn run(&mut self) -> Result<TrainingOutcome> {
        let grid = Grid::new(self.config.grid_size)?;
        let mut table = ValueTable::new(
            &grid,
            self.config.learning_rate,
            self.config.discount_factor,
        );
        let mut policy = EpsilonGreedy::new(self.config.initial_epsilon, self.config.epsilon_decay);
        let mut rng = build_rng(self.config.seed);

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut total_steps = 0;
        for episode in 0..self.config.episodes {
            let start_state = rng.random_range(0..grid.cell_count());
            let episode_epsilon = policy.epsilon();

            let mut state = start_state;
            let mut steps = 0;
            while !grid.is_terminal(state) {
                let action = policy.choose_action(&mut rng, &grid, &table, state);
                let next_state = grid.transition(state, action);
                let reward = grid.reward(next_state);
                table.update(&grid, state, action, reward, next_state);
                state = next_state;
                steps += 1;
            }

            policy.decay();
            total_steps += steps;

            let stats = EpisodeStats {
                episode,
                start_state,
                steps,
                epsilon: episode_epsilon,
            };
            for observer in &mut self.observers {
                observer.on_episode_end(&stats)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingOutcome {
            grid,
            table,
            result: TrainingResult {
                episodes: self.config.episodes,
                total_steps,
                final_epsilon: policy.epsilon(),
            },
        })
    }
}
