//! Serialization support for trained agents.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::Grid,
    pipeline::TrainingOutcome,
    value_table::ValueTable,
};

/// Versioned on-disk snapshot of a trained value table.
///
/// Stored as JSON so a trained table stays human-inspectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    pub grid_size: usize,
    pub learning_rate: f64,
    pub discount_factor: f64,
    /// Exploration rate after the final decay, recorded for provenance.
    pub final_epsilon: f64,
    /// Per-state values in row-major state order.
    pub values: Vec<f64>,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    /// Snapshot a completed training run.
    pub fn from_outcome(outcome: &TrainingOutcome) -> Self {
        Self {
            version: Self::VERSION,
            grid_size: outcome.grid.size(),
            learning_rate: outcome.table.learning_rate(),
            discount_factor: outcome.table.discount_factor(),
            final_epsilon: outcome.result.final_epsilon,
            values: outcome.table.values().to_vec(),
        }
    }

    /// Restore the environment and value table from this snapshot.
    pub fn to_table(&self) -> Result<(Grid, ValueTable)> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedAgentVersion {
                got: self.version,
                expected: Self::VERSION,
            });
        }
        let grid = Grid::new(self.grid_size)?;
        if self.values.len() != grid.cell_count() {
            return Err(Error::CorruptSavedAgent {
                got: self.values.len(),
                expected: grid.cell_count(),
                size: self.grid_size,
            });
        }
        let table = ValueTable::from_values(
            self.values.clone(),
            self.learning_rate,
            self.discount_factor,
        );
        Ok((grid, table))
    }

    /// Save the snapshot as JSON.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("create agent file {}", path.as_ref().display()),
            source,
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Load a snapshot from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("open agent file {}", path.as_ref().display()),
            source,
        })?;
        let reader = BufReader::new(file);
        let saved = serde_json::from_reader(reader)?;
        Ok(saved)
    }
}
