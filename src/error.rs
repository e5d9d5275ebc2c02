//! Error types for the gridworld crate

use thiserror::Error;

/// Main error type for the gridworld crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("grid size must be at least 1, got {got}")]
    InvalidGridSize { got: usize },

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("invalid action index {index} (expected 0-3)")]
    InvalidActionIndex { index: usize },

    #[error("unsupported saved agent version {got} (expected {expected})")]
    UnsupportedAgentVersion { got: u32, expected: u32 },

    #[error("saved agent has {got} values but a {size}x{size} grid needs {expected}")]
    CorruptSavedAgent {
        got: usize,
        expected: usize,
        size: usize,
    },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
