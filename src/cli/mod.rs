//! CLI infrastructure for the gridworld demonstrator
//!
//! This module provides the command-line interface for training an agent
//! and evaluating saved value tables.

pub mod commands;
pub mod output;
