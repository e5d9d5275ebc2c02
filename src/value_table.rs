//! Per-state value table and its learning rule
//!
//! Unlike a conventional Q-table keyed by (state, action) pairs, this table
//! stores a single scalar per grid cell. Actions matter only for deciding
//! which neighboring cell's value to read or propagate: the greedy queries
//! scan each action's destination, and `update` always writes the entry for
//! the state the transition started from.

use serde::{Deserialize, Serialize};

use crate::grid::{Action, Grid, State};

/// Value table mapping each state to one scalar, zero-initialized.
///
/// Owns the learning rate α and discount factor γ used by [`update`].
///
/// [`update`]: ValueTable::update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueTable {
    values: Vec<f64>,
    learning_rate: f64,
    discount_factor: f64,
}

impl ValueTable {
    /// Create a zero-initialized table covering every state of `grid`.
    pub fn new(grid: &Grid, learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            values: vec![0.0; grid.cell_count()],
            learning_rate,
            discount_factor,
        }
    }

    /// Rebuild a table from raw per-state values (saved-agent restore).
    pub(crate) fn from_values(values: Vec<f64>, learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            values,
            learning_rate,
            discount_factor,
        }
    }

    /// Stored value for `state`.
    pub fn get(&self, state: State) -> f64 {
        self.values[state]
    }

    /// All stored values in state order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Learning rate α.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Discount factor γ.
    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Greedy action from `state`.
    ///
    /// Scans actions in enumeration order, reading the stored value of each
    /// action's destination, and keeps the maximum under a strict `>`
    /// comparison: the lowest-indexed action attaining the maximum wins and
    /// later equal values never override it.
    pub fn best_action(&self, grid: &Grid, state: State) -> Action {
        let mut best = Action::Up;
        let mut best_value = self.get(grid.transition(state, best));
        for action in &Action::ALL[1..] {
            let value = self.get(grid.transition(state, *action));
            if value > best_value {
                best = *action;
                best_value = value;
            }
        }
        best
    }

    /// Maximum stored value over the destinations reachable from `state`.
    ///
    /// Same scan as [`best_action`] but returns the value. Called with a
    /// transition's `next_state` it looks one further step ahead from there.
    ///
    /// [`best_action`]: ValueTable::best_action
    pub fn max_next_value(&self, grid: &Grid, state: State) -> f64 {
        Action::ALL
            .iter()
            .map(|&action| self.get(grid.transition(state, action)))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Apply the learning rule for one observed transition:
    ///
    /// `v[state] += α * (reward + γ * max_next_value(next_state) - v[state])`
    ///
    /// The table is keyed by state alone, so `action` never selects which
    /// entry is written; it is the action that produced `next_state` and is
    /// kept for the conventional update signature. Only the entry at
    /// `state` is mutated.
    pub fn update(
        &mut self,
        grid: &Grid,
        state: State,
        _action: Action,
        reward: f64,
        next_state: State,
    ) {
        let lookahead = self.max_next_value(grid, next_state);
        let current = self.values[state];
        self.values[state] =
            current + self.learning_rate * (reward + self.discount_factor * lookahead - current);
    }
}
