//! Deterministic gridworld environment
//!
//! States are cells of an `N x N` grid encoded as `row * N + col`. The agent
//! moves in the four cardinal directions; moves off an edge are absorbed by
//! clamping each coordinate to `[0, N - 1]`. The single terminal cell is the
//! bottom-right corner, and stepping into it earns the only nonzero reward.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A grid cell index in `[0, N*N)`, encoded as `row * N + col`.
pub type State = usize;

/// Cardinal move. The index order Up, Down, Left, Right is fixed: greedy
/// scans enumerate actions in this order and ties go to the earliest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// Number of actions.
    pub const COUNT: usize = 4;

    /// All actions in enumeration order.
    pub const ALL: [Action; Action::COUNT] =
        [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Index of this action in enumeration order (0-3).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Action for an index in 0-3.
    pub fn from_index(index: usize) -> Result<Action> {
        Action::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidActionIndex { index })
    }

    /// `(row delta, col delta)` applied by this move before clamping.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    /// Single-glyph rendering used by the policy printout.
    pub fn glyph(self) -> char {
        match self {
            Action::Up => '^',
            Action::Down => 'v',
            Action::Left => '<',
            Action::Right => '>',
        }
    }
}

/// Square gridworld with a single terminal cell at the bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
}

impl Grid {
    /// Create a grid with the given side length.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidGridSize { got: size });
        }
        Ok(Self { size })
    }

    /// Side length `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of states, `N * N`.
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// The fixed goal cell, `N*N - 1` (bottom-right corner).
    pub fn terminal_state(&self) -> State {
        self.cell_count() - 1
    }

    /// Whether `state` is the goal cell.
    pub fn is_terminal(&self, state: State) -> bool {
        state == self.terminal_state()
    }

    /// Iterate all states in row-major order.
    pub fn states(&self) -> impl Iterator<Item = State> {
        0..self.cell_count()
    }

    /// Decode a state into `(row, col)`.
    pub fn decode(&self, state: State) -> (usize, usize) {
        debug_assert!(state < self.cell_count());
        (state / self.size, state % self.size)
    }

    /// Encode `(row, col)` into a state.
    pub fn encode(&self, row: usize, col: usize) -> State {
        debug_assert!(row < self.size && col < self.size);
        row * self.size + col
    }

    /// Destination of taking `action` from `state`.
    ///
    /// Each coordinate is clamped independently to `[0, N - 1]`, so a move
    /// off the edge leaves the agent in place along that axis. Total and
    /// deterministic for every in-range state.
    pub fn transition(&self, state: State, action: Action) -> State {
        let (row, col) = self.decode(state);
        let (d_row, d_col) = action.delta();
        let max = (self.size - 1) as isize;
        let row = (row as isize + d_row).clamp(0, max) as usize;
        let col = (col as isize + d_col).clamp(0, max) as usize;
        self.encode(row, col)
    }

    /// Reward for arriving in `next_state`: `1.0` at the goal, else `0.0`.
    ///
    /// The reward depends only on the destination, never on the action or
    /// the path taken.
    pub fn reward(&self, next_state: State) -> f64 {
        if self.is_terminal(next_state) {
            1.0
        } else {
            0.0
        }
    }

    /// Manhattan distance between two states.
    pub fn manhattan_distance(&self, a: State, b: State) -> usize {
        let (ar, ac) = self.decode(a);
        let (br, bc) = self.decode(b);
        ar.abs_diff(br) + ac.abs_diff(bc)
    }
}
