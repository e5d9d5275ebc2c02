//! Epsilon-greedy exploration policy with exponential decay

use rand::Rng;

use crate::{
    grid::{Action, Grid, State},
    value_table::ValueTable,
};

/// ε-greedy action selector.
///
/// With probability ε a uniformly random action is returned, otherwise the
/// greedy action from the value table. ε shrinks by a multiplicative factor
/// once per completed episode and is never increased; there is no lower
/// bound, so after very many decays it can underflow to zero and the policy
/// becomes fully greedy.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    epsilon: f64,
    initial_epsilon: f64,
    decay_factor: f64,
}

impl EpsilonGreedy {
    /// Create a policy with the given initial ε and per-episode decay factor.
    pub fn new(epsilon: f64, decay_factor: f64) -> Self {
        Self {
            epsilon,
            initial_epsilon: epsilon,
            decay_factor,
        }
    }

    /// Current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Select an action for `state`.
    ///
    /// Draws one uniform value in `[0, 1)` for the explore/exploit coin and,
    /// when exploring, one more draw for the action. This is the only place
    /// the shared RNG is consumed for action choice.
    pub fn choose_action<R: Rng>(
        &self,
        rng: &mut R,
        grid: &Grid,
        table: &ValueTable,
        state: State,
    ) -> Action {
        if rng.random::<f64>() < self.epsilon {
            Action::ALL[rng.random_range(0..Action::COUNT)]
        } else {
            table.best_action(grid, state)
        }
    }

    /// Multiply ε by the decay factor. Called once per completed episode.
    pub fn decay(&mut self) {
        self.epsilon *= self.decay_factor;
    }

    /// Restore ε to its initial value.
    pub fn reset(&mut self) {
        self.epsilon = self.initial_epsilon;
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn decay_is_exponential() {
        let mut policy = EpsilonGreedy::new(0.1, 0.99);
        for k in 0..200 {
            let expected = 0.1 * 0.99f64.powi(k);
            assert!((policy.epsilon() - expected).abs() < 1e-12, "after {k} decays");
            policy.decay();
        }
    }

    #[test]
    fn decay_never_increases() {
        let mut policy = EpsilonGreedy::new(1.0, 0.99);
        let mut previous = policy.epsilon();
        for _ in 0..10_000 {
            policy.decay();
            assert!(policy.epsilon() <= previous);
            previous = policy.epsilon();
        }
    }

    #[test]
    fn zero_epsilon_is_always_greedy() {
        let grid = Grid::new(4).unwrap();
        let mut table = ValueTable::new(&grid, 0.5, 0.9);
        table.update(&grid, 5, Action::Right, 0.8, 6);
        let policy = EpsilonGreedy::new(0.0, 0.99);
        let mut rng = StdRng::seed_from_u64(3);
        for state in grid.states() {
            let expected = table.best_action(&grid, state);
            for _ in 0..50 {
                assert_eq!(policy.choose_action(&mut rng, &grid, &table, state), expected);
            }
        }
    }

    #[test]
    fn full_epsilon_is_roughly_uniform() {
        let grid = Grid::new(4).unwrap();
        let table = ValueTable::new(&grid, 0.5, 0.9);
        let policy = EpsilonGreedy::new(1.0, 0.99);
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 4_000;
        let mut counts = [0usize; Action::COUNT];
        for _ in 0..trials {
            let action = policy.choose_action(&mut rng, &grid, &table, 5);
            counts[action.index()] += 1;
        }
        let expected = trials / Action::COUNT;
        for (i, count) in counts.iter().enumerate() {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected / 4,
                "action {i} drawn {count} times out of {trials}"
            );
        }
    }

    #[test]
    fn reset_restores_initial_rate() {
        let mut policy = EpsilonGreedy::new(0.5, 0.9);
        policy.decay();
        policy.decay();
        policy.reset();
        assert_eq!(policy.epsilon(), 0.5);
    }
}
