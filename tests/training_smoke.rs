//! End-to-end training runs with the reference hyperparameters.

use gridworld::{
    EpisodeStats, JsonlObserver, SavedAgent, TrainingConfig, TrainingPipeline,
};
use tempfile::tempdir;

#[test]
fn full_run_learns_values_near_goal() {
    let config = TrainingConfig {
        seed: Some(2024),
        ..TrainingConfig::default()
    };
    let mut pipeline = TrainingPipeline::new(config).unwrap();
    let outcome = pipeline.run().unwrap();
    let grid = outcome.grid;
    let table = &outcome.table;

    // The cells adjacent to the goal must have learned something.
    let below = table.get(grid.encode(4, 3));
    let beside = table.get(grid.encode(3, 4));
    assert!(
        below.max(beside) > 0.0,
        "expected a positive value next to the goal, got {below} and {beside}"
    );

    // With rewards in {0, 1} and gamma < 1 every value stays in [0, 1].
    for state in grid.states() {
        let v = table.get(state);
        assert!(v.is_finite() && (0.0..=1.0).contains(&v), "v[{state}] = {v}");
    }

    // Loose monotonicity: cells near the goal are worth more on average
    // than the cells farthest from it.
    let terminal = grid.terminal_state();
    let mean_at = |lo: usize, hi: usize| {
        let values: Vec<f64> = grid
            .states()
            .filter(|&s| s != terminal)
            .filter(|&s| {
                let d = grid.manhattan_distance(s, terminal);
                lo <= d && d <= hi
            })
            .map(|s| table.get(s))
            .collect();
        values.iter().sum::<f64>() / values.len() as f64
    };
    assert!(
        mean_at(1, 2) >= mean_at(6, 8),
        "near-goal cells should not be worth less than far cells"
    );
}

#[test]
fn episode_records_are_consistent() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("episodes.jsonl");

    let config = TrainingConfig {
        grid_size: 2,
        initial_epsilon: 0.5,
        episodes: 50,
        seed: Some(5),
        ..TrainingConfig::default()
    };
    let mut pipeline = TrainingPipeline::new(config.clone())
        .unwrap()
        .with_observer(Box::new(JsonlObserver::create(&path).unwrap()));
    let outcome = pipeline.run().unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let stats: Vec<EpisodeStats> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(stats.len(), config.episodes);

    let terminal = outcome.grid.terminal_state();
    let mut recorded_steps = 0;
    for (k, episode) in stats.iter().enumerate() {
        assert_eq!(episode.episode, k);
        assert!(episode.start_state < outcome.grid.cell_count());

        // Zero transitions exactly when the sampled start was the goal.
        assert_eq!(episode.steps == 0, episode.start_state == terminal);

        // Epsilon decays once per episode, from the configured initial rate.
        let expected = config.initial_epsilon * config.epsilon_decay.powi(k as i32);
        assert!((episode.epsilon - expected).abs() < 1e-12);

        recorded_steps += episode.steps;
    }
    assert_eq!(recorded_steps, outcome.result.total_steps);
}

#[test]
fn trained_agent_survives_a_file_round_trip() {
    let config = TrainingConfig {
        grid_size: 4,
        initial_epsilon: 0.3,
        episodes: 40,
        seed: Some(31),
        ..TrainingConfig::default()
    };
    let mut pipeline = TrainingPipeline::new(config).unwrap();
    let outcome = pipeline.run().unwrap();

    let tmp = tempdir().unwrap();
    let path = tmp.path().join("agent.json");
    SavedAgent::from_outcome(&outcome).save_to_file(&path).unwrap();

    let (grid, table) = SavedAgent::load_from_file(&path).unwrap().to_table().unwrap();
    assert_eq!(grid.size(), 4);
    assert_eq!(table.values(), outcome.table.values());
}
