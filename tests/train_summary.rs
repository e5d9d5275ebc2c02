use clap::Parser;
use gridworld::cli::commands::train::{TrainArgs, execute};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "gridworld-train",
        "--grid-size",
        "3",
        "--episodes",
        "5",
        "--epsilon",
        "0.5",
        "--seed",
        "11",
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["episodes"], 5);
    assert_eq!(parsed["config"]["grid_size"], 3);
    assert_eq!(parsed["config"]["seed"], 11);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args([
        "gridworld-train",
        "--grid-size",
        "3",
        "--episodes",
        "3",
        "--epsilon",
        "0.5",
        "--seed",
        "7",
        "--summary",
        &summary_arg,
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["episodes"], 3);
}

#[test]
fn rejects_invalid_configuration_before_training() {
    let tmp = tempdir().unwrap();
    let summary = tmp.path().join("never_written.json");

    let args = parse_args([
        "gridworld-train",
        "--grid-size",
        "0",
        "--summary",
        summary.to_str().unwrap(),
    ]);

    assert!(execute(args).is_err());
    assert!(!summary.exists(), "no output should be written on failure");
}
