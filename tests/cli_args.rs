// tests/cli_args.rs

use std::path::Path;
use std::time::Duration;

use batchrun::cli::{CliArgs, usage};
use batchrun::types::parse_duration;
use clap::Parser;

#[test]
fn test_single_path_is_the_commands_file() {
    let args = CliArgs::try_parse_from(["batchrun", "cmds.json"]).unwrap();
    assert_eq!(args.commands_file(), Some(Path::new("cmds.json")));
}

#[test]
fn test_missing_or_extra_paths_mean_usage() {
    let none = CliArgs::try_parse_from(["batchrun"]).unwrap();
    assert_eq!(none.commands_file(), None);

    let two = CliArgs::try_parse_from(["batchrun", "a.json", "b.json"]).unwrap();
    assert_eq!(two.commands_file(), None);

    assert!(usage().contains("COMMANDS_FILE"));
}

#[test]
fn test_run_options_from_flags() {
    let args = CliArgs::try_parse_from([
        "batchrun",
        "-j",
        "4",
        "--timeout",
        "30s",
        "--fail-on-error",
        "--no-color",
        "cmds.json",
    ])
    .unwrap();

    let options = args.run_options(true);
    assert_eq!(options.max_concurrency.map(|n| n.get()), Some(4));
    assert_eq!(options.timeout, Some(Duration::from_secs(30)));
    assert!(options.fail_on_error);
    assert!(!options.color);
}

#[test]
fn test_defaults_keep_unbounded_fan_out() {
    let args = CliArgs::try_parse_from(["batchrun", "cmds.json"]).unwrap();
    let options = args.run_options(true);

    assert!(options.max_concurrency.is_none());
    assert!(options.timeout.is_none());
    assert!(!options.fail_on_error);
    assert!(options.color);
}

#[test]
fn test_zero_concurrency_is_rejected() {
    assert!(CliArgs::try_parse_from(["batchrun", "-j", "0", "cmds.json"]).is_err());
}

#[test]
fn test_duration_parsing() {
    assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
    assert_eq!(parse_duration("5m"), Ok(Duration::from_secs(300)));
    assert_eq!(parse_duration(" 1h "), Ok(Duration::from_secs(3600)));
    assert!(parse_duration("").is_err());
    assert!(parse_duration("10").is_err());
    assert!(parse_duration("3d").is_err());
    assert!(parse_duration("0s").is_err());
    assert!(parse_duration("99999999999999999h").is_err());
    assert!(parse_duration("999999999999999999m").is_err());
}
