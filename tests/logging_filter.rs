// tests/logging_filter.rs

use batchrun::cli::LogLevel;
use batchrun::logging::build_filter;

#[test]
fn test_cli_level_wins_over_env() {
    let filter = build_filter(Some(LogLevel::Debug), Some("error"));
    assert_eq!(filter.to_string(), "debug");
}

#[test]
fn test_env_directives_are_honoured() {
    let filter = build_filter(None, Some("warn,batchrun::exec=debug"));
    let rendered = filter.to_string();
    assert!(rendered.contains("batchrun::exec=debug"), "{rendered}");
    assert!(rendered.contains("warn"), "{rendered}");
}

#[test]
fn test_defaults_to_warn() {
    assert_eq!(build_filter(None, None).to_string(), "warn");
    assert_eq!(build_filter(None, Some("  ")).to_string(), "warn");
}

#[test]
fn test_invalid_env_value_falls_back_to_warn() {
    assert_eq!(build_filter(None, Some("batchrun=notalevel")).to_string(), "warn");
}
