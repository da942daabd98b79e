// tests/config_loading.rs

mod common;
use crate::common::command_file;

use std::path::Path;

use batchrun::config::{InputFormat, load_and_validate, parse_str};
use batchrun::errors::RunnerError;

#[test]
fn test_loads_json_records_in_input_order() {
    let file = command_file(
        r#"[
  {"name": "echo", "arguments": ["hi"], "description": "say hi"},
  {"name": "false"},
  {"name": "env", "arguments": [], "environment": {"X": "1"}, "cwd": "sub"}
]"#,
        ".json",
    );

    let batch = load_and_validate(file.path()).unwrap();
    let names: Vec<_> = batch.commands().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["echo", "false", "env"]);

    let first = &batch.commands()[0];
    assert_eq!(first.arguments().to_vec(), vec!["hi".to_string()]);
    assert_eq!(first.description(), "say hi");

    let third = &batch.commands()[2];
    assert_eq!(third.environment().get("X").map(String::as_str), Some("1"));
    assert_eq!(third.working_dir(), Some(Path::new("sub")));
}

#[test]
fn test_description_defaults_to_command_key() {
    let raw = parse_str(
        r#"[{"name": "echo", "arguments": ["a", "b"]}, {"name": "false", "description": "  "}]"#,
        InputFormat::Json,
    )
    .unwrap();
    let batch = batchrun::config::CommandBatch::try_from(raw).unwrap();

    assert_eq!(batch.commands()[0].description(), "echo [a b]");
    assert_eq!(batch.commands()[1].description(), "false []");
}

#[test]
fn test_null_arguments_and_empty_cwd_are_accepted() {
    let raw = parse_str(
        r#"[{"name": "true", "arguments": null, "cwd": ""}]"#,
        InputFormat::Json,
    )
    .unwrap();
    let batch = batchrun::config::CommandBatch::try_from(raw).unwrap();

    let spec = &batch.commands()[0];
    assert!(spec.arguments().is_empty());
    assert_eq!(spec.working_dir(), None);
}

#[test]
fn test_loads_toml_command_tables() {
    let file = command_file(
        r#"
[[command]]
name = "echo"
arguments = ["hi"]

[[command]]
name = "make"
arguments = ["test"]
cwd = "/abs/path"
description = "tests"

[command.environment]
CI = "true"
"#,
        ".toml",
    );

    let batch = load_and_validate(file.path()).unwrap();
    assert_eq!(batch.len(), 2);

    let make = &batch.commands()[1];
    assert_eq!(make.key(), "make [test]");
    assert_eq!(make.working_dir(), Some(Path::new("/abs/path")));
    assert_eq!(make.environment().get("CI").map(String::as_str), Some("true"));
}

#[test]
fn test_loading_twice_yields_equal_batches() {
    let file = command_file(
        r#"[{"name": "echo", "arguments": ["hi"], "environment": {"A": "1", "B": "2"}}]"#,
        ".json",
    );

    let first = load_and_validate(file.path()).unwrap();
    let second = load_and_validate(file.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_list_is_an_empty_batch() {
    let file = command_file("[]", ".json");
    let batch = load_and_validate(file.path()).unwrap();
    assert!(batch.is_empty());
}

#[test]
fn test_non_list_json_is_malformed() {
    let file = command_file(r#"{"name": "echo"}"#, ".json");

    match load_and_validate(file.path()) {
        Err(RunnerError::MalformedInput(_)) => {}
        other => panic!("Expected MalformedInput, got: {:?}", other),
    }
}

#[test]
fn test_record_missing_name_is_malformed() {
    let file = command_file(r#"[{"name": "echo"}, {"arguments": ["x"]}]"#, ".json");

    match load_and_validate(file.path()) {
        Err(RunnerError::MalformedInput(msg)) => assert!(msg.contains("name")),
        other => panic!("Expected MalformedInput, got: {:?}", other),
    }
}

#[test]
fn test_empty_name_is_rejected_with_index() {
    let file = command_file(r#"[{"name": "echo"}, {"name": ""}]"#, ".json");

    match load_and_validate(file.path()) {
        Err(RunnerError::MalformedInput(msg)) => {
            assert!(msg.contains("#1"));
            assert!(msg.contains("empty `name`"));
        }
        other => panic!("Expected MalformedInput, got: {:?}", other),
    }
}

#[test]
fn test_unknown_field_is_malformed() {
    let file = command_file(r#"[{"name": "echo", "args": ["typo"]}]"#, ".json");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(RunnerError::MalformedInput(_))
    ));
}

#[test]
fn test_invalid_environment_key_is_malformed() {
    let file = command_file(r#"[{"name": "env", "environment": {"A=B": "1"}}]"#, ".json");

    match load_and_validate(file.path()) {
        Err(RunnerError::MalformedInput(msg)) => assert!(msg.contains("A=B")),
        other => panic!("Expected MalformedInput, got: {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    match load_and_validate(&missing) {
        Err(RunnerError::IoError(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("Expected IoError, got: {:?}", other),
    }
}

#[test]
fn test_format_is_chosen_by_extension() {
    assert_eq!(InputFormat::from_path(Path::new("cmds.toml")), InputFormat::Toml);
    assert_eq!(InputFormat::from_path(Path::new("cmds.TOML")), InputFormat::Toml);
    assert_eq!(InputFormat::from_path(Path::new("cmds.json")), InputFormat::Json);
    assert_eq!(InputFormat::from_path(Path::new("commands")), InputFormat::Json);
}
