// src/config/mod.rs

//! Command list loading and validation.
//!
//! Responsibilities:
//! - Define the serde-backed data model (`model.rs`).
//! - Load a command list from disk in JSON or TOML (`loader.rs`).
//! - Validate shallow structural invariants (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{InputFormat, load_and_validate, load_from_path, parse_str};
pub use model::{CommandBatch, CommandSpec, RawCommand, RawCommandList};
