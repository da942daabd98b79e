#![allow(dead_code)]

pub use batchrun_test_utils::builders;
pub use batchrun_test_utils::{SharedBuffer, init_tracing, with_timeout};

use std::io::Write;

use tempfile::NamedTempFile;

/// Write `contents` to a temp file with the given extension.
pub fn command_file(contents: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .unwrap();
    write!(file, "{contents}").unwrap();
    file
}
