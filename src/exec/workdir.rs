// src/exec/workdir.rs

//! Working directory resolution.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve a configured working directory against the process's current
/// directory at the time of the call.
///
/// - `None` means "inherit"; nothing is resolved and `Ok(None)` is returned.
/// - Absolute paths are returned unchanged.
/// - Relative paths are joined onto `std::env::current_dir()`; if that
///   cannot be determined the error is returned and the caller must not
///   launch the process.
pub fn resolve_working_dir(dir: Option<&Path>) -> io::Result<Option<PathBuf>> {
    let Some(dir) = dir else {
        return Ok(None);
    };
    if dir.is_absolute() {
        return Ok(Some(dir.to_path_buf()));
    }

    let base = std::env::current_dir()?;
    Ok(Some(resolve_against(dir, &base)))
}

/// Join `dir` onto `base` unless it is already absolute, then lexically
/// clean `.` and `..` components.
///
/// `resolve_against("sub", "/work") == "/work/sub"`.
pub fn resolve_against(dir: &Path, base: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    clean(&base.join(dir))
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                if !out.pop() && !out.has_root() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
