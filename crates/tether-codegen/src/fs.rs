//! File-system helpers used by every writer in the pipeline.

use std::fs::Permissions;
use std::io::Write;
use std::path::Path;

use regex::{NoExpand, Regex};
use tempfile::NamedTempFile;
use tether_core::{Result, TetherError};

/// Create a directory and all of its parents. Succeeds if it already exists.
pub fn create_folder_recursively(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| TetherError::file(dir, e))
}

/// Replace the contents of `path` atomically.
///
/// The new contents go to a temporary file in the same directory which is then renamed over
/// the target, so readers see either the old file or the new one. An existing target keeps its
/// permissions; a new one gets the usual `0644`.
pub fn overwrite_file(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    create_folder_recursively(parent)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| TetherError::file(parent, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| TetherError::file(tmp.path(), e))?;
    if let Some(permissions) = target_permissions(path) {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| TetherError::file(tmp.path(), e))?;
    }
    tmp.persist(path)
        .map_err(|e| TetherError::file(path, e.error))?;

    Ok(())
}

fn target_permissions(path: &Path) -> Option<Permissions> {
    match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => new_file_permissions(),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Replace the first match of `pattern` in `path` with `replacement`, taken literally.
///
/// A missing match means the file no longer has the shape the generator expects and is
/// reported as drift rather than skipped.
pub fn replace_in_file(path: &Path, pattern: &Regex, replacement: &str) -> Result<()> {
    let contents = std::fs::read_to_string(path).map_err(|e| TetherError::file(path, e))?;

    if !pattern.is_match(&contents) {
        return Err(TetherError::Drift {
            path: path.to_path_buf(),
            detail: format!("no region matches /{}/", pattern.as_str()),
        });
    }

    let replaced = pattern.replace(&contents, NoExpand(replacement));
    if replaced == contents {
        tracing::debug!(file = %path.display(), "Region already up to date");
        return Ok(());
    }

    overwrite_file(path, &replaced)
}
