//! Source tree scanner for derived class files.
//!
//! Finds every top-level source file that declares a class extending another one, without
//! parsing anything beyond the class header.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tether_core::{ClassUnit, NameFilter, Result, TetherError};
use walkdir::WalkDir;

/// Extension of hand-written source files.
pub const SOURCE_EXTENSION: &str = "js";

static CLASS_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:module\.exports\s*=\s*)?class\s+(\w+)\s+extends\s+([\w.]+)\s*\{").unwrap()
});

/// Discover all derived classes directly inside `src_dir` whose file name passes `filter`.
///
/// Files are visited in file-name order so repeated runs produce the same class order.
pub fn discover_classes(src_dir: &Path, filter: &NameFilter) -> Result<Vec<ClassUnit>> {
    if !src_dir.is_dir() {
        return Err(TetherError::Config(format!(
            "Source directory {} does not exist",
            src_dir.display()
        )));
    }

    let mut units = Vec::new();

    for entry in WalkDir::new(src_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == SOURCE_EXTENSION)
                .unwrap_or(false)
        })
    {
        let file_name = entry.file_name().to_string_lossy();
        if !filter.matches(&file_name) {
            continue;
        }

        let content =
            std::fs::read_to_string(entry.path()).map_err(|e| TetherError::file(entry.path(), e))?;
        match parse_class(&content, entry.path()) {
            Some(unit) => units.push(unit),
            None => tracing::debug!(file = ?entry.path(), "No derived class found, skipping"),
        }
    }

    Ok(units)
}

/// Extract the first derived class from a source file.
pub fn parse_class(content: &str, path: &Path) -> Option<ClassUnit> {
    let caps = CLASS_HEADER.captures(content)?;
    let body_start = caps.get(0)?.end();
    let body_end = content.rfind('}')?;
    if body_end < body_start {
        return None;
    }

    Some(ClassUnit {
        class_name: caps[1].to_string(),
        base_class_name: caps[2].to_string(),
        source_body: trim_blank_edges(&content[body_start..body_end]),
        source_path: path.to_path_buf(),
    })
}

/// Drop leading and trailing blank lines while keeping the indentation of the first line.
fn trim_blank_edges(body: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => {
            let mut out = lines[first..=last].join("\n");
            out.push('\n');
            out
        }
        _ => String::new(),
    }
}
