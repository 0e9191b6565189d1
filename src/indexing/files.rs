//! Source file collection
//!
//! Walks a project tree with the `ignore` crate (so `.gitignore` is honored
//! when configured), skipping hidden entries, build output directories at the
//! top of the project, and optionally test directories. Deeper directories
//! with the same names are ordinary packages (`com.acme.build`) and are kept.

use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::config::ScanConfig;

/// Build and dependency output directories, skipped directly under the root
const SKIPPED_DIRS: &[&str] = &[
    "target",
    "build",
    "out",
    "bin",
    "node_modules",
    "dist",
    "vendor",
];

/// Collect source files under `root` matching the configured extensions,
/// sorted by path.
pub fn collect_files(root: &Path, config: &ScanConfig) -> Vec<PathBuf> {
    let walk_root = root.to_path_buf();
    let exclude_tests = config.exclude_tests;

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .require_git(false)
        .filter_entry(move |entry| {
            let path = entry.path();
            if path == walk_root {
                return true;
            }
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if is_dir && entry.depth() == 1 && should_skip_path(path) {
                return false;
            }
            !(is_dir && exclude_tests && is_test_path(&walk_root, path))
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.into_path();
        if has_extension(&path, &config.extensions) {
            files.push(path);
        }
    }

    files.sort();
    debug!(root = %root.display(), files = files.len(), "collected source files");
    files
}

/// Check if a directory should be skipped by name.
///
/// Skips hidden directories and common build/dependency output.
pub fn should_skip_path(path: &Path) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.starts_with('.') || SKIPPED_DIRS.contains(&name),
        None => false,
    }
}

/// Whether `path`, relative to `root`, lies in a test directory
/// (any component containing "test", case-insensitive).
pub fn is_test_path(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|c| match c {
        Component::Normal(part) => part
            .to_str()
            .is_some_and(|s| s.to_lowercase().contains("test")),
        _ => false,
    })
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}
