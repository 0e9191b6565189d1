//! Project scanning: discovery, extraction, ingestion
//!
//! This is the collaborator side of the analyzer. It turns a directory of
//! Java sources into a frozen [`ProjectSnapshot`] that the scoring core reads.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ipi_engine::{analyze, scan_project, Config};
//!
//! # fn main() -> ipi_engine::Result<()> {
//! let config = Config::default();
//! let snapshot = scan_project(Path::new("./commons-cli"), &config)?;
//! let analysis = analyze(&snapshot, &config.weights);
//! println!("{} interfaces", analysis.total_interfaces);
//! # Ok(())
//! # }
//! ```

mod files;
mod generation;

use std::path::Path;

use tracing::info;

pub use files::{collect_files, is_test_path, should_skip_path};
pub use generation::{extract_units, IndexingResult};

use crate::analysis::ProjectSnapshot;
use crate::config::Config;
use crate::error::{IpiError, Result};
use crate::lexical::LexicalScanner;
use crate::relations::Relations;
use crate::store::EntityStore;

/// Scan a project directory into an immutable snapshot.
///
/// Ingest happens in sorted file order, so the result is the same on every run.
pub fn scan_project(root: &Path, config: &Config) -> Result<ProjectSnapshot> {
    if !root.is_dir() {
        return Err(IpiError::FileNotFound {
            path: root.display().to_string(),
        });
    }

    let files = collect_files(root, &config.scan);
    let indexed = extract_units(&files);

    let mut store = EntityStore::new();
    for unit in &indexed.units {
        store.ingest_unit(unit);
    }

    let mut relations = Relations::resolve(&store);
    let scanner = LexicalScanner::for_store(&store)?;
    scanner.scan(&store, &indexed.texts).apply(&store, &mut relations);

    info!(
        files = files.len(),
        interfaces = store.interface_count(),
        types = store.type_count(),
        "project scanned"
    );

    Ok(ProjectSnapshot {
        project: Some(root.display().to_string()),
        store,
        relations,
        warnings: indexed.warnings,
    })
}
