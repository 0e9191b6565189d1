//! Parallel fact extraction over collected files

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::IpiError;
use crate::extract::parse_java;
use crate::schema::{SourceUnit, UnitWarning};

/// Result of extracting facts from a set of files
#[derive(Debug, Default)]
pub struct IndexingResult {
    /// Extracted units, in the order of the input file list
    pub units: Vec<SourceUnit>,
    /// Source text of each extracted unit, keyed by unit path
    pub texts: HashMap<String, String>,
    /// Units that could not be read or parsed
    pub warnings: Vec<UnitWarning>,
    pub total_bytes: usize,
}

enum Outcome {
    Parsed(SourceUnit, String),
    Failed(UnitWarning),
}

/// Read a unit as text. Bytes that are not valid UTF-8 (Latin-1 comments in
/// older projects, mostly) are replaced rather than failing the unit.
fn read_source(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!(path = %path.display(), "non UTF-8 bytes replaced");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

fn process_file(path: &Path) -> Outcome {
    let source = match read_source(path) {
        Ok(s) => s,
        Err(e) => {
            return Outcome::Failed(UnitWarning {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    };
    match parse_java(path, &source) {
        Ok(unit) => Outcome::Parsed(unit, source),
        Err(IpiError::ParseFailure { path, message }) => {
            Outcome::Failed(UnitWarning { path, message })
        }
        Err(e) => Outcome::Failed(UnitWarning {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
    }
}

/// Read and parse every file in parallel.
///
/// Failures are collected as warnings and never stop the run.
pub fn extract_units(files: &[PathBuf]) -> IndexingResult {
    let outcomes: Vec<Outcome> = files.par_iter().map(|path| process_file(path)).collect();

    let mut result = IndexingResult::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Parsed(unit, source) => {
                result.total_bytes += source.len();
                result.texts.insert(unit.path.clone(), source);
                result.units.push(unit);
            }
            Outcome::Failed(warning) => {
                warn!(path = %warning.path, "skipping unit: {}", warning.message);
                result.warnings.push(warning);
            }
        }
    }

    debug!(
        units = result.units.len(),
        skipped = result.warnings.len(),
        bytes = result.total_bytes,
        "extracted source units"
    );
    result
}
