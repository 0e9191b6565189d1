//! Common test utilities for ipi-engine integration tests
//!
//! - `TestRepo` builder for materializing small Java projects on disk
//! - helpers for looking up scores by interface name

#![allow(dead_code)]

pub mod test_repo;

pub use test_repo::TestRepo;

use ipi_engine::{Analysis, InterfaceScore};

/// Score of `name`, panicking with the known names if it is missing
pub fn score_of<'a>(analysis: &'a Analysis, name: &str) -> &'a InterfaceScore {
    analysis
        .scores
        .iter()
        .find(|s| s.interface == name)
        .unwrap_or_else(|| {
            let known: Vec<_> = analysis.scores.iter().map(|s| s.interface.as_str()).collect();
            panic!("no score for {name}; have {known:?}")
        })
}
