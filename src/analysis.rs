//! Two-phase analysis: ingest into a snapshot, then compute
//!
//! A [`ProjectSnapshot`] holds everything known about the project once ingest
//! is finished. [`analyze`] only reads it: depths are resolved per interface,
//! `max_call_depth` is reduced over all of them, and then every interface is
//! aggregated and scored independently. Scores come back in store order.

use rayon::prelude::*;
use tracing::debug;

use crate::depth::{max_call_depth, resolve_depths};
use crate::error::{IpiError, Result};
use crate::metrics::{Signals, SubMetrics};
use crate::relations::Relations;
use crate::schema::{FactSheet, InterfaceScore, UnitWarning};
use crate::scoring::{Scorer, Weights};
use crate::store::EntityStore;

/// Frozen facts and relations of one project
#[derive(Debug, Clone, Default)]
pub struct ProjectSnapshot {
    pub project: Option<String>,
    pub store: EntityStore,
    pub relations: Relations,
    /// Units skipped during ingest
    pub warnings: Vec<UnitWarning>,
}

impl ProjectSnapshot {
    /// Build a snapshot from facts produced by an external parser
    pub fn from_fact_sheet(sheet: FactSheet) -> Self {
        let mut store = EntityStore::new();
        for unit in &sheet.units {
            store.ingest_unit(unit);
        }

        let mut relations = Relations::resolve(&store);
        for usage in &sheet.usages {
            relations.record_usage(&store, &usage.type_name, &usage.interface);
        }
        for (interface, methods) in &sheet.calls {
            for (method, count) in methods {
                relations.record_calls(&store, interface, method, *count);
            }
        }

        Self {
            project: sheet.project,
            store,
            relations,
            warnings: Vec::new(),
        }
    }

    /// Parse a JSON fact sheet
    pub fn from_fact_sheet_json(text: &str) -> Result<Self> {
        let sheet: FactSheet = serde_json::from_str(text).map_err(|e| IpiError::InvalidFacts {
            message: e.to_string(),
        })?;
        Ok(Self::from_fact_sheet(sheet))
    }
}

/// Scores for every interface of a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub project: Option<String>,
    /// In store insertion order
    pub scores: Vec<InterfaceScore>,
    pub total_types: usize,
    pub total_interfaces: usize,
    pub max_call_depth: usize,
    pub weights: Weights,
    pub skipped_units: usize,
}

/// Compute the IPI of every interface in the snapshot
pub fn analyze(snapshot: &ProjectSnapshot, weights: &Weights) -> Analysis {
    let store = &snapshot.store;
    let depths = resolve_depths(store);
    let max_depth = max_call_depth(&depths);
    let total_types = store.type_count();
    let scorer = Scorer::new(*weights);

    let scores: Vec<InterfaceScore> = store
        .interfaces()
        .par_iter()
        .zip(depths.par_iter())
        .map(|(iface, &depth)| {
            let signals = Signals::gather(iface, &snapshot.relations, depth);
            let metrics = SubMetrics::from_signals(&signals, total_types, max_depth);
            scorer.evaluate(&iface.name, &signals, &metrics)
        })
        .collect();

    debug!(
        interfaces = scores.len(),
        max_call_depth = max_depth,
        "scored interfaces"
    );

    Analysis {
        project: snapshot.project.clone(),
        scores,
        total_types,
        total_interfaces: store.interface_count(),
        max_call_depth: max_depth,
        weights: *weights,
        skipped_units: snapshot.warnings.len(),
    }
}
