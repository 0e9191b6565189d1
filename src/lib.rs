//! ipi-engine: Interface Poisoning Index analyzer
//!
//! Measures how much architectural complexity an interface adds without a
//! matching payoff. Each interface gets four normalized sub-metrics:
//!
//! - **SIR** (Single-Implementation Risk): `1 / IC`, or 1 with no implementations
//! - **UUR** (Usage Utilization Rate): share of types referencing it as a type
//! - **UMR** (Unused Method Rate): share of declared methods never called
//! - **NCD** (Normalized Call-chain Depth): inheritance depth relative to the
//!   deepest chain in the project
//!
//! combined as `IPI = α·SIR + β·(1 − UUR) + γ·UMR + δ·NCD` and banded into
//! HIGH (> 0.7), MEDIUM (0.4 to 0.7) and LOW (< 0.4).
//!
//! # Pipeline
//!
//! Facts are ingested into an [`EntityStore`], links are resolved into
//! [`Relations`], and the frozen [`ProjectSnapshot`] is scored by [`analyze`].
//! Facts can come from the bundled Java extractor ([`scan_project`]) or from
//! any external parser through a JSON [`FactSheet`].
//!
//! # Example
//!
//! ```
//! use ipi_engine::{analyze, EntityStore, ProjectSnapshot, Relations, Weights};
//!
//! let mut store = EntityStore::new();
//! store.insert_interface("Repository", vec!["find".into()], vec![]);
//! store.insert_type("SqlRepository", vec!["Repository".into()], None, vec!["find".into()]);
//!
//! let relations = Relations::resolve(&store);
//! let snapshot = ProjectSnapshot { store, relations, ..Default::default() };
//! let analysis = analyze(&snapshot, &Weights::default());
//!
//! assert_eq!(analysis.scores[0].implementations, 1);
//! ```

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod depth;
pub mod error;
pub mod extract;
pub mod indexing;
pub mod lexical;
pub mod metrics;
pub mod relations;
pub mod report;
pub mod schema;
pub mod scoring;
pub mod store;
pub mod toon;
pub mod utils;

// Re-export commonly used types
pub use analysis::{analyze, Analysis, ProjectSnapshot};
pub use cli::{Cli, OutputFormat};
pub use config::{Config, ScanConfig};
pub use depth::{interface_depth, max_call_depth, resolve_depths};
pub use error::{IpiError, Result};
pub use extract::parse_java;
pub use indexing::scan_project;
pub use lexical::{LexicalScanner, LexicalSignals};
pub use metrics::{Signals, SubMetrics};
pub use relations::Relations;
pub use report::{
    format_text_report, rank, ReportOptions, SeverityView, SummaryDocument, SummaryStats,
};
pub use schema::{
    FactSheet, InterfaceFact, InterfaceScore, IpiRecord, Severity, SourceUnit, TypeFact,
    UnitWarning, UsageFact,
};
pub use scoring::{classify, Scorer, Weights};
pub use store::EntityStore;
pub use toon::{encode_json, encode_toon};
