//! Fact and result types shared by the analyzer
//!
//! The fact types are the input contract: whatever parses source units
//! (the bundled Java extractor or an external tool writing a [`FactSheet`])
//! hands these to the entity store. The score and record types are the output
//! contract consumed by the reporter and serializers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utils::round3;

/// An interface declaration as extracted from one source unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceFact {
    pub name: String,
    /// Declared method names in declaration order; duplicates are kept
    #[serde(default)]
    pub methods: Vec<String>,
    /// Names of directly extended interfaces, possibly dangling
    #[serde(default)]
    pub extends: Vec<String>,
}

/// A class-like declaration (class, enum, record) from one source unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFact {
    pub name: String,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub methods: Vec<String>,
}

/// All facts extracted from a single source unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub path: String,
    #[serde(default)]
    pub interfaces: Vec<InterfaceFact>,
    #[serde(default)]
    pub types: Vec<TypeFact>,
}

impl SourceUnit {
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty() && self.types.is_empty()
    }
}

/// A "type references interface" signal from a usage detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageFact {
    #[serde(rename = "type")]
    pub type_name: String,
    pub interface: String,
}

/// Pre-extracted facts for a whole project, as written by an external parser
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactSheet {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub units: Vec<SourceUnit>,
    #[serde(default)]
    pub usages: Vec<UsageFact>,
    /// interface -> method -> lexical call-site count over the whole scope
    #[serde(default)]
    pub calls: BTreeMap<String, BTreeMap<String, u64>>,
}

/// A source unit that could not be read or parsed; the run continues without it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitWarning {
    pub path: String,
    pub message: String,
}

/// Severity band of an IPI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// Full-precision result for one interface
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceScore {
    pub interface: String,
    /// Implementation count (IC)
    pub implementations: usize,
    /// Single-Implementation Risk
    pub sir: f64,
    /// Number of types referencing the interface as a type (IU)
    pub usages: usize,
    /// Usage Utilization Rate
    pub uur: f64,
    pub total_methods: usize,
    pub unused_methods: usize,
    /// Unused Method Rate
    pub umr: f64,
    /// Inheritance chain depth (CD)
    pub call_depth: usize,
    /// Normalized Call-chain Depth
    pub ncd: f64,
    pub ipi: f64,
    pub severity: Severity,
}

/// Serializable, display-rounded view of an [`InterfaceScore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpiRecord {
    pub interface: String,
    #[serde(rename = "IC")]
    pub ic: usize,
    #[serde(rename = "SIR")]
    pub sir: f64,
    #[serde(rename = "IU")]
    pub iu: usize,
    #[serde(rename = "UUR")]
    pub uur: f64,
    pub total_methods: usize,
    pub unused_methods: usize,
    #[serde(rename = "UMR")]
    pub umr: f64,
    #[serde(rename = "CallDepth")]
    pub call_depth: usize,
    #[serde(rename = "NCD")]
    pub ncd: f64,
    #[serde(rename = "IPI")]
    pub ipi: f64,
    pub severity: Severity,
}

impl From<&InterfaceScore> for IpiRecord {
    fn from(score: &InterfaceScore) -> Self {
        Self {
            interface: score.interface.clone(),
            ic: score.implementations,
            sir: round3(score.sir),
            iu: score.usages,
            uur: round3(score.uur),
            total_methods: score.total_methods,
            unused_methods: score.unused_methods,
            umr: round3(score.umr),
            call_depth: score.call_depth,
            ncd: round3(score.ncd),
            ipi: round3(score.ipi),
            severity: score.severity,
        }
    }
}
