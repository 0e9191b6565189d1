//! IPI scoring and severity bands
//!
//! IPI = alpha * SIR + beta * (1 - UUR) + gamma * UMR + delta * NCD
//!
//! Weights are plain configuration passed into the [`Scorer`]. A weight set
//! that does not sum to 1 is used as given.

use serde::{Deserialize, Serialize};

use crate::metrics::{Signals, SubMetrics};
use crate::schema::{InterfaceScore, Severity};

/// IPI strictly above this is HIGH
pub const HIGH_THRESHOLD: f64 = 0.7;
/// IPI at or above this (and not HIGH) is MEDIUM
pub const MEDIUM_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// SIR weight
    pub alpha: f64,
    /// (1 - UUR) weight
    pub beta: f64,
    /// UMR weight
    pub gamma: f64,
    /// NCD weight
    pub delta: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            alpha: 0.25,
            beta: 0.15,
            gamma: 0.25,
            delta: 0.35,
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.alpha + self.beta + self.gamma + self.delta
    }

    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-9
    }
}

/// Map an IPI value onto its severity band
pub fn classify(ipi: f64) -> Severity {
    if ipi > HIGH_THRESHOLD {
        Severity::High
    } else if ipi >= MEDIUM_THRESHOLD {
        Severity::Medium
    } else {
        Severity::Low
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    weights: Weights,
}

impl Scorer {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn score(&self, m: &SubMetrics) -> f64 {
        let w = &self.weights;
        w.alpha * m.sir + w.beta * (1.0 - m.uur) + w.gamma * m.umr + w.delta * m.ncd
    }

    /// Score one interface and assemble its full-precision result
    pub fn evaluate(&self, interface: &str, signals: &Signals, metrics: &SubMetrics) -> InterfaceScore {
        let ipi = self.score(metrics);
        InterfaceScore {
            interface: interface.to_string(),
            implementations: signals.implementations,
            sir: metrics.sir,
            usages: signals.usages,
            uur: metrics.uur,
            total_methods: signals.total_methods,
            unused_methods: signals.unused_methods,
            umr: metrics.umr,
            call_depth: signals.call_depth,
            ncd: metrics.ncd,
            ipi,
            severity: classify(ipi),
        }
    }
}
