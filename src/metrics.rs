//! Signal aggregation
//!
//! Turns raw per-interface signals (implementation count, usage count, call
//! counts per declared method, inheritance depth) into the four normalized
//! sub-metrics that feed the scorer. Every division has a guarded fallback,
//! so each sub-metric lies in [0, 1] for well-formed inputs.

use crate::relations::Relations;
use crate::schema::InterfaceFact;

/// Raw signals gathered for one interface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    /// IC
    pub implementations: usize,
    /// IU
    pub usages: usize,
    pub total_methods: usize,
    pub unused_methods: usize,
    /// CD
    pub call_depth: usize,
}

impl Signals {
    /// Collect the signals for `iface` from resolved relations and its depth.
    ///
    /// Each entry of the method list is checked on its own, so a method name
    /// declared twice counts twice towards both totals.
    pub fn gather(iface: &InterfaceFact, relations: &Relations, call_depth: usize) -> Self {
        let unused_methods = iface
            .methods
            .iter()
            .filter(|method| relations.call_count(&iface.name, method) == 0)
            .count();

        Self {
            implementations: relations.implementation_count(&iface.name),
            usages: relations.usage_count(&iface.name),
            total_methods: iface.methods.len(),
            unused_methods,
            call_depth,
        }
    }
}

/// The four normalized sub-metrics of one interface
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SubMetrics {
    pub sir: f64,
    pub uur: f64,
    pub umr: f64,
    pub ncd: f64,
}

impl SubMetrics {
    pub fn from_signals(signals: &Signals, total_types: usize, max_call_depth: usize) -> Self {
        Self {
            sir: single_implementation_risk(signals.implementations),
            uur: usage_utilization_rate(signals.usages, total_types),
            umr: unused_method_rate(signals.unused_methods, signals.total_methods),
            ncd: normalized_call_depth(signals.call_depth, max_call_depth),
        }
    }
}

/// SIR = 1 / IC, or 1.0 when nothing implements the interface
pub fn single_implementation_risk(implementations: usize) -> f64 {
    if implementations > 0 {
        1.0 / implementations as f64
    } else {
        1.0
    }
}

/// UUR = IU / max(total_types, 1)
pub fn usage_utilization_rate(usages: usize, total_types: usize) -> f64 {
    usages as f64 / total_types.max(1) as f64
}

/// UMR = unused / total, or 0.0 for an interface without methods
pub fn unused_method_rate(unused: usize, total: usize) -> f64 {
    if total > 0 {
        unused as f64 / total as f64
    } else {
        0.0
    }
}

/// NCD = (CD - 1) / (max - 1), or 0.0 when every chain is flat
pub fn normalized_call_depth(call_depth: usize, max_call_depth: usize) -> f64 {
    if max_call_depth > 1 {
        call_depth.saturating_sub(1) as f64 / (max_call_depth - 1) as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EntityStore;

    #[test]
    fn test_sir() {
        assert_eq!(single_implementation_risk(0), 1.0);
        assert_eq!(single_implementation_risk(1), 1.0);
        assert_eq!(single_implementation_risk(4), 0.25);
    }

    #[test]
    fn test_uur_guards_empty_project() {
        assert_eq!(usage_utilization_rate(0, 0), 0.0);
        assert_eq!(usage_utilization_rate(3, 10), 0.3);
    }

    #[test]
    fn test_umr_guards_empty_surface() {
        assert_eq!(unused_method_rate(0, 0), 0.0);
        assert_eq!(unused_method_rate(1, 2), 0.5);
    }

    #[test]
    fn test_ncd() {
        assert_eq!(normalized_call_depth(1, 1), 0.0);
        assert_eq!(normalized_call_depth(1, 3), 0.0);
        assert_eq!(normalized_call_depth(2, 3), 0.5);
        assert_eq!(normalized_call_depth(3, 3), 1.0);
    }

    #[test]
    fn test_duplicate_methods_counted_independently() {
        let mut store = EntityStore::new();
        store.insert_interface(
            "Codec",
            vec!["encode".into(), "encode".into(), "decode".into()],
            vec![],
        );
        let mut relations = Relations::resolve(&store);
        relations.record_calls(&store, "Codec", "decode", 1);

        let iface = store.interface("Codec").unwrap();
        let signals = Signals::gather(iface, &relations, 1);
        assert_eq!(signals.total_methods, 3);
        assert_eq!(signals.unused_methods, 2);
    }

    #[test]
    fn test_sub_metrics_in_unit_range() {
        let signals = Signals {
            implementations: 2,
            usages: 5,
            total_methods: 4,
            unused_methods: 3,
            call_depth: 2,
        };
        let m = SubMetrics::from_signals(&signals, 5, 4);
        for value in [m.sir, m.uur, m.umr, m.ncd] {
            assert!((0.0..=1.0).contains(&value));
        }
        assert_eq!(m.sir, 0.5);
        assert_eq!(m.uur, 1.0);
        assert_eq!(m.umr, 0.75);
        assert!((m.ncd - 1.0 / 3.0).abs() < 1e-12);
    }
}
