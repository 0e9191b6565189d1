//! Relationship resolver
//!
//! Derives implementation links from the store's declared `implements` lists,
//! and records usage links and call-site counts handed over by the lexical
//! detectors. Links whose interface (or type) is not in the store are dropped.

use std::collections::{BTreeSet, HashMap};

use crate::store::EntityStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relations {
    /// interface -> implementing types, in type insertion order
    implementations: HashMap<String, Vec<String>>,
    /// interface -> types referencing it as a type
    usages: HashMap<String, BTreeSet<String>>,
    /// interface -> method -> lexical call-site count
    calls: HashMap<String, HashMap<String, u64>>,
}

impl Relations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build relations with implementation links already resolved
    pub fn resolve(store: &EntityStore) -> Self {
        let mut relations = Self::new();
        relations.link_implementations(store);
        relations
    }

    /// Append every (type, interface) implementation link found in the store.
    ///
    /// Idempotent: a type is listed at most once per interface however many
    /// times this runs or the type repeats the interface in its declaration.
    pub fn link_implementations(&mut self, store: &EntityStore) {
        for ty in store.types() {
            for iface in &ty.fact.implements {
                if !store.contains_interface(iface) {
                    continue;
                }
                let implementors = self.implementations.entry(iface.clone()).or_default();
                if !implementors.iter().any(|t| t == ty.name()) {
                    implementors.push(ty.name().to_string());
                }
            }
        }
    }

    /// Record that `type_name` references `interface` as a type.
    ///
    /// Returns `true` when a new link was stored. Repeated signals for the same
    /// pair are absorbed: usage is boolean per pair.
    pub fn record_usage(&mut self, store: &EntityStore, type_name: &str, interface: &str) -> bool {
        if !store.contains_interface(interface) || !store.contains_type(type_name) {
            return false;
        }
        self.usages
            .entry(interface.to_string())
            .or_default()
            .insert(type_name.to_string())
    }

    /// Add `count` call-site occurrences of `interface.method`
    pub fn record_calls(&mut self, store: &EntityStore, interface: &str, method: &str, count: u64) {
        if !store.contains_interface(interface) {
            return;
        }
        *self
            .calls
            .entry(interface.to_string())
            .or_default()
            .entry(method.to_string())
            .or_insert(0) += count;
    }

    pub fn implementations(&self, interface: &str) -> &[String] {
        self.implementations
            .get(interface)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn implementation_count(&self, interface: &str) -> usize {
        self.implementations(interface).len()
    }

    pub fn usage_count(&self, interface: &str) -> usize {
        self.usages.get(interface).map_or(0, BTreeSet::len)
    }

    pub fn is_used_by(&self, interface: &str, type_name: &str) -> bool {
        self.usages
            .get(interface)
            .is_some_and(|users| users.contains(type_name))
    }

    pub fn call_count(&self, interface: &str, method: &str) -> u64 {
        self.calls
            .get(interface)
            .and_then(|methods| methods.get(method))
            .copied()
            .unwrap_or(0)
    }
}
