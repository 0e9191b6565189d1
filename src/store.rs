//! Entity store for extracted interface and type facts
//!
//! Entities are keyed by name. Re-inserting a name overwrites the previous
//! facts but keeps the slot of the first insertion, so iteration order is the
//! order in which names were first seen. Source units are processed
//! independently and a name declared in two files is treated as the same
//! logical entity (last write wins).

use std::collections::HashMap;

use tracing::debug;

use crate::schema::{InterfaceFact, SourceUnit, TypeFact};

/// A type entity together with the unit that declared it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredType {
    pub fact: TypeFact,
    /// Path of the declaring source unit, when known
    pub source: Option<String>,
}

impl StoredType {
    pub fn name(&self) -> &str {
        &self.fact.name
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    interfaces: Vec<InterfaceFact>,
    interface_index: HashMap<String, usize>,
    types: Vec<StoredType>,
    type_index: HashMap<String, usize>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an interface by name
    pub fn insert_interface(&mut self, name: &str, methods: Vec<String>, extends: Vec<String>) {
        self.put_interface(InterfaceFact {
            name: name.to_string(),
            methods,
            extends,
        });
    }

    /// Insert or overwrite a type by name
    pub fn insert_type(
        &mut self,
        name: &str,
        implements: Vec<String>,
        extends: Option<String>,
        methods: Vec<String>,
    ) {
        self.put_type(
            TypeFact {
                name: name.to_string(),
                implements,
                extends,
                methods,
            },
            None,
        );
    }

    pub fn put_interface(&mut self, fact: InterfaceFact) {
        match self.interface_index.get(&fact.name) {
            Some(&slot) => {
                debug!(interface = %fact.name, "overwriting interface declared earlier");
                self.interfaces[slot] = fact;
            }
            None => {
                self.interface_index
                    .insert(fact.name.clone(), self.interfaces.len());
                self.interfaces.push(fact);
            }
        }
    }

    pub fn put_type(&mut self, fact: TypeFact, source: Option<String>) {
        let stored = StoredType { fact, source };
        match self.type_index.get(stored.name()) {
            Some(&slot) => {
                debug!(type_name = %stored.name(), "overwriting type declared earlier");
                self.types[slot] = stored;
            }
            None => {
                self.type_index
                    .insert(stored.name().to_string(), self.types.len());
                self.types.push(stored);
            }
        }
    }

    /// Ingest every declaration of a source unit, tagging types with its path
    pub fn ingest_unit(&mut self, unit: &SourceUnit) {
        for iface in &unit.interfaces {
            self.put_interface(iface.clone());
        }
        for ty in &unit.types {
            self.put_type(ty.clone(), Some(unit.path.clone()));
        }
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceFact> {
        self.interface_index
            .get(name)
            .map(|&slot| &self.interfaces[slot])
    }

    pub fn contains_interface(&self, name: &str) -> bool {
        self.interface_index.contains_key(name)
    }

    pub fn get_type(&self, name: &str) -> Option<&StoredType> {
        self.type_index.get(name).map(|&slot| &self.types[slot])
    }

    pub fn contains_type(&self, name: &str) -> bool {
        self.type_index.contains_key(name)
    }

    /// Interfaces in first-insertion order
    pub fn interfaces(&self) -> &[InterfaceFact] {
        &self.interfaces
    }

    /// Types in first-insertion order
    pub fn types(&self) -> &[StoredType] {
        &self.types
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}
