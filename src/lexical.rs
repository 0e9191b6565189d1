//! Lexical usage and call-site detection
//!
//! Both signals are plain text searches over the source of each type's unit.
//! They are coarse on purpose: matches inside strings or comments count, and
//! calls through renamed references are missed.
//!
//! - usage: the interface name in a type position, `\bNAME\s+\w+`, `<NAME>`
//!   or `\(NAME\s+`
//! - call: `\.METHOD\s*\(`

use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;
use regex::Regex;
use tracing::debug;

use crate::error::{IpiError, Result};
use crate::relations::Relations;
use crate::store::EntityStore;

/// Detects references to one interface as a type
#[derive(Debug, Clone)]
pub struct UsageMatcher {
    interface: String,
    pattern: Regex,
}

impl UsageMatcher {
    pub fn new(interface: &str) -> Result<Self> {
        let name = regex::escape(interface);
        let pattern = format!(r"\b{name}\s+\w+|<{name}>|\({name}\s+");
        Ok(Self {
            interface: interface.to_string(),
            pattern: compile(&pattern)?,
        })
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn is_referenced_in(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Counts call sites of one method name
#[derive(Debug, Clone)]
pub struct CallCounter {
    method: String,
    pattern: Regex,
}

impl CallCounter {
    pub fn new(method: &str) -> Result<Self> {
        let pattern = format!(r"\.{}\s*\(", regex::escape(method));
        Ok(Self {
            method: method.to_string(),
            pattern: compile(&pattern)?,
        })
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn count_in(&self, text: &str) -> u64 {
        self.pattern.find_iter(text).count() as u64
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| IpiError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Signals found in one type's source text
#[derive(Debug, Clone, Default)]
struct TypeSignals {
    type_name: String,
    /// Indices into the scanner's usage matchers
    used: Vec<usize>,
    /// Per call counter index
    calls: Vec<u64>,
}

/// Usage and call signals collected over the whole project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexicalSignals {
    /// (type, interface) pairs, in type order
    pub usages: Vec<(String, String)>,
    /// method name -> call sites summed over every scanned type
    pub calls: HashMap<String, u64>,
}

impl LexicalSignals {
    /// Feed the signals into the resolver: usages per pair, and every
    /// interface's declared methods with the counts of their names.
    pub fn apply(&self, store: &EntityStore, relations: &mut Relations) {
        for (type_name, interface) in &self.usages {
            relations.record_usage(store, type_name, interface);
        }
        for iface in store.interfaces() {
            let distinct: BTreeSet<&String> = iface.methods.iter().collect();
            for method in distinct {
                let count = self.calls.get(method.as_str()).copied().unwrap_or(0);
                relations.record_calls(store, &iface.name, method, count);
            }
        }
    }
}

/// Matchers for every interface and interface method in a store
#[derive(Debug, Clone)]
pub struct LexicalScanner {
    usage: Vec<UsageMatcher>,
    calls: Vec<CallCounter>,
}

impl LexicalScanner {
    pub fn for_store(store: &EntityStore) -> Result<Self> {
        let usage = store
            .interfaces()
            .iter()
            .map(|iface| UsageMatcher::new(&iface.name))
            .collect::<Result<Vec<_>>>()?;

        let methods: BTreeSet<&str> = store
            .interfaces()
            .iter()
            .flat_map(|iface| iface.methods.iter().map(String::as_str))
            .collect();
        let calls = methods
            .into_iter()
            .map(CallCounter::new)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            interfaces = usage.len(),
            methods = calls.len(),
            "compiled lexical matchers"
        );
        Ok(Self { usage, calls })
    }

    /// Scan the unit text of every type in the store.
    ///
    /// `texts` maps unit paths to their source. Types without a known source
    /// are skipped. Each type scans its own unit, so a unit declaring several
    /// types is searched once per type.
    pub fn scan(&self, store: &EntityStore, texts: &HashMap<String, String>) -> LexicalSignals {
        let per_type: Vec<TypeSignals> = store
            .types()
            .par_iter()
            .filter_map(|ty| {
                let text = texts.get(ty.source.as_deref()?)?;
                Some(self.scan_text(ty.name(), text))
            })
            .collect();

        let mut signals = LexicalSignals::default();
        for found in per_type {
            for &index in &found.used {
                signals.usages.push((
                    found.type_name.clone(),
                    self.usage[index].interface().to_string(),
                ));
            }
            for (counter, count) in self.calls.iter().zip(&found.calls) {
                *signals.calls.entry(counter.method().to_string()).or_insert(0) += count;
            }
        }
        signals
    }

    fn scan_text(&self, type_name: &str, text: &str) -> TypeSignals {
        TypeSignals {
            type_name: type_name.to_string(),
            used: self
                .usage
                .iter()
                .enumerate()
                .filter(|(_, m)| m.is_referenced_in(text))
                .map(|(i, _)| i)
                .collect(),
            calls: self.calls.iter().map(|c| c.count_in(text)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{InterfaceFact, SourceUnit, TypeFact};

    #[test]
    fn test_usage_patterns() {
        let m = UsageMatcher::new("Repo").unwrap();
        assert!(m.is_referenced_in("private Repo repo;"));
        assert!(m.is_referenced_in("List<Repo> all;"));
        assert!(m.is_referenced_in("void set(Repo r) {}"));
        assert!(!m.is_referenced_in("class SqlRepo implements Repo {"));
        assert!(!m.is_referenced_in("RepoFactory factory;"));
        assert!(!m.is_referenced_in("MyRepo other;"));
    }

    #[test]
    fn test_usage_name_is_escaped() {
        let m = UsageMatcher::new("A.B").unwrap();
        assert!(!m.is_referenced_in("AxB value;"));
        assert!(m.is_referenced_in("A.B value;"));
    }

    #[test]
    fn test_call_counter() {
        let c = CallCounter::new("save").unwrap();
        assert_eq!(c.count_in("repo.save(x); other.save (y); save(z); saveAll()"), 2);
        assert_eq!(c.count_in(""), 0);
    }

    fn project() -> (EntityStore, HashMap<String, String>) {
        let mut store = EntityStore::new();
        store.ingest_unit(&SourceUnit {
            path: "Repo.java".to_string(),
            interfaces: vec![InterfaceFact {
                name: "Repo".to_string(),
                methods: vec!["find".to_string(), "save".to_string()],
                extends: vec![],
            }],
            types: vec![],
        });
        store.ingest_unit(&SourceUnit {
            path: "Service.java".to_string(),
            interfaces: vec![],
            types: vec![
                TypeFact {
                    name: "Service".to_string(),
                    ..Default::default()
                },
                TypeFact {
                    name: "Helper".to_string(),
                    ..Default::default()
                },
            ],
        });

        let mut texts = HashMap::new();
        texts.insert(
            "Service.java".to_string(),
            "class Service { private Repo repo; void run() { repo.find(1); } }".to_string(),
        );
        (store, texts)
    }

    #[test]
    fn test_scan_counts_per_type() {
        let (store, texts) = project();
        let scanner = LexicalScanner::for_store(&store).unwrap();
        let signals = scanner.scan(&store, &texts);

        assert_eq!(
            signals.usages,
            vec![
                ("Service".to_string(), "Repo".to_string()),
                ("Helper".to_string(), "Repo".to_string()),
            ]
        );
        // both types share the unit, so the one call site is seen twice
        assert_eq!(signals.calls.get("find"), Some(&2));
        assert_eq!(signals.calls.get("save"), Some(&0));
    }

    #[test]
    fn test_apply_feeds_relations() {
        let (store, texts) = project();
        let scanner = LexicalScanner::for_store(&store).unwrap();
        let signals = scanner.scan(&store, &texts);

        let mut relations = Relations::resolve(&store);
        signals.apply(&store, &mut relations);

        assert_eq!(relations.usage_count("Repo"), 2);
        assert_eq!(relations.call_count("Repo", "find"), 2);
        assert_eq!(relations.call_count("Repo", "save"), 0);
    }
}
