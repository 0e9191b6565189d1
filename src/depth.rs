//! Depth resolver for interface inheritance chains
//!
//! depth(I) is the number of levels along "extends" edges from I down to an
//! interface with no further extension. An extends target missing from the
//! store counts as one level. Interfaces that reach each other through extends
//! edges form a cycle and share a single level.
//!
//! Each query collapses the interfaces reachable from its start into strongly
//! connected components (Tarjan) and resolves every component once, so a query
//! is linear in the size of the reachable hierarchy however many paths lead
//! through it. Query state is created fresh per call and never shared, so
//! results do not depend on the order interfaces are resolved in.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::store::EntityStore;

/// Level of an extends target that is not in the store
const DANGLING: usize = 1;

/// State of one top-level depth query
struct Query<'a> {
    store: &'a EntityStore,
    next_index: usize,
    index: HashMap<&'a str, usize>,
    lowlink: HashMap<&'a str, usize>,
    stack: Vec<&'a str>,
    on_stack: HashSet<&'a str>,
    /// Resolved depth of every interface whose component is complete
    depth: HashMap<&'a str, usize>,
}

impl<'a> Query<'a> {
    fn new(store: &'a EntityStore) -> Self {
        Self {
            store,
            next_index: 0,
            index: HashMap::new(),
            lowlink: HashMap::new(),
            stack: Vec::new(),
            on_stack: HashSet::new(),
            depth: HashMap::new(),
        }
    }

    fn visit(&mut self, name: &'a str) {
        self.index.insert(name, self.next_index);
        self.lowlink.insert(name, self.next_index);
        self.next_index += 1;
        self.stack.push(name);
        self.on_stack.insert(name);

        let store = self.store;
        let parents = store.interface(name).map(|i| i.extends.as_slice()).unwrap_or(&[]);
        for parent in parents {
            let parent = parent.as_str();
            if !store.contains_interface(parent) {
                continue;
            }
            if !self.index.contains_key(parent) {
                self.visit(parent);
                let low = self.lowlink[parent];
                self.lower(name, low);
            } else if self.on_stack.contains(parent) {
                let index = self.index[parent];
                self.lower(name, index);
            }
        }

        if self.lowlink[name] == self.index[name] {
            self.close_component(name);
        }
    }

    fn lower(&mut self, name: &'a str, candidate: usize) {
        if let Some(low) = self.lowlink.get_mut(name) {
            *low = (*low).min(candidate);
        }
    }

    /// Pop the component rooted at `root` and give all members one depth:
    /// one level above the deepest target outside the component
    fn close_component(&mut self, root: &'a str) {
        let mut members = HashSet::new();
        while let Some(member) = self.stack.pop() {
            self.on_stack.remove(member);
            members.insert(member);
            if member == root {
                break;
            }
        }

        let mut level = 1;
        for &member in &members {
            let Some(iface) = self.store.interface(member) else {
                continue;
            };
            for parent in &iface.extends {
                let parent = parent.as_str();
                if members.contains(parent) {
                    continue;
                }
                let below = if self.store.contains_interface(parent) {
                    self.depth.get(parent).copied().unwrap_or(DANGLING)
                } else {
                    DANGLING
                };
                level = level.max(below + 1);
            }
        }

        for member in members {
            self.depth.insert(member, level);
        }
    }
}

/// Inheritance depth of `name`, always >= 1
pub fn interface_depth(store: &EntityStore, name: &str) -> usize {
    let Some(iface) = store.interface(name) else {
        return DANGLING;
    };
    let mut query = Query::new(store);
    query.visit(&iface.name);
    query.depth.get(iface.name.as_str()).copied().unwrap_or(1)
}

/// Depth of every interface, in store order
pub fn resolve_depths(store: &EntityStore) -> Vec<usize> {
    store
        .interfaces()
        .par_iter()
        .map(|iface| interface_depth(store, &iface.name))
        .collect()
}

/// Deepest chain in the project, floor 1
pub fn max_call_depth(depths: &[usize]) -> usize {
    depths.iter().copied().max().unwrap_or(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(edges: &[(&str, &[&str])]) -> EntityStore {
        let mut store = EntityStore::new();
        for (name, parents) in edges {
            store.insert_interface(
                name,
                vec![],
                parents.iter().map(|p| p.to_string()).collect(),
            );
        }
        store
    }

    #[test]
    fn test_root_interface_has_depth_one() {
        let store = store_with(&[("A", &[])]);
        assert_eq!(interface_depth(&store, "A"), 1);
    }

    #[test]
    fn test_linear_chain() {
        let store = store_with(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
        assert_eq!(interface_depth(&store, "A"), 3);
        assert_eq!(interface_depth(&store, "B"), 2);
        assert_eq!(interface_depth(&store, "C"), 1);
    }

    #[test]
    fn test_dangling_parent_counts_one_level() {
        let store = store_with(&[("A", &["java.io.Serializable"])]);
        assert_eq!(interface_depth(&store, "A"), 2);
        assert_eq!(interface_depth(&store, "NotStored"), 1);
    }

    #[test]
    fn test_longest_branch_wins() {
        let store = store_with(&[
            ("A", &["B", "D"]),
            ("B", &["C"]),
            ("C", &[]),
            ("D", &[]),
        ]);
        assert_eq!(interface_depth(&store, "A"), 3);
    }

    #[test]
    fn test_diamond_is_not_mistaken_for_cycle() {
        let store = store_with(&[
            ("A", &["B", "C"]),
            ("B", &["D"]),
            ("C", &["D"]),
            ("D", &["E"]),
            ("E", &[]),
        ]);
        assert_eq!(interface_depth(&store, "A"), 4);
    }

    #[test]
    fn test_two_cycle_collapses_to_leaf() {
        let store = store_with(&[("A", &["B"]), ("B", &["A"])]);
        assert_eq!(interface_depth(&store, "A"), 1);
        assert_eq!(interface_depth(&store, "B"), 1);
    }

    #[test]
    fn test_self_extension() {
        let store = store_with(&[("A", &["A"])]);
        assert_eq!(interface_depth(&store, "A"), 1);
    }

    #[test]
    fn test_cycle_with_exit_counts_exit_chain() {
        // {A, B} is one level, C below it
        let store = store_with(&[("A", &["B"]), ("B", &["A", "C"]), ("C", &[])]);
        assert_eq!(interface_depth(&store, "A"), 2);
        assert_eq!(interface_depth(&store, "B"), 2);
    }

    #[test]
    fn test_entry_into_cycle_adds_level() {
        let store = store_with(&[("X", &["A"]), ("A", &["B"]), ("B", &["C"]), ("C", &["A"])]);
        assert_eq!(interface_depth(&store, "X"), 2);
        assert_eq!(interface_depth(&store, "A"), 1);
    }

    #[test]
    fn test_cycle_reached_twice_stays_one_level() {
        // X and Y are one level whichever of them the walk meets first
        let store = store_with(&[("T", &["X", "Y"]), ("X", &["Y"]), ("Y", &["X"])]);
        assert_eq!(interface_depth(&store, "T"), 2);
        assert_eq!(interface_depth(&store, "Y"), 1);
    }

    #[test]
    fn test_stacked_diamonds_resolve_quickly() {
        // L_k extends A_k and B_k, which both extend L_{k-1}
        let mut store = EntityStore::new();
        store.insert_interface("L0", vec![], vec![]);
        for k in 1..=30 {
            let below = format!("L{}", k - 1);
            store.insert_interface(&format!("A{}", k), vec![], vec![below.clone()]);
            store.insert_interface(&format!("B{}", k), vec![], vec![below]);
            store.insert_interface(
                &format!("L{}", k),
                vec![],
                vec![format!("A{}", k), format!("B{}", k)],
            );
        }

        let started = std::time::Instant::now();
        assert_eq!(interface_depth(&store, "L30"), 61);
        let depths = resolve_depths(&store);
        assert_eq!(max_call_depth(&depths), 61);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn test_queries_do_not_leak_state() {
        let store = store_with(&[("A", &["B"]), ("B", &[]), ("C", &["B"])]);
        let first = resolve_depths(&store);
        let second = resolve_depths(&store);
        assert_eq!(first, vec![2, 1, 2]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_max_call_depth_floor_and_growth() {
        assert_eq!(max_call_depth(&[]), 1);
        assert_eq!(max_call_depth(&[1, 1]), 1);

        let mut store = store_with(&[("A", &[]), ("B", &["A"])]);
        let before = max_call_depth(&resolve_depths(&store));
        store.insert_interface("C", vec![], vec!["B".to_string()]);
        let after = max_call_depth(&resolve_depths(&store));
        assert_eq!(before, 2);
        assert_eq!(after, 3);
    }
}
