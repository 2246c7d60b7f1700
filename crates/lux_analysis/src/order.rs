//! Emission ordering: partition the type graph into strongly
//! connected components with `petgraph::algo::tarjan_scc`, then arrange the
//! components themselves in reverse topological order — every component's
//! dependencies emitted before it — breaking ties by insertion order so
//! re-running the analyzer on the same Meta Unit is byte-for-byte stable.
//!
//! `tarjan_scc` only answers the partition question; the order petgraph
//! happens to return components in isn't specified to satisfy our
//! determinism requirement, so the inter-component order below is computed
//! explicitly with a Kahn-style sink-first pass over the condensation.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use lux_meta::{MetaUnit, TypeRef};

use crate::graph::dependency_edges;

/// One strongly connected component of the type graph, in insertion order.
/// `types.len() > 1` signals mutual dependency: the types can only be
/// emitted together, with a forward declaration breaking the cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scc {
    pub types: Vec<TypeRef>,
}

impl Scc {
    pub fn is_cyclic(&self) -> bool {
        self.types.len() > 1
    }
}

/// Compute the emission order for every type in `unit`: a sequence of SCCs
/// such that for every edge `u -> v` crossing components, `v`'s component
/// appears before `u`'s (definitions precede uses).
pub fn emission_order(unit: &MetaUnit) -> Vec<Scc> {
    let type_count = unit.types().len();
    let mut graph = DiGraph::<(), ()>::with_capacity(type_count, type_count);
    let nodes: Vec<NodeIndex> = (0..type_count).map(|_| graph.add_node(())).collect();

    for i in 0..type_count {
        for dep in dependency_edges(unit, TypeRef(i as u32)) {
            graph.add_edge(nodes[i], nodes[dep.index()], ());
        }
    }

    let raw_sccs = petgraph::algo::tarjan_scc(&graph);
    let mut node_to_scc = vec![0usize; type_count];
    for (scc_idx, members) in raw_sccs.iter().enumerate() {
        for &n in members {
            node_to_scc[n.index()] = scc_idx;
        }
    }

    let scc_count = raw_sccs.len();
    // `depends_on[a]` = distinct component indices `a` has an edge into.
    // `dependents_of[b]` = components that depend on `b`, i.e. the reverse.
    let mut depends_on: Vec<Vec<usize>> = vec![Vec::new(); scc_count];
    let mut seen_edge: HashMap<(usize, usize), ()> = HashMap::new();
    for i in 0..type_count {
        let a = node_to_scc[i];
        for dep in dependency_edges(unit, TypeRef(i as u32)) {
            let b = node_to_scc[dep.index()];
            if a != b && seen_edge.insert((a, b), ()).is_none() {
                depends_on[a].push(b);
            }
        }
    }
    let mut dependents_of: Vec<Vec<usize>> = vec![Vec::new(); scc_count];
    for (a, deps) in depends_on.iter().enumerate() {
        for &b in deps {
            dependents_of[b].push(a);
        }
    }

    // Insertion-order key for each component: the lowest `TypeRef` index
    // among its members, used both as the tie-break among components that
    // become ready simultaneously and for ordering the types within a
    // component, so re-running the analyzer reproduces the same order.
    let mut members: Vec<Vec<TypeRef>> = raw_sccs
        .iter()
        .map(|ns| {
            let mut ts: Vec<TypeRef> = ns.iter().map(|n| TypeRef(n.index() as u32)).collect();
            ts.sort_by_key(|t| t.index());
            ts
        })
        .collect();

    let mut remaining_out_degree: Vec<usize> = depends_on.iter().map(|d| d.len()).collect();
    let insertion_key: Vec<u32> = members
        .iter()
        .map(|ts| ts.first().map(|t| t.0).unwrap_or(u32::MAX))
        .collect();

    // Keyed `(insertion_key, scc_idx)` so the component with the lowest
    // `TypeRef` index among all currently-ready components is always
    // emitted next, not merely among components that became ready together.
    let mut ready: BTreeSet<(u32, usize)> = (0..scc_count)
        .filter(|&i| remaining_out_degree[i] == 0)
        .map(|i| (insertion_key[i], i))
        .collect();

    let mut order = Vec::with_capacity(scc_count);
    while let Some((_, emitted)) = ready.pop_first() {
        order.push(emitted);
        for &dependent in &dependents_of[emitted] {
            remaining_out_degree[dependent] -= 1;
            if remaining_out_degree[dependent] == 0 {
                ready.insert((insertion_key[dependent], dependent));
            }
        }
    }

    order
        .into_iter()
        .map(|scc_idx| Scc {
            types: std::mem::take(&mut members[scc_idx]),
        })
        .collect()
}
