//! Who-talks-to-whom graph over weighted reference edges
//!
//! Nodes are logins, edges run commenter → addressee, one per
//! (commenter, addressee, kind) group. Parallel edges of different kinds
//! between the same pair are kept apart.

// Use petgraph from rustworkx-core to ensure version compatibility
use rustworkx_core::petgraph::graph::{DiGraph, NodeIndex};
use rustworkx_core::petgraph::visit::EdgeRef;
use rustworkx_core::petgraph::Direction;
use std::collections::HashMap;

use crate::consolidate::WeightedEdge;
use crate::model::{Login, ParticipantSet, RefKind};

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub kind: RefKind,
    /// Number of references in the group
    pub weight: usize,
}

pub struct ReferenceGraph {
    graph: DiGraph<Login, GraphEdge>,
    index: HashMap<Login, NodeIndex>,
}

impl Default for ReferenceGraph {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ReferenceGraph
// =============================================================================

impl ReferenceGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    pub fn from_edges(edges: &[WeightedEdge]) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge);
        }
        graph
    }

    /// Also add a node for every participant, including silent ones
    pub fn with_participants(mut self, participants: &ParticipantSet) -> Self {
        for login in participants.sorted() {
            self.ensure_node(login);
        }
        self
    }

    fn ensure_node(&mut self, login: Login) -> NodeIndex {
        if let Some(&idx) = self.index.get(&login) {
            return idx;
        }
        let idx = self.graph.add_node(login);
        self.index.insert(login, idx);
        idx
    }

    /// Add one weighted edge. A second edge for an existing
    /// (commenter, addressee, kind) adds to its weight.
    pub fn add_edge(&mut self, edge: &WeightedEdge) {
        let from = self.ensure_node(edge.commenter);
        let to = self.ensure_node(edge.addressee);

        let existing = self
            .graph
            .edges_connecting(from, to)
            .find(|e| e.weight().kind == edge.ref_type)
            .map(|e| e.id());
        match existing {
            Some(id) => {
                if let Some(weight) = self.graph.edge_weight_mut(id) {
                    weight.weight += edge.weight;
                }
            }
            None => {
                self.graph.add_edge(from, to, GraphEdge { kind: edge.ref_type, weight: edge.weight });
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, login: Login) -> bool {
        self.index.contains_key(&login)
    }

    /// Weight of the `kind` edge from `from` to `to`, 0 if absent
    pub fn weight(&self, from: Login, to: Login, kind: RefKind) -> usize {
        let (Some(&a), Some(&b)) = (self.index.get(&from), self.index.get(&to)) else {
            return 0;
        };
        self.graph
            .edges_connecting(a, b)
            .filter(|e| e.weight().kind == kind)
            .map(|e| e.weight().weight)
            .sum()
    }

    /// Outgoing edge count
    pub fn out_degree(&self, login: Login) -> usize {
        self.degree(login, Direction::Outgoing)
    }

    pub fn in_degree(&self, login: Login) -> usize {
        self.degree(login, Direction::Incoming)
    }

    fn degree(&self, login: Login, direction: Direction) -> usize {
        let Some(&idx) = self.index.get(&login) else {
            return 0;
        };
        self.graph.edges_directed(idx, direction).count()
    }

    /// Everyone `login` exchanged references with, either direction, sorted
    pub fn neighbors(&self, login: Login) -> Vec<Login> {
        let Some(&idx) = self.index.get(&login) else {
            return vec![];
        };
        let mut out: Vec<Login> = self
            .graph
            .neighbors_undirected(idx)
            .filter_map(|n| self.graph.node_weight(n).copied())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    pub fn inner(&self) -> &DiGraph<Login, GraphEdge> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn edge(from: &str, to: &str, kind: RefKind, weight: usize) -> WeightedEdge {
        WeightedEdge {
            commenter: Login::new(from),
            addressee: Login::new(to),
            ref_type: kind,
            weight,
            comment_ids: BTreeSet::new(),
        }
    }

    fn sample() -> ReferenceGraph {
        ReferenceGraph::from_edges(&[
            edge("alice", "bob", RefKind::Mention, 2),
            edge("alice", "bob", RefKind::ContextualReply, 5),
            edge("bob", "alice", RefKind::Quote, 1),
            edge("carol", "alice", RefKind::Mention, 3),
        ])
    }

    #[test]
    fn test_counts() {
        let graph = sample();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 4);
        assert!(!graph.is_empty());
    }

    #[test]
    fn test_weight_by_kind() {
        let graph = sample();
        let (alice, bob) = (Login::new("alice"), Login::new("bob"));

        assert_eq!(graph.weight(alice, bob, RefKind::Mention), 2);
        assert_eq!(graph.weight(alice, bob, RefKind::ContextualReply), 5);
        assert_eq!(graph.weight(alice, bob, RefKind::Quote), 0);
        assert_eq!(graph.weight(bob, alice, RefKind::Quote), 1);
        assert_eq!(graph.weight(Login::new("nobody"), bob, RefKind::Mention), 0);
    }

    #[test]
    fn test_degrees() {
        let graph = sample();
        let alice = Login::new("alice");

        assert_eq!(graph.out_degree(alice), 2);
        assert_eq!(graph.in_degree(alice), 2);
        assert_eq!(graph.out_degree(Login::new("carol")), 1);
        assert_eq!(graph.in_degree(Login::new("carol")), 0);
    }

    #[test]
    fn test_neighbors_are_deduplicated() {
        let graph = sample();
        let names: Vec<&str> = graph.neighbors(Login::new("alice")).iter().map(|l| l.as_str()).collect();
        assert_eq!(names, vec!["bob", "carol"]);
        assert!(graph.neighbors(Login::new("nobody")).is_empty());
    }

    #[test]
    fn test_repeated_group_adds_weight() {
        let mut graph = ReferenceGraph::new();
        graph.add_edge(&edge("dave", "erin", RefKind::Mention, 1));
        graph.add_edge(&edge("dave", "erin", RefKind::Mention, 4));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight(Login::new("dave"), Login::new("erin"), RefKind::Mention), 5);
    }

    #[test]
    fn test_silent_participants_become_nodes() {
        let participants: ParticipantSet = ["alice", "bob", "zoe"].iter().map(|l| Login::new(l)).collect();
        let graph = ReferenceGraph::from_edges(&[edge("alice", "bob", RefKind::Mention, 1)])
            .with_participants(&participants);

        assert_eq!(graph.node_count(), 3);
        assert!(graph.contains(Login::new("zoe")));
        assert_eq!(graph.out_degree(Login::new("zoe")), 0);
    }
}
