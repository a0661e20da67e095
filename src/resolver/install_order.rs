//! Installation ordering with Kahn's algorithm.
//!
//! Edges run from a plugin to its dependencies, and the incoming-edge counter
//! of a node counts how many plugins list it as a dependency. Seeding the
//! queue with zero-counter nodes therefore yields a *dependents first* order:
//! the root (which nothing depends on) comes out first and leaf dependencies
//! last. The resolver orients this raw sequence according to
//! [`InstallOrderConvention`](crate::config::InstallOrderConvention).

use std::collections::VecDeque;

use super::dependency_graph::DependencyGraph;

/// Computes the raw topological processing sequence of a graph.
pub struct InstallOrderer;

impl InstallOrderer {
    /// Kahn's algorithm over the graph's "depends-on" edges.
    ///
    /// # Precondition
    ///
    /// The graph must be acyclic; run
    /// [`CycleDetector::detect`](super::CycleDetector::detect) first. Nodes on
    /// or behind a cycle never reach a zero counter and are silently left out
    /// of the returned order. The length of the output must not be used to
    /// infer whether a cycle exists.
    pub fn order(graph: &DependencyGraph) -> Vec<String> {
        let mut incoming = vec![0usize; graph.node_count()];
        for node in graph.indices() {
            for neighbor in graph.successors(node) {
                incoming[neighbor.index()] += 1;
            }
        }

        let mut queue: VecDeque<_> =
            graph.indices().filter(|idx| incoming[idx.index()] == 0).collect();
        let mut order = Vec::with_capacity(graph.node_count());

        while let Some(node) = queue.pop_front() {
            order.push(graph.name_at(node).to_string());

            for neighbor in graph.successors(node) {
                let count = &mut incoming[neighbor.index()];
                *count -= 1;
                if *count == 0 {
                    queue.push_back(neighbor);
                }
            }
        }

        tracing::trace!("Raw install order: {:?}", order);
        order
    }
}
