//! Cycle detection over a [`DependencyGraph`].
//!
//! Three-color depth-first search: a node is unvisited, on the current path,
//! or fully visited. Reaching a node that is on the current path closes a
//! cycle. Every node is tried as a start point, so cycles among dependencies
//! that are disconnected from the root's first branch are still found.
//!
//! The traversal keeps its own stack instead of recursing, so very deep
//! dependency chains cannot overflow the thread stack.

use petgraph::graph::NodeIndex;
use std::collections::HashSet;

use super::dependency_graph::DependencyGraph;
use crate::constants::CYCLE_SEPARATOR;

struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    cursor: usize,
}

/// Finds a dependency cycle, if any.
pub struct CycleDetector;

impl CycleDetector {
    /// Return the first cycle found, or an empty vector for an acyclic graph.
    ///
    /// The cycle starts and ends with the same plugin name, e.g.
    /// `["a", "b", "c", "a"]`. A plugin that depends on itself yields
    /// `["a", "a"]`.
    pub fn detect(graph: &DependencyGraph) -> Vec<String> {
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut on_path: HashSet<NodeIndex> = HashSet::new();

        for start in graph.indices() {
            if visited.contains(&start) {
                continue;
            }
            if let Some(cycle) = Self::visit(graph, start, &mut visited, &mut on_path) {
                tracing::debug!("Dependency cycle: {}", Self::format_cycle(&cycle));
                return cycle;
            }
        }

        Vec::new()
    }

    /// Whether the graph contains any cycle.
    pub fn has_cycle(graph: &DependencyGraph) -> bool {
        !Self::detect(graph).is_empty()
    }

    /// Render a cycle as `a → b → a`.
    pub fn format_cycle(cycle: &[String]) -> String {
        cycle.join(CYCLE_SEPARATOR)
    }

    fn visit(
        graph: &DependencyGraph,
        start: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        on_path: &mut HashSet<NodeIndex>,
    ) -> Option<Vec<String>> {
        let mut stack = vec![Frame {
            node: start,
            successors: graph.successors(start),
            cursor: 0,
        }];
        on_path.insert(start);

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let next = frame.successors.get(frame.cursor).copied();
            frame.cursor += 1;

            match next {
                Some(neighbor) if on_path.contains(&neighbor) => {
                    let cycle_start = stack.iter().position(|f| f.node == neighbor).unwrap_or(0);
                    let mut cycle: Vec<String> =
                        stack[cycle_start..].iter().map(|f| graph.name_at(f.node).to_string()).collect();
                    cycle.push(graph.name_at(neighbor).to_string());
                    return Some(cycle);
                }
                Some(neighbor) => {
                    if !visited.contains(&neighbor) {
                        on_path.insert(neighbor);
                        stack.push(Frame {
                            node: neighbor,
                            successors: graph.successors(neighbor),
                            cursor: 0,
                        });
                    }
                }
                None => {
                    stack.pop();
                    on_path.remove(&node);
                    visited.insert(node);
                }
            }
        }

        None
    }
}
