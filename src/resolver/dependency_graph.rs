//! Dependency graph construction.
//!
//! The graph holds one node per plugin name reachable from the resolution
//! root and one edge per "depends-on" relationship, pointing from a plugin to
//! the plugins it declares. Dependencies that neither pool knows about are not
//! nodes; they are remembered in [`DependencyGraph::unresolved`] and reported
//! later by the resolver when it tries to pick their version.
//!
//! Node indices follow insertion order, so every algorithm that walks the
//! graph (cycle detection, ordering, tree rendering) is deterministic for a
//! given input.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

use crate::constants::MAX_TREE_DEPTH;
use crate::models::{Candidate, CandidatePool, CandidateSource, DependencyMap};

/// Where a graph node's record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrigin {
    /// The plugin being resolved; its dependencies are the caller's declaration.
    Root,
    /// An installed candidate.
    Installed,
    /// A registry candidate.
    Registry,
}

impl From<CandidateSource> for NodeOrigin {
    fn from(source: CandidateSource) -> Self {
        match source {
            CandidateSource::Installed => Self::Installed,
            CandidateSource::Registry => Self::Registry,
        }
    }
}

/// A plugin in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    /// Plugin name
    pub name: String,
    /// Recorded version; `None` for the root.
    pub version: Option<String>,
    /// Pool (or root) the record came from
    pub origin: NodeOrigin,
    /// Declared dependencies of this plugin
    pub dependencies: DependencyMap,
}

impl DependencyNode {
    /// Node for the resolution root.
    pub fn root(name: impl Into<String>, dependencies: DependencyMap) -> Self {
        Self {
            name: name.into(),
            version: None,
            origin: NodeOrigin::Root,
            dependencies,
        }
    }

    /// Node for a known candidate.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            name: candidate.name().to_string(),
            version: Some(candidate.version().to_string()),
            origin: candidate.source().into(),
            dependencies: candidate.dependencies().clone(),
        }
    }

    /// `name@version`, or just the name for the root.
    pub fn display_name(&self) -> String {
        match &self.version {
            Some(version) => format!("{}@{}", self.name, version),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for DependencyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Directed graph of plugins and their "depends-on" edges.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<DependencyNode, ()>,
    node_map: HashMap<String, NodeIndex>,
    unresolved: BTreeSet<String>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or return the existing index for its name.
    pub fn add_node(&mut self, node: DependencyNode) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&node.name) {
            return index;
        }
        let name = node.name.clone();
        let index = self.graph.add_node(node);
        self.node_map.insert(name, index);
        index
    }

    /// Record that `from` depends on `to`. Both must already be nodes.
    ///
    /// Returns `false` (and adds nothing) if either name is unknown.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> bool {
        let (Some(&from_idx), Some(&to_idx)) = (self.node_map.get(from), self.node_map.get(to))
        else {
            return false;
        };

        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
        true
    }

    /// Remember a declared dependency that no pool could supply.
    pub fn mark_unresolved(&mut self, name: impl Into<String>) {
        self.unresolved.insert(name.into());
    }

    /// Whether `name` is a node.
    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Node record for `name`.
    pub fn node(&self, name: &str) -> Option<&DependencyNode> {
        self.node_map.get(name).map(|&idx| &self.graph[idx])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &DependencyNode> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Node names in insertion order.
    pub fn node_names(&self) -> Vec<String> {
        self.nodes().map(|node| node.name.clone()).collect()
    }

    /// Direct dependencies of `name` that are nodes, in edge insertion order.
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        match self.node_map.get(name) {
            Some(&idx) => {
                self.successors(idx).into_iter().map(|n| self.graph[n].name.as_str()).collect()
            }
            None => Vec::new(),
        }
    }

    /// Nodes that directly depend on `name`, in insertion order.
    pub fn dependents_of(&self, name: &str) -> Vec<&str> {
        let Some(&target) = self.node_map.get(name) else {
            return Vec::new();
        };
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.contains_edge(idx, target))
            .map(|idx| self.graph[idx].name.as_str())
            .collect()
    }

    /// Every node reachable from `name`, breadth first, excluding `name`
    /// itself unless it lies on a cycle.
    pub fn transitive_dependencies(&self, name: &str) -> Vec<String> {
        let Some(&start) = self.node_map.get(name) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.successors(current) {
                if seen.insert(neighbor) {
                    order.push(self.graph[neighbor].name.clone());
                    queue.push_back(neighbor);
                }
            }
        }

        order
    }

    /// Declared dependencies that neither pool could supply, by name.
    pub fn unresolved(&self) -> &BTreeSet<String> {
        &self.unresolved
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices in insertion order.
    pub(crate) fn indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Name of the node at `idx`.
    pub(crate) fn name_at(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].name
    }

    /// Direct successors of `idx` in edge insertion order.
    pub(crate) fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        // petgraph lists the most recently added edge first
        let mut successors: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
        successors.reverse();
        successors
    }

    /// Render an ASCII dependency tree starting at `root`.
    ///
    /// Each node's dependencies are expanded once. Later occurrences are
    /// printed with an `(already shown)` marker, a node reached again on its
    /// own branch is marked `(circular reference)`, and branches deeper than
    /// [`MAX_TREE_DEPTH`] end in a `(depth limit reached)` marker.
    pub fn to_tree_string(&self, root: &str) -> String {
        let mut result = String::new();
        let Some(&root_idx) = self.node_map.get(root) else {
            return result;
        };

        let mut on_path: HashSet<NodeIndex> = HashSet::new();
        let mut expanded: HashSet<NodeIndex> = HashSet::new();
        let mut stack = vec![TreeStep::Enter {
            idx: root_idx,
            prefix: String::new(),
            is_last: true,
            depth: 0,
        }];

        while let Some(step) = stack.pop() {
            let (idx, prefix, is_last, depth) = match step {
                TreeStep::Leave(idx) => {
                    on_path.remove(&idx);
                    continue;
                }
                TreeStep::Enter {
                    idx,
                    prefix,
                    is_last,
                    depth,
                } => (idx, prefix, is_last, depth),
            };

            let connector = if is_last {
                "└── "
            } else {
                "├── "
            };
            result.push_str(&format!("{}{}{}\n", prefix, connector, self.graph[idx].display_name()));

            let child_prefix = if is_last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };

            let deps = self.successors(idx);
            let marker = if on_path.contains(&idx) {
                Some("(circular reference)")
            } else if deps.is_empty() {
                continue;
            } else if depth >= MAX_TREE_DEPTH {
                Some("(depth limit reached)")
            } else if !expanded.insert(idx) {
                Some("(already shown)")
            } else {
                None
            };

            if let Some(marker) = marker {
                result.push_str(&format!("{child_prefix}└── {marker}\n"));
                continue;
            }

            on_path.insert(idx);
            stack.push(TreeStep::Leave(idx));
            for (i, dep) in deps.iter().enumerate().rev() {
                stack.push(TreeStep::Enter {
                    idx: *dep,
                    prefix: child_prefix.clone(),
                    is_last: i == deps.len() - 1,
                    depth: depth + 1,
                });
            }
        }

        result
    }
}

/// Work item of the tree renderer.
enum TreeStep {
    Enter {
        idx: NodeIndex,
        prefix: String,
        is_last: bool,
        depth: usize,
    },
    Leave(NodeIndex),
}

/// Builds a [`DependencyGraph`] by walking declared dependencies through the
/// candidate pools.
pub struct GraphBuilder<'a> {
    installed: &'a CandidatePool,
    registry: &'a CandidatePool,
    prefer_installed: bool,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder looking names up in `installed`, then `registry`.
    pub fn new(installed: &'a CandidatePool, registry: &'a CandidatePool) -> Self {
        Self {
            installed,
            registry,
            prefer_installed: true,
        }
    }

    /// Choose whether installed candidates shadow registry candidates.
    #[must_use]
    pub fn prefer_installed(mut self, prefer_installed: bool) -> Self {
        self.prefer_installed = prefer_installed;
        self
    }

    /// Find the record for `name` in the preferred pool, then the other one.
    pub fn lookup(&self, name: &str) -> Option<&'a Candidate> {
        let (first, second) = if self.prefer_installed {
            (self.installed, self.registry)
        } else {
            (self.registry, self.installed)
        };
        first.get(name).or_else(|| second.get(name))
    }

    /// Build the graph rooted at `root` with the caller-declared dependencies.
    ///
    /// Each name is visited once per call. Unknown names become
    /// [`DependencyGraph::unresolved`] entries rather than errors; cycles are
    /// kept in the graph for the cycle detector to report.
    pub fn build(&self, root: &str, declared: &DependencyMap) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        graph.add_node(DependencyNode::root(root, declared.clone()));

        let mut visited: HashSet<&str> = HashSet::from([root]);
        let mut worklist: VecDeque<&str> = declared.keys().map(String::as_str).collect();

        while let Some(name) = worklist.pop_front() {
            if !visited.insert(name) {
                continue;
            }

            match self.lookup(name) {
                Some(candidate) => {
                    tracing::trace!("Graph node {}", candidate);
                    graph.add_node(DependencyNode::from_candidate(candidate));
                    worklist.extend(candidate.dependencies().keys().map(String::as_str));
                }
                None => {
                    tracing::debug!("No candidate for '{}' in either pool", name);
                    graph.mark_unresolved(name);
                }
            }
        }

        // Edges are added once every reachable node exists so unresolved
        // targets can be skipped.
        let edges: Vec<(String, String)> = graph
            .nodes()
            .flat_map(|node| node.dependencies.keys().map(|dep| (node.name.clone(), dep.clone())))
            .collect();
        for (from, to) in edges {
            graph.add_dependency(&from, &to);
        }

        tracing::debug!(
            "Built dependency graph for '{}': {} nodes, {} edges, {} unresolved",
            root,
            graph.node_count(),
            graph.edge_count(),
            graph.unresolved().len()
        );
        graph
    }
}
