//! The resolved, read-only solution graph.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use ripple_core::package::PublishedPackage;
use ripple_core::solution::Solution;

use crate::error::GraphError;

/// An immutable snapshot of all solutions and the build-order edges between them.
///
/// Edges run from a dependent solution to the solution it depends on. Nodes
/// are inserted in declaration order, so a node index is also the solution's
/// declaration position. Any change to the facts means building a new graph.
#[derive(Debug)]
pub struct SolutionGraph {
    graph: DiGraph<Solution, ()>,
    by_name: HashMap<String, NodeIndex>,
    /// Package name to (owning solution, position in its `published` list).
    packages: BTreeMap<String, (NodeIndex, usize)>,
    order: Vec<NodeIndex>,
}

impl SolutionGraph {
    pub(crate) fn from_parts(
        solutions: Vec<Solution>,
        edges: &[BTreeSet<usize>],
    ) -> Result<Self, GraphError> {
        let mut graph = DiGraph::with_capacity(solutions.len(), 0);
        let mut by_name = HashMap::with_capacity(solutions.len());
        let mut packages = BTreeMap::new();

        for solution in solutions {
            let name = solution.name.clone();
            let published: Vec<String> =
                solution.published.iter().map(|p| p.name.clone()).collect();
            let idx = graph.add_node(solution);
            for (position, package) in published.into_iter().enumerate() {
                packages.insert(package, (idx, position));
            }
            by_name.insert(name, idx);
        }

        for (from, targets) in edges.iter().enumerate() {
            for &to in targets {
                graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
            }
        }

        let order = stable_topological_order(&graph).ok_or_else(|| {
            GraphError::CyclicDependency {
                cycle: graph.node_weights().map(|s| s.name.clone()).collect(),
            }
        })?;

        Ok(Self {
            graph,
            by_name,
            packages,
            order,
        })
    }

    /// All solutions in build order: every solution comes after the solutions
    /// it depends on, ties broken by declaration order.
    pub fn all_solutions(&self) -> Vec<&Solution> {
        self.order.iter().map(|&idx| &self.graph[idx]).collect()
    }

    /// Look up a solution by exact name.
    pub fn solution(&self, name: &str) -> Result<&Solution, GraphError> {
        self.by_name
            .get(name)
            .map(|&idx| &self.graph[idx])
            .ok_or_else(|| GraphError::NotFound(name.to_string()))
    }

    /// Solutions directly referenced by `solution`, sorted by name. Not transitive.
    pub fn solution_dependencies(&self, solution: &Solution) -> Vec<&Solution> {
        self.neighbors(solution, Direction::Outgoing)
    }

    /// Solutions that directly reference `solution`, sorted by name.
    pub fn solution_dependents(&self, solution: &Solution) -> Vec<&Solution> {
        self.neighbors(solution, Direction::Incoming)
    }

    fn neighbors(&self, solution: &Solution, direction: Direction) -> Vec<&Solution> {
        let Some(&idx) = self.by_name.get(&solution.name) else {
            return Vec::new();
        };
        let mut found: Vec<&Solution> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| &self.graph[n])
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// The published package with this name, if any solution in the graph publishes it.
    pub fn find_package_spec(&self, name: &str) -> Option<&PublishedPackage> {
        self.packages
            .get(name)
            .map(|&(idx, position)| &self.graph[idx].published[position])
    }

    /// The solution that publishes `package`.
    pub fn owner_of(&self, package: &str) -> Option<&Solution> {
        self.packages.get(package).map(|&(idx, _)| &self.graph[idx])
    }

    /// Every published package in the graph, sorted by name.
    pub fn all_packages(&self) -> Vec<&PublishedPackage> {
        self.packages
            .values()
            .map(|&(idx, position)| &self.graph[idx].published[position])
            .collect()
    }

    /// Number of solutions.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Print each solution in build order with its direct dependencies.
    pub fn print_tree(&self) -> String {
        let mut output = String::new();
        for solution in self.all_solutions() {
            output.push_str(&format!("{}\n", solution.name));
            let deps = self.solution_dependencies(solution);
            let count = deps.len();
            for (i, dep) in deps.iter().enumerate() {
                let connector = if i == count - 1 { "└── " } else { "├── " };
                output.push_str(&format!("{connector}{}\n", dep.name));
            }
        }
        output
    }
}

/// Stable Kahn's algorithm: repeatedly emit the first solution in declaration
/// order whose dependencies have all been emitted. `None` on a cycle.
fn stable_topological_order(graph: &DiGraph<Solution, ()>) -> Option<Vec<NodeIndex>> {
    let count = graph.node_count();
    let mut pending: Vec<usize> = graph
        .node_indices()
        .map(|idx| graph.neighbors_directed(idx, Direction::Outgoing).count())
        .collect();
    let mut emitted = vec![false; count];
    let mut order = Vec::with_capacity(count);

    while order.len() < count {
        let next = (0..count).find(|&i| !emitted[i] && pending[i] == 0)?;
        emitted[next] = true;
        let idx = NodeIndex::new(next);
        order.push(idx);
        for dependent in graph.neighbors_directed(idx, Direction::Incoming) {
            pending[dependent.index()] -= 1;
        }
    }

    Some(order)
}
