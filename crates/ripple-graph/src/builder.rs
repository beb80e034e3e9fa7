//! Turns declared solution facts into a [`SolutionGraph`].
//!
//! The only source of solution edges is project references. A reference
//! target is looked up as a solution name first, then as a published package
//! name; anything else is external (third-party) and ignored. Package-level
//! `depends_on` lists never create edges.

use std::collections::{BTreeSet, HashMap};

use ripple_core::solution::Solution;

use crate::error::GraphError;
use crate::graph::SolutionGraph;

/// Build an immutable graph from solutions in declaration order.
///
/// Fails on a package published twice, a solution declared twice, or a
/// cycle in the derived edges. No partial graph is ever returned.
pub fn build(solutions: Vec<Solution>) -> Result<SolutionGraph, GraphError> {
    let solutions: Vec<Solution> = solutions.into_iter().map(with_default_assemblies).collect();

    let solution_index = index_solutions(&solutions)?;
    let package_owners = index_packages(&solutions)?;
    let edges = derive_edges(&solutions, &solution_index, &package_owners);

    if let Some(cycle) = find_cycle(&edges) {
        let cycle = cycle
            .into_iter()
            .map(|idx| solutions[idx].name.clone())
            .collect();
        return Err(GraphError::CyclicDependency { cycle });
    }

    tracing::debug!(
        "Built solution graph with {} solutions and {} edges",
        solutions.len(),
        edges.iter().map(BTreeSet::len).sum::<usize>()
    );

    SolutionGraph::from_parts(solutions, &edges)
}

/// Resolve a reference target to the declaration index of its owning solution.
///
/// Solution names win over package names; `None` means the target lives
/// outside the graph.
pub fn resolve_reference(
    target: &str,
    solution_index: &HashMap<String, usize>,
    package_owners: &HashMap<String, usize>,
) -> Option<usize> {
    solution_index
        .get(target)
        .or_else(|| package_owners.get(target))
        .copied()
}

fn with_default_assemblies(mut solution: Solution) -> Solution {
    solution.published = solution
        .published
        .into_iter()
        .map(|package| package.with_default_assembly())
        .collect();
    solution
}

fn index_solutions(solutions: &[Solution]) -> Result<HashMap<String, usize>, GraphError> {
    let mut index = HashMap::with_capacity(solutions.len());
    for (idx, solution) in solutions.iter().enumerate() {
        if index.insert(solution.name.clone(), idx).is_some() {
            return Err(GraphError::DuplicateSolutionName(solution.name.clone()));
        }
    }
    Ok(index)
}

fn index_packages(solutions: &[Solution]) -> Result<HashMap<String, usize>, GraphError> {
    let mut owners: HashMap<String, usize> = HashMap::new();
    for (idx, solution) in solutions.iter().enumerate() {
        for package in &solution.published {
            if let Some(&first) = owners.get(&package.name) {
                return Err(GraphError::DuplicatePackageName {
                    package: package.name.clone(),
                    first: solutions[first].name.clone(),
                    second: solution.name.clone(),
                });
            }
            owners.insert(package.name.clone(), idx);
        }
    }
    Ok(owners)
}

/// Outgoing edges (dependent -> dependency) per solution, by declaration index.
fn derive_edges(
    solutions: &[Solution],
    solution_index: &HashMap<String, usize>,
    package_owners: &HashMap<String, usize>,
) -> Vec<BTreeSet<usize>> {
    solutions
        .iter()
        .enumerate()
        .map(|(from, solution)| {
            solution
                .references
                .iter()
                .filter_map(|reference| {
                    match resolve_reference(&reference.to, solution_index, package_owners) {
                        Some(target) if target != from => Some(target),
                        Some(_) => None,
                        None => {
                            tracing::trace!(
                                "{}: reference {} -> {} is external",
                                solution.name,
                                reference.from,
                                reference.to
                            );
                            None
                        }
                    }
                })
                .collect()
        })
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    Visiting,
    Visited,
}

/// Depth-first search in declaration order. Returns the first cycle found,
/// starting and ending at the repeated node.
fn find_cycle(edges: &[BTreeSet<usize>]) -> Option<Vec<usize>> {
    let mut state = vec![VisitState::Unvisited; edges.len()];
    let mut stack = Vec::new();

    for start in 0..edges.len() {
        if state[start] != VisitState::Unvisited {
            continue;
        }
        if let Some(cycle) = visit(start, edges, &mut state, &mut stack) {
            return Some(cycle);
        }
    }
    None
}

fn visit(
    node: usize,
    edges: &[BTreeSet<usize>],
    state: &mut [VisitState],
    stack: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    state[node] = VisitState::Visiting;
    stack.push(node);

    for &next in &edges[node] {
        match state[next] {
            VisitState::Visiting => {
                if let Some(pos) = stack.iter().position(|&idx| idx == next) {
                    let mut cycle = stack[pos..].to_vec();
                    cycle.push(next);
                    return Some(cycle);
                }
            }
            VisitState::Unvisited => {
                if let Some(cycle) = visit(next, edges, state, stack) {
                    return Some(cycle);
                }
            }
            VisitState::Visited => {}
        }
    }

    stack.pop();
    state[node] = VisitState::Visited;
    None
}
