pub mod ops_graph;
pub mod ops_order;
pub mod ops_outdated;
pub mod ops_package;
pub mod ops_verify;
pub mod updates;

use std::path::Path;

use ripple_core::manifest::{Manifest, MANIFEST_FILE};
use ripple_core::solution::Solution;
use ripple_graph::SolutionGraph;

/// Read `ripple.toml` from `project_root` and build the solution graph.
pub fn load_graph(project_root: &Path) -> miette::Result<SolutionGraph> {
    let manifest = Manifest::from_path(&project_root.join(MANIFEST_FILE))?;
    let solutions = manifest.into_solutions()?;
    tracing::debug!("Loaded {} solutions from {MANIFEST_FILE}", solutions.len());
    Ok(ripple_graph::build(solutions)?)
}

/// The named solution, or every solution in build order.
pub fn select_solutions<'g>(
    graph: &'g SolutionGraph,
    name: Option<&str>,
) -> miette::Result<Vec<&'g Solution>> {
    match name {
        Some(name) => Ok(vec![graph.solution(name)?]),
        None => Ok(graph.all_solutions()),
    }
}
