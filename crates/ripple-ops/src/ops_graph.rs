//! Operation: display the solution dependency graph.

use std::path::Path;

use ripple_core::solution::Solution;
use ripple_graph::SolutionGraph;

/// Options for `ripple graph`.
#[derive(Default)]
pub struct GraphOptions {
    /// Show one solution's direct dependencies and dependents instead of the whole tree.
    pub solution: Option<String>,
}

pub fn graph(project_root: &Path, opts: &GraphOptions) -> miette::Result<()> {
    let graph = crate::load_graph(project_root)?;
    match opts.solution.as_deref() {
        Some(name) => {
            let solution = graph.solution(name)?;
            print!("{}", render_neighbors(&graph, solution));
        }
        None => print!("{}", graph.print_tree()),
    }
    Ok(())
}

pub fn render_neighbors(graph: &SolutionGraph, solution: &Solution) -> String {
    let mut output = format!("{}\n", solution.name);
    for (label, neighbors) in [
        ("Dependencies", graph.solution_dependencies(solution)),
        ("Dependents", graph.solution_dependents(solution)),
    ] {
        output.push_str(&format!("  {label}:\n"));
        if neighbors.is_empty() {
            output.push_str("    (none)\n");
        }
        for neighbor in neighbors {
            output.push_str(&format!("    {}\n", neighbor.name));
        }
    }
    output
}
