//! Operation: print the solution build order.

use std::path::Path;

use serde::Serialize;

use ripple_graph::SolutionGraph;
use ripple_util::errors::RippleError;

/// Options for `ripple order`.
#[derive(Default)]
pub struct OrderOptions {
    /// Print a JSON array instead of one name per line.
    pub json: bool,
}

/// One solution in build order, as emitted by `--json`.
#[derive(Debug, Serialize)]
pub struct OrderEntry<'a> {
    pub name: &'a str,
    pub publishes: Vec<&'a str>,
    #[serde(rename = "depends-on")]
    pub depends_on: Vec<&'a str>,
}

pub fn order(project_root: &Path, opts: &OrderOptions) -> miette::Result<()> {
    let graph = crate::load_graph(project_root)?;
    if opts.json {
        println!("{}", render_json(&graph)?);
    } else {
        print!("{}", render_text(&graph));
    }
    Ok(())
}

pub fn entries(graph: &SolutionGraph) -> Vec<OrderEntry<'_>> {
    graph
        .all_solutions()
        .into_iter()
        .map(|solution| OrderEntry {
            name: &solution.name,
            publishes: solution.published.iter().map(|p| p.name.as_str()).collect(),
            depends_on: graph
                .solution_dependencies(solution)
                .into_iter()
                .map(|dep| dep.name.as_str())
                .collect(),
        })
        .collect()
}

pub fn render_text(graph: &SolutionGraph) -> String {
    graph
        .all_solutions()
        .iter()
        .map(|solution| format!("{}\n", solution.name))
        .collect()
}

pub fn render_json(graph: &SolutionGraph) -> miette::Result<String> {
    serde_json::to_string_pretty(&entries(graph)).map_err(|e| {
        RippleError::Generic {
            message: format!("Failed to serialize build order: {e}"),
        }
        .into()
    })
}
