//! Operation: look up a published package.

use std::path::Path;

use ripple_graph::SolutionGraph;

pub fn package(project_root: &Path, name: &str) -> miette::Result<()> {
    let graph = crate::load_graph(project_root)?;
    match render(&graph, name) {
        Some(report) => print!("{report}"),
        None => ripple_util::progress::status_info(
            "Package",
            &format!("'{name}' is not published by any solution"),
        ),
    }
    Ok(())
}

/// Owner, version, assemblies and install-time dependencies of a package.
pub fn render(graph: &SolutionGraph, name: &str) -> Option<String> {
    let spec = graph.find_package_spec(name)?;
    let owner = graph.owner_of(name)?;

    let mut output = format!("{} {}\n", spec.name, spec.version);
    output.push_str(&format!("  published by: {}\n", owner.name));
    output.push_str("  assemblies:\n");
    for assembly in &spec.assemblies {
        output.push_str(&format!("    {}/{}\n", assembly.sub_folder, assembly.file_name));
    }
    if !spec.depends_on.is_empty() {
        let deps: Vec<&str> = spec.depends_on.iter().map(String::as_str).collect();
        output.push_str(&format!("  depends on: {}\n", deps.join(", ")));
    }
    Some(output)
}
