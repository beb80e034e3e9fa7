//! Handler for `ripple graph`.

use miette::Result;

use ripple_ops::ops_graph::{self, GraphOptions};

pub fn exec(solution: Option<String>) -> Result<()> {
    let project_root = super::project_root()?;
    ops_graph::graph(&project_root, &GraphOptions { solution })
}
