//! Handler for `ripple package`.

use miette::Result;

use ripple_ops::ops_package;

pub fn exec(name: &str) -> Result<()> {
    let project_root = super::project_root()?;
    ops_package::package(&project_root, name)
}
