//! Handler for `ripple order`.

use miette::Result;

use ripple_ops::ops_order::{self, OrderOptions};

pub fn exec(json: bool) -> Result<()> {
    let project_root = super::project_root()?;
    ops_order::order(&project_root, &OrderOptions { json })
}
