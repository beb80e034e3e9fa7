//! Handler for `ripple outdated`.

use miette::Result;
use tokio_util::sync::CancellationToken;

use ripple_ops::ops_outdated::{self, OutdatedOptions};

pub async fn exec(solution: Option<String>, cancel: &CancellationToken) -> Result<()> {
    let project_root = super::project_root()?;
    let opts = OutdatedOptions { solution };
    ops_outdated::outdated(&project_root, &opts, cancel).await
}
