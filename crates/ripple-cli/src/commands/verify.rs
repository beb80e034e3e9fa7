//! Handler for `ripple verify`.

use miette::Result;
use tokio_util::sync::CancellationToken;

use ripple_ops::ops_verify::{self, VerifyOptions};

pub async fn exec(solution: Option<String>, cancel: &CancellationToken) -> Result<()> {
    let project_root = super::project_root()?;
    let opts = VerifyOptions { solution };
    ops_verify::verify(&project_root, &opts, cancel).await
}
