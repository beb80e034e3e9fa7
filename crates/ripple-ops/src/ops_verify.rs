//! Operation: check that every pinned version exists on a feed.

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use ripple_core::config::GlobalConfig;
use ripple_core::dependency::Dependency;
use ripple_core::solution::Solution;
use ripple_feed::{CollectingSink, Diagnostic, FeedProvider, FeedRegistry};
use ripple_util::errors::RippleError;

use crate::updates::{self, UpdateError, UpdateOptions};

/// Options for `ripple verify`.
#[derive(Default)]
pub struct VerifyOptions {
    pub solution: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub solution: String,
    /// Dependencies whose pinned version no feed lists.
    pub missing: Vec<Dependency>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Verify pinned versions of the selected solutions. Fails when any are missing.
pub async fn verify(
    project_root: &Path,
    opts: &VerifyOptions,
    cancel: &CancellationToken,
) -> miette::Result<()> {
    let graph = crate::load_graph(project_root)?;
    let config = GlobalConfig::load()?;
    let feeds = FeedRegistry::from_config(&config);
    let options = UpdateOptions::from_config(&config.update);
    let solutions = crate::select_solutions(&graph, opts.solution.as_deref())?;

    let sp = ripple_util::progress::spinner("Verifying pinned versions...");
    let reports = check(&solutions, &feeds, &options, cancel).await;
    sp.finish_and_clear();
    let reports = reports?;

    let mut missing = 0;
    for report in &reports {
        for diagnostic in &report.diagnostics {
            ripple_util::progress::status_warn(
                "Warning",
                &format!("{}: {diagnostic}", report.solution),
            );
        }
        for dep in &report.missing {
            println!("{}: {dep} not found on any feed", report.solution);
        }
        missing += report.missing.len();
    }

    if missing > 0 {
        return Err(RippleError::Feed {
            message: format!("{missing} pinned versions were not found on any feed"),
        }
        .into());
    }
    ripple_util::progress::status("Verified", "all pinned versions are available");
    Ok(())
}

pub async fn check(
    solutions: &[&Solution],
    feeds: &dyn FeedProvider,
    options: &UpdateOptions,
    cancel: &CancellationToken,
) -> Result<Vec<VerifyReport>, UpdateError> {
    let mut reports = Vec::with_capacity(solutions.len());
    for solution in solutions {
        let sink = Arc::new(CollectingSink::new());
        let checks = updates::verify_pins(solution, feeds, options, sink.clone(), cancel).await?;
        reports.push(VerifyReport {
            solution: solution.name.clone(),
            missing: checks
                .into_iter()
                .filter(|check| check.is_missing())
                .map(|check| check.dependency)
                .collect(),
            diagnostics: sink.take(),
        });
    }
    Ok(reports)
}
