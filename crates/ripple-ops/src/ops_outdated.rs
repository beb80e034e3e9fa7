//! Operation: report newer versions of pinned dependencies.

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use ripple_core::config::GlobalConfig;
use ripple_core::solution::Solution;
use ripple_feed::{CollectingSink, Diagnostic, FeedProvider, FeedRegistry};

use crate::updates::{self, UpdateError, UpdateOptions};

/// Options for `ripple outdated`.
#[derive(Default)]
pub struct OutdatedOptions {
    /// Only check this solution.
    pub solution: Option<String>,
}

/// A dependency with a newer version available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdatedEntry {
    pub name: String,
    pub current: String,
    pub latest: String,
}

/// Updates found for one solution, plus the feed problems hit while looking.
#[derive(Debug, Clone)]
pub struct OutdatedReport {
    pub solution: String,
    pub entries: Vec<OutdatedEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

impl OutdatedReport {
    /// No updates and every feed answered.
    pub fn is_up_to_date(&self) -> bool {
        self.entries.is_empty() && self.diagnostics.is_empty()
    }
}

/// Check the selected solutions for outdated dependencies and print a report.
pub async fn outdated(
    project_root: &Path,
    opts: &OutdatedOptions,
    cancel: &CancellationToken,
) -> miette::Result<()> {
    let graph = crate::load_graph(project_root)?;
    let config = GlobalConfig::load()?;
    let feeds = FeedRegistry::from_config(&config);
    let options = UpdateOptions::from_config(&config.update);
    let solutions = crate::select_solutions(&graph, opts.solution.as_deref())?;

    let sp = ripple_util::progress::spinner("Checking for outdated dependencies...");
    let reports = check(&solutions, &feeds, &options, cancel).await;
    sp.finish_and_clear();
    let reports = reports?;

    print!("{}", render(&reports));
    for report in &reports {
        for diagnostic in &report.diagnostics {
            ripple_util::progress::status_warn(
                "Warning",
                &format!("{}: {diagnostic}", report.solution),
            );
        }
    }
    if reports.iter().all(OutdatedReport::is_up_to_date) {
        ripple_util::progress::status("Outdated", "all dependencies are up to date");
    }
    Ok(())
}

/// Run the update resolver over each solution in turn.
pub async fn check(
    solutions: &[&Solution],
    feeds: &dyn FeedProvider,
    options: &UpdateOptions,
    cancel: &CancellationToken,
) -> Result<Vec<OutdatedReport>, UpdateError> {
    let mut reports = Vec::with_capacity(solutions.len());
    for solution in solutions {
        let sink = Arc::new(CollectingSink::new());
        let found = updates::find_updates(solution, feeds, options, sink.clone(), cancel).await?;

        let entries = found
            .into_iter()
            .filter_map(|update| {
                let dep = solution.dependency(&update.name)?;
                Some(OutdatedEntry {
                    name: update.name,
                    current: dep.version.clone(),
                    latest: update.new_version.to_string(),
                })
            })
            .collect();

        reports.push(OutdatedReport {
            solution: solution.name.clone(),
            entries,
            diagnostics: sink.take(),
        });
    }
    Ok(reports)
}

/// Table of updates per solution. Solutions whose feeds failed without any
/// update are called out instead of being passed off as current.
pub fn render(reports: &[OutdatedReport]) -> String {
    let mut output = String::new();
    for report in reports {
        if report.entries.is_empty() {
            if !report.diagnostics.is_empty() {
                output.push_str(&format!(
                    "{}: no updates found, but {} feed problems were reported\n",
                    report.solution,
                    report.diagnostics.len()
                ));
            }
            continue;
        }
        output.push_str(&format!("{}\n", report.solution));
        for entry in &report.entries {
            output.push_str(&format!(
                "  {:<40} {:<15} -> {}\n",
                entry.name, entry.current, entry.latest
            ));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(entries: Vec<OutdatedEntry>, diagnostics: Vec<Diagnostic>) -> OutdatedReport {
        OutdatedReport {
            solution: "FubuMVC".to_string(),
            entries,
            diagnostics,
        }
    }

    #[test]
    fn up_to_date_solutions_render_nothing() {
        assert_eq!(render(&[report(vec![], vec![])]), "");
    }

    #[test]
    fn feed_failures_are_not_passed_off_as_up_to_date() {
        let failed = report(
            vec![],
            vec![Diagnostic::UnknownFeed {
                solution: "FubuMVC".to_string(),
                feed: "nightly".to_string(),
            }],
        );
        assert!(!failed.is_up_to_date());
        assert_eq!(
            render(&[failed]),
            "FubuMVC: no updates found, but 1 feed problems were reported\n"
        );
    }

    #[test]
    fn updates_are_listed_under_their_solution() {
        let rendered = render(&[report(
            vec![OutdatedEntry {
                name: "FubuCore".to_string(),
                current: "1.0.0.0".to_string(),
                latest: "1.0.0.1".to_string(),
            }],
            vec![],
        )]);
        assert!(rendered.starts_with("FubuMVC\n  FubuCore "));
        assert!(rendered.trim_end().ends_with("1.0.0.0         -> 1.0.0.1"));
    }
}
