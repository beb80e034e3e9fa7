//! Update resolution: which pinned dependencies of a solution have a newer
//! version on one of its feeds.
//!
//! Every (dependency, feed) pair is queried concurrently, bounded per feed by
//! a semaphore and per query by a timeout. Results land in a table indexed by
//! dependency and feed position and are merged once at the end, so the first
//! feed in declaration order wins no matter which query finished first. Once
//! a dependency's first hit is settled, its queries to later feeds are aborted.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::{AbortHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use ripple_core::config::UpdateConfig;
use ripple_core::dependency::Dependency;
use ripple_core::solution::Solution;
use ripple_core::update::Update;
use ripple_core::version::SemanticVersion;
use ripple_feed::{Diagnostic, DiagnosticSink, FeedClient, FeedProvider, RemotePackage};

/// Default per-query timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of in-flight queries per feed.
pub const DEFAULT_PER_FEED_CONCURRENCY: usize = 4;

#[derive(Debug, Error, miette::Diagnostic)]
pub enum UpdateError {
    #[error("feed queries were cancelled")]
    Cancelled,

    #[error("feed query task failed: {0}")]
    Task(String),
}

/// Tuning for feed fan-out.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub timeout: Duration,
    pub per_feed_concurrency: usize,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            per_feed_concurrency: DEFAULT_PER_FEED_CONCURRENCY,
        }
    }
}

impl UpdateOptions {
    pub fn from_config(config: &UpdateConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            per_feed_concurrency: config.per_feed_concurrency.max(1),
        }
    }
}

/// Whether a pinned version exists on any of the solution's feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinCheck {
    pub dependency: Dependency,
    /// The first feed, in declaration order, listing the pinned version.
    pub found_on: Option<String>,
}

impl PinCheck {
    pub fn is_missing(&self) -> bool {
        self.found_on.is_none()
    }
}

#[derive(Debug, Clone, Copy)]
enum Lookup {
    Latest,
    Exact,
}

/// First hit per dependency: feed position and the package it listed.
type FirstHits = Vec<Option<(usize, RemotePackage)>>;

/// One dependency's answers and in-flight queries, indexed by feed position.
struct Row {
    found: Vec<Option<RemotePackage>>,
    pending: Vec<Option<AbortHandle>>,
}

impl Row {
    fn new(feeds: usize) -> Self {
        Self {
            found: vec![None; feeds],
            pending: (0..feeds).map(|_| None).collect(),
        }
    }

    fn record(&mut self, feed_idx: usize, found: Option<RemotePackage>) {
        self.found[feed_idx] = found;
        self.pending[feed_idx] = None;
    }

    /// Abort queries to feeds after the earliest hit, once every feed before
    /// that hit has answered. Returns how many queries were aborted.
    fn abort_after_settled_hit(&mut self) -> usize {
        for idx in 0..self.found.len() {
            if self.pending[idx].is_some() {
                return 0;
            }
            if self.found[idx].is_some() {
                let mut aborted = 0;
                for handle in self.pending[idx + 1..].iter_mut().filter_map(Option::take) {
                    handle.abort();
                    aborted += 1;
                }
                return aborted;
            }
        }
        0
    }

    fn first_hit(self) -> Option<(usize, RemotePackage)> {
        self.found
            .into_iter()
            .enumerate()
            .find_map(|(feed_idx, found)| found.map(|package| (feed_idx, package)))
    }
}

/// Find newer versions of the solution's pinned dependencies.
///
/// At most one update per dependency, in dependency declaration order. Feed
/// timeouts, failures and unknown feeds are reported to `diagnostics` and
/// count as "no result". Cancellation aborts every in-flight query and
/// returns [`UpdateError::Cancelled`], never a partial list.
pub async fn find_updates(
    solution: &Solution,
    feeds: &dyn FeedProvider,
    options: &UpdateOptions,
    diagnostics: Arc<dyn DiagnosticSink>,
    cancel: &CancellationToken,
) -> Result<Vec<Update>, UpdateError> {
    let pinned = pinned_versions(solution, diagnostics.as_ref());
    let hits = query_feeds(
        solution,
        &pinned,
        feeds,
        options,
        diagnostics,
        cancel,
        Lookup::Latest,
    )
    .await?;

    let updates = solution
        .dependencies
        .iter()
        .zip(&pinned)
        .zip(hits)
        .filter_map(|((dep, current), hit)| {
            let current = current.as_ref()?;
            let (_, candidate) = hit?;
            (candidate.version > *current).then(|| Update {
                name: dep.name.clone(),
                new_version: candidate.version,
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        "{}: {} of {} dependencies have updates",
        solution.name,
        updates.len(),
        solution.dependencies.len()
    );
    Ok(updates)
}

/// Check that every pinned version is listed on at least one of the
/// solution's feeds. One entry per dependency, in declaration order.
pub async fn verify_pins(
    solution: &Solution,
    feeds: &dyn FeedProvider,
    options: &UpdateOptions,
    diagnostics: Arc<dyn DiagnosticSink>,
    cancel: &CancellationToken,
) -> Result<Vec<PinCheck>, UpdateError> {
    let pinned = pinned_versions(solution, diagnostics.as_ref());
    let hits = query_feeds(
        solution,
        &pinned,
        feeds,
        options,
        diagnostics,
        cancel,
        Lookup::Exact,
    )
    .await?;

    Ok(solution
        .dependencies
        .iter()
        .zip(hits)
        .map(|(dep, hit)| PinCheck {
            dependency: dep.clone(),
            found_on: hit.map(|(feed, _)| solution.feeds[feed].name.clone()),
        })
        .collect())
}

/// Parse every pinned version once, reporting the ones that don't parse.
fn pinned_versions(
    solution: &Solution,
    diagnostics: &dyn DiagnosticSink,
) -> Vec<Option<SemanticVersion>> {
    solution
        .dependencies
        .iter()
        .map(|dep| match dep.pinned_version() {
            Ok(version) => Some(version),
            Err(err) => {
                tracing::debug!("{}: skipping {dep}: {err}", solution.name);
                diagnostics.report(Diagnostic::UnparseableVersion {
                    package: dep.name.clone(),
                    version: dep.version.clone(),
                });
                None
            }
        })
        .collect()
}

fn resolve_clients(
    solution: &Solution,
    feeds: &dyn FeedProvider,
    diagnostics: &dyn DiagnosticSink,
) -> Vec<Option<Arc<dyn FeedClient>>> {
    solution
        .feeds
        .iter()
        .map(|feed| {
            let client = feeds.client_for(feed);
            if client.is_none() {
                diagnostics.report(Diagnostic::UnknownFeed {
                    solution: solution.name.clone(),
                    feed: feed.name.clone(),
                });
            }
            client
        })
        .collect()
}

async fn query_feeds(
    solution: &Solution,
    pinned: &[Option<SemanticVersion>],
    feeds: &dyn FeedProvider,
    options: &UpdateOptions,
    diagnostics: Arc<dyn DiagnosticSink>,
    cancel: &CancellationToken,
    lookup: Lookup,
) -> Result<FirstHits, UpdateError> {
    if cancel.is_cancelled() {
        return Err(UpdateError::Cancelled);
    }

    let clients = resolve_clients(solution, feeds, diagnostics.as_ref());
    let permits = options.per_feed_concurrency.max(1);
    let semaphores: Vec<Arc<Semaphore>> = clients
        .iter()
        .map(|_| Arc::new(Semaphore::new(permits)))
        .collect();

    let mut table: Vec<Row> = (0..solution.dependencies.len())
        .map(|_| Row::new(clients.len()))
        .collect();
    let mut join_set = JoinSet::new();

    for (dep_idx, dep) in solution.dependencies.iter().enumerate() {
        if pinned[dep_idx].is_none() {
            continue;
        }
        for (feed_idx, client) in clients.iter().enumerate() {
            let Some(client) = client.clone() else {
                continue;
            };
            let query = dep
                .clone()
                .with_stability(dep.stability.restrict(client.stability()));
            let semaphore = semaphores[feed_idx].clone();
            let diagnostics = diagnostics.clone();
            let timeout = options.timeout;

            let handle = join_set.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (dep_idx, feed_idx, None);
                };
                let found = query_one(
                    client.as_ref(),
                    &query,
                    diagnostics.as_ref(),
                    timeout,
                    lookup,
                )
                .await;
                (dep_idx, feed_idx, found)
            });
            table[dep_idx].pending[feed_idx] = Some(handle);
        }
    }

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                join_set.abort_all();
                tracing::debug!("{}: feed queries cancelled", solution.name);
                return Err(UpdateError::Cancelled);
            }
            joined = join_set.join_next() => match joined {
                None => break,
                Some(Ok((dep_idx, feed_idx, found))) => {
                    let row = &mut table[dep_idx];
                    row.record(feed_idx, found);
                    let aborted = row.abort_after_settled_hit();
                    if aborted > 0 {
                        tracing::debug!(
                            "{}: {} found, skipping {aborted} later feeds",
                            solution.name,
                            solution.dependencies[dep_idx].name
                        );
                    }
                }
                Some(Err(err)) if err.is_cancelled() => {}
                Some(Err(err)) => {
                    join_set.abort_all();
                    return Err(UpdateError::Task(err.to_string()));
                }
            },
        }
    }

    Ok(table.into_iter().map(Row::first_hit).collect())
}

/// One bounded query. Failures and timeouts are reported and become `None`.
async fn query_one(
    client: &dyn FeedClient,
    query: &Dependency,
    diagnostics: &dyn DiagnosticSink,
    timeout: Duration,
    lookup: Lookup,
) -> Option<RemotePackage> {
    let search = async {
        match lookup {
            Lookup::Latest => client.find_latest(query, diagnostics).await,
            Lookup::Exact => client.find_exact(query, diagnostics).await,
        }
    };

    match tokio::time::timeout(timeout, search).await {
        Ok(Ok(found)) => found,
        Ok(Err(err)) => {
            diagnostics.report(Diagnostic::FeedUnavailable {
                feed: client.name().to_string(),
                package: query.name.clone(),
                message: err.to_string(),
            });
            None
        }
        Err(_) => {
            diagnostics.report(Diagnostic::FeedTimeout {
                feed: client.name().to_string(),
                package: query.name.clone(),
                after: timeout,
            });
            None
        }
    }
}
