//! Out-of-band reporting of absorbed feed failures.
//!
//! Feed timeouts, unreachable feeds and unparseable versions never fail an
//! update query. They are reported here instead, so a caller can tell
//! "already up to date" apart from "the feed did not answer".

use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A query did not complete within the configured timeout.
    FeedTimeout {
        feed: String,
        package: String,
        after: Duration,
    },
    /// A query failed outright.
    FeedUnavailable {
        feed: String,
        package: String,
        message: String,
    },
    /// A solution names a feed with no configured client.
    UnknownFeed { solution: String, feed: String },
    /// A pinned or listed version could not be parsed.
    UnparseableVersion { package: String, version: String },
}

impl Diagnostic {
    /// The feed the diagnostic is about, if any.
    pub fn feed(&self) -> Option<&str> {
        match self {
            Diagnostic::FeedTimeout { feed, .. }
            | Diagnostic::FeedUnavailable { feed, .. }
            | Diagnostic::UnknownFeed { feed, .. } => Some(feed),
            Diagnostic::UnparseableVersion { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FeedTimeout {
                feed,
                package,
                after,
            } => write!(
                f,
                "feed '{feed}' timed out after {}s looking up {package}",
                after.as_secs_f64()
            ),
            Diagnostic::FeedUnavailable {
                feed,
                package,
                message,
            } => write!(f, "feed '{feed}' failed looking up {package}: {message}"),
            Diagnostic::UnknownFeed { solution, feed } => {
                write!(f, "solution '{solution}' uses unknown feed '{feed}'")
            }
            Diagnostic::UnparseableVersion { package, version } => {
                write!(f, "could not parse version '{version}' of {package}")
            }
        }
    }
}

/// Receives diagnostics from feed clients and the update resolver.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Keeps every diagnostic in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return everything reported so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(
            &mut *self
                .diagnostics
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::UnparseableVersion { .. } => tracing::debug!("{diagnostic}"),
            _ => tracing::warn!("{diagnostic}"),
        }
    }
}
