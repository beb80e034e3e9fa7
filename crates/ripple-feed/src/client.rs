use std::sync::Arc;

use async_trait::async_trait;

use ripple_core::dependency::{Dependency, Stability};
use ripple_core::feed::Feed;
use ripple_core::version::SemanticVersion;

use crate::diagnostics::DiagnosticSink;
use crate::error::FeedError;

/// One version of a package as listed by a feed.
///
/// The two flags are set by the feed, not computed by the caller: a feed
/// marks its highest stable version as `is_latest_version` and its highest
/// version overall (pre-releases included) as `is_absolute_latest_version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePackage {
    pub name: String,
    pub version: SemanticVersion,
    pub is_latest_version: bool,
    pub is_absolute_latest_version: bool,
}

impl RemotePackage {
    pub fn new(name: impl Into<String>, version: SemanticVersion) -> Self {
        Self {
            name: name.into(),
            version,
            is_latest_version: false,
            is_absolute_latest_version: false,
        }
    }

    pub fn latest(mut self) -> Self {
        self.is_latest_version = true;
        self
    }

    pub fn absolute_latest(mut self) -> Self {
        self.is_absolute_latest_version = true;
        self
    }
}

impl std::fmt::Display for RemotePackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Read-only access to a single named package source.
///
/// "Not found" is `Ok(None)`, never an error. `Err` means the source could
/// not be queried at all.
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// The feed name solutions refer to.
    fn name(&self) -> &str;

    /// Pre-release filtering applied by the source itself. A `StableOnly`
    /// feed never lists pre-releases, whatever the query asks for.
    fn stability(&self) -> Stability {
        Stability::Anything
    }

    /// Find the package with exactly the version pinned by `query`.
    async fn find_exact(
        &self,
        query: &Dependency,
        diagnostics: &dyn DiagnosticSink,
    ) -> Result<Option<RemotePackage>, FeedError>;

    /// Find the newest acceptable version of the package named by `query`.
    async fn find_latest(
        &self,
        query: &Dependency,
        diagnostics: &dyn DiagnosticSink,
    ) -> Result<Option<RemotePackage>, FeedError>;
}

/// Resolves a solution's feed handles to clients.
pub trait FeedProvider: Send + Sync {
    fn client_for(&self, feed: &Feed) -> Option<Arc<dyn FeedClient>>;
}
