use async_trait::async_trait;

use ripple_core::dependency::{Dependency, Stability};
use ripple_core::version::{SemanticVersion, VersionError};

use crate::client::{FeedClient, RemotePackage};
use crate::diagnostics::DiagnosticSink;
use crate::error::FeedError;
use crate::listing;

/// A feed held entirely in memory. Used in tests and as a stand-in source.
#[derive(Debug, Clone)]
pub struct InMemoryFeed {
    name: String,
    stability: Stability,
    packages: Vec<RemotePackage>,
}

impl InMemoryFeed {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stability: Stability::Anything,
            packages: Vec::new(),
        }
    }

    /// Make the feed filter pre-releases out of every answer.
    pub fn with_stability(mut self, stability: Stability) -> Self {
        self.stability = stability;
        self
    }

    /// List a version and recompute the latest flags.
    pub fn add(&mut self, name: impl Into<String>, version: SemanticVersion) {
        self.packages.push(RemotePackage::new(name, version));
        listing::flag_latest(&mut self.packages);
    }

    /// List a package exactly as given, flags included.
    pub fn add_listed(&mut self, package: RemotePackage) {
        self.packages.push(package);
    }

    pub fn with_package(mut self, name: &str, version: &str) -> Result<Self, VersionError> {
        self.add(name, SemanticVersion::parse(version)?);
        Ok(self)
    }
}

#[async_trait]
impl FeedClient for InMemoryFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn stability(&self) -> Stability {
        self.stability
    }

    async fn find_exact(
        &self,
        query: &Dependency,
        diagnostics: &dyn DiagnosticSink,
    ) -> Result<Option<RemotePackage>, FeedError> {
        let Some(version) = listing::exact_version(query, diagnostics) else {
            return Ok(None);
        };
        let stability = query.stability.restrict(self.stability);
        Ok(listing::select_exact(
            &self.packages,
            &query.name,
            &version,
            stability,
        ))
    }

    async fn find_latest(
        &self,
        query: &Dependency,
        _diagnostics: &dyn DiagnosticSink,
    ) -> Result<Option<RemotePackage>, FeedError> {
        tracing::debug!("Searching for {query} from {}", self.name);
        let stability = query.stability.restrict(self.stability);
        Ok(listing::select_latest(&self.packages, &query.name, stability))
    }
}
