//! A feed backed by a local cache directory of `.nupkg` files.
//!
//! Files are named `<Name>.<Version>.nupkg`, for example
//! `FubuMVC.Core.1.0.0.1.nupkg` or `HtmlTags.2.0.0-beta.nupkg`. The directory
//! is listed on every query so newly dropped packages are picked up.

use std::path::PathBuf;

use async_trait::async_trait;

use ripple_core::dependency::{Dependency, Stability};
use ripple_core::version::SemanticVersion;

use crate::client::{FeedClient, RemotePackage};
use crate::diagnostics::DiagnosticSink;
use crate::error::FeedError;
use crate::listing;

/// Package file extension.
pub const PACKAGE_EXTENSION: &str = "nupkg";

#[derive(Debug, Clone)]
pub struct LocalFeed {
    name: String,
    dir: PathBuf,
    stability: Stability,
}

impl LocalFeed {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            stability: Stability::Anything,
        }
    }

    pub fn with_stability(mut self, stability: Stability) -> Self {
        self.stability = stability;
        self
    }

    /// Read the directory into a flagged listing.
    pub async fn listing(&self) -> Result<Vec<RemotePackage>, FeedError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            FeedError::unavailable(&self.name, format!("{}: {e}", self.dir.display()))
        })?;

        let mut packages = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|source| FeedError::Io {
            feed: self.name.clone(),
            source,
        })? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PACKAGE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match parse_package_file(stem) {
                Some((name, version)) => packages.push(RemotePackage::new(name, version)),
                None => tracing::trace!("Skipping unrecognized package file {}", path.display()),
            }
        }

        listing::flag_latest(&mut packages);
        tracing::debug!(
            "Feed {} lists {} packages in {}",
            self.name,
            packages.len(),
            self.dir.display()
        );
        Ok(packages)
    }
}

/// Split `FubuMVC.Core.1.0.0.1` into `("FubuMVC.Core", 1.0.0.1)`.
///
/// The name ends at the first dot followed by text that parses as a version.
pub fn parse_package_file(stem: &str) -> Option<(&str, SemanticVersion)> {
    stem.match_indices('.').find_map(|(dot, _)| {
        let (name, rest) = (&stem[..dot], &stem[dot + 1..]);
        if name.is_empty() || !rest.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        SemanticVersion::parse(rest).ok().map(|version| (name, version))
    })
}

#[async_trait]
impl FeedClient for LocalFeed {
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
        let packages = self.listing().await?;
        let stability = query.stability.restrict(self.stability);
        Ok(listing::select_exact(&packages, &query.name, &version, stability))
    }

    async fn find_latest(
        &self,
        query: &Dependency,
        _diagnostics: &dyn DiagnosticSink,
    ) -> Result<Option<RemotePackage>, FeedError> {
        tracing::debug!("Searching for {query} from {}", self.dir.display());
        let packages = self.listing().await?;
        let stability = query.stability.restrict(self.stability);
        Ok(listing::select_latest(&packages, &query.name, stability))
    }
}
