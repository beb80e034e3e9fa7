//! Exact and latest-version selection over a feed's listing.
//!
//! Every feed source reduces its storage to a `[RemotePackage]` listing and
//! answers queries through these functions, so selection behaves the same
//! regardless of where the listing came from.

use ripple_core::dependency::{Dependency, Stability};
use ripple_core::version::SemanticVersion;

use crate::client::RemotePackage;
use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Recompute the latest flags the way a package index does, per package name:
/// the highest stable version is `is_latest_version`, the highest version
/// overall is `is_absolute_latest_version`.
pub fn flag_latest(listing: &mut [RemotePackage]) {
    for package in listing.iter_mut() {
        package.is_latest_version = false;
        package.is_absolute_latest_version = false;
    }

    let mut names: Vec<String> = listing.iter().map(|p| p.name.to_lowercase()).collect();
    names.sort();
    names.dedup();

    for name in names {
        let same_name = |p: &&mut RemotePackage| p.name.to_lowercase() == name;

        if let Some(newest) = listing
            .iter_mut()
            .filter(same_name)
            .max_by(|a, b| a.version.cmp(&b.version))
        {
            newest.is_absolute_latest_version = true;
        }
        if let Some(newest_stable) = listing
            .iter_mut()
            .filter(same_name)
            .filter(|p| !p.version.is_prerelease())
            .max_by(|a, b| a.version.cmp(&b.version))
        {
            newest_stable.is_latest_version = true;
        }
    }
}

/// Parse the pinned version of an exact query. An unparseable version is
/// reported and yields `None` rather than an error.
pub fn exact_version(
    query: &Dependency,
    diagnostics: &dyn DiagnosticSink,
) -> Option<SemanticVersion> {
    match query.pinned_version() {
        Ok(version) => Some(version),
        Err(err) => {
            tracing::debug!("Could not find exact for {query}: {err}");
            diagnostics.report(Diagnostic::UnparseableVersion {
                package: query.name.clone(),
                version: query.version.clone(),
            });
            None
        }
    }
}

/// The listed package with this name and exactly this version, if the
/// stability policy admits it.
pub fn select_exact(
    listing: &[RemotePackage],
    name: &str,
    version: &SemanticVersion,
    stability: Stability,
) -> Option<RemotePackage> {
    candidates(listing, name, stability)
        .find(|p| p.version == *version)
        .cloned()
}

/// The newest version per the feed's flags.
///
/// Under `Anything` the absolute-latest flag wins, then the latest-stable
/// flag. Under `StableOnly` pre-releases are never candidates. Without a
/// flagged candidate the result is `None`, even if versions are listed.
pub fn select_latest(
    listing: &[RemotePackage],
    name: &str,
    stability: Stability,
) -> Option<RemotePackage> {
    candidates(listing, name, stability)
        .find(|p| p.is_absolute_latest_version)
        .or_else(|| candidates(listing, name, stability).find(|p| p.is_latest_version))
        .cloned()
}

fn candidates<'a>(
    listing: &'a [RemotePackage],
    name: &'a str,
    stability: Stability,
) -> impl Iterator<Item = &'a RemotePackage> + 'a {
    listing.iter().filter(move |p| {
        p.name.eq_ignore_ascii_case(name)
            && (stability.allows_prerelease() || !p.version.is_prerelease())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> SemanticVersion {
        SemanticVersion::parse(text).unwrap()
    }

    fn listing(versions: &[&str]) -> Vec<RemotePackage> {
        let mut listing: Vec<RemotePackage> = versions
            .iter()
            .map(|version| RemotePackage::new("FubuCore", v(version)))
            .collect();
        flag_latest(&mut listing);
        listing
    }

    #[test]
    fn flags_newest_stable_and_newest_overall() {
        let listing = listing(&["1.0.0.0", "1.1.0.0", "1.2.0.0-alpha"]);
        let latest: Vec<&str> = listing
            .iter()
            .filter(|p| p.is_latest_version)
            .map(|p| p.version.original.as_str())
            .collect();
        let absolute: Vec<&str> = listing
            .iter()
            .filter(|p| p.is_absolute_latest_version)
            .map(|p| p.version.original.as_str())
            .collect();
        assert_eq!(latest, ["1.1.0.0"]);
        assert_eq!(absolute, ["1.2.0.0-alpha"]);
    }

    #[test]
    fn flags_are_per_package_name() {
        let mut listing = vec![
            RemotePackage::new("FubuCore", v("1.0")),
            RemotePackage::new("Bottles", v("0.9")),
        ];
        flag_latest(&mut listing);
        assert!(listing.iter().all(|p| p.is_latest_version));
        assert!(listing.iter().all(|p| p.is_absolute_latest_version));
    }

    #[test]
    fn anything_prefers_absolute_latest() {
        let listing = listing(&["1.1.0.0", "1.2.0.0-alpha"]);
        let found = select_latest(&listing, "FubuCore", Stability::Anything).unwrap();
        assert_eq!(found.version, v("1.2.0.0-alpha"));
    }

    #[test]
    fn stable_only_takes_latest_stable() {
        let listing = listing(&["1.1.0.0", "1.2.0.0-alpha"]);
        let found = select_latest(&listing, "FubuCore", Stability::StableOnly).unwrap();
        assert_eq!(found.version, v("1.1.0.0"));
    }

    #[test]
    fn stable_only_without_stable_versions_is_absent() {
        let listing = listing(&["1.2.0.0-alpha", "1.3.0.0-beta"]);
        assert!(select_latest(&listing, "FubuCore", Stability::StableOnly).is_none());
    }

    #[test]
    fn unflagged_listing_has_no_latest() {
        let listing = vec![RemotePackage::new("FubuCore", v("2.0"))];
        assert!(select_latest(&listing, "FubuCore", Stability::Anything).is_none());
    }

    #[test]
    fn exact_match_compares_normalized_versions() {
        let listing = listing(&["1.0.0.0", "1.1.0.0"]);
        let found =
            select_exact(&listing, "fubucore", &v("1.1"), Stability::StableOnly).unwrap();
        assert_eq!(found.version.original, "1.1.0.0");
    }

    #[test]
    fn exact_prerelease_needs_anything() {
        let listing = listing(&["1.2.0.0-alpha"]);
        let pinned = v("1.2.0.0-alpha");
        assert!(select_exact(&listing, "FubuCore", &pinned, Stability::StableOnly).is_none());
        assert!(select_exact(&listing, "FubuCore", &pinned, Stability::Anything).is_some());
    }
}
