use std::fs;

use ripple_core::dependency::{Dependency, Stability};
use ripple_core::version::SemanticVersion;
use ripple_feed::{CollectingSink, FeedClient, FeedError, LocalFeed};
use tempfile::TempDir;

fn feed_dir(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for file in files {
        fs::write(tmp.path().join(file), b"").unwrap();
    }
    tmp
}

#[tokio::test]
async fn lists_package_files_and_flags_latest() {
    let tmp = feed_dir(&[
        "FubuCore.1.0.0.0.nupkg",
        "FubuCore.1.0.0.1.nupkg",
        "FubuMVC.Core.1.0.0.0.nupkg",
        "FubuMVC.Core.1.1.0.0-beta.nupkg",
        "README.md",
        "broken.nupkg",
    ]);
    let feed = LocalFeed::new("local", tmp.path());

    let listing = feed.listing().await.unwrap();
    assert_eq!(listing.len(), 4);

    let sink = CollectingSink::new();
    let found = feed
        .find_latest(&Dependency::new("FubuCore", "1.0.0.0"), &sink)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.version, SemanticVersion::parse("1.0.0.1").unwrap());

    let query = Dependency::new("FubuMVC.Core", "1.0.0.0").with_stability(Stability::Anything);
    let found = feed.find_latest(&query, &sink).await.unwrap().unwrap();
    assert_eq!(found.version.original, "1.1.0.0-beta");
}

#[tokio::test]
async fn finds_exact_pinned_version() {
    let tmp = feed_dir(&["Bottles.1.0.0.0.nupkg"]);
    let feed = LocalFeed::new("local", tmp.path());
    let sink = CollectingSink::new();

    let found = feed
        .find_exact(&Dependency::new("Bottles", "1.0"), &sink)
        .await
        .unwrap();
    assert!(found.is_some());

    let missing = feed
        .find_exact(&Dependency::new("Bottles", "2.0"), &sink)
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn stable_only_local_feed_hides_prereleases() {
    let tmp = feed_dir(&["HtmlTags.1.0.nupkg", "HtmlTags.2.0-rc.nupkg"]);
    let feed = LocalFeed::new("local", tmp.path()).with_stability(Stability::StableOnly);
    let query = Dependency::new("HtmlTags", "1.0").with_stability(Stability::Anything);

    let found = feed
        .find_latest(&query, &CollectingSink::new())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.version.original, "1.0");
}

#[tokio::test]
async fn missing_directory_is_unavailable() {
    let tmp = TempDir::new().unwrap();
    let feed = LocalFeed::new("gone", tmp.path().join("does-not-exist"));

    let err = feed
        .find_latest(&Dependency::new("FubuCore", "1.0"), &CollectingSink::new())
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::Unavailable { ref feed, .. } if feed == "gone"));
}
