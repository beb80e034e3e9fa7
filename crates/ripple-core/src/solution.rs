use crate::dependency::Dependency;
use crate::feed::Feed;
use crate::package::PublishedPackage;

/// A reference from one of a solution's build artifacts to another artifact.
///
/// `to` names either a solution or a published package; the graph builder
/// decides which.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectReference {
    pub from: String,
    pub to: String,
}

impl ProjectReference {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A source repository participating in the solution graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub name: String,
    pub published: Vec<PublishedPackage>,
    pub references: Vec<ProjectReference>,
    pub dependencies: Vec<Dependency>,
    pub feeds: Vec<Feed>,
}

impl Solution {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_published(&mut self, package: PublishedPackage) {
        self.published.push(package);
    }

    pub fn add_reference(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.references.push(ProjectReference::new(from, to));
    }

    /// Add a pinned dependency. A dependency with the same name is replaced in place.
    pub fn add_dependency(&mut self, dependency: Dependency) {
        match self
            .dependencies
            .iter_mut()
            .find(|existing| existing.name == dependency.name)
        {
            Some(existing) => *existing = dependency,
            None => self.dependencies.push(dependency),
        }
    }

    pub fn add_feed(&mut self, feed: Feed) {
        if !self.feeds.contains(&feed) {
            self.feeds.push(feed);
        }
    }

    pub fn publishes(mut self, package: PublishedPackage) -> Self {
        self.add_published(package);
        self
    }

    pub fn references(mut self, from: &str, to: &str) -> Self {
        self.add_reference(from, to);
        self
    }

    pub fn depends_on(mut self, dependency: Dependency) -> Self {
        self.add_dependency(dependency);
        self
    }

    pub fn with_feed(mut self, feed: Feed) -> Self {
        self.add_feed(feed);
        self
    }

    /// Look up a pinned dependency by name.
    pub fn dependency(&self, name: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|dep| dep.name == name)
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
