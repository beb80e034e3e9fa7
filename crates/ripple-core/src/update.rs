use crate::version::SemanticVersion;

/// A newer version of a pinned dependency found on a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub name: String,
    pub new_version: SemanticVersion,
}

impl std::fmt::Display for Update {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.name, self.new_version)
    }
}
