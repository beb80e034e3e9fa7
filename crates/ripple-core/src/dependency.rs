use serde::{Deserialize, Serialize};

use crate::version::{SemanticVersion, VersionError};

/// Whether pre-release package versions are acceptable candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stability {
    #[default]
    StableOnly,
    Anything,
}

impl Stability {
    pub fn allows_prerelease(self) -> bool {
        self == Stability::Anything
    }

    /// Combine two policies, keeping the more restrictive one.
    ///
    /// A feed that filters pre-releases server-side can never return one,
    /// whatever the dependency asked for.
    pub fn restrict(self, other: Stability) -> Stability {
        if self == Stability::StableOnly || other == Stability::StableOnly {
            Stability::StableOnly
        } else {
            Stability::Anything
        }
    }
}

/// A package a solution consumes, pinned to a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub name: String,
    pub version: String,
    pub stability: Stability,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            stability: Stability::default(),
        }
    }

    pub fn with_stability(mut self, stability: Stability) -> Self {
        self.stability = stability;
        self
    }

    /// Parse the pinned version constraint as an exact semantic version.
    pub fn pinned_version(&self) -> Result<SemanticVersion, VersionError> {
        SemanticVersion::parse(&self.version)
    }
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}
