//! The `ripple.toml` fact file: an ordered list of solutions.
//!
//! Declaration order matters: it is the tie-break for build order.
//!
//! ```toml
//! [[solution]]
//! name = "Bottles"
//! feeds = ["local"]
//!
//! [[solution.publishes]]
//! name = "Bottles"
//! version = "1.0.0.0"
//! depends-on = ["FubuCore"]
//! assemblies = [{ file = "Bottles.dll", folder = "lib" }]
//!
//! [[solution.references]]
//! from = "Bottles"
//! to = "FubuCore"
//!
//! [[solution.dependencies]]
//! name = "FubuCore"
//! version = "1.0.0.0"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ripple_util::errors::RippleError;

use crate::dependency::{Dependency, Stability};
use crate::feed::Feed;
use crate::package::{PublishedPackage, DEFAULT_ASSEMBLY_FOLDER};
use crate::solution::Solution;

/// File name of the fact file.
pub const MANIFEST_FILE: &str = "ripple.toml";

/// The parsed representation of a `ripple.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "solution")]
    pub solutions: Vec<SolutionEntry>,
}

/// One `[[solution]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionEntry {
    pub name: String,
    #[serde(default)]
    pub feeds: Vec<String>,
    #[serde(default)]
    pub publishes: Vec<PublishEntry>,
    #[serde(default)]
    pub references: Vec<ReferenceEntry>,
    #[serde(default)]
    pub dependencies: Vec<DependencyEntry>,
}

/// A package published by the solution, from `[[solution.publishes]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishEntry {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub assemblies: Vec<AssemblyEntry>,
    #[serde(default, rename = "depends-on")]
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyEntry {
    pub file: String,
    #[serde(default = "default_folder")]
    pub folder: String,
}

fn default_folder() -> String {
    DEFAULT_ASSEMBLY_FOLDER.to_string()
}

/// A project reference, from `[[solution.references]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub from: String,
    pub to: String,
}

/// A pinned dependency, from `[[solution.dependencies]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEntry {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub stability: Stability,
}

impl Manifest {
    /// Read and parse a `ripple.toml` file.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RippleError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content)
    }

    /// Parse a `ripple.toml` from a string.
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            RippleError::Manifest {
                message: format!("Failed to parse ripple.toml: {e}"),
            }
            .into()
        })
    }

    /// Convert the declared tables into solutions, preserving declaration order.
    pub fn into_solutions(self) -> miette::Result<Vec<Solution>> {
        self.solutions
            .into_iter()
            .map(SolutionEntry::into_solution)
            .collect()
    }
}

impl SolutionEntry {
    fn into_solution(self) -> miette::Result<Solution> {
        let mut solution = Solution::new(&self.name);

        for feed in self.feeds {
            solution.add_feed(Feed::new(feed));
        }

        for publish in self.publishes {
            let mut package = PublishedPackage::new(publish.name, publish.version);
            for assembly in &publish.assemblies {
                package = package.assembly(&assembly.file, &assembly.folder);
            }
            for dep in publish.depends_on {
                package = package.depends_on(dep);
            }
            solution.add_published(package);
        }

        for reference in self.references {
            solution.add_reference(reference.from, reference.to);
        }

        let mut seen = HashSet::new();
        for dep in self.dependencies {
            if !seen.insert(dep.name.clone()) {
                return Err(RippleError::Manifest {
                    message: format!(
                        "Solution '{}' declares dependency '{}' more than once",
                        self.name, dep.name
                    ),
                }
                .into());
            }
            solution.add_dependency(
                Dependency::new(dep.name, dep.version).with_stability(dep.stability),
            );
        }

        Ok(solution)
    }
}
