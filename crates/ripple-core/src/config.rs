use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ripple_util::errors::RippleError;

use crate::dependency::Stability;

/// Global user configuration loaded from `~/.ripple/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Feed name to package source.
    #[serde(default)]
    pub feeds: BTreeMap<String, FeedSource>,

    #[serde(default)]
    pub update: UpdateConfig,
}

/// Where a named feed lives and how it filters pre-releases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSource {
    /// Local directory holding `<Name>.<Version>.nupkg` files.
    pub path: PathBuf,

    /// `stable-only` when the source never lists pre-releases. Unset defers
    /// to each dependency's own policy.
    #[serde(default)]
    pub stability: Option<Stability>,
}

impl FeedSource {
    pub fn effective_stability(&self) -> Stability {
        self.stability.unwrap_or(Stability::Anything)
    }
}

/// Feed query settings from `[update]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfig {
    #[serde(default = "default_timeout_secs", rename = "timeout-secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_per_feed_concurrency", rename = "per-feed-concurrency")]
    pub per_feed_concurrency: usize,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            per_feed_concurrency: default_per_feed_concurrency(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_per_feed_concurrency() -> usize {
    4
}

impl GlobalConfig {
    /// Load the global configuration, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            tracing::debug!("No global config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| RippleError::Config {
            message: format!("Failed to read global config: {e}"),
        })?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            RippleError::Config {
                message: format!("Failed to parse global config: {e}"),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the Ripple data directory: `$RIPPLE_HOME`, else `~/.ripple/`.
pub fn dirs_path() -> PathBuf {
    if let Ok(dir) = std::env::var("RIPPLE_HOME") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".ripple")
}
