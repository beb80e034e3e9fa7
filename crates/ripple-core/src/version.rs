//! Semantic version parsing and comparison for published packages.
//!
//! Package versions have up to four numeric parts and an optional
//! pre-release tag: `major[.minor[.patch[.revision]]][-special]`.
//! - Missing numeric parts count as `0`, so `1.0` equals `1.0.0.0`
//! - A version with a tag sorts before the same version without one
//! - Tags compare identifier by identifier: numeric identifiers as numbers,
//!   text identifiers case-insensitively, and a shorter tag sorts first

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use miette::Diagnostic;
use thiserror::Error;

const MAX_PARTS: usize = 4;

/// A parsed package version. Keeps the text it was parsed from for display.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    pub original: String,
    parts: [u64; MAX_PARTS],
    special: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,

    #[error("invalid numeric segment '{segment}' in version '{version}'")]
    InvalidSegment { version: String, segment: String },

    #[error("version '{0}' has more than four numeric segments")]
    TooManySegments(String),

    #[error("invalid pre-release tag '{tag}' in version '{version}'")]
    InvalidSpecial { version: String, tag: String },
}

impl SemanticVersion {
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let trimmed = version.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let (numbers, special) = match trimmed.split_once('-') {
            Some((numbers, tag)) => (numbers, Some(tag)),
            None => (trimmed, None),
        };

        let segments: Vec<&str> = numbers.split('.').collect();
        if segments.len() > MAX_PARTS {
            return Err(VersionError::TooManySegments(trimmed.to_string()));
        }

        let mut parts = [0u64; MAX_PARTS];
        for (slot, segment) in parts.iter_mut().zip(&segments) {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionError::InvalidSegment {
                    version: trimmed.to_string(),
                    segment: segment.to_string(),
                });
            }
            *slot = segment
                .parse()
                .map_err(|_| VersionError::InvalidSegment {
                    version: trimmed.to_string(),
                    segment: segment.to_string(),
                })?;
        }

        let special = match special {
            Some(tag) if is_valid_special(tag) => Some(tag.to_string()),
            Some(tag) => {
                return Err(VersionError::InvalidSpecial {
                    version: trimmed.to_string(),
                    tag: tag.to_string(),
                })
            }
            None => None,
        };

        Ok(Self {
            original: trimmed.to_string(),
            parts,
            special,
        })
    }

    pub fn major(&self) -> u64 {
        self.parts[0]
    }

    pub fn minor(&self) -> u64 {
        self.parts[1]
    }

    pub fn patch(&self) -> u64 {
        self.parts[2]
    }

    pub fn revision(&self) -> u64 {
        self.parts[3]
    }

    /// The pre-release tag, if any (`beta1` in `1.0.0-beta1`).
    pub fn special(&self) -> Option<&str> {
        self.special.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.special.is_some()
    }
}

fn is_valid_special(tag: &str) -> bool {
    !tag.is_empty()
        && !tag.starts_with('.')
        && !tag.ends_with('.')
        && !tag.contains("..")
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts
            .cmp(&other.parts)
            .then_with(|| compare_special(self.special(), other.special()))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compare_special(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let mut left = a.split('.');
            let mut right = b.split('.');
            loop {
                match (left.next(), right.next()) {
                    (None, None) => return Ordering::Equal,
                    (None, Some(_)) => return Ordering::Less,
                    (Some(_), None) => return Ordering::Greater,
                    (Some(l), Some(r)) => {
                        let ord = compare_identifiers(l, r);
                        if ord != Ordering::Equal {
                            return ord;
                        }
                    }
                }
            }
        }
    }
}

fn compare_identifiers(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()),
    }
}
