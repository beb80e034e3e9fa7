//! Core data types for the Ripple solution manager.
//!
//! This crate defines the facts Ripple reasons about: solutions, the packages
//! they publish, the project references between their build artifacts, their
//! pinned dependencies and configured feeds, plus semantic version parsing,
//! the `ripple.toml` fact file and the global configuration.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod config;
pub mod dependency;
pub mod feed;
pub mod manifest;
pub mod package;
pub mod solution;
pub mod update;
pub mod version;
