//! Shared utilities for the Ripple solution manager.
//!
//! This crate provides cross-cutting concerns used by all other Ripple crates:
//! the unified error type, filesystem helpers and terminal progress indicators.

pub mod errors;
pub mod fs;
pub mod progress;
