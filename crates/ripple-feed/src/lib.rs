//! Package feed access: the object-safe [`FeedClient`] trait, shared
//! latest/exact selection over a version listing, an in-memory feed for
//! tests, a local-directory feed, and the registry that maps a solution's
//! feed names to clients.

pub mod client;
pub mod diagnostics;
pub mod error;
pub mod listing;
pub mod local;
pub mod memory;
pub mod registry;

pub use client::{FeedClient, FeedProvider, RemotePackage};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use error::FeedError;
pub use local::LocalFeed;
pub use memory::InMemoryFeed;
pub use registry::FeedRegistry;
