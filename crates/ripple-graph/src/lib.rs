//! Solution graph construction and queries: resolves project references across
//! the solution and package namespaces, rejects duplicate packages and cycles,
//! and exposes an immutable graph with a deterministic build order.

pub mod builder;
pub mod error;
pub mod graph;

pub use builder::build;
pub use error::GraphError;
pub use graph::SolutionGraph;
