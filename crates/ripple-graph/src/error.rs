use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while building or querying a [`crate::SolutionGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GraphError {
    #[error("package '{package}' is published by both '{first}' and '{second}'")]
    #[diagnostic(help("A package name may only be published by one solution"))]
    DuplicatePackageName {
        package: String,
        first: String,
        second: String,
    },

    #[error("solution '{0}' is declared more than once")]
    DuplicateSolutionName(String),

    #[error("cyclic dependency between solutions: {}", .cycle.join(" -> "))]
    #[diagnostic(help("Remove one of the project references on the cycle"))]
    CyclicDependency { cycle: Vec<String> },

    #[error("solution '{0}' not found")]
    NotFound(String),
}
