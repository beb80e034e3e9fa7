use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for Ripple operations that surface at the CLI boundary.
#[derive(Debug, Error, Diagnostic)]
pub enum RippleError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed fact file (`ripple.toml`).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your ripple.toml for syntax errors"))]
    Manifest { message: String },

    /// Global configuration could not be read or parsed.
    #[error("Config error: {message}")]
    #[diagnostic(help("Check ~/.ripple/config.toml (or $RIPPLE_HOME/config.toml)"))]
    Config { message: String },

    /// A package feed could not be queried.
    #[error("Feed error: {message}")]
    Feed { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}
