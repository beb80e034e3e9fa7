use miette::Diagnostic;
use thiserror::Error;

/// Failure to reach or read a single feed.
///
/// The update resolver never propagates these; it reports them to the
/// diagnostics sink and treats the feed as having no result.
#[derive(Debug, Error, Diagnostic)]
pub enum FeedError {
    #[error("feed '{feed}' is unavailable: {message}")]
    #[diagnostic(help("Check the feed's path in ~/.ripple/config.toml"))]
    Unavailable { feed: String, message: String },

    #[error("failed to read feed '{feed}': {source}")]
    Io {
        feed: String,
        #[source]
        source: std::io::Error,
    },
}

impl FeedError {
    pub fn unavailable(feed: &str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            feed: feed.to_string(),
            message: message.into(),
        }
    }
}
