use std::collections::HashMap;
use std::sync::Arc;

use ripple_core::config::GlobalConfig;
use ripple_core::feed::Feed;

use crate::client::{FeedClient, FeedProvider};
use crate::local::LocalFeed;

/// Feed clients by name.
#[derive(Default, Clone)]
pub struct FeedRegistry {
    clients: HashMap<String, Arc<dyn FeedClient>>,
}

impl FeedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A local-directory client for every `[feeds]` entry in the global config.
    pub fn from_config(config: &GlobalConfig) -> Self {
        let mut registry = Self::new();
        for (name, source) in &config.feeds {
            let feed = LocalFeed::new(name, source.path.clone())
                .with_stability(source.effective_stability());
            registry.register(Arc::new(feed));
        }
        tracing::debug!("Configured {} feeds", registry.clients.len());
        registry
    }

    /// Add a client under its own name, replacing any client already registered there.
    pub fn register(&mut self, client: Arc<dyn FeedClient>) {
        self.clients.insert(client.name().to_string(), client);
    }

    pub fn with(mut self, client: impl FeedClient + 'static) -> Self {
        self.register(Arc::new(client));
        self
    }

    /// Registered feed names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.clients.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FeedProvider for FeedRegistry {
    fn client_for(&self, feed: &Feed) -> Option<Arc<dyn FeedClient>> {
        self.clients.get(&feed.name).cloned()
    }
}
