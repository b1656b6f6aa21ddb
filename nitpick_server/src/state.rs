use std::sync::Arc;

use nitpick_core::TweetFetcher;
use nitpick_feed::{FeedCache, FeedCacheOptions, FollowingRegistry, PinStore, StrategyConfig, StrategySettings};

#[derive(Debug, Clone)]
pub struct AppState {
    /// Followed usernames, shared by every request
    pub registry: Arc<FollowingRegistry>,
    /// Accumulated feed, regenerated from the registry
    pub feed_cache: Arc<FeedCache>,
    pub pins: Arc<PinStore>,
    pub settings: Arc<StrategySettings>,
}

impl AppState {
    pub fn new(options: FeedCacheOptions, strategy: StrategyConfig, fetcher: Arc<dyn TweetFetcher>) -> Self {
        let registry = Arc::new(FollowingRegistry::new());
        let settings = Arc::new(StrategySettings::new(strategy));
        let feed_cache = Arc::new(FeedCache::new(options, registry.clone(), settings.clone(), fetcher));
        Self {
            registry,
            feed_cache,
            pins: Arc::new(PinStore::new()),
            settings,
        }
    }
}
