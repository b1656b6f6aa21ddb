// The shared feed cache.
// A regeneration cycle samples followed users, fetches their timelines concurrently,
// then merges and ranks the result in a single write to the committed state.
// Readers only ever see committed state.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use nitpick_core::{Error, Result, Tweet, TweetFetcher, TweetId, Username};

use crate::following::FollowingRegistry;
use crate::settings::StrategySettings;

pub const DEFAULT_SAMPLE_WIDTH: usize = 5;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10000;

#[derive(Debug, Clone)]
pub struct FeedCacheOptions {
    /// Users pulled per cycle.
    pub sample_width: usize,
    /// Age after which the cache is stale. `None` regenerates only when empty or forced.
    pub refresh_interval: Option<Duration>,
    /// Per-user fetch timeout. A timed out user counts as a failed fetch.
    pub fetch_timeout: Duration,
}

impl Default for FeedCacheOptions {
    fn default() -> Self {
        Self {
            sample_width: DEFAULT_SAMPLE_WIDTH,
            refresh_interval: Some(Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS)),
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
        }
    }
}

/// Debug view of the cache: accumulated ids in merge order and the users pulled by the last cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    pub tweet_ids: Vec<TweetId>,
    pub sampled_users: Vec<Username>,
}

impl FeedSnapshot {
    pub fn is_empty(&self) -> bool {
        self.tweet_ids.is_empty() && self.sampled_users.is_empty()
    }
}

/// Ranked timeline as served to the home page.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    pub tweets: Vec<Tweet>,
    pub sampled_users: Vec<Username>,
    pub generated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct FeedState {
    /// Merge order; a tweet keeps the position it was first seen at.
    tweet_ids: Vec<TweetId>,
    tweets: HashMap<TweetId, Tweet>,
    /// Display order from the ranking applied at the last commit.
    ranked: Vec<TweetId>,
    sampled_users: BTreeSet<Username>,
    generated_at: Option<DateTime<Utc>>,
    /// Last user pulled by a sequential cycle.
    cursor: Option<Username>,
}

impl FeedState {
    /// Append tweets not seen before. Returns how many were new.
    fn merge(&mut self, fetched: impl IntoIterator<Item = Tweet>) -> usize {
        let mut added = 0;
        for tweet in fetched {
            if self.tweets.contains_key(&tweet.id) {
                continue;
            }
            self.tweet_ids.push(tweet.id.clone());
            self.tweets.insert(tweet.id.clone(), tweet);
            added += 1;
        }
        added
    }

    fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            tweet_ids: self.tweet_ids.clone(),
            sampled_users: self.sampled_users.iter().cloned().collect(),
        }
    }

    fn is_stale(&self, refresh_interval: Option<Duration>, now: DateTime<Utc>) -> bool {
        let Some(generated_at) = self.generated_at else {
            return true;
        };
        if self.tweet_ids.is_empty() {
            return true;
        }
        match refresh_interval {
            Some(interval) => (now - generated_at).to_std().map(|age| age >= interval).unwrap_or(false),
            None => false,
        }
    }
}

pub struct FeedCache {
    options: FeedCacheOptions,
    registry: Arc<FollowingRegistry>,
    settings: Arc<StrategySettings>,
    fetcher: Arc<dyn TweetFetcher>,
    state: RwLock<FeedState>,
    /// Held for the whole cycle, so at most one runs at a time.
    regenerating: Mutex<()>,
}

impl std::fmt::Debug for FeedCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedCache").field("options", &self.options).finish_non_exhaustive()
    }
}

impl FeedCache {
    pub fn new(
        options: FeedCacheOptions,
        registry: Arc<FollowingRegistry>,
        settings: Arc<StrategySettings>,
        fetcher: Arc<dyn TweetFetcher>,
    ) -> Self {
        Self {
            options,
            registry,
            settings,
            fetcher,
            state: RwLock::new(FeedState::default()),
            regenerating: Mutex::new(()),
        }
    }

    /// Regenerate if stale, then return the committed state.
    pub async fn ensure_fresh(self: &Arc<Self>) -> Result<FeedSnapshot> {
        self.refresh(false).await?;
        Ok(self.peek().await)
    }

    /// Run a cycle regardless of staleness, then return the committed state.
    pub async fn regenerate(self: &Arc<Self>) -> Result<FeedSnapshot> {
        self.refresh(true).await?;
        Ok(self.peek().await)
    }

    /// Committed state, without side effects.
    pub async fn peek(&self) -> FeedSnapshot {
        self.state.read().await.snapshot()
    }

    /// Ranked view of the committed state, without side effects.
    pub async fn timeline(&self) -> FeedView {
        let state = self.state.read().await;
        FeedView {
            tweets: state
                .ranked
                .iter()
                .filter_map(|id| state.tweets.get(id))
                .cloned()
                .collect(),
            sampled_users: state.sampled_users.iter().cloned().collect(),
            generated_at: state.generated_at,
        }
    }

    pub async fn is_stale(&self) -> bool {
        self.state.read().await.is_stale(self.options.refresh_interval, Utc::now())
    }

    /// Drop everything, including the sequential cursor.
    /// A cycle in flight commits into the cleared state afterwards.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        tracing::info!("Cleared feed cache ({} tweets)", state.tweet_ids.len());
        *state = FeedState::default();
    }

    /// Unforced refreshes skip the cycle if another request committed one while this one waited,
    /// even when that cycle left the cache empty.
    async fn refresh(self: &Arc<Self>, force: bool) -> Result<()> {
        let seen = {
            let state = self.state.read().await;
            if !force && !state.is_stale(self.options.refresh_interval, Utc::now()) {
                return Ok(());
            }
            state.generated_at
        };

        // The cycle is shared state: it runs on its own task, so a dropped request still commits.
        let cache = self.clone();
        let handle = tokio::spawn(async move {
            let _guard = cache.regenerating.lock().await;
            if !force {
                let state = cache.state.read().await;
                if state.generated_at != seen || !state.is_stale(cache.options.refresh_interval, Utc::now()) {
                    return;
                }
            }
            cache.run_cycle().await;
        });
        handle.await.map_err(|e| {
            tracing::error!("Feed regeneration task failed: {}", e);
            Error::CacheUnavailable(e.to_string())
        })
    }

    async fn run_cycle(&self) {
        let users = self.registry.list().await;
        let config = self.settings.get().await;
        let cursor = self.state.read().await.cursor.clone();

        let sample = config
            .feed_strategy
            .sample(&users, self.options.sample_width, cursor.as_deref());
        tracing::info!(
            "Feed regeneration started: {} of {} users via {}",
            sample.users.len(),
            users.len(),
            config.feed_strategy
        );

        let results = join_all(sample.users.iter().map(|user| self.fetch_user(user))).await;

        let mut fetched = Vec::new();
        let mut failed = 0;
        for (user, result) in sample.users.iter().zip(results) {
            match result {
                Ok(tweets) => {
                    tracing::debug!("Fetched {} tweets of {}", tweets.len(), user);
                    fetched.extend(tweets);
                }
                Err(e) => {
                    tracing::warn!("Skipped {} in feed regeneration: {}", user, e);
                    failed += 1;
                }
            }
        }

        let mut state = self.state.write().await;
        let added = state.merge(fetched);
        let ranked = config
            .ranking_algorithm
            .rank(state.tweets.values())
            .into_iter()
            .map(|t| t.id.clone())
            .collect();
        state.ranked = ranked;
        state.sampled_users = sample.users.iter().cloned().collect();
        state.cursor = sample.cursor;
        state.generated_at = Some(Utc::now());

        tracing::info!(
            "Feed regeneration done: sampled {}, failed {}, added {}, total {}",
            sample.users.len(),
            failed,
            added,
            state.tweet_ids.len()
        );
    }

    async fn fetch_user(&self, username: &str) -> Result<Vec<Tweet>> {
        let timeout = self.options.fetch_timeout;
        tokio::time::timeout(timeout, self.fetcher.fetch(username))
            .await
            .unwrap_or_else(|_| Err(Error::Timeout(format!("{} after {} ms", username, timeout.as_millis()))))
    }
}
