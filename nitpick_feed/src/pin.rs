use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use nitpick_core::TweetId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedTweet {
    pub tweet_id: TweetId,
    pub pinned_at: DateTime<Utc>,
}

/// Pinned tweets, most recently pinned first. Lives apart from the feed cache.
#[derive(Debug, Default)]
pub struct PinStore {
    pins: RwLock<Vec<PinnedTweet>>,
}

impl PinStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin at the head. Pinning an already pinned tweet changes nothing and returns false.
    pub async fn pin(&self, tweet_id: &TweetId) -> bool {
        let mut pins = self.pins.write().await;
        if pins.iter().any(|p| &p.tweet_id == tweet_id) {
            return false;
        }
        pins.insert(
            0,
            PinnedTweet {
                tweet_id: tweet_id.clone(),
                pinned_at: Utc::now(),
            },
        );
        tracing::info!("Pinned tweet {}", tweet_id);
        true
    }

    /// Returns false if the tweet was not pinned.
    pub async fn unpin(&self, tweet_id: &TweetId) -> bool {
        let mut pins = self.pins.write().await;
        let before = pins.len();
        pins.retain(|p| &p.tweet_id != tweet_id);
        let removed = pins.len() != before;
        if removed {
            tracing::info!("Unpinned tweet {}", tweet_id);
        }
        removed
    }

    pub async fn is_pinned(&self, tweet_id: &TweetId) -> bool {
        self.pins.read().await.iter().any(|p| &p.tweet_id == tweet_id)
    }

    pub async fn list(&self) -> Vec<PinnedTweet> {
        self.pins.read().await.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_pin_twice_is_pin_once() {
        let store = PinStore::new();
        assert!(store.pin(&TweetId::from("20")).await);
        let once = store.list().await;
        assert!(!store.pin(&TweetId::from("20")).await);
        assert_eq!(store.list().await, once);
    }

    #[tokio::test]
    async fn test_unpin_unknown_is_noop() {
        let store = PinStore::new();
        assert!(!store.unpin(&TweetId::from("404")).await);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_pin_then_unpin() {
        let store = PinStore::new();
        store.pin(&TweetId::from("20")).await;
        assert_eq!(store.list().await[0].tweet_id, TweetId::from("20"));
        assert!(store.is_pinned(&TweetId::from("20")).await);

        store.unpin(&TweetId::from("20")).await;
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_most_recent_first() {
        let store = PinStore::new();
        for id in ["1", "2", "3"] {
            store.pin(&TweetId::from(id)).await;
        }
        // Re-pinning keeps its earlier position.
        store.pin(&TweetId::from("1")).await;
        let ids: Vec<String> = store.list().await.into_iter().map(|p| p.tweet_id.to_string()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }
}
