use tokio::sync::RwLock;

use std::collections::BTreeSet;

use nitpick_core::Username;

/// Process-wide set of followed usernames.
/// Changes here never touch the feed cache; a newly followed user shows up after a later cycle samples them.
#[derive(Debug, Default)]
pub struct FollowingRegistry {
    users: RwLock<BTreeSet<Username>>,
}

impl FollowingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the user was not followed before.
    pub async fn follow(&self, username: &str) -> bool {
        let added = self.users.write().await.insert(username.to_string());
        if added {
            tracing::info!("Followed {}", username);
        }
        added
    }

    /// Returns true if the user was followed before.
    pub async fn unfollow(&self, username: &str) -> bool {
        let removed = self.users.write().await.remove(username);
        if removed {
            tracing::info!("Unfollowed {}", username);
        }
        removed
    }

    /// Current members, sorted by name.
    pub async fn list(&self) -> Vec<Username> {
        self.users.read().await.iter().cloned().collect()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    pub async fn clear(&self) {
        let mut users = self.users.write().await;
        tracing::info!("Cleared following registry ({} users)", users.len());
        users.clear();
    }
}
