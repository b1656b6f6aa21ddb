// The shared timeline model.
// Tweets are produced by a fetcher for one followed user at a time,
// and the feed engine only ever keys them by their status identifier.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use crate::error::Result;

pub type Username = String;

/// Status identifier of a tweet, kept as the decimal string the upstream uses.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweetId(String);

impl TweetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_decimal(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

impl Display for TweetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TweetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TweetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Ord for TweetId {
    /// Decimal ids compare by numeric value, so "20" < "100".
    /// Anything else falls back to plain string order.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_decimal() && other.is_decimal() {
            let a = self.0.trim_start_matches('0');
            let b = other.0.trim_start_matches('0');
            a.len().cmp(&b.len()).then_with(|| a.cmp(b)).then_with(|| self.0.cmp(&other.0))
        } else {
            self.0.cmp(&other.0)
        }
    }
}

impl PartialOrd for TweetId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A tweet as the feed engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub id: TweetId,
    pub username: Username,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Source of a single user's recent tweets.
/// Implementations talk to the upstream; the feed cache treats every error as a
/// per-user failure and carries on with the rest of the cycle.
#[async_trait]
pub trait TweetFetcher: Send + Sync {
    async fn fetch(&self, username: &str) -> Result<Vec<Tweet>>;
}
