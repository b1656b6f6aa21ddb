use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use nitpick_core::{Error, Result, Tweet, TweetFetcher, TweetId};

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_600_000_000 + secs, 0).unwrap()
}

pub fn tweet(id: &str, username: &str, secs: i64) -> Tweet {
    Tweet {
        id: TweetId::from(id),
        username: username.to_string(),
        text: format!("tweet {} by {}", id, username),
        created_at: at(secs),
        link: None,
    }
}

#[derive(Debug, Clone)]
pub enum Script {
    Tweets(Vec<Tweet>),
    Fail,
    Slow(Duration, Vec<Tweet>),
}

/// In-memory fetcher answering from a per-user script. Unknown users fail.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    scripts: Mutex<HashMap<String, Script>>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, username: &str, script: Script) {
        self.scripts.lock().unwrap().insert(username.to_string(), script);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TweetFetcher for ScriptedFetcher {
    async fn fetch(&self, username: &str) -> Result<Vec<Tweet>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let script = self.scripts.lock().unwrap().get(username).cloned();
        match script {
            Some(Script::Tweets(tweets)) => Ok(tweets),
            Some(Script::Slow(delay, tweets)) => {
                tokio::time::sleep(delay).await;
                Ok(tweets)
            }
            Some(Script::Fail) | None => Err(Error::Upstream(format!("no timeline for {}", username))),
        }
    }
}
