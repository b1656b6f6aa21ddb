use async_trait::async_trait;
use tokio_retry::{strategy::FixedInterval, RetryIf};

use nitpick_core::{Result, Tweet, TweetFetcher, TweetId};
use timeline_client::{Status, TimelineClient};

pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;
pub const DEFAULT_RETRY_COUNT: usize = 2;

/// The live tweet fetcher, backed by the upstream RSS timelines.
/// Network errors are retried a few times; the feed cache bounds the whole call with its own timeout.
#[derive(Debug, Clone)]
pub struct UpstreamFetcher {
    client: TimelineClient,
}

impl UpstreamFetcher {
    pub fn new(client: TimelineClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TweetFetcher for UpstreamFetcher {
    async fn fetch(&self, username: &str) -> Result<Vec<Tweet>> {
        let strategy = FixedInterval::from_millis(DEFAULT_RETRY_DELAY_MS).take(DEFAULT_RETRY_COUNT);
        let timeline = RetryIf::spawn(
            strategy,
            || self.client.user_timeline(username),
            |e: &timeline_client::Error| matches!(e, timeline_client::Error::NetworkError(_)),
        )
        .await
        .map_err(anyhow::Error::from)?;
        Ok(timeline.statuses.into_iter().map(tweet_from_status).collect())
    }
}

fn tweet_from_status(status: Status) -> Tweet {
    Tweet {
        id: TweetId::new(status.id),
        username: status.username,
        text: status.text,
        created_at: status.created_at,
        link: Some(status.link),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_tweet_from_status() {
        let status = Status {
            id: "20".to_string(),
            username: "jack".to_string(),
            text: "just setting up my twttr".to_string(),
            created_at: Utc.with_ymd_and_hms(2006, 3, 21, 20, 50, 14).unwrap(),
            link: "http://localhost:8081/jack/status/20#m".to_string(),
        };
        let tweet = tweet_from_status(status);
        assert_eq!(tweet.id, TweetId::from("20"));
        assert_eq!(tweet.username, "jack");
        assert_eq!(tweet.link.as_deref(), Some("http://localhost:8081/jack/status/20#m"));
    }
}
