use std::str::FromStr;
use std::time::Duration;

use nitpick_core::{Error, Result};
use nitpick_feed::{
    FeedCacheOptions, FeedStrategy, RankingAlgorithm, StrategyConfig, DEFAULT_FETCH_TIMEOUT_MS,
    DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_SAMPLE_WIDTH,
};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:8081";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub upstream_url: String,
    pub cache: FeedCacheOptions,
    pub strategy: StrategyConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let sample_width: usize = parse(&lookup, "FEED_SAMPLE_WIDTH", DEFAULT_SAMPLE_WIDTH)?;
        if sample_width == 0 {
            return Err(Error::InvalidSetting("FEED_SAMPLE_WIDTH must be positive".to_string()));
        }
        let refresh_secs: u64 = parse(&lookup, "FEED_REFRESH_SECS", DEFAULT_REFRESH_INTERVAL_SECS)?;
        let fetch_timeout_ms: u64 = parse(&lookup, "FETCH_TIMEOUT_MS", DEFAULT_FETCH_TIMEOUT_MS)?;

        let strategy = StrategyConfig {
            feed_strategy: var("FEED_STRATEGY", FeedStrategy::default().name()).parse()?,
            ranking_algorithm: var("RANKING_ALGORITHM", RankingAlgorithm::default().name()).parse()?,
        };

        Ok(Config {
            server_address: var("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            upstream_url: var("UPSTREAM_URL", DEFAULT_UPSTREAM_URL),
            cache: FeedCacheOptions {
                sample_width,
                // 0 disables time-based staleness
                refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
                fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            },
            strategy,
        })
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidSetting(format!("{} `{}`", name, value))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.server_address, DEFAULT_SERVER_ADDRESS);
        assert_eq!(config.cache.sample_width, DEFAULT_SAMPLE_WIDTH);
        assert_eq!(
            config.cache.refresh_interval,
            Some(Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS))
        );
        assert_eq!(config.strategy, StrategyConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("FEED_SAMPLE_WIDTH", "2"),
            ("FEED_REFRESH_SECS", "0"),
            ("FEED_STRATEGY", "sequential"),
        ])
        .unwrap();
        assert_eq!(config.cache.sample_width, 2);
        assert_eq!(config.cache.refresh_interval, None);
        assert_eq!(config.strategy.feed_strategy, FeedStrategy::Sequential);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(config(&[("FEED_SAMPLE_WIDTH", "many")]), Err(Error::InvalidSetting(_))));
        assert!(matches!(config(&[("FEED_SAMPLE_WIDTH", "0")]), Err(Error::InvalidSetting(_))));
        assert!(matches!(config(&[("FEED_STRATEGY", "popular")]), Err(Error::InvalidSetting(_))));
    }
}
