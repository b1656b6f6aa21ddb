use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nitpick_core::{Error, Result};

/// Which followed users a regeneration cycle pulls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedStrategy {
    /// A random subset each cycle.
    #[default]
    Sampling,
    /// A rotating window over the sorted registry.
    Sequential,
}

/// How the merged tweet set is ordered for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankingAlgorithm {
    /// Newest first, ties broken by identifier.
    #[default]
    Chronological,
}

impl FeedStrategy {
    pub const ALL: &'static [FeedStrategy] = &[FeedStrategy::Sampling, FeedStrategy::Sequential];

    pub fn name(&self) -> &'static str {
        match self {
            FeedStrategy::Sampling => "Sampling",
            FeedStrategy::Sequential => "Sequential",
        }
    }
}

impl RankingAlgorithm {
    pub const ALL: &'static [RankingAlgorithm] = &[RankingAlgorithm::Chronological];

    pub fn name(&self) -> &'static str {
        match self {
            RankingAlgorithm::Chronological => "Chronological",
        }
    }
}

impl Display for FeedStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for RankingAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FeedStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| Error::InvalidSetting(format!("feedStrategy `{}`", s)))
    }
}

impl FromStr for RankingAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| Error::InvalidSetting(format!("rankingAlgorithm `{}`", s)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfig {
    pub feed_strategy: FeedStrategy,
    pub ranking_algorithm: RankingAlgorithm,
}

/// Raw values from the settings form. Missing fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub feed_strategy: Option<String>,
    pub ranking_algorithm: Option<String>,
}

/// An enumerated option as shown on the settings page.
#[derive(Debug, Clone, Serialize)]
pub struct SettingMetadata {
    pub name: &'static str,
    pub label: &'static str,
    pub values: Vec<&'static str>,
}

pub fn setting_metadata() -> Vec<SettingMetadata> {
    vec![
        SettingMetadata {
            name: "feedStrategy",
            label: "Multi-user Feed Strategy",
            values: FeedStrategy::ALL.iter().map(|v| v.name()).collect(),
        },
        SettingMetadata {
            name: "rankingAlgorithm",
            label: "Ranking Algorithm",
            values: RankingAlgorithm::ALL.iter().map(|v| v.name()).collect(),
        },
    ]
}

/// Process-wide strategy configuration, read by the feed cache at each cycle.
#[derive(Debug, Default)]
pub struct StrategySettings {
    config: RwLock<StrategyConfig>,
}

impl StrategySettings {
    pub fn new(config: StrategyConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    pub async fn get(&self) -> StrategyConfig {
        *self.config.read().await
    }

    /// Validate every field before applying any, so a bad value leaves the last valid config in force.
    pub async fn update(&self, update: &SettingsUpdate) -> Result<StrategyConfig> {
        let feed_strategy = update.feed_strategy.as_deref().map(FeedStrategy::from_str).transpose()?;
        let ranking_algorithm = update
            .ranking_algorithm
            .as_deref()
            .map(RankingAlgorithm::from_str)
            .transpose()?;

        let mut config = self.config.write().await;
        if let Some(feed_strategy) = feed_strategy {
            config.feed_strategy = feed_strategy;
        }
        if let Some(ranking_algorithm) = ranking_algorithm {
            config.ranking_algorithm = ranking_algorithm;
        }
        tracing::info!(
            "Settings updated: feedStrategy={}, rankingAlgorithm={}",
            config.feed_strategy,
            config.ranking_algorithm
        );
        Ok(*config)
    }
}
