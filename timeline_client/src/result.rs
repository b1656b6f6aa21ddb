use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use serde::{Deserialize, Serialize};

use nitpick_util::parse_status_link;

use crate::error::Result;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub id: String,
    /// Author of the status, which differs from the timeline owner for retweets.
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub link: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UserTimeline {
    pub username: String,
    pub statuses: Vec<Status>,
}

impl UserTimeline {
    /// Parse an RSS/Atom timeline document. Entries without a status link or a date are skipped.
    pub fn parse(username: &str, content: &[u8]) -> Result<Self> {
        let feed = feed_rs::parser::parse(content)?;
        let statuses = feed
            .entries
            .into_iter()
            .filter_map(|entry| match Status::try_from(entry) {
                Ok(status) => Some(status),
                Err(e) => {
                    tracing::debug!("Skipped timeline entry of {}: {}", username, e);
                    None
                }
            })
            .collect();
        Ok(UserTimeline {
            username: username.to_string(),
            statuses,
        })
    }
}

// MARK: Conversions

impl TryFrom<Entry> for Status {
    type Error = crate::Error;

    fn try_from(entry: Entry) -> Result<Self> {
        let link = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_else(|| entry.id.clone());
        let (username, id) = parse_status_link(&link)?;
        let created_at = entry
            .published
            .or(entry.updated)
            .ok_or_else(|| crate::Error::MissingField(format!("date of {}", link)))?;
        let text = entry
            .title
            .map(|t| t.content)
            .or_else(|| entry.summary.map(|s| s.content))
            .unwrap_or_default();
        Ok(Status {
            id,
            username: username.to_ascii_lowercase(),
            text,
            created_at,
            link,
        })
    }
}
