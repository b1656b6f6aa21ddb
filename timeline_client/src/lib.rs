mod consts;
mod error;
mod result;

use reqwest::{Client, Response, StatusCode, Url};
use std::path::{Path, PathBuf};
use std::time::Duration;

use consts::*;
pub use result::*;

pub use crate::error::Error;
use crate::error::Result;

/// Client for an upstream front end that publishes each user's timeline as RSS,
/// at `{base_url}/{username}/rss`.
/// Raw responses are dumped to `CLIENT_LOG_DIR` when it is set.
#[derive(Debug, Clone)]
pub struct TimelineClient {
    base_url: Url,
    client: reqwest::Client,
    log_dir: Option<PathBuf>,
}

impl TimelineClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<TimelineClient> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().user_agent(USER_AGENT).timeout(timeout).build()?;

        let log_dir = std::env::var_os("CLIENT_LOG_DIR").map(PathBuf::from);

        Ok(TimelineClient {
            base_url,
            client,
            log_dir,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn user_timeline(&self, username: &str) -> Result<UserTimeline> {
        let url = self.timeline_url(username)?;
        let response: Response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(username.to_string()));
        }
        let response = response.error_for_status()?;
        let content = response.bytes().await?;

        if let Some(dir) = &self.log_dir {
            if let Err(e) = log(dir, username, &content).await {
                tracing::warn!("Cannot dump timeline of {} to {}: {}", username, dir.display(), e);
            }
        }
        UserTimeline::parse(username, &content)
    }

    fn timeline_url(&self, username: &str) -> Result<Url> {
        let url = self.base_url.join(&format!("{}/{}", username, TIMELINE_PATH_SUFFIX))?;
        Ok(url)
    }
}

async fn log(dir: &Path, name: &str, content: &[u8]) -> Result<()> {
    use tokio::{fs::File, io::AsyncWriteExt};

    let time = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let filepath = dir.join(format!("timeline_{}_{}.xml", name, time));
    let mut file = File::create(filepath).await?;
    file.write_all(content).await?;
    Ok(())
}
