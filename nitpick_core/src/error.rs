use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
    #[error("Feed cache unavailable: {0}")]
    CacheUnavailable(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
