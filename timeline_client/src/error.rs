use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum Error {
    #[error("Timeline not found: {0}")]
    NotFound(String),
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Cannot parse feed: {0}")]
    FeedParseError(#[from] feed_rs::parser::ParseFeedError),
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Network Error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Cannot parse URL: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("Parsing error: {0}")]
    ParsingError(#[from] nitpick_util::ParsingError),
}
