pub mod error;
pub mod timeline;

pub use error::*;
pub use timeline::{Tweet, TweetFetcher, TweetId, Username};
