use serde::Deserialize;

/// Form body of pin/unpin/follow/unfollow actions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefererForm {
    /// Where to send the caller back to. Falls back to the `Referer` header.
    pub referer: Option<String>,
}

/// Query parameters of the home timeline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelineParams {
    /// Run a regeneration cycle even if the cache is fresh.
    #[serde(default)]
    pub force: bool,
}
