use thiserror::Error;

use url::Url;

#[derive(Debug, Clone, Error)]
pub enum ParsingError {
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("Invalid status link: {0}")]
    InvalidStatusLink(String),
}

type Result<T> = std::result::Result<T, ParsingError>;

/// Parse `(username, status id)` from a status link like `https://host/jack/status/20#m`.
pub fn parse_status_link(link: &str) -> Result<(String, String)> {
    let url = Url::parse(link)?;
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();
    match segments.as_slice() {
        [user, "status", id, ..] if is_status_id(id) => Ok((user.to_string(), id.to_string())),
        _ => Err(ParsingError::InvalidStatusLink(link.to_string())),
    }
}

fn is_status_id(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Normalize a username from a path or form: percent-decoded, trimmed, without a leading `@`, lowercase.
/// Returns `None` when nothing usable is left.
pub fn normalize_username(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode(raw).ok()?;
    let name = decoded.trim().trim_start_matches('@');
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(name.to_ascii_lowercase())
}

/// Reduce a caller-supplied referer to a same-site path, so redirects never leave the app.
/// Absolute URLs keep only their path and query; anything unusable becomes `/`.
pub fn sanitize_referer(referer: Option<&str>) -> String {
    let Some(referer) = referer.map(str::trim).filter(|r| !r.is_empty()) else {
        return "/".to_string();
    };
    let path = if referer.starts_with('/') {
        referer.to_string()
    } else {
        match Url::parse(referer) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => match url.query() {
                Some(query) => format!("{}?{}", url.path(), query),
                None => url.path().to_string(),
            },
            _ => return "/".to_string(),
        }
    };
    if is_local_path(&path) {
        path
    } else {
        "/".to_string()
    }
}

/// A path browsers resolve against the current origin. `//host` and `/\host` are protocol-relative.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}
