//! Instagram profile URL parsing.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static PROFILE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"instagram\.com/([^/?#]+)/?").expect("valid profile regex"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not extract username from URL: {url}")]
pub struct ProfileUrlError {
    pub url: String,
}

/// Extract the account username from a profile URL such as
/// `https://www.instagram.com/nike/`.
///
/// The first path segment after `instagram.com/` is the username; query
/// strings and fragments are not part of it.
pub fn extract_username(url: &str) -> Result<&str, ProfileUrlError> {
    PROFILE_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ProfileUrlError {
            url: url.to_string(),
        })
}
