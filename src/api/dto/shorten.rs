//! DTOs for the URL shortening endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled whole-string pattern for accepted URLs.
///
/// Accepts http, https and ftp URLs over the character set browsers emit.
/// The submitted URL is stored exactly as given - it is validated, never
/// rewritten, since the derived code depends on its exact bytes.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?|ftp)://[-a-zA-Z0-9+&@#/%?=~_|!:,.;]*[-a-zA-Z0-9+&@#/%=~_|]$").unwrap()
});

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(
        length(min = 1, message = "URL cannot be empty"),
        regex(path = "*URL_REGEX", message = "Invalid URL format")
    )]
    pub url: String,
}

/// Response containing the created or reused short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
}
