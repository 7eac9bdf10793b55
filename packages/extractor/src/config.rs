//! Configuration constants and validation functions for the extractor.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ExtractorError, Result};

/// Base URL for the DLE data API.
pub const BASE_URL: &str = "https://dle.rae.es/data/";

/// Authorization header value required by the data API.
pub const AUTH_TOKEN: &str = "Basic cDY4MkpnaFMzOmFHZlVkQ2lFNDM0";

/// User agent string the data API expects.
pub const USER_AGENT: &str = "Diccionario/2 CFNetwork/808.2.16 Darwin/16.3.0";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Entry id pattern: short alphanumeric token, as found in `<article id=...>`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENTRY_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("valid regex"));

/// Validate an entry id before building a fetch URL with it.
///
/// # Examples
/// ```
/// use dle_extractor::config::validate_entry_id;
///
/// assert!(validate_entry_id("DgIqVCc").is_ok());
/// assert!(validate_entry_id("hola01").is_ok());
/// assert!(validate_entry_id("a/b").is_err());
/// ```
pub fn validate_entry_id(id: &str) -> Result<()> {
    if ENTRY_ID_PATTERN.is_match(id) {
        Ok(())
    } else {
        Err(ExtractorError::InvalidEntryId(id.to_string()))
    }
}

/// Build the URL for an endpoint path relative to a base URL.
///
/// The base may or may not carry a trailing slash; the path must not
/// start with one.
pub fn endpoint_url(base: &str, path: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
