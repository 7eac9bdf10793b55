//! Escaped-entity decoding and markup cleanup helpers.
//!
//! The DLE data API escapes the accented characters of its payloads as
//! numeric character references and tags same-spelled headwords with
//! superscript homograph indices. Both are normalized away here.

use regex::Regex;
use std::sync::LazyLock;

/// Fixed table of escape sequences appearing in DLE payloads.
const ENTITY_TABLE: &[(&str, &str)] = &[
    ("&#xE1;", "á"),
    ("&#xE9;", "é"),
    ("&#xED;", "í"),
    ("&#xF3;", "ó"),
    ("&#xFA;", "ú"),
    ("&#xF1;", "ñ"),
    ("&#x2016;", "||"),
];

/// Superscript homograph index, e.g. `sal<sup>2</sup>`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUP_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<sup>\d+</sup>").expect("valid regex"));

/// Same marker with the closing slash escaped, as seen in JSON payloads.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUP_MARKER_ESCAPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<sup>\d+\\/sup>").expect("valid regex"));

/// Any remaining markup tag.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Decode the fixed set of escaped accented characters.
pub fn decode_entities(text: &str) -> String {
    let mut result = text.to_string();
    for (escape, replacement) in ENTITY_TABLE {
        result = result.replace(escape, replacement);
    }
    result
}

/// Remove superscript homograph-index markers.
pub fn strip_superscripts(text: &str) -> String {
    let result = SUP_MARKER.replace_all(text, "");
    SUP_MARKER_ESCAPED.replace_all(&result, "").into_owned()
}

/// Decode entities and strip superscript markers.
///
/// Total and idempotent: re-applying to already-normalized text is a no-op.
pub fn normalize(text: &str) -> String {
    strip_superscripts(&decode_entities(text))
}

/// Remove every remaining markup tag, leaving plain text.
pub fn strip_tags(text: &str) -> String {
    ANY_TAG.replace_all(text, "").into_owned()
}
