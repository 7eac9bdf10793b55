//! Article record assembly.
//!
//! Ties the leaf extractors together: detects whether the input is an
//! article at all, pulls id, headword and etymology, runs the
//! definition extractor (always) and the conjugation parser (on
//! request), and serializes the assembled record.

use regex::Regex;
use std::sync::LazyLock;

use crate::conjugation::extract_conjugations;
use crate::definitions::extract_definitions;
use crate::entities::{decode_entities, normalize, strip_tags};
use crate::error::Result;
use crate::types::WordRecord;

/// Marker whose presence distinguishes article markup from
/// already-clean payloads.
pub const ARTICLE_MARKER: &str = "<article id=";

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ID_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"id="(\w+)""#).expect("valid regex"));

/// Headword inside the header block, up to the first italic-close or
/// heading-close boundary.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEADER_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<header[^>]+>(.*?)(?:</i>)?</h").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ETYMOLOGY_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<p class="n2">(.*?)</p>"#).expect("valid regex"));

/// Whether a payload carries an article block.
#[must_use]
pub fn is_article(document: &str) -> bool {
    document.contains(ARTICLE_MARKER)
}

/// Assemble a [`WordRecord`] from article markup.
///
/// Returns `None` when the document carries no article marker; callers
/// then pass the input through unchanged. Missing fields degrade to
/// empty values, never to an error.
#[must_use]
pub fn parse_article(document: &str, include_conjugations: bool) -> Option<WordRecord> {
    if !is_article(document) {
        return None;
    }

    let id = ID_ATTR
        .captures(document)
        .map(|c| c[1].to_string())
        .unwrap_or_default();

    let headword = HEADER_BLOCK
        .captures(document)
        .map(|c| normalize(&c[1]))
        .unwrap_or_default();

    let etymology = ETYMOLOGY_PARAGRAPH
        .captures(document)
        .map(|c| decode_entities(&strip_tags(&c[1])).trim().to_string())
        .unwrap_or_default();

    let definitions = extract_definitions(document);

    let conjugations = if include_conjugations {
        extract_conjugations(document)
    } else {
        Vec::new()
    };

    Some(WordRecord {
        id,
        headword,
        etymology,
        definitions,
        conjugations,
    })
}

/// Convert a document to its serialized output form.
///
/// Article markup is extracted and serialized as a JSON record; any
/// other input is returned unchanged (pass-through, not an error). The
/// only failure mode is the serialization of an assembled record.
pub fn extract_document(document: &str, include_conjugations: bool) -> Result<String> {
    match parse_article(document, include_conjugations) {
        Some(record) => Ok(serde_json::to_string(&record)?),
        None => Ok(document.to_string()),
    }
}
