//! Sense definition extraction.
//!
//! An article holds its senses as `<p class="j">` paragraphs. Each
//! paragraph yields one [`Definition`] with grammatical category,
//! cleaned prose, and any inline synonym/antonym lists. Malformed
//! paragraphs degrade to empty fields, never to an error.

use regex::Regex;
use std::sync::LazyLock;

use crate::entities::{decode_entities, strip_tags};
use crate::types::Definition;

/// Abbreviations expanded in definition prose, in application order.
///
/// Replacement is plain substring substitution with no word-boundary
/// check; existing consumers depend on the exact output.
const ABBREVIATION_TABLE: &[(&str, &str)] = &[
    ("sing.", "singular"),
    ("pl.", "plural"),
    ("t.", "también"),
    ("p.", "poco"),
];

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SENSE_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<p class="j"[^>]*>(.*?)</p>"#).expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CATEGORY_ABBR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<abbr[^>]*title="([^"]+)"[^>]*>"#).expect("valid regex"));

/// Synonym table inside a sense paragraph. The source markup drops the
/// closing `</ul>`, so the list is matched up to the enclosing `</td>`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SYNONYM_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<table class='sinonimos'>.*?<ul[^>]*>(.*?)</td>").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ANTONYM_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="ant-header ant-inline">.*?<ul[^>]*>(.*?)</ul>.*?</div>"#)
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MARKED_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<mark[^>]*>([^<]+)</mark>").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ABBR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<abbr[^>]+>.*?</abbr>").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEADWORD_ECHO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<span class="h">.*?</span>"#).expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SENSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<span class="n_acep">\S+ </span>"#).expect("valid regex"));

/// Inline synonym/antonym container blocks embedded in the prose.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INLINE_CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="[^"]*-header[^"]*-inline">.*?</div>"#).expect("valid regex")
});

/// Extract every sense definition from an article, in source order.
///
/// Paragraphs whose text is empty after cleaning are dropped.
#[must_use]
pub fn extract_definitions(document: &str) -> Vec<Definition> {
    let mut definitions = Vec::new();

    for paragraph in SENSE_PARAGRAPH.captures_iter(document) {
        let content = &paragraph[1];

        let category = extract_category(content);
        let synonyms = extract_synonyms(content);
        let antonyms = extract_antonyms(content);
        let text = clean_definition_text(content);

        if text.is_empty() {
            continue;
        }

        definitions.push(Definition {
            category,
            text,
            synonyms,
            antonyms,
        });
    }

    definitions
}

/// Grammatical category from the first `<abbr title=...>` marker.
fn extract_category(paragraph: &str) -> String {
    CATEGORY_ABBR
        .captures(paragraph)
        .map(|c| decode_entities(&c[1]))
        .unwrap_or_default()
}

/// Inline synonyms for one sense paragraph.
fn extract_synonyms(paragraph: &str) -> Vec<String> {
    SYNONYM_BLOCK
        .captures(paragraph)
        .map(|c| collect_marked_terms(&c[1]))
        .unwrap_or_default()
}

/// Inline antonyms for one sense paragraph.
fn extract_antonyms(paragraph: &str) -> Vec<String> {
    ANTONYM_BLOCK
        .captures(paragraph)
        .map(|c| collect_marked_terms(&c[1]))
        .unwrap_or_default()
}

/// Collect `<mark>` terms from a list block: trimmed, non-empty,
/// de-duplicated preserving first-seen order.
fn collect_marked_terms(block: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for capture in MARKED_TERM.captures_iter(block) {
        let term = capture[1].trim();
        if !term.is_empty() && !terms.iter().any(|t| t == term) {
            terms.push(term.to_string());
        }
    }

    terms
}

/// Strip markup from a sense paragraph and expand abbreviations.
fn clean_definition_text(paragraph: &str) -> String {
    let text = ABBR_TAG.replace_all(paragraph, "");
    let text = HEADWORD_ECHO.replace_all(&text, "");
    let text = SENSE_NUMBER.replace_all(&text, "");
    let text = INLINE_CONTAINER.replace_all(&text, "");
    let text = strip_tags(&text);
    let text = decode_entities(&text);
    expand_abbreviations(text.trim())
}

/// Apply the fixed abbreviation expansions as literal substring
/// replacements, in table order.
pub(crate) fn expand_abbreviations(text: &str) -> String {
    let mut result = text.to_string();
    for (abbreviation, expansion) in ABBREVIATION_TABLE {
        result = result.replace(abbreviation, expansion);
    }
    result
}
