//! Core data types for the extractor.
//!
//! Field names follow the JSON vocabulary of the upstream service
//! (`encabezado`, `definiciones`, `sinonimos`, ...), so serialized
//! records are drop-in compatible with existing consumers.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One sense definition of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Grammatical category label (e.g., "interjección"), may be empty.
    #[serde(rename = "tipo")]
    pub category: String,

    /// Cleaned definition prose, never empty.
    #[serde(rename = "definicion")]
    pub text: String,

    /// Inline synonyms in first-seen order, de-duplicated.
    #[serde(rename = "sinonimos", skip_serializing_if = "Vec::is_empty", default)]
    pub synonyms: Vec<String>,

    /// Inline antonyms in first-seen order, de-duplicated.
    #[serde(rename = "antonimos", skip_serializing_if = "Vec::is_empty", default)]
    pub antonyms: Vec<String>,
}

/// Insertion-ordered mapping from tense name to inflected forms.
///
/// A tense accumulates forms across possibly non-contiguous table rows,
/// so lookups go by name while serialization preserves the order the
/// tenses first appeared in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenseTable(Vec<(String, Vec<String>)>);

impl TenseTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a form under a tense, creating the tense on first use.
    pub fn push_form(&mut self, tense: &str, form: impl Into<String>) {
        if let Some((_, forms)) = self.0.iter_mut().find(|(name, _)| name == tense) {
            forms.push(form.into());
        } else {
            self.0.push((tense.to_string(), vec![form.into()]));
        }
    }

    /// Forms recorded for a tense, if any.
    #[must_use]
    pub fn get(&self, tense: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(name, _)| name == tense)
            .map(|(_, forms)| forms.as_slice())
    }

    /// Whether no tense holds any form.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tenses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Tense names in insertion order.
    pub fn tense_names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for TenseTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (tense, forms) in &self.0 {
            map.serialize_entry(tense, forms)?;
        }
        map.end()
    }
}

/// A conjugation mode (mood) with its tenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConjugationMode {
    /// Mode name ("Formas no personales", "Indicativo", ...).
    #[serde(rename = "modo")]
    pub mode: String,

    /// Tense-to-forms mapping in source order.
    #[serde(rename = "tiempos")]
    pub tenses: TenseTable,
}

impl ConjugationMode {
    /// Open a new mode with no tenses yet.
    #[must_use]
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            tenses: TenseTable::new(),
        }
    }

    /// Whether the mode accumulated at least one tense entry.
    ///
    /// Modes without forms are never emitted.
    #[must_use]
    pub fn has_forms(&self) -> bool {
        !self.tenses.is_empty()
    }
}

/// Complete structured record for one dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordRecord {
    /// Article identifier, may be empty if undetectable.
    pub id: String,

    /// Headword (canonical written form).
    #[serde(rename = "encabezado")]
    pub headword: String,

    /// Etymology prose, empty if the article carries none.
    #[serde(rename = "etimologia", skip_serializing_if = "String::is_empty")]
    pub etymology: String,

    /// Sense definitions in source order.
    #[serde(rename = "definiciones")]
    pub definitions: Vec<Definition>,

    /// Conjugation modes, present only when requested and found.
    #[serde(rename = "conjugaciones", skip_serializing_if = "Vec::is_empty")]
    pub conjugations: Vec<ConjugationMode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tense_table_accumulates_in_order() {
        let mut tenses = TenseTable::new();
        tenses.push_form("Presente", "como");
        tenses.push_form("Futuro", "comeré");
        tenses.push_form("Presente", "comes");

        assert_eq!(tenses.len(), 2);
        assert_eq!(
            tenses.get("Presente"),
            Some(["como".to_string(), "comes".to_string()].as_slice())
        );
        assert_eq!(
            tenses.tense_names().collect::<Vec<_>>(),
            vec!["Presente", "Futuro"]
        );
    }

    #[test]
    fn test_tense_table_serializes_as_ordered_map() {
        let mut tenses = TenseTable::new();
        tenses.push_form("Presente", "yo como");
        tenses.push_form("Futuro", "yo comeré");

        let json = serde_json::to_string(&tenses).unwrap();
        assert_eq!(json, r#"{"Presente":["yo como"],"Futuro":["yo comeré"]}"#);
    }

    #[test]
    fn test_conjugation_mode_has_forms() {
        let mut mode = ConjugationMode::new("Indicativo");
        assert!(!mode.has_forms());
        mode.tenses.push_form("Presente", "yo como");
        assert!(mode.has_forms());
    }

    #[test]
    fn test_definition_serialization_omits_empty_lists() {
        let definition = Definition {
            category: "interj.".to_string(),
            text: "¡hola!".to_string(),
            synonyms: Vec::new(),
            antonyms: Vec::new(),
        };

        let json = serde_json::to_string(&definition).unwrap();
        assert_eq!(json, r#"{"tipo":"interj.","definicion":"¡hola!"}"#);
    }

    #[test]
    fn test_word_record_serialization() {
        let record = WordRecord {
            id: "hola01".to_string(),
            headword: "hola".to_string(),
            etymology: String::new(),
            definitions: vec![Definition {
                category: "interjección".to_string(),
                text: "¡hola!".to_string(),
                synonyms: vec!["buenas".to_string()],
                antonyms: Vec::new(),
            }],
            conjugations: Vec::new(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""id":"hola01""#));
        assert!(json.contains(r#""encabezado":"hola""#));
        assert!(json.contains(r#""sinonimos":["buenas"]"#));
        // Empty etymology and conjugations are omitted, not emitted
        assert!(!json.contains("etimologia"));
        assert!(!json.contains("conjugaciones"));
    }
}
