//! Verb conjugation table parsing.
//!
//! The conjugation table is a flat row sequence with no semantic
//! tagging: whether a row is a mode header, a tense header, a column
//! header or a data row has to be inferred from its shape. The parser
//! classifies each row into a [`RowKind`] and feeds it through a small
//! state machine carrying the open mode, its tense accumulator and the
//! active column headers.

use regex::Regex;
use std::sync::LazyLock;

use crate::entities::{normalize, strip_tags};
use crate::types::{ConjugationMode, TenseTable};

/// Mode grouping the non-finite verb forms.
pub const MODE_NON_PERSONAL: &str = "Formas no personales";
/// Indicative mood.
pub const MODE_INDICATIVE: &str = "Indicativo";
/// Subjunctive mood.
pub const MODE_SUBJUNCTIVE: &str = "Subjuntivo";
/// Imperative mood.
pub const MODE_IMPERATIVE: &str = "Imperativo";

/// Participle mode variants share this prefix ("Participio", "Participio pasivo", ...).
const PARTICIPLE_PREFIX: &str = "Participio";

/// Column labels that name table metadata rather than tenses.
const METADATA_LABELS: &[&str] = &["Número", "Personas del discurso", "Pronombres personales"];

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TABLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<table[^>]*class="[^"]*cnj[^"]*"[^>]*>(.*?)</table>"#).expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TABLE_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TABLE_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(th|td)\b([^>]*)>(.*?)</(?:th|td)>").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COLSPAN_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"colspan=["']?(\d+)"#).expect("valid regex"));

/// One table cell with the shape information classification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    /// `<th>` cells are header cells, `<td>` cells are data cells.
    header: bool,
    /// Column span, 1 when absent.
    colspan: u32,
    /// Normalized cell text (tags stripped, entities decoded, trimmed).
    text: String,
}

/// Row classification by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowKind {
    /// Spanning header cell naming one of the fixed modes.
    ModeHeader(String),
    /// Spanning header cell with any other text: one tense for all
    /// following data rows.
    TenseHeader(String),
    /// Narrow header cells, one tense name per column.
    ColumnHeader(Vec<String>),
    /// Row holding data cells with inflected forms.
    Data(Vec<String>),
    /// Nothing usable.
    Empty,
}

/// Whether a header text names a conjugation mode.
fn is_mode_name(text: &str) -> bool {
    matches!(
        text,
        MODE_NON_PERSONAL | MODE_INDICATIVE | MODE_SUBJUNCTIVE | MODE_IMPERATIVE
    ) || text.starts_with(PARTICIPLE_PREFIX)
}

/// Whether a mode aligns data cells positionally with the headers
/// (rather than carrying a person label before the verb forms).
fn is_non_personal(mode: &str) -> bool {
    mode == MODE_NON_PERSONAL || mode.starts_with(PARTICIPLE_PREFIX)
}

/// Extract the conjugation modes from an article document.
///
/// Returns an empty sequence when the document carries no conjugation
/// table; that is the normal case for non-verbs, not an error.
#[must_use]
pub fn extract_conjugations(document: &str) -> Vec<ConjugationMode> {
    match TABLE_BLOCK.captures(document) {
        Some(block) => parse_table(&block[1]),
        None => Vec::new(),
    }
}

/// Run the row state machine over a table body.
fn parse_table(body: &str) -> Vec<ConjugationMode> {
    let mut modes: Vec<ConjugationMode> = Vec::new();
    let mut current: Option<ConjugationMode> = None;
    let mut active_headers: Vec<String> = Vec::new();

    for row in TABLE_ROW.captures_iter(body) {
        let cells = parse_cells(&row[1]);

        match classify_row(&cells) {
            RowKind::ModeHeader(name) => {
                // Close the open mode; modes without forms are dropped
                if let Some(mode) = current.take() {
                    if mode.has_forms() {
                        modes.push(mode);
                    }
                }
                current = Some(ConjugationMode::new(name));
                active_headers.clear();
            }
            RowKind::TenseHeader(name) => {
                active_headers = vec![name];
            }
            RowKind::ColumnHeader(labels) => {
                let mode_name = current.as_ref().map_or("", |m| m.mode.as_str());
                active_headers = filter_column_headers(labels, mode_name);
            }
            RowKind::Data(values) => {
                // Tables may start with data before any header row
                let mode = current.get_or_insert_with(|| ConjugationMode::new(MODE_NON_PERSONAL));
                let mode_name = mode.mode.clone();
                apply_data_row(&mut mode.tenses, &mode_name, &active_headers, &values);
            }
            RowKind::Empty => {}
        }
    }

    if let Some(mode) = current {
        if mode.has_forms() {
            modes.push(mode);
        }
    }

    modes
}

/// Parse the cells of one row.
fn parse_cells(row: &str) -> Vec<Cell> {
    TABLE_CELL
        .captures_iter(row)
        .map(|capture| {
            let colspan = COLSPAN_ATTR
                .captures(&capture[2])
                .and_then(|c| c[1].parse().ok())
                .unwrap_or(1);
            Cell {
                header: &capture[1] == "th",
                colspan,
                text: normalize(&strip_tags(&capture[3])).trim().to_string(),
            }
        })
        .collect()
}

/// Classify a row from its cell shapes.
fn classify_row(cells: &[Cell]) -> RowKind {
    if cells.is_empty() {
        return RowKind::Empty;
    }

    if cells.iter().all(|c| c.header) {
        if let [single] = cells {
            if single.colspan > 1 {
                return if is_mode_name(&single.text) {
                    RowKind::ModeHeader(single.text.clone())
                } else {
                    RowKind::TenseHeader(single.text.clone())
                };
            }
        }
        return RowKind::ColumnHeader(cells.iter().map(|c| c.text.clone()).collect());
    }

    RowKind::Data(cells.iter().map(|c| c.text.clone()).collect())
}

/// Filter column-header labels down to tense names.
///
/// Metadata labels are dropped. The Imperativo column header is
/// visually blank in the source table, so an empty label is renamed to
/// the mode itself while that mode is open.
fn filter_column_headers(labels: Vec<String>, mode_name: &str) -> Vec<String> {
    let mut headers = Vec::new();

    for label in labels {
        if METADATA_LABELS.contains(&label.as_str()) {
            continue;
        }
        if label.is_empty() {
            if mode_name == MODE_IMPERATIVE {
                headers.push(MODE_IMPERATIVE.to_string());
            }
            continue;
        }
        headers.push(label);
    }

    headers
}

/// Fold one data row into the open mode's tense accumulator.
fn apply_data_row(tenses: &mut TenseTable, mode_name: &str, headers: &[String], values: &[String]) {
    if is_non_personal(mode_name) {
        if headers.is_empty() {
            // Participio rows may appear with no header row at all;
            // the last cell holds the form
            if mode_name.starts_with(PARTICIPLE_PREFIX) {
                if let Some(form) = values.last().filter(|v| !v.is_empty()) {
                    tenses.push_form(PARTICIPLE_PREFIX, form.clone());
                }
            }
            return;
        }

        for (header, value) in headers.iter().zip(values) {
            if !value.is_empty() {
                tenses.push_form(header, value.clone());
            }
        }
        return;
    }

    // Personal modes: the trailing N cells are the verb forms, the cell
    // right before them is the grammatical person label. Alignment is
    // purely positional from the end of the row.
    let header_count = headers.len();
    if header_count == 0 {
        return;
    }

    if values.len() > header_count {
        let forms_start = values.len() - header_count;
        let person = &values[forms_start - 1];

        for (header, form) in headers.iter().zip(&values[forms_start..]) {
            if form.is_empty() {
                continue;
            }
            let entry = if person.is_empty() {
                form.clone()
            } else {
                format!("{person} {form}")
            };
            tenses.push_form(header, entry);
        }
    } else {
        for (header, form) in headers.iter().zip(values) {
            if !form.is_empty() {
                tenses.push_form(header, form.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(rows: &str) -> String {
        format!(r#"<article id="x"><table class="cnj">{rows}</table></article>"#)
    }

    #[test]
    fn test_no_table_yields_empty() {
        assert!(extract_conjugations("<article id=\"x\">sin tabla</article>").is_empty());
    }

    #[test]
    fn test_personal_mode_with_person_prefix() {
        let html = table(concat!(
            r#"<tr><th colspan="4">Indicativo</th></tr>"#,
            "<tr><th>Presente</th></tr>",
            "<tr><td>yo</td><td>como</td></tr>",
        ));

        let modes = extract_conjugations(&html);
        assert_eq!(modes.len(), 1);
        assert_eq!(modes[0].mode, "Indicativo");
        assert_eq!(
            modes[0].tenses.get("Presente"),
            Some(["yo como".to_string()].as_slice())
        );
    }

    #[test]
    fn test_personal_mode_without_person_column() {
        // Exactly as many cells as headers: no prefix applied
        let html = table(concat!(
            r#"<tr><th colspan="4">Indicativo</th></tr>"#,
            "<tr><th>Presente</th><th>Futuro</th></tr>",
            "<tr><td>como</td><td>comeré</td></tr>",
        ));

        let modes = extract_conjugations(&html);
        assert_eq!(
            modes[0].tenses.get("Presente"),
            Some(["como".to_string()].as_slice())
        );
        assert_eq!(
            modes[0].tenses.get("Futuro"),
            Some(["comeré".to_string()].as_slice())
        );
    }

    #[test]
    fn test_forms_accumulate_across_rows() {
        let html = table(concat!(
            r#"<tr><th colspan="4">Indicativo</th></tr>"#,
            "<tr><th>Presente</th></tr>",
            "<tr><td>yo</td><td>como</td></tr>",
            "<tr><td>tú</td><td>comes</td></tr>",
        ));

        let modes = extract_conjugations(&html);
        assert_eq!(
            modes[0].tenses.get("Presente"),
            Some(["yo como".to_string(), "tú comes".to_string()].as_slice())
        );
    }

    #[test]
    fn test_metadata_labels_filtered_from_column_headers() {
        let html = table(concat!(
            r#"<tr><th colspan="5">Indicativo</th></tr>"#,
            "<tr><th>Número</th><th>Personas del discurso</th>",
            "<th>Pronombres personales</th><th>Presente</th></tr>",
            "<tr><td>Singular</td><td>Primera</td><td>yo</td><td>como</td></tr>",
        ));

        let modes = extract_conjugations(&html);
        // One header survives, so the trailing cell is the form and the
        // cell before it the person label
        assert_eq!(
            modes[0].tenses.get("Presente"),
            Some(["yo como".to_string()].as_slice())
        );
    }

    #[test]
    fn test_empty_imperativo_header_renamed() {
        let html = table(concat!(
            r#"<tr><th colspan="3">Imperativo</th></tr>"#,
            "<tr><th>Número</th><th></th></tr>",
            "<tr><td>Singular</td><td>tú</td><td>come</td></tr>",
        ));

        let modes = extract_conjugations(&html);
        assert_eq!(modes[0].mode, "Imperativo");
        assert_eq!(
            modes[0].tenses.get("Imperativo"),
            Some(["tú come".to_string()].as_slice())
        );
    }

    #[test]
    fn test_mode_without_data_is_dropped() {
        let html = table(concat!(
            r#"<tr><th colspan="2">Indicativo</th></tr>"#,
            "<tr><th>Presente</th></tr>",
            "<tr><td>como</td></tr>",
            r#"<tr><th colspan="2">Subjuntivo</th></tr>"#,
            r#"<tr><th colspan="2">Imperativo</th></tr>"#,
            "<tr><th>Imperativo</th></tr>",
            "<tr><td>come</td></tr>",
        ));

        let modes = extract_conjugations(&html);
        let names: Vec<_> = modes.iter().map(|m| m.mode.as_str()).collect();
        assert_eq!(names, vec!["Indicativo", "Imperativo"]);
    }

    #[test]
    fn test_data_before_any_header_defaults_to_non_personal() {
        let html = table(concat!(
            "<tr><th>Infinitivo</th><th>Gerundio</th></tr>",
            "<tr><td>comer</td><td>comiendo</td></tr>",
        ));

        let modes = extract_conjugations(&html);
        assert_eq!(modes.len(), 1);
        assert_eq!(modes[0].mode, MODE_NON_PERSONAL);
        assert_eq!(
            modes[0].tenses.get("Infinitivo"),
            Some(["comer".to_string()].as_slice())
        );
        assert_eq!(
            modes[0].tenses.get("Gerundio"),
            Some(["comiendo".to_string()].as_slice())
        );
    }

    #[test]
    fn test_non_personal_alignment_skips_empty_cells() {
        let html = table(concat!(
            r#"<tr><th colspan="2">Formas no personales</th></tr>"#,
            "<tr><th>Infinitivo</th><th>Gerundio</th></tr>",
            "<tr><td></td><td>comiendo</td></tr>",
        ));

        let modes = extract_conjugations(&html);
        assert_eq!(modes[0].tenses.get("Infinitivo"), None);
        assert_eq!(
            modes[0].tenses.get("Gerundio"),
            Some(["comiendo".to_string()].as_slice())
        );
    }

    #[test]
    fn test_participio_fallback_without_headers() {
        let html = table(concat!(
            r#"<tr><th colspan="2">Participio</th></tr>"#,
            "<tr><td>comido</td></tr>",
        ));

        let modes = extract_conjugations(&html);
        assert_eq!(modes.len(), 1);
        assert_eq!(modes[0].mode, "Participio");
        assert_eq!(
            modes[0].tenses.get("Participio"),
            Some(["comido".to_string()].as_slice())
        );
    }

    #[test]
    fn test_tense_header_applies_to_following_rows() {
        let html = table(concat!(
            r#"<tr><th colspan="3">Subjuntivo</th></tr>"#,
            r#"<tr><th colspan="3">Pretérito imperfecto</th></tr>"#,
            "<tr><td>yo</td><td>comiera</td></tr>",
            "<tr><td>tú</td><td>comieras</td></tr>",
        ));

        let modes = extract_conjugations(&html);
        assert_eq!(
            modes[0].tenses.get("Pretérito imperfecto"),
            Some(["yo comiera".to_string(), "tú comieras".to_string()].as_slice())
        );
    }

    #[test]
    fn test_cell_text_is_normalized() {
        let html = table(concat!(
            r#"<tr><th colspan="2">Indicativo</th></tr>"#,
            "<tr><th>Presente</th></tr>",
            "<tr><td>t&#xFA;</td><td><b>comer&#xE1;s</b></td></tr>",
        ));

        let modes = extract_conjugations(&html);
        assert_eq!(
            modes[0].tenses.get("Presente"),
            Some(["tú comerás".to_string()].as_slice())
        );
    }

    #[test]
    fn test_classify_row_shapes() {
        let mode_row = vec![Cell {
            header: true,
            colspan: 4,
            text: "Indicativo".to_string(),
        }];
        assert_eq!(
            classify_row(&mode_row),
            RowKind::ModeHeader("Indicativo".to_string())
        );

        let tense_row = vec![Cell {
            header: true,
            colspan: 4,
            text: "Presente".to_string(),
        }];
        assert_eq!(
            classify_row(&tense_row),
            RowKind::TenseHeader("Presente".to_string())
        );

        let column_row = vec![
            Cell {
                header: true,
                colspan: 1,
                text: "Presente".to_string(),
            },
            Cell {
                header: true,
                colspan: 1,
                text: "Futuro".to_string(),
            },
        ];
        assert_eq!(
            classify_row(&column_row),
            RowKind::ColumnHeader(vec!["Presente".to_string(), "Futuro".to_string()])
        );

        assert_eq!(classify_row(&[]), RowKind::Empty);
    }
}
