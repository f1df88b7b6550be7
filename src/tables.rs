//! Inflection table parsing: the declension/conjugation table attached to a
//! part-of-speech block, read into one of three structured variants.
//!
//! Verb tables are driven by row shape (heading/data cell counts); the
//! "nominal forms" tail is a rigid-offset layout that is uniform across verb
//! articles, so it is read by position rather than by pattern — all of that
//! brittleness lives in [`parse_nominal_forms`] and nowhere else. A table
//! that is too short or missing its landmarks parses to no table at all
//! rather than to a malformed one.

use lazy_static::lazy_static;
use regex::Regex;
use ego_tree::NodeId;
use scraper::{CaseSensitivity, ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::article::{clean_text, element, find_first_element, subtree_text};
use crate::error::ParseError;

lazy_static! {
    static ref SEL_TR: Selector = Selector::parse("tr").unwrap();
    static ref SEL_SPAN: Selector = Selector::parse("span").unwrap();
    // "Inflection of talo (Kotus type 1/valo, no gradation)"
    static ref META_LINE: Regex =
        Regex::new(r"^ *Inflection of (\w+) \(Kotus type (\d\d?)/(\w+), (.*) gradation\)").unwrap();
}

/// A canonical verb table has four moods of several rows each; anything
/// shorter is a partial/non-canonical table and parses to nothing.
const MIN_VERB_TABLE_ROWS: usize = 8;

// ─────────────────────────────────────────────────────────────────────────────
// Table data model
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InflectionTable {
    Noun(NounTable),
    Verb(VerbTable),
    Pronoun(PronounTable),
}

/// The Kotus headline of an inflection table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMeta {
    pub word: String,
    pub kotus_type: String,
    pub kotus_word: String,
    pub gradation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NounTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<TableMeta>,
    pub cases: Vec<NounCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NounCase {
    pub name: String,
    pub singular: String,
    pub plural: String,
    /// Accusative only: the second accusative line carries a genitive form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genitive: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerbTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<TableMeta>,
    pub moods: Vec<Mood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominal_forms: Option<NominalForms>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    pub name: String,
    pub tenses: Vec<TenseForms>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenseForms {
    pub name: String,
    /// Six person rows plus the shared passive row.
    pub forms: Vec<PersonForm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonForm {
    pub person: String,
    pub positive: String,
    pub negative: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominalForms {
    pub infinitives: Vec<LabeledForm>,
    pub participles: Vec<Participle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledForm {
    pub label: String,
    pub form: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participle {
    pub name: String,
    pub active: String,
    pub passive: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronounTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<TableMeta>,
    pub cases: Vec<PronounCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronounCase {
    pub name: String,
    pub singular: String,
    pub plural: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Table location and row collection
// ─────────────────────────────────────────────────────────────────────────────

/// Find the inflection table of a POS block by its marker classes.
pub fn find_inflection_table(doc: &Html, nodes: &[NodeId]) -> Result<NodeId, ParseError> {
    find_first_element(doc, nodes, |el| {
        el.value().name() == "table"
            && el
                .value()
                .has_class("inflection-table", CaseSensitivity::CaseSensitive)
            && el
                .value()
                .has_class("vsSwitcher", CaseSensitivity::CaseSensitive)
            && el
                .value()
                .has_class("vsToggleCategory-inflection", CaseSensitivity::CaseSensitive)
    })
    .ok_or(ParseError::NoInflectionTable)
}

/// One table row: cleaned heading texts plus data-cell node ids (ids, so the
/// genitive-plural span quirk can look inside the cell later).
struct Row {
    ths: Vec<String>,
    tds: Vec<NodeId>,
}

fn collect_rows(doc: &Html, table: NodeId) -> Vec<Row> {
    let Some(table_el) = element(doc, table) else {
        return Vec::new();
    };
    let mut rows = Vec::new();
    for tr in table_el.select(&SEL_TR) {
        let mut ths = Vec::new();
        let mut tds = Vec::new();
        for child in tr.children() {
            if let Some(cell) = ElementRef::wrap(child) {
                match cell.value().name() {
                    "th" => ths.push(clean_text(&cell.text().collect::<String>())),
                    "td" => tds.push(child.id()),
                    _ => {}
                }
            }
        }
        rows.push(Row { ths, tds });
    }
    rows
}

fn cell_text(doc: &Html, id: NodeId) -> String {
    clean_text(&subtree_text(doc, id))
}

fn span_text(doc: &Html, id: NodeId) -> Option<String> {
    element(doc, id)?
        .select(&SEL_SPAN)
        .next()
        .map(|span| clean_text(&span.text().collect::<String>()))
}

fn parse_table_meta(headline: &str) -> Option<TableMeta> {
    let captures = META_LINE.captures(headline)?;
    Some(TableMeta {
        word: captures[1].to_string(),
        kotus_type: captures[2].to_string(),
        kotus_word: captures[3].to_string(),
        gradation: captures[4].to_string(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Parse an inflection table, dispatching on the POS tag of its block:
/// verbs and pronouns get their own layouts, every other nominal (nouns,
/// adjectives, numerals) shares the case-table layout.
pub fn parse_inflection_table(doc: &Html, table: NodeId, pos_tag: &str) -> Option<InflectionTable> {
    let rows = collect_rows(doc, table);
    if rows.is_empty() {
        return None;
    }
    let meta = rows
        .first()
        .and_then(|row| row.ths.first())
        .and_then(|headline| parse_table_meta(headline));

    match pos_tag.to_lowercase().as_str() {
        "verb" => parse_verb_table(doc, &rows, meta).map(InflectionTable::Verb),
        "pronoun" => Some(InflectionTable::Pronoun(parse_pronoun_table(doc, &rows, meta))),
        _ => parse_noun_table(doc, &rows, meta).map(InflectionTable::Noun),
    }
}

/// Verb tables alternate four row shapes: a single heading opens a mood, a
/// heading pair opens two tenses side by side, a six-heading row is the
/// person/positive/negative banner (skipped), and a 2-heading/4-cell row is
/// data feeding both open tenses — the six persons and the shared passive
/// alike. The "nominal forms" heading hands over to the rigid tail.
fn parse_verb_table(doc: &Html, rows: &[Row], meta: Option<TableMeta>) -> Option<VerbTable> {
    if rows.len() < MIN_VERB_TABLE_ROWS {
        debug!(rows = rows.len(), "verb table below row threshold");
        return None;
    }

    let mut moods: Vec<Mood> = Vec::new();
    let mut nominal_forms = None;
    for (i, row) in rows.iter().enumerate().skip(1) {
        match (row.ths.len(), row.tds.len()) {
            (1, 0) => {
                let title = row.ths[0].clone();
                if title.eq_ignore_ascii_case("nominal forms") {
                    nominal_forms = Some(parse_nominal_forms(doc, rows, i)?);
                    break;
                }
                moods.push(Mood {
                    name: title,
                    tenses: Vec::new(),
                });
            }
            (2, 0) => {
                if let Some(mood) = moods.last_mut() {
                    for name in &row.ths {
                        mood.tenses.push(TenseForms {
                            name: name.clone(),
                            forms: Vec::new(),
                        });
                    }
                }
            }
            (2, 4) => {
                if let Some(mood) = moods.last_mut() {
                    let n = mood.tenses.len();
                    if n >= 2 {
                        let person = row.ths[0].clone();
                        mood.tenses[n - 2].forms.push(PersonForm {
                            person: person.clone(),
                            positive: cell_text(doc, row.tds[0]),
                            negative: cell_text(doc, row.tds[1]),
                        });
                        mood.tenses[n - 1].forms.push(PersonForm {
                            person,
                            positive: cell_text(doc, row.tds[2]),
                            negative: cell_text(doc, row.tds[3]),
                        });
                    }
                }
            }
            // Column banners and decorative rows.
            _ => {}
        }
    }
    Some(VerbTable {
        meta,
        moods,
        nominal_forms,
    })
}

/// The nominal-forms tail has a fixed layout: two banner rows after the
/// marker, then the five numbered infinitive rows, which also carry the
/// participle columns. Offsets are a contract with the article markup; keep
/// every assumption about them inside this function.
fn parse_nominal_forms(doc: &Html, rows: &[Row], marker: usize) -> Option<NominalForms> {
    if marker + 8 > rows.len() {
        debug!("nominal forms section truncated");
        return None;
    }
    let mut infinitives = Vec::new();
    let mut participles = Vec::new();
    for row in &rows[marker + 3..marker + 8] {
        let label = row.ths.first()?.clone();
        let form = row
            .tds
            .first()
            .map(|&td| cell_text(doc, td))
            .unwrap_or_default();
        infinitives.push(LabeledForm { label, form });

        if row.ths.len() >= 2 && row.tds.len() >= 3 {
            let n = row.tds.len();
            participles.push(Participle {
                name: row.ths[row.ths.len() - 1].clone(),
                active: cell_text(doc, row.tds[n - 2]),
                passive: cell_text(doc, row.tds[n - 1]),
            });
        }
    }
    Some(NominalForms {
        infinitives,
        participles,
    })
}

/// Noun tables open with a four-case preview that repeats inside the real
/// table; everything before the real header row (leading th empty) is
/// skipped. The accusative has no data row of its own: its row aliases the
/// nominative forms and the following single-cell row is its genitive.
fn parse_noun_table(doc: &Html, rows: &[Row], meta: Option<TableMeta>) -> Option<NounTable> {
    let header = rows
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, row)| row.ths.first().is_some_and(|th| th.is_empty()))?
        .0;

    let mut cases: Vec<NounCase> = Vec::new();
    let mut in_accusative = false;
    for row in &rows[header + 1..] {
        if in_accusative {
            in_accusative = false;
            if let (Some(case), Some(&td)) = (cases.last_mut(), row.tds.first()) {
                case.genitive = Some(cell_text(doc, td));
            }
            continue;
        }
        let Some(name) = row.ths.first().cloned() else {
            continue;
        };
        if name.is_empty() || row.tds.is_empty() {
            continue;
        }
        let singular = cell_text(doc, row.tds[0]);
        let plural = match row.tds.get(1) {
            // The genitive plural cell lists alternatives; the leading span
            // holds the main form.
            Some(&td) if name == "genitive" => {
                span_text(doc, td).unwrap_or_else(|| cell_text(doc, td))
            }
            Some(&td) => cell_text(doc, td),
            None => String::new(),
        };
        if name == "accusative" {
            in_accusative = true;
        }
        cases.push(NounCase {
            name,
            singular,
            plural,
            genitive: None,
        });
    }
    if cases.is_empty() {
        return None;
    }
    Some(NounTable { meta, cases })
}

/// Pronoun tables are flat: one row per case, singular and plural columns.
fn parse_pronoun_table(doc: &Html, rows: &[Row], meta: Option<TableMeta>) -> PronounTable {
    let mut cases = Vec::new();
    for row in rows.iter().skip(1) {
        let Some(name) = row.ths.first().cloned() else {
            continue;
        };
        if name.is_empty() || row.tds.len() < 2 {
            continue;
        }
        cases.push(PronounCase {
            name,
            singular: cell_text(doc, row.tds[0]),
            plural: cell_text(doc, row.tds[1]),
        });
    }
    PronounTable { meta, cases }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod table_tests {
    use super::*;

    const TABLE_CLASSES: &str = "inflection-table vsSwitcher vsToggleCategory-inflection";

    fn first_table(doc: &Html) -> NodeId {
        find_inflection_table(doc, &[doc.tree.root().id()]).expect("fixture must hold a table")
    }

    fn noun_fixture() -> String {
        format!(
            r#"<table class="{TABLE_CLASSES}"><tbody>
            <tr><th colspan="3">Inflection of talo (Kotus type 1/valo, no gradation)</th></tr>
            <tr><th>nominative</th><td>talo</td><td>talot</td></tr>
            <tr><th>genitive</th><td>talon</td><td><span class="Latn">talojen</span></td></tr>
            <tr><th>partitive</th><td>taloa</td><td>taloja</td></tr>
            <tr><th>illative</th><td>taloon</td><td>taloihin</td></tr>
            <tr><th></th><th>singular</th><th>plural</th></tr>
            <tr><th>nominative</th><td>talo</td><td>talot</td></tr>
            <tr><th>accusative</th><th>nom.</th><td>talo</td><td>talot</td></tr>
            <tr><th>gen.</th><td>talon</td></tr>
            <tr><th>genitive</th><td>talon</td><td><span class="Latn">talojen</span></td></tr>
            <tr><th>partitive</th><td>taloa</td><td>taloja</td></tr>
            <tr><th>illative</th><td>taloon</td><td>taloihin</td></tr>
            </tbody></table>"#
        )
    }

    #[test]
    fn wrong_table_class_is_not_found() {
        let doc = Html::parse_document(r#"<table class="wikitable"><tr><th>x</th></tr></table>"#);
        assert_eq!(
            find_inflection_table(&doc, &[doc.tree.root().id()]).unwrap_err(),
            ParseError::NoInflectionTable
        );
    }

    #[test]
    fn noun_table_skips_the_preview_section() {
        let doc = Html::parse_document(&noun_fixture());
        let table = parse_inflection_table(&doc, first_table(&doc), "Noun").unwrap();
        let InflectionTable::Noun(noun) = table else {
            panic!("expected a noun table");
        };
        // nominative, accusative, genitive, partitive, illative — once each.
        assert_eq!(noun.cases.len(), 5);
        assert_eq!(noun.cases[0].name, "nominative");
        assert_eq!(noun.cases[0].singular, "talo");
        assert_eq!(noun.cases[0].plural, "talot");
    }

    #[test]
    fn accusative_aliases_nominative_and_takes_the_next_genitive_row() {
        let doc = Html::parse_document(&noun_fixture());
        let InflectionTable::Noun(noun) =
            parse_inflection_table(&doc, first_table(&doc), "Noun").unwrap()
        else {
            panic!("expected a noun table");
        };
        let accusative = noun.cases.iter().find(|c| c.name == "accusative").unwrap();
        assert_eq!(accusative.singular, "talo");
        assert_eq!(accusative.plural, "talot");
        assert_eq!(accusative.genitive.as_deref(), Some("talon"));
    }

    #[test]
    fn genitive_plural_reads_the_inner_span() {
        let doc = Html::parse_document(&noun_fixture());
        let InflectionTable::Noun(noun) =
            parse_inflection_table(&doc, first_table(&doc), "Noun").unwrap()
        else {
            panic!("expected a noun table");
        };
        let genitive = noun.cases.iter().find(|c| c.name == "genitive").unwrap();
        assert_eq!(genitive.plural, "talojen");
    }

    #[test]
    fn noun_meta_headline_is_parsed() {
        let doc = Html::parse_document(&noun_fixture());
        let InflectionTable::Noun(noun) =
            parse_inflection_table(&doc, first_table(&doc), "Noun").unwrap()
        else {
            panic!("expected a noun table");
        };
        let meta = noun.meta.unwrap();
        assert_eq!(meta.word, "talo");
        assert_eq!(meta.kotus_type, "1");
        assert_eq!(meta.kotus_word, "valo");
        assert_eq!(meta.gradation, "no");
    }

    #[test]
    fn adjectives_parse_as_case_tables() {
        let doc = Html::parse_document(&noun_fixture());
        let table = parse_inflection_table(&doc, first_table(&doc), "Adjective").unwrap();
        assert!(matches!(table, InflectionTable::Noun(_)));
    }

    fn verb_fixture() -> String {
        format!(
            r#"<table class="{TABLE_CLASSES}"><tbody>
            <tr><th colspan="7">Inflection of puhua (Kotus type 52/sanoa, no gradation)</th></tr>
            <tr><th colspan="7">indicative mood</th></tr>
            <tr><th colspan="4">present tense</th><th colspan="3">perfect</th></tr>
            <tr><th>person</th><th>positive</th><th>negative</th><th>person</th><th>positive</th><th>negative</th></tr>
            <tr><th>1st sing.</th><td>puhun</td><td>en puhu</td><th>1st sing.</th><td>olen puhunut</td><td>en ole puhunut</td></tr>
            <tr><th>2nd sing.</th><td>puhut</td><td>et puhu</td><th>2nd sing.</th><td>olet puhunut</td><td>et ole puhunut</td></tr>
            <tr><th>3rd sing.</th><td>puhuu</td><td>ei puhu</td><th>3rd sing.</th><td>on puhunut</td><td>ei ole puhunut</td></tr>
            <tr><th>1st plur.</th><td>puhumme</td><td>emme puhu</td><th>1st plur.</th><td>olemme puhuneet</td><td>emme ole puhuneet</td></tr>
            <tr><th>2nd plur.</th><td>puhutte</td><td>ette puhu</td><th>2nd plur.</th><td>olette puhuneet</td><td>ette ole puhuneet</td></tr>
            <tr><th>3rd plur.</th><td>puhuvat</td><td>eivät puhu</td><th>3rd plur.</th><td>ovat puhuneet</td><td>eivät ole puhuneet</td></tr>
            <tr><th>passive</th><td>puhutaan</td><td>ei puhuta</td><th>passive</th><td>on puhuttu</td><td>ei ole puhuttu</td></tr>
            <tr><th colspan="7">conditional mood</th></tr>
            <tr><th colspan="4">present</th><th colspan="3">perfect</th></tr>
            <tr><th>person</th><th>positive</th><th>negative</th><th>person</th><th>positive</th><th>negative</th></tr>
            <tr><th>1st sing.</th><td>puhuisin</td><td>en puhuisi</td><th>1st sing.</th><td>olisin puhunut</td><td>en olisi puhunut</td></tr>
            <tr><th colspan="7">nominal forms</th></tr>
            <tr><th colspan="4">infinitives</th><th colspan="3">participles</th></tr>
            <tr><th colspan="2">active</th><th colspan="2">passive</th><th>active</th><th>passive</th></tr>
            <tr><th>1st</th><td>puhua</td><td>&#8212;</td><th>present</th><td>puhuva</td><td>puhuttava</td></tr>
            <tr><th>2nd</th><td>puhuessa</td><td>puhuttaessa</td><th>past</th><td>puhunut</td><td>puhuttu</td></tr>
            <tr><th>3rd</th><td>puhumassa</td><td>puhuttaman</td><th>agent</th><td>puhuma</td><td>&#8212;</td></tr>
            <tr><th>4th</th><td>puhuminen</td><td>&#8212;</td><th>negative</th><td>puhumaton</td><td>&#8212;</td></tr>
            <tr><th>5th</th><td>puhumaisillaan</td></tr>
            </tbody></table>"#
        )
    }

    #[test]
    fn verb_table_groups_moods_and_tense_pairs() {
        let doc = Html::parse_document(&verb_fixture());
        let InflectionTable::Verb(verb) =
            parse_inflection_table(&doc, first_table(&doc), "Verb").unwrap()
        else {
            panic!("expected a verb table");
        };
        assert_eq!(verb.moods.len(), 2);
        assert_eq!(verb.moods[0].name, "indicative mood");
        assert_eq!(verb.moods[0].tenses.len(), 2);
        assert_eq!(verb.moods[0].tenses[0].name, "present tense");
        assert_eq!(verb.moods[0].tenses[1].name, "perfect");
        assert_eq!(verb.moods[1].name, "conditional mood");
        assert_eq!(verb.moods[1].tenses[0].forms[0].positive, "puhuisin");
    }

    #[test]
    fn data_rows_feed_both_tenses_of_the_pair() {
        let doc = Html::parse_document(&verb_fixture());
        let InflectionTable::Verb(verb) =
            parse_inflection_table(&doc, first_table(&doc), "Verb").unwrap()
        else {
            panic!("expected a verb table");
        };
        let present = &verb.moods[0].tenses[0];
        let perfect = &verb.moods[0].tenses[1];
        assert_eq!(present.forms.len(), 7);
        assert_eq!(perfect.forms.len(), 7);
        assert_eq!(present.forms[0].person, "1st sing.");
        assert_eq!(present.forms[0].positive, "puhun");
        assert_eq!(present.forms[0].negative, "en puhu");
        assert_eq!(perfect.forms[0].positive, "olen puhunut");
    }

    #[test]
    fn passive_forms_are_shared_per_tense() {
        let doc = Html::parse_document(&verb_fixture());
        let InflectionTable::Verb(verb) =
            parse_inflection_table(&doc, first_table(&doc), "Verb").unwrap()
        else {
            panic!("expected a verb table");
        };
        let present = &verb.moods[0].tenses[0];
        let passive = present.forms.iter().find(|f| f.person == "passive").unwrap();
        assert_eq!(passive.positive, "puhutaan");
        assert_eq!(passive.negative, "ei puhuta");
    }

    #[test]
    fn nominal_forms_use_the_rigid_layout() {
        let doc = Html::parse_document(&verb_fixture());
        let InflectionTable::Verb(verb) =
            parse_inflection_table(&doc, first_table(&doc), "Verb").unwrap()
        else {
            panic!("expected a verb table");
        };
        let nominal = verb.nominal_forms.unwrap();
        assert_eq!(nominal.infinitives.len(), 5);
        assert_eq!(nominal.infinitives[0].label, "1st");
        assert_eq!(nominal.infinitives[0].form, "puhua");
        assert_eq!(nominal.infinitives[4].label, "5th");
        assert_eq!(nominal.infinitives[4].form, "puhumaisillaan");
        assert_eq!(nominal.participles.len(), 4);
        assert_eq!(nominal.participles[0].name, "present");
        assert_eq!(nominal.participles[0].active, "puhuva");
        assert_eq!(nominal.participles[0].passive, "puhuttava");
        assert_eq!(nominal.participles[1].name, "past");
        assert_eq!(nominal.participles[1].active, "puhunut");
    }

    #[test]
    fn verb_meta_headline_is_parsed() {
        let doc = Html::parse_document(&verb_fixture());
        let InflectionTable::Verb(verb) =
            parse_inflection_table(&doc, first_table(&doc), "Verb").unwrap()
        else {
            panic!("expected a verb table");
        };
        let meta = verb.meta.unwrap();
        assert_eq!(meta.word, "puhua");
        assert_eq!(meta.kotus_type, "52");
        assert_eq!(meta.kotus_word, "sanoa");
        assert_eq!(meta.gradation, "no");
    }

    #[test]
    fn short_verb_tables_parse_to_nothing() {
        let html = format!(
            r#"<table class="{TABLE_CLASSES}"><tbody>
            <tr><th>Inflection of puhua (Kotus type 52/sanoa, no gradation)</th></tr>
            <tr><th>indicative mood</th></tr>
            <tr><th>present tense</th><th>perfect</th></tr>
            </tbody></table>"#
        );
        let doc = Html::parse_document(&html);
        assert_eq!(parse_inflection_table(&doc, first_table(&doc), "Verb"), None);
    }

    #[test]
    fn pronoun_tables_are_flat() {
        let html = format!(
            r#"<table class="{TABLE_CLASSES}"><tbody>
            <tr><th colspan="3">personal pronouns</th></tr>
            <tr><th>nominative</th><td>minä</td><td>me</td></tr>
            <tr><th>genitive</th><td>minun</td><td>meidän</td></tr>
            <tr><th>partitive</th><td>minua</td><td>meitä</td></tr>
            </tbody></table>"#
        );
        let doc = Html::parse_document(&html);
        let InflectionTable::Pronoun(pronoun) =
            parse_inflection_table(&doc, first_table(&doc), "Pronoun").unwrap()
        else {
            panic!("expected a pronoun table");
        };
        assert_eq!(pronoun.meta, None);
        assert_eq!(pronoun.cases.len(), 3);
        assert_eq!(pronoun.cases[0].name, "nominative");
        assert_eq!(pronoun.cases[0].singular, "minä");
        assert_eq!(pronoun.cases[0].plural, "me");
        assert_eq!(pronoun.cases[2].singular, "minua");
    }
}
