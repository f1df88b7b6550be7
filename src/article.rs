//! Article structure extraction: locate a language's section inside the
//! shared multi-language Wiktionary page, segment it into part-of-speech
//! blocks, and pull translations and usage examples out of each block.
//!
//! The parsed document is never re-serialized; sections and blocks are runs
//! of node ids into the original tree, so boundary content survives exactly
//! as written. The only mutation is the drain of already-consumed example
//! nodes, which keeps their text from leaking into the surrounding
//! translation text.

use std::collections::HashSet;

use lazy_static::lazy_static;
use once_cell::sync::Lazy;
use regex::Regex;
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ParseError;
use crate::tables::{self, InflectionTable};

lazy_static! {
    static ref HEADING_TAG: Regex = Regex::new(r"^h\d$").unwrap();
    static ref SPACE_RUNS: Regex = Regex::new(r"  *").unwrap();
    static ref SEL_H2: Selector = Selector::parse("h2").unwrap();
    static ref SEL_HEADLINE: Selector = Selector::parse("span.mw-headline").unwrap();
}

#[derive(Debug, Deserialize)]
struct PosSchema {
    pos_headings: Vec<String>,
}

/// Closed set of recognized part-of-speech headings, loaded from the
/// embedded schema. A heading matching none of these never opens a block.
static POS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let schema: PosSchema = serde_yaml::from_str(include_str!("../schema/pos.yaml"))
        .expect("embedded POS schema must parse");
    Regex::new(&schema.pos_headings.join("|")).expect("POS headings must form a valid pattern")
});

// ─────────────────────────────────────────────────────────────────────────────
// Article data model
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub word: String,
    pub languages: Vec<LanguageSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageSection {
    pub language: String,
    pub pos_blocks: Vec<PartOfSpeechBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartOfSpeechBlock {
    /// Heading text, e.g. "Verb" or "Proper noun".
    pub tag: String,
    pub translations: Vec<Translation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflection: Option<InflectionTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_translation: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared tree helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Remove line breaks and collapse space runs to a single space.
pub fn clean_text(text: &str) -> String {
    let unbroken = text.replace('\n', "");
    SPACE_RUNS.replace_all(unbroken.trim(), " ").into_owned()
}

pub(crate) fn element(doc: &Html, id: NodeId) -> Option<ElementRef<'_>> {
    doc.tree.get(id).and_then(ElementRef::wrap)
}

/// Concatenated text content of a subtree, in document order.
pub(crate) fn subtree_text(doc: &Html, id: NodeId) -> String {
    let mut out = String::new();
    if let Some(node) = doc.tree.get(id) {
        for descendant in node.descendants() {
            if let Some(text) = descendant.value().as_text() {
                out.push_str(text);
            }
        }
    }
    out
}

/// Depth-first search over the given subtrees (self included), returning the
/// first element the predicate accepts, in document order.
pub(crate) fn find_first_element<F>(doc: &Html, nodes: &[NodeId], pred: F) -> Option<NodeId>
where
    F: Fn(&ElementRef) -> bool,
{
    for &id in nodes {
        let Some(node) = doc.tree.get(id) else { continue };
        for descendant in node.descendants() {
            if let Some(el) = ElementRef::wrap(descendant) {
                if pred(&el) {
                    return Some(descendant.id());
                }
            }
        }
    }
    None
}

fn heading_level(el: &ElementRef) -> Option<u32> {
    let name = el.value().name();
    if HEADING_TAG.is_match(name) {
        name[1..].parse().ok()
    } else {
        None
    }
}

fn headline_of(el: &ElementRef) -> Option<String> {
    el.select(&SEL_HEADLINE)
        .next()
        .map(|span| span.text().collect::<String>())
}

// ─────────────────────────────────────────────────────────────────────────────
// Language section extraction
// ─────────────────────────────────────────────────────────────────────────────

/// Isolate the sub-document belonging to one language.
///
/// The section spans from the first `h2` whose headline id matches the
/// language (inclusive) to the next `h2` (exclusive), or to the end of the
/// document. The returned ids point into the unmodified tree.
pub fn extract_language_section(doc: &Html, language: &str) -> Result<Vec<NodeId>, ParseError> {
    let headers: Vec<ElementRef> = doc.select(&SEL_H2).collect();
    debug!(count = headers.len(), "language headers in document");

    let mut start = None;
    let mut end_id = None;
    for (i, header) in headers.iter().enumerate() {
        let found = header
            .select(&SEL_HEADLINE)
            .any(|span| span.value().attr("id") == Some(language));
        if found {
            start = Some(*header);
            end_id = headers.get(i + 1).map(|h| h.id());
            break;
        }
    }
    let start = start.ok_or_else(|| ParseError::LanguageNotFound(language.to_string()))?;

    let mut nodes = vec![start.id()];
    for sibling in start.next_siblings() {
        if Some(sibling.id()) == end_id {
            break;
        }
        nodes.push(sibling.id());
    }
    debug!(language, nodes = nodes.len(), "language section extracted");
    Ok(nodes)
}

// ─────────────────────────────────────────────────────────────────────────────
// Part-of-speech segmentation
// ─────────────────────────────────────────────────────────────────────────────

/// One part-of-speech block: its heading text and the section nodes it spans.
#[derive(Debug, Clone)]
pub struct PosPart {
    pub tag: String,
    pub nodes: Vec<NodeId>,
}

/// Split a language section into one sub-document per part-of-speech heading.
///
/// All recognized POS headings must sit at the same heading tier; a block
/// ends at the next heading of that tier or higher. Content under a non-POS
/// heading of that tier ("Further reading", a new Etymology, ...) belongs to
/// no block.
pub fn segment_pos_parts(doc: &Html, section: &[NodeId]) -> Result<Vec<PosPart>, ParseError> {
    let mut headings: Vec<(usize, u32, String)> = Vec::new();
    for (i, &id) in section.iter().enumerate() {
        let Some(el) = element(doc, id) else { continue };
        let Some(level) = heading_level(&el) else { continue };
        let Some(text) = headline_of(&el) else { continue };
        if POS_PATTERN.is_match(&text) {
            headings.push((i, level, clean_text(&text)));
        }
    }
    if headings.is_empty() {
        debug!("no POS headings present in section");
        return Err(ParseError::NoPosHeadings);
    }

    let tiers: HashSet<u32> = headings.iter().map(|&(_, level, _)| level).collect();
    if tiers.len() != 1 {
        return Err(ParseError::InconsistentPosHeadingLevels);
    }
    let pos_level = headings[0].1;
    debug!(count = headings.len(), tier = pos_level, "POS headings found");

    let mut parts = Vec::new();
    let mut open: Option<(usize, String)> = None;
    for i in headings[0].0..section.len() {
        if let Some(el) = element(doc, section[i]) {
            if heading_level(&el).is_some_and(|level| level <= pos_level) {
                if let Some((start, tag)) = open.take() {
                    parts.push(PosPart {
                        tag,
                        nodes: section[start..i].to_vec(),
                    });
                }
            }
        }
        if let Some((_, _, tag)) = headings.iter().find(|&&(idx, _, _)| idx == i) {
            open = Some((i, tag.clone()));
        }
    }
    if let Some((start, tag)) = open {
        parts.push(PosPart {
            tag,
            nodes: section[start..].to_vec(),
        });
    }
    Ok(parts)
}

// ─────────────────────────────────────────────────────────────────────────────
// Translation extraction
// ─────────────────────────────────────────────────────────────────────────────

/// The translation items of a POS block: the direct `li` children of its
/// first ordered list.
fn translation_items(doc: &Html, part: &PosPart) -> Result<Vec<NodeId>, ParseError> {
    let ol = find_first_element(doc, &part.nodes, |el| el.value().name() == "ol")
        .ok_or(ParseError::NoTranslations)?;
    let items: Vec<NodeId> = match doc.tree.get(ol) {
        Some(node) => node
            .children()
            .filter(|child| {
                ElementRef::wrap(*child).is_some_and(|el| el.value().name() == "li")
            })
            .map(|child| child.id())
            .collect(),
        None => Vec::new(),
    };
    if items.is_empty() {
        return Err(ParseError::NoTranslations);
    }
    debug!(tag = %part.tag, count = items.len(), "translations found");
    Ok(items)
}

fn parse_translation(doc: &mut Html, item: NodeId) -> Translation {
    let example_container =
        find_first_element(doc, &[item], |el| matches!(el.value().name(), "dl" | "ul"));
    let mut examples = Vec::new();
    if let Some(container) = example_container {
        examples = parse_examples(doc, container);
        // Drain the consumed examples so they stay out of the translation
        // text below.
        if let Some(mut node) = doc.tree.get_mut(container) {
            node.detach();
        }
    }
    let text = clean_text(&subtree_text(doc, item));
    Translation { text, examples }
}

fn parse_examples(doc: &mut Html, container: NodeId) -> Vec<Example> {
    let entries: Vec<NodeId> = match doc.tree.get(container) {
        Some(node) => node
            .children()
            .filter(|child| {
                ElementRef::wrap(*child)
                    .is_some_and(|el| matches!(el.value().name(), "dd" | "li"))
            })
            .map(|child| child.id())
            .collect(),
        None => Vec::new(),
    };
    debug!(count = entries.len(), "example elements found");

    let mut examples = Vec::new();
    for entry in entries {
        // A nested dl carries the back-translation; examples given as bare
        // quotations have none.
        let back = find_first_element(doc, &[entry], |el| el.value().name() == "dl");
        let back_translation = back.map(|dl| {
            let text = clean_text(&subtree_text(doc, dl));
            if let Some(mut node) = doc.tree.get_mut(dl) {
                node.detach();
            }
            text
        });
        let text = clean_text(&subtree_text(doc, entry));
        examples.push(Example {
            text,
            back_translation,
        });
    }
    examples
}

// ─────────────────────────────────────────────────────────────────────────────
// Article assembly
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a raw Wiktionary article page into a structured tree.
///
/// `raw_html` must have the shape returned by the Wiktionary API's rendered
/// output. Structural-absence errors propagate except for a missing
/// inflection table, which is simply recorded as absent.
pub fn parse_article(raw_html: &str, word: &str, language: &str) -> Result<Article, ParseError> {
    info!(word, language, "starting article parsing");
    let mut doc = Html::parse_document(raw_html);

    let section = extract_language_section(&doc, language)?;
    let parts = segment_pos_parts(&doc, &section)?;

    let mut pos_blocks = Vec::new();
    for part in parts {
        let items = translation_items(&doc, &part)?;
        let mut translations = Vec::new();
        for item in items {
            translations.push(parse_translation(&mut doc, item));
        }
        let inflection = match tables::find_inflection_table(&doc, &part.nodes) {
            Ok(table) => tables::parse_inflection_table(&doc, table, &part.tag),
            Err(_) => {
                debug!(tag = %part.tag, "no inflection table in POS block");
                None
            }
        };
        pos_blocks.push(PartOfSpeechBlock {
            tag: part.tag,
            translations,
            inflection,
        });
    }

    info!(word, "finished article parsing");
    Ok(Article {
        word: word.to_string(),
        languages: vec![LanguageSection {
            language: language.to_string(),
            pos_blocks,
        }],
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod section_tests {
    use super::*;

    const TWO_LANGUAGES: &str = r#"
        <h2><span class="mw-headline" id="Finnish">Finnish</span></h2>
        <h3><span class="mw-headline" id="Verb">Verb</span></h3>
        <ol><li>to speak</li></ol>
        <h2><span class="mw-headline" id="English">English</span></h2>
        <h3><span class="mw-headline" id="Noun">Noun</span></h3>
        <ol><li>a speech</li></ol>
    "#;

    #[test]
    fn missing_language_is_an_error() {
        let doc = Html::parse_document(TWO_LANGUAGES);
        assert_eq!(
            extract_language_section(&doc, "Swedish").unwrap_err(),
            ParseError::LanguageNotFound("Swedish".to_string())
        );
    }

    #[test]
    fn section_stops_at_the_next_language_header() {
        let article = parse_article(TWO_LANGUAGES, "puhua", "Finnish").unwrap();
        let blocks = &article.languages[0].pos_blocks;
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].tag, "Verb");
        assert_eq!(blocks[0].translations[0].text, "to speak");
    }

    #[test]
    fn last_language_section_runs_to_the_end() {
        let article = parse_article(TWO_LANGUAGES, "speech", "English").unwrap();
        let blocks = &article.languages[0].pos_blocks;
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].translations[0].text, "a speech");
    }
}
