//! Finnish word lookup: morphology and Wiktionary article parsing.
//!
//! Two independent engines share this crate. The morphology engine
//! ([`grammar`]) works on bare word strings: verb-type classification, KPT
//! consonant gradation, syllable division and present-tense conjugation.
//! The article extractor ([`article`] + [`tables`]) turns the raw HTML of a
//! Wiktionary page into a structured tree of part-of-speech blocks with
//! translations, usage examples and inflection tables.
//!
//! ```
//! use finnish_wiktionary::{conjugate_present, divide_syllables};
//!
//! let forms = conjugate_present("puhua").unwrap();
//! assert_eq!(forms.han, "puhuu");
//! assert_eq!(divide_syllables("puhua"), vec!["pu", "hu", "a"]);
//! ```
//!
//! Lookups are independent of each other and hold no shared mutable state;
//! callers may run them in parallel as long as each call gets its own
//! document.

pub mod article;
pub mod connectors;
pub mod error;
pub mod grammar;
pub mod tables;

use unicode_normalization::UnicodeNormalization;

pub use article::{
    clean_text, parse_article, Article, Example, LanguageSection, PartOfSpeechBlock, Translation,
};
pub use connectors::{ApiConnector, ArticleSource, HtmlConnector, RawArticle};
pub use error::{ConjugationError, FetchError, LookupError, ParseError};
pub use grammar::{
    change_grade, classify_verb, conjugate, conjugate_present, divide_syllables, Conjugation,
    GradationDirection, Tense, VerbType,
};
pub use tables::{InflectionTable, NounTable, PronounTable, VerbTable};

/// Outcome of a lookup: the parsed article, or — when no exact article
/// exists — alternate words the search page proposed.
#[derive(Debug, Clone)]
pub enum Lookup {
    Article(Article),
    Suggestions(Vec<String>),
}

/// Lookup facade wiring the connectors to the article parser.
pub struct Wiktionary {
    language: String,
    api: ApiConnector,
    html: HtmlConnector,
}

impl Wiktionary {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            api: ApiConnector::new(),
            html: HtmlConnector::default(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Look up a word on Wiktionary.
    ///
    /// Tries the API first. With `only_api` set, a missing article is a
    /// `NotFound` failure; otherwise the search page gets a chance to return
    /// the article or a suggestion list. The word is NFC-normalized before
    /// any request goes out.
    pub fn lookup(&self, word: &str, only_api: bool) -> Result<Lookup, LookupError> {
        if word.trim().is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        let word: String = word.nfc().collect();

        match self.api.fetch(&word) {
            Ok(RawArticle::Markup(markup)) => {
                Ok(Lookup::Article(parse_article(&markup, &word, &self.language)?))
            }
            Ok(RawArticle::Suggestions(suggestions)) => Ok(Lookup::Suggestions(suggestions)),
            Err(FetchError::NotFound(_)) if !only_api => match self.html.fetch(&word)? {
                RawArticle::Markup(markup) => {
                    Ok(Lookup::Article(parse_article(&markup, &word, &self.language)?))
                }
                RawArticle::Suggestions(suggestions) => Ok(Lookup::Suggestions(suggestions)),
            },
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod facade_tests {
    use super::*;

    #[test]
    fn empty_queries_are_rejected_before_any_fetch() {
        let wiki = Wiktionary::new("Finnish");
        assert!(matches!(
            wiki.lookup("   ", true),
            Err(LookupError::EmptyQuery)
        ));
    }
}
