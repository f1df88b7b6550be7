use thiserror::Error;

use crate::grammar::Tense;

/// Failures of the conjugation engine. These abort a single lookup only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConjugationError {
    /// No suffix pattern recognized the infinitive.
    #[error("could not determine the verb type of \"{0}\"")]
    UnclassifiedVerb(String),
    /// Only the present tense is implemented.
    #[error("conjugation in the {0:?} tense is not supported")]
    UnsupportedTense(Tense),
}

/// Structural-absence conditions raised while extracting an article.
///
/// None of these mean the document is broken; they mean "this article lacks
/// X" and callers are expected to recover locally (skip the table, report
/// the missing language, ...). The one exception is
/// [`ParseError::InconsistentPosHeadingLevels`], where the document
/// structure is ambiguous and the parser refuses to guess.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no explanations exist for the language: {0}")]
    LanguageNotFound(String),
    #[error("no part-of-speech headings present")]
    NoPosHeadings,
    #[error("the part-of-speech headings are placed at different header levels")]
    InconsistentPosHeadingLevels,
    #[error("no translations present")]
    NoTranslations,
    #[error("no inflection table present")]
    NoInflectionTable,
}

/// Failures while retrieving raw article markup from a source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("the word \"{0}\" does not exist on Wiktionary")]
    NotFound(String),
    #[error("request failed")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(String),
}

/// Top-level lookup failures, wrapping fetch and parse errors.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("the search string cannot be empty")]
    EmptyQuery,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
