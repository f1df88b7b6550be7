//! Article sources: how raw article markup gets into the parser.
//!
//! Two connectors against en.wiktionary.org — the MediaWiki API (rendered
//! revision content) and the plain search page, which is the one that can
//! come back with "did you mean" suggestions instead of an article. All
//! fetching is synchronous; retry policy, if any, belongs to callers.

use lazy_static::lazy_static;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;

lazy_static! {
    static ref SEL_FIRST_HEADING: Selector = Selector::parse("h1#firstHeading").unwrap();
    static ref SEL_NONE_FOUND: Selector = Selector::parse(".mw-search-nonefound").unwrap();
    static ref SEL_SEARCH_RESULT: Selector =
        Selector::parse("ul.mw-search-results li div a").unwrap();
}

/// What a source hands back: either the raw article markup, or — when no
/// exact article exists but the word appears elsewhere — alternate words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawArticle {
    Markup(String),
    Suggestions(Vec<String>),
}

/// Anything that can turn a word into raw article markup.
pub trait ArticleSource {
    fn fetch(&self, word: &str) -> Result<RawArticle, FetchError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// MediaWiki API connector
// ─────────────────────────────────────────────────────────────────────────────

pub struct ApiConnector {
    client: Client,
    endpoint: String,
}

impl ApiConnector {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            endpoint: "https://en.wiktionary.org/w/api.php".to_string(),
        }
    }
}

impl Default for ApiConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleSource for ApiConnector {
    /// Fetch the rendered article through the revisions API. A page that
    /// exists but has no revisions content, or does not exist at all, is
    /// `NotFound`.
    fn fetch(&self, word: &str) -> Result<RawArticle, FetchError> {
        debug!(word, "collecting the raw article using the API");
        let response: Value = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "json"),
                ("action", "query"),
                ("prop", "revisions"),
                ("titles", word),
                ("rvprop", "content"),
                ("rvparse", "1"),
                ("redirects", "true"),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        let pages = response["query"]["pages"]
            .as_object()
            .ok_or_else(|| FetchError::UnexpectedResponse("no query.pages in API response".into()))?;
        let page = pages
            .values()
            .next()
            .ok_or_else(|| FetchError::UnexpectedResponse("empty query.pages in API response".into()))?;
        match page["revisions"][0]["*"].as_str() {
            Some(markup) => {
                debug!(word, "article found");
                Ok(RawArticle::Markup(markup.to_string()))
            }
            None => Err(FetchError::NotFound(word.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Search-page connector
// ─────────────────────────────────────────────────────────────────────────────

pub struct HtmlConnector {
    client: Client,
    base_url: String,
}

impl HtmlConnector {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for HtmlConnector {
    fn default() -> Self {
        Self::new("https://en.wiktionary.org")
    }
}

impl ArticleSource for HtmlConnector {
    /// Fetch through `Special:Search` with exact-match redirect. Landing on
    /// the search-results page means there is no article; it either lists
    /// other articles containing the word (returned as suggestions) or
    /// nothing at all (`NotFound`).
    fn fetch(&self, word: &str) -> Result<RawArticle, FetchError> {
        debug!(word, "collecting the raw article using the search page");
        let url = format!("{}/wiki/Special:Search", self.base_url);
        let body = self
            .client
            .get(&url)
            .query(&[("search", word), ("go", "Try exact match")])
            .send()?
            .error_for_status()?
            .text()?;

        let doc = Html::parse_document(&body);
        let heading = doc
            .select(&SEL_FIRST_HEADING)
            .next()
            .map(|h| h.text().collect::<String>());
        if heading.as_deref().map(str::trim) != Some("Search results") {
            debug!(word, "article found");
            return Ok(RawArticle::Markup(body));
        }

        if doc.select(&SEL_NONE_FOUND).next().is_some() {
            return Err(FetchError::NotFound(word.to_string()));
        }
        let suggestions: Vec<String> = doc
            .select(&SEL_SEARCH_RESULT)
            .map(|a| a.text().collect::<String>())
            .collect();
        if suggestions.is_empty() {
            return Err(FetchError::NotFound(word.to_string()));
        }
        debug!(word, count = suggestions.len(), "suggestions found");
        Ok(RawArticle::Suggestions(suggestions))
    }
}
