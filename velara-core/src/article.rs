//! Article data structures for the daily deck

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::rust::double_option;
use std::fmt;

/// Number of articles in every published deck
pub const ARTICLES_PER_DECK: usize = 3;

/// A single curated article
///
/// Only `headline` and `summary` are required. Everything else is optional
/// and defaulted by the presentation layer. Optional fields distinguish a
/// missing key (`None`) from an explicit `null` (`Some(None)`), and fields we
/// don't model are kept in `extra`, so a stored article serializes back
/// exactly as it was accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Ordinal rank of significance (1 = most significant)
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub id: Option<Option<u32>>,
    /// Short headline
    pub headline: String,
    /// Categorical code (e.g., "EVO.001")
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub tag: Option<Option<String>>,
    /// Subtitle
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub sub: Option<Option<String>>,
    /// Estimated reading duration as `MM:SS`
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub read_time: Option<Option<String>>,
    /// Impact statement, at most ~2 sentences
    pub summary: String,
    /// Body text, paragraphs separated by a blank line
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub content: Option<Option<String>>,
    /// Palette token, see [`VisualColor`]
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub visual_color: Option<Option<String>>,
    /// Provider fields outside the schema, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    /// Rank, if the provider gave one
    pub fn rank(&self) -> Option<u32> {
        self.id.flatten()
    }
}

/// Error returned when a collection doesn't hold exactly [`ARTICLES_PER_DECK`] articles
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} articles, got {actual}")]
pub struct CollectionSizeError {
    pub expected: usize,
    pub actual: usize,
}

/// The ordered deck of exactly three articles
///
/// Order encodes significance and is never changed after construction.
/// Serializes as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Article>", into = "Vec<Article>")]
pub struct ArticleCollection(Vec<Article>);

impl ArticleCollection {
    pub fn new(articles: Vec<Article>) -> Result<Self, CollectionSizeError> {
        if articles.len() != ARTICLES_PER_DECK {
            return Err(CollectionSizeError {
                expected: ARTICLES_PER_DECK,
                actual: articles.len(),
            });
        }
        Ok(Self(articles))
    }

    pub fn articles(&self) -> &[Article] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.0.iter()
    }
}

impl TryFrom<Vec<Article>> for ArticleCollection {
    type Error = CollectionSizeError;

    fn try_from(articles: Vec<Article>) -> Result<Self, Self::Error> {
        Self::new(articles)
    }
}

impl From<ArticleCollection> for Vec<Article> {
    fn from(collection: ArticleCollection) -> Self {
        collection.0
    }
}

impl<'a> IntoIterator for &'a ArticleCollection {
    type Item = &'a Article;
    type IntoIter = std::slice::Iter<'a, Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The fixed palette articles are tinted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualColor {
    AcidLime,
    Orange,
    Silver,
}

impl VisualColor {
    pub const ALL: [VisualColor; 3] = [VisualColor::AcidLime, VisualColor::Orange, VisualColor::Silver];

    /// Token stored in `visualColor`
    pub fn token(&self) -> &'static str {
        match self {
            VisualColor::AcidLime => "bg-[#ccff00]",
            VisualColor::Orange => "bg-[#ff4d00]",
            VisualColor::Silver => "bg-[#e0e0e0]",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VisualColor::AcidLime => "Acid Lime",
            VisualColor::Orange => "Orange",
            VisualColor::Silver => "Silver",
        }
    }
}

impl fmt::Display for VisualColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
