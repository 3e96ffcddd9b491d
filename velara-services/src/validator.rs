//! Response Validator
//!
//! Turns untrusted provider output into an [`ArticleCollection`]. Every
//! failure is converted into a [`ValidationError`]; nothing here panics.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;
use velara_core::{Article, ArticleCollection, ARTICLES_PER_DECK};

/// Why a provider response was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Response is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("Response object has several properties ({}), cannot pick the article list", .keys.join(", "))]
    AmbiguousShape { keys: Vec<String> },

    #[error("Response does not contain an article array")]
    NotAnArray,

    #[error("Expected {expected} articles, got {actual}")]
    WrongCount { expected: usize, actual: usize },

    #[error("Article {index} is not an object")]
    NotARecord { index: usize },

    #[error("Article {index} has no headline")]
    MissingHeadline { index: usize },

    #[error("Article {index} has no summary")]
    MissingSummary { index: usize },

    #[error("Article {index} does not match the article schema: {message}")]
    InvalidArticle { index: usize, message: String },
}

impl ValidationError {
    /// Stable reason code
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MalformedJson(_) => "malformed-json",
            ValidationError::AmbiguousShape { .. } => "ambiguous-shape",
            ValidationError::NotAnArray => "not-an-array",
            ValidationError::WrongCount { .. } => "wrong-count",
            ValidationError::NotARecord { .. } => "not-a-record",
            ValidationError::MissingHeadline { .. } => "missing-headline",
            ValidationError::MissingSummary { .. } => "missing-summary",
            ValidationError::InvalidArticle { .. } => "invalid-article",
        }
    }
}

/// Validator for generated article decks
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseValidator;

impl ResponseValidator {
    pub fn validate(raw: &str) -> Result<ArticleCollection, ValidationError> {
        let value: Value = serde_json::from_str(strip_code_fence(raw))
            .map_err(|e| ValidationError::MalformedJson(e.to_string()))?;

        let items = resolve_sequence(value)?;

        if items.len() != ARTICLES_PER_DECK {
            return Err(ValidationError::WrongCount {
                expected: ARTICLES_PER_DECK,
                actual: items.len(),
            });
        }

        let articles = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| check_article(index, item))
            .collect::<Result<Vec<_>, _>>()?;

        check_ranks(&articles)?;

        ArticleCollection::new(articles).map_err(|e| ValidationError::WrongCount {
            expected: e.expected,
            actual: e.actual,
        })
    }
}

/// Drop a surrounding markdown code fence (```json ... ```), if any
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(newline) = rest.find('\n') else {
        return trimmed;
    };

    rest[newline + 1..]
        .trim_end()
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Locate the article array, checking shapes in order:
/// a bare array, then an object with one array-valued property.
fn resolve_sequence(value: Value) -> Result<Vec<Value>, ValidationError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(map) if map.len() == 1 => match map.into_iter().next() {
            Some((_, Value::Array(items))) => Ok(items),
            _ => Err(ValidationError::NotAnArray),
        },
        Value::Object(map) if map.len() > 1 => {
            let mut keys: Vec<String> = map.keys().cloned().collect();
            keys.sort();
            Err(ValidationError::AmbiguousShape { keys })
        }
        _ => Err(ValidationError::NotAnArray),
    }
}

fn check_article(index: usize, item: Value) -> Result<Article, ValidationError> {
    let record = item
        .as_object()
        .ok_or(ValidationError::NotARecord { index })?;

    let has_headline = record
        .get("headline")
        .and_then(Value::as_str)
        .is_some_and(|h| !h.trim().is_empty());
    if !has_headline {
        return Err(ValidationError::MissingHeadline { index });
    }

    if !record.get("summary").is_some_and(Value::is_string) {
        return Err(ValidationError::MissingSummary { index });
    }

    serde_json::from_value(item).map_err(|e| ValidationError::InvalidArticle {
        index,
        message: e.to_string(),
    })
}

/// Ranks, where given, must be positive and distinct
fn check_ranks(articles: &[Article]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for (index, article) in articles.iter().enumerate() {
        let Some(rank) = article.rank() else {
            continue;
        };
        if rank == 0 {
            return Err(ValidationError::InvalidArticle {
                index,
                message: "id must be a positive integer".to_string(),
            });
        }
        if !seen.insert(rank) {
            return Err(ValidationError::InvalidArticle {
                index,
                message: format!("duplicate id {}", rank),
            });
        }
    }

    Ok(())
}
