//! News domain types: articles, the paginated response envelope, and
//! cache bookkeeping.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories accepted by the headlines and category endpoints.
pub const VALID_CATEGORIES: &[&str] = &[
    "business",
    "entertainment",
    "general",
    "health",
    "science",
    "sports",
    "technology",
];

/// Placeholder for missing author or source names.
pub const UNKNOWN: &str = "Unknown";

/// Returns true if `category` is a known category (case-insensitive).
#[must_use]
pub fn is_valid_category(category: &str) -> bool {
    VALID_CATEGORIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(category))
}

/// A news article in canonical form.
///
/// Missing optional text fields are represented as empty strings; `url` is
/// the identity used for de-duplication and as a list key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub content: String,
    pub image_url: Option<String>,
    pub url: String,
    pub author: String,
    pub source: String,
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub published_at: String,
    pub updated_at: Option<String>,
}

impl Article {
    /// Returns true if title, url and publish timestamp are all present.
    #[must_use]
    pub fn has_required_fields(&self) -> bool {
        !self.title.is_empty() && !self.url.is_empty() && !self.published_at.is_empty()
    }
}

/// Sort order for search requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Relevancy,
    Popularity,
    PublishedAt,
}

impl SortBy {
    /// Returns the wire name of this sort order.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Relevancy => "relevancy",
            Self::Popularity => "popularity",
            Self::PublishedAt => "publishedAt",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevancy" => Ok(Self::Relevancy),
            "popularity" => Ok(Self::Popularity),
            "publishedAt" => Ok(Self::PublishedAt),
            other => Err(format!("Invalid sort order: {}", other)),
        }
    }
}

/// One page of articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    /// Total reported by the provider, not the length of `articles`.
    pub total_results: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Response envelope for every news read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaginatedResponse {
    pub success: bool,
    pub data: ArticlePage,
    pub cached: bool,
}

impl PaginatedResponse {
    /// Wraps a freshly fetched page.
    #[must_use]
    pub fn fresh(articles: Vec<Article>, total_results: u64, page: u32, page_size: u32) -> Self {
        Self {
            success: true,
            data: ArticlePage {
                articles,
                total_results,
                page,
                page_size,
            },
            cached: false,
        }
    }

    /// Marks this response as served from cache.
    #[must_use]
    pub fn into_cached(mut self) -> Self {
        self.cached = true;
        self
    }
}

/// Bookkeeping stored next to a cached value under `metadata:{key}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheMetadata {
    pub key: String,
    /// TTL in seconds the entry was written with.
    pub ttl: u64,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
    pub hits: u64,
}

impl CacheMetadata {
    /// Creates metadata for an entry written now.
    #[must_use]
    pub fn new(key: impl Into<String>, ttl: u64) -> Self {
        Self {
            key: key.into(),
            ttl,
            created_at: Utc::now().timestamp_millis(),
            hits: 0,
        }
    }

    /// Key the metadata itself is stored under.
    #[must_use]
    pub fn storage_key(key: &str) -> String {
        format!("metadata:{}", key)
    }

    /// Records one cache hit.
    pub fn record_hit(&mut self) {
        self.hits = self.hits.saturating_add(1);
    }
}
