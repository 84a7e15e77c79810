//! News request DTOs.
//!
//! These double as the query-string shapes of the REST endpoints.

use newsdesk_core::validation::rules;
use newsdesk_core::{sanitize, sanitize_opt, Sanitize, SortBy};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

/// Default country for headlines.
pub const DEFAULT_COUNTRY: &str = "us";
/// Default page number.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Largest page size accepted.
pub const MAX_PAGE_SIZE: u32 = 100;

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

const fn default_page() -> u32 {
    DEFAULT_PAGE
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Top headlines request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HeadlinesRequest {
    /// Country code passed through to the provider.
    #[serde(default = "default_country")]
    #[param(default = "us", example = "us")]
    pub country: String,

    /// Optional category filter.
    #[param(example = "technology")]
    pub category: Option<String>,

    /// Page number, starting at 1.
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    #[param(default = 1, minimum = 1)]
    pub page: u32,

    /// Articles per page.
    #[serde(rename = "pageSize", default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub page_size: u32,
}

impl Default for HeadlinesRequest {
    fn default() -> Self {
        Self {
            country: default_country(),
            category: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Sanitize for HeadlinesRequest {
    fn sanitized(self) -> Self {
        Self {
            country: sanitize(&self.country),
            category: sanitize_opt(self.category),
            ..self
        }
    }
}

/// Search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchRequest {
    /// Search terms.
    #[serde(default)]
    #[validate(length(min = 1, message = "Search query is required"))]
    #[param(example = "artificial intelligence")]
    pub q: String,

    /// Optional language filter.
    #[param(example = "en")]
    pub language: Option<String>,

    /// Page number, starting at 1.
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    #[param(default = 1, minimum = 1)]
    pub page: u32,

    /// Articles per page.
    #[serde(rename = "pageSize", default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub page_size: u32,

    /// Result ordering.
    #[serde(default)]
    #[param(inline)]
    pub sort_by: SortBy,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            q: String::new(),
            language: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: SortBy::default(),
        }
    }
}

impl Sanitize for SearchRequest {
    fn sanitized(self) -> Self {
        Self {
            q: sanitize(&self.q),
            language: sanitize_opt(self.language),
            ..self
        }
    }
}

/// Query parameters of the category endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    /// Country code passed through to the provider.
    #[serde(default = "default_country")]
    #[param(default = "us", example = "us")]
    pub country: String,

    /// Page number, starting at 1.
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    #[param(default = 1, minimum = 1)]
    pub page: u32,

    /// Articles per page.
    #[serde(rename = "pageSize", default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub page_size: u32,
}

impl Default for CategoryQuery {
    fn default() -> Self {
        Self {
            country: default_country(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Sanitize for CategoryQuery {
    fn sanitized(self) -> Self {
        Self {
            country: sanitize(&self.country),
            ..self
        }
    }
}

/// Path parameters of the category endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct CategoryPath {
    /// One of the known categories, case-insensitive.
    #[validate(custom(function = "rules::known_category"))]
    #[param(example = "technology")]
    pub category: String,
}

impl Sanitize for CategoryPath {
    fn sanitized(self) -> Self {
        Self {
            category: sanitize(&self.category),
        }
    }
}
