//! Cache key generators.
//!
//! Keys are built by plain concatenation, so a key without a category can
//! never equal a key with one.

use crate::dto::{HeadlinesRequest, SearchRequest};

/// Prefix for all news cache keys.
const CACHE_PREFIX: &str = "news";

/// Key for top headlines of a country, optionally narrowed to a category.
#[must_use]
pub fn top_headlines(country: &str, category: Option<&str>) -> String {
    match category.filter(|c| !c.is_empty()) {
        Some(category) => format!("{}:headlines:{}:{}", CACHE_PREFIX, country, category),
        None => format!("{}:headlines:{}", CACHE_PREFIX, country),
    }
}

/// Key for a search. The query is lowercased so searches differing only in
/// case share an entry.
#[must_use]
pub fn search(query: &str) -> String {
    format!("{}:search:{}", CACHE_PREFIX, query.to_lowercase())
}

/// Key for a headlines request.
///
/// With `page_aware` unset, every page of the same country and category
/// shares one entry.
#[must_use]
pub fn for_headlines(request: &HeadlinesRequest, page_aware: bool) -> String {
    let key = top_headlines(&request.country, request.category.as_deref());
    if page_aware {
        format!("{}{}", key, page_suffix(request.page, request.page_size))
    } else {
        key
    }
}

/// Key for a search request.
///
/// With `page_aware` unset, every page and sort order of the same query
/// shares one entry.
#[must_use]
pub fn for_search(request: &SearchRequest, page_aware: bool) -> String {
    let key = search(&request.q);
    if page_aware {
        format!(
            "{}{}:{}",
            key,
            page_suffix(request.page, request.page_size),
            request.sort_by
        )
    } else {
        key
    }
}

fn page_suffix(page: u32, page_size: u32) -> String {
    format!(":p{}:s{}", page, page_size)
}
