//! Upstream news provider.
//!
//! The provider is reached over HTTP and normalized into canonical
//! [`Article`]s. Transport and HTTP failures come back as `Err`; a body that
//! reports an error comes back as `Ok` with [`UpstreamStatus::Error`].

mod the_news_api;

pub use the_news_api::{build_http_client, TheNewsApiClient, TheNewsApiClientParameters};

use crate::dto::{HeadlinesRequest, SearchRequest};
use async_trait::async_trait;
use newsdesk_core::{Article, NewsdeskResult};
use shaku::Interface;

/// Outcome reported by the provider in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamStatus {
    Ok,
    Error {
        code: Option<String>,
        message: Option<String>,
    },
}

/// Normalized provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: UpstreamStatus,
    /// Total matches reported by the provider.
    pub total_results: u64,
    pub articles: Vec<Article>,
}

impl UpstreamResponse {
    /// A successful response.
    #[must_use]
    pub fn ok(articles: Vec<Article>, total_results: u64) -> Self {
        Self {
            status: UpstreamStatus::Ok,
            total_results,
            articles,
        }
    }

    /// A response whose body reported an error.
    #[must_use]
    pub fn error(code: Option<String>, message: Option<String>) -> Self {
        Self {
            status: UpstreamStatus::Error { code, message },
            total_results: 0,
            articles: Vec::new(),
        }
    }
}

/// News provider client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsProvider: Interface + Send + Sync {
    /// Fetches top headlines for a country, optionally within a category.
    async fn top_headlines(&self, request: &HeadlinesRequest) -> NewsdeskResult<UpstreamResponse>;

    /// Searches articles.
    async fn search(&self, request: &SearchRequest) -> NewsdeskResult<UpstreamResponse>;
}
