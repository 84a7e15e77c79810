//! News service trait definition.

use crate::dto::{HeadlinesRequest, SearchRequest};
use async_trait::async_trait;
use newsdesk_core::{NewsdeskResult, PaginatedResponse};
use shaku::Interface;

/// News reads with a response cache in front of the provider.
#[async_trait]
pub trait NewsService: Interface + Send + Sync {
    /// Top headlines. Provider failures are answered with fallback articles,
    /// so this never fails.
    async fn top_headlines(&self, request: HeadlinesRequest) -> PaginatedResponse;

    /// Article search. Provider failures are returned to the caller.
    async fn search(&self, request: SearchRequest) -> NewsdeskResult<PaginatedResponse>;

    /// Headlines of one category.
    async fn news_by_category(
        &self,
        category: String,
        country: String,
        page: u32,
        page_size: u32,
    ) -> PaginatedResponse {
        self.top_headlines(HeadlinesRequest {
            country,
            category: Some(category),
            page,
            page_size,
        })
        .await
    }
}
