//! News controller.

use crate::{
    extractors::{ValidatedPath, ValidatedQuery},
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Json, Router};
use newsdesk_core::{ErrorResponse, PaginatedResponse};
use newsdesk_service::{CategoryPath, CategoryQuery, HeadlinesRequest, SearchRequest};
use tracing::debug;

/// Creates the news router, mounted under `/api/news`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/top-headlines", get(top_headlines))
        .route("/search", get(search))
        .route("/categories/:category", get(news_by_category))
}

/// Top headlines, optionally filtered by category.
///
/// Served from fallback articles when the provider is unavailable.
#[utoipa::path(
    get,
    path = "/api/news/top-headlines",
    tag = "news",
    params(HeadlinesRequest),
    responses(
        (status = 200, description = "Headlines page", body = PaginatedResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 429, description = "Too many requests", body = ErrorResponse)
    )
)]
pub async fn top_headlines(
    State(state): State<AppState>,
    ValidatedQuery(request): ValidatedQuery<HeadlinesRequest>,
) -> Json<PaginatedResponse> {
    debug!(country = %request.country, category = ?request.category, "Top headlines requested");
    Json(state.news_service.top_headlines(request).await)
}

/// Article search.
#[utoipa::path(
    get,
    path = "/api/news/search",
    tag = "news",
    params(SearchRequest),
    responses(
        (status = 200, description = "Search results", body = PaginatedResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 429, description = "Too many requests", body = ErrorResponse),
        (status = 500, description = "News provider failure", body = ErrorResponse)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    ValidatedQuery(request): ValidatedQuery<SearchRequest>,
) -> ApiResult<PaginatedResponse> {
    debug!(query = %request.q, sort_by = %request.sort_by, "Search requested");
    ok(state.news_service.search(request).await?)
}

/// Headlines of a single category.
#[utoipa::path(
    get,
    path = "/api/news/categories/{category}",
    tag = "news",
    params(CategoryPath, CategoryQuery),
    responses(
        (status = 200, description = "Headlines page", body = PaginatedResponse),
        (status = 400, description = "Invalid route or query parameters", body = ErrorResponse),
        (status = 429, description = "Too many requests", body = ErrorResponse)
    )
)]
pub async fn news_by_category(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<CategoryPath>,
    ValidatedQuery(query): ValidatedQuery<CategoryQuery>,
) -> Json<PaginatedResponse> {
    let category = path.category.to_lowercase();
    debug!(category = %category, country = %query.country, "Category headlines requested");

    Json(
        state
            .news_service
            .news_by_category(category, query.country, query.page, query.page_size)
            .await,
    )
}
