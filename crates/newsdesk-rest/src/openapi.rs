//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{HealthResponse, RedisHealth};
use newsdesk_core::{Article, ArticlePage, ErrorResponse, FieldError, PaginatedResponse, SortBy};
use utoipa::OpenApi;

/// OpenAPI documentation for the Newsdesk API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "News Reader API",
        version = "1.0.0",
        description = "Cached headlines and search over TheNewsAPI",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::news_controller::top_headlines,
        crate::controllers::news_controller::search,
        crate::controllers::news_controller::news_by_category,
        crate::controllers::health_controller::health_check,
    ),
    components(
        schemas(
            Article,
            ArticlePage,
            PaginatedResponse,
            SortBy,
            ErrorResponse,
            FieldError,
            HealthResponse,
            RedisHealth,
        )
    ),
    tags(
        (name = "news", description = "Headlines and search"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_news_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| *p == "/api/news/top-headlines"));
        assert!(paths.iter().any(|p| *p == "/api/news/search"));
        assert!(paths.iter().any(|p| *p == "/api/news/categories/{category}"));
        assert!(paths.iter().any(|p| *p == "/api/health"));
    }
}
