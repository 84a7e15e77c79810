//! News service implementation.

use crate::articles::validate_and_clean;
use crate::cache::{cache_keys, CacheExt, CacheStore};
use crate::dto::{HeadlinesRequest, SearchRequest};
use crate::fallback::mock_articles;
use crate::news_service::NewsService;
use crate::upstream::{NewsProvider, UpstreamResponse, UpstreamStatus};
use async_trait::async_trait;
use newsdesk_core::{NewsdeskError, NewsdeskResult, PaginatedResponse};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default lifetime of cached responses (10 minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Cache-aside news service.
///
/// Cache failures are logged and treated as misses, so an unavailable cache
/// only means every read goes to the provider.
#[derive(Component)]
#[shaku(interface = NewsService)]
pub struct NewsServiceImpl {
    #[shaku(inject)]
    cache: Arc<dyn CacheStore>,
    #[shaku(inject)]
    provider: Arc<dyn NewsProvider>,
    #[shaku(default = DEFAULT_CACHE_TTL)]
    cache_ttl: Duration,
    #[shaku(default = false)]
    page_aware_keys: bool,
}

impl NewsServiceImpl {
    /// Creates a news service with the default TTL and page-agnostic keys.
    pub fn new(cache: Arc<dyn CacheStore>, provider: Arc<dyn NewsProvider>) -> Self {
        Self {
            cache,
            provider,
            cache_ttl: DEFAULT_CACHE_TTL,
            page_aware_keys: false,
        }
    }

    /// Sets the lifetime of cached responses.
    #[must_use]
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    /// Includes page, page size and sort order in cache keys.
    #[must_use]
    pub fn with_page_aware_keys(mut self, page_aware_keys: bool) -> Self {
        self.page_aware_keys = page_aware_keys;
        self
    }

    async fn read_cache(&self, key: &str) -> Option<PaginatedResponse> {
        match self.cache.get::<PaginatedResponse>(key).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache get error");
                None
            }
        }
    }

    async fn write_cache(&self, key: &str, response: &PaginatedResponse) {
        if let Err(e) = self.cache.set(key, response, self.cache_ttl).await {
            warn!(key = %key, error = %e, "Cache set error");
        }
    }

    async fn fetch_headlines(&self, request: &HeadlinesRequest) -> NewsdeskResult<PaginatedResponse> {
        let upstream = self.provider.top_headlines(request).await?;
        into_page(upstream, request.page, request.page_size)
    }

    async fn fetch_search(&self, request: &SearchRequest) -> NewsdeskResult<PaginatedResponse> {
        let upstream = self.provider.search(request).await?;
        into_page(upstream, request.page, request.page_size)
    }
}

/// Validates a provider response into a fresh page.
fn into_page(upstream: UpstreamResponse, page: u32, page_size: u32) -> NewsdeskResult<PaginatedResponse> {
    if let UpstreamStatus::Error { code, message } = upstream.status {
        error!(code = ?code, message = ?message, "News API error");
        return Err(NewsdeskError::external(
            "news_api",
            message.unwrap_or_else(|| "Failed to fetch news".to_string()),
        ));
    }

    Ok(PaginatedResponse::fresh(
        validate_and_clean(upstream.articles),
        upstream.total_results,
        page,
        page_size,
    ))
}

/// Fallback page of fixed articles.
fn fallback_page(page: u32, page_size: u32) -> PaginatedResponse {
    let articles = mock_articles();
    let total = articles.len() as u64;
    PaginatedResponse::fresh(articles, total, page, page_size)
}

#[async_trait]
impl NewsService for NewsServiceImpl {
    async fn top_headlines(&self, request: HeadlinesRequest) -> PaginatedResponse {
        let key = cache_keys::for_headlines(&request, self.page_aware_keys);

        if let Some(cached) = self.read_cache(&key).await {
            debug!(key = %key, "Serving headlines from cache");
            return cached.into_cached();
        }

        match self.fetch_headlines(&request).await {
            Ok(response) => {
                self.write_cache(&key, &response).await;
                info!(
                    key = %key,
                    articles = response.data.articles.len(),
                    "Fetched headlines"
                );
                response
            }
            Err(e) => {
                warn!(
                    country = %request.country,
                    category = ?request.category,
                    error = %e,
                    "Failed to fetch from news API, using mock data"
                );
                fallback_page(request.page, request.page_size)
            }
        }
    }

    async fn search(&self, request: SearchRequest) -> NewsdeskResult<PaginatedResponse> {
        let key = cache_keys::for_search(&request, self.page_aware_keys);

        if let Some(cached) = self.read_cache(&key).await {
            debug!(key = %key, "Serving search from cache");
            return Ok(cached.into_cached());
        }

        let response = self.fetch_search(&request).await.map_err(|e| {
            error!(query = %request.q, error = %e, "Search failed");
            e
        })?;

        self.write_cache(&key, &response).await;
        info!(
            key = %key,
            articles = response.data.articles.len(),
            "Fetched search results"
        );
        Ok(response)
    }
}

impl std::fmt::Debug for NewsServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsServiceImpl")
            .field("cache_ttl", &self.cache_ttl)
            .field("page_aware_keys", &self.page_aware_keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::MockNewsProvider;
    use newsdesk_core::{Article, CacheMetadata, SortBy};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory cache store recording the TTL of every write.
    #[derive(Default)]
    struct InMemoryCache {
        entries: Mutex<HashMap<String, (String, Duration)>>,
    }

    impl InMemoryCache {
        fn ttl_of(&self, key: &str) -> Option<Duration> {
            self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
        }

        fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CacheStore for InMemoryCache {
        async fn get_raw(&self, key: &str) -> NewsdeskResult<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone()))
        }

        async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> NewsdeskResult<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), ttl));
            Ok(())
        }

        async fn delete(&self, key: &str) -> NewsdeskResult<bool> {
            Ok(self.entries.lock().unwrap().remove(key).is_some())
        }

        async fn delete_pattern(&self, pattern: &str) -> NewsdeskResult<u64> {
            let prefix = pattern.trim_end_matches('*');
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|k, _| !k.starts_with(prefix));
            Ok((before - entries.len()) as u64)
        }

        async fn clear(&self) -> NewsdeskResult<()> {
            self.entries.lock().unwrap().clear();
            Ok(())
        }

        async fn exists(&self, key: &str) -> NewsdeskResult<bool> {
            Ok(self.entries.lock().unwrap().contains_key(key))
        }

        async fn ping(&self) -> NewsdeskResult<bool> {
            Ok(true)
        }

        async fn metadata(&self, _key: &str) -> NewsdeskResult<Option<CacheMetadata>> {
            Ok(None)
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

    /// Cache store whose every call fails, as with a lost connection.
    struct UnreachableCache;

    #[async_trait]
    impl CacheStore for UnreachableCache {
        async fn get_raw(&self, _key: &str) -> NewsdeskResult<Option<String>> {
            Err(NewsdeskError::cache("connection refused"))
        }

        async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> NewsdeskResult<()> {
            Err(NewsdeskError::cache("connection refused"))
        }

        async fn delete(&self, _key: &str) -> NewsdeskResult<bool> {
            Err(NewsdeskError::cache("connection refused"))
        }

        async fn delete_pattern(&self, _pattern: &str) -> NewsdeskResult<u64> {
            Err(NewsdeskError::cache("connection refused"))
        }

        async fn clear(&self) -> NewsdeskResult<()> {
            Err(NewsdeskError::cache("connection refused"))
        }

        async fn exists(&self, _key: &str) -> NewsdeskResult<bool> {
            Err(NewsdeskError::cache("connection refused"))
        }

        async fn ping(&self) -> NewsdeskResult<bool> {
            Err(NewsdeskError::cache("connection refused"))
        }

        async fn metadata(&self, _key: &str) -> NewsdeskResult<Option<CacheMetadata>> {
            Err(NewsdeskError::cache("connection refused"))
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

    fn article(title: &str, url: &str) -> Article {
        Article {
            title: title.to_string(),
            url: url.to_string(),
            published_at: "2024-05-01T10:00:00Z".to_string(),
            source: "example.com".to_string(),
            ..Article::default()
        }
    }

    /// Two valid articles and one without a title.
    fn upstream_page() -> UpstreamResponse {
        UpstreamResponse::ok(
            vec![
                article("First", "https://example.com/1"),
                article("", "https://example.com/untitled"),
                article("Second", "https://example.com/2"),
            ],
            57,
        )
    }

    fn service(cache: Arc<dyn CacheStore>, provider: MockNewsProvider) -> NewsServiceImpl {
        NewsServiceImpl::new(cache, Arc::new(provider))
    }

    #[tokio::test]
    async fn test_headlines_miss_then_hit() {
        let mut provider = MockNewsProvider::new();
        provider
            .expect_top_headlines()
            .times(1)
            .returning(|_| Ok(upstream_page()));

        let cache = Arc::new(InMemoryCache::default());
        let service = service(cache.clone(), provider);

        let first = service.top_headlines(HeadlinesRequest::default()).await;
        assert!(first.success);
        assert!(!first.cached);
        assert_eq!(first.data.articles.len(), 2);
        assert_eq!(first.data.total_results, 57);
        assert_eq!(cache.ttl_of("news:headlines:us"), Some(DEFAULT_CACHE_TTL));

        let second = service.top_headlines(HeadlinesRequest::default()).await;
        assert!(second.cached);
        assert_eq!(second.data.articles, first.data.articles);
    }

    #[tokio::test]
    async fn test_headlines_transport_error_falls_back() {
        let mut provider = MockNewsProvider::new();
        provider
            .expect_top_headlines()
            .times(2)
            .returning(|_| Err(NewsdeskError::external("TheNewsAPI", "connection reset")));

        let cache = Arc::new(InMemoryCache::default());
        let service = service(cache.clone(), provider);

        let request = HeadlinesRequest {
            page: 2,
            page_size: 10,
            ..HeadlinesRequest::default()
        };
        let response = service.top_headlines(request.clone()).await;
        assert!(response.success);
        assert!(!response.cached);
        assert_eq!(response.data.articles.len(), 3);
        assert_eq!(response.data.total_results, 3);
        assert_eq!(response.data.page, 2);
        assert_eq!(response.data.page_size, 10);

        // Fallback pages are not cached, so the provider is asked again.
        assert_eq!(cache.len(), 0);
        let again = service.top_headlines(request).await;
        assert_eq!(again.data.articles.len(), 3);
    }

    #[tokio::test]
    async fn test_headlines_error_status_falls_back() {
        let mut provider = MockNewsProvider::new();
        provider.expect_top_headlines().times(1).returning(|_| {
            Ok(UpstreamResponse::error(
                Some("invalid_api_token".to_string()),
                Some("Invalid API token.".to_string()),
            ))
        });

        let service = service(Arc::new(InMemoryCache::default()), provider);
        let response = service.top_headlines(HeadlinesRequest::default()).await;
        assert_eq!(response.data.total_results, 3);
        assert_eq!(response.data.articles[0].url, "https://example.com/article1");
    }

    #[tokio::test]
    async fn test_search_error_is_returned() {
        let mut provider = MockNewsProvider::new();
        provider
            .expect_search()
            .times(1)
            .returning(|_| Err(NewsdeskError::external("TheNewsAPI", "connection reset")));

        let cache = Arc::new(InMemoryCache::default());
        let service = service(cache.clone(), provider);

        let request = SearchRequest {
            q: "rust".to_string(),
            ..SearchRequest::default()
        };
        let result = service.search(request).await;
        assert!(matches!(result, Err(NewsdeskError::ExternalService { .. })));
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn test_search_error_status_is_returned() {
        let mut provider = MockNewsProvider::new();
        provider
            .expect_search()
            .returning(|_| Ok(UpstreamResponse::error(None, None)));

        let service = service(Arc::new(InMemoryCache::default()), provider);
        let request = SearchRequest {
            q: "rust".to_string(),
            ..SearchRequest::default()
        };
        match service.search(request).await {
            Err(NewsdeskError::ExternalService { message, .. }) => {
                assert_eq!(message, "Failed to fetch news");
            }
            other => panic!("Expected ExternalService, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_shares_entry_across_case() {
        let mut provider = MockNewsProvider::new();
        provider
            .expect_search()
            .withf(|request| request.q == "AI")
            .times(1)
            .returning(|_| Ok(upstream_page()));

        let cache = Arc::new(InMemoryCache::default());
        let service = service(cache.clone(), provider);

        let upper = service
            .search(SearchRequest {
                q: "AI".to_string(),
                ..SearchRequest::default()
            })
            .await
            .unwrap();
        assert!(!upper.cached);

        let lower = service
            .search(SearchRequest {
                q: "ai".to_string(),
                sort_by: SortBy::PublishedAt,
                page: 4,
                ..SearchRequest::default()
            })
            .await
            .unwrap();
        assert!(lower.cached);
        assert_eq!(lower.data, upper.data);
        assert!(cache.ttl_of("news:search:ai").is_some());
    }

    #[tokio::test]
    async fn test_unreachable_cache_falls_through_to_provider() {
        let mut provider = MockNewsProvider::new();
        provider
            .expect_top_headlines()
            .times(2)
            .returning(|_| Ok(upstream_page()));
        provider
            .expect_search()
            .times(1)
            .returning(|_| Ok(upstream_page()));

        let service = service(Arc::new(UnreachableCache), provider);

        let headlines = service.top_headlines(HeadlinesRequest::default()).await;
        assert!(!headlines.cached);
        assert_eq!(headlines.data.articles.len(), 2);
        assert_eq!(headlines.data.total_results, 57);

        let again = service.top_headlines(HeadlinesRequest::default()).await;
        assert_eq!(again.data.articles.len(), 2);

        let search = service
            .search(SearchRequest {
                q: "rust".to_string(),
                ..SearchRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(search.data.articles.len(), 2);
    }

    #[tokio::test]
    async fn test_news_by_category_delegates_to_headlines() {
        let mut provider = MockNewsProvider::new();
        provider
            .expect_top_headlines()
            .withf(|request| {
                request.category.as_deref() == Some("sports")
                    && request.country == "gb"
                    && request.page == 3
                    && request.page_size == 5
            })
            .times(1)
            .returning(|_| Ok(upstream_page()));

        let cache = Arc::new(InMemoryCache::default());
        let service = service(cache.clone(), provider);

        let response = service
            .news_by_category("sports".to_string(), "gb".to_string(), 3, 5)
            .await;
        assert_eq!(response.data.page, 3);
        assert_eq!(response.data.page_size, 5);
        assert!(cache.ttl_of("news:headlines:gb:sports").is_some());
    }

    #[tokio::test]
    async fn test_page_aware_keys_separate_pages() {
        let mut provider = MockNewsProvider::new();
        provider
            .expect_top_headlines()
            .times(2)
            .returning(|_| Ok(upstream_page()));

        let cache = Arc::new(InMemoryCache::default());
        let service = NewsServiceImpl::new(cache.clone(), Arc::new(provider))
            .with_page_aware_keys(true)
            .with_cache_ttl(Duration::from_secs(30));

        service.top_headlines(HeadlinesRequest::default()).await;
        service
            .top_headlines(HeadlinesRequest {
                page: 2,
                ..HeadlinesRequest::default()
            })
            .await;

        assert_eq!(
            cache.ttl_of("news:headlines:us:p1:s20"),
            Some(Duration::from_secs(30))
        );
        assert!(cache.ttl_of("news:headlines:us:p2:s20").is_some());
    }

    #[tokio::test]
    async fn test_empty_result_is_not_an_error() {
        let mut provider = MockNewsProvider::new();
        provider
            .expect_search()
            .returning(|_| Ok(UpstreamResponse::ok(Vec::new(), 0)));

        let service = service(Arc::new(InMemoryCache::default()), provider);
        let response = service
            .search(SearchRequest {
                q: "nothing matches".to_string(),
                ..SearchRequest::default()
            })
            .await
            .unwrap();
        assert!(response.success);
        assert!(response.data.articles.is_empty());
        assert_eq!(response.data.total_results, 0);
    }
}
