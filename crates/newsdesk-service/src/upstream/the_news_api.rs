//! TheNewsAPI client.

use super::{NewsProvider, UpstreamResponse};
use crate::dto::{HeadlinesRequest, SearchRequest};
use async_trait::async_trait;
use newsdesk_core::{Article, NewsdeskError, NewsdeskResult, SortBy, UNKNOWN};
use reqwest::Client;
use serde::Deserialize;
use shaku::Component;
use std::time::Duration;
use tracing::{debug, error};

const SERVICE: &str = "TheNewsAPI";

/// Builds the HTTP client used for provider calls.
pub fn build_http_client(timeout: Duration, user_agent: &str) -> NewsdeskResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| NewsdeskError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Client for TheNewsAPI (`/news/top` and `/news`).
#[derive(Component)]
#[shaku(interface = NewsProvider)]
pub struct TheNewsApiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl TheNewsApiClient {
    /// Creates a client with its own HTTP client.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> NewsdeskResult<Self> {
        let http = build_http_client(timeout, user_agent)?;
        Ok(Self::with_client(http, base_url, api_key))
    }

    /// Creates a client over an existing HTTP client.
    pub fn with_client(http: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> NewsdeskResult<UpstreamResponse> {
        debug!(path = %path, "Fetching from TheNewsAPI");

        let response = self
            .http
            .get(self.url(path))
            .query(&[("api_token", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                error!(path = %path, error = %e, timeout = e.is_timeout(), "TheNewsAPI request failed");
                NewsdeskError::external(SERVICE, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body: WireResponse = response.json().await.unwrap_or_default();
            let message = body
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.to_string());
            error!(path = %path, status = status.as_u16(), message = %message, "TheNewsAPI error response");
            return Err(NewsdeskError::external(
                SERVICE,
                format!("HTTP {}: {}", status.as_u16(), message),
            ));
        }

        let body: WireResponse = response.json().await.map_err(|e| {
            error!(path = %path, error = %e, "Malformed TheNewsAPI response");
            NewsdeskError::external(SERVICE, format!("Malformed response: {}", e))
        })?;

        let normalized = body.normalize();
        debug!(
            path = %path,
            status = status.as_u16(),
            articles = normalized.articles.len(),
            "TheNewsAPI response received"
        );
        Ok(normalized)
    }
}

/// Maps a sort order to the provider's `sort` parameter.
#[must_use]
pub const fn sort_param(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::Relevancy => "relevancy",
        SortBy::Popularity | SortBy::PublishedAt => "latest",
    }
}

#[async_trait]
impl NewsProvider for TheNewsApiClient {
    async fn top_headlines(&self, request: &HeadlinesRequest) -> NewsdeskResult<UpstreamResponse> {
        let offset = request.page.saturating_sub(1).saturating_mul(request.page_size);
        let mut params = vec![
            ("limit", request.page_size.to_string()),
            ("offset", offset.to_string()),
        ];
        if !request.country.is_empty() {
            params.push(("country", request.country.clone()));
        }
        if let Some(category) = request.category.as_ref().filter(|c| !c.is_empty()) {
            params.push(("category", category.clone()));
        }

        self.fetch("/news/top", &params).await
    }

    async fn search(&self, request: &SearchRequest) -> NewsdeskResult<UpstreamResponse> {
        let mut params = vec![
            ("q", request.q.clone()),
            ("limit", request.page_size.to_string()),
            ("page", request.page.to_string()),
        ];
        if let Some(language) = request.language.as_ref().filter(|l| !l.is_empty()) {
            params.push(("language", language.clone()));
        }
        params.push(("sort", sort_param(request.sort_by).to_string()));

        self.fetch("/news", &params).await
    }
}

impl std::fmt::Debug for TheNewsApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TheNewsApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

// Wire format. Every field is optional; nulls and omissions are equivalent.

#[derive(Debug, Default, Deserialize)]
struct WireResponse {
    #[serde(default)]
    data: Option<Vec<WireArticle>>,
    #[serde(default)]
    meta: Option<WireMeta>,
    #[serde(default)]
    error: Option<WireError>,
}

#[derive(Debug, Default, Deserialize)]
struct WireMeta {
    #[serde(default)]
    found: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct WireError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireArticle {
    #[serde(default)]
    uuid: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default)]
    locale: Option<String>,
}

impl WireResponse {
    fn normalize(self) -> UpstreamResponse {
        if let Some(error) = self.error {
            return UpstreamResponse::error(error.code, error.message);
        }

        let articles: Vec<Article> = self
            .data
            .unwrap_or_default()
            .into_iter()
            .map(WireArticle::into_article)
            .collect();
        let total_results = self
            .meta
            .and_then(|meta| meta.found)
            .filter(|found| *found > 0)
            .unwrap_or(articles.len() as u64);

        UpstreamResponse::ok(articles, total_results)
    }
}

impl WireArticle {
    fn into_article(self) -> Article {
        let description = self.description.unwrap_or_default();
        Article {
            id: self.uuid,
            title: self.title.unwrap_or_default(),
            content: description.clone(),
            description,
            image_url: self.image_url.filter(|url| !url.is_empty()),
            url: self.url.unwrap_or_default(),
            author: String::new(),
            source: self
                .source
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            category: self.categories.and_then(|c| c.into_iter().next()),
            language: self.language,
            country: self.locale,
            published_at: self.published_at.unwrap_or_default(),
            updated_at: None,
        }
    }
}
