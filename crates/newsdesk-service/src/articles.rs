//! Article validation and cleaning.

use newsdesk_core::{Article, UNKNOWN};

/// Drops articles without a title, url or publish timestamp and fills in
/// defaults on the rest.
///
/// Order is preserved and the function is idempotent.
#[must_use]
pub fn validate_and_clean(articles: Vec<Article>) -> Vec<Article> {
    articles
        .into_iter()
        .filter(Article::has_required_fields)
        .map(clean)
        .collect()
}

fn clean(mut article: Article) -> Article {
    if article.author.trim().is_empty() {
        article.author = UNKNOWN.to_string();
    }
    if article.source.trim().is_empty() {
        article.source = UNKNOWN.to_string();
    }
    article.image_url = article.image_url.filter(|url| !url.is_empty());
    article
}
