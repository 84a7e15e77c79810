//! Fixed articles served when the headlines provider is unavailable.

use chrono::{Duration, SecondsFormat, Utc};
use newsdesk_core::Article;

struct Sample {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    image: &'static str,
    author: &'static str,
    source: &'static str,
    category: &'static str,
    hours_ago: i64,
}

const SAMPLES: [Sample; 3] = [
    Sample {
        id: "1",
        title: "Breaking: Tech Giant Announces Major Innovation",
        description: "Leading technology company reveals groundbreaking new features that will transform the industry.",
        image: "https://images.unsplash.com/photo-1519389950473-47ba0277781c?w=800",
        author: "Tech Reporter",
        source: "Tech News Daily",
        category: "technology",
        hours_ago: 2,
    },
    Sample {
        id: "2",
        title: "Market Reaches New Heights",
        description: "Financial markets experience record gains as investors show confidence in economic recovery.",
        image: "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?w=800",
        author: "Finance Writer",
        source: "Finance Weekly",
        category: "business",
        hours_ago: 4,
    },
    Sample {
        id: "3",
        title: "Climate Initiative Shows Promising Results",
        description: "New environmental program demonstrates effectiveness in reducing carbon emissions worldwide.",
        image: "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800",
        author: "Environment Reporter",
        source: "Green News",
        category: "science",
        hours_ago: 6,
    },
];

/// Returns the fallback articles, timestamped relative to now.
#[must_use]
pub fn mock_articles() -> Vec<Article> {
    let now = Utc::now();
    let updated_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    SAMPLES
        .iter()
        .map(|sample| Article {
            id: Some(sample.id.to_string()),
            title: sample.title.to_string(),
            description: sample.description.to_string(),
            content: "Full article content here...".to_string(),
            image_url: Some(sample.image.to_string()),
            url: format!("https://example.com/article{}", sample.id),
            author: sample.author.to_string(),
            source: sample.source.to_string(),
            category: Some(sample.category.to_string()),
            language: Some("en".to_string()),
            country: Some("us".to_string()),
            published_at: (now - Duration::hours(sample.hours_ago))
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: Some(updated_at.clone()),
        })
        .collect()
}
