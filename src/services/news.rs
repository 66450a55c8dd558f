//! Spaceflight news articles

use reqwest::Client;
use serde::Deserialize;
use crate::models::feeds::{NewsArticle, NewsPage};
use crate::services::http::{endpoint, fetch_json};
use crate::utils::errors::FeedResult;
use crate::utils::helpers::{calculate_offset, total_pages};

const FEED: &str = "news";
pub const ARTICLES_PER_PAGE: usize = 6;

#[derive(Debug, Deserialize)]
struct ArticlesResponse {
    count: usize,
    results: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    id: i64,
    title: String,
    url: String,
    image_url: Option<String>,
    news_site: String,
    #[serde(default)]
    summary: String,
    published_at: String,
}

impl From<RawArticle> for NewsArticle {
    fn from(raw: RawArticle) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            url: raw.url,
            image_url: raw.image_url.filter(|u| !u.is_empty()),
            news_site: raw.news_site,
            summary: raw.summary,
            published_at: raw.published_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewsService {
    client: Client,
    base_url: String,
}

impl NewsService {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// One page of the latest articles, `page` is 1-based
    pub async fn articles(&self, page: usize) -> FeedResult<NewsPage> {
        let page = page.max(1);
        let request = self
            .client
            .get(endpoint(&self.base_url, "articles/"))
            .query(&[
                ("limit", ARTICLES_PER_PAGE),
                ("offset", calculate_offset(page, ARTICLES_PER_PAGE)),
            ]);

        let response: ArticlesResponse = fetch_json(FEED, request).await?;

        Ok(NewsPage {
            articles: response.results.into_iter().map(NewsArticle::from).collect(),
            page,
            total_count: response.count,
            total_pages: total_pages(response.count, ARTICLES_PER_PAGE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_articles_page_offset_and_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles/"))
            .and(query_param("limit", "6"))
            .and(query_param("offset", "12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 20,
                "next": null,
                "previous": null,
                "results": [{
                    "id": 24817,
                    "title": "Starship lands",
                    "url": "https://news.example/starship",
                    "image_url": "https://news.example/starship.jpg",
                    "news_site": "SpaceNews",
                    "summary": "It landed.",
                    "published_at": "2024-06-15T12:00:00Z",
                    "updated_at": "2024-06-15T12:05:00Z",
                    "featured": false
                }]
            })))
            .mount(&server)
            .await;

        let page = NewsService::new(Client::new(), server.uri())
            .articles(3)
            .await
            .unwrap();

        assert_eq!(page.page, 3);
        assert_eq!(page.total_count, 20);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.articles.len(), 1);

        let value = serde_json::to_value(&page.articles[0]).unwrap();
        assert_eq!(value["imageUrl"], "https://news.example/starship.jpg");
        assert_eq!(value["newsSite"], "SpaceNews");
        assert_eq!(value["publishedAt"], "2024-06-15T12:00:00Z");
    }
}
