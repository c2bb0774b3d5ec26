use crate::config::toml_config::MAX_POOL_SIZE;
use crate::core::{ConfigProvider, TriviaSource};
use crate::domain::model::{CategoryDetail, CategorySummary, RawClue};
use crate::utils::error::{GameError, Result};
use crate::utils::text;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

/// `TriviaSource` backed by a jService-style JSON API
/// (`GET categories?count=N`, `GET category?id=ID`).
#[derive(Debug, Clone)]
pub struct HttpTriviaSource {
    client: Client,
    base_url: Url,
    strip_html: bool,
}

impl HttpTriviaSource {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| GameError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: Self::normalize_base(config.base_url())?,
            strip_html: config.strip_html(),
        })
    }

    // Url::join 會丟掉最後一段路徑，除非以 '/' 結尾
    fn normalize_base(base_url: &str) -> Result<Url> {
        let with_slash = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Url::parse(&with_slash).map_err(|e| GameError::InvalidConfigValueError {
            field: "source.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.join(path).map_err(|e| {
            GameError::data_unavailable(format!("cannot build URL for '{}': {}", path, e))
        })?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| GameError::data_unavailable(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(GameError::data_unavailable(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            GameError::data_unavailable(format!("GET {} returned an unreadable body: {}", url, e))
        })
    }

    fn clean(&self, value: &str) -> String {
        if self.strip_html {
            text::strip_html(value)
        } else {
            text::collapse_whitespace(value)
        }
    }
}

#[async_trait]
impl TriviaSource for HttpTriviaSource {
    async fn list_categories(&self, limit: usize) -> Result<Vec<CategorySummary>> {
        let count = limit.clamp(1, MAX_POOL_SIZE);
        let url = self.endpoint("categories", &[("count", count.to_string())])?;

        let categories: Vec<CategorySummary> = self.get_json(url).await?;
        tracing::debug!("Listed {} candidate categories", categories.len());

        Ok(categories
            .into_iter()
            .map(|c| CategorySummary {
                title: self.clean(&c.title),
                ..c
            })
            .collect())
    }

    async fn get_category(&self, id: u64) -> Result<CategoryDetail> {
        let url = self.endpoint("category", &[("id", id.to_string())])?;

        let detail: CategoryDetail = self.get_json(url).await?;
        tracing::debug!(
            "Fetched category {} '{}' with {} clues",
            id,
            detail.title,
            detail.clues.len()
        );

        Ok(CategoryDetail {
            id,
            title: self.clean(&detail.title),
            clues: detail
                .clues
                .iter()
                .map(|clue| RawClue {
                    question: self.clean(&clue.question),
                    answer: self.clean(&clue.answer),
                })
                .collect(),
        })
    }
}
