use html_escape::decode_html_entities;
use serde::Deserialize;

use crate::app::{BeritaError, Result};
use crate::domain::{Article, ArticlesPage};

/// Envelope shared by both endpoints, success and error alike.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    status: Option<String>,
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    articles: Vec<Article>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Decode a successful response body into a page of articles.
    pub fn normalize(&self, body: &[u8]) -> Result<ArticlesPage> {
        let response: ApiResponse = serde_json::from_slice(body)?;

        if response.status.as_deref() == Some("error") {
            return Err(BeritaError::Api {
                status: None,
                code: response.code.unwrap_or_else(|| "unknown".into()),
                message: response.message.unwrap_or_default(),
            });
        }

        let articles: Vec<Article> = response
            .articles
            .into_iter()
            .map(|mut article| {
                article.title = decode_html_entities(&article.title).to_string();
                article.description = article
                    .description
                    .map(|d| decode_html_entities(&d).to_string());
                article
            })
            .collect();

        let total_results = response
            .total_results
            .unwrap_or(articles.len() as u64);

        Ok(ArticlesPage {
            articles,
            total_results,
        })
    }

    /// Build an error for a non-success HTTP status, using the API's own
    /// `code`/`message` when the body carries them.
    pub fn api_error(&self, status: u16, body: &[u8]) -> BeritaError {
        match serde_json::from_slice::<ApiResponse>(body) {
            Ok(response) => BeritaError::Api {
                status: Some(status),
                code: response.code.unwrap_or_else(|| format!("http_{}", status)),
                message: response.message.unwrap_or_default(),
            },
            Err(_) => {
                let text = String::from_utf8_lossy(body);
                BeritaError::Api {
                    status: Some(status),
                    code: format!("http_{}", status),
                    message: text.chars().take(200).collect(),
                }
            }
        }
    }
}
