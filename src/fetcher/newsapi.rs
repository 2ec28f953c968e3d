use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::Result;
use crate::config::ApiConfig;
use crate::domain::{ArticlesPage, Query, QueryKind, PAGE_SIZE};
use crate::fetcher::NewsSource;
use crate::normalizer::Normalizer;

const HEADLINES_PATH: &str = "v2/top-headlines";
const SEARCH_PATH: &str = "v2/everything";

pub struct NewsApiClient {
    client: Client,
    base_url: Url,
    country: String,
    api_key: Option<String>,
    normalizer: Normalizer,
}

impl NewsApiClient {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("berita/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_client(client, api, api.resolve_api_key())
    }

    fn with_client(client: Client, api: &ApiConfig, api_key: Option<String>) -> Result<Self> {
        // Url::join replaces the last segment unless the base ends in '/'.
        let mut base = api.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        if api_key.is_none() {
            tracing::warn!(
                "No API key configured (set {} or api.api_key); requests go out unauthenticated",
                api.api_key_env
            );
        }

        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
            country: api.country.clone(),
            api_key,
            normalizer: Normalizer::new(),
        })
    }

    /// Build the request URL for a query.
    pub fn request_url(&self, query: &Query) -> Result<Url> {
        let path = match query.kind {
            QueryKind::Headlines => HEADLINES_PATH,
            QueryKind::Search { .. } => SEARCH_PATH,
        };
        let mut url = self.base_url.join(path)?;

        {
            let mut pairs = url.query_pairs_mut();
            match &query.kind {
                QueryKind::Headlines => {
                    pairs.append_pair("country", &self.country);
                    if query.page > 1 {
                        pairs.append_pair("page", &query.page.to_string());
                    }
                    pairs.append_pair("pageSize", &PAGE_SIZE.to_string());
                }
                QueryKind::Search { term } => {
                    pairs.append_pair("q", term);
                    pairs.append_pair("page", &query.page.to_string());
                    pairs.append_pair("pageSize", &PAGE_SIZE.to_string());
                }
            }
            if let Some(key) = &self.api_key {
                pairs.append_pair("apiKey", key);
            }
        }

        Ok(url)
    }
}

/// The URL with its `apiKey` value masked, for logs.
pub fn redact_api_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apiKey" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    if pairs.is_empty() {
        return redacted.to_string();
    }

    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch(&self, query: &Query) -> Result<ArticlesPage> {
        let url = self.request_url(query)?;
        tracing::debug!(url = %redact_api_key(&url), "Requesting articles");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(self.normalizer.api_error(status.as_u16(), &body));
        }

        let page = self.normalizer.normalize(&body)?;
        tracing::info!(
            returned = page.articles.len(),
            total = page.total_results,
            "Fetched articles"
        );
        Ok(page)
    }
}
