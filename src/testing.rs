//! Fakes shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::{BeritaError, Browser, Result};
use crate::domain::{Article, ArticlesPage, Query};
use crate::fetcher::NewsSource;
use crate::store::HistoryStore;

pub fn article(n: usize) -> Article {
    Article {
        title: format!("Article {}", n),
        author: Some(format!("Author {}", n)),
        description: Some(format!("Description {}", n)),
        url: format!("https://example.com/articles/{}", n),
        published_at: "2024-06-03T14:05:00Z".into(),
        ..Default::default()
    }
}

pub fn page_of(count: usize, total_results: u64) -> ArticlesPage {
    ArticlesPage {
        articles: (0..count).map(article).collect(),
        total_results,
    }
}

/// Records every URL instead of launching anything.
#[derive(Default)]
pub struct RecordingBrowser {
    opened: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingBrowser {
    pub fn failing() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Browser for RecordingBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        if self.fail {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no browser",
            ));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Answers queries by search term. Headlines are keyed by the empty string.
/// Unknown terms fail.
#[derive(Default)]
pub struct ScriptedSource {
    responses: HashMap<String, (ArticlesPage, Duration)>,
    seen: Mutex<Vec<Query>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, term: &str, page: ArticlesPage) -> Self {
        self.with_delay(term, page, Duration::ZERO)
    }

    pub fn with_delay(mut self, term: &str, page: ArticlesPage, delay: Duration) -> Self {
        self.responses.insert(term.to_string(), (page, delay));
        self
    }

    pub fn seen(&self) -> Vec<Query> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsSource for ScriptedSource {
    async fn fetch(&self, query: &Query) -> Result<ArticlesPage> {
        self.seen.lock().unwrap().push(query.clone());
        let key = query.term().unwrap_or("");
        let Some((page, delay)) = self.responses.get(key).cloned() else {
            return Err(BeritaError::Api {
                status: Some(500),
                code: "unexpectedError".into(),
                message: format!("no scripted response for {:?}", key),
            });
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(page)
    }
}

/// A store whose every operation fails.
pub struct FailingStore;

impl HistoryStore for FailingStore {
    fn load_all(&self) -> Result<Vec<Article>> {
        Err(BeritaError::Other("disk full".into()))
    }

    fn append(&self, _article: &Article) -> Result<Vec<Article>> {
        Err(BeritaError::Other("disk full".into()))
    }

    fn remove(&self, _index: usize) -> Result<Vec<Article>> {
        Err(BeritaError::Other("disk full".into()))
    }
}
