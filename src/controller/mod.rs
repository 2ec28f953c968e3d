//! The news view controller: all view state, the queries it issues and the
//! read history it records.
//!
//! Every query is stamped with a generation. Only the completion carrying the
//! latest generation is applied, so a slow response to an older query can
//! never overwrite the results of a newer one.

pub mod runner;

use std::sync::Arc;

use crate::app::{Browser, Result};
use crate::domain::{has_next_page, has_prev_page, Article, ArticlesPage, Query, Theme};
use crate::fetcher::NewsSource;
use crate::store::HistoryStore;

pub use runner::{FetchCompletion, QueryRunner};

/// Everything the view renders.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub articles: Vec<Article>,
    pub loading: bool,
    /// Term of the most recent search request.
    pub search_term: String,
    /// 1-based.
    pub page: u32,
    pub total_results: u64,
    pub theme: Theme,
    pub history: Vec<Article>,
}

/// A query handed out for execution, tagged with its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub generation: u64,
    pub query: Query,
}

pub struct NewsController {
    history_store: Arc<dyn HistoryStore + Send + Sync>,
    browser: Arc<dyn Browser + Send + Sync>,
    reject_blank_terms: bool,
    state: ViewState,
    generation: u64,
    /// Latest issued query.
    current: Query,
    /// Query whose results are on screen.
    applied: Query,
}

impl NewsController {
    pub fn new(
        history_store: Arc<dyn HistoryStore + Send + Sync>,
        browser: Arc<dyn Browser + Send + Sync>,
        reject_blank_terms: bool,
    ) -> Self {
        Self {
            history_store,
            browser,
            reject_blank_terms,
            state: ViewState {
                page: 1,
                ..Default::default()
            },
            generation: 0,
            current: Query::headlines(),
            applied: Query::headlines(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The query whose results are currently displayed.
    pub fn applied_query(&self) -> &Query {
        &self.applied
    }

    /// Load the history and ask for the first page of headlines.
    pub fn initial_load(&mut self) -> PendingQuery {
        self.load_history();
        self.refresh_headlines()
    }

    /// Replace the view's history with what the store holds.
    pub fn load_history(&mut self) {
        self.state.history = match self.history_store.load_all() {
            Ok(history) => history,
            Err(e) => {
                tracing::error!("Failed to load read history: {}", e);
                Vec::new()
            }
        };
    }

    /// Top headlines from page 1, dropping any search in progress.
    pub fn refresh_headlines(&mut self) -> PendingQuery {
        self.state.search_term.clear();
        self.issue(Query::headlines())
    }

    /// Search `term` at the current page.
    ///
    /// Returns `None` only when blank terms are configured to be rejected.
    pub fn search(&mut self, term: impl Into<String>) -> Option<PendingQuery> {
        let page = self.state.page;
        self.search_page(term, page)
    }

    pub fn search_page(&mut self, term: impl Into<String>, page: u32) -> Option<PendingQuery> {
        let term = term.into();
        if self.reject_blank_terms && term.trim().is_empty() {
            tracing::debug!("Rejected blank search term");
            return None;
        }

        self.state.search_term = term.clone();
        Some(self.issue(Query::search(term, page)))
    }

    pub fn has_next_page(&self) -> bool {
        has_next_page(self.state.total_results, self.state.page)
    }

    pub fn has_prev_page(&self) -> bool {
        has_prev_page(self.state.page)
    }

    /// Re-issue the current query one page further. Without a search this
    /// pages through the headlines.
    pub fn next_page(&mut self) -> Option<PendingQuery> {
        if !self.has_next_page() {
            return None;
        }
        let query = self.current.with_page(self.state.page + 1);
        Some(self.issue(query))
    }

    pub fn prev_page(&mut self) -> Option<PendingQuery> {
        if !self.has_prev_page() {
            return None;
        }
        let query = self.current.with_page(self.state.page - 1);
        Some(self.issue(query))
    }

    /// Stamp `query` with a new generation and mark the view as loading.
    pub fn issue(&mut self, query: Query) -> PendingQuery {
        self.generation += 1;
        self.state.loading = true;
        self.state.page = query.page;
        self.current = query.clone();

        tracing::debug!(generation = self.generation, ?query, "Issuing query");
        PendingQuery {
            generation: self.generation,
            query,
        }
    }

    /// Apply the outcome of the query with `generation`.
    ///
    /// Returns `false` when a newer query has been issued since, in which case
    /// nothing changes. Failures are logged and leave the previous results on
    /// screen.
    pub fn complete(&mut self, generation: u64, result: Result<ArticlesPage>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                latest = self.generation,
                "Discarding stale response"
            );
            return false;
        }

        self.state.loading = false;
        match result {
            Ok(page) => {
                let page = page.truncated();
                self.state.articles = page.articles;
                self.state.total_results = page.total_results;
                self.applied = self.current.clone();
            }
            Err(e) => {
                tracing::error!(query = ?self.current, "Failed to fetch articles: {}", e);
                self.state.page = self.applied.page;
                self.state.search_term = self.applied.term().unwrap_or_default().to_string();
                self.current = self.applied.clone();
            }
        }
        true
    }

    /// Issue and await a query in place. Used where no UI loop is running.
    pub async fn execute(&mut self, source: &dyn NewsSource, pending: PendingQuery) -> bool {
        let result = source.fetch(&pending.query).await;
        self.complete(pending.generation, result)
    }

    /// Record the article at `index` in the history, then open it.
    ///
    /// The history write happens even if the browser fails to launch.
    pub fn open_article(&mut self, index: usize) -> Result<Option<Article>> {
        let Some(article) = self.state.articles.get(index).cloned() else {
            return Ok(None);
        };

        let recorded = self.record_read(&article);
        let opened = self.browser.open(&article.url);
        recorded?;
        opened?;

        tracing::info!(url = %article.url, "Opened article");
        Ok(Some(article))
    }

    /// Open a history entry without recording it again.
    pub fn open_history_entry(&self, index: usize) -> Result<Option<Article>> {
        let Some(article) = self.state.history.get(index) else {
            return Ok(None);
        };
        self.browser.open(&article.url)?;
        Ok(Some(article.clone()))
    }

    /// Store first; the view only ever shows what the store returned.
    pub fn record_read(&mut self, article: &Article) -> Result<()> {
        self.state.history = self.history_store.append(article)?;
        Ok(())
    }

    pub fn delete_history(&mut self, index: usize) -> Result<()> {
        self.state.history = self.history_store.remove(index)?;
        Ok(())
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
    }
}
