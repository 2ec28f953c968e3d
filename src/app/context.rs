use std::path::PathBuf;
use std::sync::Arc;

use crate::app::browser::{Browser, SystemBrowser};
use crate::app::error::{BeritaError, Result};
use crate::config::Config;
use crate::controller::NewsController;
use crate::fetcher::{NewsApiClient, NewsSource};
use crate::store::{HistoryStore, SqliteHistoryStore};

pub struct AppContext {
    pub config: Arc<Config>,
    pub history: Arc<dyn HistoryStore + Send + Sync>,
    pub news: Arc<dyn NewsSource + Send + Sync>,
    pub browser: Arc<dyn Browser + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_data_dir()?.join("berita.db"),
        };

        let history: Arc<dyn HistoryStore + Send + Sync> =
            Arc::new(SqliteHistoryStore::new(&db_path)?);
        let news: Arc<dyn NewsSource + Send + Sync> = Arc::new(NewsApiClient::new(&config.api)?);

        Ok(Self::from_parts(
            config,
            history,
            news,
            Arc::new(SystemBrowser),
        ))
    }

    pub fn from_parts(
        config: Config,
        history: Arc<dyn HistoryStore + Send + Sync>,
        news: Arc<dyn NewsSource + Send + Sync>,
        browser: Arc<dyn Browser + Send + Sync>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            history,
            news,
            browser,
        }
    }

    /// A fresh controller sharing this context's store and browser.
    pub fn controller(&self) -> NewsController {
        NewsController::new(
            self.history.clone(),
            self.browser.clone(),
            self.config.search.reject_blank_terms,
        )
    }

    /// `<data_dir>/berita`, created if missing. Holds the database and TUI log.
    pub fn default_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| BeritaError::Config("Could not find data directory".into()))?;
        let berita_dir = data_dir.join("berita");
        std::fs::create_dir_all(&berita_dir)?;
        Ok(berita_dir)
    }
}
