//! # Berita
//!
//! A terminal news reader for NewsAPI with a locally persisted read history.
//!
//! ## Architecture
//!
//! ```text
//! Controller → NewsSource → Normalizer
//!     └──────→ HistoryStore
//! ```
//!
//! - [`controller`]: view state, query generations and history write-through
//! - [`fetcher`]: HTTP client for the top-headlines and everything endpoints
//! - [`normalizer`]: Converts API responses to domain models
//! - [`store`]: SQLite persistence for the read history
//! - [`tui`]: Terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! export BERITA_NEWSAPI_KEY=...
//!
//! # Launch TUI
//! berita
//!
//! # Print headlines or search results
//! berita headlines --page 2
//! berita search bitcoin
//!
//! # Manage the read history
//! berita history list
//! berita history remove 3
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the history
/// store, the news source and the system browser.
pub mod app;

/// Configuration management.
///
/// Loads from `~/.config/berita/config.toml`, supporting:
/// - API endpoint, country and key
/// - Light and dark palettes (named or hex colors)
/// - Custom keybindings
pub mod config;

/// Command-line interface using clap.
///
/// - `headlines [--page N]` - Print top headlines
/// - `search <term> [--page N]` - Print search results
/// - `history list|remove|open` - Manage the read history
/// - `tui` - Launch the TUI
pub mod cli;

/// The news view controller and its background query runner.
pub mod controller;

/// Core domain models.
///
/// - [`Article`](domain::Article): One news article as the API reports it
/// - [`Query`](domain::Query): Headlines or search, at a page
/// - [`Theme`](domain::Theme): Light or dark presentation
pub mod domain;

/// News fetching.
///
/// - [`NewsSource`](fetcher::NewsSource): Async trait for running a query
/// - [`NewsApiClient`](fetcher::NewsApiClient): reqwest-based implementation
pub mod fetcher;

/// Response decoding into [`ArticlesPage`](domain::ArticlesPage).
pub mod normalizer;

/// Read history persistence.
///
/// - [`HistoryStore`](store::HistoryStore): Trait for the ordered history
/// - [`SqliteHistoryStore`](store::SqliteHistoryStore): SQLite implementation
pub mod store;

/// Terminal user interface.
///
/// Search box and theme toggle on top, article cards on the left, read
/// history on the right.
pub mod tui;

#[cfg(test)]
pub(crate) mod testing;
