pub mod sqlite;

use crate::app::Result;
use crate::domain::Article;

pub use sqlite::SqliteHistoryStore;

/// Key under which the read history is stored.
pub const HISTORY_KEY: &str = "readArticles";

/// Persisted, ordered read history.
///
/// Every mutation writes the whole sequence and returns what was written, so
/// callers reflect exactly the persisted state and never keep a separate copy
/// in sync by hand.
pub trait HistoryStore {
    /// All entries, oldest first. A missing or unreadable payload is empty.
    fn load_all(&self) -> Result<Vec<Article>>;
    /// Append one entry. Duplicates are kept.
    fn append(&self, article: &Article) -> Result<Vec<Article>>;
    /// Remove the entry at `index`. Out of range leaves the history untouched.
    fn remove(&self, index: usize) -> Result<Vec<Article>>;
}
