pub mod newsapi;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{ArticlesPage, Query};

pub use newsapi::NewsApiClient;

#[async_trait]
pub trait NewsSource {
    /// Run one query and return the decoded page, untruncated.
    async fn fetch(&self, query: &Query) -> Result<ArticlesPage>;
}
