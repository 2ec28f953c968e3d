pub mod article;
pub mod query;
pub mod theme;

pub use article::{format_published_at, Article, ArticleSource};
pub use query::{has_next_page, has_prev_page, ArticlesPage, Query, QueryKind, PAGE_SIZE};
pub use theme::Theme;
