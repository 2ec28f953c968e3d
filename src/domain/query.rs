use crate::domain::Article;

/// Results per page, and the most articles ever shown at once.
pub const PAGE_SIZE: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// Unfiltered top headlines for the configured country.
    Headlines,
    /// Full-text search.
    Search { term: String },
}

/// One request against the news API: what to ask for and which page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub kind: QueryKind,
    pub page: u32,
}

impl Query {
    pub fn headlines() -> Self {
        Self {
            kind: QueryKind::Headlines,
            page: 1,
        }
    }

    pub fn search(term: impl Into<String>, page: u32) -> Self {
        Self {
            kind: QueryKind::Search { term: term.into() },
            page: page.max(1),
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            kind: self.kind.clone(),
            page: page.max(1),
        }
    }

    pub fn term(&self) -> Option<&str> {
        match &self.kind {
            QueryKind::Headlines => None,
            QueryKind::Search { term } => Some(term),
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::headlines()
    }
}

/// A decoded response from either endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlesPage {
    pub articles: Vec<Article>,
    pub total_results: u64,
}

impl ArticlesPage {
    /// Keep at most one page worth of articles.
    pub fn truncated(mut self) -> Self {
        self.articles.truncate(PAGE_SIZE as usize);
        self
    }
}

pub fn has_next_page(total_results: u64, page: u32) -> bool {
    total_results > u64::from(page) * u64::from(PAGE_SIZE)
}

pub fn has_prev_page(page: u32) -> bool {
    page > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                title: format!("Article {}", i),
                url: format!("https://example.com/{}", i),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_next_page_boundary() {
        assert!(!has_next_page(30, 1));
        assert!(has_next_page(31, 1));
        assert!(has_next_page(35, 1));
        assert!(has_next_page(45, 1));
        assert!(!has_next_page(45, 2));
        assert!(!has_next_page(0, 1));
    }

    #[test]
    fn test_prev_page() {
        assert!(!has_prev_page(1));
        assert!(has_prev_page(2));
    }

    #[test]
    fn test_truncated_keeps_first_page_size() {
        let page = ArticlesPage {
            articles: articles(35),
            total_results: 35,
        }
        .truncated();
        assert_eq!(page.articles.len(), 30);
        assert_eq!(page.articles[29].title, "Article 29");
        assert_eq!(page.total_results, 35);
    }

    #[test]
    fn test_truncated_leaves_short_pages_alone() {
        let page = ArticlesPage {
            articles: articles(12),
            total_results: 12,
        }
        .truncated();
        assert_eq!(page.articles.len(), 12);
    }

    #[test]
    fn test_query_page_never_zero() {
        assert_eq!(Query::search("rust", 0).page, 1);
        assert_eq!(Query::headlines().with_page(0).page, 1);
    }

    #[test]
    fn test_with_page_keeps_term() {
        let query = Query::search("bitcoin", 1).with_page(2);
        assert_eq!(query.term(), Some("bitcoin"));
        assert_eq!(query.page, 2);
        assert_eq!(Query::headlines().term(), None);
    }
}
