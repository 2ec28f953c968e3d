use crate::app::{AppContext, BeritaError, Result};
use crate::controller::{NewsController, PendingQuery};
use crate::domain::{Article, Query};

pub async fn headlines(ctx: &AppContext, page: u32) -> Result<()> {
    let mut controller = ctx.controller();
    let pending = controller.issue(Query::headlines().with_page(page));
    run(ctx, &mut controller, pending).await
}

pub async fn search(ctx: &AppContext, term: &str, page: u32) -> Result<()> {
    let mut controller = ctx.controller();
    let pending = controller
        .search_page(term, page)
        .ok_or_else(|| BeritaError::Other("Search term is empty".into()))?;
    run(ctx, &mut controller, pending).await
}

async fn run(
    ctx: &AppContext,
    controller: &mut NewsController,
    pending: PendingQuery,
) -> Result<()> {
    let query = pending.query.clone();
    // Fetch directly so the error reaches the user instead of only the log.
    let page = ctx.news.fetch(&query).await?;
    controller.complete(pending.generation, Ok(page));

    let state = controller.state();
    if state.articles.is_empty() {
        println!("No articles");
        return Ok(());
    }

    for (i, article) in state.articles.iter().enumerate() {
        print_article(i + 1, article);
    }

    println!(
        "\nPage {} ({} results in total)",
        state.page, state.total_results
    );
    if controller.has_prev_page() || controller.has_next_page() {
        let base = match query.term() {
            Some(term) => format!("berita search {:?}", term),
            None => "berita headlines".to_string(),
        };
        if controller.has_prev_page() {
            println!("  previous: {} --page {}", base, state.page - 1);
        }
        if controller.has_next_page() {
            println!("  next:     {} --page {}", base, state.page + 1);
        }
    }

    Ok(())
}

fn print_article(position: usize, article: &Article) {
    println!("{:>2}. {}", position, article.display_title());
    println!(
        "    {} - {}",
        article.display_author(),
        article.display_published_at()
    );
    println!("    {}", article.url);
}

pub fn list_history(ctx: &AppContext) -> Result<()> {
    let mut controller = ctx.controller();
    controller.load_history();
    let history = &controller.state().history;

    if history.is_empty() {
        println!("No articles read yet");
        return Ok(());
    }

    for (i, article) in history.iter().enumerate() {
        println!("{:>3}. {}\n     {}", i + 1, article.display_title(), article.url);
    }

    Ok(())
}

pub fn remove_history(ctx: &AppContext, position: usize) -> Result<()> {
    let mut controller = ctx.controller();
    controller.load_history();
    let index = history_index(&controller, position)?;

    let title = controller.state().history[index].display_title().to_string();
    controller.delete_history(index)?;
    println!("Removed: {}", title);
    Ok(())
}

pub fn open_history(ctx: &AppContext, position: usize) -> Result<()> {
    let mut controller = ctx.controller();
    controller.load_history();
    let index = history_index(&controller, position)?;

    if let Some(article) = controller.open_history_entry(index)? {
        println!("Opened: {}", article.url);
    }
    Ok(())
}

/// Map a 1-based position from `history list` to an index.
fn history_index(controller: &NewsController, position: usize) -> Result<usize> {
    let len = controller.state().history.len();
    if position == 0 || position > len {
        return Err(BeritaError::Other(format!(
            "No history entry at position {} ({} entries)",
            position, len
        )));
    }
    Ok(position - 1)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::store::{HistoryStore, SqliteHistoryStore};
    use crate::testing::{article, page_of, RecordingBrowser, ScriptedSource};

    fn context(
        source: ScriptedSource,
    ) -> (AppContext, Arc<SqliteHistoryStore>, Arc<RecordingBrowser>) {
        let store = Arc::new(SqliteHistoryStore::in_memory().unwrap());
        let browser = Arc::new(RecordingBrowser::default());
        let ctx = AppContext::from_parts(
            Config::default(),
            store.clone(),
            Arc::new(source),
            browser.clone(),
        );
        (ctx, store, browser)
    }

    #[test]
    fn test_remove_history_by_position() {
        let (ctx, store, _) = context(ScriptedSource::new());
        for i in 0..3 {
            store.append(&article(i)).unwrap();
        }

        remove_history(&ctx, 2).unwrap();
        assert_eq!(store.load_all().unwrap(), vec![article(0), article(2)]);
    }

    #[test]
    fn test_remove_history_rejects_bad_positions() {
        let (ctx, store, _) = context(ScriptedSource::new());
        store.append(&article(0)).unwrap();

        assert!(remove_history(&ctx, 0).is_err());
        assert!(remove_history(&ctx, 2).is_err());
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_open_history_does_not_record() {
        let (ctx, store, browser) = context(ScriptedSource::new());
        store.append(&article(0)).unwrap();

        open_history(&ctx, 1).unwrap();
        assert_eq!(browser.opened(), vec![article(0).url]);
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_surfaces_fetch_errors() {
        let (ctx, _, _) = context(ScriptedSource::new());
        assert!(search(&ctx, "nothing scripted", 1).await.is_err());
    }

    #[tokio::test]
    async fn test_headlines_prints_page() {
        let source = Arc::new(ScriptedSource::new().with("", page_of(5, 5)));
        let ctx = AppContext::from_parts(
            Config::default(),
            Arc::new(SqliteHistoryStore::in_memory().unwrap()),
            source.clone(),
            Arc::new(RecordingBrowser::default()),
        );

        headlines(&ctx, 1).await.unwrap();
        assert_eq!(source.seen(), vec![Query::headlines()]);
    }
}
