pub mod app;
pub mod event;
pub mod grid;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::error::TryRecvError;

use crate::app::{AppContext, Result};
use crate::controller::QueryRunner;

use self::app::TuiApp;
use self::event::{AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let config = ctx.config.clone();
    let mut tui_app = TuiApp::new(ctx.controller());
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (mut runner, mut completions) = QueryRunner::new(ctx.news.clone());

    runner.run(tui_app.controller.initial_load());

    loop {
        loop {
            match completions.try_recv() {
                Ok(done) => tui_app.apply(done),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("Fetch channel closed");
                    break;
                }
            }
        }

        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config))?;

        // Polling blocks the thread; let spawned fetches make progress.
        let next = tokio::task::block_in_place(|| event_handler.next())?;
        if let AppEvent::Key(key) = next {
            if let Some(pending) = tui_app.handle_key(key, &config.keybindings) {
                runner.run(pending);
            }
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}
