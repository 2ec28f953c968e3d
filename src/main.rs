use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use berita::app::AppContext;
use berita::cli::{commands, Cli, Commands, HistoryAction};
use berita::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so its logs go to a file.
    if matches!(command, Commands::Tui) {
        let log_path = AppContext::default_data_dir()?.join("berita.log");
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(log_file)).with_ansi(false))
            .with(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }

    let config = Config::load_from(cli.config.as_deref())?;
    let ctx = AppContext::new(config, None)?;

    match command {
        Commands::Tui => {
            berita::tui::run(Arc::new(ctx)).await?;
        }
        Commands::Headlines { page } => {
            commands::headlines(&ctx, page).await?;
        }
        Commands::Search { term, page } => {
            commands::search(&ctx, &term, page).await?;
        }
        Commands::History { action } => match action {
            HistoryAction::List => commands::list_history(&ctx)?,
            HistoryAction::Remove { position } => commands::remove_history(&ctx, position)?,
            HistoryAction::Open { position } => commands::open_history(&ctx, position)?,
        },
    }

    Ok(())
}
