pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "berita")]
#[command(about = "A terminal news reader with a local read history", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/berita/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Launches the TUI when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI
    Tui,
    /// Print top headlines
    Headlines {
        /// Page to fetch (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Search all articles
    Search {
        /// Free-text search term
        term: String,
        /// Page to fetch (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Inspect or edit the read history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List articles you have opened
    List,
    /// Remove the entry at a position shown by `history list`
    Remove {
        position: usize,
    },
    /// Open the entry at a position without recording it again
    Open {
        position: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["berita"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_search_with_page() {
        let cli = Cli::try_parse_from(["berita", "search", "bitcoin", "--page", "2"]).unwrap();
        match cli.command {
            Some(Commands::Search { term, page }) => {
                assert_eq!(term, "bitcoin");
                assert_eq!(page, 2);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["berita", "history", "list", "--config", "/tmp/b.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/b.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::History {
                action: HistoryAction::List
            })
        ));
    }
}
