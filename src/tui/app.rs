use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;

use crate::config::KeybindingConfig;
use crate::controller::{FetchCompletion, NewsController, PendingQuery};
use crate::tui::event::Action;
use crate::tui::grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Articles,
    History,
}

impl ActivePane {
    pub fn toggled(self) -> Self {
        match self {
            ActivePane::Articles => ActivePane::History,
            ActivePane::History => ActivePane::Articles,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct TuiApp {
    pub controller: NewsController,
    pub active_pane: ActivePane,
    pub input_mode: InputMode,
    pub search_input: String,
    pub article_index: usize,
    pub history_index: usize,
    pub history_list_state: ListState,
    /// Set by the renderer from the current terminal width.
    pub grid_columns: usize,
    pub grid_scroll: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new(controller: NewsController) -> Self {
        let mut history_list_state = ListState::default();
        history_list_state.select(Some(0));

        Self {
            controller,
            active_pane: ActivePane::Articles,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            article_index: 0,
            history_index: 0,
            history_list_state,
            grid_columns: 1,
            grid_scroll: 0,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Feed a finished fetch to the controller. A fresh result set starts at
    /// the top.
    pub fn apply(&mut self, done: FetchCompletion) {
        if self.controller.complete(done.generation, done.result) {
            self.article_index = 0;
            self.grid_scroll = 0;
        }
    }

    /// Handle one key press. Returns a query to run when the key issued one.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        bindings: &KeybindingConfig,
    ) -> Option<PendingQuery> {
        match self.input_mode {
            InputMode::Search => self.handle_search_input(key),
            InputMode::Normal => {
                let action = bindings.get_action(&key);
                self.handle_action(action)
            }
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) -> Option<PendingQuery> {
        match key.code {
            KeyCode::Char(c) => {
                self.search_input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                None
            }
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                None
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.active_pane = ActivePane::Articles;
                let pending = self.controller.search(self.search_input.clone());
                if pending.is_none() {
                    self.set_status("Enter a search term".to_string());
                }
                pending
            }
            _ => None,
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Option<PendingQuery> {
        self.clear_status();
        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::MoveUp => {
                self.move_vertical(false);
                None
            }
            Action::MoveDown => {
                self.move_vertical(true);
                None
            }
            Action::MoveLeft => {
                if self.active_pane == ActivePane::Articles {
                    self.article_index = self.article_index.saturating_sub(1);
                }
                None
            }
            Action::MoveRight => {
                let len = self.controller.state().articles.len();
                if self.active_pane == ActivePane::Articles && self.article_index + 1 < len {
                    self.article_index += 1;
                }
                None
            }
            Action::NextPane | Action::PrevPane => {
                self.active_pane = self.active_pane.toggled();
                None
            }
            Action::Search => {
                self.input_mode = InputMode::Search;
                self.search_input = self.controller.state().search_term.clone();
                None
            }
            Action::Open => {
                self.open_selected();
                None
            }
            Action::NextPage => self.controller.next_page(),
            Action::PrevPage => self.controller.prev_page(),
            Action::ToggleTheme => {
                self.controller.toggle_theme();
                None
            }
            Action::Refresh => {
                self.search_input.clear();
                Some(self.controller.refresh_headlines())
            }
            Action::DeleteEntry => {
                if self.active_pane == ActivePane::History {
                    self.delete_selected_history();
                }
                None
            }
            Action::None => None,
        }
    }

    fn move_vertical(&mut self, down: bool) {
        match self.active_pane {
            ActivePane::Articles => {
                let len = self.controller.state().articles.len();
                self.article_index =
                    grid::vertical_neighbor(self.article_index, len, self.grid_columns, down);
            }
            ActivePane::History => {
                let len = self.controller.state().history.len();
                if down && self.history_index + 1 < len {
                    self.history_index += 1;
                } else if !down {
                    self.history_index = self.history_index.saturating_sub(1);
                }
                self.history_list_state.select(Some(self.history_index));
            }
        }
    }

    fn open_selected(&mut self) {
        let outcome = match self.active_pane {
            ActivePane::Articles => self.controller.open_article(self.article_index),
            ActivePane::History => self.controller.open_history_entry(self.history_index),
        };

        match outcome {
            Ok(Some(article)) => self.set_status(format!("Opened: {}", article.display_title())),
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to open article: {}", e);
                self.set_status(format!("Failed to open article: {}", e));
            }
        }
    }

    fn delete_selected_history(&mut self) {
        if let Err(e) = self.controller.delete_history(self.history_index) {
            tracing::error!("Failed to delete history entry: {}", e);
            self.set_status(format!("Failed to delete entry: {}", e));
            return;
        }

        let len = self.controller.state().history.len();
        if self.history_index >= len {
            self.history_index = len.saturating_sub(1);
        }
        self.history_list_state.select(Some(self.history_index));
    }
}
