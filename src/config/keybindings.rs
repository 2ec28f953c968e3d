//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Configuration for all keybindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub next_pane: Vec<String>,
    pub prev_pane: Vec<String>,
    pub open: Vec<String>,
    pub search: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub toggle_theme: Vec<String>,
    pub refresh: Vec<String>,
    pub delete_entry: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            move_left: keys(&["h", "Left"]),
            move_right: keys(&["l", "Right"]),
            next_pane: keys(&["Tab"]),
            prev_pane: keys(&["BackTab", "Shift+Tab"]),
            open: keys(&["Enter", "o"]),
            search: keys(&["/"]),
            next_page: keys(&["n", "PageDown"]),
            prev_page: keys(&["p", "PageUp"]),
            toggle_theme: keys(&["t"]),
            refresh: keys(&["R"]),
            delete_entry: keys(&["d", "Delete"]),
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 14] = [
            (&self.quit, Action::Quit),
            (&self.move_up, Action::MoveUp),
            (&self.move_down, Action::MoveDown),
            (&self.move_left, Action::MoveLeft),
            (&self.move_right, Action::MoveRight),
            (&self.next_pane, Action::NextPane),
            (&self.prev_pane, Action::PrevPane),
            (&self.open, Action::Open),
            (&self.search, Action::Search),
            (&self.next_page, Action::NextPage),
            (&self.prev_page, Action::PrevPage),
            (&self.toggle_theme, Action::ToggleTheme),
            (&self.refresh, Action::Refresh),
            (&self.delete_entry, Action::DeleteEntry),
        ];

        table
            .iter()
            .find(|(bindings, _)| matches_key(key, bindings))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }
}

fn matches_key(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings.iter().any(|binding| {
        parse_key_string(binding)
            .map(|parsed| parsed.matches(key))
            .unwrap_or(false)
    })
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Check if this binding matches a key event. Shift is ignored so that
    /// "R" matches the event terminals send for Shift+r.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string into a KeyBinding.
///
/// Supported formats:
/// - Single characters: "a", "A", "1", "/"
/// - Special keys: "Enter", "Tab", "BackTab", "Backspace", "Delete", "Home", "End",
///   "PageUp", "PageDown", "Up", "Down", "Left", "Right", "Esc", "Space", "F1"-"F12"
/// - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter", "Ctrl+Shift+a"
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    // A lone "+" is a key, not a separator.
    if s == "+" {
        return Ok(KeyBinding {
            code: KeyCode::Char('+'),
            modifiers: KeyModifiers::NONE,
        });
    }

    let parts: Vec<&str> = s.split('+').collect();
    let (key_part, modifier_parts) = parts
        .split_last()
        .ok_or_else(|| format!("Empty key binding: {:?}", s))?;

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        }
    }

    let code = parse_key_code(key_part)?;

    Ok(KeyBinding { code, modifiers })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        _ => Err(format!("Unknown key: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_char() {
        let binding = parse_key_string("/").unwrap();
        assert_eq!(binding.code, KeyCode::Char('/'));
        assert_eq!(binding.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(parse_key_string("Enter").unwrap().code, KeyCode::Enter);
        assert_eq!(parse_key_string("BackTab").unwrap().code, KeyCode::BackTab);
        assert_eq!(parse_key_string("pgdn").unwrap().code, KeyCode::PageDown);
        assert_eq!(parse_key_string("F12").unwrap().code, KeyCode::F(12));
        assert!(parse_key_string("F13").is_err());
    }

    #[test]
    fn test_parse_modifiers() {
        let binding = parse_key_string("Ctrl+Shift+a").unwrap();
        assert_eq!(binding.code, KeyCode::Char('a'));
        assert_eq!(
            binding.modifiers,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        );
        assert!(parse_key_string("Hyper+a").is_err());
    }

    #[test]
    fn test_parse_plus_key() {
        assert_eq!(parse_key_string("+").unwrap().code, KeyCode::Char('+'));
    }

    #[test]
    fn test_shift_is_ignored_for_uppercase() {
        let binding = parse_key_string("R").unwrap();
        let key = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert!(binding.matches(&key));
    }

    #[test]
    fn test_default_actions() {
        let config = KeybindingConfig::default();
        let action = |code, modifiers| config.get_action(&KeyEvent::new(code, modifiers));

        assert_eq!(action(KeyCode::Char('q'), KeyModifiers::NONE), Action::Quit);
        assert_eq!(action(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);
        assert_eq!(action(KeyCode::Char('/'), KeyModifiers::NONE), Action::Search);
        assert_eq!(action(KeyCode::Char('n'), KeyModifiers::NONE), Action::NextPage);
        assert_eq!(action(KeyCode::PageUp, KeyModifiers::NONE), Action::PrevPage);
        assert_eq!(action(KeyCode::Char('t'), KeyModifiers::NONE), Action::ToggleTheme);
        assert_eq!(action(KeyCode::Enter, KeyModifiers::NONE), Action::Open);
        assert_eq!(action(KeyCode::Delete, KeyModifiers::NONE), Action::DeleteEntry);
        assert_eq!(action(KeyCode::Char('R'), KeyModifiers::SHIFT), Action::Refresh);
        assert_eq!(action(KeyCode::Char('z'), KeyModifiers::NONE), Action::None);
    }
}
