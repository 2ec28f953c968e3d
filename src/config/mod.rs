//! Configuration management for berita.
//!
//! Configuration is read from `~/.config/berita/config.toml` at startup (or the
//! path given with `--config`). If the file doesn't exist, a default
//! configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::{ColorConfig, ThemeConfig};
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_KEY_ENV: &str = "BERITA_NEWSAPI_KEY";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub theme: ThemeConfig,
    pub keybindings: KeybindingConfig,
}

/// Where and how to reach the news API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the API, or of a proxy that adds the key server-side.
    pub base_url: String,
    /// Country code for top headlines.
    pub country: String,
    /// Key stored in the config file. The environment variable wins.
    pub api_key: Option<String>,
    /// Environment variable consulted for the key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org".to_string(),
            country: "us".to_string(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// The key to send, if any: environment first, then the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        let from_env = std::env::var(&self.api_key_env).ok();
        pick_api_key(from_env, self.api_key.clone())
    }
}

fn pick_api_key(from_env: Option<String>, from_file: Option<String>) -> Option<String> {
    from_env
        .filter(|k| !k.trim().is_empty())
        .or(from_file.filter(|k| !k.trim().is_empty()))
        .map(|k| k.trim().to_string())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Refuse to send empty or whitespace-only search terms.
    pub reject_blank_terms: bool,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from `path`, or the default path when `None`.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/berita/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("berita").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# berita configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "/"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[api]
# NewsAPI endpoint, or a proxy that injects the key for you
base_url = "https://newsapi.org"

# Country for top headlines
country = "us"

# The API key is read from this environment variable first...
api_key_env = "BERITA_NEWSAPI_KEY"
# ...and from here otherwise. Leave both unset when using a proxy.
# api_key = ""

# Request timeout in seconds
timeout_secs = 10

[search]
# Refuse empty or whitespace-only search terms instead of sending them
reject_blank_terms = false

[theme.light]
background = "#E5E7EB"
border = "Gray"
highlight = "Blue"
title = "Black"
meta = "DarkGray"
text = "Black"
muted = "Gray"
link = "Blue"
status_fg = "White"
status_bg = "#6B7280"

[theme.dark]
background = "#1F2937"
border = "DarkGray"
highlight = "Cyan"
title = "White"
meta = "Gray"
text = "White"
muted = "DarkGray"
link = "LightBlue"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
# Navigation
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
move_left = ["h", "Left"]
move_right = ["l", "Right"]
next_pane = ["Tab"]
prev_pane = ["BackTab", "Shift+Tab"]

# Actions
open = ["Enter", "o"]
search = ["/"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]
toggle_theme = ["t"]
refresh = ["R"]
delete_entry = ["d", "Delete"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.api.base_url, "https://newsapi.org");
        assert_eq!(config.api.country, "us");
        assert_eq!(config.api.api_key, None);
        assert!(!config.search.reject_blank_terms);
        assert_eq!(config.theme.light, ColorConfig::light());
        assert_eq!(config.theme.dark, ColorConfig::dark());
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[api]
country = "id"

[search]
reject_blank_terms = true
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.api.country, "id");
        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.search.reject_blank_terms);
        assert_eq!(config.keybindings.search, vec!["/"]);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.api.api_key_env, DEFAULT_API_KEY_ENV);
        assert_eq!(config.theme.dark, ColorConfig::dark());
    }

    #[test]
    fn test_pick_api_key_prefers_environment() {
        assert_eq!(
            pick_api_key(Some("env-key".into()), Some("file-key".into())),
            Some("env-key".into())
        );
        assert_eq!(
            pick_api_key(Some("  ".into()), Some("file-key".into())),
            Some("file-key".into())
        );
        assert_eq!(pick_api_key(None, Some("".into())), None);
        assert_eq!(pick_api_key(None, None), None);
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(config.api.country, "us");

        // Second load parses the file that was just written.
        let reloaded = Config::load_from(Some(&path)).unwrap();
        assert_eq!(reloaded.keybindings.toggle_theme, vec!["t"]);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\ncountry = ").unwrap();

        let err = Config::load_from(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
