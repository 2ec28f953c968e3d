//! Color palettes for the light and dark themes.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

use crate::domain::Theme;

/// Colors for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorConfig {
    pub background: Color,
    pub border: Color,
    pub highlight: Color,
    pub title: Color,
    pub meta: Color,
    pub text: Color,
    pub muted: Color,
    pub link: Color,
    pub status_fg: Color,
    pub status_bg: Color,
}

impl ColorConfig {
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(229, 231, 235),
            border: Color::Gray,
            highlight: Color::Blue,
            title: Color::Black,
            meta: Color::DarkGray,
            text: Color::Black,
            muted: Color::Gray,
            link: Color::Blue,
            status_fg: Color::White,
            status_bg: Color::Rgb(107, 114, 128),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(31, 41, 55),
            border: Color::DarkGray,
            highlight: Color::Cyan,
            title: Color::White,
            meta: Color::Gray,
            text: Color::White,
            muted: Color::DarkGray,
            link: Color::LightBlue,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

/// Both palettes. Fields missing from the config file keep the built-in
/// value of their own theme.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "ThemeOverrides")]
pub struct ThemeConfig {
    pub light: ColorConfig,
    pub dark: ColorConfig,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            light: ColorConfig::light(),
            dark: ColorConfig::dark(),
        }
    }
}

impl ThemeConfig {
    pub fn palette(&self, theme: Theme) -> &ColorConfig {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeOverrides {
    light: ColorOverrides,
    dark: ColorOverrides,
}

impl From<ThemeOverrides> for ThemeConfig {
    fn from(overrides: ThemeOverrides) -> Self {
        Self {
            light: overrides.light.apply(ColorConfig::light()),
            dark: overrides.dark.apply(ColorConfig::dark()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ColorOverrides {
    #[serde(deserialize_with = "deserialize_optional_color")]
    background: Option<Color>,
    #[serde(deserialize_with = "deserialize_optional_color")]
    border: Option<Color>,
    #[serde(deserialize_with = "deserialize_optional_color")]
    highlight: Option<Color>,
    #[serde(deserialize_with = "deserialize_optional_color")]
    title: Option<Color>,
    #[serde(deserialize_with = "deserialize_optional_color")]
    meta: Option<Color>,
    #[serde(deserialize_with = "deserialize_optional_color")]
    text: Option<Color>,
    #[serde(deserialize_with = "deserialize_optional_color")]
    muted: Option<Color>,
    #[serde(deserialize_with = "deserialize_optional_color")]
    link: Option<Color>,
    #[serde(deserialize_with = "deserialize_optional_color")]
    status_fg: Option<Color>,
    #[serde(deserialize_with = "deserialize_optional_color")]
    status_bg: Option<Color>,
}

impl ColorOverrides {
    fn apply(self, base: ColorConfig) -> ColorConfig {
        ColorConfig {
            background: self.background.unwrap_or(base.background),
            border: self.border.unwrap_or(base.border),
            highlight: self.highlight.unwrap_or(base.highlight),
            title: self.title.unwrap_or(base.title),
            meta: self.meta.unwrap_or(base.meta),
            text: self.text.unwrap_or(base.text),
            muted: self.muted.unwrap_or(base.muted),
            link: self.link.unwrap_or(base.link),
            status_fg: self.status_fg.unwrap_or(base.status_fg),
            status_bg: self.status_bg.unwrap_or(base.status_bg),
        }
    }
}

fn deserialize_optional_color<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| parse_color_string(&s))
        .transpose()
        .map_err(de::Error::custom)
}

/// Parse a color string into a ratatui Color.
///
/// Supports:
/// - Named colors: "Black", "Red", "Green", "Yellow", "Blue", "Magenta", "Cyan", "Gray",
///   "DarkGray", "LightRed", "LightGreen", "LightYellow", "LightBlue", "LightMagenta",
///   "LightCyan", "White", "Reset"
/// - Hex colors: "#RRGGBB" or "#RGB"
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(|| format!("Invalid hex color: {}", s))
    };

    match hex.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        // #RGB expands each nibble: F -> FF
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color_string("Cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("DarkGrey").unwrap(), Color::DarkGray);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color_string("#1F2937").unwrap(), Color::Rgb(31, 41, 55));
        assert_eq!(parse_color_string("#FFF").unwrap(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!(parse_color_string("invalid").is_err());
        assert!(parse_color_string("#GGGGGG").is_err());
        assert!(parse_color_string("#12345").is_err());
        assert!(parse_color_string("#ééé").is_err());
    }

    #[test]
    fn test_partial_override_keeps_own_theme_defaults() {
        let theme: ThemeConfig = toml::from_str(
            r##"
[dark]
highlight = "#FF0000"
"##,
        )
        .unwrap();
        assert_eq!(theme.dark.highlight, Color::Rgb(255, 0, 0));
        assert_eq!(theme.dark.background, ColorConfig::dark().background);
        assert_eq!(theme.light, ColorConfig::light());
    }

    #[test]
    fn test_palette_follows_theme() {
        let theme = ThemeConfig::default();
        assert_eq!(theme.palette(Theme::Dark).text, Color::White);
        assert_eq!(theme.palette(Theme::Light).text, Color::Black);
    }
}
