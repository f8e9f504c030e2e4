use std::fs;
use std::ops::Range;
use std::path::PathBuf;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME: &str = "terminal-default";

#[derive(Embed)]
#[folder = "assets/themes/"]
struct BundledThemes;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex strings (`#rrggbb`) or the literal `reset` for the terminal default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub dim: String,
    pub accent: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub mismatch_fg: String,
    pub mismatch_bg: String,
    pub cursor_bg: String,
    pub cursor_fg: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// User themes in the config dir shadow bundled ones of the same name.
    pub fn load(name: &str) -> Option<Self> {
        let filename = format!("{name}.toml");

        if let Some(path) = user_theme_dir().map(|dir| dir.join(&filename)) {
            if let Ok(content) = fs::read_to_string(&path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %err, "ignoring broken user theme");
                    }
                }
            }
        }

        let file = BundledThemes::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    /// Like `load`, falling back to the default theme for unknown names.
    pub fn resolve(name: &str) -> Self {
        Self::load(name).unwrap_or_else(|| {
            if name != DEFAULT_THEME {
                tracing::warn!(
                    theme = name,
                    available = %Self::available_themes().join(", "),
                    "unknown theme, using default"
                );
            }
            Self::default()
        })
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = BundledThemes::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

fn user_theme_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("typewell").join("themes"))
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "reset".to_string(),
            fg: "reset".to_string(),
            dim: "#808080".to_string(),
            accent: "#5f87ff".to_string(),
            border: "#808080".to_string(),
            header_bg: "reset".to_string(),
            header_fg: "reset".to_string(),
            mismatch_fg: "#ff5f5f".to_string(),
            mismatch_bg: "#3a1c1c".to_string(),
            cursor_bg: "#d0d0d0".to_string(),
            cursor_fg: "#000000".to_string(),
            error: "#ff5f5f".to_string(),
            warning: "#ffd75f".to_string(),
            success: "#87d787".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(value: &str) -> Color {
        if value.eq_ignore_ascii_case("reset") {
            return Color::Reset;
        }
        let hex = value.trim_start_matches('#');
        // user theme files can hold anything; never slice through a char
        let channel = |range: Range<usize>| {
            hex.get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        };
        match (hex.len(), channel(0..2), channel(2..4), channel(4..6)) {
            (6, Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
            _ => Color::Reset,
        }
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn dim(&self) -> Color { Self::parse_color(&self.dim) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn mismatch_fg(&self) -> Color { Self::parse_color(&self.mismatch_fg) }
    pub fn mismatch_bg(&self) -> Color { Self::parse_color(&self.mismatch_bg) }
    pub fn cursor_bg(&self) -> Color { Self::parse_color(&self.cursor_bg) }
    pub fn cursor_fg(&self) -> Color { Self::parse_color(&self.cursor_fg) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
