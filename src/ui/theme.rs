use std::fs;
use std::path::PathBuf;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

pub const DEFAULT_THEME: &str = "catppuccin-mocha";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub prompt: String,
    pub answer: String,
    pub ayah_key: String,
    pub accent: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub selected_bg: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

fn user_theme_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hifzdr").join("themes"))
}

impl Theme {
    /// User themes in `<config_dir>/hifzdr/themes/` shadow the bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        let filename = format!("{name}.toml");

        if let Some(path) = user_theme_dir().map(|d| d.join(&filename)) {
            if let Ok(content) = fs::read_to_string(&path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => {
                        warn!(error = %err, path = %path.display(), "ignoring malformed user theme")
                    }
                }
            }
        }

        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        if let Some(Ok(entries)) = user_theme_dir().map(fs::read_dir) {
            for entry in entries.flatten() {
                let name = entry.file_name().to_string_lossy().to_string();
                if let Some(stem) = name.strip_suffix(".toml") {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        names.dedup();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            muted: "#6c7086".to_string(),
            prompt: "#cdd6f4".to_string(),
            answer: "#a6e3a1".to_string(),
            ayah_key: "#f9e2af".to_string(),
            accent: "#89b4fa".to_string(),
            border: "#45475a".to_string(),
            border_focused: "#89b4fa".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            selected_bg: "#313244".to_string(),
            error: "#f38ba8".to_string(),
            warning: "#f9e2af".to_string(),
            success: "#a6e3a1".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn prompt(&self) -> Color { Self::parse_color(&self.prompt) }
    pub fn answer(&self) -> Color { Self::parse_color(&self.answer) }
    pub fn ayah_key(&self) -> Color { Self::parse_color(&self.ayah_key) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn selected_bg(&self) -> Color { Self::parse_color(&self.selected_bg) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
