//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme for the sheet, supporting built-in
//! themes (Catppuccin variants) and custom themes loaded from TOML files, and
//! maps each [`CellStyle`] to an escape sequence.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! focus_fg = "#1e1e2e"
//! focus_bg = "#89b4fa"
//! text_normal = "#cdd6f4"
//! text_dim = "#7f849c"
//! border = "#45475a"
//! chevron_fg = "#6c7086"
//! back_fg = "#b4befe"
//! empty_state_fg = "#89b4fa"
//! notice_fg = "#f38ba8"
//! # optional
//! sheet_bg = "#1e1e2e"
//! backdrop_bg = "#11111b"
//! ```

use crate::ui::canvas::CellStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Sheet title color.
    pub header_fg: String,
    /// Optional title background.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Focused item foreground.
    pub focus_fg: String,
    /// Focused item background.
    pub focus_bg: String,

    /// Item label color.
    pub text_normal: String,
    /// Descriptions, footer hints, and fading layers.
    pub text_dim: String,

    /// Sheet border.
    pub border: String,
    /// Submenu chevron.
    pub chevron_fg: String,
    /// Back affordance.
    pub back_fg: String,

    /// Optional sheet fill.
    #[serde(default)]
    pub sheet_bg: Option<String>,
    /// Optional fill for the pane area around the sheet.
    #[serde(default)]
    pub backdrop_bg: Option<String>,

    /// Empty level message.
    pub empty_state_fg: String,
    /// Load errors shown in the footer.
    pub notice_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| crate::DrillmenuError::Theme(e.to_string()))
    }

    /// Returns the escape prefix for a semantic cell style.
    #[must_use]
    pub fn style(&self, style: CellStyle) -> String {
        let c = &self.colors;
        let base_bg = c.sheet_bg.as_deref().map(Self::bg).unwrap_or_default();
        match style {
            CellStyle::Normal => format!("{base_bg}{}", Self::fg(&c.text_normal)),
            CellStyle::Dim => format!("{base_bg}{}{}", Self::dim(), Self::fg(&c.text_dim)),
            CellStyle::Title => {
                let bg = c.header_bg.as_deref().map_or(base_bg, Self::bg);
                format!("{bg}{}{}", Self::bold(), Self::fg(&c.header_fg))
            }
            CellStyle::Back => format!("{base_bg}{}{}", Self::bold(), Self::fg(&c.back_fg)),
            CellStyle::Focused => format!("{}{}", Self::bg(&c.focus_bg), Self::fg(&c.focus_fg)),
            CellStyle::FocusedDim => format!("{}{}", Self::bg(&c.focus_bg), Self::fg(&c.focus_fg)) + Self::dim(),
            CellStyle::Chevron => format!("{base_bg}{}", Self::fg(&c.chevron_fg)),
            CellStyle::Border => format!("{base_bg}{}", Self::fg(&c.border)),
            CellStyle::Empty => format!("{base_bg}{}", Self::fg(&c.empty_state_fg)),
            CellStyle::Notice => format!("{base_bg}{}", Self::fg(&c.notice_fg)),
            CellStyle::Backdrop => c.backdrop_bg.as_deref().map(Self::bg).unwrap_or_default(),
        }
    }

    /// Converts a hex color to RGB, returning white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_parse() {
        for name in ["catppuccin-mocha", "catppuccin-latte"] {
            let theme = Theme::from_name(name);
            assert_eq!(theme.map(|t| t.name), Some(name.to_string()));
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn hex_colors_become_truecolor_escapes() {
        assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn theme_file_round_trip() {
        let dir = tempfile::tempdir().expect("temp theme file");
        let path = dir.path().join("custom.toml");
        let source = toml::to_string(&Theme::default()).expect("temp theme file");
        std::fs::write(&path, source.replace("catppuccin-mocha", "custom"))
            .expect("temp theme file");

        let loaded = Theme::from_file(&path).map(|t| t.name).ok();
        assert_eq!(loaded.as_deref(), Some("custom"));
        assert!(Theme::from_file(dir.path().join("missing.toml")).is_err());
    }
}
