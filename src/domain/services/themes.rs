#[cfg(test)]
#[path = "themes_test.rs"]
mod tests;

use std::str::FromStr;

use ratatui::style::Color;

use crate::domain::models::Theme;

/// Colors used to draw the chat for a given theme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub user: Color,
    pub assistant: Color,
    pub error: Color,
    pub chip: Color,
    pub chip_selected: Color,
    pub success: Color,
    pub info: Color,
}

pub struct Themes {}

impl Themes {
    pub fn palette(theme: Theme) -> Palette {
        match theme {
            Theme::Light => {
                return Palette {
                    background: Color::Rgb(250, 248, 245),
                    foreground: Color::Rgb(40, 40, 40),
                    muted: Color::Rgb(130, 130, 130),
                    user: Color::Rgb(30, 90, 160),
                    assistant: Color::Rgb(138, 85, 63),
                    error: Color::Rgb(190, 30, 45),
                    chip: Color::Rgb(90, 90, 90),
                    chip_selected: Color::Rgb(20, 130, 70),
                    success: Color::Rgb(20, 130, 70),
                    info: Color::Rgb(30, 90, 160),
                };
            }
            Theme::Dark => {
                return Palette {
                    background: Color::Rgb(30, 30, 36),
                    foreground: Color::Rgb(225, 225, 225),
                    muted: Color::Rgb(120, 120, 130),
                    user: Color::Rgb(120, 170, 240),
                    assistant: Color::Rgb(230, 170, 120),
                    error: Color::Rgb(240, 90, 90),
                    chip: Color::Rgb(180, 180, 190),
                    chip_selected: Color::Rgb(110, 210, 140),
                    success: Color::Rgb(110, 210, 140),
                    info: Color::Rgb(120, 170, 240),
                };
            }
        }
    }

    /// Picks the starting theme when nothing was persisted: an explicitly
    /// configured theme wins, then the terminal's `COLORFGBG` hint, then dark.
    pub fn resolve(configured: &str, colorfgbg: Option<String>) -> Theme {
        if let Ok(theme) = Theme::from_str(configured.trim()) {
            return theme;
        }

        if let Some(theme) = colorfgbg.as_deref().and_then(Themes::from_colorfgbg) {
            return theme;
        }

        return Theme::Dark;
    }

    /// `COLORFGBG` is set by many terminals as `fg;bg` (sometimes
    /// `fg;default;bg`) using ANSI color indexes. Backgrounds 7 and 9-15 are
    /// light.
    fn from_colorfgbg(value: &str) -> Option<Theme> {
        let bg = value.split(';').last()?.trim().parse::<u8>().ok()?;
        if bg == 7 || (9..=15).contains(&bg) {
            return Some(Theme::Light);
        }

        return Some(Theme::Dark);
    }
}
