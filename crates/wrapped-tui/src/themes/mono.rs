//! Monochrome theme using the terminal's own palette

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg: Color::Reset,
        surface: Color::Reset,
        fg: Color::Reset,
        muted: Color::DarkGray,
        accent: Color::Green,
        accent_strong: Color::LightGreen,
        track: Color::DarkGray,
        error: Color::Red,
        success: Color::Green,
        palette: [
            Color::Green,
            Color::Blue,
            Color::Magenta,
            Color::Cyan,
            Color::Yellow,
            Color::Red,
        ],
    }
}
