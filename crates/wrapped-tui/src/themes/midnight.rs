//! Midnight theme, for terminals with a black background

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg: Color::Rgb(0x0b, 0x0f, 0x19),
        surface: Color::Rgb(0x16, 0x1b, 0x2a),
        fg: Color::Rgb(0xe5, 0xe7, 0xeb),
        muted: Color::Rgb(0x8b, 0x93, 0xa7),
        accent: Color::Rgb(0x60, 0xa5, 0xfa),
        accent_strong: Color::Rgb(0x93, 0xc5, 0xfd),
        track: Color::Rgb(0x26, 0x2d, 0x3f),
        error: Color::Rgb(0xf8, 0x71, 0x71),
        success: Color::Rgb(0x34, 0xd3, 0x99),
        palette: [
            Color::Rgb(0x60, 0xa5, 0xfa),
            Color::Rgb(0x34, 0xd3, 0x99),
            Color::Rgb(0xc0, 0x84, 0xfc),
            Color::Rgb(0xf4, 0x72, 0xb6),
            Color::Rgb(0xfa, 0xcc, 0x15),
            Color::Rgb(0xfb, 0x92, 0x3c),
        ],
    }
}
