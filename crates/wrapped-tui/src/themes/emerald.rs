//! Emerald theme, the OPay brand greens on near-black

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg: Color::Rgb(0x02, 0x2c, 0x22),            // emerald-950
        surface: Color::Rgb(0x06, 0x4e, 0x3b),       // emerald-900
        fg: Color::Rgb(0xf0, 0xfd, 0xf4),
        muted: Color::Rgb(0x9c, 0xb8, 0xac),
        accent: Color::Rgb(0x10, 0xb9, 0x81),        // emerald-500
        accent_strong: Color::Rgb(0x34, 0xd3, 0x99), // emerald-400
        track: Color::Rgb(0x1f, 0x3a, 0x33),
        error: Color::Rgb(0xf8, 0x71, 0x71),
        success: Color::Rgb(0x4a, 0xde, 0x80),
        palette: [
            Color::Rgb(0x10, 0xb9, 0x81), // emerald
            Color::Rgb(0x3b, 0x82, 0xf6), // blue
            Color::Rgb(0xa8, 0x55, 0xf7), // purple
            Color::Rgb(0xec, 0x48, 0x99), // pink
            Color::Rgb(0xea, 0xb3, 0x08), // yellow
            Color::Rgb(0xf9, 0x73, 0x16), // orange
        ],
    }
}
