use ratatui::style::{Color, Modifier, Style};

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg: Color,
    pub surface: Color,

    // Foreground colors
    pub fg: Color,
    pub muted: Color,

    // Brand colors
    pub accent: Color,
    pub accent_strong: Color,
    /// Unfilled part of bars and the progress track
    pub track: Color,

    // Semantic colors
    pub error: Color,
    pub success: Color,

    /// Category bar colors, cycled in rank order
    pub palette: [Color; 6],
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::emerald::default()
    }
}

impl Theme {
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn palette_color(&self, index: usize) -> Color {
        self.palette[index % self.palette.len()]
    }
}
