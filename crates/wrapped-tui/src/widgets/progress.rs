use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{dot_position, ScreenLayout};
use crate::app::App;
use crate::document::SectionId;
use crate::scroll::DotState;
use crate::theme::Theme;

/// Eighths of a cell for the bar's leading edge
const PARTIAL_BLOCKS: [&str; 8] = ["", "▏", "▎", "▍", "▌", "▋", "▊", "▉"];

pub struct ProgressWidget;

impl ProgressWidget {
    pub fn render(frame: &mut Frame, layout: &ScreenLayout, app: &App) {
        let percent = app.progress_percent();
        frame.render_widget(
            Paragraph::new(bar_line(percent, layout.progress.width, &app.theme)),
            layout.progress,
        );
        Self::render_dots(frame, layout, app);
    }

    fn render_dots(frame: &mut Frame, layout: &ScreenLayout, app: &App) {
        let theme = &app.theme;
        let states = app.progress.dot_states(SectionId::ALL.len());
        for (index, state) in states.iter().enumerate() {
            let Some((x, y)) = dot_position(layout, states.len(), index) else {
                return;
            };
            let (symbol, style) = match state {
                DotState::Completed => ("●", Style::default().fg(theme.accent)),
                DotState::Active => (
                    "◉",
                    Style::default()
                        .fg(theme.accent_strong)
                        .add_modifier(Modifier::BOLD),
                ),
                DotState::Upcoming => ("○", Style::default().fg(theme.track)),
            };
            frame.render_widget(
                Paragraph::new(Span::styled(symbol, style)),
                Rect::new(x, y, 1, 1),
            );
        }
    }
}

/// Bar filled to `percent` of `width` with eighth-cell precision
fn bar_line(percent: f64, width: u16, theme: &Theme) -> Line<'static> {
    let eighths = (percent.clamp(0.0, 100.0) / 100.0 * f64::from(width) * 8.0).round() as usize;
    let full = (eighths / 8).min(usize::from(width));
    let partial = if full < usize::from(width) {
        PARTIAL_BLOCKS[eighths % 8]
    } else {
        ""
    };
    let used = full + usize::from(!partial.is_empty());
    let rest = usize::from(width).saturating_sub(used);

    Line::from(vec![
        Span::styled("█".repeat(full), Style::default().fg(theme.accent)),
        Span::styled(partial, Style::default().fg(theme.accent).bg(theme.track)),
        Span::styled(" ".repeat(rest), Style::default().bg(theme.track)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_bar_fill() {
        let theme = Theme::default();
        assert_eq!(text(&bar_line(0.0, 10, &theme)), " ".repeat(10));
        assert_eq!(text(&bar_line(100.0, 10, &theme)), "█".repeat(10));
        assert_eq!(text(&bar_line(50.0, 10, &theme)), format!("{}{}", "█".repeat(5), " ".repeat(5)));
        // 25% of 10 cells is 2.5 cells
        assert_eq!(text(&bar_line(25.0, 10, &theme)), format!("██▌{}", " ".repeat(7)));
    }

    #[test]
    fn test_bar_out_of_range_is_clamped() {
        let theme = Theme::default();
        assert_eq!(text(&bar_line(140.0, 4, &theme)), "████");
        assert_eq!(text(&bar_line(-3.0, 4, &theme)), "    ");
    }
}
