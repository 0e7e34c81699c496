use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match &app.mode {
            Mode::Normal => "WRAPPED",
            Mode::ShareMenu { .. } => "SHARE",
            Mode::Help => "HELP",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} ", msg)
        } else if app.data.loading {
            format!(" {} | {} Loading your Wrapped...", mode_str, app.spinner())
        } else {
            let section = app
                .current_section()
                .map(|id| id.label())
                .unwrap_or_default();
            let loaded = app
                .data
                .loaded_at
                .map(|at| format!(" | {} {}", app.source_name, at.format("%H:%M")))
                .unwrap_or_default();
            format!(
                " {} | {} | {:.0}%{}",
                mode_str,
                section,
                app.progress_percent(),
                loaded
            )
        };

        let motion = if app.reduce_motion() { "motion:off" } else { "motion:on" };
        let help_hint = format!(" {} | q:quit j/k:scroll n/p:section s:share ?:help ", motion);
        let padding_len = usize::from(area.width)
            .saturating_sub(status_text.width() + help_hint.width());

        let bar = Style::default().bg(theme.surface);
        let line = Line::from(vec![
            Span::styled(status_text, bar.fg(theme.fg)),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, bar.fg(theme.muted)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
