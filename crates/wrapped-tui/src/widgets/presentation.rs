use std::time::Instant;

use ratatui::{
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::ScreenLayout;
use crate::app::App;

pub struct PresentationWidget;

impl PresentationWidget {
    /// Draw the visible window of the document
    pub fn render(frame: &mut Frame, layout: &ScreenLayout, app: &App, now: Instant) {
        let area = layout.content;
        let document = app.presentation.document();
        let scroll = app.scroll_offset();

        let mut lines: Vec<Line<'_>> = Vec::with_capacity(usize::from(area.height));
        for y in 0..area.height {
            let row = scroll.saturating_add(y);
            let line = document.section_at(row).and_then(|section| {
                let reveal = app.presentation.reveal(section.id)?;
                if reveal.is_hidden(now) {
                    return None;
                }
                let line = section.line_at(row, reveal.offset_rows(now))?.clone();
                if reveal.is_dimmed(now) {
                    Some(line.patch_style(Style::default().add_modifier(Modifier::DIM)))
                } else {
                    Some(line)
                }
            });
            lines.push(line.unwrap_or_default());
        }

        let paragraph = Paragraph::new(lines).style(
            Style::default()
                .fg(app.theme.fg)
                .bg(app.theme.bg),
        );
        frame.render_widget(paragraph, area);
    }
}
