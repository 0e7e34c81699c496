use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use wrapped_core::config::KeymapConfig;
use wrapped_core::ShareTarget;

use super::centered_rect;
use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the share target picker
    pub fn render_share_menu(frame: &mut Frame, selected: usize, theme: &Theme) {
        let area = frame.area();
        let popup_width = 40u16.min(area.width.saturating_sub(4));
        let popup_height = (ShareTarget::ALL.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Share Your Story ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.surface));

        let mut lines: Vec<Line> = ShareTarget::ALL
            .iter()
            .enumerate()
            .map(|(index, target)| {
                let label = format!(" {}. {} ", index + 1, target.label());
                if index == selected {
                    Line::from(Span::styled(
                        label,
                        Style::default()
                            .fg(theme.bg)
                            .bg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(label, Style::default().fg(theme.fg)))
                }
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Enter: share  Esc: close",
            Style::default().fg(theme.muted),
        )));

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center),
            popup_area,
        );
    }

    /// Render the key help overlay
    pub fn render_help(frame: &mut Frame, keys: &KeymapConfig, theme: &Theme) {
        let entries = help_entries(keys);
        let area = frame.area();
        let popup_width = 48u16.min(area.width.saturating_sub(4));
        let popup_height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.surface));

        let mut lines: Vec<Line> = entries
            .into_iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>10}  ", key),
                        Style::default()
                            .fg(theme.accent_strong)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description, Style::default().fg(theme.fg)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(theme.muted),
        )));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

fn help_entries(keys: &KeymapConfig) -> Vec<(String, &'static str)> {
    vec![
        (format!("{}/{}", keys.scroll_down, keys.scroll_up), "Scroll"),
        (
            format!("{}/{}", keys.scroll_half_down, keys.scroll_half_up),
            "Half page",
        ),
        (format!("{}/{}", keys.next_section, keys.prev_section), "Next / previous section"),
        ("1-8".to_string(), "Jump to section"),
        (format!("{}/{}", keys.jump_to_top, keys.jump_to_bottom), "Top / bottom"),
        (keys.skip_to_share.clone(), "Skip to share"),
        (keys.share.clone(), "Share"),
        (keys.toggle_motion.clone(), "Toggle reduced motion"),
        (keys.retry.clone(), "Reload"),
        (keys.quit.clone(), "Quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_follows_configured_keys() {
        let keys = KeymapConfig {
            share: "x".to_string(),
            ..KeymapConfig::default()
        };
        let entries = help_entries(&keys);
        assert!(entries.contains(&("x".to_string(), "Share")));
        assert!(entries.contains(&("n/p".to_string(), "Next / previous section")));
    }
}
