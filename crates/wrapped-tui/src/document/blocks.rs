//! Line builders for section content
//!
//! Content is laid out in a centered column no wider than
//! [`MAX_COLUMN_WIDTH`]. Every builder emits whole lines, so the row count of
//! a section depends only on its text and the terminal width, never on the
//! animation state.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::counters::CounterKey;
use crate::theme::Theme;

pub const MAX_COLUMN_WIDTH: u16 = 64;

/// Column narrower than this stacks side-by-side stats
const MIN_GRID_WIDTH: usize = 40;

/// Greedy word wrap by display width; words wider than `width` are split
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let gap = usize::from(!current.is_empty());

            if current_width + gap + word_width <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
            } else {
                for ch in word.chars() {
                    let ch_width = ch.width().unwrap_or(0);
                    if current_width + ch_width > width && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += ch_width;
                }
            }
        }
        lines.push(current);
    }

    lines
}

fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|s| s.content.width()).sum()
}

/// Lines of one section plus the rows its counters sit on
#[derive(Debug, Default)]
pub struct Content {
    column: usize,
    indent: usize,
    lines: Vec<Line<'static>>,
    counters: Vec<(CounterKey, usize)>,
}

impl Content {
    pub fn new(width: u16) -> Self {
        let column = width.clamp(1, MAX_COLUMN_WIDTH) as usize;
        Self {
            column,
            indent: (width as usize).saturating_sub(column) / 2,
            lines: Vec::new(),
            counters: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn into_parts(self) -> (Vec<Line<'static>>, Vec<(CounterKey, usize)>) {
        (self.lines, self.counters)
    }

    fn push_at(&mut self, offset: usize, spans: Vec<Span<'static>>) {
        let mut line = Vec::with_capacity(spans.len() + 1);
        let pad = self.indent + offset;
        if pad > 0 {
            line.push(Span::raw(" ".repeat(pad)));
        }
        line.extend(spans);
        self.lines.push(Line::from(line));
    }

    pub fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    /// Left-aligned spans on one line
    pub fn spans(&mut self, spans: Vec<Span<'static>>) {
        self.push_at(0, spans);
    }

    /// Spans centered in the column
    pub fn centered_spans(&mut self, spans: Vec<Span<'static>>) {
        let offset = self.column.saturating_sub(spans_width(&spans)) / 2;
        self.push_at(offset, spans);
    }

    /// Wrapped, left-aligned text
    pub fn text(&mut self, text: &str, style: Style) {
        for line in wrap(text, self.column) {
            self.push_at(0, vec![Span::styled(line, style)]);
        }
    }

    /// Wrapped, centered text
    pub fn centered(&mut self, text: &str, style: Style) {
        for line in wrap(text, self.column) {
            self.centered_spans(vec![Span::styled(line, style)]);
        }
    }

    /// A line showing the counter `key`
    pub fn counter(&mut self, key: CounterKey, spans: Vec<Span<'static>>, centered: bool) {
        self.counters.push((key, self.lines.len()));
        if centered {
            self.centered_spans(spans);
        } else {
            self.spans(spans);
        }
    }

    /// Section heading with an optional subtitle
    pub fn heading(&mut self, theme: &Theme, title: &str, subtitle: Option<&str>) {
        self.centered(title, theme.title().fg(theme.accent_strong));
        if let Some(subtitle) = subtitle {
            self.centered(subtitle, theme.dim());
        }
        self.blank();
    }

    /// Stat card: icon and title, value, optional subtitle and trend
    pub fn card(&mut self, theme: &Theme, card: Card) {
        let edge = || Span::styled("▎ ", Style::default().fg(theme.accent));

        self.spans(vec![
            edge(),
            Span::styled(format!("{} {}", card.icon, card.title), theme.dim()),
        ]);

        let value = vec![edge(), Span::styled(card.value, theme.highlight())];
        match card.counter {
            Some(key) => self.counter(key, value, false),
            None => self.spans(value),
        }

        if let Some(subtitle) = card.subtitle {
            self.spans(vec![edge(), Span::styled(subtitle, theme.dim())]);
        }
        if let Some(trend) = card.trend {
            let (arrow, color, tail) = if trend > 0.0 {
                ("↑", theme.success, "from last year")
            } else if trend < 0.0 {
                ("↓", theme.error, "from last year")
            } else {
                ("→", theme.muted, "unchanged")
            };
            self.spans(vec![
                edge(),
                Span::styled(
                    format!("{} {}% {}", arrow, wrapped_core::format::format_amount(trend.abs()), tail),
                    Style::default().fg(color),
                ),
            ]);
        }
        self.blank();
    }

    /// Equal-width cells of value over label, stacked on narrow columns
    pub fn grid(&mut self, theme: &Theme, cells: &[(String, &str)]) {
        if cells.is_empty() {
            return;
        }
        if self.column < MIN_GRID_WIDTH {
            for (value, label) in cells {
                self.centered_spans(vec![
                    Span::styled(value.clone(), theme.highlight()),
                    Span::styled(format!(" {}", label), theme.dim()),
                ]);
            }
            return;
        }

        let cell = self.column / cells.len();
        let row = |texts: Vec<(String, Style)>| -> Vec<Span<'static>> {
            texts
                .into_iter()
                .map(|(text, style)| {
                    let width = text.width();
                    let left = cell.saturating_sub(width) / 2;
                    let right = cell.saturating_sub(width + left);
                    Span::styled(format!("{}{}{}", " ".repeat(left), text, " ".repeat(right)), style)
                })
                .collect()
        };

        let values = row(cells.iter().map(|(v, _)| (v.clone(), theme.highlight())).collect());
        let labels = row(cells.iter().map(|(_, l)| (l.to_string(), theme.dim())).collect());
        self.spans(values);
        self.spans(labels);
    }

    /// Horizontal bar filled to `fraction` of the column
    pub fn bar(&mut self, fraction: f64, fill: Color, track: Color, label: Option<String>) {
        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
        let filled = (fraction * self.column as f64).round() as usize;

        let mut spans = Vec::with_capacity(3);
        match label {
            // Label sits inside the filled part when it fits
            Some(label) if label.width() + 1 < filled => {
                let fill_width = filled - label.width() - 1;
                spans.push(Span::styled("█".repeat(fill_width), Style::default().fg(fill)));
                spans.push(Span::styled(
                    format!("{} ", label),
                    Style::default().bg(fill).fg(Color::Black).add_modifier(Modifier::BOLD),
                ));
            }
            _ => spans.push(Span::styled("█".repeat(filled), Style::default().fg(fill))),
        }
        spans.push(Span::styled(
            "░".repeat(self.column - filled),
            Style::default().fg(track),
        ));
        self.spans(spans);
    }

    /// Label on the left, value on the right edge of the column
    pub fn row(&mut self, left: Vec<Span<'static>>, right: Span<'static>) {
        let used = spans_width(&left) + right.content.width();
        let mut spans = left;
        spans.push(Span::raw(" ".repeat(self.column.saturating_sub(used).max(1))));
        spans.push(right);
        self.spans(spans);
    }

    /// Placeholder cards shown while the summary loads
    pub fn skeleton(&mut self, theme: &Theme, cards: usize) {
        let style = Style::default().fg(theme.track);
        let short = (self.column / 3).max(1);
        for _ in 0..cards {
            self.spans(vec![Span::styled("▒".repeat(short), style)]);
            self.spans(vec![Span::styled("▒".repeat((self.column * 2 / 3).max(1)), style)]);
            self.spans(vec![Span::styled("▒".repeat((short / 2).max(1)), style)]);
            self.blank();
        }
    }
}

/// Contents of a stat card
#[derive(Debug, Clone, Default)]
pub struct Card {
    pub icon: &'static str,
    pub title: &'static str,
    pub value: String,
    pub counter: Option<CounterKey>,
    pub subtitle: Option<String>,
    pub trend: Option<f64>,
}

impl Card {
    pub fn new(icon: &'static str, title: &'static str, value: impl Into<String>) -> Self {
        Self {
            icon,
            title,
            value: value.into(),
            ..Default::default()
        }
    }

    /// Card whose value is the live text of an animated counter
    pub fn counter(icon: &'static str, title: &'static str, key: CounterKey, text: String) -> Self {
        Self {
            counter: Some(key),
            ..Self::new(icon, title, text)
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn trend(mut self, trend: f64) -> Self {
        self.trend = Some(trend);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("a\nb", 10), vec!["a", "b"]);
    }

    #[test]
    fn test_wrap_wide_chars() {
        // Each emoji is two columns wide
        assert_eq!(wrap("🎉🎉🎉", 4), vec!["🎉🎉", "🎉"]);
    }

    #[test]
    fn test_column_is_centered() {
        let mut content = Content::new(100);
        assert_eq!(content.column(), 64);
        content.text("hi", Style::default());
        assert_eq!(plain(&content.into_parts().0[0]), format!("{}hi", " ".repeat(18)));
    }

    #[test]
    fn test_counter_rows_are_recorded() {
        let theme = Theme::default();
        let mut content = Content::new(60);
        content.heading(&theme, "Title", Some("Sub"));
        content.card(
            &theme,
            Card::counter("💰", "Total Spent", CounterKey::TotalSpent, "₦0".to_string()),
        );
        let (lines, counters) = content.into_parts();
        assert_eq!(counters, vec![(CounterKey::TotalSpent, 4)]);
        assert!(plain(&lines[4]).contains("₦0"));
    }

    #[test]
    fn test_bar_fills_column() {
        let theme = Theme::default();
        let mut content = Content::new(20);
        content.bar(0.5, theme.accent, theme.track, None);
        content.bar(2.0, theme.accent, theme.track, Some("85%".to_string()));
        content.bar(f64::NAN, theme.accent, theme.track, None);
        let (lines, _) = content.into_parts();
        assert_eq!(plain(&lines[0]), format!("{}{}", "█".repeat(10), "░".repeat(10)));
        assert!(plain(&lines[1]).ends_with("85% "));
        assert_eq!(plain(&lines[2]), "░".repeat(20));
    }

    #[test]
    fn test_grid_stacks_when_narrow() {
        let theme = Theme::default();
        let cells = [("289".to_string(), "Transactions"), ("Gold".to_string(), "Tier")];

        let mut wide = Content::new(60);
        wide.grid(&theme, &cells);
        assert_eq!(wide.len(), 2);

        let mut narrow = Content::new(30);
        narrow.grid(&theme, &cells);
        assert_eq!(narrow.len(), 2);
        assert!(plain(&narrow.into_parts().0[0]).contains("289 Transactions"));
    }
}
