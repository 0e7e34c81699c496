mod popup;
mod presentation;
mod progress;
mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub use popup::PopupWidget;
pub use presentation::PresentationWidget;
pub use progress::ProgressWidget;
pub use status_bar::StatusBarWidget;

/// Columns reserved for the section dots
const RAIL_WIDTH: u16 = 4;

/// Narrower terminals drop the dot rail
const MIN_WIDTH_FOR_RAIL: u16 = 30;

/// Screen regions of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// One-row progress bar along the top
    pub progress: Rect,
    /// Scrolling document
    pub content: Rect,
    /// Section dots on the right edge
    pub rail: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let rail_width = if area.width >= MIN_WIDTH_FOR_RAIL {
        RAIL_WIDTH
    } else {
        0
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(rail_width)])
        .split(rows[1]);

    ScreenLayout {
        progress: rows[0],
        content: columns[0],
        rail: columns[1],
        status: rows[2],
    }
}

/// Screen cell of dot `index` out of `count`, if the rail can hold them all
pub fn dot_position(layout: &ScreenLayout, count: usize, index: usize) -> Option<(u16, u16)> {
    let rail = layout.rail;
    if index >= count || rail.width == 0 {
        return None;
    }
    let count = u16::try_from(count).ok()?;
    let spacing = if rail.height >= count * 2 - 1 {
        2
    } else if rail.height >= count {
        1
    } else {
        return None;
    };
    let total = (count - 1) * spacing + 1;
    let top = rail.y + (rail.height - total) / 2;
    let index = u16::try_from(index).ok()?;
    Some((rail.x + rail.width / 2, top + index * spacing))
}

/// Which dot a click at (`column`, `row`) lands on; the whole rail width counts
pub fn dot_at(layout: &ScreenLayout, count: usize, column: u16, row: u16) -> Option<usize> {
    let rail = layout.rail;
    if column < rail.x || column >= rail.x + rail.width {
        return None;
    }
    (0..count).find(|&i| dot_position(layout, count, i).is_some_and(|(_, y)| y == row))
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_layout() {
        let layout = screen_layout(Rect::new(0, 0, 100, 32));
        assert_eq!(layout.progress, Rect::new(0, 0, 100, 1));
        assert_eq!(layout.content, Rect::new(0, 1, 96, 30));
        assert_eq!(layout.rail, Rect::new(96, 1, 4, 30));
        assert_eq!(layout.status, Rect::new(0, 31, 100, 1));
    }

    #[test]
    fn test_narrow_screen_has_no_rail() {
        let layout = screen_layout(Rect::new(0, 0, 20, 10));
        assert_eq!(layout.rail.width, 0);
        assert_eq!(layout.content.width, 20);
        assert_eq!(dot_position(&layout, 8, 0), None);
    }

    #[test]
    fn test_dot_positions_and_hits() {
        let layout = screen_layout(Rect::new(0, 0, 100, 32));
        // 8 dots two rows apart take 15 rows, centered in 30
        assert_eq!(dot_position(&layout, 8, 0), Some((98, 8)));
        assert_eq!(dot_position(&layout, 8, 7), Some((98, 22)));
        assert_eq!(dot_at(&layout, 8, 97, 10), Some(1));
        assert_eq!(dot_at(&layout, 8, 97, 9), None);
        assert_eq!(dot_at(&layout, 8, 50, 10), None);
    }

    #[test]
    fn test_short_rail_packs_dots() {
        let layout = screen_layout(Rect::new(0, 0, 100, 12));
        // 10 content rows: spacing drops to one
        assert_eq!(dot_position(&layout, 8, 0), Some((98, 2)));
        assert_eq!(dot_position(&layout, 8, 7), Some((98, 9)));

        let tiny = screen_layout(Rect::new(0, 0, 100, 6));
        assert_eq!(dot_position(&tiny, 8, 0), None);
    }
}
