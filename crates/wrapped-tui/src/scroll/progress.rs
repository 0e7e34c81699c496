//! L3 Molecular Layer: Whole-document scroll progress
//!
//! Turns the scroll offset into a completion percentage for the progress bar
//! and classifies the section dots.

/// Scroll geometry at one instant, all in rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Rows scrolled past the top of the document
    pub scrolled: u16,
    /// Total rendered height of the document
    pub document_height: u16,
    /// Visible rows
    pub viewport_height: u16,
}

impl ScrollMetrics {
    pub fn new(scrolled: u16, document_height: u16, viewport_height: u16) -> Self {
        Self {
            scrolled,
            document_height,
            viewport_height,
        }
    }

    /// Largest valid offset
    pub fn max_scroll(&self) -> u16 {
        self.document_height.saturating_sub(self.viewport_height)
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.scrolled, self.document_height, self.viewport_height)
    }
}

/// Completion percentage in [0, 100]
///
/// A document no taller than the viewport has nothing to scroll and is at 0.
pub fn progress_percent(scrolled: u16, document_height: u16, viewport_height: u16) -> f64 {
    let height = f64::from(document_height) - f64::from(viewport_height);
    if height <= 0.0 {
        return 0.0;
    }
    (f64::from(scrolled) / height * 100.0).clamp(0.0, 100.0)
}

/// State of one section dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Completed,
    Active,
    Upcoming,
}

/// Classify `count` dots for a progress percentage
pub fn dot_states(progress: f64, count: usize) -> Vec<DotState> {
    let section_progress = progress.clamp(0.0, 100.0) / 100.0 * count as f64;
    (0..count)
        .map(|i| {
            let i = i as f64;
            if section_progress >= i && section_progress < i + 1.0 {
                DotState::Active
            } else if section_progress > i + 1.0 {
                DotState::Completed
            } else {
                DotState::Upcoming
            }
        })
        .collect()
}

/// Progress tracker fed by mount, scroll and resize notifications
///
/// Every notification recomputes from the metrics it carries; the most
/// recent one wins.
#[derive(Debug, Clone, Default)]
pub struct ScrollProgressTracker {
    metrics: Option<ScrollMetrics>,
    progress: f64,
}

impl ScrollProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial computation with the current geometry
    pub fn mount(&mut self, metrics: ScrollMetrics) -> f64 {
        self.recompute(metrics)
    }

    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> f64 {
        self.recompute(metrics)
    }

    pub fn on_resize(&mut self, metrics: ScrollMetrics) -> f64 {
        self.recompute(metrics)
    }

    fn recompute(&mut self, metrics: ScrollMetrics) -> f64 {
        self.metrics = Some(metrics);
        self.progress = metrics.progress_percent();
        self.progress
    }

    pub fn is_mounted(&self) -> bool {
        self.metrics.is_some()
    }

    /// Current percentage, 0 before mount
    pub fn progress_percent(&self) -> f64 {
        self.progress
    }

    pub fn metrics(&self) -> Option<ScrollMetrics> {
        self.metrics
    }

    pub fn dot_states(&self, count: usize) -> Vec<DotState> {
        dot_states(self.progress, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent_examples() {
        assert_eq!(progress_percent(0, 1000, 200), 0.0);
        assert_eq!(progress_percent(800, 1000, 200), 100.0);
        assert!((progress_percent(400, 1000, 200) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_document_is_zero() {
        assert_eq!(progress_percent(0, 200, 200), 0.0);
        assert_eq!(progress_percent(50, 200, 200), 0.0);
        assert_eq!(progress_percent(10, 100, 300), 0.0);
    }

    #[test]
    fn test_progress_always_in_range() {
        for scrolled in [0u16, 1, 50, 799, 800, 801, 5000, u16::MAX] {
            for doc in [0u16, 1, 200, 1000, u16::MAX] {
                for view in [0u16, 1, 200, 1000] {
                    let p = progress_percent(scrolled, doc, view);
                    assert!((0.0..=100.0).contains(&p), "{} {} {} -> {}", scrolled, doc, view, p);
                }
            }
        }
    }

    #[test]
    fn test_tracker_last_write_wins() {
        let mut tracker = ScrollProgressTracker::new();
        assert!(!tracker.is_mounted());
        assert_eq!(tracker.progress_percent(), 0.0);

        tracker.mount(ScrollMetrics::new(200, 1000, 200));
        assert!((tracker.progress_percent() - 25.0).abs() < 1e-9);

        tracker.on_scroll(ScrollMetrics::new(800, 1000, 200));
        assert_eq!(tracker.progress_percent(), 100.0);

        // Taller viewport after a resize leaves nothing to scroll
        tracker.on_resize(ScrollMetrics::new(800, 1000, 1200));
        assert_eq!(tracker.progress_percent(), 0.0);
    }

    #[test]
    fn test_dot_states() {
        use DotState::*;
        assert_eq!(dot_states(0.0, 4), vec![Active, Upcoming, Upcoming, Upcoming]);
        assert_eq!(dot_states(60.0, 4), vec![Completed, Completed, Active, Upcoming]);
        // Exactly on a boundary the finished dot is not yet completed
        assert_eq!(dot_states(50.0, 4), vec![Completed, Upcoming, Active, Upcoming]);
        assert_eq!(dot_states(100.0, 4), vec![Completed, Completed, Completed, Upcoming]);
    }
}
