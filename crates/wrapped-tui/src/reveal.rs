//! One-shot viewport reveal
//!
//! A [`RevealTrigger`] watches how much of an element sits inside the
//! viewport and fires once, the first time enough of it is visible.
//! [`SectionReveal`] turns that signal into the entrance animation of a
//! section.

use std::time::{Duration, Instant};

use wrapped_core::config::MotionConfig;
use wrapped_core::MotionPreference;

use crate::scroll::easing::{cubic_ease_out, CubicBezier};
use crate::scroll::timing::progress_at;

/// Reveal progress below which content is drawn dimmed
const DIM_UNTIL: f64 = 0.6;

/// Vertical extent of something in document rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowSpan {
    pub top: u16,
    pub height: u16,
}

impl RowSpan {
    pub fn new(top: u16, height: u16) -> Self {
        Self { top, height }
    }

    fn bottom(&self) -> u32 {
        u32::from(self.top) + u32::from(self.height)
    }
}

/// Result of measuring an element against the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visibility {
    /// Visible fraction of the element, 0.0..=1.0
    Measured(f64),
    /// Geometry is not known yet
    Unavailable,
}

/// Fraction of `element` inside `viewport` after shrinking the viewport by
/// `margin` rows at the top and at the bottom
///
/// The margin never shrinks the viewport below one row. A zero-height
/// element inside the shrunk viewport counts as fully visible.
pub fn intersection_ratio(element: RowSpan, viewport: RowSpan, margin: u16) -> f64 {
    let max_margin = viewport.height.saturating_sub(1) / 2;
    let margin = u32::from(margin.min(max_margin));
    let root_top = u32::from(viewport.top) + margin;
    let root_bottom = viewport.bottom().saturating_sub(margin).max(root_top);

    let element_top = u32::from(element.top);
    if element.height == 0 {
        let inside = element_top >= root_top && element_top <= root_bottom && root_bottom > root_top;
        return if inside { 1.0 } else { 0.0 };
    }

    let top = element_top.max(root_top);
    let bottom = element.bottom().min(root_bottom);
    if bottom <= top {
        return 0.0;
    }
    f64::from(bottom - top) / f64::from(element.height)
}

/// Measure `element` when both it and the viewport are known
pub fn measure(element: Option<RowSpan>, viewport: Option<RowSpan>, margin: u16) -> Visibility {
    match (element, viewport) {
        (Some(element), Some(viewport)) if viewport.height > 0 => {
            Visibility::Measured(intersection_ratio(element, viewport, margin))
        }
        _ => Visibility::Unavailable,
    }
}

/// Trigger tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Visible fraction required to fire
    pub threshold: f64,
    /// Rows trimmed off the top and bottom of the viewport
    pub root_margin: u16,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: 2,
        }
    }
}

impl From<&MotionConfig> for RevealOptions {
    fn from(config: &MotionConfig) -> Self {
        Self {
            threshold: config.reveal_threshold.clamp(0.0, 1.0),
            root_margin: config.root_margin_rows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Pending,
    Triggered,
}

/// Fires once when an element first becomes sufficiently visible
#[derive(Debug, Clone, Default)]
pub struct RevealTrigger {
    options: RevealOptions,
    state: RevealState,
}

impl RevealTrigger {
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            state: RevealState::Pending,
        }
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn has_entered(&self) -> bool {
        self.state == RevealState::Triggered
    }

    /// Feed one observation; returns whether the element has entered
    ///
    /// Missing geometry fires immediately so content is never stuck hidden.
    pub fn observe(&mut self, visibility: Visibility) -> bool {
        if self.state == RevealState::Pending {
            let fire = match visibility {
                Visibility::Measured(ratio) => ratio >= self.options.threshold,
                Visibility::Unavailable => true,
            };
            if fire {
                self.state = RevealState::Triggered;
            }
        }
        self.has_entered()
    }
}

/// Entrance animation of one section
#[derive(Debug, Clone)]
pub struct SectionReveal {
    trigger: RevealTrigger,
    motion: MotionPreference,
    duration: Duration,
    delay: Duration,
    max_offset: u16,
    triggered_at: Option<Instant>,
}

impl SectionReveal {
    pub fn new(options: RevealOptions, motion: MotionPreference) -> Self {
        Self {
            trigger: RevealTrigger::new(options),
            motion,
            duration: Duration::from_millis(800),
            delay: Duration::ZERO,
            max_offset: 2,
            triggered_at: None,
        }
    }

    pub fn from_config(config: &MotionConfig, motion: MotionPreference) -> Self {
        Self::new(RevealOptions::from(config), motion)
            .with_duration(Duration::from_millis(config.section_duration_ms))
            .with_delay(Duration::from_millis(config.section_delay_ms))
            .with_offset(config.reveal_offset_rows)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_offset(mut self, rows: u16) -> Self {
        self.max_offset = rows;
        self
    }

    pub fn has_entered(&self) -> bool {
        self.trigger.has_entered()
    }

    /// Feed one observation taken at `now`
    pub fn observe(&mut self, visibility: Visibility, now: Instant) -> bool {
        let was_entered = self.trigger.has_entered();
        if self.trigger.observe(visibility) && !was_entered {
            self.triggered_at = Some(now);
        }
        self.trigger.has_entered()
    }

    /// Eased entrance progress in [0, 1]
    pub fn progress(&self, now: Instant) -> f64 {
        if self.motion.reduce_motion() {
            return 1.0;
        }
        match self.triggered_at {
            Some(at) => CubicBezier::reveal().apply(progress_at(at + self.delay, now, self.duration)),
            None => 0.0,
        }
    }

    /// Progress of a staggered child element, eased out
    ///
    /// Starts `offset` after the section itself and runs for `duration`.
    pub fn child_progress(&self, now: Instant, offset: Duration, duration: Duration) -> f64 {
        if self.motion.reduce_motion() {
            return 1.0;
        }
        match self.triggered_at {
            Some(at) => cubic_ease_out(progress_at(at + self.delay + offset, now, duration)),
            None => 0.0,
        }
    }

    /// Rows the content is still pushed down by
    pub fn offset_rows(&self, now: Instant) -> u16 {
        let remaining = 1.0 - self.progress(now);
        (remaining * f64::from(self.max_offset)).round() as u16
    }

    /// Whether content should still be drawn dimmed
    pub fn is_dimmed(&self, now: Instant) -> bool {
        self.progress(now) < DIM_UNTIL
    }

    /// Hidden until triggered (motion permitting)
    pub fn is_hidden(&self, now: Instant) -> bool {
        self.progress(now) <= 0.0
    }

    /// Whether another frame is needed to finish the entrance
    pub fn needs_update(&self, now: Instant) -> bool {
        self.triggered_at.is_some() && self.progress(now) < 1.0
    }
}
