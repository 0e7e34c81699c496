//! Count-up number animation
//!
//! [`CountUpAnimator`] interpolates from zero to a target with an ease-out
//! cubic curve. It is pulled once per frame like the scroll animator: ask
//! `needs_update()`, then call `update(now)`. [`AnimatedCounter`] pairs it
//! with its own reveal trigger and a display format.

use std::time::{Duration, Instant};

use wrapped_core::format::CounterFormat;
use wrapped_core::MotionPreference;

use crate::reveal::{RevealOptions, RevealTrigger, Visibility};
use crate::scroll::easing::cubic_ease_out;
use crate::scroll::timing::progress_at;

pub const DEFAULT_COUNTER_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No start signal yet
    Idle,
    /// Started; the first frame will capture the start time
    Waiting,
    Running { start: Instant },
    Done,
    /// Torn down; nothing changes any more
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct CountUpAnimator {
    end: f64,
    duration: Duration,
    should_start: bool,
    phase: Phase,
    current: f64,
}

impl CountUpAnimator {
    pub fn new(end: f64, duration: Duration) -> Self {
        Self {
            end,
            duration,
            should_start: false,
            phase: Phase::Idle,
            current: 0.0,
        }
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn is_cancelled(&self) -> bool {
        self.phase == Phase::Cancelled
    }

    /// Whether a frame is requested
    pub fn needs_update(&self) -> bool {
        matches!(self.phase, Phase::Waiting | Phase::Running { .. })
    }

    /// Gate the animation; it runs only while the signal is held
    pub fn set_should_start(&mut self, should_start: bool) {
        if self.phase == Phase::Cancelled || self.should_start == should_start {
            return;
        }
        self.should_start = should_start;
        self.phase = if should_start { Phase::Waiting } else { Phase::Idle };
    }

    pub fn set_end(&mut self, end: f64) {
        if self.end.to_bits() != end.to_bits() {
            self.end = end;
            self.restart();
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        if self.duration != duration {
            self.duration = duration;
            self.restart();
        }
    }

    fn restart(&mut self) {
        if self.should_start && self.phase != Phase::Cancelled {
            self.phase = Phase::Waiting;
        }
    }

    /// Advance to the frame at `now` and return the displayed value
    pub fn update(&mut self, now: Instant) -> f64 {
        let start = match self.phase {
            Phase::Waiting => {
                self.phase = Phase::Running { start: now };
                now
            }
            Phase::Running { start } => start,
            Phase::Idle | Phase::Done | Phase::Cancelled => return self.current,
        };

        let ratio = progress_at(start, now, self.duration);
        if ratio >= 1.0 {
            self.current = self.end;
            self.phase = Phase::Done;
        } else {
            self.current = self.end * cubic_ease_out(ratio);
        }
        self.current
    }

    /// Drop the pending frame request; the value stays where it is
    pub fn cancel(&mut self) {
        self.phase = Phase::Cancelled;
    }
}

/// A formatted number that counts up the first time it scrolls into view
#[derive(Debug, Clone)]
pub struct AnimatedCounter {
    trigger: RevealTrigger,
    animator: CountUpAnimator,
    format: CounterFormat,
    motion: MotionPreference,
    duration: Duration,
}

impl AnimatedCounter {
    pub fn new(end: f64, format: CounterFormat, options: RevealOptions, motion: MotionPreference) -> Self {
        let duration = DEFAULT_COUNTER_DURATION;
        Self {
            trigger: RevealTrigger::new(options),
            animator: CountUpAnimator::new(end, motion.effective(duration)),
            format,
            motion,
            duration,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self.animator.set_duration(self.motion.effective(duration));
        self
    }

    pub fn has_entered(&self) -> bool {
        self.trigger.has_entered()
    }

    /// Feed a visibility measurement of the counter's own row
    pub fn observe(&mut self, visibility: Visibility) {
        if self.trigger.observe(visibility) {
            self.animator.set_should_start(true);
        }
    }

    pub fn set_end(&mut self, end: f64) {
        self.animator.set_end(end);
    }

    pub fn update(&mut self, now: Instant) -> f64 {
        self.animator.set_duration(self.motion.effective(self.duration));
        self.animator.update(now)
    }

    pub fn needs_update(&self) -> bool {
        self.animator.needs_update()
    }

    pub fn value(&self) -> f64 {
        self.animator.value()
    }

    pub fn text(&self) -> String {
        self.format.apply(self.animator.value())
    }

    /// Text at the final value, used to reserve layout width
    pub fn final_text(&self) -> String {
        self.format.apply(self.animator.end())
    }

    pub fn cancel(&mut self) {
        self.animator.cancel();
    }
}
