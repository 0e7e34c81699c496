//! Animation state of the whole presentation
//!
//! Owns one [`SectionReveal`] per section and one [`AnimatedCounter`] per
//! counter key, and keeps the laid-out [`Document`] for the current frame.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;
use wrapped_core::config::{KeymapConfig, MotionConfig};
use wrapped_core::{DataState, MotionPreference, WrappedData};

use crate::counter::AnimatedCounter;
use crate::document::{CounterKey, Document, LayoutInput, SectionId};
use crate::reveal::{measure, RevealOptions, RowSpan, SectionReveal};
use crate::theme::Theme;

/// Extra entrance delay of the hero content
const HERO_DELAY: Duration = Duration::from_millis(300);

pub struct Presentation {
    motion: MotionPreference,
    config: MotionConfig,
    reveals: Vec<SectionReveal>,
    counters: HashMap<CounterKey, AnimatedCounter>,
    document: Document,
    /// Summary the counters were built from
    synced: Option<Arc<WrappedData>>,
}

impl Presentation {
    pub fn new(config: MotionConfig, motion: MotionPreference) -> Self {
        let reveals = SectionId::ALL
            .iter()
            .map(|&id| {
                let reveal = SectionReveal::from_config(&config, motion.clone());
                if id == SectionId::Hero {
                    let delay = Duration::from_millis(config.section_delay_ms) + HERO_DELAY;
                    reveal.with_delay(delay)
                } else {
                    reveal
                }
            })
            .collect();

        Self {
            motion,
            config,
            reveals,
            counters: HashMap::new(),
            document: Document::default(),
            synced: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn reveal(&self, id: SectionId) -> Option<&SectionReveal> {
        self.reveals.get(id.index())
    }

    pub fn counter(&self, key: CounterKey) -> Option<&AnimatedCounter> {
        self.counters.get(&key)
    }

    /// Create or retarget counters when a new summary arrives
    pub fn sync_data(&mut self, state: &DataState) {
        let Some(data) = state.data.as_ref() else {
            return;
        };
        if self.synced.as_ref().is_some_and(|s| Arc::ptr_eq(s, data)) {
            return;
        }

        let options = RevealOptions::from(&self.config);
        let duration = Duration::from_millis(self.config.counter_duration_ms);
        for key in CounterKey::ALL {
            let target = key.target(data);
            match self.counters.get_mut(&key) {
                Some(counter) => counter.set_end(target),
                None => {
                    let counter =
                        AnimatedCounter::new(target, key.format(), options, self.motion.clone())
                            .with_duration(duration);
                    self.counters.insert(key, counter);
                }
            }
        }
        debug!(counters = self.counters.len(), "Counters synced to new summary");
        self.synced = Some(Arc::clone(data));
    }

    /// Advance counters to `now`
    pub fn update(&mut self, now: Instant) {
        // Finished counters are updated too so a motion change restarts them
        for counter in self.counters.values_mut() {
            counter.update(now);
        }
    }

    /// Rebuild the document for the current frame
    pub fn relayout(
        &mut self,
        data: &DataState,
        theme: &Theme,
        keys: &KeymapConfig,
        width: u16,
        viewport_height: u16,
        now: Instant,
    ) -> &Document {
        let input = LayoutInput {
            data,
            theme,
            keys,
            counters: &self.counters,
            reveals: &self.reveals,
            now,
        };
        self.document = Document::layout(&input, width, viewport_height);
        &self.document
    }

    /// Feed the visible window to every trigger
    ///
    /// `viewport` is `None` when the terminal size is unknown; every trigger
    /// then fires.
    pub fn observe(&mut self, viewport: Option<RowSpan>, now: Instant) {
        let margin = self.config.root_margin_rows;
        for section in self.document.sections() {
            let visibility = measure(Some(section.span()), viewport, margin);
            if let Some(reveal) = self.reveals.get_mut(section.id.index()) {
                let was_entered = reveal.has_entered();
                if reveal.observe(visibility, now) && !was_entered {
                    debug!(section = section.id.anchor(), "Section revealed");
                }
            }
            for &(key, row) in &section.counters {
                if let Some(counter) = self.counters.get_mut(&key) {
                    counter.observe(measure(Some(RowSpan::new(row, 1)), viewport, margin));
                }
            }
        }
    }

    /// Whether any reveal or counter still needs frames
    pub fn needs_update(&self, now: Instant) -> bool {
        self.reveals.iter().any(|r| r.needs_update(now))
            || self.counters.values().any(|c| c.needs_update())
    }

    /// Stop every counter where it is
    pub fn cancel(&mut self) {
        for counter in self.counters.values_mut() {
            counter.cancel();
        }
    }
}
