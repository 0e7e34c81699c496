//! The scrollable document: sections stacked top to bottom
//!
//! Rebuilt every frame from the data state and animation state. Row
//! geometry only changes when the data state or the terminal size does.

pub mod blocks;
pub mod counters;
pub mod sections;

use std::collections::HashMap;
use std::time::Instant;

use ratatui::text::Line;
use wrapped_core::config::KeymapConfig;
use wrapped_core::DataState;

pub use counters::CounterKey;
pub use sections::SectionContext;

use crate::counter::AnimatedCounter;
use crate::reveal::{RowSpan, SectionReveal};
use crate::theme::Theme;

/// Blank rows above and below section content
const SECTION_PADDING: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Hero,
    Spending,
    Habits,
    Savings,
    Transport,
    Rewards,
    Personality,
    Share,
}

impl SectionId {
    pub const ALL: [SectionId; 8] = [
        SectionId::Hero,
        SectionId::Spending,
        SectionId::Habits,
        SectionId::Savings,
        SectionId::Transport,
        SectionId::Rewards,
        SectionId::Personality,
        SectionId::Share,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn anchor(&self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::Spending => "spending",
            SectionId::Habits => "habits",
            SectionId::Savings => "savings",
            SectionId::Transport => "transport",
            SectionId::Rewards => "rewards",
            SectionId::Personality => "personality",
            SectionId::Share => "share",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Hero => "Intro",
            SectionId::Spending => "Spending",
            SectionId::Habits => "Habits",
            SectionId::Savings => "Savings",
            SectionId::Transport => "Transport",
            SectionId::Rewards => "Rewards",
            SectionId::Personality => "Personality",
            SectionId::Share => "Share",
        }
    }
}

/// One laid-out section
#[derive(Debug, Clone)]
pub struct SectionView {
    pub id: SectionId,
    /// First document row of the section
    pub top: u16,
    pub height: u16,
    /// Document row of the first content line
    pub content_top: u16,
    pub lines: Vec<Line<'static>>,
    /// Counters and the document row each one is drawn on
    pub counters: Vec<(CounterKey, u16)>,
}

impl SectionView {
    pub fn span(&self) -> RowSpan {
        RowSpan::new(self.top, self.height)
    }

    pub fn contains(&self, row: u16) -> bool {
        row >= self.top && u32::from(row) < u32::from(self.top) + u32::from(self.height)
    }

    /// Content line drawn at document `row`, shifted down by `offset` rows
    pub fn line_at(&self, row: u16, offset: u16) -> Option<&Line<'static>> {
        let start = self.content_top.saturating_add(offset);
        let index = row.checked_sub(start)?;
        self.lines.get(usize::from(index))
    }
}

/// Inputs shared by every section for one layout pass
pub struct LayoutInput<'a> {
    pub data: &'a DataState,
    pub theme: &'a Theme,
    pub keys: &'a KeymapConfig,
    pub counters: &'a HashMap<CounterKey, AnimatedCounter>,
    /// Indexed by [`SectionId::index`]
    pub reveals: &'a [SectionReveal],
    pub now: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    sections: Vec<SectionView>,
    height: u16,
}

impl Document {
    /// Lay out every section for a `width` x `viewport_height` viewport
    pub fn layout(input: &LayoutInput<'_>, width: u16, viewport_height: u16) -> Self {
        let mut sections = Vec::with_capacity(SectionId::ALL.len());
        let mut top: u16 = 0;

        for id in SectionId::ALL {
            let Some(reveal) = input.reveals.get(id.index()) else {
                continue;
            };
            let ctx = SectionContext {
                data: input.data,
                theme: input.theme,
                keys: input.keys,
                counters: input.counters,
                reveal,
                now: input.now,
            };
            let Some(content) = sections::build(id, &ctx, width) else {
                continue;
            };

            let (lines, counters) = content.into_parts();
            let content_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
            let height = content_height
                .saturating_add(SECTION_PADDING * 2)
                .max(viewport_height);
            let content_top = top.saturating_add((height - content_height) / 2);
            let counters = counters
                .into_iter()
                .map(|(key, index)| {
                    let row = content_top.saturating_add(u16::try_from(index).unwrap_or(u16::MAX));
                    (key, row)
                })
                .collect();

            sections.push(SectionView {
                id,
                top,
                height,
                content_top,
                lines,
                counters,
            });
            top = top.saturating_add(height);
        }

        Self { sections, height: top }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn sections(&self) -> &[SectionView] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionView> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn top_of(&self, id: SectionId) -> Option<u16> {
        self.section(id).map(|s| s.top)
    }

    pub fn max_scroll(&self, viewport_height: u16) -> u16 {
        self.height.saturating_sub(viewport_height)
    }

    /// Section covering document `row`
    pub fn section_at(&self, row: u16) -> Option<&SectionView> {
        self.sections.iter().find(|s| s.contains(row))
    }

    /// Top of the first section starting below `row`
    pub fn next_section_top(&self, row: u16) -> Option<u16> {
        self.sections.iter().map(|s| s.top).find(|&top| top > row)
    }

    /// Top of the last section starting above `row`
    pub fn prev_section_top(&self, row: u16) -> Option<u16> {
        self.sections.iter().map(|s| s.top).filter(|&top| top < row).last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::RevealOptions;
    use wrapped_core::data::sample_summary;
    use wrapped_core::MotionController;

    fn layout_for(state: &DataState, width: u16, height: u16) -> Document {
        let motion = MotionController::new(true);
        let reveals: Vec<SectionReveal> = SectionId::ALL
            .iter()
            .map(|_| SectionReveal::new(RevealOptions::default(), motion.preference()))
            .collect();
        let theme = Theme::default();
        let keys = KeymapConfig::default();
        let counters = HashMap::new();
        let input = LayoutInput {
            data: state,
            theme: &theme,
            keys: &keys,
            counters: &counters,
            reveals: &reveals,
            now: Instant::now(),
        };
        Document::layout(&input, width, height)
    }

    fn loaded() -> DataState {
        let mut state = DataState::loading();
        state.set_loaded(sample_summary());
        state
    }

    #[test]
    fn test_sections_stack_and_fill_viewport() {
        let doc = layout_for(&loaded(), 80, 30);
        assert_eq!(doc.sections().len(), 8);

        let mut expected_top = 0;
        for section in doc.sections() {
            assert_eq!(section.top, expected_top);
            assert!(section.height >= 30);
            assert!(usize::from(section.height) >= section.lines.len());
            expected_top += section.height;
        }
        assert_eq!(doc.height(), expected_top);
    }

    #[test]
    fn test_counters_sit_inside_their_section() {
        let doc = layout_for(&loaded(), 80, 30);
        let mut seen = 0;
        for section in doc.sections() {
            for &(key, row) in &section.counters {
                assert_eq!(key.section(), section.id);
                assert!(section.contains(row));
                seen += 1;
            }
        }
        assert_eq!(seen, CounterKey::ALL.len());
    }

    #[test]
    fn test_failed_load_keeps_hero_spending_share() {
        let mut state = DataState::loading();
        state.set_failed("boom");
        let doc = layout_for(&state, 80, 24);
        let ids: Vec<SectionId> = doc.sections().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![SectionId::Hero, SectionId::Spending, SectionId::Share]);
    }

    #[test]
    fn test_section_navigation() {
        let doc = layout_for(&loaded(), 80, 30);
        let spending = doc.top_of(SectionId::Spending).unwrap();
        assert_eq!(doc.next_section_top(0), Some(spending));
        assert_eq!(doc.prev_section_top(spending), Some(0));
        assert_eq!(doc.prev_section_top(0), None);
        assert_eq!(doc.section_at(spending).map(|s| s.id), Some(SectionId::Spending));
        let share = doc.top_of(SectionId::Share).unwrap();
        assert_eq!(doc.next_section_top(share), None);
    }

    #[test]
    fn test_line_offset() {
        let doc = layout_for(&loaded(), 80, 30);
        let hero = &doc.sections()[0];
        assert!(hero.line_at(hero.content_top, 0).is_some());
        assert!(hero.line_at(hero.content_top, 2).is_none());
    }
}
