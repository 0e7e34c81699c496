use std::sync::Arc;
use std::time::Instant;

use ratatui::layout::Rect;
use tracing::{debug, info, warn};
use wrapped_core::share::share_action;
use wrapped_core::{
    AppConfig, DataState, Error, MotionController, MotionPreference, ShareAction, ShareTarget,
};

use crate::document::SectionId;
use crate::event::DataLoadResult;
use crate::presentation::Presentation;
use crate::reveal::RowSpan;
use crate::scroll::{ScrollAnimator, ScrollMetrics, ScrollProgressTracker};
use crate::theme::Theme;
use crate::widgets::{dot_at, screen_layout};

/// Width used for layout before the terminal size is known
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Rows moved per mouse wheel notch
const WHEEL_LINES: i32 = 3;

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal scrolling mode
    Normal,
    /// Share target picker
    ShareMenu { selected: usize },
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    /// Current application mode
    pub mode: Mode,
    /// Summary load state
    pub data: DataState,
    /// Name of the data source, for the status bar
    pub source_name: String,
    pub presentation: Presentation,
    pub scroll: ScrollAnimator,
    pub progress: ScrollProgressTracker,
    motion: MotionController,
    motion_seen: MotionPreference,
    /// Content area of the last frame, `None` before the first draw
    pub viewport: Option<Rect>,
    /// Full terminal area of the last frame
    pub screen: Option<Rect>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    reload_requested: bool,
    spinner_frame: usize,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme, motion: MotionController) -> Self {
        let preference = motion.preference();
        Self {
            presentation: Presentation::new(config.motion.clone(), preference.clone()),
            scroll: ScrollAnimator::new(config.ui.scroll.clone(), preference.clone()),
            progress: ScrollProgressTracker::new(),
            config,
            theme,
            mode: Mode::Normal,
            data: DataState::loading(),
            source_name: String::new(),
            motion,
            motion_seen: preference,
            viewport: None,
            screen: None,
            should_quit: false,
            status_message: None,
            pending_key: None,
            reload_requested: false,
            spinner_frame: 0,
        }
    }

    pub fn reduce_motion(&self) -> bool {
        self.motion.reduce_motion()
    }

    fn viewport_height(&self) -> u16 {
        self.viewport.map(|r| r.height).unwrap_or(FALLBACK_SIZE.1)
    }

    fn max_scroll(&self) -> u16 {
        self.presentation
            .document()
            .max_scroll(self.viewport_height())
    }

    /// Bring every animated component to the frame at `now`
    ///
    /// `area` is the full terminal; `None` when its size is unknown, in
    /// which case every reveal fires immediately.
    pub fn prepare_frame(&mut self, area: Option<Rect>, now: Instant) {
        if self.motion_seen.has_changed() {
            let reduce = self.motion_seen.mark_seen();
            if reduce {
                self.scroll.cancel();
            }
        }

        let resized = area != self.screen;
        self.screen = area;
        self.viewport = area.map(|a| screen_layout(a).content);
        let (width, height) = self
            .viewport
            .map(|r| (r.width, r.height))
            .unwrap_or(FALLBACK_SIZE);

        self.presentation.sync_data(&self.data);
        self.presentation.update(now);
        let document = self.presentation.relayout(
            &self.data,
            &self.theme,
            &self.config.keymap,
            width,
            height,
            now,
        );
        let document_height = document.height();
        let max_scroll = document.max_scroll(height);

        let scrolled = self.scroll.update(max_scroll, now);
        let metrics = ScrollMetrics::new(scrolled, document_height, height);
        if !self.progress.is_mounted() {
            self.progress.mount(metrics);
        } else if resized {
            self.progress.on_resize(metrics);
        } else if self.progress.metrics() != Some(metrics) {
            self.progress.on_scroll(metrics);
        }

        let visible = self.viewport.map(|_| RowSpan::new(scrolled, height));
        self.presentation.observe(visible, now);
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_fast_update(&self, now: Instant) -> bool {
        self.scroll.needs_update() || self.presentation.needs_update(now)
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll.current_scroll()
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress.progress_percent()
    }

    /// Section under the top of the viewport
    pub fn current_section(&self) -> Option<SectionId> {
        self.presentation
            .document()
            .section_at(self.scroll.current_scroll())
            .map(|s| s.id)
    }

    pub fn scroll_down(&mut self) {
        let max = self.max_scroll();
        self.scroll.scroll_down(max);
    }

    pub fn scroll_up(&mut self) {
        let max = self.max_scroll();
        self.scroll.scroll_up(max);
    }

    pub fn scroll_half_page_down(&mut self) {
        let (height, max) = (self.viewport_height(), self.max_scroll());
        self.scroll.scroll_half_page_down(height, max);
    }

    pub fn scroll_half_page_up(&mut self) {
        let (height, max) = (self.viewport_height(), self.max_scroll());
        self.scroll.scroll_half_page_up(height, max);
    }

    pub fn scroll_page_down(&mut self) {
        let (height, max) = (self.viewport_height(), self.max_scroll());
        self.scroll.scroll_full_page_down(height, max);
    }

    pub fn scroll_page_up(&mut self) {
        let (height, max) = (self.viewport_height(), self.max_scroll());
        self.scroll.scroll_full_page_up(height, max);
    }

    /// Mouse wheel; positive is down
    pub fn wheel(&mut self, notches: i32) {
        let max = self.max_scroll();
        self.scroll.scroll_by(notches * WHEEL_LINES, max);
    }

    pub fn jump_to_top(&mut self, now: Instant) {
        let max = self.max_scroll();
        self.scroll.scroll_to(0, max, now);
    }

    pub fn jump_to_bottom(&mut self, now: Instant) {
        let max = self.max_scroll();
        self.scroll.scroll_to(max, max, now);
    }

    pub fn next_section(&mut self, now: Instant) {
        let from = self.scroll.target_scroll();
        match self.presentation.document().next_section_top(from) {
            Some(top) => {
                let max = self.max_scroll();
                self.scroll.scroll_to(top, max, now);
            }
            None => self.jump_to_bottom(now),
        }
    }

    pub fn prev_section(&mut self, now: Instant) {
        let from = self.scroll.target_scroll();
        let top = self
            .presentation
            .document()
            .prev_section_top(from)
            .unwrap_or(0);
        let max = self.max_scroll();
        self.scroll.scroll_to(top, max, now);
    }

    /// Scroll to a section by position; absent sections are ignored
    pub fn jump_to_section(&mut self, index: usize, now: Instant) {
        let Some(&id) = SectionId::ALL.get(index) else {
            return;
        };
        match self.presentation.document().top_of(id) {
            Some(top) => {
                let max = self.max_scroll();
                self.scroll.scroll_to(top, max, now);
            }
            None => self.set_status(format!("{} is not available yet", id.label())),
        }
    }

    pub fn skip_to_share(&mut self, now: Instant) {
        self.jump_to_section(SectionId::Share.index(), now);
    }

    /// Left click at a screen position; returns true when it hit a section dot
    pub fn click(&mut self, column: u16, row: u16, now: Instant) -> bool {
        let Some(screen) = self.screen else {
            return false;
        };
        match dot_at(&screen_layout(screen), SectionId::ALL.len(), column, row) {
            Some(index) => {
                self.jump_to_section(index, now);
                true
            }
            None => false,
        }
    }

    /// Flip reduced motion for every animated component
    pub fn toggle_motion(&mut self) {
        let reduce = self.motion.toggle();
        info!(reduce_motion = reduce, "Motion preference toggled");
        self.set_status(if reduce {
            "Reduced motion on"
        } else {
            "Reduced motion off"
        });
    }

    /// Ask for the summary to be fetched again
    pub fn request_reload(&mut self) {
        if self.data.loading {
            return;
        }
        self.data.begin_reload();
        self.reload_requested = true;
        self.set_status("Reloading...");
    }

    /// Take a pending reload request
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    pub fn apply_data_result(&mut self, result: DataLoadResult) {
        match result {
            DataLoadResult::Loaded(data) => {
                debug!(year = data.year, user = %data.user.name, "Summary loaded");
                self.data.set_loaded(data);
                self.clear_status();
            }
            DataLoadResult::Failed(error) => {
                warn!(error = %error, "Failed to load summary");
                self.data.set_failed(error);
                self.set_status("Failed to load your Wrapped");
            }
        }
    }

    pub fn open_share_menu(&mut self) {
        if self.data.data().is_some() {
            self.mode = Mode::ShareMenu { selected: 0 };
        } else {
            self.set_status("Nothing to share yet");
        }
    }

    pub fn menu_down(&mut self) {
        if let Mode::ShareMenu { selected } = &mut self.mode {
            *selected = (*selected + 1) % ShareTarget::ALL.len();
        }
    }

    pub fn menu_up(&mut self) {
        if let Mode::ShareMenu { selected } = &mut self.mode {
            *selected = (*selected + ShareTarget::ALL.len() - 1) % ShareTarget::ALL.len();
        }
    }

    /// Target highlighted in the share menu
    pub fn selected_share_target(&self) -> Option<ShareTarget> {
        match self.mode {
            Mode::ShareMenu { selected } => ShareTarget::ALL.get(selected).copied(),
            _ => None,
        }
    }

    /// Build the share action for `target` from the loaded summary
    pub fn share_action(&self, target: ShareTarget) -> wrapped_core::Result<ShareAction> {
        let data = self
            .data
            .data()
            .ok_or_else(|| Error::Share("Summary is not loaded".to_string()))?;
        share_action(target, data, &self.config.share.url)
    }

    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame]
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Clear the pending key
    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    /// Stop all animation; used on shutdown
    pub fn teardown(&mut self) {
        self.scroll.cancel();
        self.presentation.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wrapped_core::data::sample_summary;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 32,
    };

    fn app(reduce: bool) -> App {
        App::new(
            Arc::new(AppConfig::default()),
            Theme::default(),
            MotionController::new(reduce),
        )
    }

    fn loaded_app(reduce: bool) -> App {
        let mut app = app(reduce);
        app.apply_data_result(DataLoadResult::Loaded(sample_summary()));
        app.prepare_frame(Some(SCREEN), Instant::now());
        app
    }

    #[test]
    fn test_progress_mounts_on_first_frame() {
        let mut app = app(false);
        assert!(!app.progress.is_mounted());
        app.prepare_frame(Some(SCREEN), Instant::now());
        assert!(app.progress.is_mounted());
        assert_eq!(app.progress_percent(), 0.0);
    }

    #[test]
    fn test_section_navigation_reduced_motion() {
        let mut app = loaded_app(true);
        let now = Instant::now();
        let spending = app
            .presentation
            .document()
            .top_of(SectionId::Spending)
            .unwrap();

        app.next_section(now);
        app.prepare_frame(Some(SCREEN), now);
        assert_eq!(app.scroll_offset(), spending);
        assert_eq!(app.current_section(), Some(SectionId::Spending));
        assert!(app.progress_percent() > 0.0);

        app.prev_section(now);
        app.prepare_frame(Some(SCREEN), now);
        assert_eq!(app.scroll_offset(), 0);
    }

    #[test]
    fn test_skip_to_share_reaches_the_end() {
        let mut app = loaded_app(true);
        let now = Instant::now();
        app.skip_to_share(now);
        app.prepare_frame(Some(SCREEN), now);
        assert_eq!(app.current_section(), Some(SectionId::Share));
        assert_eq!(app.progress_percent(), 100.0);
    }

    #[test]
    fn test_smooth_jump_animates() {
        let mut app = loaded_app(false);
        let t0 = Instant::now();
        app.jump_to_bottom(t0);
        assert!(app.needs_fast_update(t0));
        app.prepare_frame(Some(SCREEN), t0 + Duration::from_secs(2));
        assert_eq!(app.scroll_offset(), app.max_scroll());
    }

    #[test]
    fn test_unknown_size_reveals_all_sections() {
        let mut app = app(false);
        app.apply_data_result(DataLoadResult::Loaded(sample_summary()));
        app.prepare_frame(None, Instant::now());
        assert!(app.viewport.is_none());
        for id in SectionId::ALL {
            assert!(app.presentation.reveal(id).unwrap().has_entered());
        }
    }

    #[test]
    fn test_failed_load_and_retry() {
        let mut app = app(false);
        app.apply_data_result(DataLoadResult::Failed("Failed to fetch data".into()));
        assert!(app.data.has_failed());
        assert!(!app.take_reload_request());

        app.request_reload();
        assert!(app.data.loading);
        assert!(app.take_reload_request());
        assert!(!app.take_reload_request());

        // A second request while loading is ignored
        app.request_reload();
        assert!(!app.take_reload_request());
    }

    #[test]
    fn test_toggle_motion_reaches_animators() {
        let mut app = loaded_app(false);
        app.toggle_motion();
        assert!(app.reduce_motion());
        let now = Instant::now();
        app.jump_to_bottom(now);
        assert!(!app.scroll.needs_update());
        app.toggle_motion();
        assert!(!app.reduce_motion());
    }

    #[test]
    fn test_share_menu_cycles() {
        let mut app = app(false);
        app.open_share_menu();
        assert_eq!(app.mode, Mode::Normal);

        app.apply_data_result(DataLoadResult::Loaded(sample_summary()));
        app.open_share_menu();
        assert_eq!(app.selected_share_target(), Some(ShareTarget::ALL[0]));
        app.menu_up();
        assert_eq!(
            app.selected_share_target(),
            Some(ShareTarget::ALL[ShareTarget::ALL.len() - 1])
        );
        app.menu_down();
        app.menu_down();
        assert_eq!(app.selected_share_target(), Some(ShareTarget::ALL[1]));
    }

    #[test]
    fn test_share_needs_data() {
        let app = app(false);
        assert!(app.share_action(ShareTarget::Copy).is_err());

        let app = loaded_app(false);
        assert!(matches!(
            app.share_action(ShareTarget::Copy),
            Ok(ShareAction::CopyText(_))
        ));
    }

    #[test]
    fn test_click_on_dot_jumps() {
        let mut app = loaded_app(true);
        let layout = screen_layout(SCREEN);
        let (x, y) = crate::widgets::dot_position(&layout, SectionId::ALL.len(), 2)
            .expect("rail fits eight dots");
        let now = Instant::now();
        assert!(app.click(x, y, now));
        app.prepare_frame(Some(SCREEN), now);
        assert_eq!(app.current_section(), Some(SectionId::Habits));
        assert!(!app.click(0, 0, now));
    }
}
