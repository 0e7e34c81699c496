//! Scroll-driven motion for the presentation
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing functions and the cubic Bézier reveal curve
//! - `timing` - Time calculation utilities (progress, interpolation)
//! - `config` - Configuration types (re-exported from wrapped-core)
//!
//! ## L3 Molecular Layer
//! - `animation` - Viewport scroll animation
//! - `progress` - Whole-document progress and section dots
//!
//! # Usage
//!
//! ```ignore
//! use wrapped_tui::scroll::{ScrollAnimator, ScrollMetrics, ScrollProgressTracker};
//!
//! let mut animator = ScrollAnimator::new(config.ui.scroll.clone(), motion.preference());
//! let mut tracker = ScrollProgressTracker::new();
//!
//! animator.scroll_by(10, max_scroll);
//!
//! // Each frame
//! let scroll = animator.update(max_scroll, now);
//! tracker.on_scroll(ScrollMetrics::new(scroll, document_height, viewport_height));
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod animation;
pub mod progress;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{cubic_ease_out, CubicBezier, EasingType, EasingTypeExt};
pub use progress::{dot_states, progress_percent, DotState, ScrollMetrics, ScrollProgressTracker};
