//! Reduced-motion preference shared by every animated component
//!
//! A single [`MotionController`] owns the value; any number of
//! [`MotionPreference`] handles read it. Handles are handed out explicitly,
//! so nothing can observe the preference before it has been initialized.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::MotionConfig;
use crate::{Error, Result};

/// Environment variables consulted for the preference, in priority order
const MOTION_ENV_VARS: &[&str] = &["WRAPPED_REDUCE_MOTION", "REDUCE_MOTION"];

/// Parse a truthy/falsy preference value
fn parse_preference(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "reduce" => Ok(true),
        "" | "0" | "false" | "no" | "off" | "no-preference" => Ok(false),
        other => Err(Error::Config(format!(
            "{} has unrecognized value '{}'",
            var, other
        ))),
    }
}

/// Read the preference from an environment lookup
///
/// `TERM=dumb` terminals cannot redraw smoothly and count as a request for
/// reduced motion.
pub fn detect_from_env<F>(lookup: F) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    for var in MOTION_ENV_VARS {
        if let Some(value) = lookup(var) {
            return parse_preference(var, &value);
        }
    }
    Ok(lookup("TERM").is_some_and(|term| term == "dumb"))
}

/// Resolve the startup preference: config override, else environment, else no reduction
pub fn detect_reduced_motion(config: &MotionConfig) -> bool {
    resolve_reduced_motion(config, |var| std::env::var(var).ok())
}

/// Config override, else the given environment lookup; unreadable values
/// fall back to no reduction
fn resolve_reduced_motion<F>(config: &MotionConfig, lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(forced) = config.reduced_motion {
        return forced;
    }
    match detect_from_env(lookup) {
        Ok(reduce) => reduce,
        Err(e) => {
            warn!(error = %e, "Could not read motion preference, animating normally");
            false
        }
    }
}

/// Sole writer of the reduced-motion flag
#[derive(Debug)]
pub struct MotionController {
    tx: watch::Sender<bool>,
}

impl MotionController {
    pub fn new(reduce_motion: bool) -> Self {
        let (tx, _rx) = watch::channel(reduce_motion);
        Self { tx }
    }

    /// Initialize from configuration and environment
    pub fn detect(config: &MotionConfig) -> Self {
        let reduce = detect_reduced_motion(config);
        debug!(reduce_motion = reduce, "Motion preference initialized");
        Self::new(reduce)
    }

    /// Hand out a reader
    pub fn preference(&self) -> MotionPreference {
        MotionPreference {
            rx: self.tx.subscribe(),
        }
    }

    /// Current value
    pub fn reduce_motion(&self) -> bool {
        *self.tx.borrow()
    }

    /// Publish a new value; returns true when it changed
    pub fn set(&self, reduce_motion: bool) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == reduce_motion {
                false
            } else {
                *current = reduce_motion;
                true
            }
        });
        if changed {
            debug!(reduce_motion, "Motion preference changed");
        }
        changed
    }

    /// Flip the value and return the new one
    pub fn toggle(&self) -> bool {
        let next = !self.reduce_motion();
        self.set(next);
        next
    }
}

/// Read handle on the reduced-motion flag
///
/// Always re-read through [`MotionPreference::reduce_motion`]; never keep a
/// copy across frames.
#[derive(Debug, Clone)]
pub struct MotionPreference {
    rx: watch::Receiver<bool>,
}

impl MotionPreference {
    /// Whether decorative animation should be skipped
    pub fn reduce_motion(&self) -> bool {
        *self.rx.borrow()
    }

    /// True when the value changed since the last [`MotionPreference::mark_seen`]
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Acknowledge the current value
    pub fn mark_seen(&mut self) -> bool {
        *self.rx.borrow_and_update()
    }

    /// Duration to use for a decorative animation: zero under reduced motion
    pub fn effective(&self, duration: Duration) -> Duration {
        if self.reduce_motion() {
            Duration::ZERO
        } else {
            duration
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_detect_from_env() {
        assert!(!detect_from_env(env(&[])).unwrap());
        assert!(detect_from_env(env(&[("REDUCE_MOTION", "1")])).unwrap());
        assert!(!detect_from_env(env(&[("REDUCE_MOTION", "no-preference")])).unwrap());
        assert!(detect_from_env(env(&[("TERM", "dumb")])).unwrap());
        // Explicit variable beats the terminal heuristic
        assert!(!detect_from_env(env(&[("REDUCE_MOTION", "0"), ("TERM", "dumb")])).unwrap());
        // Prefixed variable beats the plain one
        assert!(detect_from_env(env(&[
            ("WRAPPED_REDUCE_MOTION", "true"),
            ("REDUCE_MOTION", "false")
        ]))
        .unwrap());
    }

    #[test]
    fn test_unrecognized_value_is_error() {
        assert!(detect_from_env(env(&[("REDUCE_MOTION", "maybe")])).is_err());
    }

    #[test]
    fn test_config_override_wins() {
        let config = MotionConfig {
            reduced_motion: Some(true),
            ..Default::default()
        };
        assert!(detect_reduced_motion(&config));
        assert!(resolve_reduced_motion(&config, env(&[("REDUCE_MOTION", "0")])));
    }

    #[test]
    fn test_unrecognized_value_animates_normally() {
        let config = MotionConfig::default();
        assert!(!resolve_reduced_motion(&config, env(&[("REDUCE_MOTION", "maybe")])));
        assert!(!resolve_reduced_motion(&config, env(&[("WRAPPED_REDUCE_MOTION", "sometimes"), ("TERM", "dumb")])));
        assert!(resolve_reduced_motion(&config, env(&[("REDUCE_MOTION", "yes")])));
    }

    #[test]
    fn test_live_updates_reach_all_readers() {
        let controller = MotionController::new(false);
        let a = controller.preference();
        let b = a.clone();
        assert!(!a.reduce_motion());

        assert!(controller.set(true));
        assert!(a.reduce_motion());
        assert!(b.reduce_motion());

        // Same value again is not a change
        assert!(!controller.set(true));
        assert!(!controller.toggle());
        assert!(!a.reduce_motion());
    }

    #[test]
    fn test_change_tracking() {
        let controller = MotionController::new(false);
        let mut pref = controller.preference();
        assert!(!pref.has_changed());
        controller.toggle();
        assert!(pref.has_changed());
        assert!(pref.mark_seen());
        assert!(!pref.has_changed());
    }

    #[test]
    fn test_effective_duration() {
        let controller = MotionController::new(false);
        let pref = controller.preference();
        assert_eq!(pref.effective(Duration::from_millis(800)), Duration::from_millis(800));
        controller.set(true);
        assert_eq!(pref.effective(Duration::from_millis(800)), Duration::ZERO);
    }
}
