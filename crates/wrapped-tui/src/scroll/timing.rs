//! L4 Atomic Layer: Time calculation utilities for animations
//!
//! Pure functions over explicit frame timestamps, so every animator driven
//! by the same frame sees the same `now`.

use std::time::{Duration, Instant};

/// Calculate animation progress (0.0 to 1.0) at `now`
///
/// # Arguments
/// * `start` - Animation start time
/// * `now` - Timestamp of the frame being rendered
/// * `duration` - Total animation duration
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]; a zero duration is always complete
#[inline]
pub fn progress_at(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if an animation is complete at `now`
#[inline]
pub fn is_complete_at(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for u16 values (scroll positions)
#[inline]
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(from as f64, to as f64, t).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp_u16() {
        assert_eq!(lerp_u16(0, 100, 0.0), 0);
        assert_eq!(lerp_u16(0, 100, 0.5), 50);
        assert_eq!(lerp_u16(100, 0, 1.0), 0);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress_at(start, start, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_at_explicit_times() {
        let start = Instant::now();
        let duration = Duration::from_millis(1000);
        assert_eq!(progress_at(start, start, duration), 0.0);
        assert!((progress_at(start, start + Duration::from_millis(250), duration) - 0.25).abs() < 1e-9);
        assert_eq!(progress_at(start, start + Duration::from_millis(5000), duration), 1.0);
        assert!(!is_complete_at(start, start + Duration::from_millis(999), duration));
        assert!(is_complete_at(start, start + duration, duration));
    }

    #[test]
    fn test_now_before_start_is_zero() {
        let now = Instant::now();
        let start = now + Duration::from_millis(10);
        assert_eq!(progress_at(start, now, Duration::from_millis(100)), 0.0);
    }
}
