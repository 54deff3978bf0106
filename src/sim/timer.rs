//! Reveal timer
//!
//! Numbers stay visible for a level-dependent number of seconds after the
//! level starts. Hiding is one-way; the state machine never un-hides a level.

/// True once `elapsed` seconds strictly exceed `reveal_duration` seconds
#[inline]
pub fn should_hide(elapsed: f32, reveal_duration: f32) -> bool {
    elapsed > reveal_duration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hides_only_after_duration() {
        assert!(!should_hide(0.0, 5.0));
        assert!(!should_hide(5.0, 5.0));
        assert!(should_hide(5.001, 5.0));
        assert!(should_hide(60.0, 1.0));
    }

    #[test]
    fn test_should_hide_is_idempotent() {
        for &(elapsed, duration) in &[(0.5, 1.0), (1.5, 1.0), (5.0, 5.0)] {
            let first = should_hide(elapsed, duration);
            for _ in 0..10 {
                assert_eq!(should_hide(elapsed, duration), first);
            }
        }
    }
}
