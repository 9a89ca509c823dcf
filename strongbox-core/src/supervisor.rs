//! Heartbeat/watchdog supervision logic
//!
//! Each core publishes a millisecond heartbeat as it makes progress: the
//! render core once per completed frame, the input core once per loop
//! iteration. A periodic feed attempt extends the hardware watchdog
//! deadline only while *both* heartbeats are fresh; a sustained stall on
//! either core lets the deadline lapse and the whole system restarts.
//! That hard reset is the intended recovery path - nothing is recovered in
//! place.
//!
//! Also owns the classification of a reset's cause for the persisted
//! reset counter, which survives watchdog resets only.

/// Maximum heartbeat age before a core counts as stalled.
pub const FRESHNESS_THRESHOLD_MS: u32 = 100;

/// Period of the feed attempt.
pub const FEED_PERIOD_MS: u64 = 50;

/// Hardware reset deadline.
pub const WATCHDOG_TIMEOUT_MS: u64 = 1000;

/// Why the system last came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetCause {
    /// Power applied (or any non-watchdog reset). The scratch register
    /// does not survive this, so the counter restarts.
    PowerOn,
    /// The watchdog deadline lapsed.
    Watchdog,
}

/// New value for the persisted reset counter, classified before anything
/// else reads it: zero on power-on, incremented by exactly one on a
/// watchdog-caused reset.
pub fn next_reset_count(cause: ResetCause, persisted: u32) -> u32 {
    match cause {
        ResetCause::PowerOn => 0,
        ResetCause::Watchdog => persisted.wrapping_add(1),
    }
}

/// Freshness decision over the two heartbeats.
#[derive(Debug, Clone, Copy)]
pub struct Supervisor {
    threshold_ms: u32,
}

impl Supervisor {
    pub const fn new() -> Self {
        Self {
            threshold_ms: FRESHNESS_THRESHOLD_MS,
        }
    }

    #[cfg(test)]
    const fn with_threshold(threshold_ms: u32) -> Self {
        Self { threshold_ms }
    }

    /// Feed if and only if both heartbeats are within the freshness
    /// threshold of `now_ms`. Ages are computed wrapping, so the decision
    /// stays correct across the u32 millisecond rollover (~49 days).
    pub fn should_feed(&self, now_ms: u32, hb_render_ms: u32, hb_input_ms: u32) -> bool {
        now_ms.wrapping_sub(hb_render_ms) < self.threshold_ms
            && now_ms.wrapping_sub(hb_input_ms) < self.threshold_ms
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn feeds_only_when_both_fresh() {
        let s = Supervisor::with_threshold(100);
        let now = 10_000;
        // Four freshness quadrants.
        assert!(s.should_feed(now, now - 10, now - 10));
        assert!(!s.should_feed(now, now - 500, now - 10));
        assert!(!s.should_feed(now, now - 10, now - 500));
        assert!(!s.should_feed(now, now - 500, now - 500));
    }

    #[test]
    fn threshold_is_exclusive() {
        let s = Supervisor::with_threshold(100);
        assert!(s.should_feed(1000, 901, 901));
        assert!(!s.should_feed(1000, 900, 901));
    }

    #[test]
    fn fresh_across_millisecond_rollover() {
        let s = Supervisor::with_threshold(100);
        // Heartbeats written just before the counter wrapped.
        assert!(s.should_feed(20, u32::MAX - 30, u32::MAX - 10));
        assert!(!s.should_feed(200, u32::MAX - 30, 190));
    }

    #[test]
    fn power_on_reset_zeroes_counter() {
        assert_eq!(next_reset_count(ResetCause::PowerOn, 0), 0);
        // Stale garbage in the scratch register is discarded.
        assert_eq!(next_reset_count(ResetCause::PowerOn, 7), 0);
    }

    #[test]
    fn watchdog_reset_increments_counter() {
        assert_eq!(next_reset_count(ResetCause::Watchdog, 2), 3);
        assert_eq!(next_reset_count(ResetCause::Watchdog, 0), 1);
    }

    proptest! {
        #[test]
        fn feed_decision_matches_definition(
            now in any::<u32>(),
            age_render in any::<u32>(),
            age_input in any::<u32>(),
            threshold in 1u32..10_000,
        ) {
            let s = Supervisor::with_threshold(threshold);
            let hb_render = now.wrapping_sub(age_render);
            let hb_input = now.wrapping_sub(age_input);
            let expected = age_render < threshold && age_input < threshold;
            prop_assert_eq!(s.should_feed(now, hb_render, hb_input), expected);
        }
    }
}
