//! Board and policy configuration
//!
//! Timing constants must be sized jointly with the watchdog tuning in
//! `strongbox_core::supervisor`: an uninterrupted wait longer than
//! `WATCHDOG_TIMEOUT_MS - FEED_PERIOD_MS` stalls the input heartbeat past
//! the feed deadline and the device resets mid-wait.

use strongbox_core::auth::PASSWORD_LEN;

/// The stored secret. Fixed at build time; there is no credential store.
pub const SECRET: [u8; PASSWORD_LEN] = *b"3333";

/// Failure screen dwell after a wrong submission.
pub const FAILURE_DELAY_MS: u64 = 3000;

/// Lockout wait after the attempt budget is exhausted.
pub const LOCKOUT_MS: u64 = 30_000;

/// Whether the penalty and lockout waits keep the input heartbeat fresh.
///
/// `true`: waits are served in short slices that refresh the heartbeat, so
/// a lockout runs to completion and the watchdog keeps being fed.
/// `false`: waits are one uninterrupted sleep; with the default constants
/// (3 s / 30 s waits against a 1 s watchdog) the deadline lapses and the
/// watchdog resets the device partway through the penalty.
pub const FEED_DURING_PENALTY: bool = true;

/// Slice width for heartbeat-refreshing waits.
pub const PENALTY_SLICE_MS: u64 = 50;

/// Idle poll period of the input loop; bounds heartbeat staleness while no
/// bytes arrive.
pub const INPUT_POLL_MS: u64 = 10;

/// UART baud rate for password entry.
pub const UART_BAUD: u32 = 115_200;
