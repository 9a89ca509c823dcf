//! Watchdog feed task
//!
//! Runs on core 0 but judges both cores: every feed period it compares the
//! two heartbeats against the freshness threshold and extends the hardware
//! deadline only when both are recent. A stalled core simply stops being
//! vouched for, and the deadline runs out.

use defmt::*;
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Duration, Ticker};

use strongbox_core::supervisor::{Supervisor, FEED_PERIOD_MS};

use crate::shared::{now_ms, INPUT_HEARTBEAT, RENDER_HEARTBEAT};

#[embassy_executor::task]
pub async fn feeder_task(mut watchdog: Watchdog) {
    info!("Feeder task started");

    let supervisor = Supervisor::new();
    let mut ticker = Ticker::every(Duration::from_millis(FEED_PERIOD_MS));

    loop {
        ticker.next().await;

        let render = RENDER_HEARTBEAT.load(core::sync::atomic::Ordering::Relaxed);
        let input = INPUT_HEARTBEAT.load(core::sync::atomic::Ordering::Relaxed);
        if supervisor.should_feed(now_ms(), render, input) {
            watchdog.feed();
        } else {
            // The reset-based recovery net: withhold and let the hardware
            // deadline run.
            warn!("Heartbeat stale, withholding watchdog feed");
        }
    }
}
