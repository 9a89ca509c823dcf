//! Password input task
//!
//! The interactive side of the terminal: polls the UART for one byte at a
//! time, feeds it to the session state machine, and paints the resulting
//! screens. Refreshes the input heartbeat once per iteration; how the long
//! penalty and lockout waits interact with that heartbeat is a
//! configuration choice (see `config::FEED_DURING_PENALTY`).

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartRx;
use embassy_time::Timer;
use embedded_io_async::Read;

use strongbox_core::auth::{Effect, Session};

use crate::config::{
    FAILURE_DELAY_MS, FEED_DURING_PENALTY, INPUT_POLL_MS, LOCKOUT_MS, PENALTY_SLICE_MS, SECRET,
};
use crate::shared::{beat, FrameWriter, INPUT_HEARTBEAT};
use crate::ui;

#[embassy_executor::task]
pub async fn input_task(mut rx: BufferedUartRx, mut writer: FrameWriter) {
    info!("Input task started");

    let mut session = Session::new(SECRET);
    let mut byte = [0u8; 1];

    loop {
        beat(&INPUT_HEARTBEAT);

        // Bounded poll: a quiet line must not starve the heartbeat, and a
        // wedged UART is recovered by reset, not retried here.
        let received = match select(rx.read(&mut byte), Timer::after_millis(INPUT_POLL_MS)).await {
            Either::First(Ok(n)) if n > 0 => true,
            Either::First(Ok(_)) => false,
            Either::First(Err(e)) => {
                warn!("UART read error: {:?}", e);
                false
            }
            Either::Second(()) => false,
        };
        if !received {
            continue;
        }

        match session.push_byte(byte[0]) {
            Effect::Ignored => {}
            Effect::Accepted { column } => {
                writer.with(|fb| ui::draw_mask(fb, column));
            }
            Effect::Granted => {
                info!("Access granted");
                writer.with(ui::draw_granted);
                // Terminal state: the loop keeps polling, the session
                // ignores everything from here on.
            }
            Effect::Denied { attempts, lockout } => {
                warn!("Wrong password, attempt {}", attempts);
                writer.with(ui::draw_denied);
                penalty_wait(FAILURE_DELAY_MS).await;

                if lockout {
                    warn!("Attempt budget exhausted, locking out");
                    writer.with(ui::draw_lockout);
                    penalty_wait(LOCKOUT_MS).await;
                    session.lockout_elapsed();
                }

                writer.with(ui::redraw_prompt);
            }
        }
    }
}

/// Serve a penalty or lockout wait. Sliced waits keep the heartbeat fresh
/// so the watchdog stays fed through the full duration; the uninterrupted
/// variant deliberately lets the deadline lapse instead.
async fn penalty_wait(total_ms: u64) {
    if !FEED_DURING_PENALTY {
        Timer::after_millis(total_ms).await;
        return;
    }
    let mut remaining = total_ms;
    while remaining > 0 {
        let slice = remaining.min(PENALTY_SLICE_MS);
        Timer::after_millis(slice).await;
        beat(&INPUT_HEARTBEAT);
        remaining -= slice;
    }
}
