//! Reflash re-entry
//!
//! Holding the side button drops back into the ROM USB bootloader. This is
//! an intentional hard restart, not a shutdown path; nothing is flushed or
//! joined.

use defmt::*;
use embassy_rp::gpio::Input;

#[embassy_executor::task]
pub async fn bootsel_task(mut button: Input<'static>) {
    button.wait_for_falling_edge().await;
    info!("Reflash button pressed, rebooting to USB bootloader");
    embassy_rp::rom_data::reset_to_usb_boot(0, 0);
    // The ROM call does not return.
    loop {
        cortex_m::asm::wfe();
    }
}
