//! Strongbox - RP2040 access-control terminal
//!
//! Core 0 runs the password input loop, the watchdog feeder, and the
//! reflash button; core 1 does nothing but encode the shared character
//! grid into TMDS scanlines for the DVI serialiser. The hardware watchdog
//! is armed before either loop starts and is only fed while both publish
//! fresh heartbeats - a hang on either core ends in a full reset, counted
//! in a scratch register that survives it.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Executor;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::pac;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_rp::watchdog::Watchdog;
use embassy_time::Duration;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use strongbox_core::supervisor::{next_reset_count, ResetCause, WATCHDOG_TIMEOUT_MS};

mod config;
mod dvi;
mod render;
mod shared;
mod tasks;
mod ui;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 32]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 32]> = StaticCell::new();

static mut CORE1_STACK: Stack<4096> = Stack::new();
static EXECUTOR0: StaticCell<Executor> = StaticCell::new();

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("Strongbox firmware starting...");

    let p = embassy_rp::init(Default::default());
    let mut watchdog = Watchdog::new(p.WATCHDOG);

    // Classify the reset and settle the persisted counter before anything
    // else looks at it.
    let reset_count = if pac::WATCHDOG.reason().read().timer() {
        let count = next_reset_count(ResetCause::Watchdog, watchdog.get_scratch(0));
        watchdog.set_scratch(0, count);
        warn!("Recovered by watchdog reset, count now {}", count);
        Some(count)
    } else {
        watchdog.set_scratch(0, next_reset_count(ResetCause::PowerOn, 0));
        info!("Power-on reset, counter cleared");
        None
    };

    // Serialiser clocks and voltage come up before anything is timed.
    dvi::init();

    // UART for password entry
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = config::UART_BAUD;
        cfg
    };
    let tx_buf = TX_BUF.init([0u8; 32]);
    let rx_buf = RX_BUF.init([0u8; 32]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();

    // Reflash button
    let button = Input::new(p.PIN_6, Pull::Up);

    // Frame handles: writer stays here on core 0, reader goes to core 1.
    let mut writer = shared::FRAME.writer();
    let reader = shared::FRAME.reader();
    writer.with(|fb| ui::draw_boot(fb, reset_count));

    // Both heartbeats start fresh so the watchdog is not starved before
    // the loops reach their first beat.
    shared::beat(&shared::RENDER_HEARTBEAT);
    shared::beat(&shared::INPUT_HEARTBEAT);
    watchdog.pause_on_debug(true);
    watchdog.start(Duration::from_millis(WATCHDOG_TIMEOUT_MS));

    // Give core 1's encode loop priority on the bus; the display cannot
    // wait for a stalled memory access.
    pac::BUSCTRL.bus_priority().modify(|w| w.set_proc1(true));

    spawn_core1(
        p.CORE1,
        unsafe { &mut *core::ptr::addr_of_mut!(CORE1_STACK) },
        move || {
            let link = dvi::DviLink::start();
            render::core1_main(reader, link)
        },
    );
    info!("DVI render loop started on core 1");

    let executor0 = EXECUTOR0.init(Executor::new());
    executor0.run(|spawner| {
        spawner.must_spawn(tasks::feeder_task(watchdog));
        spawner.must_spawn(tasks::input_task(rx, writer));
        spawner.must_spawn(tasks::bootsel_task(button));
    });
}
