//! Terminal screen layouts
//!
//! Builds the prompt, success, failure, and lockout screens on the shared
//! frame buffer. All layout is relative to the centre rows; columns 0 and
//! 79 stay border.

use core::fmt::Write;

use heapless::String;

use strongbox_core::auth::PASSWORD_LEN;
use strongbox_core::framebuffer::{colour, FrameBuffer, COLS, ROWS};

const TITLE: &str = "ELECTRONIC VAULT";
const PROMPT: &str = "Enter password (4 digits):";
const WELCOME: &str = "Welcome";
const DENIED: &str = "Wrong password. Try again.";
const LOCKED: &str = "Locked out for 30 seconds...";

pub const TITLE_ROW: i32 = (ROWS / 2) as i32 - 3;
pub const PROMPT_ROW: i32 = (ROWS / 2) as i32 - 1;
pub const INPUT_ROW: i32 = PROMPT_ROW + 1;
pub const LOCKOUT_ROW: i32 = INPUT_ROW + 2;

/// First column of the masked input field, centered like the prompt.
pub const INPUT_BASE_X: usize = COLS / 2 - PASSWORD_LEN / 2;

/// Initial screen: black clear, title, prompt, and the reset count when
/// the watchdog brought us back.
pub fn draw_boot(fb: &mut FrameBuffer, reset_count: Option<u32>) {
    fb.fill(colour::BLACK, colour::BLACK);
    fb.write_centered(TITLE_ROW, TITLE, colour::WHITE, colour::BLACK);
    fb.write_centered(PROMPT_ROW, PROMPT, colour::WHITE, colour::BLACK);
    if let Some(count) = reset_count {
        let mut line: String<32> = String::new();
        let _ = write!(line, "Watchdog resets: {}", count);
        fb.write_centered((ROWS - 2) as i32, &line, colour::YELLOW, colour::BLACK);
    }
}

/// Echo one accepted digit as a mask glyph.
pub fn draw_mask(fb: &mut FrameBuffer, column: usize) {
    let x = INPUT_BASE_X + column;
    fb.set_char(x, INPUT_ROW as usize, b'*');
    fb.set_colour(x, INPUT_ROW as usize, colour::YELLOW, colour::BLACK);
}

/// Full green success screen. Never redrawn afterwards.
pub fn draw_granted(fb: &mut FrameBuffer) {
    fb.fill(colour::GREEN, colour::GREEN);
    fb.write_centered(TITLE_ROW, TITLE, colour::WHITE, colour::GREEN);
    fb.write_centered(PROMPT_ROW, WELCOME, colour::WHITE, colour::GREEN);
}

/// Full red failure screen.
pub fn draw_denied(fb: &mut FrameBuffer) {
    fb.fill(colour::RED, colour::RED);
    fb.write_centered(TITLE_ROW, TITLE, colour::WHITE, colour::RED);
    fb.write_centered(PROMPT_ROW, DENIED, colour::WHITE, colour::RED);
}

/// Lockout banner below the failure message.
pub fn draw_lockout(fb: &mut FrameBuffer) {
    fb.write_centered(LOCKOUT_ROW, LOCKED, colour::WHITE, colour::RED);
}

/// Back to the black prompt screen for the next attempt.
pub fn redraw_prompt(fb: &mut FrameBuffer) {
    fb.fill(colour::BLACK, colour::BLACK);
    fb.write_centered(TITLE_ROW, TITLE, colour::WHITE, colour::BLACK);
    fb.write_centered(PROMPT_ROW, PROMPT, colour::WHITE, colour::BLACK);
}
