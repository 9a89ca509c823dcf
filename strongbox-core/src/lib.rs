//! Board-agnostic core logic for the Strongbox access-control terminal
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Character/attribute frame buffer and its text operations
//! - Glyph table and the vertical upscale row mapping
//! - Scanline encode pipeline (generic over the external plane encoder)
//! - Password session state machine
//! - Dual-heartbeat watchdog supervision logic

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod auth;
pub mod font;
pub mod framebuffer;
pub mod render;
pub mod supervisor;
