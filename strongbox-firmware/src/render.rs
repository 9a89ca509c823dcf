//! Core-1 render loop
//!
//! Encodes the shared frame buffer into TMDS scanlines forever: acquire a
//! free buffer, encode the three colour planes of one scanline, submit,
//! next line. One heartbeat per completed frame. If the serialiser wedges
//! and `acquire` never returns, the heartbeat goes stale and the watchdog
//! restarts the whole system - that is the recovery path.

use strongbox_core::framebuffer::FRAME_HEIGHT;
use strongbox_core::render::encode_scanline;

use crate::dvi::{DviLink, TmdsFontEncoder};
use crate::shared::{beat, FrameReader, RENDER_HEARTBEAT};

pub fn core1_main(reader: FrameReader, mut link: DviLink) -> ! {
    let mut encoder = TmdsFontEncoder;
    loop {
        for pixel_y in 0..FRAME_HEIGHT {
            let mut buffer = link.acquire();
            encode_scanline(reader.frame(), pixel_y, &mut encoder, buffer.words());
            link.submit(buffer);
        }
        beat(&RENDER_HEARTBEAT);
    }
}
