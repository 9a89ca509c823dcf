//! FFI boundary to the external DVI/TMDS library
//!
//! The signal side of the display - clock and voltage setup, the DMA
//! serialiser, the scanline buffer queues, and the font encoder - is a
//! prebuilt PicoDVI-style library linked into the binary. This module is
//! the only place its symbols appear; everything above works through
//! [`DviLink`] and the [`PlaneEncoder`] seam.

use strongbox_core::font::GLYPH_ROWS;
use strongbox_core::render::{PlaneEncoder, SCANBUF_WORDS};

extern "C" {
    /// One-time bring-up on core 0: voltage, TMDS bit clock, serialiser
    /// pin configuration, queue allocation.
    fn dvi_link_init();

    /// Register the DMA IRQs on the calling core and start emitting the
    /// video signal. Must run on the core that will encode.
    fn dvi_link_start();

    /// Block until a recycled TMDS scanline buffer is free and return it.
    /// The buffer holds [`SCANBUF_WORDS`] words, three plane regions.
    fn dvi_link_acquire() -> *mut u32;

    /// Queue a fully encoded scanline for DMA serialisation. Ownership of
    /// the buffer returns to the library.
    fn dvi_link_submit(tmds: *mut u32);

    /// Encode one colour plane of one scanline: character codes and
    /// attribute words for one cell row, output TMDS words, frame width in
    /// pixels, and the glyph-row table indexed by raw character code.
    fn tmds_encode_font_2bpp(
        chars: *const u8,
        colours: *const u32,
        tmds: *mut u32,
        width_px: u32,
        glyph_row: *const u8,
    );
}

/// Core-0 side bring-up. Call once before launching the render core.
pub fn init() {
    unsafe { dvi_link_init() }
}

/// Handle to the serialiser's scanline buffer queues. Created on the
/// render core; starting it registers that core's IRQs.
pub struct DviLink {
    _priv: (),
}

/// A scanline buffer on loan from the serialiser.
pub struct ScanBuffer {
    ptr: *mut u32,
}

impl ScanBuffer {
    pub fn words(&mut self) -> &mut [u32] {
        unsafe { core::slice::from_raw_parts_mut(self.ptr, SCANBUF_WORDS) }
    }
}

impl DviLink {
    /// Start the video signal on the calling core.
    pub fn start() -> Self {
        unsafe { dvi_link_start() }
        Self { _priv: () }
    }

    /// Blocking: the pool is sized past encode latency, so in steady state
    /// a buffer is already waiting.
    pub fn acquire(&mut self) -> ScanBuffer {
        ScanBuffer {
            ptr: unsafe { dvi_link_acquire() },
        }
    }

    pub fn submit(&mut self, buffer: ScanBuffer) {
        unsafe { dvi_link_submit(buffer.ptr) }
    }
}

/// The external font encoder behind the core pipeline's seam.
pub struct TmdsFontEncoder;

impl PlaneEncoder for TmdsFontEncoder {
    fn encode_plane(
        &mut self,
        chars: &[u8],
        colours: &[u32],
        out: &mut [u32],
        width_px: usize,
        glyph_row: usize,
    ) {
        unsafe {
            tmds_encode_font_2bpp(
                chars.as_ptr(),
                colours.as_ptr(),
                out.as_mut_ptr(),
                width_px as u32,
                GLYPH_ROWS[glyph_row].as_ptr(),
            );
        }
    }
}
