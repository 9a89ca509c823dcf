//! Scanline encode pipeline
//!
//! One frame is 480 scanlines; each scanline is encoded plane by plane by
//! an external TMDS font encoder, consumed here through the
//! [`PlaneEncoder`] seam. The loop math lives here so the invariant that
//! all three plane calls of a scanline derive from the same cell row is
//! testable on the host.

use crate::font::glyph_source_row;
use crate::framebuffer::{FrameBuffer, CELL_HEIGHT, FRAME_WIDTH, PLANES};

/// TMDS symbol words per plane for one scanline (two symbols per word).
pub const PLANE_OUT_WORDS: usize = FRAME_WIDTH / 2;

/// Words in one scanline buffer, all three planes.
pub const SCANBUF_WORDS: usize = PLANES * PLANE_OUT_WORDS;

/// The external TMDS font encoder, one call per colour plane per scanline.
///
/// `chars` is the cell row's character codes, `colours` the same cell
/// row's attribute words for the plane being encoded, `glyph_row` the
/// source glyph row selected for this scanline.
pub trait PlaneEncoder {
    fn encode_plane(
        &mut self,
        chars: &[u8],
        colours: &[u32],
        out: &mut [u32],
        width_px: usize,
        glyph_row: usize,
    );
}

/// Encode one scanline into `out` (length [`SCANBUF_WORDS`]), one plane
/// region at a time. Both grid slices for every plane derive from the same
/// `pixel_y / CELL_HEIGHT` cell row.
pub fn encode_scanline<E: PlaneEncoder>(
    fb: &FrameBuffer,
    pixel_y: usize,
    encoder: &mut E,
    out: &mut [u32],
) {
    debug_assert_eq!(out.len(), SCANBUF_WORDS);
    let cell_row = pixel_y / CELL_HEIGHT;
    let glyph_row = glyph_source_row(pixel_y);
    for (plane, region) in out.chunks_exact_mut(PLANE_OUT_WORDS).enumerate() {
        encoder.encode_plane(
            fb.char_row(cell_row),
            fb.colour_row(cell_row, plane),
            region,
            FRAME_WIDTH,
            glyph_row,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::{colour, COLS, FRAME_HEIGHT, ROW_PLANE_WORDS};

    /// Records what the pipeline hands the encoder instead of encoding.
    struct RecordingEncoder {
        // (first char of row, first colour word, region offset marker, glyph row)
        calls: heapless::Vec<(u8, u32, usize, usize), 16>,
    }

    impl PlaneEncoder for RecordingEncoder {
        fn encode_plane(
            &mut self,
            chars: &[u8],
            colours: &[u32],
            out: &mut [u32],
            width_px: usize,
            glyph_row: usize,
        ) {
            assert_eq!(chars.len(), COLS);
            assert_eq!(colours.len(), ROW_PLANE_WORDS);
            assert_eq!(out.len(), PLANE_OUT_WORDS);
            assert_eq!(width_px, FRAME_WIDTH);
            out[0] = 0xdead_beef;
            self.calls
                .push((chars[0], colours[0], out.len(), glyph_row))
                .unwrap();
        }
    }

    #[test]
    fn three_planes_share_one_cell_row() {
        let mut fb = FrameBuffer::new();
        // Row 3 of the grid starts at pixel row 72. Marker in the border
        // column so char_row()[0] identifies the row.
        fb.set_char(0, 3, b'R');
        fb.set_colour(0, 3, colour::WHITE, colour::BLACK);

        let mut enc = RecordingEncoder {
            calls: heapless::Vec::new(),
        };
        let mut out = [0u32; SCANBUF_WORDS];
        encode_scanline(&fb, 3 * CELL_HEIGHT + 7, &mut enc, &mut out);

        assert_eq!(enc.calls.len(), PLANES);
        for (first_char, _, _, glyph_row) in enc.calls.iter() {
            assert_eq!(*first_char, b'R');
            // Pixel 7 of the cell, scale factor 3: source row 2.
            assert_eq!(*glyph_row, 2);
        }
        // Each plane saw its own attribute words: white fg sets the low
        // nibble of word 0 in every plane.
        for (_, first_colour, _, _) in enc.calls.iter() {
            assert_eq!(first_colour & 0x3, 0x3);
        }
        // All three plane regions were written.
        for plane in 0..PLANES {
            assert_eq!(out[plane * PLANE_OUT_WORDS], 0xdead_beef);
        }
    }

    #[test]
    fn last_scanline_maps_to_last_cell_row() {
        let mut fb = FrameBuffer::new();
        fb.set_char(0, FRAME_HEIGHT / CELL_HEIGHT - 1, b'L');
        let mut enc = RecordingEncoder {
            calls: heapless::Vec::new(),
        };
        let mut out = [0u32; SCANBUF_WORDS];
        encode_scanline(&fb, FRAME_HEIGHT - 1, &mut enc, &mut out);
        for (first_char, _, _, glyph_row) in enc.calls.iter() {
            assert_eq!(*first_char, b'L');
            assert_eq!(*glyph_row, 7);
        }
    }
}
