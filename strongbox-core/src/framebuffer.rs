//! Character frame buffer
//!
//! An 80x20 grid of character cells backing the 640x480 DVI output. Each
//! cell carries an 8-bit character code and an RGB222 colour attribute
//! (2-bit foreground and background per channel), stored as three parallel
//! bit-planes in the layout the TMDS font encoder consumes directly.
//!
//! Columns 0 and COLS-1 are a permanent border: `write_text` clips them and
//! `clear_row` leaves them untouched. Out-of-bounds writes are silent
//! no-ops; the grid size is a compile-time constant and the only callers
//! are internal.

/// Output resolution in pixels.
pub const FRAME_WIDTH: usize = 640;
pub const FRAME_HEIGHT: usize = 480;

/// On-screen character cell size. 8x8 source glyphs are stretched to 8x24.
pub const CELL_WIDTH: usize = 8;
pub const CELL_HEIGHT: usize = 24;

/// Grid dimensions: 80 columns by 20 rows.
pub const COLS: usize = FRAME_WIDTH / CELL_WIDTH;
pub const ROWS: usize = FRAME_HEIGHT / CELL_HEIGHT;

/// Words per colour bit-plane: one attribute nibble per cell, 8 cells per
/// 32-bit word.
pub const PLANE_WORDS: usize = ROWS * COLS * 4 / 32;

/// Words per cell row within one plane.
pub const ROW_PLANE_WORDS: usize = PLANE_WORDS / ROWS;

/// Number of colour planes (red, green, blue from the low bits upward).
pub const PLANES: usize = 3;

/// RGB222 colours used by the terminal screens.
pub mod colour {
    pub const BLACK: u8 = 0x00;
    pub const WHITE: u8 = 0x3f;
    pub const GREEN: u8 = 0x0c;
    pub const RED: u8 = 0x30;
    pub const YELLOW: u8 = 0x3c;
}

/// The shared character + attribute grid.
///
/// Mutated only through the bounds-checked setters below. The render core
/// reads whole rows through [`char_row`](Self::char_row) and
/// [`colour_row`](Self::colour_row) with no synchronization against the
/// writer; a half-written attribute is visible for at most one frame and
/// self-heals on the next.
pub struct FrameBuffer {
    chars: [u8; COLS * ROWS],
    colours: [u32; PLANES * PLANE_WORDS],
}

impl FrameBuffer {
    /// All cells blank on black.
    pub const fn new() -> Self {
        Self {
            chars: [b' '; COLS * ROWS],
            colours: [0; PLANES * PLANE_WORDS],
        }
    }

    /// Write one character code. Out-of-bounds coordinates are ignored.
    pub fn set_char(&mut self, x: usize, y: usize, code: u8) {
        if x >= COLS || y >= ROWS {
            return;
        }
        self.chars[x + y * COLS] = code;
    }

    /// Write one cell's RGB222 colour attribute across the three planes.
    /// Out-of-bounds coordinates are ignored.
    pub fn set_colour(&mut self, x: usize, y: usize, fg: u8, bg: u8) {
        if x >= COLS || y >= ROWS {
            return;
        }
        let cell = x + y * COLS;
        let bit = cell % 8 * 4;
        let mut word = cell / 8;
        let mut fg = fg as u32;
        let mut bg = bg as u32;
        for _ in 0..PLANES {
            let nibble = (fg & 0x3) | (bg << 2 & 0xc);
            self.colours[word] = (self.colours[word] & !(0xf << bit)) | (nibble << bit);
            fg >>= 2;
            bg >>= 2;
            word += PLANE_WORDS;
        }
    }

    /// Blank one row's interior columns (the border columns keep their
    /// contents) with the given background.
    pub fn clear_row(&mut self, y: usize, bg: u8) {
        if y >= ROWS {
            return;
        }
        for x in 1..COLS - 1 {
            self.set_char(x, y, b' ');
            self.set_colour(x, y, colour::BLACK, bg);
        }
    }

    /// Fill the entire grid, border included, with blanks in the given
    /// colours. Used for the whole-screen outcome fills.
    pub fn fill(&mut self, fg: u8, bg: u8) {
        for y in 0..ROWS {
            for x in 0..COLS {
                self.set_char(x, y, b' ');
                self.set_colour(x, y, fg, bg);
            }
        }
    }

    /// Write a run of characters starting at column `start_x`. Characters
    /// landing on or beyond the border columns are clipped; an out-of-range
    /// row makes the whole call a no-op.
    pub fn write_text(&mut self, start_x: i32, y: i32, text: &str, fg: u8, bg: u8) {
        if y < 0 || y >= ROWS as i32 {
            return;
        }
        for (i, code) in text.bytes().enumerate() {
            let x = start_x + i as i32;
            if x <= 0 || x >= COLS as i32 - 1 {
                continue;
            }
            self.set_char(x as usize, y as usize, code);
            self.set_colour(x as usize, y as usize, fg, bg);
        }
    }

    /// Write text horizontally centered on row `y`.
    pub fn write_centered(&mut self, y: i32, text: &str, fg: u8, bg: u8) {
        let start_x = (COLS / 2) as i32 - (text.len() / 2) as i32;
        self.write_text(start_x, y, text, fg, bg);
    }

    /// Read back one character code, or None out of bounds.
    pub fn char_at(&self, x: usize, y: usize) -> Option<u8> {
        if x >= COLS || y >= ROWS {
            return None;
        }
        Some(self.chars[x + y * COLS])
    }

    /// Read back one cell's (fg, bg) attribute, or None out of bounds.
    pub fn colour_at(&self, x: usize, y: usize) -> Option<(u8, u8)> {
        if x >= COLS || y >= ROWS {
            return None;
        }
        let cell = x + y * COLS;
        let bit = cell % 8 * 4;
        let mut fg = 0u8;
        let mut bg = 0u8;
        for plane in 0..PLANES {
            let nibble = (self.colours[cell / 8 + plane * PLANE_WORDS] >> bit) & 0xf;
            fg |= ((nibble & 0x3) as u8) << (2 * plane);
            bg |= ((nibble >> 2) as u8) << (2 * plane);
        }
        Some((fg, bg))
    }

    /// One cell row of character codes, for the encoder.
    pub fn char_row(&self, cell_row: usize) -> &[u8] {
        let start = cell_row * COLS;
        &self.chars[start..start + COLS]
    }

    /// One cell row of one colour plane, for the encoder.
    pub fn colour_row(&self, cell_row: usize, plane: usize) -> &[u32] {
        let start = cell_row * ROW_PLANE_WORDS + plane * PLANE_WORDS;
        &self.colours[start..start + ROW_PLANE_WORDS]
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_read_back() {
        let mut fb = FrameBuffer::new();
        fb.set_char(3, 7, b'A');
        fb.set_colour(3, 7, colour::WHITE, colour::GREEN);
        assert_eq!(fb.char_at(3, 7), Some(b'A'));
        assert_eq!(fb.colour_at(3, 7), Some((colour::WHITE, colour::GREEN)));
    }

    #[test]
    fn out_of_bounds_write_is_noop() {
        let mut fb = FrameBuffer::new();
        fb.set_char(2, 2, b'x');
        fb.set_colour(2, 2, colour::RED, colour::BLACK);

        fb.set_char(COLS, 0, b'!');
        fb.set_char(0, ROWS, b'!');
        fb.set_colour(COLS, 0, colour::WHITE, colour::WHITE);
        fb.set_colour(0, ROWS, colour::WHITE, colour::WHITE);

        // No cell changed anywhere.
        for y in 0..ROWS {
            for x in 0..COLS {
                if (x, y) == (2, 2) {
                    assert_eq!(fb.char_at(x, y), Some(b'x'));
                    assert_eq!(fb.colour_at(x, y), Some((colour::RED, colour::BLACK)));
                } else {
                    assert_eq!(fb.char_at(x, y), Some(b' '));
                    assert_eq!(fb.colour_at(x, y), Some((0, 0)));
                }
            }
        }
    }

    #[test]
    fn colour_planes_are_independent_per_cell() {
        let mut fb = FrameBuffer::new();
        // Neighbouring cells share attribute words; writing one must not
        // disturb the other.
        fb.set_colour(8, 0, 0x15, 0x2a);
        fb.set_colour(9, 0, 0x3f, 0x00);
        assert_eq!(fb.colour_at(8, 0), Some((0x15, 0x2a)));
        assert_eq!(fb.colour_at(9, 0), Some((0x3f, 0x00)));
    }

    #[test]
    fn write_text_never_touches_border() {
        let mut fb = FrameBuffer::new();
        let long = "0123456789012345678901234567890123456789012345678901234567890123456789012345678901234567890";
        fb.write_text(-5, 4, long, colour::WHITE, colour::BLACK);
        assert_eq!(fb.char_at(0, 4), Some(b' '));
        assert_eq!(fb.char_at(COLS - 1, 4), Some(b' '));
        // Interior got the clipped slice.
        assert_eq!(fb.char_at(1, 4), Some(long.as_bytes()[6]));
    }

    #[test]
    fn write_text_out_of_range_row_is_noop() {
        let mut fb = FrameBuffer::new();
        fb.write_text(5, -1, "hi", colour::WHITE, colour::BLACK);
        fb.write_text(5, ROWS as i32, "hi", colour::WHITE, colour::BLACK);
        for x in 0..COLS {
            for y in 0..ROWS {
                assert_eq!(fb.char_at(x, y), Some(b' '));
            }
        }
    }

    #[test]
    fn write_centered_placement() {
        let mut fb = FrameBuffer::new();
        let text = "VAULT"; // |s| = 5
        fb.write_centered(3, text, colour::WHITE, colour::BLACK);
        let expected_x = COLS / 2 - text.len() / 2;
        assert_eq!(fb.char_at(expected_x, 3), Some(b'V'));
        assert_eq!(fb.char_at(expected_x + 4, 3), Some(b'T'));
        assert_eq!(fb.char_at(expected_x - 1, 3), Some(b' '));
    }

    #[test]
    fn clear_row_leaves_border() {
        let mut fb = FrameBuffer::new();
        fb.set_char(0, 5, b'#');
        fb.set_char(COLS - 1, 5, b'#');
        fb.write_text(10, 5, "content", colour::WHITE, colour::RED);
        fb.clear_row(5, colour::GREEN);
        assert_eq!(fb.char_at(0, 5), Some(b'#'));
        assert_eq!(fb.char_at(COLS - 1, 5), Some(b'#'));
        assert_eq!(fb.char_at(10, 5), Some(b' '));
        assert_eq!(fb.colour_at(10, 5), Some((colour::BLACK, colour::GREEN)));
    }

    #[test]
    fn clear_and_rewrite_is_idempotent() {
        let mut a = FrameBuffer::new();
        let mut b = FrameBuffer::new();

        // Two passes on `a`, one pass on `b`: bit-identical result.
        for _ in 0..2 {
            a.clear_row(9, colour::BLACK);
            a.write_centered(9, "Enter password (4 digits):", colour::WHITE, colour::BLACK);
        }
        b.clear_row(9, colour::BLACK);
        b.write_centered(9, "Enter password (4 digits):", colour::WHITE, colour::BLACK);

        assert_eq!(a.chars, b.chars);
        assert_eq!(a.colours, b.colours);
    }

    #[test]
    fn row_slices_line_up() {
        let mut fb = FrameBuffer::new();
        fb.set_char(0, 2, b'Z');
        fb.set_colour(0, 2, 0x03, 0x00);
        assert_eq!(fb.char_row(2)[0], b'Z');
        // Red plane, first word, low nibble holds fg bits 0..2.
        assert_eq!(fb.colour_row(2, 0)[0] & 0xf, 0x3);
        // Blue plane sees nothing for a red-only foreground.
        assert_eq!(fb.colour_row(2, 2)[0], 0);
    }
}
