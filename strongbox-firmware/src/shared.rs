//! State shared between the two cores
//!
//! The frame buffer is a single static arena with exactly one writer
//! handle (core 0, the input loop) and one reader handle (core 1, the
//! render loop) and no lock between them. Writes are single-cell and reads
//! sweep whole rows at frame rate, so the worst case is a half-written
//! attribute visible for one frame; it self-heals on the next pass. The
//! handles are handed out once each, enforced at runtime.
//!
//! The heartbeats are single-writer/single-reader millisecond words; plain
//! relaxed load/store is all the freshness check needs.

use core::cell::UnsafeCell;
use core::sync::atomic::Ordering;

use embassy_time::Instant;
use portable_atomic::{AtomicBool, AtomicU32};

use strongbox_core::framebuffer::FrameBuffer;

/// Written by the render core once per completed frame.
pub static RENDER_HEARTBEAT: AtomicU32 = AtomicU32::new(0);

/// Written by the input loop once per iteration (and during sliced
/// penalty waits when configured to survive them).
pub static INPUT_HEARTBEAT: AtomicU32 = AtomicU32::new(0);

/// Milliseconds since boot, truncated to the supervisor's word size.
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

pub fn beat(heartbeat: &AtomicU32) {
    heartbeat.store(now_ms(), Ordering::Relaxed);
}

/// The shared frame arena.
pub struct SharedFrame {
    frame: UnsafeCell<FrameBuffer>,
    writer_taken: AtomicBool,
    reader_taken: AtomicBool,
}

// One writer on core 0, one reader on core 1, tearing accepted by design.
unsafe impl Sync for SharedFrame {}

pub static FRAME: SharedFrame = SharedFrame::new();

impl SharedFrame {
    const fn new() -> Self {
        Self {
            frame: UnsafeCell::new(FrameBuffer::new()),
            writer_taken: AtomicBool::new(false),
            reader_taken: AtomicBool::new(false),
        }
    }

    /// The one mutating handle. Panics if taken twice.
    pub fn writer(&'static self) -> FrameWriter {
        assert!(!self.writer_taken.swap(true, Ordering::AcqRel));
        FrameWriter { arena: self }
    }

    /// The one reading handle. Panics if taken twice.
    pub fn reader(&'static self) -> FrameReader {
        assert!(!self.reader_taken.swap(true, Ordering::AcqRel));
        FrameReader { arena: self }
    }
}

/// Core 0's handle: all buffer mutation goes through [`with`](Self::with),
/// which scopes the exclusive reference to one call and never holds it
/// across an await point.
pub struct FrameWriter {
    arena: &'static SharedFrame,
}

impl FrameWriter {
    pub fn with<R>(&mut self, f: impl FnOnce(&mut FrameBuffer) -> R) -> R {
        // Sole mutator by construction; the render core only reads.
        f(unsafe { &mut *self.arena.frame.get() })
    }
}

/// Core 1's handle: row reads for the encoder.
pub struct FrameReader {
    arena: &'static SharedFrame,
}

impl FrameReader {
    pub fn frame(&self) -> &FrameBuffer {
        unsafe { &*self.arena.frame.get() }
    }
}
