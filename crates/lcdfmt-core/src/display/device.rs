//! Device seams.
//!
//! The formatter only needs a character sink. The LCD helpers additionally
//! position the cursor and send controller commands (custom glyph upload,
//! clear). Everything is synchronous: a call returns once the character or
//! command has reached the device.

// HD44780 instruction set (subset used here).
pub const LCD_CLEARDISPLAY: u8 = 0x01;
pub const LCD_RETURNHOME: u8 = 0x02;
pub const LCD_SETCGRAMADDR: u8 = 0x40;
pub const LCD_SETDDRAMADDR: u8 = 0x80;

/// Number of custom glyph slots in CGRAM.
pub const GLYPH_SLOTS: usize = 8;
/// Pixel rows per 5x8 glyph.
pub const GLYPH_ROWS: usize = 8;

/// Character-at-a-time output.
pub trait CharSink {
    /// Write one character code. Returns the number of characters written.
    fn write(&mut self, byte: u8) -> usize;
}

/// A character display: a sink with a cursor and a command channel.
pub trait CharDevice: CharSink {
    /// Move the cursor to `col`, `row` (both zero-based).
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Send a raw controller instruction.
    fn command(&mut self, value: u8);

    /// Initialize the controller for a `cols` x `rows` panel.
    fn begin(&mut self, cols: u8, rows: u8) {
        let _ = (cols, rows);
    }
}

impl<S: CharSink + ?Sized> CharSink for &mut S {
    fn write(&mut self, byte: u8) -> usize {
        (**self).write(byte)
    }
}

impl<D: CharDevice + ?Sized> CharDevice for &mut D {
    fn set_cursor(&mut self, col: u8, row: u8) {
        (**self).set_cursor(col, row);
    }

    fn command(&mut self, value: u8) {
        (**self).command(value);
    }

    fn begin(&mut self, cols: u8, rows: u8) {
        (**self).begin(cols, rows);
    }
}

#[cfg(any(test, feature = "std"))]
impl CharSink for std::vec::Vec<u8> {
    fn write(&mut self, byte: u8) -> usize {
        self.push(byte);
        1
    }
}

// ---------------------------------------------------------------------------
// Plain sinks
// ---------------------------------------------------------------------------

/// Sink that only counts characters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingSink {
    count: usize,
}

impl CountingSink {
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

impl CharSink for CountingSink {
    fn write(&mut self, _byte: u8) -> usize {
        self.count += 1;
        1
    }
}

/// Sink writing into a caller-provided buffer.
///
/// Characters past the end of the buffer are dropped and reported as not
/// written (`write` returns 0), so the interpreter's count stays truthful.
#[derive(Debug)]
pub struct SliceSink<'b> {
    buf: &'b mut [u8],
    len: usize,
    dropped: usize,
}

impl<'b> SliceSink<'b> {
    pub fn new(buf: &'b mut [u8]) -> Self {
        Self {
            buf,
            len: 0,
            dropped: 0,
        }
    }

    /// Bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Number of characters that did not fit.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Forget the contents, keeping the buffer.
    pub fn clear(&mut self) {
        self.len = 0;
        self.dropped = 0;
    }
}

impl CharSink for SliceSink<'_> {
    fn write(&mut self, byte: u8) -> usize {
        match self.buf.get_mut(self.len) {
            Some(slot) => {
                *slot = byte;
                self.len += 1;
                1
            }
            None => {
                self.dropped += 1;
                0
            }
        }
    }
}
