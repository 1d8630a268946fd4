//! Marquee scrolling.
//!
//! A [`ScrollSession`] holds the state of one scrolling text: the current
//! window position and the time of the last frame. Callers poll
//! [`Lcd::scroll`](super::Lcd::scroll) from their main loop with the current
//! millisecond clock; a new frame is drawn only once the interval has elapsed.

use crate::display::CharSink;
use crate::source::TextSource;

/// Minimum time between two frames.
pub const SCROLL_INTERVAL_MS: u32 = 300;

/// State of one scrolling text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSession {
    position: usize,
    last_frame_ms: u32,
    interval_ms: u32,
}

impl ScrollSession {
    /// New session; the first frame is due one interval after `now_ms`.
    #[must_use]
    pub const fn new(now_ms: u32) -> Self {
        Self {
            position: 0,
            last_frame_ms: now_ms,
            interval_ms: SCROLL_INTERVAL_MS,
        }
    }

    #[must_use]
    pub const fn with_interval(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Index of the first character shown by the next frame.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval_ms
    }

    /// Restart from the beginning of the text.
    pub fn reset(&mut self, now_ms: u32) {
        self.position = 0;
        self.last_frame_ms = now_ms;
    }

    /// Whether a frame is due at `now_ms`. The clock may wrap.
    #[must_use]
    pub const fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_frame_ms) >= self.interval_ms
    }

    /// Draw one frame of `width` cells and advance by one character.
    ///
    /// Cells past the end of the text are blanked. Once the window has
    /// started past the last character the position wraps to zero. Does not
    /// check [`is_due`](Self::is_due).
    pub fn draw<S, T>(&mut self, sink: &mut S, now_ms: u32, text: &T, width: u8) -> usize
    where
        S: CharSink + ?Sized,
        T: TextSource + ?Sized,
    {
        let len = text.text_len();
        if self.position >= len {
            self.position = 0;
        }
        log::trace!("scroll frame at {} of {len}", self.position);

        let mut n = 0;
        for j in 0..usize::from(width) {
            let index = self.position + j;
            n += sink.write(if index < len { text.read_byte(index) } else { b' ' });
        }
        self.position += 1;
        self.last_frame_ms = now_ms;
        n
    }
}
