//! LCD front-end.
//!
//! [`Lcd`] wraps a [`CharDevice`] and adds the text helpers used by sketches:
//! positioned printing, centering, blanking, custom glyphs, scrolling and the
//! `printf` / `displayf` entry points.
//!
//! ```
//! use lcdfmt_core::{Lcd, TextGrid, lcd_args};
//!
//! let mut lcd = Lcd::new(TextGrid::<16, 2>::new());
//! lcd.begin(16, 2);
//! lcd.center(0, "Hello");
//! lcd.displayf(1, 1, "%01i:%02i:%02i", &lcd_args![0, 2, 30]);
//! assert_eq!(lcd.device().row_str(0), Some("     Hello      "));
//! assert_eq!(lcd.device().row_str(1), Some(" 0:02:30        "));
//! ```

use core::fmt;

use crate::args::Arg;
use crate::config::FormatConfig;
use crate::error::FormatError;
use crate::format::field::{FieldSpec, print_fixed_field, print_int_field, print_text_field};
use crate::format::number::{write_fixed, write_integer};
use crate::format::printf::{measure, render, vprintf};
use crate::source::{TextSource, lower, upper};

use super::device::{
    CharDevice, GLYPH_ROWS, GLYPH_SLOTS, LCD_CLEARDISPLAY, LCD_RETURNHOME, LCD_SETCGRAMADDR,
};
use super::scroll::ScrollSession;

/// A character display with formatting helpers.
#[derive(Debug)]
pub struct Lcd<D> {
    device: D,
    cols: u8,
    rows: u8,
    config: FormatConfig,
}

impl<D: CharDevice> Lcd<D> {
    /// Wrap `device`. Geometry is unknown (0 x 0) until [`begin`](Self::begin).
    pub fn new(device: D) -> Self {
        Self {
            device,
            cols: 0,
            rows: 0,
            config: FormatConfig::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: FormatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FormatConfig) {
        self.config = config;
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_inner(self) -> D {
        self.device
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    // -----------------------------------------------------------------------
    // Device pass-through
    // -----------------------------------------------------------------------

    /// Record the panel geometry and initialize the controller.
    pub fn begin(&mut self, cols: u8, rows: u8) {
        self.cols = cols;
        self.rows = rows;
        self.device.begin(cols, rows);
    }

    pub fn clear(&mut self) {
        self.device.command(LCD_CLEARDISPLAY);
    }

    pub fn home(&mut self) {
        self.device.command(LCD_RETURNHOME);
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) {
        self.device.set_cursor(col, row);
    }

    pub fn write(&mut self, byte: u8) -> usize {
        self.device.write(byte)
    }

    // -----------------------------------------------------------------------
    // Printing at the cursor
    // -----------------------------------------------------------------------

    /// Print text up to its terminator.
    pub fn print<T: TextSource + ?Sized>(&mut self, text: &T) -> usize {
        text.text_bytes().map(|b| self.device.write(b)).sum()
    }

    /// Print text with ASCII letters upper-cased.
    pub fn print_upper<T: TextSource + ?Sized>(&mut self, text: &T) -> usize {
        self.print(&upper(text))
    }

    /// Print text with ASCII letters lower-cased.
    pub fn print_lower<T: TextSource + ?Sized>(&mut self, text: &T) -> usize {
        self.print(&lower(text))
    }

    pub fn print_int(&mut self, value: i64) -> usize {
        write_integer(&mut self.device, value)
    }

    pub fn print_fixed(&mut self, value: f64, digits: u8) -> usize {
        write_fixed(&mut self.device, value, digits)
    }

    /// Print several texts separated by single spaces.
    pub fn print_joined<T: TextSource>(&mut self, texts: &[T]) -> usize {
        let mut n = 0;
        for (i, text) in texts.iter().enumerate() {
            if i > 0 {
                n += self.device.write(b' ');
            }
            n += self.print(text);
        }
        n
    }

    // -----------------------------------------------------------------------
    // Positioned printing
    // -----------------------------------------------------------------------

    pub fn display<T: TextSource + ?Sized>(&mut self, col: u8, row: u8, text: &T) -> usize {
        self.device.set_cursor(col, row);
        self.print(text)
    }

    pub fn display_int(&mut self, col: u8, row: u8, value: i64) -> usize {
        self.device.set_cursor(col, row);
        self.print_int(value)
    }

    pub fn display_fixed(&mut self, col: u8, row: u8, value: f64, digits: u8) -> usize {
        self.device.set_cursor(col, row);
        self.print_fixed(value, digits)
    }

    /// Print `text` centered on `row`. Text wider than the panel starts at
    /// column 0.
    pub fn center<T: TextSource + ?Sized>(&mut self, row: u8, text: &T) -> usize {
        let col = self.centered_column(text.text_len());
        self.display(col, row, text)
    }

    /// Render a format centered on `row`.
    pub fn centerf<F: TextSource + ?Sized>(
        &mut self,
        row: u8,
        format: &F,
        args: &[Arg<'_>],
    ) -> usize {
        let col = self.centered_column(measure(format, args, &self.config));
        self.displayf(col, row, format, args)
    }

    fn centered_column(&self, len: usize) -> u8 {
        let len = u8::try_from(len).unwrap_or(u8::MAX);
        self.cols.saturating_sub(len) / 2
    }

    /// Blank `count` cells starting at `col`, `row`.
    pub fn clean(&mut self, col: u8, row: u8, count: u8) -> usize {
        self.device.set_cursor(col, row);
        (0..count).map(|_| self.device.write(b' ')).sum()
    }

    /// Upload a 5x8 glyph into CGRAM slot `location` (taken modulo 8).
    ///
    /// The device is left addressing CGRAM; position the cursor before
    /// printing again.
    pub fn create_char(&mut self, location: u8, glyph: &[u8; GLYPH_ROWS]) {
        let location = location & (GLYPH_SLOTS as u8 - 1);
        self.device.command(LCD_SETCGRAMADDR | (location << 3));
        for &row in glyph {
            self.device.write(row);
        }
    }

    // -----------------------------------------------------------------------
    // Fields and formats
    // -----------------------------------------------------------------------

    pub fn printw_text<T: TextSource + ?Sized>(&mut self, spec: &FieldSpec, text: &T) -> usize {
        print_text_field(&mut self.device, spec, text)
    }

    pub fn printw_int(&mut self, spec: &FieldSpec, value: i64) -> usize {
        print_int_field(&mut self.device, spec, value)
    }

    pub fn printw_fixed(&mut self, spec: &FieldSpec, value: f64, digits: u8) -> usize {
        print_fixed_field(&mut self.device, spec, value, digits)
    }

    /// Render a format at the cursor. Never fails; returns the characters
    /// written.
    pub fn printf<F: TextSource + ?Sized>(&mut self, format: &F, args: &[Arg<'_>]) -> usize {
        render(&mut self.device, format, args, &self.config).written
    }

    /// Strict [`printf`](Self::printf): stops at the first anomaly.
    pub fn try_printf<F: TextSource + ?Sized>(
        &mut self,
        format: &F,
        args: &[Arg<'_>],
    ) -> Result<usize, FormatError> {
        vprintf(&mut self.device, format, args, &self.config.strict())
    }

    /// Move to `col`, `row`, then [`printf`](Self::printf).
    pub fn displayf<F: TextSource + ?Sized>(
        &mut self,
        col: u8,
        row: u8,
        format: &F,
        args: &[Arg<'_>],
    ) -> usize {
        self.device.set_cursor(col, row);
        self.printf(format, args)
    }

    /// Move to `col`, `row`, then [`try_printf`](Self::try_printf).
    pub fn try_displayf<F: TextSource + ?Sized>(
        &mut self,
        col: u8,
        row: u8,
        format: &F,
        args: &[Arg<'_>],
    ) -> Result<usize, FormatError> {
        self.device.set_cursor(col, row);
        self.try_printf(format, args)
    }

    // -----------------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------------

    /// Draw the next frame of a marquee `width` cells wide at `col`, `row`.
    ///
    /// Returns `None` without touching the device if the session's interval
    /// has not elapsed at `now_ms`.
    pub fn scroll<T: TextSource + ?Sized>(
        &mut self,
        col: u8,
        row: u8,
        text: &T,
        width: u8,
        session: &mut ScrollSession,
        now_ms: u32,
    ) -> Option<usize> {
        if !session.is_due(now_ms) {
            return None;
        }
        self.device.set_cursor(col, row);
        Some(session.draw(&mut self.device, now_ms, text, width))
    }
}

impl<D: CharDevice> fmt::Write for Lcd<D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &b in s.as_bytes() {
            self.device.write(b);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::TextGrid;
    use crate::display::device::CharSink;
    use crate::lcd_args;

    /// Device that records every call.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl CharSink for Recorder {
        fn write(&mut self, byte: u8) -> usize {
            self.calls.push(format!("w{}", char::from(byte)));
            1
        }
    }

    impl CharDevice for Recorder {
        fn set_cursor(&mut self, col: u8, row: u8) {
            self.calls.push(format!("at{col},{row}"));
        }

        fn command(&mut self, value: u8) {
            self.calls.push(format!("cmd{value:#04x}"));
        }
    }

    fn lcd1602() -> Lcd<TextGrid<16, 2>> {
        let mut lcd = Lcd::new(TextGrid::new());
        lcd.begin(16, 2);
        lcd
    }

    #[test]
    fn test_displayf_positions_before_writing() {
        let mut lcd = Lcd::new(Recorder::default());
        let n = lcd.displayf(1, 1, "%01i:%02i:%02i", &lcd_args![0, 2, 30]);
        assert_eq!(n, 7);
        let calls = &lcd.device().calls;
        assert_eq!(calls[0], "at1,1");
        let text: String = calls[1..].iter().map(|c| &c[1..]).collect();
        assert_eq!(text, "0:02:30");
    }

    #[test]
    fn test_displayf_on_grid() {
        let mut lcd = lcd1602();
        lcd.displayf(1, 1, "%01i:%02i:%02i", &lcd_args![0, 2, 30]);
        assert_eq!(lcd.device().row_str(1), Some(" 0:02:30        "));
    }

    #[test]
    fn test_printf_and_try_printf_return_count() {
        let mut lcd = lcd1602();
        assert_eq!(lcd.printf("T=%d", &lcd_args![21]), 4);
        assert_eq!(lcd.try_printf("%s", &lcd_args!["ok"]), Ok(2));
        assert_eq!(lcd.device().row_str(0), Some("T=21ok          "));
    }

    #[test]
    fn test_try_printf_is_strict_regardless_of_config() {
        let mut lcd = lcd1602();
        assert_eq!(
            lcd.try_displayf(0, 0, "a%d", &[]),
            Err(FormatError::MissingArgument { offset: 1 })
        );
        assert_eq!(lcd.device().row_str(0), Some("a               "));
    }

    #[test]
    fn test_center() {
        let mut lcd = lcd1602();
        lcd.center(0, "Hello");
        assert_eq!(lcd.device().row_str(0), Some("     Hello      "));
        lcd.center(1, "this text is far too wide");
        assert_eq!(lcd.device().cell(0, 1), Some(b't'));
    }

    #[test]
    fn test_center_before_begin_uses_column_zero() {
        let mut lcd = Lcd::new(TextGrid::<16, 2>::new());
        lcd.center(0, "ab");
        assert_eq!(lcd.device().row_str(0), Some("ab              "));
    }

    #[test]
    fn test_centerf() {
        let mut lcd = lcd1602();
        lcd.centerf(1, "%d%%", &lcd_args![50]);
        assert_eq!(lcd.device().row_str(1), Some("      50%       "));
    }

    #[test]
    fn test_clean() {
        let mut lcd = lcd1602();
        lcd.display(0, 0, "0123456789");
        assert_eq!(lcd.clean(2, 0, 3), 3);
        assert_eq!(lcd.device().row_str(0), Some("01   56789      "));
    }

    #[test]
    fn test_create_char_masks_location() {
        let mut lcd = Lcd::new(Recorder::default());
        lcd.create_char(9, &[0x1f; GLYPH_ROWS]);
        let calls = &lcd.device().calls;
        assert_eq!(calls[0], "cmd0x48");
        assert_eq!(calls.len(), 1 + GLYPH_ROWS);

        let mut lcd = lcd1602();
        lcd.create_char(2, &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(lcd.device().glyph(2), Some(&[1, 2, 3, 4, 5, 6, 7, 8]));
    }

    #[test]
    fn test_case_printing() {
        let mut lcd = lcd1602();
        lcd.print_upper("Masina 1");
        lcd.set_cursor(0, 1);
        lcd.print_lower("MASINA 1");
        assert_eq!(lcd.device().row_str(0), Some("MASINA 1        "));
        assert_eq!(lcd.device().row_str(1), Some("masina 1        "));
    }

    #[test]
    fn test_print_joined() {
        let mut lcd = lcd1602();
        assert_eq!(lcd.print_joined(&["one", "two", "3"]), 9);
        assert_eq!(lcd.device().row_str(0), Some("one two 3       "));
    }

    #[test]
    fn test_numbers_and_fields() {
        let mut lcd = lcd1602();
        lcd.display_int(0, 0, -12);
        lcd.display_fixed(4, 0, 3.14159, 3);
        lcd.set_cursor(0, 1);
        lcd.printw_int(&FieldSpec::new(4).pad(b'0'), 7);
        lcd.printw_text(&FieldSpec::new(4), "ab");
        lcd.printw_fixed(&FieldSpec::new(5).left(), 2.5, 1);
        lcd.write(b'|');
        assert_eq!(lcd.device().row_str(0), Some("-12 3.142       "));
        assert_eq!(lcd.device().row_str(1), Some("0007  ab2.5  |  "));
    }

    #[test]
    fn test_scroll_gate_and_frames() {
        let mut lcd = lcd1602();
        let mut session = ScrollSession::new(0);
        assert_eq!(lcd.scroll(0, 0, "abcdef", 4, &mut session, 100), None);
        assert_eq!(lcd.scroll(0, 0, "abcdef", 4, &mut session, 300), Some(4));
        assert_eq!(lcd.device().row_str(0), Some("abcd            "));
        assert_eq!(lcd.scroll(0, 0, "abcdef", 4, &mut session, 400), None);
        assert_eq!(lcd.scroll(0, 0, "abcdef", 4, &mut session, 600), Some(4));
        assert_eq!(lcd.device().row_str(0), Some("bcde            "));
    }

    #[test]
    fn test_fmt_write() {
        use core::fmt::Write as _;
        let mut lcd = lcd1602();
        write!(lcd, "{}-{}", 1, "x").unwrap();
        assert_eq!(lcd.device().row_str(0), Some("1-x             "));
    }

    #[test]
    fn test_clear_and_into_inner() {
        let mut lcd = lcd1602();
        lcd.print("junk");
        lcd.clear();
        lcd.home();
        assert_eq!(lcd.cols(), 16);
        assert_eq!(lcd.rows(), 2);
        let grid = lcd.into_inner();
        assert_eq!(grid.row_str(0), Some("                "));
        assert_eq!(grid.cursor(), (0, 0));
    }
}
