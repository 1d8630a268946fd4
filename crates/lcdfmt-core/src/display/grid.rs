//! In-memory character display.
//!
//! [`TextGrid`] models the parts of an HD44780 controller the front-end
//! touches: display RAM, the cursor, the eight CGRAM glyph slots and the
//! clear / home / address instructions. It backs the tests and the
//! conformance harness.

use core::fmt;

use super::device::{
    CharDevice, CharSink, GLYPH_ROWS, GLYPH_SLOTS, LCD_CLEARDISPLAY, LCD_RETURNHOME,
    LCD_SETCGRAMADDR, LCD_SETDDRAMADDR,
};

/// DDRAM address of the second line.
const ROW_OFFSET: u8 = 0x40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Ddram,
    Cgram(u8),
}

/// Simulated `COLS` x `ROWS` character display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGrid<const COLS: usize, const ROWS: usize> {
    cells: [[u8; COLS]; ROWS],
    col: usize,
    row: usize,
    glyphs: [[u8; GLYPH_ROWS]; GLYPH_SLOTS],
    target: Target,
    hidden: usize,
}

impl<const COLS: usize, const ROWS: usize> TextGrid<COLS, ROWS> {
    /// Blank display with the cursor at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
            col: 0,
            row: 0,
            glyphs: [[0; GLYPH_ROWS]; GLYPH_SLOTS],
            target: Target::Ddram,
            hidden: 0,
        }
    }

    /// Character codes of `row`.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[u8; COLS]> {
        self.cells.get(row)
    }

    /// `row` as text, if it holds only printable ASCII.
    #[must_use]
    pub fn row_str(&self, row: usize) -> Option<&str> {
        let cells = self.cells.get(row)?;
        if cells.iter().all(|&c| (0x20..0x7f).contains(&c)) {
            core::str::from_utf8(cells).ok()
        } else {
            None
        }
    }

    #[must_use]
    pub fn cell(&self, col: usize, row: usize) -> Option<u8> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Cursor position as `(col, row)`.
    #[must_use]
    pub const fn cursor(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    /// Pixel rows of custom glyph `slot` (0..8).
    #[must_use]
    pub fn glyph(&self, slot: usize) -> Option<&[u8; GLYPH_ROWS]> {
        self.glyphs.get(slot)
    }

    /// Characters written past the last column; counted but not shown.
    #[must_use]
    pub const fn hidden(&self) -> usize {
        self.hidden
    }

    fn blank(&mut self) {
        self.cells = [[b' '; COLS]; ROWS];
        self.home();
    }

    fn home(&mut self) {
        self.col = 0;
        self.row = 0;
        self.target = Target::Ddram;
    }

    fn move_to(&mut self, col: usize, row: usize) {
        self.col = col;
        self.row = row.min(ROWS.saturating_sub(1));
        self.target = Target::Ddram;
    }
}

impl<const COLS: usize, const ROWS: usize> Default for TextGrid<COLS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize, const ROWS: usize> CharSink for TextGrid<COLS, ROWS> {
    fn write(&mut self, byte: u8) -> usize {
        match self.target {
            Target::Cgram(addr) => {
                let slot = usize::from(addr >> 3) % GLYPH_SLOTS;
                self.glyphs[slot][usize::from(addr & 7)] = byte;
                self.target = Target::Cgram((addr + 1) & 0x3f);
            }
            Target::Ddram => {
                match self
                    .cells
                    .get_mut(self.row)
                    .and_then(|cells| cells.get_mut(self.col))
                {
                    Some(cell) => *cell = byte,
                    None => self.hidden += 1,
                }
                self.col += 1;
            }
        }
        1
    }
}

impl<const COLS: usize, const ROWS: usize> CharDevice for TextGrid<COLS, ROWS> {
    fn set_cursor(&mut self, col: u8, row: u8) {
        self.move_to(usize::from(col), usize::from(row));
    }

    fn command(&mut self, value: u8) {
        match value {
            LCD_CLEARDISPLAY => self.blank(),
            LCD_RETURNHOME | 0x03 => self.home(),
            LCD_SETDDRAMADDR..=u8::MAX => {
                let addr = value & !LCD_SETDDRAMADDR;
                let row = usize::from(addr >= ROW_OFFSET);
                self.move_to(usize::from(addr % ROW_OFFSET), row);
            }
            LCD_SETCGRAMADDR..LCD_SETDDRAMADDR => {
                self.target = Target::Cgram(value & 0x3f);
            }
            // entry mode, display control, shift, function set
            _ => {}
        }
    }

    fn begin(&mut self, _cols: u8, _rows: u8) {
        self.blank();
    }
}

/// Rows joined by newlines; non-printable codes show as `?`.
impl<const COLS: usize, const ROWS: usize> fmt::Display for TextGrid<COLS, ROWS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cells) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for &c in cells {
                let ch = if (0x20..0x7f).contains(&c) {
                    char::from(c)
                } else {
                    '?'
                };
                fmt::Write::write_char(f, ch)?;
            }
        }
        Ok(())
    }
}
