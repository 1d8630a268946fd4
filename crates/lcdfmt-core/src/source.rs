//! Read-only text sources.
//!
//! Format strings and `%s` values are read one byte at a time through
//! [`TextSource::read_byte`], never copied into working memory. On the target
//! the backing storage may be program flash rather than RAM; the trait keeps
//! the interpreter agnostic of where the bytes live.
//!
//! A text ends at the first NUL byte or at the end of its storage, whichever
//! comes first.

/// Byte-addressed, NUL-terminated, read-only text.
pub trait TextSource {
    /// Read the byte at `addr`. Returns `0` at or past the end of the text.
    fn read_byte(&self, addr: usize) -> u8;

    /// Number of bytes before the terminator.
    fn text_len(&self) -> usize {
        let mut len = 0;
        while self.read_byte(len) != 0 {
            len += 1;
        }
        len
    }

    /// Iterate over the bytes before the terminator.
    fn text_bytes(&self) -> TextBytes<'_, Self> {
        TextBytes {
            source: self,
            addr: 0,
        }
    }
}

impl TextSource for [u8] {
    #[inline]
    fn read_byte(&self, addr: usize) -> u8 {
        self.get(addr).copied().unwrap_or(0)
    }
}

impl<const N: usize> TextSource for [u8; N] {
    #[inline]
    fn read_byte(&self, addr: usize) -> u8 {
        self.as_slice().read_byte(addr)
    }
}

impl TextSource for str {
    #[inline]
    fn read_byte(&self, addr: usize) -> u8 {
        self.as_bytes().read_byte(addr)
    }
}

impl<T: TextSource + ?Sized> TextSource for &T {
    #[inline]
    fn read_byte(&self, addr: usize) -> u8 {
        (**self).read_byte(addr)
    }
}

/// Iterator returned by [`TextSource::text_bytes`].
pub struct TextBytes<'s, S: ?Sized> {
    source: &'s S,
    addr: usize,
}

impl<S: TextSource + ?Sized> Iterator for TextBytes<'_, S> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        match self.source.read_byte(self.addr) {
            0 => None,
            byte => {
                self.addr += 1;
                Some(byte)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Case conversion
// ---------------------------------------------------------------------------

/// ASCII case applied while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Upper,
    Lower,
}

/// A text source read through an ASCII case conversion.
///
/// Only `a-z`/`A-Z` change; every other byte (including the LCD's
/// custom glyph codes 0-7) passes through untouched.
#[derive(Debug, Clone, Copy)]
pub struct Cased<S> {
    source: S,
    case: Case,
}

impl<S: TextSource> TextSource for Cased<S> {
    fn read_byte(&self, addr: usize) -> u8 {
        let byte = self.source.read_byte(addr);
        match self.case {
            Case::Upper => byte.to_ascii_uppercase(),
            Case::Lower => byte.to_ascii_lowercase(),
        }
    }
}

/// View `text` in upper case.
pub fn upper<S: TextSource>(text: S) -> Cased<S> {
    Cased {
        source: text,
        case: Case::Upper,
    }
}

/// View `text` in lower case.
pub fn lower<S: TextSource>(text: S) -> Cased<S> {
    Cased {
        source: text,
        case: Case::Lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_stops_at_nul() {
        let text: &[u8] = b"abc\0def";
        assert_eq!(text.text_len(), 3);
        assert_eq!(text.read_byte(1), b'b');
        assert_eq!(text.read_byte(3), 0);
    }

    #[test]
    fn slice_without_nul_stops_at_end() {
        assert_eq!("hello".text_len(), 5);
        assert_eq!("hello".read_byte(5), 0);
        assert_eq!("hello".read_byte(500), 0);
        assert_eq!("".text_len(), 0);
    }

    #[test]
    fn text_bytes_iterates_until_terminator() {
        let collected: Vec<u8> = b"ab\0c".text_bytes().collect();
        assert_eq!(collected, b"ab");
    }

    #[test]
    fn upper_and_lower_convert_ascii_only() {
        let up: Vec<u8> = upper("Masina 7!").text_bytes().collect();
        assert_eq!(up, b"MASINA 7!");
        let down: Vec<u8> = lower("SeaDIS").text_bytes().collect();
        assert_eq!(down, b"seadis");
        let glyph: &[u8] = &[1, b'a', 0xE1];
        assert_eq!(upper(glyph).read_byte(0), 1);
        assert_eq!(upper(glyph).read_byte(2), 0xE1);
    }
}
