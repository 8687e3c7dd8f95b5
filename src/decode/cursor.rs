//! Byte cursor over the input text: single-byte forward reads and one-step
//! pushback, the only lookahead the grammar needs.

/// Sentinel byte handed out past the end of input.
pub(crate) const TERMINATOR: u8 = 0;

pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: isize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Seat the cursor one position before the input, so the next `read`
    /// yields the first byte. Root scope only.
    pub(crate) fn seek_before_start(&mut self) {
        self.pos = -1;
    }

    /// Advance one position and return the new current byte.
    pub(crate) fn read(&mut self) -> u8 {
        self.pos += 1;
        self.at(self.pos)
    }

    /// Retreat one position. Used only to undo a single lookahead read.
    pub(crate) fn back(&mut self) {
        self.pos -= 1;
    }

    /// The byte at the current position, without moving.
    pub(crate) fn current(&self) -> u8 {
        self.at(self.pos)
    }

    /// Byte offset of the current position, clamped into the input.
    pub(crate) fn offset(&self) -> usize {
        self.pos.clamp(0, self.bytes.len() as isize) as usize
    }

    fn at(&self, pos: isize) -> u8 {
        if pos < 0 {
            return TERMINATOR;
        }
        self.bytes.get(pos as usize).copied().unwrap_or(TERMINATOR)
    }
}

pub(crate) fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}

pub(crate) fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// The literal byte an escape letter stands for, assuming it follows `\`.
/// `\"` is handled by the string parser itself.
pub(crate) fn unescape(c: u8) -> Option<u8> {
    match c {
        b'\\' => Some(b'\\'),
        b'/' => Some(b'/'),
        b'b' => Some(0x08),
        b'f' => Some(0x0c),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn read_walks_forward_and_terminates() {
        let mut cursor = Cursor::new(b"ab");
        assert_eq!(cursor.current(), b'a');
        assert_eq!(cursor.read(), b'b');
        assert_eq!(cursor.read(), TERMINATOR);
        assert_eq!(cursor.read(), TERMINATOR);
    }

    #[rstest::rstest]
    fn back_undoes_one_read() {
        let mut cursor = Cursor::new(b"xy");
        assert_eq!(cursor.read(), b'y');
        cursor.back();
        assert_eq!(cursor.current(), b'x');
        assert_eq!(cursor.read(), b'y');
    }

    #[rstest::rstest]
    fn seek_before_start_replays_first_byte() {
        let mut cursor = Cursor::new(b"q");
        cursor.seek_before_start();
        assert_eq!(cursor.read(), b'q');
    }

    #[rstest::rstest]
    fn offset_clamps_to_input() {
        let mut cursor = Cursor::new(b"ab");
        cursor.read();
        cursor.read();
        cursor.read();
        assert_eq!(cursor.offset(), 2);
    }

    #[rstest::rstest]
    #[case(b'n', Some(b'\n'))]
    #[case(b't', Some(b'\t'))]
    #[case(b'/', Some(b'/'))]
    #[case(b'\\', Some(b'\\'))]
    #[case(b'x', None)]
    #[case(b'u', None)]
    fn escape_table(#[case] input: u8, #[case] expected: Option<u8>) {
        assert_eq!(unescape(input), expected);
    }
}
