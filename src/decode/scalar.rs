//! Scalar token parsers. Each consumes exactly one token and leaves the
//! cursor on its last byte, so the enclosing state machine's next read
//! yields the first byte after the token.

use super::cursor::{is_digit, unescape, TERMINATOR};
use super::Decoder;
use crate::Result;

/// A number token before the caller picks a destination type. The integer
/// part accumulates in a wrapping 32-bit signed value; the fractional part
/// is a base-10 weighted digit sum. The sign applies to the final value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawNumber {
    negative: bool,
    magnitude: i32,
    fraction: f32,
    pub(crate) has_fraction: bool,
}

impl RawNumber {
    pub(crate) fn as_i32(self) -> i32 {
        if self.negative {
            self.magnitude.wrapping_neg()
        } else {
            self.magnitude
        }
    }

    pub(crate) fn as_f32(self) -> f32 {
        let value = self.magnitude as f32 + self.fraction;
        if self.negative {
            -value
        } else {
            value
        }
    }
}

impl Decoder<'_> {
    /// Parse a string token. The cursor must sit on the opening quote. The
    /// full string is always assembled, whether or not a destination ends up
    /// receiving it, so unknown keys and skipped values validate the same
    /// way bound ones do.
    pub(crate) fn parse_string(&mut self) -> Result<String> {
        let mut buf: Vec<u8> = Vec::new();
        let mut escaped = false;
        loop {
            let c = self.read();
            match c {
                TERMINATOR => {
                    return Err(self.lexical("parse string: missing closing '\"'"));
                }
                b'\\' if !escaped => escaped = true,
                b'"' if !escaped => break,
                _ if escaped => {
                    escaped = false;
                    match unescape(c) {
                        Some(mapped) => buf.push(mapped),
                        None if c == b'"' => buf.push(b'"'),
                        None => {
                            return Err(self.lexical("parse string: invalid escaped character"));
                        }
                    }
                }
                _ => buf.push(c),
            }
        }
        // Bytes were copied verbatim from a &str between char boundaries, so
        // this cannot fail on well-formed input.
        String::from_utf8(buf).map_err(|_| self.lexical("parse string: invalid utf-8"))
    }

    /// Parse a number token starting at the current byte (`-` or a digit).
    /// Never fails: consumes the longest number-shaped prefix and backs the
    /// cursor up one byte, leaving the delimiter for the enclosing grammar
    /// to classify.
    pub(crate) fn parse_number(&mut self) -> RawNumber {
        let mut number = RawNumber {
            negative: false,
            magnitude: 0,
            fraction: 0.0,
            has_fraction: false,
        };

        let mut c = self.current();
        if c == b'-' {
            number.negative = true;
            c = self.read();
        }

        // A leading zero may only be followed by a fraction or a delimiter.
        if c == b'0' {
            c = self.read();
            if c == b'.' {
                self.parse_fraction(&mut number);
            }
            self.back();
            return number;
        }

        loop {
            if is_digit(c) {
                number.magnitude = number
                    .magnitude
                    .wrapping_mul(10)
                    .wrapping_add(i32::from(c - b'0'));
            } else if c == b'.' {
                self.parse_fraction(&mut number);
                break;
            } else {
                break;
            }
            c = self.read();
        }

        self.back();
        number
    }

    fn parse_fraction(&mut self, number: &mut RawNumber) {
        number.has_fraction = true;
        let mut div = 1.0_f32;
        loop {
            let c = self.read();
            if !is_digit(c) {
                break;
            }
            div *= 10.0;
            number.fraction += f32::from(c - b'0') / div;
        }
    }

    /// Parse `true` or `false` starting at the current byte.
    pub(crate) fn parse_boolean(&mut self) -> Result<bool> {
        let (literal, value) = match self.current() {
            b't' => ("true", true),
            b'f' => ("false", false),
            _ => {
                return Err(self.lexical(
                    "parse boolean: value does not start with 't' or 'f'",
                ));
            }
        };
        self.expect_literal(literal, "parse boolean")?;
        Ok(value)
    }

    /// Parse the exact literal `null` starting at the current byte.
    pub(crate) fn parse_null(&mut self) -> Result<()> {
        self.expect_literal("null", "parse null")
    }

    fn expect_literal(&mut self, literal: &'static str, what: &str) -> Result<()> {
        for (i, expected) in literal.bytes().enumerate() {
            let c = if i == 0 { self.current() } else { self.read() };
            if c != expected {
                return Err(self.lexical(format!(
                    "{what}: expected \"{literal}\" but found unexpected character"
                )));
            }
        }
        Ok(())
    }
}
