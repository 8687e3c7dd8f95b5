//! Array grammar: a two-state machine over `[ value , ... ]`, plus the
//! growable element storage behind typed decoding.

use super::cursor::is_whitespace;
use super::Decoder;
use crate::spec::Kind;
use crate::Result;

/// Element types the typed array grammar can decode.
///
/// Provided for `i32`, `f32`, `bool`, `String`, and any `Vec<T>` whose
/// element type qualifies (nested arrays). Consumers implement it for their
/// own struct types to decode arrays of objects:
///
/// ```
/// use jsonbind::{ArrayElement, Decoder, FieldSpec, Kind};
///
/// #[derive(Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl ArrayElement for Point {
///     const KINDS: Kind = Kind::OBJECT;
///
///     fn decode(decoder: &mut Decoder<'_>) -> jsonbind::Result<Self> {
///         let mut point = Point::default();
///         let mut fields = [
///             FieldSpec::integer("x", &mut point.x),
///             FieldSpec::integer("y", &mut point.y),
///         ];
///         decoder.parse_object(&mut fields)?;
///         drop(fields);
///         Ok(point)
///     }
/// }
///
/// let points: Vec<Point> = jsonbind::Decoder::new(r#"[{"x":1,"y":2}]"#)
///     .parse_array()
///     .unwrap();
/// assert_eq!(points[0].x, 1);
/// ```
pub trait ArrayElement: Sized {
    /// Token shapes an element may take, checked before decoding.
    const KINDS: Kind;

    /// Decode one element. The cursor sits on the first byte of the value,
    /// which is guaranteed to match `KINDS`.
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self>;
}

impl ArrayElement for i32 {
    const KINDS: Kind = Kind::INTEGER;

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        let number = decoder.parse_number();
        if number.has_fraction {
            return Err(decoder.semantic(
                "type mismatch: found float where integer was expected",
            ));
        }
        Ok(number.as_i32())
    }
}

impl ArrayElement for f32 {
    const KINDS: Kind = Kind::FLOAT.union(Kind::INTEGER);

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        Ok(decoder.parse_number().as_f32())
    }
}

impl ArrayElement for bool {
    const KINDS: Kind = Kind::BOOLEAN;

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        decoder.parse_boolean()
    }
}

impl ArrayElement for String {
    const KINDS: Kind = Kind::STRING;

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        decoder.parse_string()
    }
}

impl<T: ArrayElement> ArrayElement for Vec<T> {
    const KINDS: Kind = Kind::ARRAY;

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        decoder.parse_array()
    }
}

/// Growable element storage with a fixed, observable policy: nothing is
/// allocated for zero elements, the first element allocates capacity 10,
/// and a full buffer doubles (allocate 2x, move, release).
struct ElementBuf<T> {
    items: Vec<T>,
}

impl<T> ElementBuf<T> {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn push(&mut self, item: T) {
        if self.items.capacity() == 0 {
            self.items.reserve_exact(10);
        } else if self.items.len() == self.items.capacity() {
            let mut grown = Vec::with_capacity(self.items.capacity() * 2);
            grown.append(&mut self.items);
            self.items = grown;
        }
        self.items.push(item);
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn into_vec(self) -> Vec<T> {
        self.items
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Value,
    Comma,
}

impl Decoder<'_> {
    /// Drive the array grammar, accumulating typed elements. The cursor
    /// must sit on the opening `[`.
    pub(crate) fn parse_array_items<T: ArrayElement>(&mut self) -> Result<Vec<T>> {
        if self.current() != b'[' {
            return Err(self.structural("parse array: missing opening '['"));
        }
        self.descend()?;

        let mut buf = ElementBuf::new();
        let mut state = State::Value;

        let mut c = self.read();
        while c != b']' {
            if is_whitespace(c) {
                c = self.read();
                continue;
            }

            match state {
                State::Value => {
                    let token = self.token_kind(c)?;
                    self.check_kind(token, T::KINDS)?;
                    buf.push(T::decode(self)?);
                    state = State::Comma;
                }
                State::Comma => {
                    if c != b',' {
                        return Err(self.structural("parse array: expected ','"));
                    }
                    state = State::Value;
                }
            }
            c = self.read();
        }

        // Only a zero-element array may close straight after '['.
        if state == State::Value && buf.len() > 0 {
            return Err(self.structural("parse array: unexpected end of array"));
        }
        self.ascend();
        Ok(buf.into_vec())
    }

    /// Parse and discard an array, validating every element exactly like
    /// the typed path but allocating nothing.
    pub(crate) fn skip_array(&mut self) -> Result<()> {
        if self.current() != b'[' {
            return Err(self.structural("parse array: missing opening '['"));
        }
        self.descend()?;

        let mut seen = 0usize;
        let mut state = State::Value;

        let mut c = self.read();
        while c != b']' {
            if is_whitespace(c) {
                c = self.read();
                continue;
            }

            match state {
                State::Value => {
                    self.skip_value(c)?;
                    seen += 1;
                    state = State::Comma;
                }
                State::Comma => {
                    if c != b',' {
                        return Err(self.structural("parse array: expected ','"));
                    }
                    state = State::Value;
                }
            }
            c = self.read();
        }

        if state == State::Value && seen > 0 {
            return Err(self.structural("parse array: unexpected end of array"));
        }
        self.ascend();
        Ok(())
    }

    fn skip_value(&mut self, c: u8) -> Result<()> {
        match c {
            b'"' => {
                self.parse_string()?;
            }
            b'-' | b'0'..=b'9' => {
                self.parse_number();
            }
            b't' | b'f' => {
                self.parse_boolean()?;
            }
            b'n' => self.parse_null()?,
            b'{' => self.parse_object_fields(&mut [])?,
            b'[' => self.skip_array()?,
            _ => return Err(self.structural("parse array: invalid value")),
        }
        Ok(())
    }

    /// The token shape the first byte of a value announces. A number byte
    /// could open either numeric kind, so it announces both.
    fn token_kind(&self, c: u8) -> Result<Kind> {
        match c {
            b'"' => Ok(Kind::STRING),
            b'-' | b'0'..=b'9' => Ok(Kind::INTEGER | Kind::FLOAT),
            b't' | b'f' => Ok(Kind::BOOLEAN),
            b'n' => Ok(Kind::NULL),
            b'{' => Ok(Kind::OBJECT),
            b'[' => Ok(Kind::ARRAY),
            _ => Err(self.structural("parse array: invalid value")),
        }
    }
}
