//! Object grammar: a four-state machine over `{ "key": value , ... }`.

use super::cursor::is_whitespace;
use super::Decoder;
use crate::spec::{FieldSpec, Kind, Sink};
use crate::Result;

/// What the grammar expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Key,
    Colon,
    Value,
    CommaOrEnd,
}

impl Decoder<'_> {
    /// Drive the object grammar. The cursor must sit on the opening `{`.
    /// An empty `fields` table makes every key miss, which is how unknown
    /// nested objects are skipped with full validation.
    pub(crate) fn parse_object_fields(&mut self, fields: &mut [FieldSpec<'_>]) -> Result<()> {
        if self.current() != b'{' {
            return Err(self.structural("parse object: missing opening '{'"));
        }
        self.descend()?;

        let mut state = State::Key;
        let mut matched: Option<usize> = None;

        let mut c = self.read();
        while c != b'}' {
            if is_whitespace(c) {
                c = self.read();
                continue;
            }

            match state {
                State::Key => {
                    if c != b'"' {
                        return Err(self.structural("parse object: expected '\"'"));
                    }
                    let key = self.parse_string()?;
                    // Repeated keys simply rebind: the later value wins.
                    matched = fields.iter().position(|field| field.name == key);
                    state = State::Colon;
                }
                State::Colon => {
                    if c != b':' {
                        return Err(self.structural("parse object: expected ':'"));
                    }
                    state = State::Value;
                }
                State::Value => {
                    self.parse_field_value(fields, matched)?;
                    state = State::CommaOrEnd;
                }
                State::CommaOrEnd => {
                    if c != b',' {
                        return Err(self.structural("parse object: expected ','"));
                    }
                    state = State::Key;
                }
            }
            c = self.read();
        }

        if state != State::CommaOrEnd {
            return Err(self.structural("parse object: unexpected end of object"));
        }
        self.ascend();
        Ok(())
    }

    /// Dispatch on the first byte of a value. A matched field checks the
    /// token kind against its mask and binds through its sink; a miss parses
    /// the value with the same validation and discards it.
    fn parse_field_value(
        &mut self,
        fields: &mut [FieldSpec<'_>],
        matched: Option<usize>,
    ) -> Result<()> {
        let field = matched.map(|index| &mut fields[index]);
        match self.current() {
            b'"' => match field {
                Some(field) => {
                    self.check_kind(Kind::STRING, field.value.kinds)?;
                    let value = self.parse_string()?;
                    if let Sink::Str(dst) = &mut field.value.sink {
                        **dst = value;
                    }
                }
                None => {
                    self.parse_string()?;
                }
            },
            b'-' | b'0'..=b'9' => match field {
                Some(field) => {
                    self.check_kind(Kind::INTEGER | Kind::FLOAT, field.value.kinds)?;
                    let number = self.parse_number();
                    let token = if number.has_fraction {
                        Kind::FLOAT
                    } else {
                        Kind::INTEGER
                    };
                    self.check_kind(token, field.value.kinds)?;
                    match &mut field.value.sink {
                        Sink::Int(dst) => **dst = number.as_i32(),
                        Sink::Float(dst) => **dst = number.as_f32(),
                        _ => {}
                    }
                }
                None => {
                    self.parse_number();
                }
            },
            b't' | b'f' => match field {
                Some(field) => {
                    self.check_kind(Kind::BOOLEAN, field.value.kinds)?;
                    let value = self.parse_boolean()?;
                    if let Sink::Bool(dst) = &mut field.value.sink {
                        **dst = value;
                    }
                }
                None => {
                    self.parse_boolean()?;
                }
            },
            b'n' => match field {
                Some(field) => {
                    self.check_kind(Kind::NULL, field.value.kinds)?;
                    self.parse_null()?;
                    field.value.sink.set_null();
                }
                None => self.parse_null()?,
            },
            b'{' => match field {
                Some(field) => {
                    self.check_kind(Kind::OBJECT, field.value.kinds)?;
                    match &mut field.value.sink {
                        Sink::Object(target) => target.parse_into(self)?,
                        _ => self.parse_object_fields(&mut [])?,
                    }
                }
                None => self.parse_object_fields(&mut [])?,
            },
            b'[' => match field {
                Some(field) => {
                    self.check_kind(Kind::ARRAY, field.value.kinds)?;
                    match &mut field.value.sink {
                        Sink::Array(target) => target.parse_into(self)?,
                        _ => self.skip_array()?,
                    }
                }
                None => self.skip_array()?,
            },
            _ => return Err(self.structural("parse object: invalid value")),
        }
        Ok(())
    }
}
