//! The decoder: one parse session over a fully buffered input text.
//!
//! Root scope (the first parse call on a decoder) skips leading whitespace
//! and rejects trailing data after the top-level closer; nested calls made
//! from [`crate::spec::ObjectTarget`]/[`crate::spec::ArrayTarget`]
//! constructors go through the same public entry points with root handling
//! already spent.

mod array;
mod cursor;
mod object;
mod scalar;

pub use array::ArrayElement;

use cursor::{is_whitespace, Cursor, TERMINATOR};

use crate::error::{DecodeError, ErrorKind};
use crate::options::DecodeOptions;
use crate::report;
use crate::spec::{FieldSpec, Kind};
use crate::Result;

pub struct Decoder<'a> {
    input: &'a str,
    cursor: Cursor<'a>,
    root: bool,
    depth: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, DecodeOptions::default())
    }

    pub fn with_options(input: &'a str, options: DecodeOptions) -> Self {
        Self {
            input,
            cursor: Cursor::new(input.as_bytes()),
            root: true,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Parse one JSON object, binding every matched field through `fields`.
    /// Unknown keys are parsed and discarded with identical validation.
    ///
    /// On failure the destinations behind `fields` may be partially
    /// populated and must not be relied upon.
    pub fn parse_object(&mut self, fields: &mut [FieldSpec<'_>]) -> Result<()> {
        let root = self.enter_root();
        self.parse_object_fields(fields)?;
        if root {
            self.expect_end("parse object")?;
        }
        Ok(())
    }

    /// Parse one JSON array of homogeneous elements.
    pub fn parse_array<T: ArrayElement>(&mut self) -> Result<Vec<T>> {
        let root = self.enter_root();
        let items = self.parse_array_items()?;
        if root {
            self.expect_end("parse array")?;
        }
        Ok(items)
    }

    /// On the first parse call only: seat the cursor before the input and
    /// read forward past whitespace so the grammar entry point sees the
    /// first non-whitespace byte as current.
    fn enter_root(&mut self) -> bool {
        if !self.root {
            return false;
        }
        self.root = false;
        self.cursor.seek_before_start();
        let mut c = self.cursor.read();
        while is_whitespace(c) {
            c = self.cursor.read();
        }
        true
    }

    fn expect_end(&mut self, what: &str) -> Result<()> {
        let mut c = self.cursor.read();
        while is_whitespace(c) {
            c = self.cursor.read();
        }
        if c != TERMINATOR {
            return Err(self.structural(format!(
                "{what}: expected end of input, but found more data"
            )));
        }
        Ok(())
    }

    pub(crate) fn read(&mut self) -> u8 {
        self.cursor.read()
    }

    pub(crate) fn back(&mut self) {
        self.cursor.back()
    }

    pub(crate) fn current(&self) -> u8 {
        self.cursor.current()
    }

    /// Token kind must share at least one bit with the destination's
    /// admissible kinds. This is the schema's sole validation role.
    pub(crate) fn check_kind(&self, token: Kind, allowed: Kind) -> Result<()> {
        if !token.intersects(allowed) {
            return Err(self.semantic(format!(
                "type mismatch: found {token} where {allowed} was expected"
            )));
        }
        Ok(())
    }

    pub(crate) fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.structural("nesting too deep"));
        }
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.depth -= 1;
    }

    pub(crate) fn structural(&self, message: impl Into<String>) -> DecodeError {
        self.fail(ErrorKind::Structural, message)
    }

    pub(crate) fn lexical(&self, message: impl Into<String>) -> DecodeError {
        self.fail(ErrorKind::Lexical, message)
    }

    pub(crate) fn semantic(&self, message: impl Into<String>) -> DecodeError {
        self.fail(ErrorKind::Semantic, message)
    }

    /// Diagnostics are a side channel: the rendered excerpt goes to the log
    /// sink, the structured error to the caller.
    fn fail(&self, kind: ErrorKind, message: impl Into<String>) -> DecodeError {
        let error = DecodeError {
            kind,
            offset: self.cursor.offset(),
            message: message.into(),
        };
        log::debug!(
            "{error}\n{}",
            report::render_excerpt(self.input, error.offset)
        );
        error
    }
}
