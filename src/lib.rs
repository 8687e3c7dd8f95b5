//! Schema-driven JSON decoding.
//!
//! A single-pass recursive-descent parser that binds decoded values
//! straight into caller-supplied destinations through a declarative
//! field/array specification, instead of building a generic parse tree.
//! The consumer describes the shape it expects ([`FieldSpec`] tables for
//! objects, [`ArrayElement`] types for arrays), hands the decoder the full
//! input text, and gets its own data structure populated in one walk.
//!
//! ```
//! use jsonbind::{object_from_str, FieldSpec};
//!
//! let mut name = String::new();
//! let mut age = 0;
//! let mut fields = [
//!     FieldSpec::string("name", &mut name),
//!     FieldSpec::integer("age", &mut age),
//! ];
//! object_from_str(r#"{"name":"robin","age":34}"#, &mut fields).unwrap();
//! drop(fields);
//!
//! assert_eq!(name, "robin");
//! assert_eq!(age, 34);
//! ```
//!
//! The decoder is strict where it matters (escape spelling, literal
//! spelling, bracket matching, kind checking against the schema) and
//! deliberately small: no streaming, no `\uXXXX` escapes, no exponents,
//! no generic tree output. Errors are structured ([`DecodeError`] with a
//! kind and byte offset); a rendered source excerpt with a caret is
//! available through [`report::render_excerpt`] and is also emitted on the
//! `log` facade when an error is constructed.

pub mod decode;
pub mod error;
pub mod options;
pub mod report;
pub mod spec;

pub use decode::{ArrayElement, Decoder};
pub use error::{DecodeError, ErrorKind};
pub use options::DecodeOptions;
pub use spec::{ArrayTarget, BindArray, FieldSpec, Kind, ObjectTarget, Sink, ValueSpec};

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Decode the JSON object at the root of `input` through `fields`.
pub fn object_from_str(input: &str, fields: &mut [FieldSpec<'_>]) -> Result<()> {
    Decoder::new(input).parse_object(fields)
}

/// Decode a root-level JSON array of plain integers.
pub fn integers_from_str(input: &str) -> Result<Vec<i32>> {
    Decoder::new(input).parse_array()
}

/// Decode a root-level JSON array of plain floats (integer-shaped elements
/// are admitted).
pub fn floats_from_str(input: &str) -> Result<Vec<f32>> {
    Decoder::new(input).parse_array()
}

/// Decode a root-level JSON array of plain strings.
pub fn strings_from_str(input: &str) -> Result<Vec<String>> {
    Decoder::new(input).parse_array()
}
