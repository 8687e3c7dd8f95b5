use thiserror::Error;

/// Which family of failure a [`DecodeError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or misplaced punctuation: brackets, colons, commas,
    /// premature end of an object or array.
    Structural,
    /// A token that cannot be spelled: bad escape, misspelled literal,
    /// unterminated string.
    Lexical,
    /// A well-formed token whose kind the schema does not admit.
    Semantic,
}

/// Structured parse failure: the first error aborts the whole parse.
///
/// `offset` is the byte position at which the decoder stopped. Pass it to
/// [`crate::report::render_excerpt`] to obtain a source excerpt with a caret
/// under the offending column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct DecodeError {
    pub kind: ErrorKind,
    pub offset: usize,
    pub message: String,
}

impl DecodeError {
    pub fn structural(offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Structural,
            offset,
            message: message.into(),
        }
    }

    pub fn lexical(offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Lexical,
            offset,
            message: message.into(),
        }
    }

    pub fn semantic(offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Semantic,
            offset,
            message: message.into(),
        }
    }
}
