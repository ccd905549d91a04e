//! Error handling for JSON values.
//!
//! Every failure the crate can report is a variant of [`Error`]. Each variant
//! carries a stable numeric code (see [`Error::code`]) so callers can match on
//! failures without depending on message text.
//!
//! # Codes
//!
//! - 1xx: parsing (syntax, input limits, nesting depth)
//! - 2xx: access (type mismatch, index out of range)
//! - 3xx: resources (allocation, I/O)

use std::collections::TryReserveError;
use std::fmt;
use std::io;

use thiserror::Error;

use crate::value::Kind;

/// Location of a parse error within the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Position {
    /// Compute the line and column of `offset` within `input`.
    ///
    /// Offsets past the end of the input are clamped to the end.
    pub fn locate(input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let prefix = &input[..offset];
        let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = prefix
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        // Count characters, not bytes: skip UTF-8 continuation bytes.
        let column = prefix[line_start..]
            .iter()
            .filter(|&&b| b & 0xC0 != 0x80)
            .count()
            + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// All errors produced by parsing, access, and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed JSON input.
    #[error("syntax error at {position}: {message}")]
    Syntax {
        /// What the parser expected or rejected.
        message: String,
        /// Where the offending token starts.
        position: Position,
    },

    /// Input exceeds `Limits::max_input_size`.
    #[error("input too large: {0} bytes exceeds limit of {1}")]
    InputTooLarge(u64, u64),

    /// Arrays/objects nested deeper than `Limits::max_nesting_depth`.
    #[error("nesting depth {depth} exceeds limit of {limit} at {position}")]
    DepthExceeded {
        /// Depth reached when the limit tripped.
        depth: u64,
        /// Configured maximum.
        limit: u64,
        /// Position of the opening bracket that went too deep.
        position: Position,
    },

    /// A string literal exceeds `Limits::max_string_length`.
    #[error("string too long: {0} bytes exceeds limit of {1}")]
    StringTooLong(u64, u64),

    /// An object exceeds `Limits::max_object_fields`.
    #[error("too many object fields: {0} exceeds limit of {1}")]
    TooManyFields(u64, u64),

    /// An array exceeds `Limits::max_array_length`.
    #[error("array too long: {0} elements exceeds limit of {1}")]
    ArrayTooLong(u64, u64),

    /// An accessor or conversion was applied to a value of the wrong kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Description of the accepted kind(s).
        expected: &'static str,
        /// Kind actually held by the value.
        found: Kind,
    },

    /// Array index outside the valid range.
    #[error("index {index} out of range (length {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the array at the time of the request.
        len: usize,
    },

    /// Container growth could not reserve memory.
    #[error("allocation failure while growing a container")]
    AllocationFailure,

    /// The underlying reader or writer failed.
    #[error("I/O error ({kind:?}): {message}")]
    Io {
        /// Kind reported by the reader/writer.
        kind: io::ErrorKind,
        /// Rendered error message.
        message: String,
    },
}

impl Error {
    /// Stable numeric code for this error.
    pub const fn code(&self) -> u32 {
        match self {
            Error::Syntax { .. } => 100,
            Error::InputTooLarge(..) => 110,
            Error::DepthExceeded { .. } => 111,
            Error::StringTooLong(..) => 112,
            Error::TooManyFields(..) => 113,
            Error::ArrayTooLong(..) => 114,
            Error::TypeMismatch { .. } => 200,
            Error::IndexOutOfRange { .. } => 201,
            Error::AllocationFailure => 300,
            Error::Io { .. } => 301,
        }
    }

    /// Position of the failure within the input, for parse errors.
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Syntax { position, .. } | Error::DepthExceeded { position, .. } => {
                Some(*position)
            }
            _ => None,
        }
    }

    /// Returns true if this error was raised while parsing.
    pub fn is_parse_error(&self) -> bool {
        (100..200).contains(&self.code())
    }

    pub(crate) fn type_mismatch(expected: &'static str, found: Kind) -> Self {
        Error::TypeMismatch { expected, found }
    }

    pub(crate) fn syntax(message: impl Into<String>, position: Position) -> Self {
        Error::Syntax {
            message: message.into(),
            position,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::AllocationFailure
    }
}

/// Result type alias for JSON operations.
pub type Result<T> = std::result::Result<T, Error>;
