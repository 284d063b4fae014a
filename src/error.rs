use serde::{de, ser};
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A custom error message from serde
    Message(String),

    /// The input ended before the current field was complete
    Truncated,

    /// The field's kind has no handler in this format (floats, maps, ...)
    UnsupportedKind(&'static str),

    /// A sequence length was not known ahead of time (the count prefix needs it)
    LengthRequired,

    /// A string was not valid UTF-8, or a char was not a Unicode scalar
    InvalidString,

    /// A nullable field's presence flag was neither 0 nor 1
    InvalidPresence(u8),

    /// A length or count exceeded the allowed maximum
    LengthOverflow { max: u32, got: u64 },

    /// An I/O error occurred while reading or writing
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Message(msg) => write!(f, "{}", msg),
            Error::Truncated => write!(f, "input truncated: not enough bytes for field"),
            Error::UnsupportedKind(kind) => write!(f, "unsupported field kind: {}", kind),
            Error::LengthRequired => {
                write!(
                    f,
                    "sequence length must be known before encoding (the count prefix requires it)"
                )
            }
            Error::InvalidString => write!(f, "string contains invalid bytes"),
            Error::InvalidPresence(v) => {
                write!(f, "invalid presence flag: {} (must be 0 or 1)", v)
            }
            Error::LengthOverflow { max, got } => {
                write!(f, "length {} exceeds maximum {}", got, max)
            }
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::Truncated,
            _ => Error::Io(err.to_string()),
        }
    }
}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}
