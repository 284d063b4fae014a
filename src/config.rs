//! Codec limits shared by the encoder and decoder.

use crate::error::{Error, Result};

/// Limits applied to every length or count prefix on the wire.
///
/// The default accepts anything a 4-byte prefix can express. A tighter
/// `max_len` makes the decoder reject hostile prefixes before it reserves
/// memory for them, and makes the encoder refuse to produce records the peer
/// would reject.
///
/// Counts for zero-sized elements (`Vec<()>`, unit structs) consume no input
/// per element, so only `max_len` bounds the work spent decoding them.
///
/// ```rust
/// use mircodec::{Config, Error};
///
/// let config = Config::default().with_max_len(4);
/// let err = mircodec::to_bytes_with_config(&"hello".to_string(), config).unwrap_err();
/// assert_eq!(err, Error::LengthOverflow { max: 4, got: 5 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    max_len: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config { max_len: u32::MAX }
    }
}

impl Config {
    /// Cap every string length, byte-sequence length and sequence count.
    pub fn with_max_len(mut self, max_len: u32) -> Self {
        self.max_len = max_len;
        self
    }

    /// The current cap.
    pub fn max_len(&self) -> u32 {
        self.max_len
    }

    /// Validate a length before it is written or honoured.
    pub(crate) fn check_len(&self, len: u64) -> Result<u32> {
        if len > self.max_len as u64 {
            return Err(Error::LengthOverflow {
                max: self.max_len,
                got: len,
            });
        }
        Ok(len as u32)
    }
}
