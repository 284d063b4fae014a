//! # mircodec
//!
//! A compact binary codec for Rust records, built on top of the `serde`
//! framework.
//!
//! ## Overview
//!
//! A record is encoded as the concatenation of its fields in declaration
//! order. Nothing describes the data on the wire: no field names, no type
//! tags, no version header. Both ends must share the record type, and
//! therefore the field order. Multi-byte integers are big-endian (network
//! byte order) at their natural width; nothing is padded.
//!
//! ## Serde type mapping
//!
//! | Rust / serde type | Encoding |
//! |-------------------|----------|
//! | `bool`            | 1 byte: 0 (false) or 1 (true); any nonzero byte decodes as true |
//! | `i8`, `u8`        | 1 raw byte |
//! | `i16`, `u16`      | 2 bytes |
//! | `i32`, `u32`      | 4 bytes |
//! | `i64`, `u64`      | 8 bytes |
//! | `isize`, `usize` with [`plain_int`] | 4 bytes |
//! | `char`            | 4-byte Unicode scalar |
//! | `&str`, `String`  | 4-byte length + UTF-8 bytes |
//! | `&[u8]`, `Vec<u8>` | 4-byte length + raw bytes |
//! | `Option<T>`       | 1-byte presence flag + encoded T when present |
//! | `()` / unit struct | 0 bytes |
//! | Struct, tuple, tuple struct | fields encoded consecutively (no prefix) |
//! | `Vec<T>` / seq    | 4-byte count + encoded elements (any supported element kind, not only bytes and records) |
//! | Enum              | 4-byte variant index + variant fields |
//! | `f32`, `f64`, maps | [`Error::UnsupportedKind`] on encode and decode |
//!
//! Every entry point has a `*_with_config` twin taking a [`Config`]; the
//! plain versions use [`Config::default`].
//!
//! ## Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use mircodec::{from_bytes, to_bytes};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Login {
//!     flag: bool,
//!     id: i32,
//!     name: String,
//! }
//!
//! let login = Login { flag: true, id: 42, name: "ok".into() };
//!
//! let bytes = to_bytes(&login).unwrap();
//! assert_eq!(bytes, [0x01, 0, 0, 0, 0x2A, 0, 0, 0, 0x02, b'o', b'k']);
//!
//! let decoded: Login = from_bytes(&bytes).unwrap();
//! assert_eq!(login, decoded);
//! ```

pub mod config;
pub mod de;
pub mod error;
pub mod plain_int;
pub mod primitive;
pub mod read;
pub mod ser;

pub use config::Config;
pub use de::{
    Deserializer, decode_into, from_bytes, from_bytes_partial, from_bytes_partial_with_config,
    from_bytes_with_config, from_reader, from_reader_with_config,
};
pub use error::{Error, Result};
pub use ser::{
    Serializer, encoded_len, encoded_len_with_config, to_bytes, to_bytes_with_config, to_writer,
    to_writer_with_config,
};

pub use serde::{Deserialize, Serialize};

pub(crate) fn log_failure(op: &'static str, err: &Error) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        tracing::debug!(op, error = %err, "record codec failed");
    }
}
