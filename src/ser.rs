//! Encoder
//!
//! The [`Serializer`] is generic over any `W: std::io::Write`. [`to_bytes`]
//! drives it into a `Vec<u8>`; [`encoded_len`] drives it into a byte counter.
//!
//! ## Wire format summary
//! - Multi-byte integers are big-endian, at their natural width (1/2/4/8)
//! - Bools: 1 byte, 0 or 1
//! - Strings/Bytes: 4-byte length prefix + raw data, no padding
//! - Sequences: 4-byte count prefix + elements
//! - Structs/Tuples: fields encoded consecutively, no length prefix
//! - Options: 1-byte presence flag (0=None, 1=Some) + optional value
//! - Enums: 4-byte variant index + variant payload
//! - Floats and maps have no encoding and fail with `UnsupportedKind`

use crate::config::Config;
use crate::error::{Error, Result};
use crate::primitive::Primitive;
use serde::ser::{self, Impossible, Serialize};
use std::io::{self, Write};

// ── Public entry points ────────────────────────────────────────────────────

/// Encode `value` into a freshly allocated `Vec<u8>`.
///
/// On error the partially written buffer is dropped; only the error is
/// returned.
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    to_bytes_with_config(value, Config::default())
}

/// [`to_bytes`] with explicit limits.
pub fn to_bytes_with_config<T: Serialize + ?Sized>(value: &T, config: Config) -> Result<Vec<u8>> {
    let mut ser = Serializer::with_config(Vec::new(), config);
    match value.serialize(&mut ser) {
        Ok(()) => Ok(ser.into_writer()),
        Err(err) => {
            crate::log_failure("encode", &err);
            Err(err)
        }
    }
}

/// Encode `value` and write the result into `writer`.
///
/// The record is encoded in memory first, so a record that fails to encode
/// leaves `writer` untouched.
pub fn to_writer<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
    to_writer_with_config(writer, value, Config::default())
}

/// [`to_writer`] with explicit limits.
pub fn to_writer_with_config<W: Write, T: Serialize + ?Sized>(
    mut writer: W,
    value: &T,
    config: Config,
) -> Result<()> {
    let bytes = to_bytes_with_config(value, config)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Number of bytes [`to_bytes`] would produce for `value`.
pub fn encoded_len<T: Serialize + ?Sized>(value: &T) -> Result<usize> {
    encoded_len_with_config(value, Config::default())
}

/// [`encoded_len`] under the same limits [`to_bytes_with_config`] applies.
pub fn encoded_len_with_config<T: Serialize + ?Sized>(value: &T, config: Config) -> Result<usize> {
    let mut ser = Serializer::with_config(ByteCounter(0), config);
    value.serialize(&mut ser)?;
    Ok(ser.into_writer().0)
}

struct ByteCounter(usize);

impl Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ── Serializer ─────────────────────────────────────────────────────────────

/// The record encoder. Generic over any `W: Write`.
///
/// ```rust
/// use mircodec::ser::Serializer;
/// use serde::Serialize;
///
/// let mut buf = Vec::new();
/// let mut ser = Serializer::new(&mut buf);
/// 42u32.serialize(&mut ser).unwrap();
/// assert_eq!(buf, [0, 0, 0, 42]);
/// ```
pub struct Serializer<W: Write> {
    writer: W,
    config: Config,
}

impl<W: Write> Serializer<W> {
    /// Create a new serializer that writes into `writer`.
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, Config::default())
    }

    pub fn with_config(writer: W, config: Config) -> Self {
        Serializer { writer, config }
    }

    /// Consume the serializer and return the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    // ── Internal helpers ───────────────────────────────────────────────────

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer
            .write_all(bytes)
            .map_err(|e| Error::Io(e.to_string()))
    }

    fn write_primitive<P: Primitive>(&mut self, v: P) -> Result<()> {
        self.write_all(v.to_wire().as_ref())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len = self.config.check_len(len as u64)?;
        self.write_primitive(len)
    }

    /// 4-byte length followed by the raw bytes.
    fn write_len_prefixed(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_len(bytes.len())?;
        self.write_all(bytes)
    }
}

// ── serde::Serializer impl ─────────────────────────────────────────────────

impl<'a, W: Write> ser::Serializer for &'a mut Serializer<W> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    // ── Primitives ─────────────────────────────────────────────────────────

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write_primitive(v as u8)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.write_primitive(v)
    }
    fn serialize_i16(self, v: i16) -> Result<()> {
        self.write_primitive(v)
    }
    fn serialize_i32(self, v: i32) -> Result<()> {
        self.write_primitive(v)
    }
    fn serialize_i64(self, v: i64) -> Result<()> {
        self.write_primitive(v)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.write_primitive(v)
    }
    fn serialize_u16(self, v: u16) -> Result<()> {
        self.write_primitive(v)
    }
    fn serialize_u32(self, v: u32) -> Result<()> {
        self.write_primitive(v)
    }
    fn serialize_u64(self, v: u64) -> Result<()> {
        self.write_primitive(v)
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        Err(Error::UnsupportedKind("f32"))
    }
    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(Error::UnsupportedKind("f64"))
    }

    /// char → Unicode scalar value, 4 bytes
    fn serialize_char(self, v: char) -> Result<()> {
        self.write_primitive(v as u32)
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.write_len_prefixed(v.as_bytes())
    }

    /// Raw byte sequence: written as one block, no per-element dispatch
    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.write_len_prefixed(v)
    }

    fn serialize_none(self) -> Result<()> {
        self.write_primitive(0u8)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<()> {
        self.write_primitive(1u8)?;
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        self.write_primitive(variant_index)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<()> {
        self.write_primitive(variant_index)?;
        value.serialize(self)
    }

    /// Counted sequence → 4-byte element count + elements
    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        let l = len.ok_or(Error::LengthRequired)?;
        self.write_len(l)?;
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self)
    }
    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.write_primitive(variant_index)?;
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::UnsupportedKind("map"))
    }

    /// Nested record: fields encoded consecutively, no wrapper
    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.write_primitive(variant_index)?;
        Ok(self)
    }

    fn is_human_readable(&self) -> bool {
        false
    }
}

// ── Compound serializer impls ──────────────────────────────────────────────

macro_rules! forward_serialize_element {
    ($t:ty) => {
        impl<'a, W: Write> $t for &'a mut Serializer<W> {
            type Ok = ();
            type Error = Error;
            fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
                value.serialize(&mut **self)
            }
            fn end(self) -> Result<()> {
                Ok(())
            }
        }
    };
}

macro_rules! forward_serialize_field {
    ($t:ty) => {
        impl<'a, W: Write> $t for &'a mut Serializer<W> {
            type Ok = ();
            type Error = Error;
            fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
                value.serialize(&mut **self)
            }
            fn end(self) -> Result<()> {
                Ok(())
            }
        }
    };
}

macro_rules! forward_serialize_named_field {
    ($t:ty) => {
        impl<'a, W: Write> $t for &'a mut Serializer<W> {
            type Ok = ();
            type Error = Error;
            fn serialize_field<T: Serialize + ?Sized>(
                &mut self,
                _key: &'static str,
                value: &T,
            ) -> Result<()> {
                value.serialize(&mut **self)
            }
            fn end(self) -> Result<()> {
                Ok(())
            }
        }
    };
}

forward_serialize_element!(ser::SerializeSeq);
forward_serialize_element!(ser::SerializeTuple);

forward_serialize_field!(ser::SerializeTupleStruct);
forward_serialize_field!(ser::SerializeTupleVariant);

forward_serialize_named_field!(ser::SerializeStruct);
forward_serialize_named_field!(ser::SerializeStructVariant);
