//! Decoder
//!
//! The [`Deserializer`] pulls from a [`Read`] source: a zero-copy
//! [`SliceRead`] for in-memory buffers or an [`IoRead`] for streams. Every
//! read is bounds-checked; running out of input yields [`Error::Truncated`].

use crate::config::Config;
use crate::error::{Error, Result};
use crate::primitive::Primitive;
use crate::read::{IoRead, Read, Reference, SliceRead};
use serde::de::{
    self, Deserialize, DeserializeOwned, EnumAccess, SeqAccess, VariantAccess, Visitor,
};
use std::io;

/// Decode a value from `input`. Trailing bytes after the value are ignored.
pub fn from_bytes<'de, T: Deserialize<'de>>(input: &'de [u8]) -> Result<T> {
    from_bytes_with_config(input, Config::default())
}

/// [`from_bytes`] with explicit limits.
pub fn from_bytes_with_config<'de, T: Deserialize<'de>>(
    input: &'de [u8],
    config: Config,
) -> Result<T> {
    let mut de = Deserializer::with_config(SliceRead::new(input), config);
    T::deserialize(&mut de).inspect_err(|err| crate::log_failure("decode", err))
}

/// Decode a value from `input`, also returning the unconsumed bytes.
pub fn from_bytes_partial<'de, T: Deserialize<'de>>(input: &'de [u8]) -> Result<(T, &'de [u8])> {
    from_bytes_partial_with_config(input, Config::default())
}

/// [`from_bytes_partial`] with explicit limits.
pub fn from_bytes_partial_with_config<'de, T: Deserialize<'de>>(
    input: &'de [u8],
    config: Config,
) -> Result<(T, &'de [u8])> {
    let mut de = Deserializer::with_config(SliceRead::new(input), config);
    let value = T::deserialize(&mut de).inspect_err(|err| crate::log_failure("decode", err))?;
    Ok((value, de.remaining()))
}

/// Decode a value from a byte stream, reading exactly as many bytes as the
/// value occupies.
pub fn from_reader<R: io::Read, T: DeserializeOwned>(reader: R) -> Result<T> {
    from_reader_with_config(reader, Config::default())
}

/// [`from_reader`] with explicit limits.
pub fn from_reader_with_config<R: io::Read, T: DeserializeOwned>(
    reader: R,
    config: Config,
) -> Result<T> {
    let mut de = Deserializer::with_config(IoRead::new(reader), config);
    T::deserialize(&mut de).inspect_err(|err| crate::log_failure("decode", err))
}

/// Decode `input` into `target`.
///
/// An empty `input` is an absent payload: `target` keeps its current value
/// and `Ok(())` is returned. Otherwise `target` is overwritten only once the
/// whole record has decoded; on error it is left as it was.
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, PartialEq, Deserialize)]
/// struct Ping { seq: u16 }
///
/// let mut ping = Ping::default();
/// mircodec::decode_into(&mut ping, &[]).unwrap();
/// assert_eq!(ping, Ping { seq: 0 });
///
/// mircodec::decode_into(&mut ping, &[0x01, 0x00]).unwrap();
/// assert_eq!(ping, Ping { seq: 256 });
/// ```
pub fn decode_into<T: DeserializeOwned>(target: &mut T, input: &[u8]) -> Result<()> {
    if input.is_empty() {
        return Ok(());
    }
    *target = from_bytes(input)?;
    Ok(())
}

/// The record decoder. Maintains a single forward-only cursor over `R`.
pub struct Deserializer<R> {
    read: R,
    scratch: Vec<u8>,
    config: Config,
}

impl<'de> Deserializer<SliceRead<'de>> {
    pub fn new(input: &'de [u8]) -> Self {
        Self::with_config(SliceRead::new(input), Config::default())
    }

    /// Returns the unconsumed portion of the input buffer.
    pub fn remaining(&self) -> &'de [u8] {
        self.read.remaining()
    }
}

impl<R: io::Read> Deserializer<IoRead<R>> {
    pub fn from_reader(reader: R) -> Self {
        Self::with_config(IoRead::new(reader), Config::default())
    }
}

impl<R> Deserializer<R> {
    pub fn with_config(read: R, config: Config) -> Self {
        Deserializer {
            read,
            scratch: Vec::new(),
            config,
        }
    }

    pub fn into_inner(self) -> R {
        self.read
    }
}

impl<'de, R: Read<'de>> Deserializer<R> {
    fn read_primitive<P: Primitive>(&mut self) -> Result<P> {
        let mut buf = P::Bytes::default();
        self.read.read_exact_into(buf.as_mut())?;
        Ok(P::from_wire(buf))
    }

    /// Read a 4-byte length or count and hold it to the configured cap.
    fn read_len(&mut self) -> Result<usize> {
        let len: u32 = self.read_primitive()?;
        Ok(self.config.check_len(len as u64)? as usize)
    }
}

// ── Main Deserializer impl ─────────────────────────────────────────────────

impl<'de, 'a, R: Read<'de>> de::Deserializer<'de> for &'a mut Deserializer<R> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::UnsupportedKind(
            "any (the format is not self-describing)",
        ))
    }

    /// Any nonzero byte reads as `true`
    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let v: u8 = self.read_primitive()?;
        visitor.visit_bool(v != 0)
    }

    fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_i8(self.read_primitive()?)
    }

    fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_i16(self.read_primitive()?)
    }

    fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_i32(self.read_primitive()?)
    }

    fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_i64(self.read_primitive()?)
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_u8(self.read_primitive()?)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_u16(self.read_primitive()?)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_u32(self.read_primitive()?)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_u64(self.read_primitive()?)
    }

    fn deserialize_f32<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::UnsupportedKind("f32"))
    }

    fn deserialize_f64<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::UnsupportedKind("f64"))
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let v: u32 = self.read_primitive()?;
        let c = char::from_u32(v).ok_or(Error::InvalidString)?;
        visitor.visit_char(c)
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let len = self.read_len()?;
        match self.read.read_bytes(len, &mut self.scratch)? {
            Reference::Borrowed(bytes) => {
                let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidString)?;
                visitor.visit_borrowed_str(s)
            }
            Reference::Copied(bytes) => {
                let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidString)?;
                visitor.visit_str(s)
            }
        }
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        de::Deserializer::deserialize_str(self, visitor)
    }

    /// Raw byte sequence: the count, then one contiguous block
    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let len = self.read_len()?;
        match self.read.read_bytes(len, &mut self.scratch)? {
            Reference::Borrowed(bytes) => visitor.visit_borrowed_bytes(bytes),
            Reference::Copied(bytes) => visitor.visit_bytes(bytes),
        }
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        de::Deserializer::deserialize_bytes(self, visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let flag: u8 = self.read_primitive()?;
        match flag {
            0 => visitor.visit_none(),
            1 => visitor.visit_some(self),
            v => Err(Error::InvalidPresence(v)),
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let count = self.read_len()?;
        visitor.visit_seq(SeqDeserializer::new(self, count))
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        // Fixed-length: no count prefix
        visitor.visit_seq(SeqDeserializer::new(self, len))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_seq(SeqDeserializer::new(self, len))
    }

    fn deserialize_map<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::UnsupportedKind("map"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        // Fields in declaration order, no count prefix
        visitor.visit_seq(SeqDeserializer::new(self, fields.len()))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_enum(EnumDeserializer::new(self))
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::UnsupportedKind(
            "identifier (field names are not transmitted)",
        ))
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::UnsupportedKind(
            "ignored_any (the format is not self-describing)",
        ))
    }

    fn is_human_readable(&self) -> bool {
        false
    }
}

// ── SeqDeserializer: fixed count ───────────────────────────────────────────

struct SeqDeserializer<'a, R> {
    de: &'a mut Deserializer<R>,
    remaining: usize,
}

impl<'a, R> SeqDeserializer<'a, R> {
    fn new(de: &'a mut Deserializer<R>, count: usize) -> Self {
        SeqDeserializer {
            de,
            remaining: count,
        }
    }
}

impl<'de, 'a, R: Read<'de>> SeqAccess<'de> for SeqDeserializer<'a, R> {
    type Error = Error;

    fn next_element_seed<T: de::DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

// ── EnumDeserializer ───────────────────────────────────────────────────────

struct EnumDeserializer<'a, R> {
    de: &'a mut Deserializer<R>,
}

impl<'a, R> EnumDeserializer<'a, R> {
    fn new(de: &'a mut Deserializer<R>) -> Self {
        EnumDeserializer { de }
    }
}

impl<'de, 'a, R: Read<'de>> EnumAccess<'de> for EnumDeserializer<'a, R> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V: de::DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, Self::Variant)> {
        let variant_index: u32 = self.de.read_primitive()?;
        let val = seed.deserialize(de::value::U32Deserializer::<Error>::new(variant_index))?;
        Ok((val, self))
    }
}

impl<'de, 'a, R: Read<'de>> VariantAccess<'de> for EnumDeserializer<'a, R> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T: de::DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
        seed.deserialize(self.de)
    }

    fn tuple_variant<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        visitor.visit_seq(SeqDeserializer::new(self.de, len))
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_seq(SeqDeserializer::new(self.de, fields.len()))
    }
}
