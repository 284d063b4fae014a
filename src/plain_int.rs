//! Serde helper module for architecture-width integers.
//!
//! `isize` and `usize` change width with the target, so serde hands them to
//! the format as 64-bit values. This codec keeps them in a 4-byte slot
//! instead, the same on every platform: `isize` as a signed 32-bit integer
//! and `usize` as an unsigned one.
//!
//! # Usage
//!
//! Annotate the field with `#[serde(with = "mircodec::plain_int")]`:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use mircodec::{from_bytes, to_bytes};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Slot {
//!     #[serde(with = "mircodec::plain_int")]
//!     index: usize,
//!     #[serde(with = "mircodec::plain_int")]
//!     delta: isize,
//! }
//!
//! let slot = Slot { index: 7, delta: -1 };
//! let bytes = to_bytes(&slot).unwrap();
//! assert_eq!(bytes, [0, 0, 0, 7, 0xFF, 0xFF, 0xFF, 0xFF]);
//! assert_eq!(slot, from_bytes(&bytes).unwrap());
//! ```
//!
//! A value outside the 32-bit range fails to encode with
//! [`Error::Message`](crate::Error::Message) rather than being truncated.

// ── Sealed trait ──────────────────────────────────────────────────────────

mod private {
    pub trait Sealed {}
}

/// Integers that travel in a 4-byte wire slot.
///
/// This trait is sealed: only `isize` and `usize` implement it.
pub trait PlainInt: private::Sealed + Sized + Copy {
    fn serialize_narrow<S: serde::Serializer>(self, serializer: S) -> Result<S::Ok, S::Error>;

    fn deserialize_narrow<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error>;
}

impl private::Sealed for isize {}
impl private::Sealed for usize {}

impl PlainInt for isize {
    fn serialize_narrow<S: serde::Serializer>(self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = i32::try_from(self).map_err(|_| out_of_range::<S::Error>(self))?;
        serializer.serialize_i32(v)
    }

    fn deserialize_narrow<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let v = <i32 as serde::Deserialize>::deserialize(deserializer)?;
        isize::try_from(v).map_err(|_| too_wide::<D::Error>(v))
    }
}

impl PlainInt for usize {
    fn serialize_narrow<S: serde::Serializer>(self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = u32::try_from(self).map_err(|_| out_of_range::<S::Error>(self))?;
        serializer.serialize_u32(v)
    }

    fn deserialize_narrow<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let v = <u32 as serde::Deserialize>::deserialize(deserializer)?;
        usize::try_from(v).map_err(|_| too_wide::<D::Error>(v))
    }
}

fn out_of_range<E: serde::ser::Error>(v: impl std::fmt::Display) -> E {
    E::custom(format_args!("plain integer {} does not fit in 32 bits", v))
}

fn too_wide<E: serde::de::Error>(v: impl std::fmt::Display) -> E {
    E::custom(format_args!("plain integer {} does not fit this platform", v))
}

// ── serde `with` module functions ─────────────────────────────────────────

pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: PlainInt,
    S: serde::Serializer,
{
    value.serialize_narrow(serializer)
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: PlainInt,
    D: serde::Deserializer<'de>,
{
    T::deserialize_narrow(deserializer)
}
