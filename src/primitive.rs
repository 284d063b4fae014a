//! Fixed-width integer conversions.
//!
//! Every multi-byte integer on the wire is **big-endian** (network byte
//! order). This is the one layout decision both peers must share; nothing in
//! the stream records it. Single-byte kinds are the raw byte.
//!
//! ```rust
//! use mircodec::primitive::{Primitive, decode_int};
//!
//! assert_eq!(0x0102_i16.to_wire(), [0x01, 0x02]);
//! assert_eq!(decode_int::<u32>(&[0, 0, 0, 42, 0xFF]).unwrap(), 42);
//! ```

use crate::error::{Error, Result};

mod private {
    pub trait Sealed {}
}

/// An integer kind with a fixed wire width.
///
/// Sealed: implemented for `i8`, `i16`, `i32`, `i64`, `u8`, `u16`, `u32`
/// and `u64` only.
pub trait Primitive: private::Sealed + Copy {
    /// Width on the wire in bytes.
    const WIDTH: usize;

    /// `[u8; WIDTH]`.
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    fn to_wire(self) -> Self::Bytes;

    fn from_wire(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_primitive {
    ($($t:ty),* $(,)?) => {
        $(
            impl private::Sealed for $t {}

            impl Primitive for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();
                type Bytes = [u8; std::mem::size_of::<$t>()];

                #[inline]
                fn to_wire(self) -> Self::Bytes {
                    self.to_be_bytes()
                }

                #[inline]
                fn from_wire(bytes: Self::Bytes) -> Self {
                    <$t>::from_be_bytes(bytes)
                }
            }
        )*
    };
}

impl_primitive!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Read a `P` from the front of `bytes`. Extra bytes are ignored.
pub fn decode_int<P: Primitive>(bytes: &[u8]) -> Result<P> {
    let src = bytes.get(..P::WIDTH).ok_or(Error::Truncated)?;
    let mut buf = P::Bytes::default();
    buf.as_mut().copy_from_slice(src);
    Ok(P::from_wire(buf))
}
