//! Input sources for the [`Deserializer`](crate::de::Deserializer).
//!
//! [`SliceRead`] walks a borrowed buffer and hands out zero-copy slices.
//! [`IoRead`] pulls from any `std::io::Read` and copies into a scratch
//! buffer owned by the deserializer.

use crate::error::{Error, Result};
use std::io::{self, Read as _};

mod private {
    pub trait Sealed {}
}

/// Bytes handed back by [`Read::read_bytes`]: either borrowed from the
/// input for `'de`, or copied into the deserializer's scratch space.
pub enum Reference<'b, 'c> {
    Borrowed(&'b [u8]),
    Copied(&'c [u8]),
}

impl std::ops::Deref for Reference<'_, '_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Reference::Borrowed(b) => b,
            Reference::Copied(c) => c,
        }
    }
}

/// A byte source the deserializer can pull fixed-size chunks from.
///
/// Sealed: the crate provides [`SliceRead`] and [`IoRead`].
pub trait Read<'de>: private::Sealed {
    /// Fill `buf` completely or fail with [`Error::Truncated`].
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Consume exactly `n` bytes.
    fn read_bytes<'s>(
        &'s mut self,
        n: usize,
        scratch: &'s mut Vec<u8>,
    ) -> Result<Reference<'de, 's>>;
}

// ── SliceRead ──────────────────────────────────────────────────────────────

/// A cursor over an in-memory buffer.
pub struct SliceRead<'de> {
    input: &'de [u8],
    pos: usize,
}

impl<'de> SliceRead<'de> {
    pub fn new(input: &'de [u8]) -> Self {
        SliceRead { input, pos: 0 }
    }

    /// The unconsumed suffix of the input.
    pub fn remaining(&self) -> &'de [u8] {
        &self.input[self.pos..]
    }

    /// Consume exactly `n` bytes. Never reads past the end of the buffer.
    fn take(&mut self, n: usize) -> Result<&'de [u8]> {
        if n > self.input.len() - self.pos {
            return Err(Error::Truncated);
        }
        let slice = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }
}

impl private::Sealed for SliceRead<'_> {}

impl<'de> Read<'de> for SliceRead<'de> {
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<()> {
        let src = self.take(buf.len())?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn read_bytes<'s>(
        &'s mut self,
        n: usize,
        _scratch: &'s mut Vec<u8>,
    ) -> Result<Reference<'de, 's>> {
        self.take(n).map(Reference::Borrowed)
    }
}

// ── IoRead ─────────────────────────────────────────────────────────────────

/// A source backed by a `std::io::Read`.
pub struct IoRead<R> {
    reader: R,
}

impl<R: io::Read> IoRead<R> {
    pub fn new(reader: R) -> Self {
        IoRead { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R> private::Sealed for IoRead<R> {}

impl<'de, R: io::Read> Read<'de> for IoRead<R> {
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<()> {
        self.reader.read_exact(buf).map_err(Error::from)
    }

    fn read_bytes<'s>(
        &'s mut self,
        n: usize,
        scratch: &'s mut Vec<u8>,
    ) -> Result<Reference<'de, 's>> {
        // Grow with the data actually received rather than trusting `n`.
        scratch.clear();
        let got = io::Read::take(&mut self.reader, n as u64).read_to_end(scratch)?;
        if got != n {
            return Err(Error::Truncated);
        }
        Ok(Reference::Copied(&scratch[..]))
    }
}
