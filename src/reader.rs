//! Sequential little-endian field reader used by the decoders.

use std::io::{self, Read};

use crate::{Error, Result};

/// Upper bound on elements reserved up front from a header-declared count. Anything past this
/// grows as bytes actually arrive, so a lying header can't force a huge allocation.
pub(crate) const MAX_PREALLOC: usize = 1 << 16;

#[inline]
pub(crate) fn capacity_for(declared: u32) -> usize {
    (declared as usize).min(MAX_PREALLOC)
}

/// Wraps a [Read], tracking the byte offset so truncation can be reported precisely.
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read at most `limit` bytes, stopping early only at end of input.
    pub fn read_up_to(&mut self, limit: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(limit);
        (&mut self.inner)
            .take(limit as u64)
            .read_to_end(&mut buf)?;
        self.offset += buf.len() as u64;
        Ok(buf)
    }

    /// Read exactly `N` bytes. Running out of input is [Error::Truncated], never zero-filled.
    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        match self.inner.read_exact(&mut buf) {
            Ok(()) => {
                self.offset += N as u64;
                Ok(buf)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(Error::Truncated {
                field,
                offset: self.offset,
            }),
            Err(e) => Err(e.into()),
        }
    }

    #[inline]
    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        self.read_array::<1>(field).map(|[b]| b)
    }

    #[inline]
    pub fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        self.read_array(field).map(u32::from_le_bytes)
    }

    #[inline]
    pub fn read_f32(&mut self, field: &'static str) -> Result<f32> {
        self.read_array(field).map(f32::from_le_bytes)
    }

    /// Consume and discard `N` bytes.
    #[inline]
    pub fn skip<const N: usize>(&mut self, field: &'static str) -> Result<()> {
        self.read_array::<N>(field).map(|_| ())
    }
}
