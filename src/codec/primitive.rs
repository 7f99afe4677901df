//! Primitive packing
//!
//! Fixed-width big-endian integer packing. Every encoder in this crate is
//! built from these routines plus plain byte concatenation, so bytewise
//! comparison of encoded keys matches numeric comparison of their fields.

use bytes::BufMut;

use crate::error::{CodecError, Result};

/// Append a `u16` in big-endian order
#[inline]
pub fn put_u16<B: BufMut>(buf: &mut B, n: u16) {
    buf.put_u16(n);
}

/// Append a `u32` in big-endian order
#[inline]
pub fn put_u32<B: BufMut>(buf: &mut B, n: u32) {
    buf.put_u32(n);
}

/// Append a `u64` in big-endian order
#[inline]
pub fn put_u64<B: BufMut>(buf: &mut B, n: u64) {
    buf.put_u64(n);
}

/// Cursor over an encoded byte string
///
/// Each read either consumes exactly the bytes it needs or fails with
/// `MalformedEncoding` without advancing.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
    context: &'static str,
}

impl<'a> ByteReader<'a> {
    /// Create a reader; `context` names the structure being decoded in errors
    pub fn new(buf: &'a [u8], context: &'static str) -> Self {
        Self {
            buf,
            pos: 0,
            context,
        }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consume the next `n` bytes
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(CodecError::malformed(
                self.context,
                format!(
                    "need {} bytes at offset {}, only {} remain",
                    n,
                    self.pos,
                    self.remaining()
                ),
            ));
        }
        let buf = self.buf;
        let slice = &buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Consume everything that is left
    pub fn rest(&mut self) -> &'a [u8] {
        let buf = self.buf;
        let slice = &buf[self.pos..];
        self.pos = buf.len();
        slice
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let b = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(b);
        Ok(u64::from_be_bytes(arr))
    }

    /// Fail unless every byte has been consumed
    pub fn finish(&self) -> Result<()> {
        if self.remaining() != 0 {
            return Err(CodecError::malformed(
                self.context,
                format!("{} trailing bytes", self.remaining()),
            ));
        }
        Ok(())
    }
}
