//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Byte budgeted reader
//!
//! A field table declares the length of its body up front, and that length is the only
//! thing that says where the table ends. The bytes that follow usually belong to the rest
//! of an enclosing frame. [`BoundedReader`] wraps a [`Buf`] together with that budget so
//! the field decoders can never read past it.

use crate::{CodecError, CodecResult};
use bytes::{Buf, Bytes};

/// A reader that refuses to consume more than `limit` bytes from its source.
///
/// Every read checks the budget before it checks the source, so a read that would cross
/// the declared boundary fails even when the source physically holds more data. On
/// success `consumed` grows by exactly the number of bytes read.
///
/// # Example
/// ```
/// use amqptable_codec::BoundedReader;
///
/// let data = [0x00, 0x2A, 0xFF, 0xFF];
/// let mut reader = BoundedReader::new(&data[..], 2);
/// assert_eq!(reader.read_u16().unwrap(), 42);
/// assert_eq!(reader.available(), 0);
/// assert!(reader.read_u8().unwrap_err().is_truncated());
/// ```
#[derive(Debug)]
pub struct BoundedReader<B> {
    source: B,
    limit: usize,
    consumed: usize,
}

impl<B: Buf> BoundedReader<B> {
    /// Wraps `source`, allowing at most `limit` bytes to be read from it.
    pub fn new(source: B, limit: usize) -> Self {
        BoundedReader {
            source,
            limit,
            consumed: 0,
        }
    }

    /// The byte budget this reader was created with.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of bytes read so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of bytes left in the budget.
    ///
    /// This says nothing about how many bytes the source still holds.
    pub fn available(&self) -> usize {
        self.limit - self.consumed
    }

    /// Unwraps the reader, returning the source positioned after the consumed bytes.
    pub fn into_inner(self) -> B {
        self.source
    }

    fn reserve(&self, required: usize) -> CodecResult<()> {
        if required > self.available() {
            return Err(CodecError::Truncated {
                required,
                available: self.available(),
            });
        }
        if required > self.source.remaining() {
            return Err(CodecError::Truncated {
                required,
                available: self.source.remaining(),
            });
        }
        Ok(())
    }

    /// Reads exactly `len` bytes.
    ///
    /// # Errors
    /// Returns [`CodecError::Truncated`] if `len` exceeds the remaining budget or the
    /// bytes left in the source. Nothing is consumed in either case.
    pub fn read_exact(&mut self, len: usize) -> CodecResult<Bytes> {
        self.reserve(len)?;
        let bytes = self.source.copy_to_bytes(len);
        self.consumed += len;
        Ok(bytes)
    }

    /// Reads an unsigned byte.
    pub fn read_u8(&mut self) -> CodecResult<u8> {
        self.reserve(1)?;
        self.consumed += 1;
        Ok(self.source.get_u8())
    }

    /// Reads a signed byte.
    pub fn read_i8(&mut self) -> CodecResult<i8> {
        self.reserve(1)?;
        self.consumed += 1;
        Ok(self.source.get_i8())
    }

    /// Reads a single byte as a boolean, where any nonzero value is `true`.
    pub fn read_bool(&mut self) -> CodecResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16(&mut self) -> CodecResult<u16> {
        self.reserve(2)?;
        self.consumed += 2;
        Ok(self.source.get_u16())
    }

    /// Reads a big-endian `i16`.
    pub fn read_i16(&mut self) -> CodecResult<i16> {
        self.reserve(2)?;
        self.consumed += 2;
        Ok(self.source.get_i16())
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32(&mut self) -> CodecResult<u32> {
        self.reserve(4)?;
        self.consumed += 4;
        Ok(self.source.get_u32())
    }

    /// Reads a big-endian `i32`.
    pub fn read_i32(&mut self) -> CodecResult<i32> {
        self.reserve(4)?;
        self.consumed += 4;
        Ok(self.source.get_i32())
    }

    /// Reads a big-endian `u64`.
    pub fn read_u64(&mut self) -> CodecResult<u64> {
        self.reserve(8)?;
        self.consumed += 8;
        Ok(self.source.get_u64())
    }

    /// Reads a big-endian `i64`.
    pub fn read_i64(&mut self) -> CodecResult<i64> {
        self.reserve(8)?;
        self.consumed += 8;
        Ok(self.source.get_i64())
    }

    /// Reads a big-endian IEEE-754 `f32`.
    pub fn read_f32(&mut self) -> CodecResult<f32> {
        self.reserve(4)?;
        self.consumed += 4;
        Ok(self.source.get_f32())
    }

    /// Reads a big-endian IEEE-754 `f64`.
    pub fn read_f64(&mut self) -> CodecResult<f64> {
        self.reserve(8)?;
        self.consumed += 8;
        Ok(self.source.get_f64())
    }
}
