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

//! Field values and their type tags
//!
//! Every value in a field table is written as a one byte type tag followed by a payload
//! whose width depends on the tag:
//!
//! | Tag | Variant | Payload |
//! |-----|---------|---------|
//! | `S` | [`FieldValue::LongString`] | `i32` length + bytes |
//! | `x` | [`FieldValue::ByteArray`] | `i32` length + bytes |
//! | `b` | [`FieldValue::I8`] | 1 byte |
//! | `B` | [`FieldValue::U8`] | 1 byte |
//! | `s` | [`FieldValue::I16`] | 2 bytes |
//! | `u` | [`FieldValue::U16`] | 2 bytes |
//! | `I` | [`FieldValue::I32`] | 4 bytes |
//! | `i` | [`FieldValue::U32`] | 4 bytes |
//! | `l` | [`FieldValue::I64`] | 8 bytes |
//! | `f` | [`FieldValue::F32`] | 4 bytes |
//! | `d` | [`FieldValue::F64`] | 8 bytes |
//! | `t` | [`FieldValue::Bool`] | 1 byte |
//! | `T` | [`FieldValue::Timestamp`] | 4 byte seconds + 4 byte nanoseconds |
//! | `V` | [`FieldValue::Void`] | none |
//!
//! All multi-byte quantities are big-endian. The AMQP decimal (`D`), nested table (`F`) and
//! array (`A`) types are rejected rather than skipped, since their payload width cannot be
//! known without decoding them.

use crate::config::Utf8Policy;
use crate::consts::{self, tag};
use crate::reader::BoundedReader;
use crate::timestamp::Timestamp;
use crate::{CodecError, CodecResult};
use byteorder::{BigEndian, WriteBytesExt};
use bytes::{Buf, BufMut, Bytes};
use enum_kinds::EnumKind;

/// A single typed value from a field table.
///
/// The set of variants is closed: everything the codec can decode it can also encode, and
/// there is no catch-all.
#[derive(Clone, Debug, PartialEq, EnumKind)]
#[enum_kind(FieldKind, derive(Hash))]
pub enum FieldValue {
    /// Long string
    LongString(String),
    /// Raw byte array
    ByteArray(Bytes),
    /// Signed 8-bit integer
    I8(i8),
    /// Unsigned 8-bit integer
    U8(u8),
    /// Signed 16-bit integer
    I16(i16),
    /// Unsigned 16-bit integer
    U16(u16),
    /// Signed 32-bit integer
    I32(i32),
    /// Unsigned 32-bit integer
    U32(u32),
    /// Signed 64-bit integer
    I64(i64),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// Boolean
    Bool(bool),
    /// Seconds and nanoseconds timestamp
    Timestamp(Timestamp),
    /// No value
    Void,
}

impl FieldKind {
    /// The wire tag for this kind.
    pub fn tag(self) -> u8 {
        match self {
            FieldKind::LongString => tag::LONG_STRING,
            FieldKind::ByteArray => tag::BYTE_ARRAY,
            FieldKind::I8 => tag::I8,
            FieldKind::U8 => tag::U8,
            FieldKind::I16 => tag::I16,
            FieldKind::U16 => tag::U16,
            FieldKind::I32 => tag::I32,
            FieldKind::U32 => tag::U32,
            FieldKind::I64 => tag::I64,
            FieldKind::F32 => tag::F32,
            FieldKind::F64 => tag::F64,
            FieldKind::Bool => tag::BOOL,
            FieldKind::Timestamp => tag::TIMESTAMP,
            FieldKind::Void => tag::VOID,
        }
    }

    /// Looks up the kind for a wire tag.
    ///
    /// # Errors
    /// [`CodecError::UnsupportedFieldType`] for the reserved decimal, table and array tags,
    /// [`CodecError::UnrecognizedFieldType`] for anything else outside the table above.
    pub fn from_tag(byte: u8) -> CodecResult<FieldKind> {
        match byte {
            tag::LONG_STRING => Ok(FieldKind::LongString),
            tag::BYTE_ARRAY => Ok(FieldKind::ByteArray),
            tag::I8 => Ok(FieldKind::I8),
            tag::U8 => Ok(FieldKind::U8),
            tag::I16 => Ok(FieldKind::I16),
            tag::U16 => Ok(FieldKind::U16),
            tag::I32 => Ok(FieldKind::I32),
            tag::U32 => Ok(FieldKind::U32),
            tag::I64 => Ok(FieldKind::I64),
            tag::F32 => Ok(FieldKind::F32),
            tag::F64 => Ok(FieldKind::F64),
            tag::BOOL => Ok(FieldKind::Bool),
            tag::TIMESTAMP => Ok(FieldKind::Timestamp),
            tag::VOID => Ok(FieldKind::Void),
            tag::DECIMAL | tag::TABLE | tag::ARRAY => Err(CodecError::UnsupportedFieldType(byte)),
            _ => Err(CodecError::UnrecognizedFieldType(byte)),
        }
    }

    /// Human readable type name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::LongString => "long string",
            FieldKind::ByteArray => "byte array",
            FieldKind::I8 => "i8",
            FieldKind::U8 => "u8",
            FieldKind::I16 => "i16",
            FieldKind::U16 => "u16",
            FieldKind::I32 => "i32",
            FieldKind::U32 => "u32",
            FieldKind::I64 => "i64",
            FieldKind::F32 => "f32",
            FieldKind::F64 => "f64",
            FieldKind::Bool => "bool",
            FieldKind::Timestamp => "timestamp",
            FieldKind::Void => "void",
        }
    }

    /// Payload width for fixed size kinds, `None` for length-prefixed ones.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            FieldKind::LongString | FieldKind::ByteArray => None,
            FieldKind::Void => Some(0),
            FieldKind::I8 | FieldKind::U8 | FieldKind::Bool => Some(1),
            FieldKind::I16 | FieldKind::U16 => Some(2),
            FieldKind::I32 | FieldKind::U32 | FieldKind::F32 => Some(4),
            FieldKind::I64 | FieldKind::F64 | FieldKind::Timestamp => Some(8),
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FieldValue {
    /// The kind of this value.
    pub fn kind(&self) -> FieldKind {
        FieldKind::from(self)
    }

    /// The wire tag of this value.
    pub fn tag(&self) -> u8 {
        self.kind().tag()
    }

    /// Returns `true` for [`FieldValue::Void`].
    pub fn is_void(&self) -> bool {
        matches!(self, FieldValue::Void)
    }

    /// Returns the string if this is a long string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::LongString(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the bytes if this is a byte array.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::ByteArray(value) => Some(&value[..]),
            _ => None,
        }
    }

    /// Returns the encoded length of this value in bytes, tag included.
    pub fn encoded_len(&self) -> usize {
        let payload = match self {
            FieldValue::LongString(value) => 4 + value.len(),
            FieldValue::ByteArray(value) => 4 + value.len(),
            other => other.kind().fixed_width().unwrap_or_default(),
        };
        1 + payload
    }

    /// Encodes this value, tag first, into a byte buffer.
    ///
    /// # Returns
    /// The number of bytes written, always equal to [`FieldValue::encoded_len`].
    ///
    /// # Errors
    /// [`CodecError::ValueTooLarge`] if a string or byte array is longer than `i32::MAX`.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> CodecResult<usize> {
        self.write(&mut dst.writer())
    }

    /// Writes this value, tag first, to a writer.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> CodecResult<usize> {
        writer.write_u8(self.tag())?;
        match self {
            FieldValue::LongString(value) => write_long_bytes(writer, value.as_bytes())?,
            FieldValue::ByteArray(value) => write_long_bytes(writer, value)?,
            FieldValue::I8(value) => writer.write_i8(*value)?,
            FieldValue::U8(value) => writer.write_u8(*value)?,
            FieldValue::I16(value) => writer.write_i16::<BigEndian>(*value)?,
            FieldValue::U16(value) => writer.write_u16::<BigEndian>(*value)?,
            FieldValue::I32(value) => writer.write_i32::<BigEndian>(*value)?,
            FieldValue::U32(value) => writer.write_u32::<BigEndian>(*value)?,
            FieldValue::I64(value) => writer.write_i64::<BigEndian>(*value)?,
            FieldValue::F32(value) => writer.write_f32::<BigEndian>(*value)?,
            FieldValue::F64(value) => writer.write_f64::<BigEndian>(*value)?,
            FieldValue::Bool(value) => writer.write_u8(u8::from(*value))?,
            FieldValue::Timestamp(value) => {
                writer.write_i32::<BigEndian>(value.seconds)?;
                writer.write_i32::<BigEndian>(value.nanoseconds)?;
            }
            FieldValue::Void => {}
        }
        Ok(self.encoded_len())
    }

    /// Decodes one tagged value from a bounded reader.
    ///
    /// # Errors
    /// - [`CodecError::Truncated`] if the tag or payload runs past the budget or the buffer
    /// - [`CodecError::UnrecognizedFieldType`] / [`CodecError::UnsupportedFieldType`] for
    ///   tags this codec cannot decode
    /// - [`CodecError::NegativeLength`] for a negative string or byte array length
    /// - [`CodecError::InvalidUtf8`] for a non UTF-8 long string under [`Utf8Policy::Strict`]
    pub fn decode<B: Buf>(
        reader: &mut BoundedReader<B>,
        utf8: Utf8Policy,
    ) -> CodecResult<FieldValue> {
        let kind = FieldKind::from_tag(reader.read_u8()?)?;
        let value = match kind {
            FieldKind::LongString => {
                let bytes = read_long_bytes(reader)?;
                FieldValue::LongString(utf8.decode(&bytes, "long string")?)
            }
            FieldKind::ByteArray => FieldValue::ByteArray(read_long_bytes(reader)?),
            FieldKind::I8 => FieldValue::I8(reader.read_i8()?),
            FieldKind::U8 => FieldValue::U8(reader.read_u8()?),
            FieldKind::I16 => FieldValue::I16(reader.read_i16()?),
            FieldKind::U16 => FieldValue::U16(reader.read_u16()?),
            FieldKind::I32 => FieldValue::I32(reader.read_i32()?),
            FieldKind::U32 => FieldValue::U32(reader.read_u32()?),
            FieldKind::I64 => FieldValue::I64(reader.read_i64()?),
            FieldKind::F32 => FieldValue::F32(reader.read_f32()?),
            FieldKind::F64 => FieldValue::F64(reader.read_f64()?),
            FieldKind::Bool => FieldValue::Bool(reader.read_bool()?),
            FieldKind::Timestamp => {
                let seconds = reader.read_i32()?;
                let nanoseconds = reader.read_i32()?;
                FieldValue::Timestamp(Timestamp::new(seconds, nanoseconds))
            }
            FieldKind::Void => FieldValue::Void,
        };
        Ok(value)
    }
}

fn write_long_bytes<W: std::io::Write>(writer: &mut W, bytes: &[u8]) -> CodecResult<()> {
    let length = i32::try_from(bytes.len()).map_err(|_| CodecError::ValueTooLarge(bytes.len()))?;
    writer.write_i32::<BigEndian>(length)?;
    writer.write_all(bytes)?;
    Ok(())
}

fn read_long_bytes<B: Buf>(reader: &mut BoundedReader<B>) -> CodecResult<Bytes> {
    let length = reader.read_i32()?;
    let length = usize::try_from(length).map_err(|_| CodecError::NegativeLength(length))?;
    reader.read_exact(length)
}

/// Reads a field name: a one byte length followed by that many bytes.
pub fn read_short_string<B: Buf>(
    reader: &mut BoundedReader<B>,
    utf8: Utf8Policy,
) -> CodecResult<String> {
    let length = reader.read_u8()? as usize;
    let bytes = reader.read_exact(length)?;
    utf8.decode(&bytes, "field name")
}

/// Writes a field name as a short string.
///
/// # Errors
/// [`CodecError::NameTooLong`] if the name is longer than 255 bytes.
pub fn write_short_string<W: std::io::Write>(writer: &mut W, name: &str) -> CodecResult<usize> {
    if name.len() > consts::MAX_SHORT_STRING {
        return Err(CodecError::NameTooLong(name.len()));
    }
    writer.write_u8(name.len() as u8)?;
    writer.write_all(name.as_bytes())?;
    Ok(1 + name.len())
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::LongString(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::LongString(value.to_owned())
    }
}

impl From<Bytes> for FieldValue {
    fn from(value: Bytes) -> Self {
        FieldValue::ByteArray(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        FieldValue::ByteArray(Bytes::from(value))
    }
}

impl From<i8> for FieldValue {
    fn from(value: i8) -> Self {
        FieldValue::I8(value)
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        FieldValue::U8(value)
    }
}

impl From<i16> for FieldValue {
    fn from(value: i16) -> Self {
        FieldValue::I16(value)
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        FieldValue::U16(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::I32(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::U32(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::I64(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::F32(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::F64(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Timestamp> for FieldValue {
    fn from(value: Timestamp) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Void, Into::into)
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Void
    }
}
