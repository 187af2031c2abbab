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

//! Error types for field table encoding and decoding.

use thiserror::Error;

/// Result Type for Codec Operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Represents possible errors that can occur while encoding or decoding a field table.
///
/// Every error aborts the table being processed. There is no partial result and no
/// retry, since the whole table is already in memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The table budget or the underlying buffer ran out before a read completed.
    #[error("truncated input (required: {required}, available: {available})")]
    Truncated {
        /// Number of bytes the read needed
        required: usize,
        /// Number of bytes that were left
        available: usize,
    },

    /// A field type tag outside the known set was encountered.
    #[error("unrecognised type in table: 0x{0:02X}")]
    UnrecognizedFieldType(u8),

    /// A reserved field type tag (decimal, nested table or array) was encountered.
    #[error("unsupported field type '{}'", char::from(*.0))]
    UnsupportedFieldType(u8),

    /// A table, long string or byte array length prefix was negative.
    #[error("negative length prefix: {0}")]
    NegativeLength(i32),

    /// The table length prefix exceeded the configured maximum.
    #[error("table too large: {length} bytes (maximum allowed: {max})")]
    TableTooLarge {
        /// Declared length of the table body
        length: usize,
        /// Configured maximum
        max: usize,
    },

    /// A field name does not fit in a short string.
    #[error("field name too long: {0} bytes (maximum allowed: 255)")]
    NameTooLong(usize),

    /// A value does not fit behind a 32-bit signed length.
    #[error("value too large to encode: {0}")]
    ValueTooLarge(usize),

    /// A timestamp's seconds do not fit the 32-bit wire field.
    #[error("timestamp out of range: {0} seconds")]
    TimestampOutOfRange(i64),

    /// Name or string bytes were not valid UTF-8.
    #[error("invalid UTF-8 in {context}")]
    InvalidUtf8 {
        /// What was being decoded
        context: &'static str,
    },

    /// An I/O error occurred while writing to the sink.
    #[error("I/O error: {0:?}")]
    Io(std::io::ErrorKind),
}

impl CodecError {
    /// Check if the error was caused by running out of input
    pub fn is_truncated(&self) -> bool {
        matches!(self, CodecError::Truncated { .. })
    }

    /// Check if the error was caused by a field type tag the codec cannot decode
    pub fn is_unknown_type(&self) -> bool {
        matches!(
            self,
            CodecError::UnrecognizedFieldType(_) | CodecError::UnsupportedFieldType(_)
        )
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.kind())
    }
}
