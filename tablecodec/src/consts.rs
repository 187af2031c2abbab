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

/// Size of the table length prefix in bytes.
pub const TABLE_LENGTH_SIZE: usize = 4;

/// Longest name a short string can carry.
pub const MAX_SHORT_STRING: usize = u8::MAX as usize;

/// Default upper bound on a decoded table body: any length a prefix can declare.
pub const DEFAULT_MAX_TABLE_SIZE: usize = i32::MAX as usize;

/// Field type tags.
pub mod tag {
    /// Long string
    pub const LONG_STRING: u8 = b'S';
    /// Byte array
    pub const BYTE_ARRAY: u8 = b'x';
    /// Signed 8-bit
    pub const I8: u8 = b'b';
    /// Unsigned 8-bit
    pub const U8: u8 = b'B';
    /// Signed 16-bit
    pub const I16: u8 = b's';
    /// Unsigned 16-bit
    pub const U16: u8 = b'u';
    /// Signed 32-bit
    pub const I32: u8 = b'I';
    /// Unsigned 32-bit
    pub const U32: u8 = b'i';
    /// Signed 64-bit
    pub const I64: u8 = b'l';
    /// 32-bit float
    pub const F32: u8 = b'f';
    /// 64-bit float
    pub const F64: u8 = b'd';
    /// Boolean
    pub const BOOL: u8 = b't';
    /// Timestamp, seconds and nanoseconds
    pub const TIMESTAMP: u8 = b'T';
    /// Void
    pub const VOID: u8 = b'V';

    // Reserved by AMQP but rejected by this codec.
    /// Decimal
    pub const DECIMAL: u8 = b'D';
    /// Nested field table
    pub const TABLE: u8 = b'F';
    /// Field array
    pub const ARRAY: u8 = b'A';
}
