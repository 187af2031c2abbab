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

//! Decoder configuration
//!
//! ```
//! use amqptable_codec::{TableConfig, Utf8Policy};
//!
//! let config = TableConfig::default()
//!     .with_max_table_size(64 * 1024)
//!     .with_utf8_policy(Utf8Policy::Lossy);
//! assert_eq!(config.max_table_size, 65536);
//! ```

use crate::consts;

/// How name and long string bytes are turned into `String`s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Utf8Policy {
    /// Reject invalid UTF-8 with [`CodecError::InvalidUtf8`](crate::CodecError::InvalidUtf8)
    #[default]
    Strict,
    /// Replace invalid sequences with U+FFFD
    Lossy,
}

impl Utf8Policy {
    pub(crate) fn decode(self, bytes: &[u8], context: &'static str) -> crate::CodecResult<String> {
        match self {
            Utf8Policy::Strict => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| crate::CodecError::InvalidUtf8 { context }),
            Utf8Policy::Lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

/// Limits and policies applied while decoding field tables
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableConfig {
    /// Largest table body, in bytes, a length prefix may declare.
    ///
    /// Unbounded by default, so every table [`encode_table`](crate::encode_table) produces
    /// decodes again. Set a lower cap when decoding untrusted input.
    pub max_table_size: usize,
    /// Text decoding policy for names and long strings
    pub utf8: Utf8Policy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_table_size: consts::DEFAULT_MAX_TABLE_SIZE,
            utf8: Utf8Policy::default(),
        }
    }
}

impl TableConfig {
    /// Set the maximum declared table size
    pub fn with_max_table_size(mut self, size: usize) -> Self {
        self.max_table_size = size;
        self
    }

    /// Set the UTF-8 policy
    pub fn with_utf8_policy(mut self, policy: Utf8Policy) -> Self {
        self.utf8 = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;

    #[test]
    fn test_default_config() {
        let config = TableConfig::default();
        assert_eq!(config.max_table_size, i32::MAX as usize);
        assert_eq!(config.utf8, Utf8Policy::Strict);
    }

    #[test]
    fn test_strict_rejects_invalid_utf8() {
        let err = Utf8Policy::Strict.decode(&[0x66, 0xFF], "name").unwrap_err();
        assert_eq!(err, CodecError::InvalidUtf8 { context: "name" });
    }

    #[test]
    fn test_lossy_replaces_invalid_utf8() {
        let text = Utf8Policy::Lossy.decode(&[0x66, 0xFF], "name").unwrap();
        assert_eq!(text, "f\u{FFFD}");
    }
}
