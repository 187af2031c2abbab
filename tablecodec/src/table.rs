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

//! Field Table
//!
//! A field table is a 4 byte big-endian signed length followed by that many bytes of
//! `[name length][name][type tag][payload]` entries. The length covers the entries only,
//! not itself, and it is the sole indication of where the table stops.

use crate::config::TableConfig;
use crate::consts;
use crate::reader::BoundedReader;
use crate::value::{FieldValue, read_short_string, write_short_string};
use crate::{CodecError, CodecResult};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::collections::HashMap;
use std::collections::hash_map;
use tracing::{debug, trace, warn};

/// An unordered map of field names to values.
///
/// Names are short strings of at most 255 bytes. Encoding walks the map in its iteration
/// order, which is unspecified; the wire format does not depend on entry order, so two
/// encodings of the same table may differ byte-wise while decoding to equal tables.
///
/// # Example
/// ```
/// use amqptable_codec::{FieldTable, FieldValue};
///
/// let mut table = FieldTable::new();
/// table.insert("name", "topic");
/// table.insert("age", 30i32);
///
/// let bytes = table.to_bytes().unwrap();
/// let decoded = amqptable_codec::decode_table(&bytes).unwrap();
/// assert_eq!(decoded.get("age"), Some(&FieldValue::I32(30)));
/// assert_eq!(decoded, table);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldTable(HashMap<String, FieldValue>);

impl FieldTable {
    /// Creates a new, empty `FieldTable`.
    pub fn new() -> FieldTable {
        FieldTable(HashMap::new())
    }

    /// Inserts a value, returning the previous value stored under `name`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Returns a mutable reference to the value stored under `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.0.get_mut(name)
    }

    /// Removes and returns the value stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.remove(name)
    }

    /// Returns `true` if `name` is present.
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the entries in unspecified order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, FieldValue> {
        self.0.iter()
    }

    /// Unwraps the underlying map.
    pub fn into_inner(self) -> HashMap<String, FieldValue> {
        self.0
    }

    /// Returns the encoded length of this table in bytes, length prefix included.
    pub fn encoded_len(&self) -> usize {
        consts::TABLE_LENGTH_SIZE + self.body_len()
    }

    fn body_len(&self) -> usize {
        self.0
            .iter()
            .map(|(name, value)| 1 + name.len() + value.encoded_len())
            .sum()
    }

    /// Encodes this table, length prefix first, into a byte buffer.
    ///
    /// Entries are serialized into a scratch buffer before anything reaches `dst`, so a
    /// failed encode leaves `dst` untouched.
    ///
    /// # Errors
    /// - [`CodecError::NameTooLong`] if a name is longer than 255 bytes
    /// - [`CodecError::ValueTooLarge`] if a value or the table body exceeds `i32::MAX` bytes
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> CodecResult<usize> {
        let mut body = BytesMut::with_capacity(self.body_len()).writer();
        for (name, value) in &self.0 {
            write_short_string(&mut body, name)?;
            value.write(&mut body)?;
        }
        let body = body.into_inner();
        let length = i32::try_from(body.len()).map_err(|_| CodecError::ValueTooLarge(body.len()))?;

        dst.put_i32(length);
        dst.put_slice(&body);
        trace!(entries = self.len(), length, "encoded field table");
        Ok(consts::TABLE_LENGTH_SIZE + body.len())
    }

    /// Encodes this table into a new buffer.
    pub fn to_bytes(&self) -> CodecResult<Bytes> {
        let mut buffer = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buffer)?;
        Ok(buffer.freeze())
    }

    /// Decodes a table with the default [`TableConfig`].
    pub fn decode<B: Buf>(src: &mut B) -> CodecResult<FieldTable> {
        FieldTable::decode_with(src, &TableConfig::default())
    }

    /// Decodes a table from the front of `src`.
    ///
    /// On success `src` is advanced past the length prefix and exactly the number of bytes
    /// it declares; anything after the table is left for the caller. On failure `src` is
    /// left wherever decoding stopped and no table is returned.
    ///
    /// # Errors
    /// - [`CodecError::Truncated`] if the prefix, a name or a value cannot be read within
    ///   the declared length and the available input
    /// - [`CodecError::NegativeLength`] for a negative length prefix
    /// - [`CodecError::TableTooLarge`] for a prefix over `config.max_table_size`
    /// - any error from decoding a field value
    pub fn decode_with<B: Buf>(src: &mut B, config: &TableConfig) -> CodecResult<FieldTable> {
        let length = read_table_length(src, config)?;

        let mut table = FieldTable::new();
        let mut reader = BoundedReader::new(&mut *src, length);
        while reader.available() > 0 {
            let name = read_short_string(&mut reader, config.utf8)?;
            let value = FieldValue::decode(&mut reader, config.utf8)?;
            match table.0.entry(name) {
                hash_map::Entry::Occupied(entry) => {
                    debug!(name = %entry.key(), "discarding duplicate field");
                }
                hash_map::Entry::Vacant(entry) => {
                    trace!(name = %entry.key(), kind = %value.kind(), "decoded field");
                    entry.insert(value);
                }
            }
        }
        debug!(entries = table.len(), length, "decoded field table");
        Ok(table)
    }
}

/// Reads and validates a table length prefix.
pub(crate) fn read_table_length<B: Buf>(src: &mut B, config: &TableConfig) -> CodecResult<usize> {
    if src.remaining() < consts::TABLE_LENGTH_SIZE {
        return Err(CodecError::Truncated {
            required: consts::TABLE_LENGTH_SIZE,
            available: src.remaining(),
        });
    }
    let length = src.get_i32();
    check_table_length(length, config)
}

pub(crate) fn check_table_length(length: i32, config: &TableConfig) -> CodecResult<usize> {
    let Ok(length) = usize::try_from(length) else {
        warn!(length, "rejecting negative table length");
        return Err(CodecError::NegativeLength(length));
    };
    if length > config.max_table_size {
        warn!(
            length,
            max = config.max_table_size,
            "rejecting oversized field table"
        );
        return Err(CodecError::TableTooLarge {
            length,
            max: config.max_table_size,
        });
    }
    Ok(length)
}

/// Decodes a field table from a byte slice using the default [`TableConfig`].
///
/// Bytes after the declared table length are ignored.
///
/// # Example
/// ```
/// use amqptable_codec::{FieldValue, decode_table};
///
/// let data = [
///     0, 0, 0, 24,
///     4, b'n', b'a', b'm', b'e', b'S', 0, 0, 0, 5, b't', b'o', b'p', b'i', b'c',
///     3, b'a', b'g', b'e', b'I', 0, 0, 0, 30,
/// ];
/// let table = decode_table(&data).unwrap();
/// assert_eq!(table.get("name"), Some(&FieldValue::from("topic")));
/// assert_eq!(table.get("age"), Some(&FieldValue::I32(30)));
/// ```
pub fn decode_table(bytes: &[u8]) -> CodecResult<FieldTable> {
    decode_table_with(bytes, &TableConfig::default())
}

/// Decodes a field table from a byte slice.
pub fn decode_table_with(mut bytes: &[u8], config: &TableConfig) -> CodecResult<FieldTable> {
    FieldTable::decode_with(&mut bytes, config)
}

/// Encodes a field table, length prefix included.
pub fn encode_table(table: &FieldTable) -> CodecResult<Bytes> {
    table.to_bytes()
}

impl From<HashMap<String, FieldValue>> for FieldTable {
    fn from(value: HashMap<String, FieldValue>) -> Self {
        FieldTable(value)
    }
}

impl From<FieldTable> for HashMap<String, FieldValue> {
    fn from(value: FieldTable) -> Self {
        value.0
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FieldTable(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<FieldValue>> Extend<(K, V)> for FieldTable {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into())),
        );
    }
}

impl IntoIterator for FieldTable {
    type Item = (String, FieldValue);
    type IntoIter = hash_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldTable {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = hash_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timestamp;
    use tracing_test::traced_test;

    const NAME_AGE: [u8; 28] = [
        0x00, 0x00, 0x00, 0x18, // table length
        0x04, b'n', b'a', b'm', b'e', // "name"
        b'S', 0x00, 0x00, 0x00, 0x05, b't', b'o', b'p', b'i', b'c', // "topic"
        0x03, b'a', b'g', b'e', // "age"
        b'I', 0x00, 0x00, 0x00, 0x1E, // 30
    ];

    #[test]
    fn decode_name_age() {
        let table = decode_table(&NAME_AGE).unwrap();
        let expected: FieldTable = [
            ("name", FieldValue::from("topic")),
            ("age", FieldValue::I32(30)),
        ]
        .into_iter()
        .collect();
        assert_eq!(table, expected);
    }

    #[test]
    fn encode_name_age() {
        // Single entry tables have only one possible byte order.
        let mut table = FieldTable::new();
        table.insert("name", "topic");
        let bytes = encode_table(&table).unwrap();
        assert_eq!(&bytes[..], &[&[0, 0, 0, 15][..], &NAME_AGE[4..19]].concat()[..]);

        let mut table = FieldTable::new();
        table.insert("name", "topic");
        table.insert("age", 30i32);
        let bytes = encode_table(&table).unwrap();
        assert_eq!(bytes.len(), NAME_AGE.len());
        assert_eq!(&bytes[..4], &NAME_AGE[..4]);
        let swapped = [&NAME_AGE[..4], &NAME_AGE[19..], &NAME_AGE[4..19]].concat();
        assert!(bytes[..] == NAME_AGE[..] || bytes[..] == swapped[..]);
    }

    #[test]
    fn empty_table() {
        let bytes = encode_table(&FieldTable::new()).unwrap();
        assert_eq!(&bytes[..], &[0, 0, 0, 0]);
        assert!(decode_table(&bytes).unwrap().is_empty());
    }

    #[test]
    fn decode_leaves_trailing_bytes() {
        let mut data = NAME_AGE.to_vec();
        data.extend_from_slice(&[0xCE, 0xAB]);
        let mut src = &data[..];
        let table = FieldTable::decode(&mut src).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(src, &[0xCE, 0xAB][..]);
    }

    #[test]
    #[traced_test]
    fn decode_keeps_first_duplicate() {
        let data = [
            0, 0, 0, 14, //
            1, b'k', b'I', 0, 0, 0, 1, //
            1, b'k', b'I', 0, 0, 0, 2,
        ];
        let table = decode_table(&data).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("k"), Some(&FieldValue::I32(1)));
        assert!(logs_contain("discarding duplicate field"));
    }

    #[test]
    fn decode_stops_at_declared_length() {
        // The prefix covers the first entry only. The second entry is the remainder of
        // some enclosing frame and must not be read.
        let data = [
            0, 0, 0, 3, //
            1, b'a', b'V', //
            1, b'b', b'V',
        ];
        let table = decode_table(&data).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a"), Some(&FieldValue::Void));
    }

    #[test]
    fn decode_short_prefix_truncates_value() {
        // The declared length ends two bytes into the i32 payload while the buffer still
        // holds the rest of it.
        let data = [0, 0, 0, 5, 1, b'a', b'I', 0, 0, 0, 9];
        let err = decode_table(&data).unwrap_err();
        assert_eq!(
            err,
            CodecError::Truncated {
                required: 4,
                available: 2
            }
        );
    }

    #[test]
    fn decode_prefix_longer_than_buffer() {
        let data = [0, 0, 0, 10, 1, b'a', b'V'];
        assert!(decode_table(&data).unwrap_err().is_truncated());
    }

    #[test]
    fn decode_missing_prefix() {
        assert_eq!(
            decode_table(&[0, 0]).unwrap_err(),
            CodecError::Truncated {
                required: 4,
                available: 2
            }
        );
    }

    #[test]
    fn decode_negative_prefix() {
        assert_eq!(
            decode_table(&[0xFF, 0xFF, 0xFF, 0xFE]).unwrap_err(),
            CodecError::NegativeLength(-2)
        );
    }

    #[test]
    fn decode_oversized_prefix() {
        let config = TableConfig::default().with_max_table_size(8);
        let err = decode_table_with(&[0, 0, 0, 9], &config).unwrap_err();
        assert_eq!(err, CodecError::TableTooLarge { length: 9, max: 8 });
    }

    #[test]
    fn decode_unknown_tag_aborts_table() {
        let data = [0, 0, 0, 6, 1, b'a', b'V', 1, b'b', 0x00];
        assert_eq!(
            decode_table(&data).unwrap_err(),
            CodecError::UnrecognizedFieldType(0x00)
        );
    }

    #[test]
    fn decode_nested_table_is_unsupported() {
        let data = [0, 0, 0, 7, 1, b't', b'F', 0, 0, 0, 0];
        assert_eq!(
            decode_table(&data).unwrap_err(),
            CodecError::UnsupportedFieldType(b'F')
        );
    }

    #[test]
    fn void_round_trip() {
        let mut table = FieldTable::new();
        table.insert("nothing", FieldValue::Void);
        let bytes = encode_table(&table).unwrap();
        assert_eq!(&bytes[..], b"\x00\x00\x00\x09\x07nothingV");
        assert_eq!(decode_table(&bytes).unwrap(), table);
    }

    #[test]
    fn encode_rejects_long_name_without_writing() {
        let mut table = FieldTable::new();
        table.insert("x".repeat(300), 1u8);
        let mut dst = BytesMut::new();
        assert_eq!(
            table.encode(&mut dst).unwrap_err(),
            CodecError::NameTooLong(300)
        );
        assert!(dst.is_empty());
    }

    #[test]
    fn encoded_len_matches_output() {
        let table: FieldTable = [
            ("s", FieldValue::from("abc")),
            ("t", FieldValue::Timestamp(Timestamp::new(1, 2))),
            ("v", FieldValue::Void),
            ("x", FieldValue::from(vec![0u8; 10])),
        ]
        .into_iter()
        .collect();
        let bytes = table.to_bytes().unwrap();
        assert_eq!(bytes.len(), table.encoded_len());
        let prefix = i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(prefix as usize, bytes.len() - 4);
    }
}
