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


use crate::BindResult;
use amqptable_codec::{FieldTable, TableConfig, decode_table_with, encode_table};
use bytes::Bytes;
use tracing::{debug, instrument};

/// A record whose fields map to named table entries.
///
/// Implementations are normally generated with [`field_record!`](crate::field_record).
pub trait FieldRecord {
    /// Copies matching entries from `table` into this record.
    ///
    /// Entries whose name is not bound to a field are ignored, and fields whose name is
    /// missing from the table keep their current value.
    ///
    /// # Errors
    /// [`BindError::TypeMismatch`](crate::BindError::TypeMismatch) on the first entry
    /// whose type does not match its field. Fields bound before that entry keep their new
    /// values.
    fn bind_from(&mut self, table: &FieldTable) -> BindResult<()>;

    /// Builds a table holding one entry per bound field.
    fn to_table(&self) -> FieldTable;
}

/// Implements [`FieldRecord`] for a struct from a list of `member => "wire-name"` pairs.
///
/// Members left out of the list are not read or written. Each listed member's type must
/// implement [`FieldType`](crate::FieldType).
///
/// # Example
/// ```
/// use amqptable_binding::{field_record, marshal, unmarshal};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Queue {
///     name: String,
///     max_length: i32,
///     durable: Option<bool>,
///     cache: Vec<u8>,
/// }
///
/// field_record!(Queue {
///     name => "name",
///     max_length => "x-max-length",
///     durable => "durable",
/// });
///
/// let queue = Queue { name: "jobs".into(), max_length: 10, durable: None, cache: vec![1] };
/// let bytes = marshal(&queue).unwrap();
///
/// let mut decoded = Queue::default();
/// unmarshal(&bytes, &mut decoded).unwrap();
/// assert_eq!(decoded, Queue { cache: Vec::new(), ..queue });
/// ```
#[macro_export]
macro_rules! field_record {
    ($record:ty { $($member:ident => $name:literal),* $(,)? }) => {
        impl $crate::FieldRecord for $record {
            #[allow(unused_variables)]
            fn bind_from(&mut self, table: &$crate::FieldTable) -> $crate::BindResult<()> {
                $(
                    if let Some(value) = table.get($name) {
                        self.$member = $crate::FieldType::from_field($name, value)?;
                    }
                )*
                Ok(())
            }

            #[allow(unused_mut)]
            fn to_table(&self) -> $crate::FieldTable {
                let mut table = $crate::FieldTable::new();
                $(
                    table.insert($name, $crate::FieldType::to_field(&self.$member));
                )*
                table
            }
        }
    };
}

/// Encodes a record as a field table, length prefix included.
///
/// # Errors
/// [`BindError::Codec`](crate::BindError::Codec) if the table cannot be encoded.
pub fn marshal<R: FieldRecord + ?Sized>(record: &R) -> BindResult<Bytes> {
    let table = record.to_table();
    Ok(encode_table(&table)?)
}

/// Decodes a field table and binds it onto `record` using the default [`TableConfig`].
pub fn unmarshal<R: FieldRecord + ?Sized>(bytes: &[u8], record: &mut R) -> BindResult<()> {
    unmarshal_with(bytes, record, &TableConfig::default())
}

/// Decodes a field table and binds it onto `record`.
///
/// The whole table is decoded before any field is touched, so a malformed table leaves
/// `record` unchanged.
///
/// # Errors
/// - [`BindError::Codec`](crate::BindError::Codec) if the table does not decode
/// - [`BindError::TypeMismatch`](crate::BindError::TypeMismatch) if an entry has the wrong
///   type for its field
#[instrument(level = "trace", skip_all, fields(len = bytes.len()))]
pub fn unmarshal_with<R: FieldRecord + ?Sized>(
    bytes: &[u8],
    record: &mut R,
    config: &TableConfig,
) -> BindResult<()> {
    let table = decode_table_with(bytes, config)?;
    record.bind_from(&table)?;
    debug!(entries = table.len(), "bound field table");
    Ok(())
}
