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

//! # AMQP Field Table Codec
//!
//! This crate encodes and decodes the AMQP 0-9-1 *field table*, the length-prefixed map of
//! named, type-tagged values that carries message headers and exchange or queue arguments
//! inside AMQP frames. It works purely on in-memory buffers: framing, connections and the
//! rest of the protocol are left to the caller.
//!
//! ## Wire Format
//!
//! ```text
//! +----------------+------+------+-----+---------+------+------+-----+---------+----
//! | length: i32 BE | nlen | name | tag | payload | nlen | name | tag | payload | ...
//! +----------------+------+------+-----+---------+------+------+-----+---------+----
//!                  |<------------------------- length bytes ------------------------>|
//! ```
//!
//! The length counts the entries only. Decoding stops exactly when it has been consumed,
//! even if the buffer continues with unrelated bytes.
//!
//! ## Core Components
//!
//! ### [`BoundedReader`]
//!
//! Wraps a [`bytes::Buf`] with a byte budget. Every typed read checks the budget before it
//! touches the source and fails with [`CodecError::Truncated`] instead of crossing it.
//!
//! ### [`FieldValue`]
//!
//! A closed enum with one variant per supported type tag. [`FieldValue::decode`] dispatches
//! on the tag byte, [`FieldValue::encode`] writes the tag and payload back. The reserved
//! decimal, nested table and array tags are rejected.
//!
//! ### [`FieldTable`]
//!
//! The decoded map. The first occurrence of a duplicated name wins; later ones are parsed
//! to stay aligned and then dropped.
//!
//! ### [`FieldTableCodec`]
//!
//! A `tokio_util::codec` [`Decoder`](tokio_util::codec::Decoder) and
//! [`Encoder`](tokio_util::codec::Encoder) for streams of back-to-back tables.
//!
//! ## Usage Example
//!
//! ```rust
//! use amqptable_codec::{FieldTable, FieldValue, decode_table, encode_table};
//!
//! let mut headers = FieldTable::new();
//! headers.insert("name", "topic");
//! headers.insert("age", 30i32);
//! headers.insert("deleted", FieldValue::Void);
//!
//! let bytes = encode_table(&headers)?;
//! let decoded = decode_table(&bytes)?;
//! assert_eq!(decoded, headers);
//! # Ok::<(), amqptable_codec::CodecError>(())
//! ```
//!
//! ## Timestamps
//!
//! The `T` field is written as 4 bytes of seconds followed by 4 bytes of nanoseconds. This
//! differs from AMQP's single 64-bit timestamp; see [`Timestamp`].
//!
//! ## Thread Safety
//!
//! There is no shared state. Every decode or encode call owns its reader and its result,
//! and [`FieldTable`], [`FieldValue`] and [`TableConfig`] are all `Send + Sync`.

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

mod codec;
mod config;
mod consts;
mod reader;
mod result;
mod table;
mod timestamp;
mod value;

pub use self::codec::FieldTableCodec;
pub use self::config::{TableConfig, Utf8Policy};
pub use self::consts::tag;
pub use self::reader::BoundedReader;
pub use self::result::{CodecError, CodecResult};
pub use self::table::{FieldTable, decode_table, decode_table_with, encode_table};
pub use self::timestamp::Timestamp;
pub use self::value::{FieldKind, FieldValue, read_short_string, write_short_string};
