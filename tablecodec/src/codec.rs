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

use crate::config::TableConfig;
use crate::consts;
use crate::table::{FieldTable, check_table_length};
use crate::{CodecError, CodecResult};
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::instrument;

/// A codec for a stream of back-to-back field tables.
///
/// The decoder waits until a whole table, length prefix included, is buffered and then
/// decodes it with [`FieldTable::decode_with`]. A negative or oversized length prefix is
/// rejected as soon as its four bytes arrive, before any of the body is buffered.
///
/// The codec does no I/O of its own; it works on whatever `BytesMut` it is handed, whether
/// that comes from a `FramedRead` or from a frame the caller assembled by hand.
///
/// # Example
/// ```
/// use amqptable_codec::{FieldTable, FieldTableCodec};
/// use bytes::BytesMut;
/// use tokio_util::codec::{Decoder, Encoder};
///
/// let mut codec = FieldTableCodec::new();
/// let mut table = FieldTable::new();
/// table.insert("x-max-length", 1000i32);
///
/// let mut buffer = BytesMut::new();
/// codec.encode(&table, &mut buffer).unwrap();
/// assert_eq!(codec.decode(&mut buffer).unwrap(), Some(table));
/// assert!(buffer.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct FieldTableCodec {
    config: TableConfig,
}

impl FieldTableCodec {
    /// Creates a codec with the default [`TableConfig`].
    pub fn new() -> FieldTableCodec {
        FieldTableCodec::default()
    }

    /// Creates a codec with the given configuration.
    pub fn with_config(config: TableConfig) -> FieldTableCodec {
        FieldTableCodec { config }
    }

    /// Get a reference to the codec configuration
    pub fn config(&self) -> &TableConfig {
        &self.config
    }
}

impl Decoder for FieldTableCodec {
    type Item = FieldTable;
    type Error = CodecError;

    #[instrument(level = "trace", skip_all, fields(buffered = src.len()))]
    fn decode(&mut self, src: &mut BytesMut) -> CodecResult<Option<FieldTable>> {
        if src.len() < consts::TABLE_LENGTH_SIZE {
            return Ok(None);
        }
        let length = i32::from_be_bytes([src[0], src[1], src[2], src[3]]);
        let frame_len = consts::TABLE_LENGTH_SIZE + check_table_length(length, &self.config)?;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }
        let mut frame = src.split_to(frame_len).freeze();
        FieldTable::decode_with(&mut frame, &self.config).map(Some)
    }
}

impl Encoder<&FieldTable> for FieldTableCodec {
    type Error = CodecError;

    #[instrument(level = "trace", skip_all, fields(entries = item.len()))]
    fn encode(&mut self, item: &FieldTable, dst: &mut BytesMut) -> CodecResult<()> {
        dst.reserve(item.encoded_len());
        item.encode(dst)?;
        Ok(())
    }
}

impl Encoder<FieldTable> for FieldTableCodec {
    type Error = CodecError;

    fn encode(&mut self, item: FieldTable, dst: &mut BytesMut) -> CodecResult<()> {
        self.encode(&item, dst)
    }
}
