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


//! # AMQP Field Table Binding
//!
//! Maps plain Rust structs onto AMQP field tables by entry name. Each bound member is
//! declared once with [`field_record!`], which generates the [`FieldRecord`] impl; the
//! per-member conversions come from [`FieldType`].
//!
//! ```rust
//! use amqptable_binding::{FieldRecord, FieldTable, field_record};
//!
//! #[derive(Default)]
//! struct Message {
//!     priority: u8,
//!     reply_to: Option<String>,
//! }
//!
//! field_record!(Message {
//!     priority => "priority",
//!     reply_to => "reply-to",
//! });
//!
//! let mut table = FieldTable::new();
//! table.insert("priority", 4u8);
//! table.insert("reply-to", "amq.rabbitmq.reply-to");
//!
//! let mut message = Message::default();
//! message.bind_from(&table)?;
//! assert_eq!(message.priority, 4);
//! assert_eq!(message.reply_to.as_deref(), Some("amq.rabbitmq.reply-to"));
//! # Ok::<(), amqptable_binding::BindError>(())
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod error;
mod field;
mod record;

pub use self::error::{BindError, BindResult};
pub use self::field::FieldType;
pub use self::record::{FieldRecord, marshal, unmarshal, unmarshal_with};
pub use amqptable_codec::{FieldKind, FieldTable, FieldValue, TableConfig, Timestamp};
