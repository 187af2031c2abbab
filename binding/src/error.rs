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


//! Error types for record binding

use amqptable_codec::{CodecError, FieldKind, FieldValue};
use thiserror::Error;

/// Result type for binding operations
pub type BindResult<T> = std::result::Result<T, BindError>;

/// Record binding error types
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BindError {
    /// A table entry does not have the exact type of the field it is bound to
    #[error("field '{name}' has type {found}, expected {expected}")]
    TypeMismatch {
        /// Wire name of the entry
        name: String,
        /// Type the record field accepts
        expected: &'static str,
        /// Type found in the table
        found: FieldKind,
    },

    /// Encoding or decoding the table failed
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl BindError {
    pub(crate) fn mismatch(name: &str, expected: &'static str, found: &FieldValue) -> Self {
        BindError::TypeMismatch {
            name: name.to_owned(),
            expected,
            found: found.kind(),
        }
    }

    /// Check if the error was caused by a type mismatch
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, BindError::TypeMismatch { .. })
    }

    /// Name of the offending entry, if the error is tied to one
    pub fn field_name(&self) -> Option<&str> {
        match self {
            BindError::TypeMismatch { name, .. } => Some(name),
            BindError::Codec(_) => None,
        }
    }
}
