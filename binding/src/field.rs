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


//! Conversions between native Rust types and single field values.
//!
//! Every conversion is exact: an `i32` field only accepts an `I` entry, never a `u16` or
//! an `i64` that happens to fit. Types with no wire representation, such as `u64`, have
//! no [`FieldType`] impl and are rejected at compile time.

use crate::{BindError, BindResult};
use amqptable_codec::{FieldValue, Timestamp};
use bytes::Bytes;

/// A Rust type that can be stored in a single table entry.
pub trait FieldType: Sized {
    /// Human readable name of the accepted field type, used in mismatch errors.
    const EXPECTED: &'static str;

    /// Converts an entry into this type.
    ///
    /// # Errors
    /// [`BindError::TypeMismatch`] naming `name` if `value` is not of the accepted type.
    fn from_field(name: &str, value: &FieldValue) -> BindResult<Self>;

    /// Converts this value into an entry.
    fn to_field(&self) -> FieldValue;
}

macro_rules! impl_copy_field_type {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl FieldType for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_field(name: &str, value: &FieldValue) -> BindResult<Self> {
                    match value {
                        FieldValue::$variant(inner) => Ok(*inner),
                        other => Err(BindError::mismatch(name, Self::EXPECTED, other)),
                    }
                }

                fn to_field(&self) -> FieldValue {
                    FieldValue::$variant(*self)
                }
            }
        )+
    };
}

impl_copy_field_type! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

impl FieldType for Timestamp {
    const EXPECTED: &'static str = "timestamp";

    fn from_field(name: &str, value: &FieldValue) -> BindResult<Self> {
        match value {
            FieldValue::Timestamp(ts) => Ok(*ts),
            other => Err(BindError::mismatch(name, Self::EXPECTED, other)),
        }
    }

    fn to_field(&self) -> FieldValue {
        FieldValue::Timestamp(*self)
    }
}

impl FieldType for String {
    const EXPECTED: &'static str = "long string";

    fn from_field(name: &str, value: &FieldValue) -> BindResult<Self> {
        match value {
            FieldValue::LongString(text) => Ok(text.clone()),
            other => Err(BindError::mismatch(name, Self::EXPECTED, other)),
        }
    }

    fn to_field(&self) -> FieldValue {
        FieldValue::LongString(self.clone())
    }
}

impl FieldType for Bytes {
    const EXPECTED: &'static str = "byte array";

    fn from_field(name: &str, value: &FieldValue) -> BindResult<Self> {
        match value {
            FieldValue::ByteArray(bytes) => Ok(bytes.clone()),
            other => Err(BindError::mismatch(name, Self::EXPECTED, other)),
        }
    }

    fn to_field(&self) -> FieldValue {
        FieldValue::ByteArray(self.clone())
    }
}

impl FieldType for Vec<u8> {
    const EXPECTED: &'static str = "byte array";

    fn from_field(name: &str, value: &FieldValue) -> BindResult<Self> {
        match value {
            FieldValue::ByteArray(bytes) => Ok(bytes.to_vec()),
            other => Err(BindError::mismatch(name, Self::EXPECTED, other)),
        }
    }

    fn to_field(&self) -> FieldValue {
        FieldValue::ByteArray(Bytes::copy_from_slice(self))
    }
}

/// Accepts any entry unchanged.
impl FieldType for FieldValue {
    const EXPECTED: &'static str = "any";

    fn from_field(_name: &str, value: &FieldValue) -> BindResult<Self> {
        Ok(value.clone())
    }

    fn to_field(&self) -> FieldValue {
        self.clone()
    }
}

/// `None` is stored as a void entry; a void entry binds as `None`.
impl<T: FieldType> FieldType for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_field(name: &str, value: &FieldValue) -> BindResult<Self> {
        match value {
            FieldValue::Void => Ok(None),
            other => T::from_field(name, other).map(Some),
        }
    }

    fn to_field(&self) -> FieldValue {
        match self {
            Some(inner) => inner.to_field(),
            None => FieldValue::Void,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amqptable_codec::FieldKind;

    #[test]
    fn exact_match_required() {
        assert_eq!(i32::from_field("n", &FieldValue::I32(7)).unwrap(), 7);
        assert_eq!(
            i32::from_field("n", &FieldValue::I16(7)).unwrap_err(),
            BindError::TypeMismatch {
                name: "n".to_string(),
                expected: "i32",
                found: FieldKind::I16,
            }
        );
        assert!(u32::from_field("n", &FieldValue::I32(7)).is_err());
    }

    #[test]
    fn strings_and_bytes() {
        let text = FieldValue::from("hello");
        assert_eq!(String::from_field("s", &text).unwrap(), "hello");
        assert!(Vec::<u8>::from_field("s", &text).unwrap_err().is_type_mismatch());

        let raw = FieldValue::from(vec![1u8, 2]);
        assert_eq!(Vec::<u8>::from_field("b", &raw).unwrap(), vec![1, 2]);
        assert_eq!(Bytes::from_field("b", &raw).unwrap(), Bytes::from_static(&[1, 2]));
        assert_eq!(vec![1u8, 2].to_field(), raw);
    }

    #[test]
    fn option_maps_void() {
        assert_eq!(Option::<bool>::from_field("o", &FieldValue::Void).unwrap(), None);
        assert_eq!(
            Option::<bool>::from_field("o", &FieldValue::Bool(true)).unwrap(),
            Some(true)
        );
        assert_eq!(None::<bool>.to_field(), FieldValue::Void);
        assert_eq!(Some(3u8).to_field(), FieldValue::U8(3));
        assert_eq!(
            Option::<bool>::from_field("o", &FieldValue::U8(1))
                .unwrap_err()
                .to_string(),
            "field 'o' has type u8, expected bool"
        );
    }

    #[test]
    fn void_rejected_for_plain_types() {
        assert!(bool::from_field("b", &FieldValue::Void).is_err());
    }

    #[test]
    fn field_value_passes_through() {
        let ts = FieldValue::Timestamp(Timestamp::new(1, 2));
        assert_eq!(FieldValue::from_field("t", &ts).unwrap(), ts);
        assert_eq!(Timestamp::from_field("t", &ts).unwrap(), Timestamp::new(1, 2));
    }
}
