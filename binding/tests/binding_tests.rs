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


//! Integration tests for record binding

use amqptable_binding::{
    BindError, FieldKind, FieldRecord, FieldTable, FieldValue, Timestamp, field_record, marshal,
    unmarshal,
};
use amqptable_codec::{decode_table, encode_table};
use bytes::Bytes;
use proptest::prelude::*;

// ============================================================================
// Test Records
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
struct Everything {
    text: String,
    raw: Vec<u8>,
    shared: Bytes,
    tiny: i8,
    octet: u8,
    short: i16,
    ushort: u16,
    int: i32,
    uint: u32,
    long: i64,
    float: f32,
    double: f64,
    flag: bool,
    when: Timestamp,
    maybe: Option<i32>,
    anything: FieldValue,
}

field_record!(Everything {
    text => "text",
    raw => "raw",
    shared => "shared",
    tiny => "tiny",
    octet => "octet",
    short => "short",
    ushort => "ushort",
    int => "int",
    uint => "uint",
    long => "long",
    float => "float",
    double => "double",
    flag => "flag",
    when => "when",
    maybe => "maybe",
    anything => "anything",
});

#[derive(Debug, Default, PartialEq)]
struct Topic {
    name: String,
    age: i32,
    internal: Vec<String>,
}

field_record!(Topic {
    name => "name",
    age => "age",
});

// ============================================================================
// Round Trip Tests
// ============================================================================

#[test]
fn topic_round_trip_matches_wire_bytes() {
    let topic = Topic {
        name: "topic".into(),
        age: 30,
        internal: vec!["ignored".into()],
    };
    let bytes = marshal(&topic).unwrap();
    assert_eq!(bytes.len(), 28);

    let table = decode_table(&bytes).unwrap();
    assert_eq!(table.get("name"), Some(&FieldValue::from("topic")));
    assert_eq!(table.get("age"), Some(&FieldValue::I32(30)));
    assert!(!table.contains_key("internal"));

    let mut decoded = Topic::default();
    unmarshal(&bytes, &mut decoded).unwrap();
    assert_eq!(decoded.name, "topic");
    assert_eq!(decoded.age, 30);
    assert!(decoded.internal.is_empty());
}

#[test]
fn every_supported_type_round_trips() {
    let record = Everything {
        text: "hello".into(),
        raw: vec![0, 1, 2],
        shared: Bytes::from_static(b"shared"),
        tiny: -1,
        octet: 255,
        short: -300,
        ushort: 60_000,
        int: -70_000,
        uint: 4_000_000_000,
        long: i64::MIN,
        float: 1.5,
        double: -2.25,
        flag: true,
        when: Timestamp::new(1_700_000_000, 42),
        maybe: Some(12),
        anything: FieldValue::U16(7),
    };
    let bytes = marshal(&record).unwrap();
    let mut decoded = Everything::default();
    unmarshal(&bytes, &mut decoded).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn none_travels_as_void() {
    let record = Everything::default();
    let table = record.to_table();
    assert_eq!(table.get("maybe"), Some(&FieldValue::Void));

    let mut decoded = Everything {
        maybe: Some(1),
        ..Everything::default()
    };
    decoded.bind_from(&table).unwrap();
    assert_eq!(decoded.maybe, None);
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn mismatch_names_the_entry() {
    let mut table = FieldTable::new();
    table.insert("name", "topic");
    table.insert("age", 30u32);
    let bytes = encode_table(&table).unwrap();

    let mut topic = Topic::default();
    let err = unmarshal(&bytes, &mut topic).unwrap_err();
    assert_eq!(
        err,
        BindError::TypeMismatch {
            name: "age".to_string(),
            expected: "i32",
            found: FieldKind::U32,
        }
    );
    assert_eq!(err.to_string(), "field 'age' has type u32, expected i32");
}

#[test]
fn unknown_tag_surfaces_as_codec_error() {
    let mut topic = Topic::default();
    let err = unmarshal(&[0, 0, 0, 3, 1, b'a', b'D'], &mut topic).unwrap_err();
    assert!(matches!(err, BindError::Codec(ref e) if e.is_unknown_type()));
}

#[test]
fn oversized_name_fails_marshal() {
    struct Wide {
        value: bool,
    }
    impl FieldRecord for Wide {
        fn bind_from(&mut self, _table: &FieldTable) -> amqptable_binding::BindResult<()> {
            Ok(())
        }
        fn to_table(&self) -> FieldTable {
            let mut table = FieldTable::new();
            table.insert("w".repeat(256), self.value);
            table
        }
    }
    let err = marshal(&Wide { value: true }).unwrap_err();
    assert!(matches!(
        err,
        BindError::Codec(amqptable_codec::CodecError::NameTooLong(256))
    ));
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn topic_records_round_trip(name in ".{0,64}", age in any::<i32>()) {
        let topic = Topic { name, age, internal: Vec::new() };
        let bytes = marshal(&topic).unwrap();
        let mut decoded = Topic::default();
        unmarshal(&bytes, &mut decoded).unwrap();
        prop_assert_eq!(decoded, topic);
    }
}
