//! Nullable wire envelopes and document <-> wire structure conversion.
//!
//! The scalar envelopes mirror `google.protobuf.{Bool,Int64,String}Value`;
//! timestamps and structured documents use the `prost-types` messages.

use crate::error::{ValueError, ValueResult};
use crate::settable::ToWire;
use chrono::{DateTime, Utc};
use prost_types::value::Kind;
use uuid::Uuid;

/// Wrapper message for `bool`.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct BoolValue {
    #[prost(bool, tag = "1")]
    pub value: bool,
}

/// Wrapper message for `int64`.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Int64Value {
    #[prost(int64, tag = "1")]
    pub value: i64,
}

/// Wrapper message for `string`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StringValue {
    #[prost(string, tag = "1")]
    pub value: ::prost::alloc::string::String,
}

pub use prost_types::{ListValue, Struct as WireStruct, Timestamp as WireTimestamp, Value as WireValue};

impl ToWire for bool {
    type Wire = BoolValue;

    fn to_wire(&self) -> Option<BoolValue> {
        Some(BoolValue { value: *self })
    }
}

impl ToWire for i64 {
    type Wire = Int64Value;

    fn to_wire(&self) -> Option<Int64Value> {
        Some(Int64Value { value: *self })
    }
}

impl ToWire for String {
    type Wire = StringValue;

    fn to_wire(&self) -> Option<StringValue> {
        Some(StringValue {
            value: self.clone(),
        })
    }
}

impl ToWire for Uuid {
    type Wire = StringValue;

    fn to_wire(&self) -> Option<StringValue> {
        Some(StringValue {
            value: self.to_string(),
        })
    }
}

impl ToWire for DateTime<Utc> {
    type Wire = WireTimestamp;

    fn to_wire(&self) -> Option<WireTimestamp> {
        Some(timestamp_to_wire(self))
    }
}

pub fn timestamp_to_wire(value: &DateTime<Utc>) -> WireTimestamp {
    WireTimestamp {
        seconds: value.timestamp(),
        nanos: value.timestamp_subsec_nanos() as i32,
    }
}

pub fn timestamp_from_wire(value: &WireTimestamp) -> ValueResult<DateTime<Utc>> {
    let mut normalized = value.clone();
    normalized.normalize();
    DateTime::from_timestamp(normalized.seconds, normalized.nanos as u32).ok_or_else(|| {
        ValueError::format(
            "timestamp",
            format!("wire timestamp out of range: {}s", value.seconds),
        )
    })
}

/// Convert a JSON document into the wire structured-value form.
pub fn json_to_wire_value(value: &serde_json::Value) -> WireValue {
    let kind = match value {
        serde_json::Value::Null => Kind::NullValue(prost_types::NullValue::NullValue as i32),
        serde_json::Value::Bool(b) => Kind::BoolValue(*b),
        serde_json::Value::Number(n) => Kind::NumberValue(n.as_f64().unwrap_or_default()),
        serde_json::Value::String(s) => Kind::StringValue(s.clone()),
        serde_json::Value::Array(items) => Kind::ListValue(ListValue {
            values: items.iter().map(json_to_wire_value).collect(),
        }),
        serde_json::Value::Object(map) => Kind::StructValue(json_object_to_wire(map)),
    };
    WireValue { kind: Some(kind) }
}

pub fn json_object_to_wire(map: &serde_json::Map<String, serde_json::Value>) -> WireStruct {
    WireStruct {
        fields: map
            .iter()
            .map(|(key, value)| (key.clone(), json_to_wire_value(value)))
            .collect(),
    }
}

/// Convert a wire structured value back into JSON.
///
/// Integral numbers come back as JSON integers so `{"a":1}` survives the
/// trip unchanged. Non-finite numbers have no JSON form and are rejected.
pub fn wire_value_to_json(value: &WireValue) -> ValueResult<serde_json::Value> {
    Ok(match &value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(*b),
        Some(Kind::NumberValue(n)) => number_to_json(*n)?,
        Some(Kind::StringValue(s)) => serde_json::Value::String(s.clone()),
        Some(Kind::ListValue(list)) => serde_json::Value::Array(
            list.values
                .iter()
                .map(wire_value_to_json)
                .collect::<ValueResult<Vec<_>>>()?,
        ),
        Some(Kind::StructValue(st)) => wire_struct_to_json(st)?,
    })
}

pub fn wire_struct_to_json(value: &WireStruct) -> ValueResult<serde_json::Value> {
    let mut map = serde_json::Map::with_capacity(value.fields.len());
    for (key, field) in &value.fields {
        map.insert(key.clone(), wire_value_to_json(field)?);
    }
    Ok(serde_json::Value::Object(map))
}

fn number_to_json(n: f64) -> ValueResult<serde_json::Value> {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        return Ok(serde_json::Value::from(n as i64));
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .ok_or_else(|| ValueError::format("document", format!("non-finite number {n}")))
}
