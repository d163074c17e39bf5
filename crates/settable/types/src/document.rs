//! Tri-state structured document (JSON) held as validated UTF-8 text.
//!
//! The payload is checked for UTF-8 and JSON syntax on `set` and decoded
//! lazily on demand. Once stored, the buffer is never mutated in place, so
//! [`Json::shared`] can hand it to concurrent readers.

use crate::error::{ValueError, ValueResult};
use crate::settable::{Settable, ToWire};
use crate::state::{Column, Null, State};
use crate::wire::{json_to_wire_value, wire_struct_to_json, wire_value_to_json, WireStruct, WireValue};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::sync::Arc;

/// Tri-state JSON document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Json {
    state: State<Arc<str>>,
}

/// Input shapes accepted by [`Json`].
#[derive(Clone, Debug, PartialEq)]
pub enum JsonInput {
    /// Raw document bytes; validated before they are stored.
    Bytes(Vec<u8>),
    /// Document text; validated before it is stored.
    Text(String),
    /// An already parsed document.
    Value(serde_json::Value),
    /// Text column holding a document.
    Column(Column<String>),
    Null,
}

fn rejected(len: usize, e: impl std::fmt::Display) -> ValueError {
    tracing::debug!(kind = "document", len, error = %e, "rejected payload");
    ValueError::format("document", e)
}

fn validate(text: String) -> ValueResult<Arc<str>> {
    serde_json::from_str::<IgnoredAny>(&text).map_err(|e| rejected(text.len(), e))?;
    Ok(Arc::from(text))
}

fn validate_bytes(bytes: Vec<u8>) -> ValueResult<Arc<str>> {
    let text = String::from_utf8(bytes).map_err(|e| rejected(e.as_bytes().len(), e.utf8_error()))?;
    validate(text)
}

fn encode<T: Serialize + ?Sized>(value: &T) -> ValueResult<Arc<str>> {
    serde_json::to_string(value)
        .map(Arc::from)
        .map_err(|e| ValueError::format("document", e))
}

impl Json {
    /// A present document; fails when `bytes` is not valid JSON.
    pub fn new(bytes: impl Into<Vec<u8>>) -> ValueResult<Self> {
        let mut json = Self::default();
        json.set(JsonInput::Bytes(bytes.into()))?;
        Ok(json)
    }

    pub fn null() -> Self {
        Self { state: State::Null }
    }

    /// Encode any serializable value as the document payload.
    pub fn from_value<T: Serialize + ?Sized>(value: &T) -> ValueResult<Self> {
        let mut json = Self::default();
        json.set_value(value)?;
        Ok(json)
    }

    pub fn set_value<T: Serialize + ?Sized>(&mut self, value: &T) -> ValueResult<()> {
        self.state = State::Present(encode(value)?);
        Ok(())
    }

    pub fn is_unset(&self) -> bool {
        !self.state.is_set()
    }

    /// True when a validated payload is held.
    pub fn is_valid(&self) -> bool {
        self.state.is_present()
    }

    /// Reference-counted handle to the payload for concurrent readers.
    pub fn shared(&self) -> Option<Arc<str>> {
        self.state.as_ref().map(Arc::clone)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.as_str().map(str::as_bytes)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.state.as_ref().map(|text| &**text)
    }

    /// Decode the payload into `T`.
    pub fn unmarshal<T: DeserializeOwned>(&self) -> ValueResult<T> {
        let text = self.state.as_ref().ok_or(ValueError::Absent)?;
        serde_json::from_str(text).map_err(|e| ValueError::format("document", e))
    }

    /// The payload as a wire `Struct`; absent when unset, null, or when the
    /// payload is not a JSON object.
    pub fn to_proto(&self) -> Option<WireStruct> {
        match self.unmarshal::<serde_json::Value>().ok()? {
            serde_json::Value::Object(map) => Some(crate::wire::json_object_to_wire(&map)),
            _ => None,
        }
    }

    /// The payload as a generic wire `Value`; absent when unset or null.
    pub fn to_proto_value(&self) -> Option<WireValue> {
        self.unmarshal::<serde_json::Value>()
            .ok()
            .map(|value| json_to_wire_value(&value))
    }
}

impl Settable for Json {
    type Value = Arc<str>;
    type Input = JsonInput;
    type Bind = String;

    fn set<I: Into<JsonInput>>(&mut self, input: I) -> ValueResult<()> {
        self.state = match input.into() {
            JsonInput::Bytes(bytes) => State::Present(validate_bytes(bytes)?),
            JsonInput::Text(text) => State::Present(validate(text)?),
            JsonInput::Value(value) => State::Present(encode(&value)?),
            JsonInput::Column(column) => match column.into_option() {
                Some(text) => State::Present(validate(text)?),
                None => State::Null,
            },
            JsonInput::Null => State::Null,
        };
        Ok(())
    }

    /// The payload; empty text when unset or null.
    fn get_value(&self) -> Arc<str> {
        self.shared().unwrap_or_else(|| Arc::from(""))
    }

    fn get_ptr(&self) -> Option<&Arc<str>> {
        self.state.as_ref()
    }

    fn is_set(&self) -> bool {
        self.state.is_set()
    }

    fn is_null(&self) -> bool {
        self.state.is_null()
    }

    fn to_column(&self) -> Column<String> {
        match self.as_str() {
            Some(text) => Column::present(text.to_string()),
            None => Column::null(),
        }
    }
}

impl ToWire for Json {
    type Wire = WireStruct;

    fn to_wire(&self) -> Option<WireStruct> {
        self.to_proto()
    }
}

impl From<Vec<u8>> for JsonInput {
    fn from(bytes: Vec<u8>) -> Self {
        JsonInput::Bytes(bytes)
    }
}

impl From<&[u8]> for JsonInput {
    fn from(bytes: &[u8]) -> Self {
        JsonInput::Bytes(bytes.to_vec())
    }
}

impl From<&str> for JsonInput {
    fn from(text: &str) -> Self {
        JsonInput::Text(text.to_string())
    }
}

impl From<String> for JsonInput {
    fn from(text: String) -> Self {
        JsonInput::Text(text)
    }
}

impl From<serde_json::Value> for JsonInput {
    fn from(value: serde_json::Value) -> Self {
        JsonInput::Value(value)
    }
}

impl From<Column<String>> for JsonInput {
    fn from(column: Column<String>) -> Self {
        JsonInput::Column(column)
    }
}

impl From<Null> for JsonInput {
    fn from(_: Null) -> Self {
        JsonInput::Null
    }
}

impl<T: Into<JsonInput>> From<Option<T>> for JsonInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(JsonInput::Null, Into::into)
    }
}

impl TryFrom<WireStruct> for JsonInput {
    type Error = ValueError;

    fn try_from(value: WireStruct) -> ValueResult<Self> {
        wire_struct_to_json(&value).map(JsonInput::Value)
    }
}

impl TryFrom<WireValue> for JsonInput {
    type Error = ValueError;

    fn try_from(value: WireValue) -> ValueResult<Self> {
        wire_value_to_json(&value).map(JsonInput::Value)
    }
}

impl Serialize for Json {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(text) => {
                let raw = RawValue::from_string(text.to_string()).map_err(serde::ser::Error::custom)?;
                raw.serialize(serializer)
            }
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Json {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Box<RawValue>>::deserialize(deserializer)? {
            Some(raw) => Self {
                state: State::Present(Arc::from(raw.get())),
            },
            None => Self::null(),
        })
    }
}
