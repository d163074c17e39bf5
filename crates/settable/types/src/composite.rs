//! Tri-state wrapper owning one instance of an arbitrary structured type.

use crate::error::{ValueError, ValueResult};
use crate::settable::{Settable, ToWire};
use crate::state::{Column, Null, State};
use prost_reflect::{DynamicMessage, ReflectMessage};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fmt;
use std::marker::PhantomData;

/// Document rules used to decode and encode a composite payload.
pub trait Codec<T> {
    fn decode(bytes: &[u8]) -> ValueResult<T>;

    fn encode(value: &T) -> ValueResult<String>;
}

/// Plain JSON through the type's own serde impls.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl<T: Serialize + DeserializeOwned> Codec<T> for JsonCodec {
    fn decode(bytes: &[u8]) -> ValueResult<T> {
        serde_json::from_slice(bytes).map_err(|e| ValueError::format("document", e))
    }

    fn encode(value: &T) -> ValueResult<String> {
        serde_json::to_string(value).map_err(|e| ValueError::format("document", e))
    }
}

/// Canonical protobuf JSON rules for wire messages.
///
/// Documents are read and written through the message descriptor:
/// lowerCamelCase field names on output with the declared field names also
/// accepted on input, enumerations by value name, 64-bit integers as
/// strings, and default-valued fields omitted.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProtoJsonCodec;

impl<T: ReflectMessage + Default> Codec<T> for ProtoJsonCodec {
    fn decode(bytes: &[u8]) -> ValueResult<T> {
        let descriptor = T::default().descriptor();
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        let message = DynamicMessage::deserialize(descriptor, &mut deserializer)
            .and_then(|message| deserializer.end().map(|()| message))
            .map_err(|e| ValueError::format("message", e))?;
        message
            .transcode_to::<T>()
            .map_err(|e| ValueError::format("message", e))
    }

    fn encode(value: &T) -> ValueResult<String> {
        serde_json::to_string(&value.transcode_to_dynamic())
            .map_err(|e| ValueError::format("message", e))
    }
}

/// Tri-state owner of one heap-allocated `T`.
///
/// Assigning a new value drops the previous instance. Document payloads are
/// decoded into a fresh `T` with the rules of `C`.
pub struct Struct<T, C = JsonCodec> {
    state: State<Box<T>>,
    codec: PhantomData<fn() -> C>,
}

/// Input shapes accepted by [`Struct`].
#[derive(Clone, Debug, PartialEq)]
pub enum StructInput<T> {
    Value(T),
    /// Document bytes decoded into a fresh value. Empty means null.
    Document(Vec<u8>),
    /// Text column holding a document.
    Column(Column<String>),
    Null,
}

impl<T, C> Struct<T, C> {
    pub fn new(value: T) -> Self {
        Self::from_state(State::Present(Box::new(value)))
    }

    pub fn null() -> Self {
        Self::from_state(State::Null)
    }

    fn from_state(state: State<Box<T>>) -> Self {
        Self {
            state,
            codec: PhantomData,
        }
    }

    pub fn is_unset(&self) -> bool {
        !self.state.is_set()
    }

    pub fn value(&self) -> Option<&T> {
        self.state.as_ref().map(|value| &**value)
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.state.as_mut().map(|value| &mut **value)
    }

    /// Take the held value out, leaving the wrapper unset.
    pub fn take(&mut self) -> Option<T> {
        std::mem::take(&mut self.state).into_option().map(|value| *value)
    }
}

impl<T, C: Codec<T>> Struct<T, C> {
    fn decode_document(bytes: &[u8]) -> ValueResult<State<Box<T>>> {
        if bytes.is_empty() {
            return Ok(State::Null);
        }
        C::decode(bytes).map(|value| State::Present(Box::new(value))).map_err(|e| {
            tracing::debug!(kind = "struct", len = bytes.len(), error = %e, "rejected payload");
            e
        })
    }

    /// Encoded document form; `None` when unset or null.
    pub fn to_document(&self) -> ValueResult<Option<String>> {
        self.value().map(C::encode).transpose()
    }
}

impl<T: Clone + Default, C: Codec<T>> Settable for Struct<T, C> {
    type Value = T;
    type Input = StructInput<T>;
    type Bind = String;

    fn set<I: Into<StructInput<T>>>(&mut self, input: I) -> ValueResult<()> {
        self.state = match input.into() {
            StructInput::Value(value) => State::Present(Box::new(value)),
            StructInput::Document(bytes) => Self::decode_document(&bytes)?,
            StructInput::Column(column) => match column.into_option() {
                Some(text) => Self::decode_document(text.as_bytes())?,
                None => State::Null,
            },
            StructInput::Null => State::Null,
        };
        Ok(())
    }

    fn get_value(&self) -> T {
        self.value().cloned().unwrap_or_default()
    }

    fn get_ptr(&self) -> Option<&T> {
        self.value()
    }

    fn is_set(&self) -> bool {
        self.state.is_set()
    }

    fn is_null(&self) -> bool {
        self.state.is_null()
    }

    /// A value that fails to encode binds as SQL `NULL`.
    fn to_column(&self) -> Column<String> {
        match self.to_document() {
            Ok(Some(text)) => Column::present(text),
            Ok(None) => Column::null(),
            Err(e) => {
                tracing::warn!(error = %e, "composite value could not be encoded for column binding");
                Column::null()
            }
        }
    }
}

impl<T: prost::Message + Clone> Struct<T, ProtoJsonCodec> {
    /// The held message itself; absent when unset or null.
    pub fn to_proto(&self) -> Option<T> {
        self.value().cloned()
    }
}

impl<T: prost::Message + Clone> ToWire for Struct<T, ProtoJsonCodec> {
    type Wire = T;

    fn to_wire(&self) -> Option<T> {
        self.to_proto()
    }
}

impl<T, C> Default for Struct<T, C> {
    fn default() -> Self {
        Self::from_state(State::Unset)
    }
}

impl<T: Clone, C> Clone for Struct<T, C> {
    fn clone(&self) -> Self {
        Self::from_state(self.state.clone())
    }
}

impl<T: PartialEq, C> PartialEq for Struct<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Struct<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Struct").field("state", &self.state).finish()
    }
}

impl<T, C> From<T> for Struct<T, C> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> From<Option<T>> for StructInput<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(StructInput::Null, StructInput::Value)
    }
}

impl<T> From<Null> for StructInput<T> {
    fn from(_: Null) -> Self {
        StructInput::Null
    }
}

impl<T> From<Vec<u8>> for StructInput<T> {
    fn from(bytes: Vec<u8>) -> Self {
        StructInput::Document(bytes)
    }
}

impl<T> From<&[u8]> for StructInput<T> {
    fn from(bytes: &[u8]) -> Self {
        StructInput::Document(bytes.to_vec())
    }
}

impl<T> From<&str> for StructInput<T> {
    fn from(text: &str) -> Self {
        StructInput::Document(text.as_bytes().to_vec())
    }
}

impl<T> From<String> for StructInput<T> {
    fn from(text: String) -> Self {
        StructInput::Document(text.into_bytes())
    }
}

impl<T> From<Column<String>> for StructInput<T> {
    fn from(column: Column<String>) -> Self {
        StructInput::Column(column)
    }
}

impl<T, C: Codec<T>> Serialize for Struct<T, C> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_document().map_err(serde::ser::Error::custom)? {
            Some(text) => RawValue::from_string(text)
                .map_err(serde::ser::Error::custom)?
                .serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T, C: Codec<T>> Deserialize<'de> for Struct<T, C> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let state = match Option::<Box<RawValue>>::deserialize(deserializer)? {
            Some(raw) => C::decode(raw.get().as_bytes())
                .map(|value| State::Present(Box::new(value)))
                .map_err(serde::de::Error::custom)?,
            None => State::Null,
        };
        Ok(Self::from_state(state))
    }
}
