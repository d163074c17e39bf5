//! Tri-state value wrappers.
//!
//! Every wrapper distinguishes three states:
//! - unset: never assigned
//! - null: explicitly cleared
//! - present: holding a concrete value
//!
//! and converts between four representations of that state: the in-memory
//! value, the document encoding (serde), a nullable wire envelope (prost) and
//! a column binding carrying a validity flag.
//!
//! The wrappers share one contract, [`Settable`], instantiated for scalars
//! ([`Bool`], [`Int`], [`Str`], [`Id`], [`Timestamp`]), closed enumerations
//! ([`Enum`]), JSON documents ([`Json`]), composites ([`Struct`]) and ordered
//! containers ([`Slice`]).
//!
//! Decoding a missing field yields null, not unset. Containing structs keep
//! the distinction with `#[serde(default, skip_serializing_if = "Int::is_unset")]`.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

pub mod composite;
mod document;
mod enumeration;
mod error;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod scalar;
mod settable;
mod slice;
mod state;
pub mod wire;

pub use composite::{Codec, JsonCodec, ProtoJsonCodec, Struct, StructInput};
pub use document::{Json, JsonInput};
pub use enumeration::{resolve_enumerator, Enum, EnumInput, Enumeration};
pub use error::{ValueError, ValueResult};
pub use scalar::{Bool, Id, Int, ScalarInput, Str, Timestamp, TimestampInput};
pub use settable::{Settable, ToWire};
pub use slice::{Bools, Ids, Ints, Jsons, Slice, SliceInput, Strings, Structs, Timestamps};
pub use state::{Column, Null, State};
