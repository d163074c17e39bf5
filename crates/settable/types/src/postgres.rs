//! PostgreSQL column bindings (`postgres` feature).
//!
//! Unset and null encode as SQL `NULL`; a `NULL` column decodes to null.
//! Documents and composites bind as `JSONB`, enumerations as `TEXT`,
//! containers as arrays of the element type.

use crate::composite::{Codec, Struct, StructInput};
use crate::document::Json;
use crate::enumeration::{Enum, EnumInput, Enumeration};
use crate::scalar::{Bool, Id, Int, Str, Timestamp};
use crate::settable::Settable;
use crate::slice::Slice;
use chrono::{DateTime, Utc};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use serde_json::value::RawValue;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::types::Json as SqlJson;
use sqlx::{Decode, Encode, Type};
use uuid::Uuid;

macro_rules! scalar_column {
    ($wrapper:ty, $native:ty) => {
        impl Type<Postgres> for $wrapper {
            fn type_info() -> PgTypeInfo {
                <$native as Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <$native as Type<Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, Postgres> for $wrapper {
            fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
                match self.get_ptr() {
                    Some(value) => <$native as Encode<'q, Postgres>>::encode_by_ref(value, buf),
                    None => Ok(IsNull::Yes),
                }
            }
        }

        impl<'r> Decode<'r, Postgres> for $wrapper {
            fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
                let mut wrapper = <$wrapper>::default();
                wrapper.set(<Option<$native> as Decode<'r, Postgres>>::decode(value)?)?;
                Ok(wrapper)
            }
        }
    };
}

scalar_column!(Bool, bool);
scalar_column!(Int, i64);
scalar_column!(Str, String);
scalar_column!(Id, Uuid);
scalar_column!(Timestamp, DateTime<Utc>);

impl Type<Postgres> for Json {
    fn type_info() -> PgTypeInfo {
        <serde_json::Value as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <serde_json::Value as Type<Postgres>>::compatible(ty)
    }
}

/// Binds the stored text as-is.
impl<'q> Encode<'q, Postgres> for Json {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        match self.as_str() {
            Some(text) => {
                let raw: &RawValue = serde_json::from_str(text)?;
                <SqlJson<&RawValue> as Encode<'q, Postgres>>::encode_by_ref(&SqlJson(raw), buf)
            }
            None => Ok(IsNull::Yes),
        }
    }
}

impl<'r> Decode<'r, Postgres> for Json {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let mut json = Json::default();
        let raw = <Option<SqlJson<Box<RawValue>>> as Decode<'r, Postgres>>::decode(value)?;
        json.set(raw.map(|raw| raw.0.get().to_string()))?;
        Ok(json)
    }
}

impl<T: Enumeration> Type<Postgres> for Enum<T> {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<Postgres>>::compatible(ty)
    }
}

impl<'q, T: Enumeration> Encode<'q, Postgres> for Enum<T> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        match self.get_ptr() {
            Some(value) => <&str as Encode<'q, Postgres>>::encode(value.name(), buf),
            None => Ok(IsNull::Yes),
        }
    }
}

impl<'r, T: Enumeration> Decode<'r, Postgres> for Enum<T> {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let mut e = Enum::default();
        let name = <Option<String> as Decode<'r, Postgres>>::decode(value)?;
        e.set(name.map_or(EnumInput::Null, EnumInput::Text))?;
        Ok(e)
    }
}

impl<T, C> Type<Postgres> for Struct<T, C> {
    fn type_info() -> PgTypeInfo {
        <serde_json::Value as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <serde_json::Value as Type<Postgres>>::compatible(ty)
    }
}

impl<'q, T, C: Codec<T>> Encode<'q, Postgres> for Struct<T, C> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        match self.to_document()? {
            Some(text) => {
                let raw = RawValue::from_string(text)?;
                <SqlJson<Box<RawValue>> as Encode<'q, Postgres>>::encode_by_ref(&SqlJson(raw), buf)
            }
            None => Ok(IsNull::Yes),
        }
    }
}

impl<'r, T: Clone + Default, C: Codec<T>> Decode<'r, Postgres> for Struct<T, C> {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let mut composite = Struct::default();
        let input = match <Option<SqlJson<Box<RawValue>>> as Decode<'r, Postgres>>::decode(value)? {
            Some(raw) => StructInput::Document(raw.0.get().as_bytes().to_vec()),
            None => StructInput::Null,
        };
        composite.set(input)?;
        Ok(composite)
    }
}

impl<T> Type<Postgres> for Slice<T>
where
    Vec<T>: Type<Postgres>,
{
    fn type_info() -> PgTypeInfo {
        <Vec<T> as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <Vec<T> as Type<Postgres>>::compatible(ty)
    }
}

impl<'q, T> Encode<'q, Postgres> for Slice<T>
where
    T: Clone,
    Vec<T>: Encode<'q, Postgres>,
{
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        match self.get_ptr() {
            Some(items) => <Vec<T> as Encode<'q, Postgres>>::encode_by_ref(items, buf),
            None => Ok(IsNull::Yes),
        }
    }
}

impl<'r, T> Decode<'r, Postgres> for Slice<T>
where
    T: Clone,
    Vec<T>: Decode<'r, Postgres>,
{
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let mut slice = Slice::default();
        slice.set(<Option<Vec<T>> as Decode<'r, Postgres>>::decode(value)?)?;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    enum Color {
        #[default]
        Unknown,
        Red,
    }

    impl Enumeration for Color {
        fn catalogue() -> &'static [Self] {
            &[Color::Unknown, Color::Red]
        }

        fn name(&self) -> &str {
            match self {
                Color::Unknown => "",
                Color::Red => "RED",
            }
        }
    }

    #[test]
    fn wrappers_share_native_column_types() {
        assert_eq!(Bool::type_info(), <bool as Type<Postgres>>::type_info());
        assert_eq!(Int::type_info(), <i64 as Type<Postgres>>::type_info());
        assert_eq!(Str::type_info(), <String as Type<Postgres>>::type_info());
        assert_eq!(Id::type_info(), <Uuid as Type<Postgres>>::type_info());
        assert_eq!(
            Timestamp::type_info(),
            <DateTime<Utc> as Type<Postgres>>::type_info()
        );
        assert_eq!(
            <Enum<Color> as Type<Postgres>>::type_info(),
            <String as Type<Postgres>>::type_info()
        );
        assert_eq!(
            <Slice<i64> as Type<Postgres>>::type_info(),
            <Vec<i64> as Type<Postgres>>::type_info()
        );
    }

    #[test]
    fn documents_bind_as_jsonb() {
        assert_eq!(Json::type_info(), <serde_json::Value as Type<Postgres>>::type_info());
        assert!(<Json as Type<Postgres>>::compatible(&Json::type_info()));
    }

    #[test]
    fn document_binds_stored_text_unchanged() {
        let doc = Json::new(r#"{"b": 2,  "a": [1.50]}"#).unwrap();
        let mut buf = PgArgumentBuffer::default();
        let is_null = <Json as Encode<'_, Postgres>>::encode_by_ref(&doc, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::No));
        assert_eq!(&buf[..], b"\x01{\"b\": 2,  \"a\": [1.50]}".as_slice());

        let mut buf = PgArgumentBuffer::default();
        let is_null = <Json as Encode<'_, Postgres>>::encode_by_ref(&Json::null(), &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
        assert!(buf.is_empty());
    }
}
