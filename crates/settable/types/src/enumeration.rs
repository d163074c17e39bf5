//! Tri-state wrapper over a closed enumeration.

use crate::error::{ValueError, ValueResult};
use crate::settable::{Settable, ToWire};
use crate::state::{Column, Null, State};
use serde::{Deserialize, Serialize};

/// A closed, comparable value domain with named enumerators.
///
/// `resolve` defaults to a case-insensitive lookup of `name()` over
/// `catalogue()`. Wire-format enumerations override it to go through the
/// generated name table instead.
pub trait Enumeration: Sized + Clone + PartialEq + Default + 'static {
    /// Every enumerator of the domain.
    fn catalogue() -> &'static [Self];

    /// Declared name of this enumerator.
    fn name(&self) -> &str;

    fn resolve(name: &str) -> Option<Self> {
        Self::catalogue()
            .iter()
            .find(|candidate| candidate.name().eq_ignore_ascii_case(name))
            .cloned()
    }
}

/// Resolve `name` or fail with [`ValueError::UnknownEnumerator`].
pub fn resolve_enumerator<T: Enumeration>(name: &str) -> ValueResult<T> {
    T::resolve(name).ok_or_else(|| {
        tracing::debug!(kind = "enum", input = %name, "unknown enumerator");
        ValueError::UnknownEnumerator {
            name: name.to_string(),
        }
    })
}

/// Tri-state enumeration value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Enum<T> {
    state: State<T>,
}

/// Input shapes accepted by [`Enum`].
#[derive(Clone, Debug, PartialEq)]
pub enum EnumInput<T> {
    Value(T),
    /// Enumerator name, matched case-insensitively.
    Text(String),
    /// Text column holding an enumerator name.
    Column(Column<String>),
    Null,
}

impl<T: Enumeration> Enum<T> {
    pub fn new(value: T) -> Self {
        Self {
            state: State::Present(value),
        }
    }

    pub fn null() -> Self {
        Self { state: State::Null }
    }

    pub fn is_unset(&self) -> bool {
        !self.state.is_set()
    }

    pub fn state(&self) -> &State<T> {
        &self.state
    }

    /// Name of the held enumerator; empty when unset or null.
    pub fn name(&self) -> &str {
        self.state.as_ref().map(Enumeration::name).unwrap_or_default()
    }
}

impl<T: Enumeration> Settable for Enum<T> {
    type Value = T;
    type Input = EnumInput<T>;
    type Bind = String;

    fn set<I: Into<EnumInput<T>>>(&mut self, input: I) -> ValueResult<()> {
        self.state = match input.into() {
            EnumInput::Value(value) => State::Present(value),
            EnumInput::Text(name) => State::Present(resolve_enumerator(&name)?),
            EnumInput::Column(column) => match column.into_option() {
                Some(name) => State::Present(resolve_enumerator(&name)?),
                None => State::Null,
            },
            EnumInput::Null => State::Null,
        };
        Ok(())
    }

    fn get_value(&self) -> T {
        self.state.value_or_default()
    }

    fn get_ptr(&self) -> Option<&T> {
        self.state.as_ref()
    }

    fn is_set(&self) -> bool {
        self.state.is_set()
    }

    fn is_null(&self) -> bool {
        self.state.is_null()
    }

    fn to_column(&self) -> Column<String> {
        match self.state.as_ref() {
            Some(value) => Column::present(value.name().to_string()),
            None => Column::null(),
        }
    }
}

impl<T: Enumeration + ToWire> ToWire for Enum<T> {
    type Wire = T::Wire;

    fn to_wire(&self) -> Option<T::Wire> {
        self.state.as_ref().and_then(ToWire::to_wire)
    }
}

impl<T: Enumeration> From<T> for Enum<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> From<Null> for EnumInput<T> {
    fn from(_: Null) -> Self {
        EnumInput::Null
    }
}

impl<T> From<Option<T>> for EnumInput<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(EnumInput::Null, EnumInput::Value)
    }
}

impl<T> From<&str> for EnumInput<T> {
    fn from(name: &str) -> Self {
        EnumInput::Text(name.to_string())
    }
}

impl<T> From<String> for EnumInput<T> {
    fn from(name: String) -> Self {
        EnumInput::Text(name)
    }
}

impl<T> From<Column<String>> for EnumInput<T> {
    fn from(column: Column<String>) -> Self {
        EnumInput::Column(column)
    }
}

impl<T: Enumeration> Serialize for Enum<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.state.as_ref() {
            Some(value) => serializer.serialize_str(value.name()),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Enumeration> Deserialize<'de> for Enum<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = Enum::default();
        value
            .set(Option::<String>::deserialize(deserializer)?.map_or(EnumInput::Null, EnumInput::Text))
            .map_err(serde::de::Error::custom)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    enum Status {
        #[default]
        Unknown,
        Draft,
        Published,
    }

    impl Enumeration for Status {
        fn catalogue() -> &'static [Self] {
            &[Status::Unknown, Status::Draft, Status::Published]
        }

        fn name(&self) -> &str {
            match self {
                Status::Unknown => "",
                Status::Draft => "DRAFT",
                Status::Published => "PUBLISHED",
            }
        }
    }

    #[test]
    fn resolution_is_case_insensitive() {
        for text in ["published", "PUBLISHED", "Published"] {
            let mut e = Enum::<Status>::default();
            e.set(text).unwrap();
            assert_eq!(e.get_value(), Status::Published);
        }
    }

    #[test]
    fn unknown_name_keeps_prior_state() {
        let mut e = Enum::new(Status::Draft);
        let err = e.set("archived").unwrap_err();
        assert_eq!(
            err,
            ValueError::UnknownEnumerator {
                name: "archived".into()
            }
        );
        assert_eq!(e.get_ptr(), Some(&Status::Draft));

        let mut null = Enum::<Status>::null();
        assert!(null.set("archived").is_err());
        assert!(null.is_null());
    }

    #[test]
    fn native_and_optional_inputs() {
        let mut e = Enum::<Status>::default();
        e.set(EnumInput::Value(Status::Draft)).unwrap();
        assert_eq!(e.name(), "DRAFT");
        e.set(None::<Status>).unwrap();
        assert!(e.is_null());
        assert_eq!(e.get_value(), Status::Unknown);
        assert_eq!(e.name(), "");
        e.set(Some(Status::Published)).unwrap();
        assert_eq!(e.get_ptr(), Some(&Status::Published));
    }

    #[test]
    fn column_binding_uses_names() {
        let mut e = Enum::<Status>::default();
        e.set(Column::present("draft".to_string())).unwrap();
        assert_eq!(e.to_column(), Column::present("DRAFT".to_string()));
        e.set(Column::<String>::null()).unwrap();
        assert!(e.is_null());
        assert_eq!(e.to_column(), Column::null());
        assert!(e.set(Column::present("gone".to_string())).is_err());
        assert!(e.is_null());
    }

    #[test]
    fn document_encoding() {
        let e = Enum::new(Status::Published);
        assert_eq!(serde_json::to_string(&e).unwrap(), "\"PUBLISHED\"");
        let back: Enum<Status> = serde_json::from_str("\"published\"").unwrap();
        assert_eq!(back, e);
        assert!(serde_json::from_str::<Enum<Status>>("null").unwrap().is_null());
        assert!(serde_json::from_str::<Enum<Status>>("\"nope\"").is_err());
    }
}
