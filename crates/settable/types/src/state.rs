//! The three-state cell shared by every wrapper, plus the column binding.

use serde::{Deserialize, Serialize};

/// Explicit "no value" marker accepted by every `set`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Null;

/// Unset, explicitly null, or holding a concrete value.
///
/// `Unset` and `Null` are both "absent" for reads and for every outbound
/// binding; only `is_set` tells them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State<T> {
    Unset,
    Null,
    Present(T),
}

impl<T> Default for State<T> {
    fn default() -> Self {
        State::Unset
    }
}

impl<T> State<T> {
    #[inline]
    pub const fn is_set(&self) -> bool {
        !matches!(self, State::Unset)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, State::Null)
    }

    #[inline]
    pub const fn is_present(&self) -> bool {
        matches!(self, State::Present(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            State::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            State::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            State::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> State<U> {
        match self {
            State::Unset => State::Unset,
            State::Null => State::Null,
            State::Present(value) => State::Present(f(value)),
        }
    }

    /// `None` becomes `Null`, never `Unset`: an optional input is still a decision.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => State::Present(value),
            None => State::Null,
        }
    }
}

impl<T: Clone + Default> State<T> {
    /// The held value, or `T::default()` for `Unset` and `Null`.
    pub fn value_or_default(&self) -> T {
        self.as_ref().cloned().unwrap_or_default()
    }

    pub fn to_column(&self) -> Column<T> {
        match self {
            State::Present(value) => Column::present(value.clone()),
            _ => Column::null(),
        }
    }
}

impl<T> From<Option<T>> for State<T> {
    fn from(value: Option<T>) -> Self {
        State::from_option(value)
    }
}

impl<T: Serialize> Serialize for State<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            State::Present(value) => value.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for State<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(State::from_option)
    }
}

/// A nullable relational column: the value plus a validity flag.
///
/// An invalid binding is SQL `NULL`; its `value` is the type's default and
/// carries no meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Column<T> {
    pub value: T,
    pub valid: bool,
}

impl<T> Column<T> {
    pub fn present(value: T) -> Self {
        Self { value, valid: true }
    }

    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }

    pub fn as_option(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Column<U> {
        Column {
            value: f(self.value),
            valid: self.valid,
        }
    }
}

impl<T: Default> Column<T> {
    pub fn null() -> Self {
        Self {
            value: T::default(),
            valid: false,
        }
    }
}

impl<T: Default> From<Option<T>> for Column<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Column::present(value),
            None => Column::null(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unset() {
        let state: State<i64> = State::default();
        assert!(!state.is_set());
        assert!(!state.is_null());
        assert_eq!(state.value_or_default(), 0);
    }

    #[test]
    fn none_maps_to_null() {
        let state: State<bool> = None.into();
        assert!(state.is_set());
        assert!(state.is_null());
        assert_eq!(state.as_ref(), None);
    }

    #[test]
    fn present_flags() {
        let state = State::Present(7_i64);
        assert!(state.is_set());
        assert!(!state.is_null());
        assert_eq!(state.as_ref(), Some(&7));
    }

    #[test]
    fn unset_and_null_bind_as_sql_null() {
        assert_eq!(State::<i64>::Unset.to_column(), Column::null());
        assert_eq!(State::<i64>::Null.to_column(), Column::null());
        assert_eq!(State::Present(3_i64).to_column(), Column::present(3));
    }

    #[test]
    fn column_option_conversions() {
        assert_eq!(Column::present("a").into_option(), Some("a"));
        assert_eq!(Column::<String>::null().into_option(), None);
        assert_eq!(Column::from(Some(5_i64)), Column::present(5));
        assert!(!Column::<i64>::from(None).valid);
    }

    #[test]
    fn document_encoding_of_absent_states_is_null() {
        assert_eq!(serde_json::to_string(&State::<i64>::Unset).unwrap(), "null");
        assert_eq!(serde_json::to_string(&State::<i64>::Null).unwrap(), "null");
        assert_eq!(serde_json::to_string(&State::Present(4_i64)).unwrap(), "4");
    }

    #[test]
    fn document_decoding() {
        let null: State<i64> = serde_json::from_str("null").unwrap();
        assert_eq!(null, State::Null);
        let present: State<i64> = serde_json::from_str("42").unwrap();
        assert_eq!(present, State::Present(42));
    }
}
