//! Tri-state ordered container.
//!
//! `Slice<T>` owns its backing `Vec<T>`. Wire conversion is element-wise and
//! all-or-nothing: one element without an envelope makes the whole sequence
//! absent.

use crate::composite::{JsonCodec, Struct};
use crate::document::Json;
use crate::error::{ValueError, ValueResult};
use crate::settable::{Settable, ToWire};
use crate::state::{Column, Null, State};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tri-state sequence of `T`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slice<T> {
    state: State<Vec<T>>,
}

pub type Bools = Slice<bool>;
pub type Ints = Slice<i64>;
pub type Strings = Slice<String>;
pub type Ids = Slice<Uuid>;
pub type Timestamps = Slice<DateTime<Utc>>;
pub type Jsons = Slice<Json>;
pub type Structs<T, C = JsonCodec> = Slice<Struct<T, C>>;

/// Input shapes accepted by [`Slice`].
#[derive(Clone, Debug, PartialEq)]
pub enum SliceInput<T> {
    /// Replaces the whole contents.
    Items(Vec<T>),
    /// Array column with a validity flag.
    Column(Column<Vec<T>>),
    Null,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self { state: State::Unset }
    }
}

impl<T> Slice<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            state: State::Present(items),
        }
    }

    pub fn null() -> Self {
        Self { state: State::Null }
    }

    pub fn is_unset(&self) -> bool {
        !self.state.is_set()
    }

    pub fn state(&self) -> &State<Vec<T>> {
        &self.state
    }

    /// Append `items` in order. The container is present afterwards; a
    /// null or unset container holds exactly the appended items.
    pub fn append(&mut self, items: impl IntoIterator<Item = T>) {
        let before = self.len();
        match &mut self.state {
            State::Present(existing) => existing.extend(items),
            other => *other = State::Present(items.into_iter().collect()),
        }
        tracing::trace!(kind = "slice", before, after = self.len(), "appended");
    }

    pub fn push(&mut self, item: T) {
        self.append(std::iter::once(item));
    }

    /// Number of held elements; zero when unset or null.
    pub fn len(&self) -> usize {
        self.state.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items().iter()
    }

    /// The held elements; empty when unset or null.
    pub fn items(&self) -> &[T] {
        self.state.as_ref().map(Vec::as_slice).unwrap_or_default()
    }

    /// Element-wise transform. Unset and null carry over unchanged.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Slice<U> {
        Slice {
            state: match &self.state {
                State::Unset => State::Unset,
                State::Null => State::Null,
                State::Present(items) => State::Present(items.iter().map(f).collect()),
            },
        }
    }
}

impl<T: DeserializeOwned> Slice<T> {
    /// Assign from a dynamically typed document value: an array replaces the
    /// contents, `null` clears them, any other shape is a type mismatch.
    pub fn set_document(&mut self, value: &serde_json::Value) -> ValueResult<()> {
        self.state = match value {
            serde_json::Value::Null => State::Null,
            serde_json::Value::Array(_) => {
                let items = Vec::<T>::deserialize(value).map_err(|e| {
                    tracing::debug!(kind = "slice", error = %e, "rejected element");
                    ValueError::format("sequence", e)
                })?;
                State::Present(items)
            }
            other => {
                tracing::debug!(kind = "slice", found = json_kind(other), "rejected input shape");
                return Err(ValueError::type_mismatch("array", json_kind(other)));
            }
        };
        Ok(())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl<T: Clone> Settable for Slice<T> {
    type Value = Vec<T>;
    type Input = SliceInput<T>;
    type Bind = Vec<T>;

    fn set<I: Into<SliceInput<T>>>(&mut self, input: I) -> ValueResult<()> {
        self.state = match input.into() {
            SliceInput::Items(items) => State::Present(items),
            SliceInput::Column(column) => State::from_option(column.into_option()),
            SliceInput::Null => State::Null,
        };
        Ok(())
    }

    fn get_value(&self) -> Vec<T> {
        self.items().to_vec()
    }

    fn get_ptr(&self) -> Option<&Vec<T>> {
        self.state.as_ref()
    }

    fn is_set(&self) -> bool {
        self.state.is_set()
    }

    fn is_null(&self) -> bool {
        self.state.is_null()
    }

    fn to_column(&self) -> Column<Vec<T>> {
        match self.state.as_ref() {
            Some(items) => Column::present(items.clone()),
            None => Column::null(),
        }
    }
}

impl<T: ToWire> ToWire for Slice<T> {
    type Wire = Vec<T::Wire>;

    fn to_wire(&self) -> Option<Vec<T::Wire>> {
        self.state.as_ref()?.iter().map(ToWire::to_wire).collect()
    }
}

impl<T> From<Vec<T>> for Slice<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for Slice<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for Slice<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.append(iter);
    }
}

impl<'a, T> IntoIterator for &'a Slice<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> From<Vec<T>> for SliceInput<T> {
    fn from(items: Vec<T>) -> Self {
        SliceInput::Items(items)
    }
}

impl<T> From<Option<Vec<T>>> for SliceInput<T> {
    fn from(items: Option<Vec<T>>) -> Self {
        items.map_or(SliceInput::Null, SliceInput::Items)
    }
}

impl<T> From<Column<Vec<T>>> for SliceInput<T> {
    fn from(column: Column<Vec<T>>) -> Self {
        SliceInput::Column(column)
    }
}

impl<T> From<Null> for SliceInput<T> {
    fn from(_: Null) -> Self {
        SliceInput::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::Int;
    use crate::wire::Int64Value;
    use serde_json::json;

    #[test]
    fn append_on_unset_initializes() {
        let mut ints = Ints::default();
        assert!(ints.is_unset());
        ints.append([1, 2]);
        ints.push(3);
        assert_eq!(ints.get_ptr(), Some(&vec![1, 2, 3]));
        assert!(ints.is_set());
        assert!(!ints.is_null());
    }

    #[test]
    fn append_on_null_keeps_only_new_items() {
        let mut ints = Ints::null();
        ints.append(vec![7]);
        assert!(!ints.is_null());
        assert_eq!(ints.items(), &[7]);
    }

    #[test]
    fn append_extends_present() {
        let mut strings = Strings::new(vec!["a".into()]);
        strings.extend(["b".to_string(), "c".to_string()]);
        assert_eq!(strings.get_value(), vec!["a", "b", "c"]);
        assert_eq!(strings.len(), 3);
    }

    #[test]
    fn set_replaces_and_null_clears() {
        let mut ints = Ints::new(vec![1, 2, 3]);
        ints.set(vec![9]).unwrap();
        assert_eq!(ints.items(), &[9]);
        ints.set(None::<Vec<i64>>).unwrap();
        assert!(ints.is_null());
        assert!(ints.is_empty());
        assert_eq!(ints.get_value(), Vec::<i64>::new());
        assert_eq!(ints.get_ptr(), None);
    }

    #[test]
    fn column_binding() {
        let mut ints = Ints::default();
        assert_eq!(ints.to_column(), Column::null());
        ints.set(Column::present(vec![4, 5])).unwrap();
        assert_eq!(ints.to_column(), Column::present(vec![4, 5]));
        ints.set(Column::<Vec<i64>>::null()).unwrap();
        assert!(ints.is_null());
    }

    #[test]
    fn set_document_shapes() {
        let mut strings = Strings::default();
        strings.set_document(&json!(["x", "y"])).unwrap();
        assert_eq!(strings.items(), &["x".to_string(), "y".to_string()]);

        let err = strings.set_document(&json!({"x": 1})).unwrap_err();
        assert_eq!(
            err,
            ValueError::TypeMismatch {
                expected: "array",
                found: "object".into()
            }
        );
        assert_eq!(strings.len(), 2);

        assert!(strings.set_document(&json!([1, 2])).unwrap_err().is_format());
        assert_eq!(strings.len(), 2);

        strings.set_document(&serde_json::Value::Null).unwrap();
        assert!(strings.is_null());
    }

    #[test]
    fn wire_conversion_is_all_or_nothing() {
        let ints = Ints::new(vec![1, 2]);
        assert_eq!(
            ints.to_wire(),
            Some(vec![Int64Value { value: 1 }, Int64Value { value: 2 }])
        );
        assert_eq!(Ints::null().to_wire(), None);
        assert_eq!(Ints::new(vec![]).to_wire(), Some(vec![]));

        let wrapped = Slice::new(vec![Int::new(1), Int::null()]);
        assert_eq!(wrapped.to_wire(), None);
        let wrapped = Slice::new(vec![Int::new(1), Int::new(5)]);
        assert_eq!(wrapped.to_wire().map(|w| w.len()), Some(2));
    }

    #[test]
    fn map_preserves_state() {
        let ints = Ints::new(vec![1, 2]);
        let doubled = ints.map(|n| n * 2);
        assert_eq!(doubled.items(), &[2, 4]);
        assert!(Ints::null().map(|n| n + 1).is_null());
        assert!(Ints::default().map(|n| n + 1).is_unset());
    }

    #[test]
    fn document_encoding() {
        let ints = Ints::new(vec![1, 2]);
        assert_eq!(serde_json::to_string(&ints).unwrap(), "[1,2]");
        assert_eq!(serde_json::to_string(&Ints::null()).unwrap(), "null");
        let back: Ints = serde_json::from_str("[3]").unwrap();
        assert_eq!(back.items(), &[3]);
        assert!(serde_json::from_str::<Ints>("null").unwrap().is_null());
    }
}
