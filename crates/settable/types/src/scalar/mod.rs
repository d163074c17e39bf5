//! Tri-state scalar wrappers.

use crate::state::{Column, Null};

/// Input shapes accepted by the scalar wrappers.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarInput<T> {
    /// The native value.
    Value(T),
    /// A textual form, parsed with the kind's rules.
    Text(String),
    /// A column binding; invalid means null.
    Column(Column<T>),
    /// Explicit null.
    Null,
}

impl<T> From<Null> for ScalarInput<T> {
    fn from(_: Null) -> Self {
        ScalarInput::Null
    }
}

impl<T> From<Column<T>> for ScalarInput<T> {
    fn from(column: Column<T>) -> Self {
        ScalarInput::Column(column)
    }
}

impl<T> From<Option<T>> for ScalarInput<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => ScalarInput::Value(value),
            None => ScalarInput::Null,
        }
    }
}

/// Text inputs shared by every scalar whose text needs parsing.
macro_rules! text_inputs {
    ($native:ty) => {
        impl From<&str> for $crate::scalar::ScalarInput<$native> {
            fn from(text: &str) -> Self {
                $crate::scalar::ScalarInput::Text(text.to_string())
            }
        }

        impl From<String> for $crate::scalar::ScalarInput<$native> {
            fn from(text: String) -> Self {
                $crate::scalar::ScalarInput::Text(text)
            }
        }

        impl From<Option<&str>> for $crate::scalar::ScalarInput<$native> {
            fn from(text: Option<&str>) -> Self {
                match text {
                    Some(text) => $crate::scalar::ScalarInput::Text(text.to_string()),
                    None => $crate::scalar::ScalarInput::Null,
                }
            }
        }
    };
}

/// The conversion contract for a scalar wrapper around `State<$native>`.
///
/// `$parse` turns the textual form into the native value.
macro_rules! scalar_settable {
    ($wrapper:ident, $native:ty, $parse:path) => {
        impl $wrapper {
            /// A present value.
            pub fn new(value: $native) -> Self {
                Self {
                    state: $crate::state::State::Present(value),
                }
            }

            /// A value explicitly set to null.
            pub fn null() -> Self {
                Self {
                    state: $crate::state::State::Null,
                }
            }

            pub fn is_unset(&self) -> bool {
                !self.state.is_set()
            }

            pub fn state(&self) -> &$crate::state::State<$native> {
                &self.state
            }
        }

        impl From<$native> for $wrapper {
            fn from(value: $native) -> Self {
                Self::new(value)
            }
        }

        impl From<$native> for $crate::scalar::ScalarInput<$native> {
            fn from(value: $native) -> Self {
                $crate::scalar::ScalarInput::Value(value)
            }
        }

        impl $crate::settable::Settable for $wrapper {
            type Value = $native;
            type Input = $crate::scalar::ScalarInput<$native>;
            type Bind = $native;

            fn set<I: Into<Self::Input>>(&mut self, input: I) -> $crate::error::ValueResult<()> {
                self.state = match input.into() {
                    $crate::scalar::ScalarInput::Value(value) => $crate::state::State::Present(value),
                    $crate::scalar::ScalarInput::Text(text) => {
                        $crate::state::State::Present($parse(text)?)
                    }
                    $crate::scalar::ScalarInput::Column(column) => {
                        $crate::state::State::from_option(column.into_option())
                    }
                    $crate::scalar::ScalarInput::Null => $crate::state::State::Null,
                };
                Ok(())
            }

            fn get_value(&self) -> $native {
                self.state.value_or_default()
            }

            fn get_ptr(&self) -> Option<&$native> {
                self.state.as_ref()
            }

            fn is_set(&self) -> bool {
                self.state.is_set()
            }

            fn is_null(&self) -> bool {
                self.state.is_null()
            }

            fn to_column(&self) -> $crate::state::Column<$native> {
                self.state.to_column()
            }
        }

        impl $crate::settable::ToWire for $wrapper {
            type Wire = <$native as $crate::settable::ToWire>::Wire;

            fn to_wire(&self) -> Option<Self::Wire> {
                self.state
                    .as_ref()
                    .and_then($crate::settable::ToWire::to_wire)
            }
        }
    };
}

mod boolean;
mod id;
mod int;
mod string;
mod timestamp;

pub use boolean::Bool;
pub use id::Id;
pub use int::Int;
pub use string::Str;
pub use timestamp::{Timestamp, TimestampInput};
