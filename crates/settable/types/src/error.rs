use thiserror::Error;

/// Result type for tri-state value operations.
pub type ValueResult<T> = Result<T, ValueError>;

/// Local errors raised while assigning or decoding tri-state values.
///
/// None of these are transient: they describe malformed input or a read of a
/// value that was never provided. A failed `set` never changes the wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("invalid {kind} format: {message}")]
    Format { kind: &'static str, message: String },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("unknown enumerator: {name}")]
    UnknownEnumerator { name: String },

    #[error("cannot decode a null or unset value")]
    Absent,
}

impl ValueError {
    pub(crate) fn format(kind: &'static str, message: impl ToString) -> Self {
        ValueError::Format {
            kind,
            message: message.to_string(),
        }
    }

    pub(crate) fn type_mismatch(expected: &'static str, found: impl ToString) -> Self {
        ValueError::TypeMismatch {
            expected,
            found: found.to_string(),
        }
    }

    /// True for errors caused by malformed input syntax.
    pub fn is_format(&self) -> bool {
        matches!(self, ValueError::Format { .. })
    }

    /// True when the value being read was unset or null.
    pub fn is_absent(&self) -> bool {
        matches!(self, ValueError::Absent)
    }
}
