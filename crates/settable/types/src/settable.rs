//! The conversion contract every wrapper implements.

use crate::error::ValueResult;
use crate::state::Column;

/// Uniform tri-state access shared by scalar, enumeration, document,
/// composite and container wrappers.
///
/// Invariants:
/// - `is_set()` is false only for a value that was never assigned.
/// - `is_null()` is true only after an explicit null assignment.
/// - `get_value()` returns the type's default for unset and null values.
/// - `get_ptr()` is `None` for unset and null values.
/// - a failing `set` leaves the previous state untouched.
pub trait Settable {
    /// The underlying value type.
    type Value;
    /// The closed set of input shapes `set` accepts.
    type Input;
    /// The value carried by the column binding.
    type Bind;

    fn set<I: Into<Self::Input>>(&mut self, input: I) -> ValueResult<()>;

    fn get_value(&self) -> Self::Value;

    fn get_ptr(&self) -> Option<&Self::Value>;

    fn is_set(&self) -> bool;

    fn is_null(&self) -> bool;

    /// Column binding; unset and null both bind as SQL `NULL`.
    fn to_column(&self) -> Column<Self::Bind>;
}

/// Conversion to a nullable wire envelope.
///
/// `None` means "no envelope present"; unset and null are indistinguishable
/// on the wire.
pub trait ToWire {
    type Wire;

    fn to_wire(&self) -> Option<Self::Wire>;
}
