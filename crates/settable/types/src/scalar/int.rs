use crate::error::{ValueError, ValueResult};
use crate::scalar::ScalarInput;
use crate::state::{Column, State};
use serde::{Deserialize, Serialize};

/// Tri-state 64-bit signed integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Int {
    state: State<i64>,
}

text_inputs!(i64);
scalar_settable!(Int, i64, parse_int);

impl From<i32> for ScalarInput<i64> {
    fn from(value: i32) -> Self {
        ScalarInput::Value(i64::from(value))
    }
}

/// 32-bit integer columns widen into the 64-bit value.
impl From<Column<i32>> for ScalarInput<i64> {
    fn from(column: Column<i32>) -> Self {
        ScalarInput::Column(column.map(i64::from))
    }
}

/// Decimal text. An empty string is present zero, not unset.
fn parse_int(text: String) -> ValueResult<i64> {
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<i64>().map_err(|e| {
        tracing::debug!(kind = "int", input = %text, error = %e, "rejected textual input");
        ValueError::format("int", format!("{text:?}: {e}"))
    })
}
