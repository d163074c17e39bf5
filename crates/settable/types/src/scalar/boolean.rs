use crate::error::{ValueError, ValueResult};
use crate::state::State;
use serde::{Deserialize, Serialize};

/// Tri-state boolean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bool {
    state: State<bool>,
}

text_inputs!(bool);
scalar_settable!(Bool, bool, parse_bool);

/// Accepts the spellings of the conventional boolean parser:
/// `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(text: String) -> ValueResult<bool> {
    match text.as_str() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => {
            tracing::debug!(kind = "bool", input = %text, "rejected textual input");
            Err(ValueError::format("bool", format!("cannot parse {text:?}")))
        }
    }
}
