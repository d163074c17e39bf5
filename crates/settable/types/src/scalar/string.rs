use crate::error::ValueResult;
use crate::scalar::ScalarInput;
use crate::state::State;
use serde::{Deserialize, Serialize};

/// Tri-state string. Text is taken as-is.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Str {
    state: State<String>,
}

scalar_settable!(Str, String, accept_text);

impl Str {
    pub fn as_str(&self) -> &str {
        self.state.as_ref().map(String::as_str).unwrap_or_default()
    }
}

impl From<&str> for Str {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl From<&str> for ScalarInput<String> {
    fn from(text: &str) -> Self {
        ScalarInput::Value(text.to_string())
    }
}

impl From<Option<&str>> for ScalarInput<String> {
    fn from(text: Option<&str>) -> Self {
        text.map(str::to_string).into()
    }
}

fn accept_text(text: String) -> ValueResult<String> {
    Ok(text)
}
