use crate::error::{ValueError, ValueResult};
use crate::state::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tri-state UUID identifier.
///
/// `set` only checks syntax; the all-zero UUID is accepted. Call
/// [`Id::validate`] where a nil identifier must be refused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id {
    state: State<Uuid>,
}

text_inputs!(Uuid);
scalar_settable!(Id, Uuid, parse_id);

impl Id {
    /// A present, freshly generated random (v4) identifier.
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4())
    }

    /// Replace the current state with a freshly generated identifier.
    pub fn regenerate(&mut self) {
        self.state = State::Present(Uuid::new_v4());
    }

    /// Reject a present nil UUID. Unset and null values pass.
    pub fn validate(&self) -> ValueResult<()> {
        match self.state.as_ref() {
            Some(id) if id.is_nil() => Err(ValueError::format("uuid", "identifier must not be nil")),
            _ => Ok(()),
        }
    }
}

fn parse_id(text: String) -> ValueResult<Uuid> {
    Uuid::parse_str(&text).map_err(|e| {
        tracing::debug!(kind = "uuid", input = %text, error = %e, "rejected textual input");
        ValueError::format("uuid", e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settable::{Settable, ToWire};
    use crate::state::{Column, Null};

    const SAMPLE: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[test]
    fn parses_canonical_text() {
        let mut id = Id::default();
        id.set(SAMPLE).unwrap();
        assert_eq!(id.get_value(), Uuid::parse_str(SAMPLE).unwrap());
        assert_eq!(id.get_value().to_string(), SAMPLE);
    }

    #[test]
    fn malformed_text_keeps_prior_state() {
        let mut id = Id::default();
        id.set(SAMPLE).unwrap();
        let before = id;
        assert!(id.set("not-a-uuid").unwrap_err().is_format());
        assert_eq!(id, before);

        let mut unset = Id::default();
        assert!(unset.set("not-a-uuid").is_err());
        assert!(!unset.is_set());
    }

    #[test]
    fn nil_is_accepted_by_set_but_not_by_validate() {
        let mut id = Id::default();
        id.set("00000000-0000-0000-0000-000000000000").unwrap();
        assert!(id.get_ptr().is_some());
        assert!(id.validate().is_err());
        assert!(Id::generate().validate().is_ok());
        assert!(Id::null().validate().is_ok());
        assert!(Id::default().validate().is_ok());
    }

    #[test]
    fn absent_reads_are_nil() {
        assert_eq!(Id::default().get_value(), Uuid::nil());
        assert_eq!(Id::null().get_value(), Uuid::nil());
        assert_eq!(Id::null().get_ptr(), None);
    }

    #[test]
    fn regenerate_replaces_null() {
        let mut id = Id::null();
        id.regenerate();
        assert!(!id.is_null());
        assert!(!id.get_value().is_nil());
    }

    #[test]
    fn optional_text_and_column() {
        let mut id = Id::generate();
        id.set(None::<&str>).unwrap();
        assert!(id.is_null());
        let uuid = Uuid::new_v4();
        id.set(Column::present(uuid)).unwrap();
        assert_eq!(id.to_column(), Column::present(uuid));
        id.set(Null).unwrap();
        assert_eq!(id.to_column(), Column::null());
    }

    #[test]
    fn wire_is_string_envelope() {
        let id = Id::new(Uuid::parse_str(SAMPLE).unwrap());
        assert_eq!(id.to_wire().unwrap().value, SAMPLE);
        assert!(Id::null().to_wire().is_none());
    }

    #[test]
    fn document_encoding() {
        let id = Id::new(Uuid::parse_str(SAMPLE).unwrap());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{SAMPLE}\""));
        let back: Id = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<Id>("\"nope\"").is_err());
    }
}
