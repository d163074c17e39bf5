//! Paging and ordering parameters and their wire mappers.

use crate::proto;
use serde::{Deserialize, Serialize};
use settable_types::{Bool, Int, Settable, Str};

/// Page size used when a request does not name one.
pub const DEFAULT_LIMIT: i64 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Int::is_unset")]
    pub skip: Int,
    #[serde(default, skip_serializing_if = "Int::is_unset")]
    pub limit: Int,
}

impl Pagination {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: Int::new(skip),
            limit: Int::new(limit),
        }
    }

    /// Unset fields go out as `0`; null fields are left off the message.
    pub fn to_proto(&self) -> proto::Pagination {
        proto::Pagination {
            skip: outbound(&self.skip),
            limit: outbound(&self.limit),
        }
    }

    /// Missing skip becomes `0`; a missing or zero limit becomes [`DEFAULT_LIMIT`].
    pub fn from_proto(value: Option<&proto::Pagination>) -> Self {
        let skip = value.and_then(|p| p.skip).unwrap_or(0);
        let limit = match value.and_then(|p| p.limit) {
            Some(0) => {
                tracing::trace!(default = DEFAULT_LIMIT, "zero page limit replaced by default");
                DEFAULT_LIMIT
            }
            Some(limit) => limit,
            None => DEFAULT_LIMIT,
        };
        Self::new(skip, limit)
    }
}

fn outbound(value: &Int) -> Option<i64> {
    if value.is_set() {
        value.get_ptr().copied()
    } else {
        Some(0)
    }
}

impl From<&Pagination> for proto::Pagination {
    fn from(value: &Pagination) -> Self {
        value.to_proto()
    }
}

impl From<&proto::Pagination> for Pagination {
    fn from(value: &proto::Pagination) -> Self {
        Pagination::from_proto(Some(value))
    }
}

/// Ordering by a named field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    #[serde(default, skip_serializing_if = "Str::is_unset")]
    pub field: Str,
    #[serde(default, skip_serializing_if = "Bool::is_unset")]
    pub is_reversed: Bool,
}

impl Sort {
    pub fn new(field: impl Into<String>, is_reversed: bool) -> Self {
        Self {
            field: Str::new(field.into()),
            is_reversed: Bool::new(is_reversed),
        }
    }

    /// Absent fields stay off the message.
    pub fn to_proto(&self) -> proto::Sort {
        proto::Sort {
            field: self.field.get_ptr().cloned(),
            reverse: self.is_reversed.get_ptr().copied(),
        }
    }

    /// Fields missing from the message stay unset.
    pub fn from_proto(value: Option<&proto::Sort>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        Self {
            field: value.field.clone().map(Str::new).unwrap_or_default(),
            is_reversed: value.reverse.map(Bool::new).unwrap_or_default(),
        }
    }
}

impl From<&Sort> for proto::Sort {
    fn from(value: &Sort) -> Self {
        value.to_proto()
    }
}

impl From<&proto::Sort> for Sort {
    fn from(value: &proto::Sort) -> Self {
        Sort::from_proto(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use settable_types::Null;

    #[test]
    fn inbound_defaults() {
        let page = Pagination::from_proto(None);
        assert_eq!(page, Pagination::new(0, DEFAULT_LIMIT));

        let page = Pagination::from_proto(Some(&proto::Pagination {
            skip: Some(20),
            limit: Some(0),
        }));
        assert_eq!(page.skip.get_value(), 20);
        assert_eq!(page.limit.get_value(), DEFAULT_LIMIT);

        let page = Pagination::from(&proto::Pagination {
            skip: None,
            limit: Some(5),
        });
        assert_eq!(page, Pagination::new(0, 5));
    }

    #[test]
    fn outbound_unset_is_zero_and_null_is_absent() {
        let mut page = Pagination::default();
        assert_eq!(
            page.to_proto(),
            proto::Pagination {
                skip: Some(0),
                limit: Some(0)
            }
        );

        page.skip.set(Null).unwrap();
        page.limit.set(50i64).unwrap();
        assert_eq!(
            proto::Pagination::from(&page),
            proto::Pagination {
                skip: None,
                limit: Some(50)
            }
        );
    }

    #[test]
    fn sort_round_trip() {
        let sort = Sort::new("created_at", true);
        let wire = sort.to_proto();
        assert_eq!(wire.field.as_deref(), Some("created_at"));
        assert_eq!(wire.reverse, Some(true));
        assert_eq!(Sort::from(&wire), sort);
    }

    #[test]
    fn sort_missing_fields_stay_unset() {
        let sort = Sort::from_proto(Some(&proto::Sort {
            field: None,
            reverse: Some(false),
        }));
        assert!(sort.field.is_unset());
        assert_eq!(sort.is_reversed.get_ptr(), Some(&false));
        assert_eq!(Sort::from_proto(None), Sort::default());
        assert_eq!(Sort::default().to_proto(), proto::Sort::default());
    }

    #[test]
    fn document_form_omits_unset_fields() {
        let sort = Sort {
            field: Str::new("name".into()),
            ..Sort::default()
        };
        assert_eq!(serde_json::to_string(&sort).unwrap(), r#"{"field":"name"}"#);
        let back: Sort = serde_json::from_str(r#"{"field":"name"}"#).unwrap();
        assert!(back.is_reversed.is_unset());
    }
}
