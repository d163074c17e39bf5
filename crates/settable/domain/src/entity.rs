//! Identity and audit timestamps shared by persisted records.

use serde::{Deserialize, Serialize};
use settable_types::{Bool, Id, Timestamp};

/// Identifier plus creation and modification times.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default, skip_serializing_if = "Id::is_unset")]
    pub id: Id,
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub updated_at: Timestamp,
}

impl Entity {
    /// Fresh identifier; both timestamps set to the same instant.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            id: Id::generate(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// [`Entity`] with a soft-delete flag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeletableEntity {
    #[serde(default, skip_serializing_if = "Id::is_unset")]
    pub id: Id,
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Bool::is_unset")]
    pub is_deleted: Bool,
}

impl DeletableEntity {
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            id: Id::generate(),
            created_at: now,
            updated_at: now,
            is_deleted: Bool::new(false),
        }
    }
}

/// Append-only record: no modification time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UnmodifiedEntity {
    #[serde(default, skip_serializing_if = "Id::is_unset")]
    pub id: Id,
    #[serde(default, skip_serializing_if = "Timestamp::is_unset")]
    pub created_at: Timestamp,
}

impl UnmodifiedEntity {
    pub fn new() -> Self {
        Self {
            id: Id::generate(),
            created_at: Timestamp::now(),
        }
    }
}
