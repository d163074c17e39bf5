//! Shared domain records built on the tri-state wrappers.
//!
//! - entity headers (`Entity`, `DeletableEntity`, `UnmodifiedEntity`)
//! - closed text enumerations used across services
//! - pagination and sort parameters with their wire mappers

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod entity;
mod enums;
mod pagination;
pub mod proto;

pub use entity::{DeletableEntity, Entity, UnmodifiedEntity};
pub use enums::{MoveDirection, PublicationStatus, StorageType};
pub use pagination::{Pagination, Sort, DEFAULT_LIMIT};
