//! Wire messages for the shared request parameters.

use settable_types::{Enumeration, ToWire};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Pagination {
    #[prost(int64, optional, tag = "1")]
    pub skip: ::core::option::Option<i64>,
    #[prost(int64, optional, tag = "2")]
    pub limit: ::core::option::Option<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Sort {
    #[prost(string, optional, tag = "1")]
    pub field: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bool, optional, tag = "2")]
    pub reverse: ::core::option::Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum PublicationStatus {
    Unspecified = 0,
    Draft = 1,
    Published = 2,
    Unpublished = 3,
}

impl PublicationStatus {
    /// Name as declared in the protocol definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            PublicationStatus::Unspecified => "UNSPECIFIED",
            PublicationStatus::Draft => "DRAFT",
            PublicationStatus::Published => "PUBLISHED",
            PublicationStatus::Unpublished => "UNPUBLISHED",
        }
    }

    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "UNSPECIFIED" => Some(Self::Unspecified),
            "DRAFT" => Some(Self::Draft),
            "PUBLISHED" => Some(Self::Published),
            "UNPUBLISHED" => Some(Self::Unpublished),
            _ => None,
        }
    }
}

impl Enumeration for PublicationStatus {
    fn catalogue() -> &'static [Self] {
        &[
            PublicationStatus::Unspecified,
            PublicationStatus::Draft,
            PublicationStatus::Published,
            PublicationStatus::Unpublished,
        ]
    }

    fn name(&self) -> &str {
        self.as_str_name()
    }

    /// Declared names are upper case; the input is upper-cased first.
    fn resolve(name: &str) -> Option<Self> {
        Self::from_str_name(&name.to_ascii_uppercase())
    }
}

impl ToWire for PublicationStatus {
    type Wire = i32;

    fn to_wire(&self) -> Option<i32> {
        Some(*self as i32)
    }
}

impl From<crate::PublicationStatus> for PublicationStatus {
    fn from(value: crate::PublicationStatus) -> Self {
        match value {
            crate::PublicationStatus::Unknown => PublicationStatus::Unspecified,
            crate::PublicationStatus::Draft => PublicationStatus::Draft,
            crate::PublicationStatus::Published => PublicationStatus::Published,
            crate::PublicationStatus::Unpublished => PublicationStatus::Unpublished,
        }
    }
}

impl From<PublicationStatus> for crate::PublicationStatus {
    fn from(value: PublicationStatus) -> Self {
        match value {
            PublicationStatus::Unspecified => crate::PublicationStatus::Unknown,
            PublicationStatus::Draft => crate::PublicationStatus::Draft,
            PublicationStatus::Published => crate::PublicationStatus::Published,
            PublicationStatus::Unpublished => crate::PublicationStatus::Unpublished,
        }
    }
}
