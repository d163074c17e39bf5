//! Closed text enumerations shared across services.
//!
//! Each has an `Unknown` variant with an empty name that acts as the default
//! and is never valid.

use settable_types::Enumeration;
use std::fmt;

macro_rules! text_enumeration {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            #[default]
            Unknown,
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::Unknown => "",
                    $($name::$variant => $text),+
                }
            }

            /// True for every variant except `Unknown`.
            pub fn is_valid(&self) -> bool {
                !matches!(self, $name::Unknown)
            }
        }

        impl Enumeration for $name {
            fn catalogue() -> &'static [Self] {
                &[$name::Unknown, $($name::$variant),+]
            }

            fn name(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enumeration! {
    /// Lifecycle of publishable content.
    PublicationStatus {
        Draft => "DRAFT",
        Published => "PUBLISHED",
        Unpublished => "UNPUBLISHED",
    }
}

text_enumeration! {
    /// Reordering instruction for positioned items.
    MoveDirection {
        Up => "UP",
        Down => "DOWN",
        Top => "TOP",
        Bottom => "BOTTOM",
    }
}

text_enumeration! {
    /// Backend holding stored objects.
    StorageType {
        S3 => "S3",
        Local => "LOCAL",
    }
}
