//! Type-safe identifier wrappers around the scanner's integer keys.
//!
//! Every catalog-backed entity is referenced by a small integer id coming
//! straight out of the scanner database. Wrapping them prevents mixing a
//! pokemon id with an item id at compile time.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around an unsigned integer with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Wrap a raw id.
            pub const fn new(id: $inner) -> Self {
                Self(id)
            }

            /// Return the inner integer value.
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// National dex number of a pokemon species.
    PokemonId(u16)
}

define_id! {
    /// Identifier of an in-game item (quest reward catalog).
    ItemId(u16)
}
