//! Primary-key types for storefront entities.
//!
//! Keys are database-assigned `int4` serials. Each table gets its own
//! newtype so a city key can never be passed where a country key is due.

use super::EntityKey;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wraps a raw primary-key value.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Returns the raw primary-key value.
            #[must_use]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl EntityKey for $name {
            fn from_raw(raw: i32) -> Self {
                Self(raw)
            }

            fn raw(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Primary key of a `country` row.
    CountryId
);
entity_id!(
    /// Primary key of a `city` row.
    CityId
);
entity_id!(
    /// Primary key of an `address` row.
    AddressId
);
entity_id!(
    /// Primary key of a `customer` row.
    CustomerId
);
entity_id!(
    /// Primary key of a `staff` row.
    StaffId
);
entity_id!(
    /// Primary key of a `payment` row.
    PaymentId
);
