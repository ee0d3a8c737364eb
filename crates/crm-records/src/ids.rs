//! Sequential record identifiers.
//!
//! Ids are assigned in output order starting at 1, so they are stable for a
//! given seed and usable directly as foreign-key columns.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Id for the zero-based position `index` in its collection.
            pub fn from_index(index: usize) -> Self {
                Self(index as u32 + 1)
            }

            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of an [`Account`](crate::Account).
    AccountId
);
record_id!(
    /// Identifier of a [`Contact`](crate::Contact).
    ContactId
);
record_id!(
    /// Identifier of a [`Deal`](crate::Deal).
    DealId
);
record_id!(
    /// Identifier of an [`Activity`](crate::Activity).
    ActivityId
);
