//! Typed identifiers and references between collections.
//!
//! Every record is keyed by a short opaque string. Wrapping each kind in its
//! own type keeps a trip id from being passed where a traveler id is expected,
//! while the wire form (and the `Display` output) stays the bare string.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a generated identifier.
pub(crate) const SHORT_ID_LEN: usize = 8;

/// Generates a newtype over `String` with the conversions every id needs.
macro_rules! string_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_key!(
    /// Identifier of a [`Trip`](crate::Trip).
    TripId
);
string_key!(
    /// Identifier of a [`Traveler`](crate::Traveler).
    TravelerId
);
string_key!(
    /// Identifier of a [`TripLeg`](crate::TripLeg).
    TripLegId
);
string_key!(
    /// Identifier of a [`User`](crate::User).
    UserId
);
string_key!(
    /// A user reference stored exactly as given.
    ///
    /// Unlike a trip leg's `trip_id`, this reference is never resolved when it
    /// is written, so it may point to a user that does not exist (or no longer
    /// exists). Resolve it with [`Engine::coordinator_of`](crate::Engine::coordinator_of).
    UserRef
);

impl UserRef {
    /// The id this reference points to, if it resolves.
    pub fn target(&self) -> UserId {
        UserId::new(self.0.clone())
    }
}

/// A fresh short identifier: the first characters of a random v4 UUID.
pub(crate) fn short_id() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SHORT_ID_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_ids_are_hex_and_short() {
        let id = short_id();
        assert_eq!(id.len(), SHORT_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_display_as_bare_strings() {
        let id = TripId::from("trip123");
        assert_eq!(id.to_string(), "trip123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"trip123\"");
    }

    #[test]
    fn user_ref_targets_user_id() {
        let coordinator = UserRef::from("admin1");
        assert_eq!(coordinator.target(), UserId::from("admin1"));
    }
}
