// src/domain/ids.rs
//
// Typed identifiers for every catalog entity kind.
//
// All ids are opaque strings assigned by the remote server, unique within
// one server; server ids are unique within the whole state. Entities
// reference each other by id only, never by embedded object, so the graph
// is rebuilt by lookup.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifies one remote media server within the state.
    ServerId
);
string_id!(LibraryId);
string_id!(CollectionId);
string_id!(ShowId);
string_id!(SeasonId);
string_id!(VideoId);
string_id!(PlaylistId);
