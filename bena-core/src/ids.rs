//! Identifier newtypes for places and users.
//!
//! Both identifiers are opaque strings (the upstream tables use UUIDs). The
//! newtypes keep place and user identifiers from being mixed up at call sites.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier of a [`Place`](crate::Place) within a snapshot.
///
/// # Examples
/// ```
/// use bena_core::PlaceId;
///
/// let id = PlaceId::from("P1");
/// assert_eq!(id.as_str(), "P1");
/// assert_eq!(id.to_string(), "P1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlaceId(String);

/// Identifier of the user owning bookmarks and interactions.
///
/// # Examples
/// ```
/// use bena_core::UserId;
///
/// let user = UserId::new("U1");
/// assert_eq!(user.as_str(), "U1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UserId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            /// Wrap a raw identifier.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Borrow the raw identifier.
            #[must_use]
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
            fn from(raw: &str) -> Self {
                Self(raw.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

string_id!(PlaceId);
string_id!(UserId);
