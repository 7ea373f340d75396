//! Domain identifier types with validation
//!
//! Newtype wrappers for catalog resource identifiers. The catalog issues
//! UUIDs, but identifiers are treated as opaque non-blank strings so that
//! fixtures and other catalog flavours work unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new ", $label, " ID, rejecting blank input")]
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(concat!($label, " ID cannot be empty").to_string());
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes self and returns the inner String
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

catalog_id!(
    /// Community identifier
    ///
    /// ```
    /// use steward::domain::ids::CommunityId;
    /// use std::str::FromStr;
    ///
    /// let id = CommunityId::from_str("8a1c7c0e-2c5f-4b7e-9d0a-6f0b5e1d2c3a").unwrap();
    /// assert_eq!(id.as_str(), "8a1c7c0e-2c5f-4b7e-9d0a-6f0b5e1d2c3a");
    /// ```
    CommunityId,
    "Community"
);

catalog_id!(
    /// Domain identifier
    DomainId,
    "Domain"
);

catalog_id!(
    /// Asset identifier
    AssetId,
    "Asset"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_community_id_valid() {
        let id = CommunityId::new("c-1").unwrap();
        assert_eq!(id.as_str(), "c-1");
        assert_eq!(id.to_string(), "c-1");
    }

    #[test]
    fn test_blank_ids_rejected() {
        assert!(CommunityId::new("").is_err());
        assert!(DomainId::new("   ").is_err());
        let err = AssetId::new("").unwrap_err();
        assert_eq!(err, "Asset ID cannot be empty");
    }

    #[test]
    fn test_id_from_str() {
        let id = DomainId::from_str("d-42").unwrap();
        assert_eq!(id.into_inner(), "d-42");
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = AssetId::new("a-7").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"a-7\"");

        let parsed: AssetId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_deserialize_rejects_blank() {
        let result = serde_json::from_str::<CommunityId>("\"\"");
        assert!(result.is_err());
    }
}
