//! Catalog credential handling
//!
//! The catalog password is held as a [`SecretString`]: zeroed on drop,
//! redacted in `Debug` output and therefore in tracing fields. The plain
//! text is only reachable through `expose_secret()`, which the HTTP client
//! calls once to build the Basic auth header.

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Password text wrapped for [`Secret`]
///
/// Deliberately has no `Display` impl; read it with [`SecretValue::as_str`].
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl SecretValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretValue)
    }
}

// Needed because `StewardConfig` derives `Serialize`
impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Catalog password as stored in [`CatalogConfig`](super::CatalogConfig)
pub type SecretString = Secret<SecretValue>;

/// Protect a password read from the environment or a test fixture
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue(value))
}
