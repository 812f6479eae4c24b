//! Object-key generation.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::TryRngCore;

use vodly_models::AspectClass;

use crate::error::{StorageError, StorageResult};

/// Random bytes per key; 32 bytes encode to 43 base64 characters.
const KEY_RANDOM_BYTES: usize = 32;

/// A storage key of the form `<class>/<random>.mp4`.
///
/// The random component is drawn from the OS entropy source, so keys never
/// repeat across uploads in any practical sense. Keys are namespaced by
/// aspect class to keep landscape/portrait/other content separable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Generate a fresh key under the given aspect-class prefix.
    pub fn generate(class: AspectClass) -> StorageResult<Self> {
        let mut raw = [0u8; KEY_RANDOM_BYTES];
        OsRng
            .try_fill_bytes(&mut raw)
            .map_err(|e| StorageError::Entropy(e.to_string()))?;

        let encoded = URL_SAFE_NO_PAD.encode(raw);
        Ok(Self(format!("{}/{}.mp4", class, encoded)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
