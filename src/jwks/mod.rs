//! JSON Web Key Set (JWKS) module
pub(crate) mod jwk;

use crate::error::KeyLookupError;
use crate::jwks::jwk::Jwk;
use miniserde::Deserialize;

/// JSON Web Key Set (JWKS)
///
/// Keys keep the order they were published in. Several entries may share a
/// key ID; lookups resolve to the first one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeySet {
    /// The keys in the set
    pub keys: Vec<Jwk>,
}

impl KeySet {
    /// Create a key set from keys in publication order
    pub fn new(keys: Vec<Jwk>) -> Self {
        Self { keys }
    }

    /// Parse a JWKS document (`{"keys": [...]}`)
    pub fn from_json(json: &str) -> Result<Self, KeyLookupError> {
        miniserde::json::from_str(json)
            .map_err(|_| KeyLookupError::InvalidDocument("key set is not a JWKS document".into()))
    }

    /// Find the first key whose `kid` equals `key_id`
    ///
    /// Returns an owned copy; `None` when nothing matches. Callers that want
    /// the zero-value descriptor use `unwrap_or_default()`.
    pub fn lookup(&self, key_id: &str) -> Option<Jwk> {
        let mut matches = self
            .keys
            .iter()
            .filter(|k| k.key_id.as_deref() == Some(key_id));

        let first = matches.next()?;
        let duplicates = matches.count();
        if duplicates > 0 {
            tracing::warn!(
                kid = key_id,
                count = duplicates + 1,
                "jwks: multiple keys share kid, using the first"
            );
        }

        Some(first.clone())
    }
}
