//! Key supplier capability
//!
//! The validator fetches exactly one key per token through this trait, after
//! the token has passed its structural and algorithm checks.

use crate::error::{KeyLookupError, SupplierError};
use crate::jwks::KeySet;
use crate::jwks::jwk::Jwk;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by [`KeySupplier::get_key`]
pub type KeyFuture<'a> = Pin<Box<dyn Future<Output = Result<Jwk, SupplierError>> + Send + 'a>>;

/// Lookup of a signing key by key ID
///
/// Implementations own their retrieval policy (network, caching, timeouts).
pub trait KeySupplier: Send + Sync {
    fn get_key<'a>(&'a self, key_id: &'a str) -> KeyFuture<'a>;
}

impl KeySupplier for KeySet {
    fn get_key<'a>(&'a self, key_id: &'a str) -> KeyFuture<'a> {
        let found: Result<Jwk, SupplierError> = self
            .lookup(key_id)
            .ok_or_else(|| KeyLookupError::KeyNotFound(key_id.to_string()).into());
        Box::pin(std::future::ready(found))
    }
}

impl<T: KeySupplier + ?Sized> KeySupplier for Arc<T> {
    fn get_key<'a>(&'a self, key_id: &'a str) -> KeyFuture<'a> {
        (**self).get_key(key_id)
    }
}
