//! Bearer token validation for the module registry API.
//!
//! Access tokens are RS256/RS384/RS512 signed JWTs issued by an identity
//! provider that publishes its signing keys as a JWK set. A
//! [`TokenValidator`] checks, in order:
//!
//! 1. the token structure (three Base64URL segments, JSON header and payload)
//! 2. the signing algorithm
//! 3. the signing key, fetched by `kid` from a [`KeySupplier`]
//! 4. the signature, then `exp`, `nbf` and `iat`
//! 5. the issuer (exact match) and the audience (contained in `aud`)
//!
//! The first failing check determines the returned [`Error`]. Tokens that
//! fail structural or algorithm checks never reach the key supplier.
//!
//! # Example
//!
//! ```no_run
//! use registry_auth::{RemoteKeySupplier, TokenValidator, ValidatorConfig};
//!
//! # async fn example(authorization: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ValidatorConfig::from_env()?;
//! let supplier = RemoteKeySupplier::discover(reqwest::Client::new(), config.issuer()).await?;
//! let validator = TokenValidator::with_config(supplier, config);
//!
//! validator.validate_token(authorization).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `remote` (default): [`RemoteKeySupplier`], fetching keys over HTTP(S)
//! - `aws-lc-rs`: use `aws-lc-rs` instead of `ring` for signature verification

mod error;
mod jwks;

// Internal modules
pub(crate) mod algorithm;
pub(crate) mod claims;
pub(crate) mod config;
pub(crate) mod header;
pub(crate) mod keys;
pub(crate) mod supplier;
pub(crate) mod utils;
pub(crate) mod validator;

#[cfg(feature = "remote")]
pub(crate) mod discovery;
#[cfg(feature = "remote")]
pub(crate) mod limits;
#[cfg(feature = "remote")]
pub(crate) mod remote;

// Public Interface
pub use algorithm::AlgorithmType;
pub use claims::Claims;
pub use config::{AUDIENCE_ENV, ISSUER_ENV, ValidatorConfig};
pub use error::{
    ConfigError, Error, KeyLookupError, Result, SupplierError, VerificationError,
};
pub use jwks::KeySet;
pub use jwks::jwk::Jwk;
pub use keys::RsaPublicKey;
pub use supplier::{KeyFuture, KeySupplier};
pub use validator::TokenValidator;

#[cfg(feature = "remote")]
pub use remote::RemoteKeySupplier;

pub use miniserde::json::Value;
