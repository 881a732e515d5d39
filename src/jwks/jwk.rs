//! JWK (JSON Web Key) struct

use crate::error::Result;
use crate::keys::RsaPublicKey;
use miniserde::Deserialize;

/// JSON Web Key (JWK) structure
///
/// Every member is kept as published. Nothing is decoded or checked until the
/// key is used for verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Jwk {
    /// Key type (e.g., "RSA")
    #[serde(rename = "kty")]
    pub key_type: Option<String>,
    /// Key use, "sig" or "enc"
    #[serde(rename = "use")]
    pub key_use: Option<String>,
    /// Key ID
    #[serde(rename = "kid")]
    pub key_id: Option<String>,
    /// Algorithm (advisory per RFC 7517)
    #[serde(rename = "alg")]
    pub algorithm: Option<String>,

    // ECDSA fields
    /// Elliptic curve name (e.g., "P-256")
    #[serde(rename = "crv")]
    pub curve: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    #[serde(rename = "d")]
    pub private_exponent: Option<String>,

    // RSA fields
    /// RSA modulus (Base64URL-encoded)
    #[serde(rename = "n")]
    pub modulus: Option<String>,
    /// RSA exponent (Base64URL-encoded)
    #[serde(rename = "e")]
    pub public_exponent: Option<String>,

    // Symmetric fields
    #[serde(rename = "k")]
    pub symmetric_key: Option<String>,
}

impl Jwk {
    /// RSA signing key with the given key ID and Base64URL `n` and `e`
    pub fn rsa(
        key_id: impl Into<String>,
        modulus: impl Into<String>,
        public_exponent: impl Into<String>,
    ) -> Self {
        Self {
            key_type: Some("RSA".into()),
            key_use: Some("sig".into()),
            key_id: Some(key_id.into()),
            modulus: Some(modulus.into()),
            public_exponent: Some(public_exponent.into()),
            ..Self::empty()
        }
    }

    /// Descriptor with no members set
    ///
    /// `Deserialize` also has an associated `default`, so `Jwk::default()`
    /// does not resolve.
    pub fn empty() -> Self {
        <Self as Default>::default()
    }

    /// Rebuild the RSA public key from `n` and `e`
    ///
    /// Absent members are read as empty text.
    pub fn to_rsa_public_key(&self) -> Result<RsaPublicKey> {
        RsaPublicKey::from_components(
            self.modulus.as_deref().unwrap_or_default(),
            self.public_exponent.as_deref().unwrap_or_default(),
        )
    }
}
