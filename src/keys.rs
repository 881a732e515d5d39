//! RSA public keys rebuilt from JWK material

use crate::algorithm::AlgorithmType;
use crate::error::{Error, Result, VerificationError};
use crate::utils::base64url;

// Select crypto backend based on features
#[cfg(feature = "aws-lc-rs")]
use aws_lc_rs::signature::RsaPublicKeyComponents;
#[cfg(not(feature = "aws-lc-rs"))]
use ring::signature::RsaPublicKeyComponents;

/// RSA public key
///
/// Built per validation from the Base64URL `n` and `e` members of a JWK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Big-endian modulus without leading zero bytes
    modulus: Vec<u8>,
    exponent: u32,
}

impl RsaPublicKey {
    /// Decode the Base64URL modulus and exponent
    ///
    /// An exponent shorter than four bytes is right-aligned before being
    /// read as a big-endian `u32`.
    pub fn from_components(modulus: &str, exponent: &str) -> Result<Self> {
        let exponent_bytes = base64url::decode_bytes(exponent)
            .map_err(|e| Error::MalformedKey(format!("exponent: {e}")))?;
        let modulus_bytes = base64url::decode_bytes(modulus)
            .map_err(|e| Error::MalformedKey(format!("modulus: {e}")))?;

        Ok(Self {
            modulus: strip_leading_zeros(&modulus_bytes).to_vec(),
            exponent: exponent_from_be_bytes(&exponent_bytes)?,
        })
    }

    /// Modulus as big-endian bytes
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        match self.modulus.first() {
            Some(first) => self.modulus.len() * 8 - first.leading_zeros() as usize,
            None => 0,
        }
    }

    /// Verify an RSASSA-PKCS1-v1_5 signature over `message`
    pub(crate) fn verify(
        &self,
        algorithm: AlgorithmType,
        message: &[u8],
        signature: &[u8],
    ) -> std::result::Result<(), VerificationError> {
        let exponent = self.exponent.to_be_bytes();
        let components = RsaPublicKeyComponents {
            n: self.modulus.as_slice(),
            e: strip_leading_zeros(&exponent),
        };

        components
            .verify(algorithm.parameters(), message, signature)
            .map_err(|_| VerificationError::SignatureInvalid)
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

fn exponent_from_be_bytes(bytes: &[u8]) -> Result<u32> {
    let significant = strip_leading_zeros(bytes);
    if significant.len() > 4 {
        return Err(Error::MalformedKey(format!(
            "exponent too large: {} bytes",
            significant.len()
        )));
    }

    let mut buf = [0u8; 4];
    buf[4 - significant.len()..].copy_from_slice(significant);
    Ok(u32::from_be_bytes(buf))
}
