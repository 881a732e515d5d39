//! Algorithm support for JWT validation
use crate::error::{Error, Result};

#[cfg(feature = "aws-lc-rs")]
use aws_lc_rs::signature::{self, RsaParameters};
#[cfg(not(feature = "aws-lc-rs"))]
use ring::signature::{self, RsaParameters};

/// Algorithm identifier from JWT header
///
/// Only the RSASSA-PKCS1-v1_5 family is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmType {
    RS256,
    RS384,
    RS512,
}

impl AlgorithmType {
    pub(crate) fn from_str(s: &str) -> Result<Self> {
        match s {
            "RS256" => Ok(AlgorithmType::RS256),
            "RS384" => Ok(AlgorithmType::RS384),
            "RS512" => Ok(AlgorithmType::RS512),
            _ => Err(Error::UnsupportedSigningMethod(s.into())),
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::RS256 => "RS256",
            AlgorithmType::RS384 => "RS384",
            AlgorithmType::RS512 => "RS512",
        }
    }

    /// Verification parameters for the backend
    ///
    /// Moduli below 2048 bits are rejected by the backend.
    pub(crate) fn parameters(&self) -> &'static RsaParameters {
        match self {
            AlgorithmType::RS256 => &signature::RSA_PKCS1_2048_8192_SHA256,
            AlgorithmType::RS384 => &signature::RSA_PKCS1_2048_8192_SHA384,
            AlgorithmType::RS512 => &signature::RSA_PKCS1_2048_8192_SHA512,
        }
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
