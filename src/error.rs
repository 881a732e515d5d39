//! Errors for registry-auth

use thiserror::Error;

/// Error reported by a [`KeySupplier`](crate::KeySupplier) implementation
pub type SupplierError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Token validation errors
///
/// Every variant maps to an unauthorized response at the HTTP layer. The
/// issuer and audience variants display fixed texts that callers match on.
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("malformed token: {0}")]
    MalformedToken(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("unexpected signing method: {0}")]
    UnsupportedSigningMethod(String),

    // ============================================================================
    // Key Errors
    // ============================================================================
    #[error("unable to look up signing key: {0}")]
    KeyLookupFailed(#[source] SupplierError),

    #[error("malformed JWK RSA key: {0}")]
    MalformedKey(String),

    // ============================================================================
    // Verification Errors
    // ============================================================================
    #[error("unable to validate token: {0}")]
    SignatureOrTimeInvalid(#[from] VerificationError),

    // ============================================================================
    // Authorization Errors
    // ============================================================================
    #[error("unauthorized issuer")]
    UnauthorizedIssuer,

    #[error("unauthorized audience")]
    UnauthorizedAudience,
}

/// Cause of a failed signature or time claim check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("signature is invalid")]
    SignatureInvalid,

    #[error("token is expired (exp: {expired_at}, now: {now})")]
    Expired { expired_at: i64, now: i64 },

    #[error("token is not valid yet (nbf: {not_before}, now: {now})")]
    NotYetValid { not_before: i64, now: i64 },

    #[error("token used before issued (iat: {issued_at}, now: {now})")]
    IssuedInFuture { issued_at: i64, now: i64 },

    #[error("{0} claim is not a number")]
    InvalidNumericClaim(&'static str),
}

/// Errors reported by the bundled key suppliers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyLookupError {
    #[error("no key found for kid '{0}'")]
    KeyNotFound(String),

    #[error("network: {0}")]
    Network(String),

    #[error("http: status {0}")]
    HttpStatus(u16),

    #[error("remote response too large: {size} bytes (maximum: {max} bytes)")]
    ResponseTooLarge { size: usize, max: usize },

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("provider metadata names issuer '{published}', expected '{expected}'")]
    IssuerMismatch { expected: String, published: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL too long: {length} characters (maximum: {max} characters)")]
    UrlTooLong { length: usize, max: usize },
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVariable(&'static str),
}

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, Error>;
