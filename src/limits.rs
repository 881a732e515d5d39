//! Size limit constants for remote key retrieval

/// Maximum length for issuer URLs (2048 characters)
pub(crate) const MAX_ISSUER_URL_LENGTH: usize = 2048;

/// Maximum length for JWKS URIs (2048 characters)
pub(crate) const MAX_JWKS_URI_LENGTH: usize = 2048;

/// Maximum size for OIDC discovery response (64KB)
pub(crate) const MAX_DISCOVERY_RESPONSE_SIZE: usize = 64 * 1024;

/// Maximum size for JWKS response (512KB)
pub(crate) const MAX_JWKS_RESPONSE_SIZE: usize = 512 * 1024;
