//! Validator configuration

use crate::error::ConfigError;

/// Environment variable holding the expected issuer
pub const ISSUER_ENV: &str = "AUTH_TOKEN_VALIDATION_ISSUER";

/// Environment variable holding the expected audience
pub const AUDIENCE_ENV: &str = "AUTH_TOKEN_VALIDATION_AUDIENCE";

/// Expected issuer and audience
///
/// The issuer must match `iss` exactly. The audience must be contained in
/// the rendered `aud` claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    issuer: String,
    audience: String,
}

impl ValidatorConfig {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// Read the configuration from `AUTH_TOKEN_VALIDATION_ISSUER` and
    /// `AUTH_TOKEN_VALIDATION_AUDIENCE`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let issuer = lookup(ISSUER_ENV).ok_or(ConfigError::MissingVariable(ISSUER_ENV))?;
        let audience = lookup(AUDIENCE_ENV).ok_or(ConfigError::MissingVariable(AUDIENCE_ENV))?;
        Ok(Self::new(issuer, audience))
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }
}
