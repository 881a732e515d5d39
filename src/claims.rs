//! Claims extraction and validation for JWT tokens
//!
//! Payload members arrive as loosely typed JSON. Every read goes through a
//! checked conversion: a registered claim of the wrong type is an error,
//! never a silent default.

use crate::error::{Error, Result, VerificationError};
use miniserde::json::{Number, Object, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Verified token payload
#[derive(Debug, Clone)]
pub struct Claims {
    inner: Object,
}

impl Claims {
    pub(crate) fn from_object(inner: Object) -> Self {
        Self { inner }
    }

    /// Raw claim value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.inner.get(name)
    }

    /// Issuer (iss)
    pub fn issuer(&self) -> Result<Option<&str>> {
        self.string_claim("iss")
    }

    /// Subject (sub)
    pub fn subject(&self) -> Result<Option<&str>> {
        self.string_claim("sub")
    }

    /// Audience (aud) as a list, whether published as a string or an array
    pub fn audience(&self) -> Result<Vec<&str>> {
        match self.inner.get("aud") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(aud)) => Ok(vec![aud.as_str()]),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(aud) => Ok(aud.as_str()),
                    _ => Err(Error::MalformedToken(
                        "aud claim contains a non-string value".into(),
                    )),
                })
                .collect(),
            Some(_) => Err(Error::MalformedToken(
                "aud claim is neither a string nor an array".into(),
            )),
        }
    }

    /// Expiration time (exp), seconds since the Unix epoch
    pub fn expiration(&self) -> std::result::Result<Option<i64>, VerificationError> {
        self.numeric_claim("exp")
    }

    /// Not before (nbf), seconds since the Unix epoch
    pub fn not_before(&self) -> std::result::Result<Option<i64>, VerificationError> {
        self.numeric_claim("nbf")
    }

    /// Issued at (iat), seconds since the Unix epoch
    pub fn issued_at(&self) -> std::result::Result<Option<i64>, VerificationError> {
        self.numeric_claim("iat")
    }

    fn string_claim(&self, name: &str) -> Result<Option<&str>> {
        match self.inner.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(Error::MalformedToken(format!("{name} claim is not a string"))),
        }
    }

    fn numeric_claim(
        &self,
        name: &'static str,
    ) -> std::result::Result<Option<i64>, VerificationError> {
        match self.inner.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(Number::U64(n))) => {
                Ok(Some(i64::try_from(*n).unwrap_or(i64::MAX)))
            }
            Some(Value::Number(Number::I64(n))) => Ok(Some(*n)),
            // Fractional seconds truncate
            Some(Value::Number(Number::F64(n))) => Ok(Some(*n as i64)),
            Some(_) => Err(VerificationError::InvalidNumericClaim(name)),
        }
    }

    /// Render the audience claim as a single string
    ///
    /// A string renders verbatim, an array as `[a b c]`, a missing claim as
    /// the empty string.
    pub(crate) fn rendered_audience(&self) -> Result<String> {
        match self.inner.get("aud") {
            Some(Value::Array(_)) => Ok(format!("[{}]", self.audience()?.join(" "))),
            _ => Ok(self.audience()?.concat()),
        }
    }
}

/// Check exp, nbf and iat against `now`
pub(crate) fn validate_time_claims(
    claims: &Claims,
    now: i64,
) -> std::result::Result<(), VerificationError> {
    if let Some(exp) = claims.expiration()? {
        if now >= exp {
            return Err(VerificationError::Expired {
                expired_at: exp,
                now,
            });
        }
    }

    if let Some(nbf) = claims.not_before()? {
        if now < nbf {
            return Err(VerificationError::NotYetValid {
                not_before: nbf,
                now,
            });
        }
    }

    if let Some(iat) = claims.issued_at()? {
        if now < iat {
            return Err(VerificationError::IssuedInFuture { issued_at: iat, now });
        }
    }

    Ok(())
}

/// Require `iss` to equal `expected` exactly
pub(crate) fn validate_issuer(claims: &Claims, expected: &str) -> Result<()> {
    let issuer = claims.issuer()?;
    tracing::debug!(expected, presented = ?issuer, "checking issuer");

    match issuer {
        Some(issuer) if issuer == expected => Ok(()),
        _ => Err(Error::UnauthorizedIssuer),
    }
}

/// Require the rendered `aud` to contain `expected`
pub(crate) fn validate_audience(claims: &Claims, expected: &str) -> Result<()> {
    let audience = claims.rendered_audience()?;
    tracing::debug!(expected, presented = %audience, "checking audience");

    if audience.contains(expected) {
        Ok(())
    } else {
        Err(Error::UnauthorizedAudience)
    }
}

/// Get current Unix timestamp in seconds
pub(crate) fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
