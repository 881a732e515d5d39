//! OIDC Discovery
//!
//! Resolves the certs endpoint of an issuer from its provider metadata at
//! `<issuer>/.well-known/openid-configuration`, as described in
//! [OpenID Connect Discovery 1.0](https://openid.net/specs/openid-connect-discovery-1_0.html).
//! The metadata must name the requested issuer exactly, the same comparison
//! tokens are held to.

use crate::error::KeyLookupError;
use crate::limits::{MAX_DISCOVERY_RESPONSE_SIZE, MAX_ISSUER_URL_LENGTH, MAX_JWKS_URI_LENGTH};
use crate::remote::{fetch_document, parse_endpoint};
use miniserde::Deserialize;
use url::Url;

/// The provider metadata members needed to find the signing keys
#[derive(Debug, Deserialize)]
struct ProviderMetadata {
    issuer: String,
    jwks_uri: String,
}

/// Provider metadata location for an issuer, ignoring a trailing slash
fn metadata_url(issuer: &Url) -> Result<Url, KeyLookupError> {
    let mut url = issuer.clone();
    url.path_segments_mut()
        .map_err(|_| KeyLookupError::InvalidUrl(format!("'{issuer}': cannot hold a path")))?
        .pop_if_empty()
        .extend([".well-known", "openid-configuration"]);
    Ok(url)
}

/// Look up the JWKS endpoint published for `issuer`
pub(crate) async fn discover_jwks_uri(
    client: &reqwest::Client,
    issuer: &str,
) -> Result<Url, KeyLookupError> {
    let url = metadata_url(&parse_endpoint(issuer, MAX_ISSUER_URL_LENGTH)?)?;
    let body = fetch_document(client, &url, MAX_DISCOVERY_RESPONSE_SIZE).await?;

    let metadata: ProviderMetadata = miniserde::json::from_str(&body).map_err(|_| {
        KeyLookupError::InvalidDocument(format!("{url} lacks a string issuer or jwks_uri"))
    })?;

    if metadata.issuer != issuer {
        return Err(KeyLookupError::IssuerMismatch {
            expected: issuer.to_string(),
            published: metadata.issuer,
        });
    }

    let jwks_uri = parse_endpoint(&metadata.jwks_uri, MAX_JWKS_URI_LENGTH)?;
    tracing::debug!(issuer, %jwks_uri, "discovered jwks endpoint");
    Ok(jwks_uri)
}
