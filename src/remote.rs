//! Key supplier backed by a remote JWKS endpoint
//!
//! Every lookup fetches the key set again. There is no caching and no retry;
//! timeouts come from the configured `reqwest::Client`.

use crate::discovery::discover_jwks_uri;
use crate::error::KeyLookupError;
use crate::jwks::KeySet;
use crate::jwks::jwk::Jwk;
use crate::limits::{MAX_JWKS_RESPONSE_SIZE, MAX_JWKS_URI_LENGTH};
use crate::supplier::{KeyFuture, KeySupplier};
use url::Url;

/// Parse an absolute http(s) endpoint with a host
pub(crate) fn parse_endpoint(raw: &str, max_length: usize) -> Result<Url, KeyLookupError> {
    if raw.len() > max_length {
        return Err(KeyLookupError::UrlTooLong {
            length: raw.len(),
            max: max_length,
        });
    }

    let url = Url::parse(raw.trim())
        .map_err(|e| KeyLookupError::InvalidUrl(format!("'{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(KeyLookupError::InvalidUrl(format!(
            "'{raw}': scheme {} is not http or https",
            url.scheme()
        )));
    }
    if url.host().is_none() {
        return Err(KeyLookupError::InvalidUrl(format!("'{raw}': no host")));
    }

    Ok(url)
}

/// GET `url` and return its body as text, reading at most `max` bytes
///
/// A declared `Content-Length` above `max` is refused before any of the body
/// is read; otherwise the body is streamed and the read stops at the first
/// chunk that crosses the limit.
pub(crate) async fn fetch_document(
    client: &reqwest::Client,
    url: &Url,
    max: usize,
) -> Result<String, KeyLookupError> {
    tracing::debug!(%url, "fetching");
    let mut response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| KeyLookupError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(KeyLookupError::HttpStatus(status.as_u16()));
    }

    if let Some(length) = response.content_length() {
        if length > max as u64 {
            return Err(KeyLookupError::ResponseTooLarge {
                size: usize::try_from(length).unwrap_or(usize::MAX),
                max,
            });
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| KeyLookupError::Network(e.to_string()))?
    {
        let size = body.len() + chunk.len();
        if size > max {
            return Err(KeyLookupError::ResponseTooLarge { size, max });
        }
        body.extend_from_slice(&chunk);
    }

    String::from_utf8(body)
        .map_err(|e| KeyLookupError::InvalidDocument(format!("{url} is not UTF-8: {e}")))
}

/// Key supplier that reads the issuer's published key set
#[derive(Debug, Clone)]
pub struct RemoteKeySupplier {
    client: reqwest::Client,
    jwks_uri: Url,
}

impl RemoteKeySupplier {
    /// Supplier for a known JWKS endpoint
    pub fn new(
        client: reqwest::Client,
        jwks_uri: impl AsRef<str>,
    ) -> Result<Self, KeyLookupError> {
        let jwks_uri = parse_endpoint(jwks_uri.as_ref(), MAX_JWKS_URI_LENGTH)?;
        Ok(Self { client, jwks_uri })
    }

    /// Supplier for the JWKS endpoint advertised by `issuer`'s provider metadata
    ///
    /// The metadata must name `issuer` exactly.
    pub async fn discover(client: reqwest::Client, issuer: &str) -> Result<Self, KeyLookupError> {
        let jwks_uri = discover_jwks_uri(&client, issuer).await?;
        Ok(Self { client, jwks_uri })
    }

    pub fn jwks_uri(&self) -> &str {
        self.jwks_uri.as_str()
    }

    async fn fetch_key(&self, key_id: &str) -> Result<Jwk, KeyLookupError> {
        let body = fetch_document(&self.client, &self.jwks_uri, MAX_JWKS_RESPONSE_SIZE).await?;
        KeySet::from_json(&body)?
            .lookup(key_id)
            .ok_or_else(|| KeyLookupError::KeyNotFound(key_id.to_string()))
    }
}

impl KeySupplier for RemoteKeySupplier {
    fn get_key<'a>(&'a self, key_id: &'a str) -> KeyFuture<'a> {
        Box::pin(async move { self.fetch_key(key_id).await.map_err(Into::into) })
    }
}
