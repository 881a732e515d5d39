use crate::claims::{self, Claims};
use crate::config::ValidatorConfig;
use crate::error::{Error, Result};
use crate::header::TokenHeader;
use crate::supplier::KeySupplier;
use crate::utils::base64url;
use miniserde::json::{Object, Value};
use std::sync::Arc;

/// Authorization scheme prefix stripped from header values
const BEARER_PREFIX: &str = "Bearer ";

/// JWT token validator
///
/// Holds the expected issuer and audience and a shared handle to the key
/// supplier. Cloning is cheap and clones share the supplier.
#[derive(Clone)]
pub struct TokenValidator {
    config: ValidatorConfig,
    supplier: Arc<dyn KeySupplier>,
}

/// Token split into its segments with header and payload decoded
struct ParsedToken<'a> {
    signing_input: &'a str,
    header: Object,
    payload: Object,
    signature: Vec<u8>,
}

impl TokenValidator {
    /// Create a validator for tokens issued by `issuer` for `audience`
    pub fn new<S>(supplier: S, issuer: impl Into<String>, audience: impl Into<String>) -> Self
    where
        S: KeySupplier + 'static,
    {
        Self::with_config(supplier, ValidatorConfig::new(issuer, audience))
    }

    pub fn with_config<S>(supplier: S, config: ValidatorConfig) -> Self
    where
        S: KeySupplier + 'static,
    {
        Self {
            config,
            supplier: Arc::new(supplier),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate an `Authorization` header value or a bare token
    pub async fn validate_token(&self, header_value: &str) -> Result<()> {
        self.verify_token(header_value).await.map(|_| ())
    }

    /// Validate a token and return its claims
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// structure, algorithm, key lookup, key reconstruction, signature, time
    /// claims, issuer, audience. The key supplier is only called once the
    /// token has passed the structural and algorithm checks.
    pub async fn verify_token(&self, header_value: &str) -> Result<Claims> {
        let token = header_value
            .strip_prefix(BEARER_PREFIX)
            .unwrap_or(header_value);

        // 1. Parse token parts (header, payload, signature)
        let parsed = parse_token(token)?;

        // 2. Check algorithm, then read the key ID
        let header = TokenHeader::from_object(&parsed.header)?;
        tracing::debug!(alg = %header.algorithm, kid = %header.key_id, "resolving signing key");

        // 3. Resolve verification key
        let jwk = self
            .supplier
            .get_key(&header.key_id)
            .await
            .map_err(Error::KeyLookupFailed)?;
        let key = jwk.to_rsa_public_key()?;

        // 4. Verify signature, then time claims
        key.verify(
            header.algorithm,
            parsed.signing_input.as_bytes(),
            &parsed.signature,
        )?;
        let claims = Claims::from_object(parsed.payload);
        claims::validate_time_claims(&claims, claims::current_timestamp())?;

        // 5. Authorize issuer and audience
        claims::validate_issuer(&claims, self.config.issuer())?;
        claims::validate_audience(&claims, self.config.audience())?;

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Split a compact token and decode its segments
fn parse_token(token: &str) -> Result<ParsedToken<'_>> {
    let mut parts = token.split('.');
    let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::MalformedToken(
            "token contains an invalid number of segments".into(),
        ));
    };

    let header = decode_object(header_b64, "header")?;
    let payload = decode_object(payload_b64, "payload")?;
    let signature = decode_segment(signature_b64, "signature")?;

    let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];

    Ok(ParsedToken {
        signing_input,
        header,
        payload,
        signature,
    })
}

fn decode_segment(segment: &str, part: &str) -> Result<Vec<u8>> {
    base64url::decode_bytes(segment).map_err(|e| {
        Error::MalformedToken(format!("illegal base64url data in {part} segment: {e}"))
    })
}

fn decode_object(segment: &str, part: &str) -> Result<Object> {
    let bytes = decode_segment(segment, part)?;
    let invalid = || Error::MalformedToken(format!("invalid character in {part} JSON"));

    let json = std::str::from_utf8(&bytes).map_err(|_| invalid())?;
    match miniserde::json::from_str::<Value>(json).map_err(|_| invalid())? {
        Value::Object(object) => Ok(object),
        _ => Err(Error::MalformedToken(format!("{part} is not a JSON object"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwks::KeySet;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    fn segment(json: &str) -> String {
        URL_SAFE_NO_PAD.encode(json)
    }

    fn token(header: &str, payload: &str) -> String {
        format!("{}.{}.{}", segment(header), segment(payload), segment("sig"))
    }

    #[test]
    fn test_parse_token() {
        let raw = token(r#"{"alg":"RS256","kid":"k1"}"#, r#"{"iss":"a"}"#);
        let parsed = parse_token(&raw).unwrap();

        assert!(raw.starts_with(parsed.signing_input));
        assert_eq!(parsed.signing_input.matches('.').count(), 1);
        assert_eq!(parsed.signature, b"sig");
        assert!(parsed.header.contains_key("kid"));
        assert!(parsed.payload.contains_key("iss"));
    }

    #[test]
    fn test_parse_token_segment_count() {
        for raw in ["", "a", "a.b", "a.b.c.d"] {
            assert!(matches!(
                parse_token(raw),
                Err(Error::MalformedToken(msg)) if msg.contains("number of segments")
            ));
        }
    }

    #[test]
    fn test_parse_token_bad_base64() {
        let raw = format!("{}.!!!.{}", segment("{}"), segment("sig"));
        assert!(matches!(
            parse_token(&raw),
            Err(Error::MalformedToken(msg)) if msg.contains("payload segment")
        ));

        let raw = format!("{}.{}.!!!", segment("{}"), segment("{}"));
        assert!(matches!(
            parse_token(&raw),
            Err(Error::MalformedToken(msg)) if msg.contains("signature segment")
        ));
    }

    #[test]
    fn test_parse_token_bad_json() {
        let raw = token("{not json", "{}");
        assert!(matches!(
            parse_token(&raw),
            Err(Error::MalformedToken(msg)) if msg.contains("invalid character in header JSON")
        ));

        let raw = format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode([0xff, 0xfe]),
            segment("{}"),
            segment("s")
        );
        assert!(matches!(
            parse_token(&raw),
            Err(Error::MalformedToken(msg)) if msg.contains("invalid character")
        ));
    }

    #[test]
    fn test_parse_token_not_an_object() {
        let raw = token(r#"["alg"]"#, "{}");
        assert!(matches!(
            parse_token(&raw),
            Err(Error::MalformedToken(msg)) if msg.contains("header is not a JSON object")
        ));
    }

    #[tokio::test]
    async fn test_bearer_prefix_stripped_once() {
        let validator = TokenValidator::new(KeySet::new(Vec::new()), "a", "b");

        let raw = token(r#"{"alg":"RS256","kid":"k1"}"#, "{}");
        let result = validator.validate_token(&format!("Bearer {raw}")).await;
        assert!(matches!(result, Err(Error::KeyLookupFailed(_))));

        let result = validator.validate_token(&format!("Bearer Bearer {raw}")).await;
        assert!(matches!(result, Err(Error::MalformedToken(_))));
    }

    #[tokio::test]
    async fn test_unknown_key() {
        let validator = TokenValidator::new(KeySet::new(Vec::new()), "a", "b");
        let raw = token(r#"{"alg":"RS512","kid":"missing"}"#, "{}");

        let err = validator.validate_token(&raw).await.unwrap_err();
        assert!(err.to_string().contains("no key found for kid 'missing'"));
    }
}
