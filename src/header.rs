use crate::algorithm::AlgorithmType;
use crate::error::{Error, Result};
use miniserde::json::{Object, Value};

/// JWT header structure
///
/// Extracted from the decoded header object in two steps: the algorithm
/// first, then the key ID, so a token with an unsupported algorithm is
/// rejected before anything else is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TokenHeader {
    /// Algorithm used for signing
    pub algorithm: AlgorithmType,
    /// Key ID (for JWKS key selection)
    pub key_id: String,
}

/// Read `alg` and check it against the supported family
pub(crate) fn algorithm(header: &Object) -> Result<AlgorithmType> {
    match header.get("alg") {
        Some(Value::String(alg)) => AlgorithmType::from_str(alg),
        Some(_) => Err(Error::UnsupportedSigningMethod(
            "alg is not a string".into(),
        )),
        None => Err(Error::UnsupportedSigningMethod("alg is missing".into())),
    }
}

/// Read `kid` as a string
pub(crate) fn key_id(header: &Object) -> Result<String> {
    match header.get("kid") {
        Some(Value::String(kid)) => Ok(kid.clone()),
        Some(_) => Err(Error::MalformedToken("kid header is not a string".into())),
        None => Err(Error::MalformedToken("kid header is missing".into())),
    }
}

impl TokenHeader {
    pub(crate) fn from_object(header: &Object) -> Result<Self> {
        let algorithm = algorithm(header)?;
        let key_id = key_id(header)?;
        Ok(Self { algorithm, key_id })
    }
}
