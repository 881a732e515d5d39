//! Shared helpers for integration tests
//!
//! Signing keys are generated once per test binary with `rsa` and used for
//! signing through `ring`.

#![allow(dead_code)]

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use registry_auth::{Jwk, KeyFuture, KeySet, KeySupplier, SupplierError};
use ring::rand::SystemRandom;
use ring::signature::{
    RSA_PKCS1_SHA256, RSA_PKCS1_SHA384, RSA_PKCS1_SHA512, RsaEncoding, RsaKeyPair,
};
use rsa::pkcs8::EncodePrivateKey;
use rsa::traits::PublicKeyParts;
use serde_json::{Map, Value, json};

pub const ISSUER: &str = "https://sso.registry.example/auth/realms/registry";
pub const AUDIENCE: &str = "registry-api";

/// RSA key pair with its published JWK
pub struct TestKey {
    pub jwk: Jwk,
    keypair: RsaKeyPair,
}

impl TestKey {
    fn generate(kid: &str) -> Self {
        let mut rng = rand::thread_rng();
        let private_key =
            rsa::RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate key");

        let modulus = URL_SAFE_NO_PAD.encode(private_key.n().to_bytes_be());
        let exponent = URL_SAFE_NO_PAD.encode(private_key.e().to_bytes_be());

        let pkcs8 = private_key
            .to_pkcs8_der()
            .expect("Failed to serialize to PKCS#8");
        let keypair =
            RsaKeyPair::from_pkcs8(pkcs8.as_bytes()).expect("Failed to create ring RsaKeyPair");

        Self {
            jwk: Jwk::rsa(kid, modulus, exponent),
            keypair,
        }
    }

    pub fn kid(&self) -> &str {
        self.jwk.key_id.as_deref().expect("kid")
    }

    /// Sign `header.payload` with the hash matching `alg`
    pub fn sign(&self, alg: &str, signing_input: &str) -> Vec<u8> {
        let encoding: &'static dyn RsaEncoding = match alg {
            "RS384" => &RSA_PKCS1_SHA384,
            "RS512" => &RSA_PKCS1_SHA512,
            _ => &RSA_PKCS1_SHA256,
        };

        let mut signature = vec![0u8; self.keypair.public().modulus_len()];
        self.keypair
            .sign(
                encoding,
                &SystemRandom::new(),
                signing_input.as_bytes(),
                &mut signature,
            )
            .expect("Signing failed");
        signature
    }
}

/// Key published by the test issuer
pub fn signing_key() -> &'static TestKey {
    static KEY: OnceLock<TestKey> = OnceLock::new();
    KEY.get_or_init(|| TestKey::generate("registry-signing-key"))
}

/// Unrelated key reusing the same kid
pub fn foreign_key() -> &'static TestKey {
    static KEY: OnceLock<TestKey> = OnceLock::new();
    KEY.get_or_init(|| TestKey::generate("registry-signing-key"))
}

pub fn key_set() -> KeySet {
    KeySet::new(vec![signing_key().jwk.clone()])
}

pub fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_secs() as i64
}

/// Builder for signed test tokens
pub struct TokenBuilder {
    header: Map<String, Value>,
    claims: Map<String, Value>,
}

impl TokenBuilder {
    /// RS256 token from the test issuer for the test audience, valid for an hour
    pub fn new() -> Self {
        let mut builder = Self::empty()
            .header("alg", json!("RS256"))
            .header("typ", json!("JWT"))
            .header("kid", json!(signing_key().kid()));
        let now = now();
        builder = builder
            .claim("iss", json!(ISSUER))
            .claim("aud", json!([AUDIENCE]))
            .claim("sub", json!("f1351779-4d53-4c75-9e57-abf23ae0d739"))
            .claim("iat", json!(now - 60))
            .claim("nbf", json!(now - 60))
            .claim("exp", json!(now + 3600));
        builder
    }

    pub fn empty() -> Self {
        Self {
            header: Map::new(),
            claims: Map::new(),
        }
    }

    pub fn algorithm(self, alg: &str) -> Self {
        self.header("alg", json!(alg))
    }

    pub fn header(mut self, name: &str, value: Value) -> Self {
        self.header.insert(name.to_string(), value);
        self
    }

    pub fn without_header(mut self, name: &str) -> Self {
        self.header.remove(name);
        self
    }

    pub fn claim(mut self, name: &str, value: Value) -> Self {
        self.claims.insert(name.to_string(), value);
        self
    }

    pub fn without_claim(mut self, name: &str) -> Self {
        self.claims.remove(name);
        self
    }

    /// Encoded `header.payload`
    pub fn signing_input(&self) -> String {
        let header = serde_json::to_vec(&self.header).expect("header json");
        let claims = serde_json::to_vec(&self.claims).expect("claims json");
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    pub fn sign_with(&self, key: &TestKey) -> String {
        let signing_input = self.signing_input();
        let alg = self
            .header
            .get("alg")
            .and_then(Value::as_str)
            .unwrap_or("RS256");
        let signature = key.sign(alg, &signing_input);
        format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature))
    }

    pub fn sign(&self) -> String {
        self.sign_with(signing_key())
    }
}

/// Key supplier that counts lookups
pub struct CountingSupplier {
    keys: KeySet,
    calls: AtomicUsize,
}

impl CountingSupplier {
    pub fn new(keys: KeySet) -> Self {
        Self {
            keys,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KeySupplier for CountingSupplier {
    fn get_key<'a>(&'a self, key_id: &'a str) -> KeyFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.keys.get_key(key_id)
    }
}

/// Key supplier that always fails with `message`
pub struct FailingSupplier {
    pub message: &'static str,
}

#[derive(Debug)]
pub struct SupplierDown(pub &'static str);

impl std::fmt::Display for SupplierDown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for SupplierDown {}

impl KeySupplier for FailingSupplier {
    fn get_key<'a>(&'a self, _key_id: &'a str) -> KeyFuture<'a> {
        let result: Result<Jwk, SupplierError> = Err(Box::new(SupplierDown(self.message)));
        Box::pin(std::future::ready(result))
    }
}
