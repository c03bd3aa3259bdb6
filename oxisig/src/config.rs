//! Declarative validator construction
//!
//! A [`ValidatorConfig`] describes a tree of validators in JSON (or any other
//! [`serde`] format) and builds it with the [`aws_lc`](crate::crypto::aws_lc)
//! backend. Variants are externally tagged by algorithm name or composite kind:
//!
//! ```json
//! {"set": [
//!     {"kid": {
//!         "2024-01": {"HS256": {"secret": "old secret"}},
//!         "2024-07": {"HS256": {"secret": "new secret"}}
//!     }},
//!     {"RS256": {"public": "-----BEGIN PUBLIC KEY-----\n..."}}
//! ]}
//! ```
//!
//! RSA keys are PEM, or bare base64 of the DER encoding. HMAC secrets are used
//! as their UTF-8 bytes.
use std::collections::BTreeMap;

use crate::{
    Algorithm,
    crypto::aws_lc::{
        HmacValidator,
        RsaValidator,
    },
    error::ValidatorError,
    validation::{
        AlgorithmSetValidator,
        KeyIdValidator,
        NoneValidator,
        Validator,
    },
};

/// HMAC key material
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HmacKeyConfig {
    /// Shared secret
    pub secret: String,
}

/// RSA key material
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RsaKeyConfig {
    /// Public key, PEM or base64 DER
    pub public: String,
    /// Optional private key, PEM or base64 DER
    #[serde(default)]
    pub private: Option<String>,
}

/// Description of a validator tree
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub enum ValidatorConfig {
    /// HMAC using SHA-256
    HS256(HmacKeyConfig),
    /// HMAC using SHA-384
    HS384(HmacKeyConfig),
    /// HMAC using SHA-512
    HS512(HmacKeyConfig),
    /// RSASSA-PKCS1-v1_5 using SHA-256
    RS256(RsaKeyConfig),
    /// RSASSA-PKCS1-v1_5 using SHA-384
    RS384(RsaKeyConfig),
    /// RSASSA-PKCS1-v1_5 using SHA-512
    RS512(RsaKeyConfig),
    /// Unsecured tokens, see [`NoneValidator`]
    #[serde(rename = "none")]
    Unsigned,
    /// Dispatch on `kid`, see [`KeyIdValidator`]
    #[serde(rename = "kid")]
    KeyId(BTreeMap<String, ValidatorConfig>),
    /// Dispatch on `alg`, see [`AlgorithmSetValidator`]
    #[serde(rename = "set")]
    AlgorithmSet(Vec<ValidatorConfig>),
}

impl ValidatorConfig {
    /// Parses a configuration document
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidConfig`] when `json` does not describe a validator
    pub fn from_json(json: &str) -> Result<Self, ValidatorError> {
        serde_json::from_str(json).map_err(|e| ValidatorError::InvalidConfig(e.to_string()))
    }

    /// Constructs the described validator tree
    ///
    /// # Errors
    ///
    /// - [`ValidatorError::InvalidKey`] when key material cannot be decoded or parsed
    /// - any registration error raised by [`KeyIdValidator`] or
    ///   [`AlgorithmSetValidator`] for the nested configuration
    pub fn build(&self) -> Result<Box<dyn Validator>, ValidatorError> {
        Ok(match self {
            Self::HS256(key) => Box::new(HmacValidator::hs256(key.secret.as_bytes())),
            Self::HS384(key) => Box::new(HmacValidator::hs384(key.secret.as_bytes())),
            Self::HS512(key) => Box::new(HmacValidator::hs512(key.secret.as_bytes())),
            Self::RS256(key) => Box::new(key.build(Algorithm::RS256)?),
            Self::RS384(key) => Box::new(key.build(Algorithm::RS384)?),
            Self::RS512(key) => Box::new(key.build(Algorithm::RS512)?),
            Self::Unsigned => Box::new(NoneValidator),
            Self::KeyId(keys) => {
                let mut validator = KeyIdValidator::empty();
                for (id, config) in keys {
                    validator.register_boxed(id.clone(), config.build()?)?;
                }
                Box::new(validator)
            }
            Self::AlgorithmSet(members) => Box::new(AlgorithmSetValidator::new(
                members
                    .iter()
                    .map(Self::build)
                    .collect::<Result<Vec<_>, _>>()?,
            )?),
        })
    }
}

impl RsaKeyConfig {
    fn build(&self, algorithm: Algorithm) -> Result<RsaValidator, ValidatorError> {
        let public = decode_key(&self.public)?;
        let private = self.private.as_deref().map(decode_key).transpose()?;
        RsaValidator::new(algorithm, &public, private.as_deref())
    }
}

fn decode_key(material: &str) -> Result<Vec<u8>, ValidatorError> {
    let body: String = material
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("-----"))
        .collect();
    base64_simd::STANDARD
        .decode_to_vec(body.as_bytes())
        .map_err(|_| ValidatorError::InvalidKey)
}
