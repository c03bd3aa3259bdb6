//! [`aws-lc-rs`] crypto backend implementation
//!
//! Implements [`Validator`] and [`Signer`] for HMAC (`HS256`, `HS384`, `HS512`)
//! and RSASSA-PKCS1-v1_5 (`RS256`, `RS384`, `RS512`) keys.
//!
//! [`Validator`]: crate::validation::Validator
//! [`Signer`]: crate::signing::Signer
//! [`aws-lc-rs`]: aws_lc_rs

mod sign;
mod verify;

use std::fmt;

use aws_lc_rs::{
    hmac::{
        Algorithm as HmacAlgorithm,
        HMAC_SHA256,
        HMAC_SHA384,
        HMAC_SHA512,
        Key as HmacKey,
    },
    rand::SystemRandom,
    signature::{
        KeyPair,
        ParsedPublicKey,
        RSA_PKCS1_2048_8192_SHA256,
        RSA_PKCS1_2048_8192_SHA384,
        RSA_PKCS1_2048_8192_SHA512,
        RSA_PKCS1_SHA256,
        RSA_PKCS1_SHA384,
        RSA_PKCS1_SHA512,
        RsaKeyPair,
        RsaParameters,
        RsaSignatureEncoding,
    },
};

use crate::{
    Algorithm,
    error::ValidatorError,
};

/// HMAC key for signing and/or verifying `HS256`, `HS384`, or `HS512` signatures
///
/// Any secret is accepted, including the empty one. The `openssl` backend
/// rejects a zero-length secret with [`ValidatorError::InvalidKey`].
pub struct HmacValidator {
    alg: Algorithm,
    key: HmacKey,
}
impl HmacValidator {
    /// Constructs a new HS256 validator
    #[must_use]
    pub fn hs256(secret: &[u8]) -> Self {
        Self::with_digest(Algorithm::HS256, HMAC_SHA256, secret)
    }

    /// Constructs a new HS384 validator
    #[must_use]
    pub fn hs384(secret: &[u8]) -> Self {
        Self::with_digest(Algorithm::HS384, HMAC_SHA384, secret)
    }

    /// Constructs a new HS512 validator
    #[must_use]
    pub fn hs512(secret: &[u8]) -> Self {
        Self::with_digest(Algorithm::HS512, HMAC_SHA512, secret)
    }

    /// Constructs a validator for any HS-family `algorithm`
    ///
    /// # Errors
    ///
    /// [`ValidatorError::UnsupportedAlgorithm`] when `algorithm` is not HMAC
    pub fn new(algorithm: Algorithm, secret: &[u8]) -> Result<Self, ValidatorError> {
        let digest = map_hmac_alg(algorithm).ok_or(ValidatorError::UnsupportedAlgorithm)?;
        Ok(Self::with_digest(algorithm, digest, secret))
    }

    fn with_digest(alg: Algorithm, digest: HmacAlgorithm, secret: &[u8]) -> Self {
        Self {
            alg,
            key: HmacKey::new(digest, secret),
        }
    }
}
impl TryFrom<HmacKey> for HmacValidator {
    type Error = ValidatorError;
    fn try_from(key: HmacKey) -> Result<Self, Self::Error> {
        let alg = map_hkey_alg(&key).ok_or(ValidatorError::UnsupportedAlgorithm)?;
        Ok(Self { alg, key })
    }
}
impl fmt::Debug for HmacValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacValidator")
            .field("alg", &self.alg)
            .finish_non_exhaustive()
    }
}

/// RSA key for verifying (and, given a private key, signing) `RS256`, `RS384`,
/// or `RS512` signatures
///
/// The public key accepts PKCS#1 `RSAPublicKey` or X.509 `SubjectPublicKeyInfo`
/// DER. The private key accepts PKCS#8 or PKCS#1 `RSAPrivateKey` DER. Keys of
/// 2048 to 8192 bits are supported for every digest width.
pub struct RsaValidator {
    alg: Algorithm,
    encoding: &'static RsaSignatureEncoding,
    public_key: ParsedPublicKey,
    private_key: Option<RsaKeyPair>,
}
impl RsaValidator {
    /// Constructs a new RS256 validator
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidKey`] when either key cannot be parsed
    pub fn rs256(public_key: &[u8], private_key: Option<&[u8]>) -> Result<Self, ValidatorError> {
        Self::new(Algorithm::RS256, public_key, private_key)
    }

    /// Constructs a new RS384 validator
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidKey`] when either key cannot be parsed
    pub fn rs384(public_key: &[u8], private_key: Option<&[u8]>) -> Result<Self, ValidatorError> {
        Self::new(Algorithm::RS384, public_key, private_key)
    }

    /// Constructs a new RS512 validator
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidKey`] when either key cannot be parsed
    pub fn rs512(public_key: &[u8], private_key: Option<&[u8]>) -> Result<Self, ValidatorError> {
        Self::new(Algorithm::RS512, public_key, private_key)
    }

    /// Constructs a validator for any RS-family `algorithm` from DER-encoded keys
    ///
    /// Passing [`None`] for `private_key` yields a verify-only validator.
    ///
    /// # Errors
    ///
    /// - [`ValidatorError::UnsupportedAlgorithm`] when `algorithm` is not RSA
    /// - [`ValidatorError::InvalidKey`] when either key cannot be parsed, or the
    ///   private key does not pair with `public_key`
    pub fn new(
        algorithm: Algorithm,
        public_key: &[u8],
        private_key: Option<&[u8]>,
    ) -> Result<Self, ValidatorError> {
        let (parameters, encoding) =
            map_rsa_alg(algorithm).ok_or(ValidatorError::UnsupportedAlgorithm)?;
        let public_key =
            ParsedPublicKey::new(parameters, public_key).map_err(|_| ValidatorError::InvalidKey)?;
        let private_key = private_key.map(parse_private_key).transpose()?;
        if let Some(private_key) = &private_key {
            ensure_pair(&public_key, private_key, encoding)?;
        }
        Ok(Self {
            alg: algorithm,
            encoding,
            public_key,
            private_key,
        })
    }

    /// Constructs a signing validator from an existing [`RsaKeyPair`]
    ///
    /// # Errors
    ///
    /// - [`ValidatorError::UnsupportedAlgorithm`] when `algorithm` is not RSA
    /// - [`ValidatorError::InvalidKey`] when the public half is rejected for
    ///   verification (e.g. a modulus below 2048 bits)
    pub fn from_key_pair(algorithm: Algorithm, key_pair: RsaKeyPair) -> Result<Self, ValidatorError> {
        let (parameters, encoding) =
            map_rsa_alg(algorithm).ok_or(ValidatorError::UnsupportedAlgorithm)?;
        let public_key = ParsedPublicKey::new(parameters, key_pair.public_key().as_ref())
            .map_err(|_| ValidatorError::InvalidKey)?;
        Ok(Self {
            alg: algorithm,
            encoding,
            public_key,
            private_key: Some(key_pair),
        })
    }

    /// Returns `true` if this validator can sign
    #[must_use]
    pub const fn can_sign(&self) -> bool {
        self.private_key.is_some()
    }
}
impl fmt::Debug for RsaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaValidator")
            .field("alg", &self.alg)
            .field("can_sign", &self.can_sign())
            .finish_non_exhaustive()
    }
}

/// The public key may be PKCS#1 or SPKI, so pairing is checked with a test
/// signature rather than by comparing encodings.
fn ensure_pair(
    public_key: &ParsedPublicKey,
    private_key: &RsaKeyPair,
    encoding: &'static RsaSignatureEncoding,
) -> Result<(), ValidatorError> {
    let mut signature = vec![0; private_key.public_modulus_len()];
    private_key
        .sign(encoding, &SystemRandom::new(), PAIR_CHECK, &mut signature)
        .map_err(|_| ValidatorError::InvalidKey)?;
    public_key
        .verify_sig(PAIR_CHECK, &signature)
        .map_err(|_| ValidatorError::InvalidKey)
}

const PAIR_CHECK: &[u8] = b"oxisig key pair check";

fn parse_private_key(der: &[u8]) -> Result<RsaKeyPair, ValidatorError> {
    RsaKeyPair::from_pkcs8(der)
        .or_else(|_| RsaKeyPair::from_der(der))
        .map_err(|_| ValidatorError::InvalidKey)
}

fn map_rsa_alg(
    algorithm: Algorithm,
) -> Option<(&'static RsaParameters, &'static RsaSignatureEncoding)> {
    match algorithm {
        Algorithm::RS256 => Some((&RSA_PKCS1_2048_8192_SHA256, &RSA_PKCS1_SHA256)),
        Algorithm::RS384 => Some((&RSA_PKCS1_2048_8192_SHA384, &RSA_PKCS1_SHA384)),
        Algorithm::RS512 => Some((&RSA_PKCS1_2048_8192_SHA512, &RSA_PKCS1_SHA512)),
        _ => None,
    }
}

fn map_hmac_alg(algorithm: Algorithm) -> Option<HmacAlgorithm> {
    match algorithm {
        Algorithm::HS256 => Some(HMAC_SHA256),
        Algorithm::HS384 => Some(HMAC_SHA384),
        Algorithm::HS512 => Some(HMAC_SHA512),
        _ => None,
    }
}

fn map_hkey_alg(key: &HmacKey) -> Option<Algorithm> {
    if key.algorithm() == HMAC_SHA256 {
        Some(Algorithm::HS256)
    } else if key.algorithm() == HMAC_SHA384 {
        Some(Algorithm::HS384)
    } else if key.algorithm() == HMAC_SHA512 {
        Some(Algorithm::HS512)
    } else {
        None
    }
}
