//! [`openssl`] crypto backend implementation
//!
//! Implements [`Validator`] and [`Signer`] for HMAC (`HS256`, `HS384`, `HS512`)
//! and RSASSA-PKCS1-v1_5 (`RS256`, `RS384`, `RS512`) keys. RSA keys may be
//! supplied as PEM or DER.
//!
//! [`Validator`]: crate::validation::Validator
//! [`Signer`]: crate::signing::Signer

mod sign;
mod verify;

use std::fmt;

use openssl::{
    hash::MessageDigest,
    pkey::{
        HasPublic,
        Id,
        PKey,
        Private,
        Public,
    },
    rsa::Rsa,
};

use crate::{
    Algorithm,
    error::ValidatorError,
};

/// OpenSSL HMAC key for signing and/or verifying `HS256`, `HS384`, or `HS512`
/// signatures
///
/// OpenSSL refuses a zero-length secret, so construction returns
/// [`ValidatorError::InvalidKey`] for it. The `aws-lc` backend accepts any
/// secret, including the empty one.
pub struct HmacValidator {
    key: PKey<Private>,
    alg: Algorithm,
    digest: MessageDigest,
}
impl HmacValidator {
    /// Constructs a new HS256 validator
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidKey`] if OpenSSL rejects the secret
    pub fn hs256(secret: &[u8]) -> Result<Self, ValidatorError> {
        Self::new(Algorithm::HS256, secret)
    }

    /// Constructs a new HS384 validator
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidKey`] if OpenSSL rejects the secret
    pub fn hs384(secret: &[u8]) -> Result<Self, ValidatorError> {
        Self::new(Algorithm::HS384, secret)
    }

    /// Constructs a new HS512 validator
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidKey`] if OpenSSL rejects the secret
    pub fn hs512(secret: &[u8]) -> Result<Self, ValidatorError> {
        Self::new(Algorithm::HS512, secret)
    }

    /// Constructs a validator for any HS-family `algorithm`
    ///
    /// # Errors
    ///
    /// - [`ValidatorError::UnsupportedAlgorithm`] when `algorithm` is not HMAC
    /// - [`ValidatorError::InvalidKey`] if OpenSSL rejects the secret
    pub fn new(algorithm: Algorithm, secret: &[u8]) -> Result<Self, ValidatorError> {
        let digest = match algorithm {
            Algorithm::HS256 => MessageDigest::sha256(),
            Algorithm::HS384 => MessageDigest::sha384(),
            Algorithm::HS512 => MessageDigest::sha512(),
            _ => return Err(ValidatorError::UnsupportedAlgorithm),
        };
        let key = PKey::hmac(secret).map_err(|_| ValidatorError::InvalidKey)?;
        Ok(Self {
            key,
            alg: algorithm,
            digest,
        })
    }
}
impl fmt::Debug for HmacValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacValidator")
            .field("alg", &self.alg)
            .finish_non_exhaustive()
    }
}

/// OpenSSL RSA key for verifying (and, given a private key, signing) `RS256`,
/// `RS384`, or `RS512` signatures
pub struct RsaValidator {
    alg: Algorithm,
    digest: MessageDigest,
    public_key: PKey<Public>,
    private_key: Option<PKey<Private>>,
}
impl RsaValidator {
    /// Constructs a new RS256 validator from PEM or DER encoded keys
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidKey`] when either key cannot be parsed or is not RSA
    pub fn rs256(public_key: &[u8], private_key: Option<&[u8]>) -> Result<Self, ValidatorError> {
        Self::new(Algorithm::RS256, public_key, private_key)
    }

    /// Constructs a new RS384 validator from PEM or DER encoded keys
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidKey`] when either key cannot be parsed or is not RSA
    pub fn rs384(public_key: &[u8], private_key: Option<&[u8]>) -> Result<Self, ValidatorError> {
        Self::new(Algorithm::RS384, public_key, private_key)
    }

    /// Constructs a new RS512 validator from PEM or DER encoded keys
    ///
    /// # Errors
    ///
    /// [`ValidatorError::InvalidKey`] when either key cannot be parsed or is not RSA
    pub fn rs512(public_key: &[u8], private_key: Option<&[u8]>) -> Result<Self, ValidatorError> {
        Self::new(Algorithm::RS512, public_key, private_key)
    }

    /// Constructs a validator for any RS-family `algorithm`
    ///
    /// `public_key` may be X.509 `SubjectPublicKeyInfo` or PKCS#1, `private_key`
    /// PKCS#8 or PKCS#1; each as PEM or DER. Passing [`None`] for `private_key`
    /// yields a verify-only validator.
    ///
    /// # Errors
    ///
    /// - [`ValidatorError::UnsupportedAlgorithm`] when `algorithm` is not RSA
    /// - [`ValidatorError::InvalidKey`] when either key cannot be parsed, is not
    ///   RSA, is outside 2048 to 8192 bits, or the private key does not pair with
    ///   `public_key`
    pub fn new(
        algorithm: Algorithm,
        public_key: &[u8],
        private_key: Option<&[u8]>,
    ) -> Result<Self, ValidatorError> {
        let digest = map_rsa_digest(algorithm).ok_or(ValidatorError::UnsupportedAlgorithm)?;
        let public_key = parse_public_key(public_key)?;
        let private_key = private_key.map(parse_private_key).transpose()?;
        if let Some(private_key) = &private_key
            && !public_key.public_eq(private_key)
        {
            return Err(ValidatorError::InvalidKey);
        }
        Ok(Self {
            alg: algorithm,
            digest,
            public_key,
            private_key,
        })
    }

    /// Constructs a signing validator from an RSA private key
    ///
    /// # Errors
    ///
    /// - [`ValidatorError::UnsupportedAlgorithm`] when `algorithm` is not RSA
    /// - [`ValidatorError::InvalidKey`] when `private_key` is not an RSA key of
    ///   2048 to 8192 bits
    pub fn from_private_key(
        algorithm: Algorithm,
        private_key: PKey<Private>,
    ) -> Result<Self, ValidatorError> {
        let digest = map_rsa_digest(algorithm).ok_or(ValidatorError::UnsupportedAlgorithm)?;
        let private_key = ensure_rsa(private_key)?;
        let public_key = private_key
            .public_key_to_der()
            .and_then(|der| PKey::public_key_from_der(&der))
            .map_err(|_| ValidatorError::InvalidKey)?;
        Ok(Self {
            alg: algorithm,
            digest,
            public_key,
            private_key: Some(private_key),
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
            .field("bits", &self.public_key.bits())
            .field("can_sign", &self.can_sign())
            .finish_non_exhaustive()
    }
}

const MIN_RSA_BITS: u32 = 2048;
const MAX_RSA_BITS: u32 = 8192;

fn map_rsa_digest(algorithm: Algorithm) -> Option<MessageDigest> {
    match algorithm {
        Algorithm::RS256 => Some(MessageDigest::sha256()),
        Algorithm::RS384 => Some(MessageDigest::sha384()),
        Algorithm::RS512 => Some(MessageDigest::sha512()),
        _ => None,
    }
}

fn parse_public_key(bytes: &[u8]) -> Result<PKey<Public>, ValidatorError> {
    let key = PKey::public_key_from_pem(bytes)
        .or_else(|_| PKey::public_key_from_der(bytes))
        .or_else(|_| Rsa::public_key_from_pem_pkcs1(bytes).and_then(PKey::from_rsa))
        .or_else(|_| Rsa::public_key_from_der_pkcs1(bytes).and_then(PKey::from_rsa))
        .map_err(|_| ValidatorError::InvalidKey)?;
    ensure_rsa(key)
}

fn parse_private_key(bytes: &[u8]) -> Result<PKey<Private>, ValidatorError> {
    let key = PKey::private_key_from_pem(bytes)
        .or_else(|_| PKey::private_key_from_der(bytes))
        .map_err(|_| ValidatorError::InvalidKey)?;
    ensure_rsa(key)
}

/// Same modulus range as the aws-lc `RSA_PKCS1_2048_8192_*` parameters
fn ensure_rsa<T: HasPublic>(key: PKey<T>) -> Result<PKey<T>, ValidatorError> {
    if key.id() == Id::RSA && (MIN_RSA_BITS..=MAX_RSA_BITS).contains(&key.bits()) {
        Ok(key)
    } else {
        Err(ValidatorError::InvalidKey)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use openssl::{
        ec::{
            EcGroup,
            EcKey,
        },
        nid::Nid,
        pkey::PKey,
        rsa::Rsa,
    };

    use super::{
        HmacValidator,
        RsaValidator,
    };
    use crate::{
        Algorithm,
        error::ValidatorError,
        validation::Validator,
    };

    #[test]
    fn hmac_rejects_non_hmac_algorithm() {
        let err = HmacValidator::new(Algorithm::RS256, b"k").unwrap_err();
        assert_eq!(err, ValidatorError::UnsupportedAlgorithm);
    }

    #[test]
    fn hmac_constructors_set_algorithm() {
        assert_eq!(
            HmacValidator::hs256(b"k").unwrap().algorithm(),
            Some(Algorithm::HS256)
        );
        assert_eq!(
            HmacValidator::hs384(b"k").unwrap().algorithm(),
            Some(Algorithm::HS384)
        );
        assert_eq!(
            HmacValidator::hs512(b"k").unwrap().algorithm(),
            Some(Algorithm::HS512)
        );
    }

    #[test]
    fn rsa_accepts_pem_and_der() {
        let rsa = Rsa::generate(2048).unwrap();
        let pkey = PKey::from_rsa(rsa.clone()).unwrap();

        let spki_pem = pkey.public_key_to_pem().unwrap();
        let spki_der = pkey.public_key_to_der().unwrap();
        let pkcs1_pem = rsa.public_key_to_pem_pkcs1().unwrap();
        let pkcs1_der = rsa.public_key_to_der_pkcs1().unwrap();
        let pkcs8_pem = pkey.private_key_to_pem_pkcs8().unwrap();
        let pkcs1_private_der = rsa.private_key_to_der().unwrap();

        for public in [&spki_pem, &spki_der, &pkcs1_pem, &pkcs1_der] {
            RsaValidator::rs256(public, None).unwrap();
        }
        for private in [&pkcs8_pem, &pkcs1_private_der] {
            assert!(RsaValidator::rs256(&spki_pem, Some(private)).unwrap().can_sign());
        }
    }

    #[test]
    fn rsa_rejects_non_rsa_keys() {
        let ec = EcKey::generate(&EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap()).unwrap();
        let ec = PKey::from_ec_key(ec).unwrap();

        let err = RsaValidator::rs256(&ec.public_key_to_pem().unwrap(), None).unwrap_err();
        assert_eq!(err, ValidatorError::InvalidKey);

        let err = RsaValidator::from_private_key(Algorithm::RS256, ec).unwrap_err();
        assert_eq!(err, ValidatorError::InvalidKey);

        let err = RsaValidator::rs256(b"garbage", None).unwrap_err();
        assert_eq!(err, ValidatorError::InvalidKey);
    }

    #[test]
    fn rsa_rejects_non_rsa_algorithm() {
        let pkey = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
        let err = RsaValidator::from_private_key(Algorithm::HS512, pkey).unwrap_err();
        assert_eq!(err, ValidatorError::UnsupportedAlgorithm);
    }

    #[test]
    fn hmac_rejects_empty_secret() {
        let err = HmacValidator::hs256(b"").unwrap_err();
        assert_eq!(err, ValidatorError::InvalidKey);
    }

    #[test]
    fn rsa_rejects_mismatched_pair() {
        let one = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
        let two = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
        let public = one.public_key_to_pem().unwrap();

        let err = RsaValidator::rs256(&public, Some(&two.private_key_to_pem_pkcs8().unwrap()))
            .unwrap_err();
        assert_eq!(err, ValidatorError::InvalidKey);

        let paired = RsaValidator::rs256(&public, Some(&one.private_key_to_pem_pkcs8().unwrap()));
        assert!(paired.unwrap().can_sign());
    }

    #[test]
    fn rsa_rejects_short_modulus() {
        let short = PKey::from_rsa(Rsa::generate(1024).unwrap()).unwrap();

        let err = RsaValidator::rs256(&short.public_key_to_pem().unwrap(), None).unwrap_err();
        assert_eq!(err, ValidatorError::InvalidKey);

        let err = RsaValidator::rs256(
            &short.public_key_to_pem().unwrap(),
            Some(&short.private_key_to_pem_pkcs8().unwrap()),
        )
        .unwrap_err();
        assert_eq!(err, ValidatorError::InvalidKey);

        let err = RsaValidator::from_private_key(Algorithm::RS256, short).unwrap_err();
        assert_eq!(err, ValidatorError::InvalidKey);
    }
}
