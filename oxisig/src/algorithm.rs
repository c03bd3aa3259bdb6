use std::{
    fmt::Display,
    str::FromStr,
};

use crate::error::ValidatorError;

/// JWS Signature Algorithm
///
/// Serves as the algorithm identity of every [`Validator`]. Parsing a header's
/// `alg` value into an [`Algorithm`] only yields a lookup key; it never selects
/// verification behaviour on its own.
///
/// [`Validator`]: crate::validation::Validator
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Algorithm {
    /// `HMAC` using `SHA-256`
    HS256,

    /// `HMAC` using `SHA-384`
    HS384,

    /// `HMAC` using `SHA-512`
    HS512,

    /// `RSASSA-PKCS1-v1_5` using `SHA-256`
    RS256,

    /// `RSASSA-PKCS1-v1_5` using `SHA-384`
    RS384,

    /// `RSASSA-PKCS1-v1_5` using `SHA-512`
    RS512,

    /// No digital signature or MAC performed
    ///
    /// Ref: [RFC 7518 3.6](<https://datatracker.ietf.org/doc/html/rfc7518#section-3.6>)
    #[serde(rename = "none")]
    Unsigned,
}

impl Algorithm {
    /// Canonical JWS `alg` header value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
            Self::RS256 => "RS256",
            Self::RS384 => "RS384",
            Self::RS512 => "RS512",
            Self::Unsigned => "none",
        }
    }

    /// Returns `true` for the keyed-digest (HMAC) family
    #[must_use]
    pub const fn is_symmetric(&self) -> bool {
        matches!(self, Self::HS256 | Self::HS384 | Self::HS512)
    }

    /// Returns `true` for the public-key (RSA) family
    #[must_use]
    pub const fn is_asymmetric(&self) -> bool {
        matches!(self, Self::RS256 | Self::RS384 | Self::RS512)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ValidatorError;

    /// Exact, case-sensitive match on the canonical JWS name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(Self::HS256),
            "HS384" => Ok(Self::HS384),
            "HS512" => Ok(Self::HS512),
            "RS256" => Ok(Self::RS256),
            "RS384" => Ok(Self::RS384),
            "RS512" => Ok(Self::RS512),
            "none" => Ok(Self::Unsigned),
            _ => Err(ValidatorError::UnsupportedAlgorithm),
        }
    }
}
