use thiserror::Error;

use crate::Algorithm;

/// Configuration errors raised while constructing validators or composing them
///
/// These indicate an operator or programming mistake and are returned at setup
/// time. Signature verification itself never produces an error; it resolves
/// to `false`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidatorError {
    /// Error raised by [`KeyIdValidator`] when a validator's algorithm differs from
    /// the algorithm established by the first registered key
    ///
    /// [`KeyIdValidator`]: crate::validation::KeyIdValidator
    #[error("key registry is pinned to {expected}, refusing to register a {found} validator")]
    AlgorithmMismatch {
        /// Algorithm of the first registered validator
        expected: Algorithm,
        /// Algorithm of the rejected validator
        found: Algorithm,
    },

    /// Error raised by [`KeyIdValidator`] when a key identifier is already registered
    ///
    /// [`KeyIdValidator`]: crate::validation::KeyIdValidator
    #[error("key id '{0}' is already registered")]
    DuplicateKeyId(String),

    /// Error raised by [`AlgorithmSetValidator`] when two members share an algorithm
    ///
    /// [`AlgorithmSetValidator`]: crate::validation::AlgorithmSetValidator
    #[error("more than one validator supplied for {0}")]
    DuplicateAlgorithm(Algorithm),

    /// Error raised when a validator without a single algorithm identity is placed
    /// where one is required (e.g. an empty [`KeyIdValidator`])
    ///
    /// [`KeyIdValidator`]: crate::validation::KeyIdValidator
    #[error("validator has no determinable algorithm")]
    UndeterminedAlgorithm,

    /// Error raised when an algorithm name is unknown, or not supported by the
    /// requested key family
    #[error("algorithm is not supported")]
    UnsupportedAlgorithm,

    /// Error raised when key material cannot be parsed by the crypto backend
    #[error("key material was rejected by the crypto backend")]
    InvalidKey,

    /// Error raised when a validator configuration document cannot be parsed
    #[error("invalid validator configuration: {0}")]
    InvalidConfig(String),
}

/// Errors that may be returned while producing a signature
#[derive(Debug, Error)]
pub enum SigningError<T>
where
    T: Sized + std::error::Error,
{
    /// Error raised when the caller-supplied output buffer cannot hold the signature
    #[error("signature needs {required} bytes but the output buffer holds {provided}")]
    BufferTooSmall {
        /// Size of the signature
        required: usize,
        /// Capacity of the supplied buffer
        provided: usize,
    },

    /// Error raised when signing is attempted with a verify-only key
    #[error("validator was constructed without a private key")]
    MissingPrivateKey,

    /// Generic signing error wrapping the crypto backend error
    #[error("signing error")]
    Backend(#[from] T),
}
