//! Provides signature validation functionality
//!
//! Every validator implements [`Validator`]. Leaf validators (the HMAC and RSA
//! families in [`crate::crypto`], and [`NoneValidator`]) verify against key
//! material fixed at construction and ignore the header. Composite validators
//! ([`KeyIdValidator`], [`AlgorithmSetValidator`]) consult the untrusted header
//! to pick exactly one child and fail closed when no unambiguous choice exists.
use std::sync::Arc;

pub use algorithm_set::{
    AlgorithmSetValidator,
    AlgorithmSetValidatorBuilder,
};
pub use keystore::{
    KeyIdValidator,
    KeyIdValidatorBuilder,
};
pub use none::NoneValidator;

mod algorithm_set;
pub mod keystore;
mod none;

use crate::{
    Algorithm,
    header::HeaderView,
};

/// A [`Validator`] checks that a signature over a message was produced by the
/// holder of an expected key.
///
/// Implementations must be pure: no interior mutation, no caching, no counters.
/// Calling [`Validator::validate`] twice with identical arguments returns the
/// same result, and any number of threads may validate concurrently.
pub trait Validator: Send + Sync {
    /// Return the validator's [`Algorithm`], or [`None`] if it has no single
    /// algorithm identity (e.g. an empty [`KeyIdValidator`], or an
    /// [`AlgorithmSetValidator`]).
    fn algorithm(&self) -> Option<Algorithm>;

    /// Verify a signature.
    ///
    /// # Parameters
    ///
    /// - `header` is the parsed token header. Leaf validators ignore it;
    ///   composite validators return `false` when it is [`None`].
    /// - `message` is the signed byte range (for JWS, the signing input
    ///   `BASE64URL(header) '.' BASE64URL(payload)`).
    /// - `signature` is the decoded signature.
    ///
    /// # Returns
    ///
    /// `true` if, and only if, `signature` is valid for `message`. Malformed or
    /// empty input is simply not valid; this method never panics on it.
    fn validate(&self, header: Option<&dyn HeaderView>, message: &[u8], signature: &[u8]) -> bool;
}

impl<V: Validator + ?Sized> Validator for &V {
    fn algorithm(&self) -> Option<Algorithm> {
        (**self).algorithm()
    }
    fn validate(&self, header: Option<&dyn HeaderView>, message: &[u8], signature: &[u8]) -> bool {
        (**self).validate(header, message, signature)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn algorithm(&self) -> Option<Algorithm> {
        (**self).algorithm()
    }
    fn validate(&self, header: Option<&dyn HeaderView>, message: &[u8], signature: &[u8]) -> bool {
        (**self).validate(header, message, signature)
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn algorithm(&self) -> Option<Algorithm> {
        (**self).algorithm()
    }
    fn validate(&self, header: Option<&dyn HeaderView>, message: &[u8], signature: &[u8]) -> bool {
        (**self).validate(header, message, signature)
    }
}
