use std::convert::Infallible;

use crate::{
    Algorithm,
    error::SigningError,
    header::HeaderView,
    signing::Signer,
    validation::Validator,
};

/// Validator for the `none` algorithm: accepts only the empty signature.
///
/// A non-empty signature is rejected even if it would be valid under some
/// other algorithm. Composite validators never fall back to this validator;
/// it is only reachable when registered explicitly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoneValidator;

impl Validator for NoneValidator {
    fn algorithm(&self) -> Option<Algorithm> {
        Some(Algorithm::Unsigned)
    }

    fn validate(&self, _: Option<&dyn HeaderView>, _: &[u8], signature: &[u8]) -> bool {
        signature.is_empty()
    }
}

/// Produces the empty signature.
impl Signer for NoneValidator {
    type Error = Infallible;

    fn siglen(&self) -> usize {
        0
    }

    fn sign(&self, _: &[u8], _: &mut [u8]) -> Result<usize, SigningError<Self::Error>> {
        Ok(0)
    }
}
