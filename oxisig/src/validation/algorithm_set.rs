use std::{
    collections::BTreeMap,
    fmt,
};

use crate::{
    Algorithm,
    error::ValidatorError,
    header::{
        Alg,
        HeaderView,
    },
    validation::Validator,
};

/// Selects one of a fixed set of [`Validator`]s by the `alg` JWT header parameter.
///
/// Use this when a verifier must accept more than one algorithm by design (e.g.
/// migrating from HS256 to RS256). The untrusted header chooses which member
/// checks the signature, so every member must independently hold a key the
/// operator trusts for this purpose. Only validators passed at construction are
/// reachable; there is no implicit fallback, in particular not to
/// [`NoneValidator`](crate::validation::NoneValidator).
///
/// The set has no single algorithm identity, so [`Validator::algorithm`]
/// returns [`None`] and it cannot be registered in a
/// [`KeyIdValidator`](crate::validation::KeyIdValidator).
pub struct AlgorithmSetValidator {
    validators: BTreeMap<Algorithm, Box<dyn Validator>>,
}

impl AlgorithmSetValidator {
    /// Builds the set, indexing each member by its algorithm
    ///
    /// # Errors
    ///
    /// - [`ValidatorError::UndeterminedAlgorithm`] when a member has no algorithm
    /// - [`ValidatorError::DuplicateAlgorithm`] when two members share an algorithm
    pub fn new(
        validators: impl IntoIterator<Item = Box<dyn Validator>>,
    ) -> Result<Self, ValidatorError> {
        let mut indexed = BTreeMap::new();
        for validator in validators {
            let Some(algorithm) = validator.algorithm() else {
                tracing::warn!("rejected algorithm set member without an algorithm");
                return Err(ValidatorError::UndeterminedAlgorithm);
            };
            if indexed.insert(algorithm, validator).is_some() {
                tracing::warn!(%algorithm, "rejected duplicate algorithm set member");
                return Err(ValidatorError::DuplicateAlgorithm(algorithm));
            }
        }
        Ok(Self {
            validators: indexed,
        })
    }

    /// Returns an [`AlgorithmSetValidatorBuilder`] for chained construction
    #[must_use]
    pub const fn builder() -> AlgorithmSetValidatorBuilder {
        AlgorithmSetValidatorBuilder {
            validators: Vec::new(),
        }
    }

    /// Returns `true` if a member handles `algorithm`
    #[must_use]
    pub fn contains(&self, algorithm: Algorithm) -> bool {
        self.validators.contains_key(&algorithm)
    }

    /// Iterates over the member algorithms in sorted order
    pub fn algorithms(&self) -> impl Iterator<Item = Algorithm> + '_ {
        self.validators.keys().copied()
    }

    /// Number of members
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns `true` if the set has no members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for AlgorithmSetValidator {
    fn algorithm(&self) -> Option<Algorithm> {
        None
    }

    fn validate(&self, header: Option<&dyn HeaderView>, message: &[u8], signature: &[u8]) -> bool {
        let Some(header) = header else {
            tracing::debug!("alg dispatch failed: no header");
            return false;
        };
        let Some(name) = header.alg() else {
            tracing::debug!("alg dispatch failed: 'alg' absent or not a string");
            return false;
        };
        let Ok(algorithm) = name.parse::<Algorithm>() else {
            tracing::debug!(alg = ?name, "alg dispatch failed: unknown algorithm");
            return false;
        };
        let Some(validator) = self.validators.get(&algorithm) else {
            tracing::debug!(%algorithm, "alg dispatch failed: algorithm not in set");
            return false;
        };
        validator.validate(Some(header), message, signature)
    }
}

impl fmt::Debug for AlgorithmSetValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmSetValidator")
            .field("algorithms", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`AlgorithmSetValidator`]
#[must_use]
pub struct AlgorithmSetValidatorBuilder {
    validators: Vec<Box<dyn Validator>>,
}

impl AlgorithmSetValidatorBuilder {
    /// Adds a member to the set
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// # Errors
    ///
    /// See [`AlgorithmSetValidator::new`].
    pub fn build(self) -> Result<AlgorithmSetValidator, ValidatorError> {
        AlgorithmSetValidator::new(self.validators)
    }
}
