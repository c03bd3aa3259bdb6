//! Provides [`KeyIdValidator`], which selects a registered key by the `kid`
//! JWT header parameter while pinning every key to a single algorithm.
use std::{
    collections::BTreeMap,
    fmt,
};

use crate::{
    Algorithm,
    error::ValidatorError,
    header::{
        HeaderView,
        Kid,
    },
    validation::Validator,
};

/// In-memory registry of [`Validator`]s that determines which one verifies a
/// signature via the `kid` JWT header parameter.
///
/// All registered validators share one [`Algorithm`]: the first registration
/// establishes it and later registrations with a different algorithm are
/// rejected. The untrusted `kid` can therefore choose between keys, but never
/// between algorithms.
///
/// Registration requires `&mut self`; populate the registry during setup and
/// then share it (e.g. behind an [`Arc`](std::sync::Arc)) for verification.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "aws-lc")] {
/// use oxisig::{
///     Signer,
///     Validator,
///     crypto::aws_lc::HmacValidator,
///     validation::KeyIdValidator,
/// };
/// use serde_json::json;
///
/// let old = HmacValidator::hs256(b"2023 secret");
/// let sig = old.digest(b"payload").unwrap();
///
/// let keys = KeyIdValidator::builder()
///     .with_key("2023", old)
///     .with_key("2024", HmacValidator::hs256(b"2024 secret"))
///     .build()
///     .unwrap();
///
/// let header = json!({"alg": "HS256", "kid": "2023"});
/// assert!(keys.validate(Some(&header), b"payload", &sig));
///
/// let header = json!({"alg": "HS256", "kid": "2024"});
/// assert!(!keys.validate(Some(&header), b"payload", &sig));
/// # }
/// ```
#[derive(Default)]
pub struct KeyIdValidator {
    algorithm: Option<Algorithm>,
    keystore: BTreeMap<String, Box<dyn Validator>>,
}

impl KeyIdValidator {
    /// Instantiates a new, empty [`KeyIdValidator`]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            algorithm: None,
            keystore: BTreeMap::new(),
        }
    }

    /// Returns a [`KeyIdValidatorBuilder`] for chained registration
    #[must_use]
    pub const fn builder() -> KeyIdValidatorBuilder {
        KeyIdValidatorBuilder { keys: Vec::new() }
    }

    /// Adds a [`Validator`] to the registry under `key_id`
    ///
    /// # Errors
    ///
    /// - [`ValidatorError::UndeterminedAlgorithm`] when `validator` has no algorithm
    /// - [`ValidatorError::AlgorithmMismatch`] when the registry is non-empty and
    ///   `validator` uses a different algorithm than the registered keys
    /// - [`ValidatorError::DuplicateKeyId`] when `key_id` is already registered
    pub fn register(
        &mut self,
        key_id: impl Into<String>,
        validator: impl Validator + 'static,
    ) -> Result<(), ValidatorError> {
        self.register_boxed(key_id, Box::new(validator))
    }

    /// Same as [`KeyIdValidator::register`] for an already boxed validator
    ///
    /// # Errors
    ///
    /// See [`KeyIdValidator::register`].
    pub fn register_boxed(
        &mut self,
        key_id: impl Into<String>,
        validator: Box<dyn Validator>,
    ) -> Result<(), ValidatorError> {
        let key_id = key_id.into();
        let result = self.try_insert(key_id, validator);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "rejected key registration");
        }
        result
    }

    fn try_insert(
        &mut self,
        key_id: String,
        validator: Box<dyn Validator>,
    ) -> Result<(), ValidatorError> {
        let found = validator
            .algorithm()
            .ok_or(ValidatorError::UndeterminedAlgorithm)?;
        if let Some(expected) = self.algorithm
            && expected != found
        {
            return Err(ValidatorError::AlgorithmMismatch { expected, found });
        }
        if self.keystore.contains_key(&key_id) {
            return Err(ValidatorError::DuplicateKeyId(key_id));
        }
        self.algorithm = Some(found);
        self.keystore.insert(key_id, validator);
        Ok(())
    }

    /// Removes a key from the registry, returning `true` if it was present
    ///
    /// Removing the last key releases the algorithm pin.
    pub fn remove_key(&mut self, key_id: impl AsRef<str>) -> bool {
        let removed = self.keystore.remove(key_id.as_ref()).is_some();
        if self.keystore.is_empty() {
            self.algorithm = None;
        }
        removed
    }

    /// Returns `true` if `key_id` is registered
    #[must_use]
    pub fn contains_key(&self, key_id: &str) -> bool {
        self.keystore.contains_key(key_id)
    }

    /// Iterates over registered key identifiers in sorted order
    pub fn key_ids(&self) -> impl Iterator<Item = &str> {
        self.keystore.keys().map(String::as_str)
    }

    /// Number of registered keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keystore.len()
    }

    /// Returns `true` if no keys are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keystore.is_empty()
    }
}

impl Validator for KeyIdValidator {
    fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    fn validate(&self, header: Option<&dyn HeaderView>, message: &[u8], signature: &[u8]) -> bool {
        let Some(header) = header else {
            tracing::debug!("kid dispatch failed: no header");
            return false;
        };
        let Some(key_id) = header.kid() else {
            tracing::debug!("kid dispatch failed: 'kid' absent or not a string");
            return false;
        };
        let Some(validator) = self.keystore.get(key_id) else {
            tracing::debug!(kid = ?key_id, "kid dispatch failed: unknown key id");
            return false;
        };
        validator.validate(Some(header), message, signature)
    }
}

impl fmt::Debug for KeyIdValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyIdValidator")
            .field("algorithm", &self.algorithm)
            .field("key_ids", &self.keystore.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`KeyIdValidator`]; registration errors are reported by
/// [`KeyIdValidatorBuilder::build`].
#[must_use]
pub struct KeyIdValidatorBuilder {
    keys: Vec<(String, Box<dyn Validator>)>,
}

impl KeyIdValidatorBuilder {
    /// Queues `validator` for registration under `key_id`
    pub fn with_key(mut self, key_id: impl Into<String>, validator: impl Validator + 'static) -> Self {
        self.keys.push((key_id.into(), Box::new(validator)));
        self
    }

    /// Registers all queued keys in the order they were added
    ///
    /// # Errors
    ///
    /// The first error raised by [`KeyIdValidator::register`].
    pub fn build(self) -> Result<KeyIdValidator, ValidatorError> {
        let mut validator = KeyIdValidator::empty();
        for (key_id, key) in self.keys {
            validator.register_boxed(key_id, key)?;
        }
        Ok(validator)
    }
}
