//! Provides signature generation functionality
use crate::{
    error::SigningError,
    header::HeaderView,
    validation::Validator,
};

/// A [`Validator`] that can also produce signatures, usually implemented on a
/// wrapper around a cryptographic key.
///
/// Two layers are provided. [`Signer::sign`] and [`Signer::verify`] operate on an
/// explicit byte range (any sub-slice of a larger buffer) and write into
/// caller-supplied storage. [`Signer::digest`] and [`Validator::validate`] are the
/// whole-message conveniences built on top of them.
pub trait Signer: Validator {
    /// Crypto backend error type to be wrapped by [`SigningError::Backend`]
    type Error: Sized + std::error::Error;

    /// This method MUST return the exact size, in bytes, of the signatures produced
    /// by the `Signer`, or `0` if it cannot sign (e.g. a verify-only key).
    fn siglen(&self) -> usize;

    /// Sign `data`, writing the signature to the start of `signature`.
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    ///
    /// # Errors
    ///
    /// - [`SigningError::MissingPrivateKey`] when the `Signer` holds no signing key
    /// - [`SigningError::BufferTooSmall`] when `signature` is shorter than
    ///   [`Signer::siglen`]; nothing is written in that case
    /// - [`SigningError::Backend`] when the crypto backend fails
    fn sign(&self, data: &[u8], signature: &mut [u8]) -> Result<usize, SigningError<Self::Error>>;

    /// Verify `signature` over the byte range `data`.
    ///
    /// Identical to [`Validator::validate`]: a slice already carries its length,
    /// so `validate` is the implemented primitive and `verify` forwards to it.
    fn verify(&self, header: Option<&dyn HeaderView>, data: &[u8], signature: &[u8]) -> bool {
        self.validate(header, data, signature)
    }

    /// Compute the signature of a whole `message`.
    ///
    /// # Errors
    ///
    /// See [`Signer::sign`]; in practice only [`SigningError::MissingPrivateKey`]
    /// or a backend error.
    fn digest(&self, message: &[u8]) -> Result<Vec<u8>, SigningError<Self::Error>> {
        let mut signature = vec![0; self.siglen()];
        let len = self.sign(message, &mut signature)?;
        signature.truncate(len);
        Ok(signature)
    }
}

pub(crate) fn ensure_capacity<E>(
    required: usize,
    provided: usize,
) -> Result<(), SigningError<E>>
where
    E: Sized + std::error::Error,
{
    if provided < required {
        Err(SigningError::BufferTooSmall { required, provided })
    } else {
        Ok(())
    }
}
