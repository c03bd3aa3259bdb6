use aws_lc_rs::{
    error::Unspecified,
    hmac::sign as sign_hmac,
    rand::SystemRandom,
};

use crate::{
    crypto::aws_lc::{
        HmacValidator,
        RsaValidator,
    },
    error::SigningError,
    signing::{
        Signer,
        ensure_capacity,
    },
};

impl Signer for HmacValidator {
    type Error = Unspecified;
    fn siglen(&self) -> usize {
        self.key.algorithm().digest_algorithm().output_len()
    }
    fn sign(&self, data: &[u8], signature: &mut [u8]) -> Result<usize, SigningError<Self::Error>> {
        let tag = sign_hmac(&self.key, data);
        let tag = tag.as_ref();
        ensure_capacity(tag.len(), signature.len())?;
        signature[..tag.len()].copy_from_slice(tag);
        Ok(tag.len())
    }
}

impl Signer for RsaValidator {
    type Error = Unspecified;
    fn siglen(&self) -> usize {
        self.private_key
            .as_ref()
            .map_or(0, |key| key.public_modulus_len())
    }
    fn sign(&self, data: &[u8], signature: &mut [u8]) -> Result<usize, SigningError<Self::Error>> {
        let key = self
            .private_key
            .as_ref()
            .ok_or(SigningError::MissingPrivateKey)?;
        let siglen = key.public_modulus_len();
        ensure_capacity(siglen, signature.len())?;

        // PKCS#1 v1.5 is deterministic; the rng is only used for blinding
        let rng = SystemRandom::new();
        key.sign(self.encoding, &rng, data, &mut signature[..siglen])?;
        Ok(siglen)
    }
}
