use openssl::{
    error::ErrorStack,
    sign::Signer,
};

use crate::{
    crypto::openssl::{
        HmacValidator,
        RsaValidator,
    },
    error::SigningError,
    signing::{
        Signer as OxiSigner,
        ensure_capacity,
    },
};

impl OxiSigner for HmacValidator {
    type Error = ErrorStack;
    fn siglen(&self) -> usize {
        self.digest.size()
    }
    fn sign(&self, data: &[u8], signature: &mut [u8]) -> Result<usize, SigningError<Self::Error>> {
        ensure_capacity(self.siglen(), signature.len())?;
        let mut signer = Signer::new(self.digest, &self.key)?;
        signer.update(data)?;
        Ok(signer.sign(signature)?)
    }
}

impl OxiSigner for RsaValidator {
    type Error = ErrorStack;
    fn siglen(&self) -> usize {
        self.private_key.as_ref().map_or(0, |key| key.size())
    }
    fn sign(&self, data: &[u8], signature: &mut [u8]) -> Result<usize, SigningError<Self::Error>> {
        let key = self
            .private_key
            .as_ref()
            .ok_or(SigningError::MissingPrivateKey)?;
        let mut signer = Signer::new(self.digest, key)?;
        ensure_capacity(signer.len()?, signature.len())?;
        signer.update(data)?;
        Ok(signer.sign(signature)?)
    }
}
