use openssl::{
    memcmp,
    sign::{
        Signer,
        Verifier,
    },
};

use crate::{
    Algorithm,
    crypto::openssl::{
        HmacValidator,
        RsaValidator,
    },
    header::HeaderView,
    validation::Validator,
};

impl Validator for HmacValidator {
    fn algorithm(&self) -> Option<Algorithm> {
        Some(self.alg)
    }
    fn validate(&self, _: Option<&dyn HeaderView>, msg: &[u8], asig: &[u8]) -> bool {
        let Ok(mut signer) = Signer::new(self.digest, &self.key) else {
            return false;
        };
        if signer.update(msg).is_err() {
            return false;
        }
        let Ok(csig) = signer.sign_to_vec() else {
            return false;
        };
        // memcmp::eq panics on unequal lengths
        csig.len() == asig.len() && memcmp::eq(&csig, asig)
    }
}

impl Validator for RsaValidator {
    fn algorithm(&self) -> Option<Algorithm> {
        Some(self.alg)
    }
    fn validate(&self, _: Option<&dyn HeaderView>, message: &[u8], signature: &[u8]) -> bool {
        let Ok(mut verifier) = Verifier::new(self.digest, &self.public_key) else {
            return false;
        };
        verifier.verify_oneshot(signature, message).unwrap_or(false)
    }
}
