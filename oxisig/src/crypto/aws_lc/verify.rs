use aws_lc_rs::hmac::verify as verify_hmac;

use crate::{
    Algorithm,
    crypto::aws_lc::{
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
    /// Recomputes the tag and compares in constant time.
    fn validate(&self, _: Option<&dyn HeaderView>, message: &[u8], signature: &[u8]) -> bool {
        verify_hmac(&self.key, message, signature).is_ok()
    }
}

impl Validator for RsaValidator {
    fn algorithm(&self) -> Option<Algorithm> {
        Some(self.alg)
    }
    fn validate(&self, _: Option<&dyn HeaderView>, message: &[u8], signature: &[u8]) -> bool {
        self.public_key.verify_sig(message, signature).is_ok()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use aws_lc_rs::{
        hmac::{
            HMAC_SHA256,
            Key as HmacKey,
            sign as sign_hmac,
        },
        rsa::KeySize,
        signature::{
            KeyPair,
            RsaKeyPair,
        },
    };

    use crate::{
        crypto::aws_lc::{
            HmacValidator,
            RsaValidator,
        },
        signing::Signer,
        validation::Validator,
    };

    #[test]
    fn hmac_matches_primitive() {
        let tag = sign_hmac(&HmacKey::new(HMAC_SHA256, b"secret1"), b"Hello World!");
        let validator = HmacValidator::hs256(b"secret1");
        assert!(validator.validate(None, b"Hello World!", tag.as_ref()));
        assert!(!HmacValidator::hs256(b"secret2").validate(None, b"Hello World!", tag.as_ref()));
    }

    #[test]
    fn hmac_rejects_truncated_and_empty() {
        let validator = HmacValidator::hs512(b"secret3");
        let sig = validator.digest(b"Hello World!").unwrap();
        assert!(!validator.validate(None, b"Hello World!", &sig[..sig.len() - 1]));
        assert!(!validator.validate(None, b"Hello World!", b""));
        assert!(!validator.validate(None, b"", b""));
    }

    #[test]
    fn rsa_rejects_other_key_pair() {
        let signer = RsaValidator::from_key_pair(
            crate::Algorithm::RS256,
            RsaKeyPair::generate(KeySize::Rsa2048).unwrap(),
        )
        .unwrap();
        let other = RsaKeyPair::generate(KeySize::Rsa2048).unwrap();
        let verifier = RsaValidator::rs256(other.public_key().as_ref(), None).unwrap();

        let sig = signer.digest(b"Hello World!").unwrap();
        assert!(signer.validate(None, b"Hello World!", &sig));
        assert!(!verifier.validate(None, b"Hello World!", &sig));
    }

    #[test]
    fn rsa_rejects_garbage_signature() {
        let key = RsaKeyPair::generate(KeySize::Rsa2048).unwrap();
        let verifier = RsaValidator::rs384(key.public_key().as_ref(), None).unwrap();
        assert!(!verifier.validate(None, b"Hello World!", b""));
        assert!(!verifier.validate(None, b"Hello World!", &[0u8; 256]));
        assert!(!verifier.validate(None, b"Hello World!", &[0xffu8; 1024]));
    }
}
