#![allow(clippy::unwrap_used)]
use std::sync::Arc;

use aws_lc_rs::rsa::{
    KeyPair as RsaKeyPair,
    KeySize,
};
use oxisig::{
    Algorithm,
    AlgorithmSetValidator,
    KeyIdValidator,
    Signer,
    Validator,
    config::ValidatorConfig,
    crypto::aws_lc::{
        HmacValidator,
        RsaValidator,
    },
    error::ValidatorError,
};
use serde_json::json;

fn main() {
    // ANCHOR: rotation
    // The issuer signs with whichever key is current; verifiers accept every
    // registered key, but only under the pinned algorithm.
    let current = Arc::new(HmacValidator::hs256(b"2024-07 secret"));
    let mut keys = KeyIdValidator::empty();
    keys.register("2024-01", HmacValidator::hs256(b"2024-01 secret"))
        .unwrap();
    keys.register("2024-07", Arc::clone(&current)).unwrap();

    // a key for another algorithm cannot be slipped into the registry
    let err = keys
        .register("2024-08", HmacValidator::hs512(b"2024-08 secret"))
        .unwrap_err();
    assert_eq!(
        err,
        ValidatorError::AlgorithmMismatch {
            expected: Algorithm::HS256,
            found: Algorithm::HS512
        }
    );

    let signature = current.digest(b"header.payload").unwrap();
    assert!(keys.validate(
        Some(&json!({"alg": "HS256", "kid": "2024-07"})),
        b"header.payload",
        &signature
    ));

    // retire the old key
    assert!(keys.remove_key("2024-01"));
    assert!(!keys.contains_key("2024-01"));
    // ANCHOR_END: rotation

    // ANCHOR: migration
    // Accept RS256 alongside the HS256 keys while clients migrate.
    let rsa = RsaValidator::from_key_pair(
        Algorithm::RS256,
        RsaKeyPair::generate(KeySize::Rsa2048).unwrap(),
    )
    .unwrap();
    let rsa_signature = rsa.digest(b"header.payload").unwrap();
    let validator = AlgorithmSetValidator::builder()
        .with(keys)
        .with(rsa)
        .build()
        .unwrap();

    assert!(validator.validate(
        Some(&json!({"alg": "RS256"})),
        b"header.payload",
        &rsa_signature
    ));
    assert!(validator.validate(
        Some(&json!({"alg": "HS256", "kid": "2024-07"})),
        b"header.payload",
        &signature
    ));
    // an attacker cannot downgrade to an unsigned token
    assert!(!validator.validate(Some(&json!({"alg": "none"})), b"header.payload", b""));
    // ANCHOR_END: migration

    // ANCHOR: config
    let validator = ValidatorConfig::from_json(
        r#"{"kid": {"2024-07": {"HS256": {"secret": "2024-07 secret"}}}}"#,
    )
    .unwrap()
    .build()
    .unwrap();
    assert!(validator.validate(
        Some(&json!({"kid": "2024-07"})),
        b"header.payload",
        &signature
    ));
    // ANCHOR_END: config

    println!("all rotation checks passed");
}
