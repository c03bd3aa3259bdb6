#![cfg(feature = "openssl")]
#![allow(clippy::unwrap_used)]
use openssl::{
    pkey::{
        PKey,
        Private,
    },
    rand::rand_bytes,
    rsa::Rsa,
};
use oxisig::{
    Algorithm,
    AlgorithmSetValidator,
    KeyIdValidator,
    Signer,
    Validator,
    crypto::openssl::{
        HmacValidator,
        RsaValidator,
    },
    error::{
        SigningError,
        ValidatorError,
    },
};
use serde_json::json;

const MESSAGE: &[u8] = b"Hello World!";

#[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

fn claims() -> Claims {
    Claims {
        sub: "subscriber@example.org".into(),
        exp: 1_865_013_100,
    }
}

fn gensecret() -> [u8; 64] {
    let mut secret = [0; 64];
    rand_bytes(&mut secret).unwrap();
    secret
}

fn genrsa(alg: Algorithm) -> PKey<Private> {
    let bits = match alg {
        Algorithm::RS256 => 2048,
        Algorithm::RS384 => 3072,
        Algorithm::RS512 => 4096,
        _ => panic!("not an RSA algorithm"),
    };
    PKey::from_rsa(Rsa::generate(bits).unwrap()).unwrap()
}

fn map_jswt_alg(alg: Algorithm) -> jsonwebtoken::Algorithm {
    match alg {
        Algorithm::RS256 => jsonwebtoken::Algorithm::RS256,
        Algorithm::RS384 => jsonwebtoken::Algorithm::RS384,
        Algorithm::RS512 => jsonwebtoken::Algorithm::RS512,
        Algorithm::HS256 => jsonwebtoken::Algorithm::HS256,
        Algorithm::HS384 => jsonwebtoken::Algorithm::HS384,
        Algorithm::HS512 => jsonwebtoken::Algorithm::HS512,
        Algorithm::Unsigned => unimplemented!("unsecured tokens are unimplemented in jsonwebtoken"),
    }
}

/// Signs a JWT with `jsonwebtoken` and reports whether `key` accepts its signature
fn validate_jswt<V: Validator>(
    alg: Algorithm,
    encoding_key: &jsonwebtoken::EncodingKey,
    key: &V,
) -> bool {
    let jwt = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(map_jswt_alg(alg)),
        &claims(),
        encoding_key,
    )
    .unwrap();
    let (signing_input, signature) = jwt.rsplit_once('.').unwrap();
    let signature = base64_simd::URL_SAFE_NO_PAD
        .decode_to_vec(signature.as_bytes())
        .unwrap();
    key.validate(
        Some(&json!({"alg": alg, "typ": "JWT"})),
        signing_input.as_bytes(),
        &signature,
    )
}

fn check_leaf<S: Signer>(key: &S, other: &S) {
    let signature = key.digest(MESSAGE).unwrap();
    assert_eq!(signature.len(), key.siglen());

    assert!(key.validate(None, MESSAGE, &signature));
    assert!(key.validate(None, MESSAGE, &signature));
    assert!(!key.validate(None, b"Hello World?", &signature));

    let mut tampered = signature.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x80;
    assert!(!key.validate(None, MESSAGE, &tampered));
    assert!(!key.validate(None, MESSAGE, &signature[1..]));
    assert!(!key.validate(None, MESSAGE, b""));
    assert!(!other.validate(None, MESSAGE, &signature));

    let mut buf = vec![0; key.siglen() + 16];
    let len = key.sign(&MESSAGE[0..6], &mut buf).unwrap();
    assert_eq!(len, key.siglen());
    assert!(key.verify(None, &MESSAGE[0..6], &buf[..len]));
    assert!(!key.verify(None, &MESSAGE[0..7], &buf[..len]));
    assert!(!key.verify(None, &MESSAGE[1..7], &buf[..len]));

    let mut short = vec![0; key.siglen() - 1];
    let err = key.sign(MESSAGE, &mut short).unwrap_err();
    assert!(matches!(err, SigningError::BufferTooSmall { .. }));
}

fn hmac_sign_validate(alg: Algorithm) {
    let secret = gensecret();
    let key = HmacValidator::new(alg, &secret).unwrap();
    let other = HmacValidator::new(alg, &gensecret()).unwrap();
    assert_eq!(key.algorithm(), Some(alg));
    check_leaf(&key, &other);

    let encoding_key = jsonwebtoken::EncodingKey::from_secret(&secret);
    assert!(validate_jswt(alg, &encoding_key, &key));
    assert!(!validate_jswt(alg, &encoding_key, &other));
}

fn rsa_sign_validate(alg: Algorithm) {
    let pkey = genrsa(alg);
    let public_pem = pkey.public_key_to_pem().unwrap();
    let private_pem = pkey.private_key_to_pem_pkcs8().unwrap();

    let key = RsaValidator::new(alg, &public_pem, Some(&private_pem)).unwrap();
    let other = RsaValidator::from_private_key(alg, genrsa(alg)).unwrap();
    assert_eq!(key.algorithm(), Some(alg));
    assert!(key.can_sign());
    check_leaf(&key, &other);

    let verifier = RsaValidator::new(alg, &pkey.public_key_to_der().unwrap(), None).unwrap();
    assert!(verifier.validate(None, MESSAGE, &key.digest(MESSAGE).unwrap()));
    assert!(matches!(
        verifier.digest(MESSAGE).unwrap_err(),
        SigningError::MissingPrivateKey
    ));

    let encoding_key = jsonwebtoken::EncodingKey::from_rsa_pem(&private_pem).unwrap();
    assert!(validate_jswt(alg, &encoding_key, &verifier));
    assert!(!validate_jswt(alg, &encoding_key, &other));
}

macro_rules! test {
    ($name:ident, $test_fn: ident, $alg:expr) => {
        #[test]
        fn $name() {
            $test_fn($alg);
        }
    };
}

test!(hmac256, hmac_sign_validate, Algorithm::HS256);
test!(hmac384, hmac_sign_validate, Algorithm::HS384);
test!(hmac512, hmac_sign_validate, Algorithm::HS512);
test!(rs256, rsa_sign_validate, Algorithm::RS256);
test!(rs384, rsa_sign_validate, Algorithm::RS384);
test!(rs512, rsa_sign_validate, Algorithm::RS512);

#[test]
fn kid_and_set_dispatch() {
    let hs_one = HmacValidator::hs256(b"secret1").unwrap();
    let hs_two = HmacValidator::hs256(b"secret2").unwrap();
    let rs = RsaValidator::from_private_key(Algorithm::RS512, genrsa(Algorithm::RS256)).unwrap();
    let sig_two = hs_two.digest(MESSAGE).unwrap();
    let rs_sig = rs.digest(MESSAGE).unwrap();

    let mut keys = KeyIdValidator::empty();
    keys.register("one", hs_one).unwrap();
    keys.register("two", hs_two).unwrap();
    let err = keys
        .register("three", HmacValidator::hs512(b"secret3").unwrap())
        .unwrap_err();
    assert_eq!(
        err,
        ValidatorError::AlgorithmMismatch {
            expected: Algorithm::HS256,
            found: Algorithm::HS512
        }
    );

    let set = AlgorithmSetValidator::builder()
        .with(keys)
        .with(rs)
        .build()
        .unwrap();

    assert!(set.validate(Some(&json!({"alg": "HS256", "kid": "two"})), MESSAGE, &sig_two));
    assert!(!set.validate(Some(&json!({"alg": "HS256", "kid": "one"})), MESSAGE, &sig_two));
    assert!(!set.validate(Some(&json!({"alg": "HS256"})), MESSAGE, &sig_two));
    assert!(set.validate(Some(&json!({"alg": "RS512"})), MESSAGE, &rs_sig));
    assert!(!set.validate(Some(&json!({"alg": "RS256"})), MESSAGE, &rs_sig));
    assert!(!set.validate(Some(&json!({"kid": "two"})), MESSAGE, &sig_two));
}
