#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![doc = include_str!("../README.md")]

/// Error enums
pub mod error;

/// Read-only views over the untrusted token header.
pub mod header;

/// Traits and composites supporting signature validation.
pub mod validation;

/// Functionality for producing signatures.
pub mod signing;

/// Crypto backend implementations (e.g. `aws_lc`, `openssl`)
pub mod crypto;

/// Declarative construction of validator trees.
#[cfg(feature = "aws-lc")]
pub mod config;

pub use algorithm::Algorithm;
pub use signing::Signer;
pub use validation::{
    AlgorithmSetValidator,
    KeyIdValidator,
    NoneValidator,
    Validator,
};

mod algorithm;
