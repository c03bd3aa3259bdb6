//! Crypto backend implementations (e.g. `aws_lc`, `openssl`)
//!
//! Each backend provides the HS-family [`HmacValidator`] and RS-family
//! [`RsaValidator`] on top of its own primitives. The types share names and
//! semantics across backends; only key construction differs.
//!
//! [`HmacValidator`]: aws_lc::HmacValidator
//! [`RsaValidator`]: aws_lc::RsaValidator

#[cfg(feature = "aws-lc")]
pub mod aws_lc;

#[cfg(feature = "openssl")]
pub mod openssl;
