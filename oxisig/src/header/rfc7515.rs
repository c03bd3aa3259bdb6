//! JWT Header Accessors based on RFC 7515 Defined Header Fields
//!
//! Only the parameters consulted during signature dispatch are exposed. Both
//! accessors return [`None`] when the field is absent or not a string.

use crate::header::HeaderView;

/// Name of the `alg` (Algorithm) Header Parameter
pub const ALG: &str = "alg";

/// Name of the `kid` (Key ID) Header Parameter
pub const KID: &str = "kid";

/// `alg` (Algorithm) Header Parameter
///
/// Ref: [RFC 7515 4.1.1](<https://datatracker.ietf.org/doc/html/rfc7515#section-4.1.1>)
pub trait Alg {
    /// Return `alg` (Algorithm) claim from JWS
    fn alg(&self) -> Option<&str>;
}

/// `kid` (Key ID) Header Parameter
///
/// Ref: [RFC 7515 4.1.4](<https://datatracker.ietf.org/doc/html/rfc7515#section-4.1.4>)
pub trait Kid {
    /// Return `kid` (Key ID) claim from JWS
    fn kid(&self) -> Option<&str>;
}

impl<H: HeaderView + ?Sized> Alg for H {
    fn alg(&self) -> Option<&str> {
        self.get_string(ALG)
    }
}

impl<H: HeaderView + ?Sized> Kid for H {
    fn kid(&self) -> Option<&str> {
        self.get_string(KID)
    }
}
