//! Read-only access to the untrusted, caller-parsed token header.
//!
//! Composite validators only ever look at a header through [`HeaderView`], so
//! any parsed representation can be plugged in. Implementations are provided
//! for [`serde_json::Value`], [`serde_json::Map`], and string-to-string maps.
use std::{
    collections::{
        BTreeMap,
        HashMap,
    },
    hash::BuildHasher,
};

use serde_json::{
    Map,
    Value,
};

mod rfc7515;
pub use rfc7515::{
    ALG,
    Alg,
    KID,
    Kid,
};

/// Result of looking up a single header field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField<'a> {
    /// No field with the requested name exists
    Absent,
    /// The field exists but its value is not a string
    NonString,
    /// The field exists and holds a string
    String(&'a str),
}

impl<'a> HeaderField<'a> {
    /// Collapses [`HeaderField::Absent`] and [`HeaderField::NonString`] into [`None`]
    #[must_use]
    pub const fn as_str(self) -> Option<&'a str> {
        match self {
            Self::String(value) => Some(value),
            Self::Absent | Self::NonString => None,
        }
    }
}

/// Read-only key/value lookup over a parsed token header.
///
/// The header is attacker controlled; implementations must not normalise field
/// names (no case folding, no prefix matching).
pub trait HeaderView {
    /// Look up `name`, distinguishing absent, non-string, and string values.
    fn field(&self, name: &str) -> HeaderField<'_>;

    /// Return the value of `name` if it is present and a string.
    fn get_string(&self, name: &str) -> Option<&str> {
        self.field(name).as_str()
    }
}

impl<H: HeaderView + ?Sized> HeaderView for &H {
    fn field(&self, name: &str) -> HeaderField<'_> {
        (**self).field(name)
    }
}

impl HeaderView for Map<String, Value> {
    fn field(&self, name: &str) -> HeaderField<'_> {
        match self.get(name) {
            None => HeaderField::Absent,
            Some(Value::String(value)) => HeaderField::String(value),
            Some(_) => HeaderField::NonString,
        }
    }
}

/// Non-object JSON values have no fields.
impl HeaderView for Value {
    fn field(&self, name: &str) -> HeaderField<'_> {
        match self {
            Self::Object(map) => map.field(name),
            _ => HeaderField::Absent,
        }
    }
}

impl HeaderView for BTreeMap<String, String> {
    fn field(&self, name: &str) -> HeaderField<'_> {
        self.get(name)
            .map_or(HeaderField::Absent, |value| HeaderField::String(value))
    }
}

impl<S: BuildHasher> HeaderView for HashMap<String, String, S> {
    fn field(&self, name: &str) -> HeaderField<'_> {
        self.get(name)
            .map_or(HeaderField::Absent, |value| HeaderField::String(value))
    }
}
