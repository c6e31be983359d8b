// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! CBOR encoding and decoding.
//!
//! This is not a complete CBOR implementation; it covers exactly the data
//! model of a factory configuration record:
//! - Maps with text keys, kept in insertion order (keys are never sorted).
//! - Arrays, UTF-8 text, byte strings.
//! - Integers of up to 128 bits; anything outside the 64-bit CBOR range is
//!   written as a tag 2 or tag 3 bignum.
//!
//! Encoding always uses the shortest argument form and never uses
//! indefinite lengths, tags other than bignums, floats, or simple values.
//! The decoder rejects all of those too.
//!
//! See: https://datatracker.ietf.org/doc/html/rfc8949

use crate::io;

mod decode;
mod encode;

#[cfg(test)]
#[macro_use]
pub(crate) mod macros;


pub use decode::decode;
pub use decode::MAX_DEPTH;

/// An error produced while encoding or decoding CBOR.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Indicates that the input ended in the middle of an item.
    UnexpectedEof,

    /// Indicates that an argument was not encoded in its shortest form, or
    /// that a bignum was used where a plain integer would do.
    NotMinimal,

    /// Indicates an indefinite-length item.
    Indefinite,

    /// Indicates a float, a simple value, a reserved argument size, or a tag
    /// other than a bignum.
    Unsupported,

    /// Indicates a text string that was not valid UTF-8.
    BadUtf8,

    /// Indicates a map key that was not a text string.
    NonTextKey,

    /// Indicates an integer that does not fit in 128 bits.
    OutOfRange,

    /// Indicates nesting deeper than [`MAX_DEPTH`].
    TooDeep,

    /// Indicates bytes left over after the top-level item.
    TrailingData,

    /// Indicates that the output sink failed.
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<untrusted::EndOfInput> for Error {
    fn from(_: untrusted::EndOfInput) -> Self {
        Self::UnexpectedEof
    }
}

/// A CBOR value tree.
///
/// This is the canonical form that records are flattened into before
/// encoding. Map entries are an ordered list of pairs, so the order they are
/// inserted in is exactly the order they are encoded in; duplicate keys are
/// representable and are encoded as-is.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Value {
    /// An integer, encoded with major type 0 or 1, or as a bignum.
    Int(i128),
    /// A byte string (major type 2).
    Bytes(Vec<u8>),
    /// A UTF-8 text string (major type 3).
    Text(String),
    /// An array (major type 4).
    Array(Vec<Value>),
    /// A map with text keys (major type 5).
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Creates an empty map.
    pub fn map() -> Self {
        Self::Map(Vec::new())
    }

    /// Encodes `self` into a freshly allocated buffer.
    ///
    /// Encoding the same value twice always yields identical bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        encode::encode_into(self, &mut out);
        out
    }

    /// Encodes `self` into `w`.
    pub fn encode(&self, mut w: impl io::Write) -> Result<(), Error> {
        w.write_bytes(&self.to_bytes())?;
        Ok(())
    }

    /// Looks up the first entry with the given key, if `self` is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Looks up the first entry with the given key mutably, if `self` is a
    /// map.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries_mut()?
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Appends an entry, if `self` is a map.
    ///
    /// Returns `false` if `self` is not a map.
    pub fn push_entry(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> bool {
        match self {
            Self::Map(m) => {
                m.push((key.into(), value.into()));
                true
            }
            _ => false,
        }
    }

    /// Renames the first entry with key `from` to `to`, keeping its position.
    ///
    /// Returns `false` if there is no such entry.
    pub fn rename_key(&mut self, from: &str, to: impl Into<String>) -> bool {
        let entry = self
            .entries_mut()
            .and_then(|m| m.iter_mut().find(|(k, _)| k == from));
        match entry {
            Some((k, _)) => {
                *k = to.into();
                true
            }
            None => false,
        }
    }

    /// Removes and returns the first entry with the given key.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let m = self.entries_mut()?;
        let idx = m.iter().position(|(k, _)| k == key)?;
        Some(m.remove(idx).1)
    }

    /// Returns the entries of `self`, if it is a map.
    pub fn entries(&self) -> Option<&[(String, Value)]> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the entries of `self` mutably, if it is a map.
    pub fn entries_mut(&mut self) -> Option<&mut Vec<(String, Value)>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the elements of `self`, if it is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the elements of `self` mutably, if it is an array.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the contents of `self`, if it is a text string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contents of `self`, if it is a byte string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value of `self`, if it is an integer.
    pub fn as_int(&self) -> Option<i128> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.into())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Self::Array(a)
    }
}

macro_rules! from_int {
    ($($ty:ident)*) => {$(
        impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Self::Int(n.into())
            }
        }
    )*};
}
from_int!(u8 u16 u32 u64 i8 i16 i32 i64 i128);

/// Serializes a decoded value for human inspection.
///
/// Byte strings become lowercase hex strings, and integers that do not fit
/// in 64 bits become decimal strings, since JSON cannot carry either
/// directly.
#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use core::convert::TryFrom as _;
        use serde::ser::SerializeMap as _;
        use serde::ser::SerializeSeq as _;

        match self {
            Self::Int(n) => {
                if let Ok(n) = i64::try_from(*n) {
                    s.serialize_i64(n)
                } else if let Ok(n) = u64::try_from(*n) {
                    s.serialize_u64(n)
                } else {
                    s.collect_str(n)
                }
            }
            Self::Bytes(b) => s.serialize_str(&hex::encode(b)),
            Self::Text(t) => s.serialize_str(t),
            Self::Array(a) => {
                let mut seq = s.serialize_seq(Some(a.len()))?;
                for v in a {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            Self::Map(m) => {
                let mut map = s.serialize_map(Some(m.len()))?;
                for (k, v) in m {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
