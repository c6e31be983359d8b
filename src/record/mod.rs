// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Factory configuration records.
//!
//! A record is a CBOR map with up to five top-level entries, always in this
//! order, and only when present:
//!
//! ```text
//! {
//!   "SchemeVersion": text,
//!   "Keys":          [ { "Name", "Type", "Format", "Data" }, ... ],
//!   "Certificates":  [ { "Name", "Format", "Data" }, ... ],
//!   "Csrs":          [ { "Name", "Format", "Data" }, ... ],
//!   "ConfigParams":  [ { "Name", "Data" }, ... ],
//! }
//! ```
//!
//! Group and field names are a case-sensitive wire contract. Records are
//! assembled with a [`Builder`], flattened with
//! [`Record::to_canonical_form()`], and optionally broken on purpose with a
//! [`Corruption`].

use crate::asset;
use crate::cbor::Value;
use crate::named::NamedEnum as _;

mod builder;
mod corrupt;
pub mod params;
#[cfg(feature = "serde")]
pub mod template;

pub use builder::Builder;
pub use corrupt::corrupt;
pub use corrupt::Corruption;

/// The scheme version written by [`Builder::with_default_groups()`].
pub const CURRENT_SCHEME_VERSION: &str = "0.0.1";

/// The top-level key carrying the scheme version.
pub const SCHEME_VERSION_KEY: &str = "SchemeVersion";

/// The default encoding named in an entry's `Format` field.
pub const DEFAULT_FORMAT: &str = "der";

/// An error encountered while assembling or corrupting a record.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Indicates an asset reference that could not be resolved.
    Asset(asset::Error),

    /// Indicates an entry added to a group that must be enabled explicitly
    /// first.
    GroupDisabled(Group),

    /// Indicates a corruption whose target does not exist in the record.
    NoSuchTarget(Corruption),
}

impl From<asset::Error> for Error {
    fn from(e: asset::Error) -> Self {
        Self::Asset(e)
    }
}

named_enum! {
    /// The kind of key held in a [`KeyEntry`].
    pub enum KeyType {
        /// An elliptic-curve public key.
        EccPublic = "ECCPublic",
        /// An elliptic-curve private key.
        EccPrivate = "ECCPrivate",
        /// An RSA public key.
        RsaPublic = "RSAPublic",
        /// An RSA private key.
        RsaPrivate = "RSAPrivate",
    }
}

named_enum! {
    /// A top-level group of entries.
    pub enum Group {
        /// Keys.
        Keys = "Keys",
        /// Certificates.
        Certificates = "Certificates",
        /// Certificate signing requests.
        Csrs = "Csrs",
        /// Configuration parameters.
        ConfigParams = "ConfigParams",
    }
}

named_enum! {
    /// A field inside a group entry.
    pub enum Field {
        /// The entry's name.
        Name = "Name",
        /// The key type; only present on keys.
        Type = "Type",
        /// The encoding of `Data`.
        Format = "Format",
        /// The payload.
        Data = "Data",
    }
}

/// A key, with its raw encoding.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct KeyEntry {
    /// The name the device stores the key under.
    pub name: String,
    /// What kind of key this is.
    pub key_type: KeyType,
    /// The encoding of `data`; need not be a valid format name.
    pub format: String,
    /// The encoded key.
    pub data: Vec<u8>,
}

/// A certificate or CSR, with its raw encoding.
///
/// Certificates and CSRs share a shape; which group an entry belongs to
/// decides what it is.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BlobEntry {
    /// The name the device stores the item under.
    pub name: String,
    /// The encoding of `data`; need not be a valid format name.
    pub format: String,
    /// The encoded certificate or CSR.
    pub data: Vec<u8>,
}

/// A parameter value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ParamValue {
    /// A text parameter.
    Text(String),
    /// An integer parameter; may exceed 64 bits.
    Int(i128),
    /// A byte-string parameter.
    Bytes(Vec<u8>),
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i128> for ParamValue {
    fn from(n: i128) -> Self {
        Self::Int(n)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        Self::Int(n.into())
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        Self::Int(n.into())
    }
}

impl From<Vec<u8>> for ParamValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<&ParamValue> for Value {
    fn from(p: &ParamValue) -> Self {
        match p {
            ParamValue::Text(s) => Value::Text(s.clone()),
            ParamValue::Int(n) => Value::Int(*n),
            ParamValue::Bytes(b) => Value::Bytes(b.clone()),
        }
    }
}

/// A configuration parameter.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ConfigParam {
    /// The parameter's name, such as `mbed.EndpointName`.
    pub name: String,
    /// The parameter's value.
    pub data: ParamValue,
}

/// A complete configuration record.
///
/// A `None` group is absent from the encoding entirely; a `Some` group is
/// encoded even when empty.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Record {
    /// The scheme version, if any.
    pub scheme_version: Option<String>,
    /// The `Keys` group.
    pub keys: Option<Vec<KeyEntry>>,
    /// The `Certificates` group.
    pub certificates: Option<Vec<BlobEntry>>,
    /// The `Csrs` group.
    pub csrs: Option<Vec<BlobEntry>>,
    /// The `ConfigParams` group. Duplicate names are kept, in order.
    pub params: Option<Vec<ConfigParam>>,
}

fn blob_entry(e: &BlobEntry) -> Value {
    Value::Map(vec![
        (Field::Name.name().into(), e.name.as_str().into()),
        (Field::Format.name().into(), e.format.as_str().into()),
        (Field::Data.name().into(), e.data.clone().into()),
    ])
}

impl Record {
    /// Flattens `self` into a CBOR value tree, in wire order.
    pub fn to_canonical_form(&self) -> Value {
        let mut map = Vec::new();
        if let Some(v) = &self.scheme_version {
            map.push((SCHEME_VERSION_KEY.into(), v.as_str().into()));
        }

        if let Some(keys) = &self.keys {
            let keys = keys
                .iter()
                .map(|k| {
                    Value::Map(vec![
                        (Field::Name.name().into(), k.name.as_str().into()),
                        (Field::Type.name().into(), k.key_type.name().into()),
                        (Field::Format.name().into(), k.format.as_str().into()),
                        (Field::Data.name().into(), k.data.clone().into()),
                    ])
                })
                .collect();
            map.push((Group::Keys.name().into(), Value::Array(keys)));
        }

        if let Some(certs) = &self.certificates {
            let certs = certs.iter().map(blob_entry).collect();
            map.push((Group::Certificates.name().into(), Value::Array(certs)));
        }

        if let Some(csrs) = &self.csrs {
            let csrs = csrs.iter().map(blob_entry).collect();
            map.push((Group::Csrs.name().into(), Value::Array(csrs)));
        }

        if let Some(params) = &self.params {
            let params = params
                .iter()
                .map(|p| {
                    Value::Map(vec![
                        (Field::Name.name().into(), p.name.as_str().into()),
                        (Field::Data.name().into(), (&p.data).into()),
                    ])
                })
                .collect();
            map.push((Group::ConfigParams.name().into(), Value::Array(params)));
        }

        Value::Map(map)
    }

    /// Encodes `self` as CBOR.
    pub fn to_cbor(&self) -> Vec<u8> {
        self.to_canonical_form().to_bytes()
    }

    /// Returns every value of the parameter called `name`, in order.
    pub fn params_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a ParamValue> + 'a {
        self.params
            .iter()
            .flatten()
            .filter(move |p| p.name == name)
            .map(|p| &p.data)
    }
}

#[cfg(test)]
mod test;
