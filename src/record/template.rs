// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Record templates.
//!
//! A template is a serde-friendly description of a record whose payloads are
//! asset references rather than bytes. It is resolved against an
//! [`AssetStore`] with [`Template::build()`].
//!
//! In JSON, a template looks like this:
//! ```text
//! {
//!   "SchemeVersion": "0.0.1",
//!   "Keys": [
//!     { "Name": "E2EDevice", "Type": "ECCPrivate", "Asset": "priv_ecc_key1.der" }
//!   ],
//!   "Certificates": [],
//!   "ConfigParams": [
//!     { "Name": "mbed.SerialNumber", "Data": { "Text": "A12FC-45" } },
//!     { "Name": "mbed.AccountID", "Data": { "Int": "0xA65369B6589987655264" } }
//!   ]
//! }
//! ```
//!
//! An absent group is absent from the record; an empty list produces an
//! empty group. `Format` defaults to `der`.

use serde::Deserialize;
use serde::Serialize;

use crate::asset::AssetStore;
use crate::record::Builder;
use crate::record::Error;
use crate::record::Group;
use crate::record::KeyType;
use crate::record::Record;
use crate::record::DEFAULT_FORMAT;
use crate::serde::de_hex_bytes;
use crate::serde::de_radix;
use crate::serde::se_hex_bytes;

fn default_format() -> String {
    DEFAULT_FORMAT.into()
}

/// A key slot, referring to an asset.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyTemplate {
    /// The name the device stores the key under.
    pub name: String,
    /// What kind of key this is.
    #[serde(rename = "Type")]
    pub key_type: KeyType,
    /// The encoding of the asset.
    #[serde(default = "default_format")]
    pub format: String,
    /// The asset holding the key.
    pub asset: String,
}

/// A certificate or CSR slot, referring to an asset.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlobTemplate {
    /// The name the device stores the item under.
    pub name: String,
    /// The encoding of the asset.
    #[serde(default = "default_format")]
    pub format: String,
    /// The asset holding the item.
    pub asset: String,
}

/// A parameter value.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub enum ValueTemplate {
    /// A text value.
    Text(String),
    /// An integer, either a number or a string with an optional radix
    /// prefix.
    Int(#[serde(deserialize_with = "de_radix")] i128),
    /// A byte string, written as hex.
    Hex(
        #[serde(deserialize_with = "de_hex_bytes", serialize_with = "se_hex_bytes")]
        Vec<u8>,
    ),
    /// A byte string taken from an asset.
    Asset(String),
}

/// A configuration parameter.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParamTemplate {
    /// The parameter's name.
    pub name: String,
    /// The parameter's value.
    pub data: ValueTemplate,
}

/// A record description.
#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    /// The scheme version, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_version: Option<String>,
    /// The `Keys` group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<KeyTemplate>>,
    /// The `Certificates` group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificates: Option<Vec<BlobTemplate>>,
    /// The `Csrs` group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrs: Option<Vec<BlobTemplate>>,
    /// The `ConfigParams` group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_params: Option<Vec<ParamTemplate>>,
}

impl Template {
    /// Resolves this template against `assets`.
    pub fn build(&self, assets: &AssetStore) -> Result<Record, Error> {
        let mut b = Builder::new(assets);
        if let Some(v) = &self.scheme_version {
            b.set_scheme_version(v.as_str());
        }

        if let Some(keys) = &self.keys {
            b.enable(Group::Keys);
            for k in keys {
                b.add_key(k.name.as_str(), &k.asset, k.key_type, k.format.as_str())?;
            }
        }
        if let Some(certs) = &self.certificates {
            b.enable(Group::Certificates);
            for c in certs {
                b.add_certificate(c.name.as_str(), &c.asset, c.format.as_str())?;
            }
        }
        if let Some(csrs) = &self.csrs {
            b.enable(Group::Csrs);
            for c in csrs {
                b.add_csr(c.name.as_str(), &c.asset, c.format.as_str())?;
            }
        }
        if let Some(params) = &self.config_params {
            b.enable(Group::ConfigParams);
            for p in params {
                match &p.data {
                    ValueTemplate::Text(s) => b.set_param(p.name.as_str(), s.as_str()),
                    ValueTemplate::Int(n) => b.set_param(p.name.as_str(), *n),
                    ValueTemplate::Hex(bytes) => {
                        b.set_param(p.name.as_str(), bytes.clone())
                    }
                    ValueTemplate::Asset(name) => {
                        b.set_param(p.name.as_str(), assets.get(name)?.to_vec())
                    }
                };
            }
        }

        Ok(b.build())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::asset;
    use crate::record::ParamValue;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = r#"{
        "SchemeVersion": "0.0.1",
        "Keys": [
            { "Name": "E2EDevice", "Type": "ECCPrivate", "Asset": "priv_ecc_key1.der" }
        ],
        "Certificates": [],
        "ConfigParams": [
            { "Name": "mbed.SerialNumber", "Data": { "Text": "A12FC-45" } },
            { "Name": "mbed.AccountID", "Data": { "Int": "0xA65369B6589987655264" } },
            { "Name": "mbed.UseBootstrap", "Data": { "Int": 1 } },
            { "Name": "Blob", "Data": { "Hex": "c0ffee" } },
            { "Name": "Cert", "Data": { "Asset": "x509_1_ca.der" } }
        ]
    }"#;

    fn assets() -> AssetStore {
        let mut assets = AssetStore::new();
        assets.insert("priv_ecc_key1.der", vec![0x30, 0x77]);
        assets.insert("x509_1_ca.der", vec![0x30, 0x82]);
        assets
    }

    #[test]
    fn build() {
        let template: Template = serde_json::from_str(TEMPLATE).unwrap();
        let record = template.build(&assets()).unwrap();

        assert_eq!(record.scheme_version.as_deref(), Some("0.0.1"));
        let keys = record.keys.as_ref().unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].key_type, KeyType::EccPrivate);
        assert_eq!(keys[0].format, "der");
        assert_eq!(keys[0].data, [0x30, 0x77]);
        assert_eq!(record.certificates, Some(vec![]));
        assert_eq!(record.csrs, None);

        let data: Vec<_> = record
            .params
            .iter()
            .flatten()
            .map(|p| p.data.clone())
            .collect();
        assert_eq!(
            data,
            vec![
                ParamValue::Text("A12FC-45".into()),
                ParamValue::Int(0xA653_69B6_5899_8765_5264),
                ParamValue::Int(1),
                ParamValue::Bytes(vec![0xc0, 0xff, 0xee]),
                ParamValue::Bytes(vec![0x30, 0x82]),
            ]
        );
    }

    #[test]
    fn unresolved_asset() {
        let template: Template = serde_json::from_str(
            r#"{ "Certificates": [ { "Name": "RootCA", "Asset": "nope.der" } ] }"#,
        )
        .unwrap();
        assert_eq!(
            template.build(&assets()),
            Err(Error::Asset(asset::Error::Missing("nope.der".into())))
        );
    }

    #[test]
    fn unknown_key_type() {
        let json = r#"{ "Keys": [ { "Name": "K", "Type": "eccprivate", "Asset": "a" } ] }"#;
        assert!(serde_json::from_str::<Template>(json).is_err());
    }
}
