// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Record tests.

use pretty_assertions::assert_eq;

use crate::asset;
use crate::asset::AssetStore;
use crate::cbor;
use crate::cbor::Value;
use crate::record::corrupt;
use crate::record::params;
use crate::record::Builder;
use crate::record::Corruption;
use crate::record::Error;
use crate::record::Field;
use crate::record::Group;
use crate::record::KeyType;
use crate::record::ParamValue;
use crate::record::Record;

fn assets() -> AssetStore {
    let mut assets = AssetStore::new();
    assets.insert("priv_ecc_key1.der", vec![0x11; 32]);
    assets.insert("pub_ecc_key1.der", vec![0x22; 91]);
    assets.insert("x509_1_ca.der", vec![0x33; 40]);
    assets.insert("csr.der", vec![0x44; 8]);
    assets
}

fn top_level_keys(value: &Value) -> Vec<&str> {
    value
        .entries()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str())
        .collect()
}

#[test]
fn exactly_the_groups_in_use() {
    let assets = assets();
    let mut b = Builder::new(&assets);
    b.set_scheme_version("0.0.1")
        .set_serial_number("A12FC-45")
        .add_key(
            "mbed.BootstrapDevicePrivateKey",
            "priv_ecc_key1.der",
            KeyType::EccPrivate,
            "der",
        )
        .unwrap();
    let bytes = b.build().to_cbor();

    let value = cbor::decode(&bytes).unwrap();
    assert_eq!(
        top_level_keys(&value),
        ["SchemeVersion", "Keys", "ConfigParams"]
    );
    assert_eq!(value.get("SchemeVersion").unwrap().as_text(), Some("0.0.1"));

    let keys = value.get("Keys").unwrap().as_array().unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(
        keys[0],
        Value::Map(vec![
            ("Name".into(), "mbed.BootstrapDevicePrivateKey".into()),
            ("Type".into(), "ECCPrivate".into()),
            ("Format".into(), "der".into()),
            ("Data".into(), Value::Bytes(vec![0x11; 32])),
        ])
    );

    let params = value.get("ConfigParams").unwrap().as_array().unwrap();
    assert_eq!(
        params,
        [Value::Map(vec![
            ("Name".into(), "mbed.SerialNumber".into()),
            ("Data".into(), "A12FC-45".into()),
        ])]
    );
}

#[test]
fn default_groups() {
    let assets = assets();
    let record = Builder::with_default_groups(&assets).build();
    let value = record.to_canonical_form();
    assert_eq!(
        top_level_keys(&value),
        ["SchemeVersion", "Keys", "Certificates", "ConfigParams"]
    );
    assert_eq!(value.get("Keys"), Some(&Value::Array(vec![])));
}

#[test]
fn group_order_ignores_call_order() {
    let assets = assets();
    let mut b = Builder::new(&assets);
    b.set_endpoint_name("EP_fdsf");
    b.enable(Group::Csrs);
    b.add_csr("mbed.DTLSDevice", "csr.der", "der").unwrap();
    b.add_certificate("RootCA", "x509_1_ca.der", "der").unwrap();
    b.add_key("E2EDevice", "pub_ecc_key1.der", KeyType::EccPublic, "der")
        .unwrap();
    b.set_scheme_version("0.0.1");

    let value = b.build().to_canonical_form();
    assert_eq!(
        top_level_keys(&value),
        ["SchemeVersion", "Keys", "Certificates", "Csrs", "ConfigParams"]
    );
    let csr = &value.get("Csrs").unwrap().as_array().unwrap()[0];
    let fields: Vec<_> =
        csr.entries().unwrap().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(fields, ["Name", "Format", "Data"]);
}

#[test]
fn deterministic_and_ordered() {
    let assets = assets();
    let build = |names: &[&str]| {
        let mut b = Builder::with_default_groups(&assets);
        for name in names {
            b.set_param(*name, *name);
        }
        b.build().to_cbor()
    };

    let forward = build(&["A", "B", "C"]);
    assert_eq!(forward, build(&["A", "B", "C"]));
    assert_ne!(forward, build(&["C", "B", "A"]));

    let value = cbor::decode(&forward).unwrap();
    let names: Vec<_> = value
        .get("ConfigParams")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.get("Name").unwrap().as_text().unwrap())
        .collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[test]
fn round_trip_shape() {
    let assets = assets();
    let mut b = Builder::with_default_groups(&assets);
    b.add_key("E2EDevice", "priv_ecc_key1.der", KeyType::EccPrivate, "der")
        .unwrap()
        .add_key("UpdateVerification", "pub_ecc_key1.der", KeyType::EccPublic, "der")
        .unwrap()
        .add_certificate("RootCA", "x509_1_ca.der", "der")
        .unwrap();
    b.set_account_id(0xA653_69B6_5899_8765_5264)
        .set_memory_total_kb(102_400)
        .set_param("Blob", vec![1, 2, 3]);
    let record = b.build();

    let value = cbor::decode(&record.to_cbor()).unwrap();
    assert_eq!(value, record.to_canonical_form());
    assert_eq!(value.get("Keys").unwrap().as_array().unwrap().len(), 2);
    assert_eq!(value.get("Certificates").unwrap().as_array().unwrap().len(), 1);
    assert_eq!(value.get("ConfigParams").unwrap().as_array().unwrap().len(), 3);
}

#[test]
fn missing_version_and_empty_strings() {
    let assets = assets();
    let mut b = Builder::new(&assets);
    b.set_endpoint_name("");
    let value = b.build().to_canonical_form();
    assert_eq!(value.get("SchemeVersion"), None);

    let param = &value.get("ConfigParams").unwrap().as_array().unwrap()[0];
    assert_eq!(param.get("Data"), Some(&Value::Text(String::new())));

    let mut b = Builder::with_default_groups(&assets);
    b.clear_scheme_version();
    assert_eq!(b.build().to_canonical_form().get("SchemeVersion"), None);
}

#[test]
fn duplicate_params_survive() {
    let assets = assets();
    let mut b = Builder::new(&assets);
    b.set_current_time(1_500_000_000).set_current_time(1_500_000_000);
    let record = b.build();
    let times: Vec<_> = record.params_named(params::CURRENT_TIME).collect();
    assert_eq!(
        times,
        [&ParamValue::Int(1_500_000_000), &ParamValue::Int(1_500_000_000)]
    );
}

#[test]
fn lookup_errors() {
    let assets = assets();
    let mut b = Builder::new(&assets);
    assert_eq!(
        b.add_key("E2EDevice", "priv_ecc_key9.der", KeyType::EccPrivate, "der")
            .err(),
        Some(Error::Asset(asset::Error::Missing("priv_ecc_key9.der".into())))
    );
    assert_eq!(
        b.add_csr("mbed.DTLSDevice", "csr.der", "der").err(),
        Some(Error::GroupDisabled(Group::Csrs))
    );
    // Neither failure leaves anything behind.
    assert_eq!(b.build(), Record::default());
}

#[test]
fn corruptions() {
    let assets = assets();
    let mut b = Builder::with_default_groups(&assets);
    b.add_key("Name", "pub_ecc_key1.der", KeyType::EccPublic, "der")
        .unwrap();
    let record = b.build();

    let value = corrupt(
        &record,
        &[
            Corruption::DropSchemeVersion,
            Corruption::RenameGroup {
                group: Group::Certificates,
                to: "certificates".into(),
            },
            Corruption::RenameEntryField {
                group: Group::Keys,
                index: 0,
                field: Field::Name,
                to: "Field".into(),
            },
        ],
    )
    .unwrap();
    assert_eq!(
        top_level_keys(&value),
        ["Keys", "certificates", "ConfigParams"]
    );
    let key = &value.get("Keys").unwrap().as_array().unwrap()[0];
    assert_eq!(key.get("Name"), None);
    assert_eq!(key.get("Field"), Some(&Value::from("Name")));

    let missing = Corruption::RenameEntryField {
        group: Group::Keys,
        index: 1,
        field: Field::Name,
        to: "Field".into(),
    };
    assert_eq!(
        corrupt(&record, &[missing.clone()]),
        Err(Error::NoSuchTarget(missing))
    );
    assert_eq!(
        corrupt(&Default::default(), &[Corruption::DropSchemeVersion]),
        Err(Error::NoSuchTarget(Corruption::DropSchemeVersion))
    );
}
