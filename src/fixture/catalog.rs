// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! The fixture catalog.
//!
//! Every record fixture is a list of [`Step`]s replayed against a
//! [`Builder`] that starts from the default layout. Steps that no well-formed
//! record can express are collected as [`Corruption`]s and applied after
//! the record is flattened.
//!
//! Packet fixtures frame one of the record fixtures and then override some
//! of the packet's fields.

use std::collections::BTreeSet;
use std::collections::HashMap;

use crate::asset::AssetStore;
use crate::crypto::hash;
use crate::fixture::Contents;
use crate::fixture::Error;
use crate::fixture::Fixture;
use crate::packet::Packet;
use crate::record;
use crate::record::params::*;
use crate::record::Builder;
use crate::record::Corruption;
use crate::record::Field;
use crate::record::Group;
use crate::record::KeyType;
use crate::record::DEFAULT_FORMAT;

/// Catalog-wide settings.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CatalogConfig {
    /// The value stamped into every `mbed.CurrentTime` parameter, in seconds
    /// since the Unix epoch.
    pub current_time: u64,
}

/// One step in the construction of a record fixture.
#[derive(Copy, Clone, Debug)]
enum Step {
    /// Replaces the scheme version.
    Version(&'static str),
    /// Adds a key: name, asset, type, format.
    Key(&'static str, &'static str, KeyType, &'static str),
    /// Adds a certificate: name, asset, format.
    Cert(&'static str, &'static str, &'static str),
    /// Enables the CSR group.
    Csrs,
    /// Adds a DER CSR: name, asset.
    Csr(&'static str, &'static str),
    /// Appends a text parameter.
    Text(&'static str, &'static str),
    /// Appends an integer parameter.
    Int(&'static str, i128),
    /// Appends `mbed.CurrentTime` from the [`CatalogConfig`].
    Now,
    /// Replays another list of steps.
    Splice(&'static [Step]),
    /// Removes the scheme version after flattening.
    DropVersion,
    /// Renames a group after flattening.
    RenameGroup(Group, &'static str),
    /// Renames a field of the n-th key after flattening.
    RenameKeyField(usize, Field, &'static str),
}

use Step::*;

const fn ecc_private(name: &'static str, asset: &'static str) -> Step {
    Key(name, asset, KeyType::EccPrivate, DEFAULT_FORMAT)
}

const fn ecc_public(name: &'static str, asset: &'static str) -> Step {
    Key(name, asset, KeyType::EccPublic, DEFAULT_FORMAT)
}

const fn cert(name: &'static str, asset: &'static str) -> Step {
    Cert(name, asset, DEFAULT_FORMAT)
}

const ACCOUNT: i128 = 0xA653_69B6_5899_8765_5264;

/// The device description shared by most full provisioning records.
const DEVICE_INFO: &[Step] = &[
    Text(MANUFACTURER, "Toshiba"),
    Text(DEVICE_TYPE, "TEMP-SENSOR"),
    Text(MODEL_NUMBER, "KR-54-FS"),
    Text(HARDWARE_VERSION, "0.1.5"),
    Int(MEMORY_TOTAL_KB, 102_400),
];

/// The bootstrap server trust anchor and device credentials.
const BOOTSTRAP_CREDS: &[Step] = &[
    cert("mbed.BootstrapServerCACert", "x509_1_ca.der"),
    cert("mbed.BootstrapDeviceCert", "x509_1_ca_child.der"),
    ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
];

/// A complete, valid set of parameters up to the device description.
const FULL_HEADER: &[Step] = &[
    Text(SERIAL_NUMBER, "A12FC-45"),
    Text(ENDPOINT_NAME, "EP_fdsf"),
    Text(BOOTSTRAP_SERVER_URI, "coap://?aid=bootstrap.arm.com"),
    Splice(DEVICE_INFO),
    Text(UTC_OFFSET, "+02:00"),
    Text(TIMEZONE, "America/New York"),
];

/// A complete, valid bootstrap provisioning record, with its firmware
/// integrity chain left to the caller.
const FULL_BOOTSTRAP: &[Step] = &[
    Splice(FULL_HEADER),
    Now,
    Int(USE_BOOTSTRAP, 1),
];

/// The parameters of the `lwm2m` family of records, up to the server URI.
const LWM2M_HEADER: &[Step] = &[
    Text(SERIAL_NUMBER, "A12FC-45"),
    Int(ACCOUNT_ID, ACCOUNT),
];

/// The tail shared by records carrying an account ID.
const ACCOUNT_TAIL: &[Step] = &[
    Splice(DEVICE_INFO),
    Now,
    Text(UTC_OFFSET, "+02:00"),
    Text(TIMEZONE, "UTC-05"),
];

/// The record fixtures, in generation order.
const RECORDS: &[(&str, &[Step])] = &[
    ("cbor1", &[
        ecc_private("BtsDTLSDevice", "priv_ecc_key1.der"),
        ecc_public("UpdateVerification", "pub_ecc_key1.der"),
        cert("RootCA", "x509_1_ca.der"),
    ]),
    ("cbor2", &[
        ecc_private("E2EDevice", "priv_ecc_key1.der"),
        cert("UpdateVerification", "x509_1_ca.der"),
        cert("E2EUpdate", "x509_1_ca.der"),
    ]),
    ("cbor3", &[
        ecc_private("E2EDevice", "priv_ecc_key2.der"),
        Text(SERIAL_NUMBER, "AACB"),
        Text(ENDPOINT_NAME, "EP_fdsf"),
    ]),
    ("cbor_wrong_key_group_name", &[
        ecc_public("E2EDevice", "priv_ecc_key2.der"),
        Text(SERIAL_NUMBER, "AACB"),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        RenameGroup(Group::Keys, "WrongKeyGroupName"),
    ]),
    ("cbor_wrong_scheme_version", &[
        Version("0.0.2"),
        ecc_private("E2EDevice", "priv_ecc_key2.der"),
        Text(SERIAL_NUMBER, "AACB"),
        Text(ENDPOINT_NAME, "EP_fdsf"),
    ]),
    ("cbor_wrong_certificates_group_name", &[
        ecc_private("E2EDevice", "priv_ecc_key1.der"),
        cert("UpdateVerification", "x509_1_ca.der"),
        cert("E2EUpdate", "x509_1_ca.der"),
        RenameGroup(Group::Certificates, "certificates"),
    ]),
    ("cbor_wrong_key_name_field", &[
        ecc_private("E2EDevice", "priv_ecc_key1.der"),
        ecc_public("UpdateVerification", "pub_ecc_key1.der"),
        cert("UpdateVerification", "x509_1_ca.der"),
        cert("E2EUpdate", "x509_1_ca.der"),
        RenameKeyField(1, Field::Name, "Field"),
    ]),
    ("cbor_without_scheme_version_group", &[
        ecc_private("E2EDevice", "priv_ecc_key1.der"),
        cert("UpdateVerification", "x509_1_ca.der"),
        cert("E2EUpdate", "x509_1_ca.der"),
        DropVersion,
    ]),
    ("cbor_wrong_ecc_private_key", &[
        ecc_private("E2EDevice", "priv_rsa_key3.der"),
        cert("UpdateVerification", "x509_1_ca.der"),
        cert("E2EUpdate", "x509_1_ca.der"),
    ]),
    ("cbor_wrong_certificate", &[
        ecc_private("E2EDevice", "priv_ecc_key1.der"),
        cert("UpdateVerification", "priv_rsa_key3.der"),
    ]),
    ("cbor_store_request_with_csr", &[
        Csrs,
        ecc_private("E2EDevice", "priv_ecc_key1.der"),
        Csr("DTLSDevice", "priv_ecc_key2.der"),
        cert("UpdateVerification", "x509_1_ca.der"),
        cert("E2EUpdate", "x509_1_ca.der"),
    ]),
    ("cbor_empty_configuration_parameter", &[
        ecc_private("E2EDevice", "priv_ecc_key1.der"),
        cert("UpdateVerification", "x509_1_ca.der"),
        cert("E2EUpdate", "x509_1_ca.der"),
        Text(SERIAL_NUMBER, ""),
    ]),
    ("cbor_with_all_mandatory_parameters", &[
        Splice(ALL_MANDATORY),
    ]),
    ("cbor_with_current_time", &[
        Splice(ALL_MANDATORY),
        Now,
    ]),
    ("cbor_without_endpoint_name_parameter", &[
        Splice(LWM2M_HEADER),
        Text(BOOTSTRAP_SERVER_URI, "coap://bootstrap?aid.arm.com"),
        Splice(DEVICE_INFO),
        Now,
        Text(UTC_OFFSET, "+11:00"),
        Text(TIMEZONE, "Europe/Paris"),
        Int(USE_BOOTSTRAP, 1),
        Splice(SERVER_CAS_AND_DEVICE_CERT),
        cert("mbed.FirmwareIntegrityCACert", "x509_1_ca.der"),
        cert("mbed.FirmwareIntegrityCert", "x509_1_ca.der"),
        ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
    ]),
    ("cbor_without_bootstrap_mode_parameter", &[
        Splice(LWM2M_HEADER),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(BOOTSTRAP_SERVER_URI, "coap://bootstrap.arm.com?aid="),
        Splice(DEVICE_INFO),
        Now,
        Text(UTC_OFFSET, "-03:00"),
        Text(TIMEZONE, "America/New York"),
        Splice(SERVER_CAS_AND_DEVICE_CERT),
        cert("mbed.FirmwareIntegrityCACert", "x509_1_ca.der"),
        cert("mbed.FirmwareIntegrityCert", "x509_1_ca.der"),
        ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
    ]),
    ("cbor_without_dtls_private_key_parameter", &[
        Splice(LWM2M_HEADER),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(BOOTSTRAP_SERVER_URI, "coap://?aid=bootstrap.arm.com"),
        Splice(DEVICE_INFO),
        Now,
        Text(UTC_OFFSET, "+02:00"),
        Text(TIMEZONE, "America/New York"),
        Int(USE_BOOTSTRAP, 1),
        Splice(SERVER_CAS_AND_DEVICE_CERT),
        cert("mbed.FirmwareIntegrityCACert", "x509_1_ca.der"),
    ]),
    ("cbor_bootstrap_mode_without_lwm2m_ca_parameter", &[
        Splice(LWM2M_HEADER),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(BOOTSTRAP_SERVER_URI, "coap://bootstrap.arm.com&aid="),
        Splice(ACCOUNT_TAIL),
        Int(USE_BOOTSTRAP, 1),
        Splice(BOOTSTRAP_CERTS_SELF_INTEGRITY),
    ]),
    ("cbor_bootstrap_false_without_lwm2m_ca_parameter", &[
        Splice(LWM2M_HEADER),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(BOOTSTRAP_SERVER_URI, "coap://bootstrap&aid=.arm.com"),
        Splice(ACCOUNT_TAIL),
        Int(USE_BOOTSTRAP, 0),
        ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
    ]),
    ("cbor_wrong_bootstrap_mode_parameter", &[
        Splice(LWM2M_HEADER),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(BOOTSTRAP_SERVER_URI, "coap://lwm2m&aid=.com"),
        Splice(ACCOUNT_TAIL),
        Int(USE_BOOTSTRAP, 0),
        Splice(BOOTSTRAP_CERTS_SELF_INTEGRITY),
    ]),
    ("cbor_without_root_ca_parameter", &[
        Splice(LWM2M_HEADER),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(BOOTSTRAP_SERVER_URI, "coap://lwm2m&aid=.com"),
        Splice(ACCOUNT_TAIL),
        Int(USE_BOOTSTRAP, 1),
        cert("mbed.BootstrapDeviceCert", "x509_1_ca_child.der"),
        cert("mbed.FirmwareIntegrityCACert", "x509_1_ca.der"),
        cert("mbed.FirmwareIntegrityCert", "x509_1_ca.der"),
        ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
    ]),
    ("cbor_wrong_bootstrap_uri_parameter", &[
        Splice(LWM2M_HEADER),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(BOOTSTRAP_SERVER_URI, "soap://lwm2m.com"),
        Splice(ACCOUNT_TAIL),
        Int(USE_BOOTSTRAP, 1),
        cert("mbed.LwM2MServerCACert", "x509_1_ca.der"),
        cert("mbed.BootstrapServerCACert", "x509_1_ca.der"),
        cert("mbed.BootstrapDeviceCert", "x509_1_ca_child.der"),
        cert("mbed.FirmwareIntegrityCACert", "x509_1_ca.der"),
        cert("mbed.FirmwareIntegrityCert", "x509_1.der"),
        ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
    ]),
    ("cbor_without_serial_number_parameter", &[
        Int(ACCOUNT_ID, ACCOUNT),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(BOOTSTRAP_SERVER_URI, "coap://lwm2m?aid=.com"),
        Splice(ACCOUNT_TAIL),
        Int(USE_BOOTSTRAP, 1),
        Splice(SERVER_CAS_AND_DEVICE_CERT),
        ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
    ]),
    ("cbor_lwm2m_bootstrap_parameters", &[
        Splice(LWM2M_HEADER),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(LWM2M_SERVER_URI, "coaps://lwm2m.arm.com&aid=.arm.com"),
        Splice(ACCOUNT_TAIL),
        Int(USE_BOOTSTRAP, 0),
        cert("mbed.LwM2MServerCACert", "x509_1_ca.der"),
        cert("mbed.LwM2MDeviceCert", "x509_1_ca_child.der"),
        Splice(SELF_INTEGRITY),
        ecc_private("mbed.LwM2MDevicePrivateKey", "priv_ecc_key1.der"),
        ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
    ]),
    ("cbor_self_signed_ca", &[
        Splice(LWM2M_HEADER),
        Text(ENDPOINT_NAME, "Device"),
        Text(BOOTSTRAP_SERVER_URI, "coaps://?aid=bootstrap.arm.com"),
        Splice(ACCOUNT_TAIL),
        Int(USE_BOOTSTRAP, 1),
        cert("mbed.BootstrapServerCACert", "x509_1_ca.der"),
        cert("mbed.LwM2MServerCACert", "x509_1_ca.der"),
        cert("mbed.BootstrapDeviceCert", "x509_1_ca.der"),
        ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
    ]),
    ("cbor_lwm2m_self_signed_ca", &[
        Splice(LWM2M_HEADER),
        Text(ENDPOINT_NAME, "Device"),
        Text(LWM2M_SERVER_URI, "coap://lwm2m.arm.com?aid=.arm.com"),
        Splice(ACCOUNT_TAIL),
        Int(USE_BOOTSTRAP, 0),
        Splice(LWM2M_SELF_SIGNED),
    ]),
    ("cbor_lwm2m_without_time", &[
        Text(SERIAL_NUMBER, "A12FC-45"),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(MANUFACTURER, "Toshiba"),
        Text(DEVICE_TYPE, "TEMP-SENSOR"),
        Text(MODEL_NUMBER, "KR-54-FS"),
        Text(LWM2M_SERVER_URI, "coap://lwm2m?aid=.arm.com"),
        Text(HARDWARE_VERSION, "0.1.5"),
        Int(MEMORY_TOTAL_KB, 102_400),
        Text(UTC_OFFSET, "+02:00"),
        Text(TIMEZONE, "UTC-05"),
        Int(USE_BOOTSTRAP, 0),
        cert("mbed.LwM2MServerCACert", "x509_1_ca.der"),
        cert("mbed.LwM2MDeviceCert", "x509_1_ca_child.der"),
        Splice(SELF_INTEGRITY),
        ecc_private("mbed.LwM2MDevicePrivateKey", "priv_ecc_key1.der"),
    ]),
    ("cbor_with_empty_endpoint", &[
        Text(SERIAL_NUMBER, "A12FC-45"),
        Text(ENDPOINT_NAME, ""),
        Text(BOOTSTRAP_SERVER_URI, "coaps://?aid=bootstrap.arm.com"),
        Splice(DEVICE_INFO),
        Text(UTC_OFFSET, "+02:00"),
        Text(TIMEZONE, "UTC-05"),
        Int(USE_BOOTSTRAP, 1),
        Splice(BOOTSTRAP_CREDS),
    ]),
    ("cbor_uri_without_aid", &[
        Text(SERIAL_NUMBER, "A12FC-45"),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(BOOTSTRAP_SERVER_URI, "coap://bootstrap.arm.com"),
        Text(MANUFACTURER, "Toshiba"),
        Text(DEVICE_TYPE, "TEMP-SENSOR"),
        Text(MODEL_NUMBER, "KR-54-FS"),
        Now,
        Text(HARDWARE_VERSION, "0.1.5"),
        Int(MEMORY_TOTAL_KB, 102_400),
        Text(UTC_OFFSET, "+02:00"),
        Text(TIMEZONE, "UTC-05"),
        Int(USE_BOOTSTRAP, 1),
        Splice(BOOTSTRAP_CREDS),
    ]),
    ("cbor_uri_wrong_prefix_location", &[
        Text(SERIAL_NUMBER, "A12FC-45"),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(BOOTSTRAP_SERVER_URI, "bootstrap?aid.arm.coap://com"),
        Text(LWM2M_SERVER_URI, "coaps://lwm2m.arm.com&aid=1234"),
        Splice(DEVICE_INFO),
        Text(TIMEZONE, "UTC-05"),
        Text(UTC_OFFSET, "+02:00"),
        Now,
        Int(USE_BOOTSTRAP, 1),
        Splice(BOOTSTRAP_CREDS),
    ]),
    ("cbor_empty_uri", &[
        Text(SERIAL_NUMBER, "A12FC-45"),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(BOOTSTRAP_SERVER_URI, ""),
        Text(LWM2M_SERVER_URI, "coaps://lwm2m.arm.com&aid=1234"),
        Splice(DEVICE_INFO),
        Text(TIMEZONE, "UTC-05"),
        Now,
        Text(UTC_OFFSET, "+02:00"),
        Int(USE_BOOTSTRAP, 1),
        Splice(BOOTSTRAP_CREDS),
    ]),
    ("cbor_without_time_zone", &[
        Splice(SHORT_HEADER),
        Int(USE_BOOTSTRAP, 1),
        Text(UTC_OFFSET, "+02:00"),
        Now,
        Splice(BOOTSTRAP_CREDS),
    ]),
    ("cbor_without_utc_offset", &[
        Splice(SHORT_HEADER),
        Text(TIMEZONE, "UTC-05"),
        Now,
        Int(USE_BOOTSTRAP, 1),
        Splice(BOOTSTRAP_CREDS),
    ]),
    ("cbor_with_wrong_utc_offset", &[
        Splice(SHORT_HEADER),
        Text(TIMEZONE, "UTC-05"),
        Now,
        Text(UTC_OFFSET, "+9k:00"),
        Int(USE_BOOTSTRAP, 1),
        Splice(BOOTSTRAP_CREDS),
    ]),
    ("cbor_with_wrong_utc_offset_sign", &[
        Splice(SHORT_HEADER),
        Text(TIMEZONE, "UTC-05"),
        Now,
        Text(UTC_OFFSET, "#92:00"),
        Int(USE_BOOTSTRAP, 1),
        Splice(BOOTSTRAP_CREDS),
    ]),
    ("cbor_with_wrong_value_of_bootstrap_mode", &[
        Splice(FULL_HEADER),
        Int(USE_BOOTSTRAP, 6),
        Splice(BOOTSTRAP_CREDS),
    ]),
    ("cbor_with_empty_manf_name", &[
        Text(SERIAL_NUMBER, "A12FC-45"),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(BOOTSTRAP_SERVER_URI, "coap://?aid=bootstrap.arm.com"),
        Text(MANUFACTURER, ""),
        Text(DEVICE_TYPE, "TEMP-SENSOR"),
        Text(MODEL_NUMBER, "KR-54-FS"),
        Text(HARDWARE_VERSION, "0.1.5"),
        Int(MEMORY_TOTAL_KB, 102_400),
        Text(UTC_OFFSET, "+02:00"),
        Text(TIMEZONE, "America/New York"),
        Int(USE_BOOTSTRAP, 1),
        Splice(BOOTSTRAP_CREDS),
    ]),
    ("cbor_with_wrong_integrity_chain_parameters", &[
        Splice(FULL_HEADER),
        Int(USE_BOOTSTRAP, 1),
        Now,
        Splice(BOOTSTRAP_CREDS),
        cert("mbed.FirmwareIntegrityCACert", "x509_1_ca.der"),
        cert("mbed.FirmwareIntegrityCert", "x509_2_ca_child.der"),
    ]),
    ("cbor_with_integ_cert_expiration_less_than_10", &[
        Splice(FULL_HEADER),
        Int(USE_BOOTSTRAP, 1),
        Now,
        Splice(BOOTSTRAP_CREDS),
        cert("mbed.FirmwareIntegrityCACert", "x509_3_ca.der"),
        cert("mbed.FirmwareIntegrityCert", "x509_3_ca_child.der"),
    ]),
    ("cbor_lwm2m_with_wrong_cn", &[
        Splice(LWM2M_HEADER),
        Text(ENDPOINT_NAME, "EP_fdsf"),
        Text(LWM2M_SERVER_URI, "coap://lwm2m.arm.com?aid="),
        Splice(ACCOUNT_TAIL),
        Int(USE_BOOTSTRAP, 0),
        Splice(LWM2M_SELF_SIGNED),
    ]),
    ("cbor_wrong_key_format", &[
        Key("mbed.WrongKeyFormat", "priv_ecc_key1.der", KeyType::EccPrivate, "kuku"),
    ]),
    ("cbor_certificate_null_format", &[
        Cert("mbed.CertificateNullFormat", "x509_1_ca.der", "\0"),
    ]),
    ("cbor_certificate_pem_format", &[
        Cert("mbed.CertificatePemFormat", "priv_ecc_key2.der", "pem"),
    ]),
    ("cbor_partial_parameters_1", &[
        Splice(FULL_BOOTSTRAP),
        cert("mbed.BootstrapServerCACert", "x509_1_ch_inv_md.der"),
        ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
    ]),
    ("cbor_partial_parameters_2", &[
        Splice(FULL_BOOTSTRAP),
        cert("mbed.BootstrapServerCACert", "x509_pth_ca.der"),
    ]),
    ("cbor_partial_parameters_3", &[
        cert("mbed.BootstrapDeviceCert", "x509_pth_ca_child.der"),
    ]),
    ("cbor_partial_parameters_4", &[
        cert("mbed.FirmwareIntegrityCACert", "x509_pth_ca_1.der"),
        cert("mbed.FirmwareIntegrityCert", "x509_pth_child_1.der"),
    ]),
    ("cbor_python_certificates", &[
        Splice(FULL_BOOTSTRAP),
        Splice(PYTHON_BOOTSTRAP_CREDS),
        cert("mbed.FirmwareIntegrityCACert", "x509_pth_ca_1.der"),
        cert("mbed.FirmwareIntegrityCert", "x509_pth_child_1.der"),
    ]),
    ("cbor_python_future_firmw_intg_certificates", &[
        Splice(FULL_BOOTSTRAP),
        Splice(PYTHON_BOOTSTRAP_CREDS),
        cert("mbed.FirmwareIntegrityCACert", "x509_pth_ca_3_future.der"),
        cert("mbed.FirmwareIntegrityCert", "x509_pth_child_future.der"),
    ]),
    ("cbor_python_child_expired_certificates", &[
        Splice(FULL_BOOTSTRAP),
        Splice(PYTHON_BOOTSTRAP_CREDS),
        cert("mbed.FirmwareIntegrityCACert", "x509_pth_ca_2.der"),
        cert("mbed.FirmwareIntegrityCert", "x509_pth_child_expired.der"),
    ]),
    ("cbor_python_device_expired_certificate", &[
        Splice(FULL_BOOTSTRAP),
        cert("mbed.BootstrapServerCACert", "x509_pth_ca.der"),
        cert("mbed.BootstrapDeviceCert", "x509_pth_child_expired.der"),
        ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
        cert("mbed.FirmwareIntegrityCACert", "x509_pth_ca_2.der"),
        cert("mbed.FirmwareIntegrityCert", "x509_pth_child_1.der"),
    ]),
    ("cbor_python_fw_integrity_intrusted_certificate", &[
        Splice(FULL_BOOTSTRAP),
        Splice(PYTHON_BOOTSTRAP_CREDS),
        cert("mbed.FirmwareIntegrityCACert", "x509_pth_ca_4.der"),
        cert("mbed.FirmwareIntegrityCert", "x509_pyth_child_4.der"),
    ]),
];

/// Every mandatory parameter, with `mbed.CurrentTime` appearing twice.
const ALL_MANDATORY: &[Step] = &[
    Text(SERIAL_NUMBER, "A12FC-45"),
    Text(ENDPOINT_NAME, "EP_fdsf"),
    Text(BOOTSTRAP_SERVER_URI, "coap://?aid=bootstrap.arm.com"),
    Text(MANUFACTURER, "Toshiba"),
    Now,
    Text(DEVICE_TYPE, "TEMP-SENSOR"),
    Text(MODEL_NUMBER, "KR-54-FS"),
    Text(HARDWARE_VERSION, "0.1.5"),
    Int(MEMORY_TOTAL_KB, 102_400),
    Text(UTC_OFFSET, "+02:00"),
    Text(TIMEZONE, "America/New York"),
    Int(USE_BOOTSTRAP, 1),
    Now,
    cert("mbed.BootstrapServerCACert", "x509_1_ca.der"),
    cert("mbed.BootstrapDeviceCert", "x509_1_ca_child.der"),
    ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
    cert("mbed.FirmwareIntegrityCACert", "x509_1_ca.der"),
    cert("mbed.FirmwareIntegrityCert", "x509_1_ca_child.der"),
];

const SHORT_HEADER: &[Step] = &[
    Text(SERIAL_NUMBER, "A12FC-45"),
    Text(ENDPOINT_NAME, "EP_fdsf"),
    Text(BOOTSTRAP_SERVER_URI, "coap://?aid=bootstrap.arm.com"),
    Splice(DEVICE_INFO),
];

const SERVER_CAS_AND_DEVICE_CERT: &[Step] = &[
    cert("mbed.BootstrapServerCACert", "x509_1_ca.der"),
    cert("mbed.LwM2MServerCACert", "x509_1_ca.der"),
    cert("mbed.BootstrapDeviceCert", "x509_1_ca_child.der"),
];

const SELF_INTEGRITY: &[Step] = &[
    cert("mbed.FirmwareIntegrityCACert", "x509_1_ca.der"),
    cert("mbed.FirmwareIntegrityCert", "x509_1_ca.der"),
];

const BOOTSTRAP_CERTS_SELF_INTEGRITY: &[Step] = &[
    cert("mbed.BootstrapServerCACert", "x509_1_ca.der"),
    cert("mbed.BootstrapDeviceCert", "x509_1_ca_child.der"),
    Splice(SELF_INTEGRITY),
    ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
];

const LWM2M_SELF_SIGNED: &[Step] = &[
    cert("mbed.LwM2MServerCACert", "x509_1_ca.der"),
    cert("mbed.LwM2MDeviceCert", "x509_1_ca.der"),
    Splice(SELF_INTEGRITY),
    ecc_private("mbed.LwM2MDevicePrivateKey", "priv_ecc_key1.der"),
];

const PYTHON_BOOTSTRAP_CREDS: &[Step] = &[
    cert("mbed.BootstrapServerCACert", "x509_pth_ca.der"),
    cert("mbed.BootstrapDeviceCert", "x509_pth_ca_child.der"),
    ecc_private("mbed.BootstrapDevicePrivateKey", "priv_ecc_key1.der"),
];

/// How a packet fixture deviates from a well-formed packet.
#[derive(Copy, Clone, Debug)]
enum Tamper {
    None,
    Length(u32),
    PayloadAndLength(&'static [u8], u32),
    Signature(&'static [u8]),
}

/// The packet fixtures: name, framed record, tampering.
const PACKETS: &[(&str, &str, Tamper)] = &[
    ("comm_valid_packet", "cbor1", Tamper::None),
    ("comm_short_length_packet", "cbor1", Tamper::Length(10)),
    (
        "comm_long_data_packet",
        "cbor3",
        Tamper::PayloadAndLength(b"0x452345", 2),
    ),
    (
        "comm_invalid_signature_packet",
        "cbor1",
        Tamper::Signature(
            b"34234454523423423423423400908293819283913745203842093840253434093059404590",
        ),
    ),
];

fn visit(steps: &[Step], f: &mut impl FnMut(&Step)) {
    for step in steps {
        match step {
            Splice(inner) => visit(inner, f),
            s => f(s),
        }
    }
}

/// Returns the name of every asset the catalog refers to.
pub fn required_assets() -> BTreeSet<&'static str> {
    let mut names = BTreeSet::new();
    for (_, steps) in RECORDS {
        visit(steps, &mut |step| match *step {
            Key(_, asset, _, _) | Cert(_, asset, _) | Csr(_, asset) => {
                names.insert(asset);
            }
            _ => {}
        });
    }
    names
}

/// Returns the name of every fixture [`build()`] produces, in order.
pub fn fixture_names() -> impl Iterator<Item = &'static str> {
    RECORDS
        .iter()
        .map(|(name, _)| *name)
        .chain(PACKETS.iter().map(|(name, _, _)| *name))
}

fn build_record(
    steps: &[Step],
    assets: &AssetStore,
    config: &CatalogConfig,
) -> Result<Vec<u8>, record::Error> {
    let mut b = Builder::with_default_groups(assets);
    let mut corruptions = Vec::new();
    let mut result = Ok(());
    visit(steps, &mut |step| {
        if result.is_err() {
            return;
        }
        result = match *step {
            Version(v) => {
                b.set_scheme_version(v);
                Ok(())
            }
            Key(name, asset, ty, fmt) => {
                b.add_key(name, asset, ty, fmt).map(|_| ())
            }
            Cert(name, asset, fmt) => {
                b.add_certificate(name, asset, fmt).map(|_| ())
            }
            Csrs => {
                b.enable(Group::Csrs);
                Ok(())
            }
            Csr(name, asset) => {
                b.add_csr(name, asset, DEFAULT_FORMAT).map(|_| ())
            }
            Text(name, value) => {
                b.set_param(name, value);
                Ok(())
            }
            Int(name, value) => {
                b.set_param(name, value);
                Ok(())
            }
            Now => {
                b.set_current_time(config.current_time);
                Ok(())
            }
            DropVersion => {
                corruptions.push(Corruption::DropSchemeVersion);
                Ok(())
            }
            RenameGroup(group, to) => {
                corruptions.push(Corruption::RenameGroup {
                    group,
                    to: to.into(),
                });
                Ok(())
            }
            RenameKeyField(index, field, to) => {
                corruptions.push(Corruption::RenameEntryField {
                    group: Group::Keys,
                    index,
                    field,
                    to: to.into(),
                });
                Ok(())
            }
            Splice(_) => Ok(()),
        };
    });
    result?;

    let record = b.build();
    if corruptions.is_empty() {
        return Ok(record.to_cbor());
    }
    Ok(record::corrupt(&record, &corruptions)?.to_bytes())
}

/// Builds every fixture in the catalog.
///
/// All required assets are checked up front; the first failure aborts the
/// whole build and nothing is returned.
pub fn build<E: hash::Engine + ?Sized>(
    assets: &AssetStore,
    engine: &mut E,
    config: &CatalogConfig,
) -> Result<Vec<Fixture>, Error> {
    let missing = assets.missing(required_assets());
    if !missing.is_empty() {
        return fail!(Error::MissingAssets(
            missing.into_iter().map(String::from).collect()
        ));
    }

    let mut fixtures = Vec::with_capacity(RECORDS.len() + PACKETS.len());
    let mut records = HashMap::new();
    for (name, steps) in RECORDS {
        let cbor = build_record(steps, assets, config).map_err(|error| {
            Error::Record {
                fixture: name.to_string(),
                error,
            }
        })?;
        trace!("built {} ({} bytes)", name, cbor.len());
        records.insert(*name, cbor.clone());
        fixtures.push(Fixture {
            name: name.to_string(),
            contents: Contents::Record(cbor),
        });
    }

    for (name, source, tamper) in PACKETS {
        let payload = match records.get(source) {
            Some(cbor) => cbor.clone(),
            None => return fail!(Error::NoSuchRecord(source.to_string())),
        };
        let packet_err = |error| Error::Packet {
            fixture: name.to_string(),
            error,
        };

        let mut packet = Packet::frame(payload, engine).map_err(packet_err)?;
        match *tamper {
            Tamper::None => {}
            Tamper::Length(len) => {
                packet.override_length(len);
            }
            Tamper::PayloadAndLength(payload, len) => {
                packet.override_payload(payload).override_length(len);
            }
            Tamper::Signature(sig) => {
                packet.override_signature(sig);
            }
        }
        fixtures.push(Fixture {
            name: name.to_string(),
            contents: Contents::Packet(packet.to_bytes()),
        });
    }

    Ok(fixtures)
}

#[cfg(all(test, feature = "ring"))]
mod test {
    use super::*;
    use crate::cbor;
    use crate::crypto::ring;
    use crate::packet;
    use crate::record::params;
    use pretty_assertions::assert_eq;
    use testutil::data::assets::synthetic;

    const CONFIG: CatalogConfig = CatalogConfig {
        current_time: 1_600_000_000,
    };

    fn assets() -> AssetStore {
        let mut assets = AssetStore::new();
        for name in required_assets() {
            assets.insert(name, synthetic(name));
        }
        assets
    }

    fn build_all() -> Vec<Fixture> {
        build(&assets(), &mut ring::hash::Engine::new(), &CONFIG).unwrap()
    }

    fn find<'a>(fixtures: &'a [Fixture], name: &str) -> &'a Fixture {
        fixtures.iter().find(|f| f.name == name).unwrap()
    }

    fn params_named(value: &cbor::Value, name: &str) -> Vec<cbor::Value> {
        value
            .get("ConfigParams")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .filter(|p| p.get("Name").unwrap().as_text() == Some(name))
            .map(|p| p.get("Data").unwrap().clone())
            .collect()
    }

    #[test]
    fn every_fixture_once() {
        let fixtures = build_all();
        let names: Vec<_> = fixtures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, fixture_names().collect::<Vec<_>>());

        let unique: BTreeSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(fixtures.iter().filter(|f| f.is_record()).count(), 52);
        assert_eq!(fixtures.iter().filter(|f| !f.is_record()).count(), 4);
        assert_eq!(&names[..3], &["cbor1", "cbor2", "cbor3"]);
    }

    #[test]
    fn deterministic() {
        assert_eq!(build_all(), build_all());
    }

    #[test]
    fn every_record_decodes() {
        for fixture in build_all().iter().filter(|f| f.is_record()) {
            assert!(
                cbor::decode(fixture.bytes()).is_ok(),
                "{} does not decode",
                fixture.name
            );
        }
    }

    #[test]
    fn current_time() {
        let fixtures = build_all();
        let now = cbor::Value::from(CONFIG.current_time);
        for (name, count) in &[
            ("cbor_with_all_mandatory_parameters", 2),
            ("cbor_with_current_time", 3),
            ("cbor_lwm2m_without_time", 0),
        ] {
            let value = cbor::decode(find(&fixtures, name).bytes()).unwrap();
            let times = params_named(&value, params::CURRENT_TIME);
            assert_eq!(times.len(), *count, "{}", name);
            assert!(times.iter().all(|t| *t == now));
        }
    }

    #[test]
    fn corrupted_records() {
        let fixtures = build_all();
        let decode = |name| cbor::decode(find(&fixtures, name).bytes()).unwrap();

        let value = decode("cbor_wrong_key_format");
        let keys = value.get("Keys").unwrap().as_array().unwrap();
        let key = keys.last().unwrap();
        assert_eq!(key.get("Type").unwrap().as_text(), Some("ECCPrivate"));
        assert_eq!(key.get("Format").unwrap().as_text(), Some("kuku"));

        let value = decode("cbor_wrong_key_group_name");
        assert_eq!(value.get("Keys"), None);
        let keys = value.get("WrongKeyGroupName").unwrap().as_array().unwrap();
        assert_eq!(keys[0].get("Type").unwrap().as_text(), Some("ECCPublic"));

        let value = decode("cbor_wrong_certificates_group_name");
        assert_eq!(value.get("Certificates"), None);
        assert_eq!(
            value.get("certificates").unwrap().as_array().unwrap().len(),
            2
        );

        let value = decode("cbor_wrong_key_name_field");
        let keys = value.get("Keys").unwrap().as_array().unwrap();
        assert!(keys[0].get("Name").is_some());
        assert_eq!(keys[1].get("Name"), None);
        assert_eq!(
            keys[1].get("Field").unwrap().as_text(),
            Some("UpdateVerification")
        );

        assert_eq!(
            decode("cbor_without_scheme_version_group").get("SchemeVersion"),
            None
        );
        assert_eq!(
            decode("cbor_wrong_scheme_version")
                .get("SchemeVersion")
                .unwrap()
                .as_text(),
            Some("0.0.2")
        );
    }

    #[test]
    fn formats() {
        let fixtures = build_all();
        let decode = |name| cbor::decode(find(&fixtures, name).bytes()).unwrap();

        let value = decode("cbor_certificate_pem_format");
        let certs = value.get("Certificates").unwrap().as_array().unwrap();
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].get("Format").unwrap().as_text(), Some("pem"));
        assert_eq!(
            certs[0].get("Data").unwrap().as_bytes(),
            Some(&synthetic("priv_ecc_key2.der")[..])
        );

        let value = decode("cbor_certificate_null_format");
        let certs = value.get("Certificates").unwrap().as_array().unwrap();
        assert_eq!(certs[0].get("Format").unwrap().as_text(), Some("\0"));

        let value = decode("cbor_store_request_with_csr");
        let csrs = value.get("Csrs").unwrap().as_array().unwrap();
        assert_eq!(csrs[0].get("Name").unwrap().as_text(), Some("DTLSDevice"));
    }

    #[test]
    fn packets() {
        let fixtures = build_all();
        let mut e = ring::hash::Engine::new();
        let cbor1 = find(&fixtures, "cbor1").bytes().to_vec();
        let cbor3 = find(&fixtures, "cbor3").bytes().to_vec();

        let inspect = |name| {
            let packet = packet::Packet::parse(find(&fixtures, name).bytes()).unwrap();
            (packet.inspect(&mut ring::hash::Engine::new()).unwrap(), packet)
        };

        let (report, packet) = inspect("comm_valid_packet");
        assert!(report.is_valid());
        assert_eq!(packet.payload(), &cbor1[..]);

        let (report, packet) = inspect("comm_short_length_packet");
        assert_eq!(packet.length(), 10);
        assert!(!report.length_ok);
        assert_eq!(
            find(&fixtures, "comm_short_length_packet").bytes().len(),
            packet::HEADER_LEN + cbor1.len() + packet::SIGNATURE_LEN
        );

        let long = find(&fixtures, "comm_long_data_packet").bytes();
        assert_eq!(long.len(), packet::HEADER_LEN + 8 + packet::SIGNATURE_LEN);
        assert_eq!(&long[12..20], b"0x452345");
        let framed = packet::Packet::frame(cbor3, &mut e).unwrap();
        assert_eq!(&long[20..], framed.signature());

        let (report, packet) = inspect("comm_invalid_signature_packet");
        assert!(report.token_ok);
        assert!(!report.signature_ok);
        // The oversized signature spills into the parsed payload.
        assert_eq!(packet.length() as usize, cbor1.len());
        assert_eq!(
            packet.payload().len(),
            cbor1.len() + 74 - packet::SIGNATURE_LEN
        );
    }

    #[test]
    fn missing_assets() {
        let mut assets = AssetStore::new();
        for name in required_assets() {
            if name != "x509_1_ca.der" && name != "priv_rsa_key3.der" {
                assets.insert(name, synthetic(name));
            }
        }

        let result = build(&assets, &mut ring::hash::Engine::new(), &CONFIG);
        assert_eq!(
            result,
            Err(Error::MissingAssets(vec![
                "priv_rsa_key3.der".into(),
                "x509_1_ca.der".into(),
            ]))
        );
    }
}
