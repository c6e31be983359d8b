// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! `factory-config` builds factory configuration records and the test
//! fixtures that exercise a device-side configuration parser.
//!
//! A configuration record is a CBOR map carrying a scheme version and
//! ordered groups of keys, certificates, CSRs and configuration parameters.
//! Records are assembled with a [`record::Builder`] from blobs held in an
//! [`asset::AssetStore`], encoded canonically by the [`cbor`] module, and
//! optionally wrapped in a SHA-256 authenticated [`packet::Packet`].
//!
//! The [`fixture`] module enumerates the full set of positive and negative
//! scenarios, writes them out as files, and [`embed`] renders them as C
//! sources for linking into device-side tests.
//!
//! Malformed records are produced by mutating a well-formed one through
//! [`record::corrupt()`], never by building one directly.

#![deny(missing_docs)]
#![deny(warnings)]
#![deny(unused)]
#![deny(unsafe_code)]

#[cfg(feature = "log")]
extern crate log as __raw_log;

#[macro_use]
mod debug;

#[macro_use]
pub mod named;

#[macro_use]
pub mod cbor;

pub mod asset;
pub mod crypto;
pub mod embed;
pub mod fixture;
pub mod io;
pub mod packet;
pub mod record;

#[cfg(feature = "serde")]
mod serde;
