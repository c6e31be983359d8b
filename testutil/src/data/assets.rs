// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Stand-in key and certificate material.
//!
//! Fixture generation only copies asset bytes, so tests can use blobs that
//! merely look like DER: a SEQUENCE header followed by the asset's name.

/// Returns a deterministic stand-in for the asset called `name`.
///
/// Distinct names produce distinct blobs.
pub fn synthetic(name: &str) -> Vec<u8> {
    let body = name.as_bytes();
    let mut blob = Vec::with_capacity(body.len() + 4);
    blob.push(0x30);
    if body.len() < 0x80 {
        blob.push(body.len() as u8);
    } else {
        blob.push(0x82);
        blob.extend_from_slice(&(body.len() as u16).to_be_bytes());
    }
    blob.extend_from_slice(body);
    blob
}
