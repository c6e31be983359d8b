// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

#![no_main]

use libfuzzer_sys::fuzz_target;

use factory_config::cbor;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode to a value that decodes the same.
    if let Ok(value) = cbor::decode(data) {
        let bytes = value.to_bytes();
        assert_eq!(cbor::decode(&bytes), Ok(value));
    }
});
