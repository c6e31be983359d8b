// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

#![no_main]

use libfuzzer_sys::fuzz_target;

use factory_config::crypto::ring;
use factory_config::packet::Packet;

fuzz_target!(|data: &[u8]| {
    if let Ok(packet) = Packet::parse(data) {
        assert_eq!(packet.to_bytes(), data);
        let _ = packet.inspect(&mut ring::hash::Engine::new());
    }
});
