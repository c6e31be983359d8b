// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Packet commands.

use std::io::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use factory_config::crypto::ring;
use factory_config::io::StdWrite;
use factory_config::packet::Inspection;
use factory_config::packet::Packet as RawPacket;

/// Commands for framing and inspecting provisioning packets.
#[derive(structopt::StructOpt)]
#[structopt(author)]
pub enum Packet {
    /// Frame a payload into a packet.
    Frame {
        /// Length field to write instead of the payload's length.
        #[structopt(long)]
        length: Option<u32>,

        /// Signature to write instead of the payload's SHA-256, as hex.
        #[structopt(long)]
        signature_hex: Option<String>,

        /// Input file, defaults to stdin.
        #[structopt(short = "i", long, parse(from_os_str))]
        input: Option<PathBuf>,

        /// Output file, defaults to stdout.
        #[structopt(short = "o", long, parse(from_os_str))]
        output: Option<PathBuf>,
    },

    /// Inspect an existing packet.
    ShowPacket {
        /// Whether to pretty-print the resulting JSON.
        #[structopt(long)]
        pretty: bool,

        /// Input file, defaults to stdin.
        #[structopt(short = "i", long, parse(from_os_str))]
        input: Option<PathBuf>,

        /// Output file, defaults to stdout.
        #[structopt(short = "o", long, parse(from_os_str))]
        output: Option<PathBuf>,
    },
}

/// JSON summary printed by `show-packet`.
#[derive(Serialize)]
struct Summary {
    #[serde(flatten)]
    inspection: Inspection,
    payload: String,
    signature: String,
}

impl Packet {
    pub fn run(self) {
        match self {
            Self::Frame {
                length,
                signature_hex,
                input,
                output,
            } => {
                let input = crate::util::read_input(input.as_deref());
                let mut w = crate::util::open_output(output.as_deref());

                let mut hasher = ring::hash::Engine::new();
                let mut packet = check!(
                    RawPacket::frame(input, &mut hasher),
                    "failed to frame payload"
                );
                if let Some(length) = length {
                    packet.override_length(length);
                }
                if let Some(sig) = signature_hex {
                    let sig = check!(hex::decode(&sig), "bad --signature-hex");
                    packet.override_signature(sig);
                }
                check!(
                    packet.write_to(StdWrite(&mut w)),
                    "failed to write packet"
                );
                check!(w.flush(), "failed to write packet");
            }

            Self::ShowPacket {
                pretty,
                input,
                output,
            } => {
                let input = crate::util::read_input(input.as_deref());
                let w = crate::util::open_output(output.as_deref());

                let mut hasher = ring::hash::Engine::new();
                let packet = check!(
                    RawPacket::parse(&input),
                    "failed to parse packet"
                );
                let inspection = check!(
                    packet.inspect(&mut hasher),
                    "failed to hash payload"
                );

                if !inspection.token_ok {
                    eprintln!("warning: unexpected token");
                }
                if !inspection.length_ok {
                    eprintln!("warning: length field does not match payload");
                }
                if !inspection.signature_ok {
                    eprintln!("warning: signature verification failed");
                }

                let summary = Summary {
                    inspection,
                    payload: hex::encode(packet.payload()),
                    signature: hex::encode(packet.signature()),
                };
                crate::util::write_json(w, &summary, pretty);
            }
        }
    }
}
