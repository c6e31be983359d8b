// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! `factory-config-tool` is a simple command-line tool for generating and
//! inspecting factory configuration records and provisioning packets.
//!
//! Logging from the library is controlled with `RUST_LOG`.

#![deny(missing_docs)]
#![deny(warnings)]
#![deny(unused)]
#![deny(unsafe_code)]

use structopt::StructOpt as _;

#[macro_use]
mod util;

mod packet;
mod record;

/// A command-line tool for working with factory configuration data.
#[allow(missing_docs)]
#[derive(structopt::StructOpt)]
#[structopt(author)]
enum CliCommand {
    #[structopt(flatten)]
    Record(record::Record),
    #[structopt(flatten)]
    Packet(packet::Packet),
}

fn main() {
    env_logger::init();
    match CliCommand::from_args() {
        CliCommand::Record(r) => r.run(),
        CliCommand::Packet(p) => p.run(),
    }
}
