// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Helpers shared by every subcommand.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Read as _;
use std::io::Write;
use std::path::Path;

/// Unwraps a `Result`, or exits with status 2 after printing the error.
macro_rules! check {
    ($result:expr, $fmt:literal $(, $args:expr)* $(,)?) => {
        match $result {
            Ok(x) => x,
            Err(e) => {
                eprintln!("error: {}: {:?}", format_args!($fmt, $($args,)*), e);
                std::process::exit(2)
            }
        }
    }
}

/// Reads all of `path`, or all of stdin if there is no path.
pub fn read_input(path: Option<&Path>) -> Vec<u8> {
    match path {
        Some(path) => check!(fs::read(path), "failed to read {}", path.display()),
        None => {
            let mut buf = Vec::new();
            check!(io::stdin().read_to_end(&mut buf), "failed to read stdin");
            buf
        }
    }
}

/// Opens `path` for writing, or stdout if there is no path.
pub fn open_output(path: Option<&Path>) -> Box<dyn Write> {
    match path {
        Some(path) => {
            let file =
                check!(File::create(path), "failed to create {}", path.display());
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout()),
    }
}

/// Writes `value` to `w` as JSON with a trailing newline.
pub fn write_json(mut w: impl Write, value: &impl serde::Serialize, pretty: bool) {
    let json = if pretty {
        serde_json::to_writer_pretty(&mut w, value)
    } else {
        serde_json::to_writer(&mut w, value)
    };
    check!(json, "failed to write JSON");
    check!(writeln!(w).and_then(|_| w.flush()), "failed to write output");
}
