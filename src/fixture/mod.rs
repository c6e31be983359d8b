// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Test fixtures.
//!
//! A fixture is a named blob meant for a device-side parser's test suite:
//! either an encoded record or a framed packet. The full set is produced by
//! [`catalog::build()`] and written out with [`write_all()`].
//!
//! Records are written as `<name>.bin` and `<name>.hex`; packets only as
//! `<name>.bin`.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::packet;
use crate::record;

pub mod catalog;

pub use catalog::CatalogConfig;

/// An error from building or writing fixtures.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Indicates assets the catalog needs that are not in the store.
    MissingAssets(Vec<String>),

    /// Indicates a record fixture that could not be assembled.
    Record {
        /// The failing fixture.
        fixture: String,
        /// The underlying failure.
        error: record::Error,
    },

    /// Indicates a packet fixture that could not be framed.
    Packet {
        /// The failing fixture.
        fixture: String,
        /// The underlying failure.
        error: packet::Error,
    },

    /// Indicates a packet framing a record that does not exist.
    NoSuchRecord(String),

    /// Indicates a failure writing a fixture file.
    Io {
        /// The file being written.
        path: PathBuf,
        /// The underlying failure.
        kind: std::io::ErrorKind,
    },
}

/// What a fixture holds.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Contents {
    /// An encoded record.
    Record(Vec<u8>),
    /// A serialized packet.
    Packet(Vec<u8>),
}

/// A named fixture.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Fixture {
    /// The fixture's name, which is also its file stem.
    pub name: String,
    /// The fixture's bytes.
    pub contents: Contents,
}

impl Fixture {
    /// Returns the fixture's bytes, whatever kind it is.
    pub fn bytes(&self) -> &[u8] {
        match &self.contents {
            Contents::Record(b) | Contents::Packet(b) => b,
        }
    }

    /// Returns whether this fixture is a record.
    pub fn is_record(&self) -> bool {
        matches!(self.contents, Contents::Record(_))
    }

    /// Returns the files this fixture is written as, as pairs of file name
    /// and contents.
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        let mut files = vec![(format!("{}.bin", self.name), self.bytes().to_vec())];
        if self.is_record() {
            files.push((
                format!("{}.hex", self.name),
                hex::encode(self.bytes()).into_bytes(),
            ));
        }
        files
    }
}

/// Writes every fixture into `dir`, creating it if needed.
///
/// Existing files with the same names are overwritten.
pub fn write_all(
    fixtures: &[Fixture],
    dir: impl AsRef<Path>,
) -> Result<(), Error> {
    let dir = dir.as_ref();
    let io_err = |path: &Path| {
        let path = path.to_owned();
        move |e: std::io::Error| Error::Io {
            path,
            kind: e.kind(),
        }
    };

    fs::create_dir_all(dir).map_err(io_err(dir))?;
    for fixture in fixtures {
        for (name, bytes) in fixture.files() {
            let path = dir.join(&name);
            fs::write(&path, &bytes).map_err(io_err(&path))?;
            trace!("wrote {} ({} bytes)", path.display(), bytes.len());
        }
        info!("generated {}", fixture.name);
    }
    Ok(())
}
