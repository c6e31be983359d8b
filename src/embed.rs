// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! C source embedding.
//!
//! Device-side unit tests link against the generated fixtures rather than
//! reading files, so the assets, the record fixtures and the catalog's
//! current time can be rendered as a C header and source pair:
//!
//! ```text
//! // header
//! extern const char cfg_x509_1_cader_name[17];
//! extern const uint8_t cfg_x509_1_cader[412];
//! extern uint64_t cfg_current_time;
//!
//! // source
//! // Generated from x509_1_ca.der
//! const char cfg_x509_1_cader_name[] = "cfg_x509_1_cader";
//! const uint8_t cfg_x509_1_cader[412] = { 0x30, 0x82, ... };
//! ```
//!
//! Identifiers are the prefix followed by the item's name with every
//! character that is not valid in a C identifier removed. Two items whose
//! symbols collide after that are rejected.

use std::collections::BTreeMap;
use std::fmt;

use crate::asset::AssetStore;
use crate::fixture::CatalogConfig;
use crate::fixture::Fixture;

const BANNER: &str = "// DO NOT EDIT! This file is automatically generated!";

const SOURCE_WARNING: &str = "\
// If, against common sense, this file is edited manually - be warned that
// the accompanying header file contains the buffer sizes - so must be edited
// as well!";

const ASSETS_COMMENT: &str = "//assets auto generated from open ssl library -";

/// An error from building a [`CSources`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Indicates two items that would declare the same C symbol.
    DuplicateSymbol {
        /// The colliding symbol.
        symbol: String,
        /// The item that declared it first.
        first: String,
        /// The item that declared it again.
        second: String,
    },
}

/// The name under which the catalog's current time is embedded.
pub const CURRENT_TIME: &str = "current_time";

/// Turns `name` into a C identifier by dropping every character outside
/// `[A-Za-z0-9_]`.
///
/// A leading digit gets an underscore in front of it.
pub fn identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// What a declaration holds.
#[derive(Clone, PartialEq, Eq, Debug)]
enum Body {
    Bytes(Vec<u8>),
    Uint64(u64),
}

/// One embedded item.
#[derive(Clone, PartialEq, Eq, Debug)]
struct Decl {
    ident: String,
    origin: String,
    body: Body,
}

impl Decl {
    /// Returns every symbol this declaration defines.
    fn symbols(&self) -> Vec<String> {
        match self.body {
            Body::Bytes(_) => {
                vec![self.ident.clone(), format!("{}_name", self.ident)]
            }
            Body::Uint64(_) => vec![self.ident.clone()],
        }
    }
}

/// The `extern` half of a [`Decl`].
struct Extern<'a>(&'a Decl);

impl fmt::Display for Extern<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Decl { ident, body, .. } = self.0;
        match body {
            Body::Bytes(bytes) => {
                writeln!(f, "extern const char {}_name[{}];", ident, ident.len() + 1)?;
                writeln!(f, "extern const uint8_t {}[{}];", ident, bytes.len())
            }
            Body::Uint64(_) => writeln!(f, "extern uint64_t {};", ident),
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ident = &self.ident;
        writeln!(f, "// Generated from {}", self.origin)?;
        match &self.body {
            Body::Bytes(bytes) => {
                writeln!(f, "const char {}_name[] = \"{}\";", ident, ident)?;
                write!(f, "const uint8_t {}[{}] = {{ ", ident, bytes.len())?;
                for b in bytes {
                    write!(f, "0x{:02x}, ", b)?;
                }
                writeln!(f, "}};")
            }
            Body::Uint64(value) => writeln!(f, "uint64_t {} = {};", ident, value),
        }
    }
}

/// A C header and source pair under construction.
///
/// Items are emitted in two sections, assets first and records second, each
/// in insertion order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CSources {
    prefix: String,
    assets: Vec<Decl>,
    records: Vec<Decl>,
    // Symbol to the origin of the item declaring it.
    symbols: BTreeMap<String, String>,
}

impl CSources {
    /// Creates an empty pair whose identifiers all start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            assets: Vec::new(),
            records: Vec::new(),
            symbols: BTreeMap::new(),
        }
    }

    /// Renders the catalog's inputs and records.
    ///
    /// Assets go in name order, followed by the current time; record
    /// fixtures follow in catalog order. Packet fixtures are not embedded.
    pub fn from_catalog(
        assets: &AssetStore,
        fixtures: &[Fixture],
        config: &CatalogConfig,
        prefix: impl Into<String>,
    ) -> Result<Self, Error> {
        let mut sources = Self::new(prefix);
        for (name, bytes) in assets.iter() {
            sources.push_asset(name, bytes)?;
        }
        sources.push_uint64(CURRENT_TIME, config.current_time)?;
        for fixture in fixtures.iter().filter(|f| f.is_record()) {
            sources.push_record(&fixture.name, fixture.bytes())?;
        }
        Ok(sources)
    }

    /// Builds a declaration and claims its symbols.
    fn decl(
        &mut self,
        name: &str,
        origin: &str,
        body: Body,
    ) -> Result<Decl, Error> {
        let decl = Decl {
            ident: identifier(&format!("{}{}", self.prefix, name)),
            origin: origin.to_string(),
            body,
        };
        let symbols = decl.symbols();
        for symbol in &symbols {
            if let Some(first) = self.symbols.get(symbol) {
                return fail!(Error::DuplicateSymbol {
                    symbol: symbol.clone(),
                    first: first.clone(),
                    second: origin.to_string(),
                });
            }
        }
        for symbol in symbols {
            self.symbols.insert(symbol, origin.to_string());
        }
        Ok(decl)
    }

    /// Adds a byte-array asset.
    pub fn push_asset(
        &mut self,
        name: &str,
        bytes: &[u8],
    ) -> Result<&mut Self, Error> {
        let decl = self.decl(name, name, Body::Bytes(bytes.to_vec()))?;
        trace!("embedding asset {} as {}", name, decl.ident);
        self.assets.push(decl);
        Ok(self)
    }

    /// Adds an integer constant to the asset section.
    pub fn push_uint64(
        &mut self,
        name: &str,
        value: u64,
    ) -> Result<&mut Self, Error> {
        let decl = self.decl(name, name, Body::Uint64(value))?;
        self.assets.push(decl);
        Ok(self)
    }

    /// Adds a record fixture, which came from `<name>.bin`.
    pub fn push_record(
        &mut self,
        name: &str,
        bytes: &[u8],
    ) -> Result<&mut Self, Error> {
        let origin = format!("{}.bin", name);
        let decl = self.decl(name, &origin, Body::Bytes(bytes.to_vec()))?;
        trace!("embedding record {} as {}", name, decl.ident);
        self.records.push(decl);
        Ok(self)
    }

    /// Returns every identifier, in emission order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.assets
            .iter()
            .chain(&self.records)
            .map(|d| d.ident.as_str())
    }

    /// Renders the header file.
    pub fn header(&self) -> String {
        let mut out = format!("{}\n\n{}\n\n", BANNER, ASSETS_COMMENT);
        for d in &self.assets {
            out.push_str(&Extern(d).to_string());
        }
        out.push_str("\n\n");
        for d in &self.records {
            out.push_str(&Extern(d).to_string());
        }
        out
    }

    /// Renders the source file.
    pub fn source(&self) -> String {
        let mut out = format!(
            "{}\n{}\n\n#include <stdint.h>\n\n{}\n\n",
            BANNER, SOURCE_WARNING, ASSETS_COMMENT
        );
        for d in &self.assets {
            out.push_str(&d.to_string());
        }
        out.push_str("\n\n");
        for d in &self.records {
            out.push_str(&d.to_string());
        }
        out
    }
}
