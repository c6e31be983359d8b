// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! The asset store.
//!
//! Keys, CSRs and certificates are produced by external tooling and are
//! treated here as opaque blobs, keyed by name (usually the file name they
//! were written to, such as `priv_ecc_key1.der`). The store is filled once
//! and then only read while records are assembled.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// An error from the asset store.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Indicates a reference to an asset that was never stored.
    Missing(String),

    /// Indicates that a file could not be read while loading a directory.
    Io {
        /// The file or directory being read.
        path: PathBuf,
        /// The underlying failure.
        kind: std::io::ErrorKind,
    },
}

/// A name to bytes lookup table.
#[derive(Clone, Default, Debug)]
pub struct AssetStore {
    assets: HashMap<String, Vec<u8>>,
}

impl AssetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every regular file directly inside `dir`, keyed by file name.
    ///
    /// Subdirectories and files whose names are not UTF-8 are skipped.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let io_err = |path: &Path| {
            let path = path.to_owned();
            move |e: std::io::Error| Error::Io {
                path,
                kind: e.kind(),
            }
        };

        let mut store = Self::new();
        for entry in fs::read_dir(dir).map_err(io_err(dir))? {
            let entry = entry.map_err(io_err(dir))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => {
                    warn!("skipping non-UTF-8 asset name: {:?}", path);
                    continue;
                }
            };

            let bytes = fs::read(&path).map_err(io_err(&path))?;
            trace!("loaded asset {} ({} bytes)", name, bytes.len());
            store.insert(name, bytes);
        }
        Ok(store)
    }

    /// Stores `bytes` under `name`, returning whatever was there before.
    ///
    /// Later writes overwrite earlier ones.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Option<Vec<u8>> {
        self.assets.insert(name.into(), bytes.into())
    }

    /// Looks up an asset by name.
    pub fn get(&self, name: &str) -> Result<&[u8], Error> {
        match self.assets.get(name) {
            Some(bytes) => Ok(bytes),
            None => fail!(Error::Missing(name.into())),
        }
    }

    /// Returns whether an asset called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    /// Returns every required name that is absent from the store.
    pub fn missing<'a>(
        &self,
        required: impl IntoIterator<Item = &'a str>,
    ) -> Vec<&'a str> {
        required
            .into_iter()
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// Returns all asset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.assets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns every asset with its name, sorted by name.
    pub fn iter(&self) -> Vec<(&str, &[u8])> {
        let mut assets: Vec<_> = self
            .assets
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect();
        assets.sort_unstable_by_key(|&(k, _)| k);
        assets
    }

    /// Returns the number of stored assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
