// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Incremental record construction.

use crate::asset::AssetStore;
use crate::record::BlobEntry;
use crate::record::ConfigParam;
use crate::record::Error;
use crate::record::Group;
use crate::record::KeyEntry;
use crate::record::KeyType;
use crate::record::ParamValue;
use crate::record::Record;
use crate::record::CURRENT_SCHEME_VERSION;

/// A builder for a [`Record`].
///
/// Entries are resolved against an [`AssetStore`] as they are added, so a
/// dangling asset reference is reported at the call that introduced it.
///
/// A group shows up in the built record once it is enabled, either through
/// [`Builder::enable()`] or by adding an entry to it. The exception is
/// [`Group::Csrs`], which must be enabled before CSRs can be added.
pub struct Builder<'a> {
    assets: &'a AssetStore,
    record: Record,
}

impl<'a> Builder<'a> {
    /// Creates a builder for an entirely empty record.
    pub fn new(assets: &'a AssetStore) -> Self {
        Self {
            assets,
            record: Record::default(),
        }
    }

    /// Creates a builder with the usual production layout: the current
    /// scheme version, and empty `Keys`, `Certificates` and `ConfigParams`
    /// groups.
    pub fn with_default_groups(assets: &'a AssetStore) -> Self {
        let mut builder = Self::new(assets);
        builder
            .set_scheme_version(CURRENT_SCHEME_VERSION)
            .enable(Group::Keys)
            .enable(Group::Certificates)
            .enable(Group::ConfigParams);
        builder
    }

    /// Ensures `group` is present in the record, even if it stays empty.
    pub fn enable(&mut self, group: Group) -> &mut Self {
        fn ensure<T>(group: &mut Option<Vec<T>>) {
            if group.is_none() {
                *group = Some(Vec::new());
            }
        }

        let r = &mut self.record;
        match group {
            Group::Keys => ensure(&mut r.keys),
            Group::Certificates => ensure(&mut r.certificates),
            Group::Csrs => ensure(&mut r.csrs),
            Group::ConfigParams => ensure(&mut r.params),
        }
        self
    }

    /// Sets the scheme version, replacing any previous one.
    pub fn set_scheme_version(
        &mut self,
        version: impl Into<String>,
    ) -> &mut Self {
        self.record.scheme_version = Some(version.into());
        self
    }

    /// Removes the scheme version.
    pub fn clear_scheme_version(&mut self) -> &mut Self {
        self.record.scheme_version = None;
        self
    }

    /// Appends a key whose bytes are the asset called `asset`.
    pub fn add_key(
        &mut self,
        name: impl Into<String>,
        asset: &str,
        key_type: KeyType,
        format: impl Into<String>,
    ) -> Result<&mut Self, Error> {
        let data = self.assets.get(asset)?.to_vec();
        let name = name.into();
        trace!("adding {} key {} from {}", key_type, name, asset);
        self.record.keys.get_or_insert_with(Vec::new).push(KeyEntry {
            name,
            key_type,
            format: format.into(),
            data,
        });
        Ok(self)
    }

    /// Appends a certificate whose bytes are the asset called `asset`.
    pub fn add_certificate(
        &mut self,
        name: impl Into<String>,
        asset: &str,
        format: impl Into<String>,
    ) -> Result<&mut Self, Error> {
        let entry = self.blob(name.into(), asset, format.into())?;
        trace!("adding certificate {} from {}", entry.name, asset);
        self.record
            .certificates
            .get_or_insert_with(Vec::new)
            .push(entry);
        Ok(self)
    }

    /// Appends a CSR whose bytes are the asset called `asset`.
    ///
    /// Fails with [`Error::GroupDisabled`] unless [`Group::Csrs`] was
    /// enabled first.
    pub fn add_csr(
        &mut self,
        name: impl Into<String>,
        asset: &str,
        format: impl Into<String>,
    ) -> Result<&mut Self, Error> {
        if self.record.csrs.is_none() {
            return fail!(Error::GroupDisabled(Group::Csrs));
        }
        let entry = self.blob(name.into(), asset, format.into())?;
        trace!("adding csr {} from {}", entry.name, asset);
        if let Some(csrs) = &mut self.record.csrs {
            csrs.push(entry);
        }
        Ok(self)
    }

    fn blob(
        &self,
        name: String,
        asset: &str,
        format: String,
    ) -> Result<BlobEntry, Error> {
        Ok(BlobEntry {
            name,
            format,
            data: self.assets.get(asset)?.to_vec(),
        })
    }

    /// Appends a configuration parameter.
    ///
    /// Earlier parameters with the same name are kept; nothing is replaced.
    pub fn set_param(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> &mut Self {
        let name = name.into();
        let data = value.into();
        trace!("setting param {} = {:?}", name, data);
        self.record
            .params
            .get_or_insert_with(Vec::new)
            .push(ConfigParam { name, data });
        self
    }

    /// Finishes building, returning the record.
    pub fn build(self) -> Record {
        self.record
    }
}
