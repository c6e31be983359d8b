// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Deliberate record corruption.
//!
//! A [`Record`] can only express well-formed layouts. Negative fixtures are
//! produced by flattening a valid record and then applying a list of
//! [`Corruption`]s to the resulting value tree.

use crate::cbor::Value;
use crate::named::NamedEnum as _;
use crate::record::Error;
use crate::record::Field;
use crate::record::Group;
use crate::record::Record;
use crate::record::SCHEME_VERSION_KEY;

/// A named mutation of a flattened record.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Corruption {
    /// Removes the top-level `SchemeVersion` entry.
    DropSchemeVersion,

    /// Renames a top-level group in place, keeping its contents.
    RenameGroup {
        /// The group to rename.
        group: Group,
        /// The replacement key.
        to: String,
    },

    /// Renames a field of one entry of a group.
    RenameEntryField {
        /// The group holding the entry.
        group: Group,
        /// The entry's position within the group.
        index: usize,
        /// The field to rename.
        field: Field,
        /// The replacement key.
        to: String,
    },
}

impl Corruption {
    /// Applies this corruption to `value`.
    ///
    /// Fails with [`Error::NoSuchTarget`] if `value` does not have the entry
    /// this corruption refers to; `value` is left untouched in that case.
    pub fn apply(&self, value: &mut Value) -> Result<(), Error> {
        let hit = match self {
            Self::DropSchemeVersion => {
                value.remove(SCHEME_VERSION_KEY).is_some()
            }
            Self::RenameGroup { group, to } => {
                value.rename_key(group.name(), to.as_str())
            }
            Self::RenameEntryField {
                group,
                index,
                field,
                to,
            } => value
                .get_mut(group.name())
                .and_then(Value::as_array_mut)
                .and_then(|entries| entries.get_mut(*index))
                .map(|entry| entry.rename_key(field.name(), to.as_str()))
                .unwrap_or(false),
        };
        check!(hit, Error::NoSuchTarget(self.clone()));
        trace!("applied {:?}", self);
        Ok(())
    }
}

/// Flattens `record` and applies each of `corruptions` in order.
pub fn corrupt(
    record: &Record,
    corruptions: &[Corruption],
) -> Result<Value, Error> {
    let mut value = record.to_canonical_form();
    for c in corruptions {
        c.apply(&mut value)?;
    }
    Ok(value)
}
