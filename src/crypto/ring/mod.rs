// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Implementations of the [`crypto`](super) traits, using the [`ring`]
//! crate.
//!
//! Refer to these by partially-qualified names such as
//! `ring::hash::Engine`.

pub mod hash;
