// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Pluggable cryptography traits.
//!
//! The packet framer needs exactly one primitive, SHA-256, which it reaches
//! through the object-safe [`hash::Engine`] trait rather than a concrete
//! implementation.
//!
//! It is recommended to not import the traits in this module directly.
//! Instead, use imports like `use factory_config::crypto::hash;` and
//! partially-qualified names like `hash::Engine`.
//!
//! A software implementation is provided under the [`ring` module], based on
//! the [`ring`] crate. Its presence is controlled by the `ring` feature flag.
//!
//! [`ring` module]: ring/index.html

pub mod hash;

#[cfg(feature = "ring")]
pub mod ring;
