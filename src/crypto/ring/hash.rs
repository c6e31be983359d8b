// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! A [`hash::Engine`] backed by `ring`.

use core::mem;

use ring::digest;

use crate::crypto::hash;

/// A `ring`-based [`hash::Engine`].
#[derive(Default)]
pub struct Engine {
    inner: Option<digest::Context>,
}

impl Engine {
    /// Creates a new, idle `Engine`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl hash::Engine for Engine {
    fn start(&mut self) -> Result<(), hash::Error> {
        self.inner = Some(digest::Context::new(&digest::SHA256));
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<(), hash::Error> {
        match &mut self.inner {
            Some(c) => c.update(data),
            None => return fail!(hash::Error::Idle),
        }
        Ok(())
    }

    fn finish(&mut self, out: &mut [u8]) -> Result<(), hash::Error> {
        let c = match mem::take(&mut self.inner) {
            Some(c) => c,
            None => return fail!(hash::Error::Idle),
        };
        check!(out.len() == hash::SHA256_LEN, hash::Error::WrongSize);
        out.copy_from_slice(c.finish().as_ref());
        Ok(())
    }
}
