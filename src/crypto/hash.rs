// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Message digests.
//!
//! A packet's signature is the SHA-256 of its payload. [`Engine`] is the
//! object-safe, streaming interface a digest backend implements; the
//! one-shot helpers in [`EngineExt`] are what the rest of the crate calls.

/// The length of a SHA-256 digest, in bytes.
pub const SHA256_LEN: usize = 32;

/// An error returned by a digest engine.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Indicates data or a finish request with no digest in progress.
    Idle,

    /// Indicates an output buffer of the wrong length.
    WrongSize,

    /// Indicates an unspecified, internal error.
    Unspecified,
}

/// A streaming SHA-256 engine, holding the state of at most one digest.
pub trait Engine {
    /// Begins a new digest, discarding any previous state.
    fn start(&mut self) -> Result<(), Error>;

    /// Adds `data` to the digest in progress.
    fn update(&mut self, data: &[u8]) -> Result<(), Error>;

    /// Completes the digest in progress, writing it to `out`.
    ///
    /// `out` must be exactly [`SHA256_LEN`] bytes long.
    fn finish(&mut self, out: &mut [u8]) -> Result<(), Error>;
}

/// One-shot helpers over an [`Engine`].
#[extend::ext(name = EngineExt)]
pub impl<E: Engine + ?Sized> E {
    /// Computes the SHA-256 of the concatenation of `parts`.
    fn sha256_parts(&mut self, parts: &[&[u8]]) -> Result<[u8; SHA256_LEN], Error> {
        self.start()?;
        for part in parts {
            self.update(part)?;
        }
        let mut digest = [0; SHA256_LEN];
        self.finish(&mut digest)?;
        Ok(digest)
    }

    /// Computes the SHA-256 of `buf`.
    fn sha256(&mut self, buf: &[u8]) -> Result<[u8; SHA256_LEN], Error> {
        self.sha256_parts(&[buf])
    }
}

// Ensure Engine is object-safe.
impl dyn Engine {}
