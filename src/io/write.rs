// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! The [`Write`] trait.

use static_assertions::assert_obj_safe;

use crate::io;
use crate::io::endian::LeInt;

/// A sink for bytes, such as a `Vec<u8>` or a file wrapped in [`StdWrite`].
pub trait Write {
    /// Writes all of `buf` to `self`, or fails.
    ///
    /// There are no partial writes.
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), io::Error>;

    /// Writes a little-endian integer.
    #[inline]
    fn write_le<I: LeInt>(&mut self, val: I) -> Result<(), io::Error>
    where
        Self: Sized,
    {
        val.write_to(self)
    }
}
assert_obj_safe!(Write);

impl<W: Write + ?Sized> Write for &'_ mut W {
    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), io::Error> {
        W::write_bytes(*self, buf)
    }
}

impl Write for Vec<u8> {
    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), io::Error> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

/// Adapts a [`std::io::Write`], such as an output file, into a [`Write`].
///
/// A blanket impl over every [`std::io::Write`] would collide with the one
/// on `&mut W`, hence the wrapper.
pub struct StdWrite<W>(pub W);

impl<W: std::io::Write> Write for StdWrite<W> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), io::Error> {
        use std::io::ErrorKind;
        match self.0.write_all(buf) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::WriteZero => {
                Err(io::Error::BufferExhausted)
            }
            Err(_) => Err(io::Error::Internal),
        }
    }
}
