// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! The [`Read`] trait.

use static_assertions::assert_obj_safe;

use crate::io;
use crate::io::endian::LeInt;

/// A source of bytes of known length, such as a `&[u8]`.
///
/// Unlike [`std::io::Read`], a short read is always an error: callers ask
/// for exactly as many bytes as a field needs.
pub trait Read {
    /// Fills `out` completely from `self`.
    fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), io::Error>;

    /// Returns the number of bytes left in `self`.
    fn remaining_data(&self) -> usize;

    /// Reads a little-endian integer.
    #[inline]
    fn read_le<I: LeInt>(&mut self) -> Result<I, io::Error>
    where
        Self: Sized,
    {
        I::read_from(self)
    }
}
assert_obj_safe!(Read);

impl<R: Read + ?Sized> Read for &'_ mut R {
    #[inline]
    fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), io::Error> {
        R::read_bytes(*self, out)
    }

    #[inline]
    fn remaining_data(&self) -> usize {
        R::remaining_data(*self)
    }
}

/// Reading from a slice advances it past the bytes read.
impl Read for &[u8] {
    fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), io::Error> {
        if self.len() < out.len() {
            return Err(io::Error::BufferExhausted);
        }
        let (head, tail) = self.split_at(out.len());
        out.copy_from_slice(head);
        *self = tail;
        Ok(())
    }

    fn remaining_data(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn header_fields() {
        let mut bytes: &[u8] = b"mbedprov\x05\0\0\0ab";
        assert_eq!(bytes.read_le::<u64>().unwrap(), 0x766f_7270_6465_626d);
        assert_eq!(bytes.read_le::<u32>().unwrap(), 5);
        assert_eq!(bytes.remaining_data(), 2);

        let mut short = [0; 3];
        assert_eq!(
            bytes.read_bytes(&mut short),
            Err(io::Error::BufferExhausted)
        );
        // A failed read consumes nothing.
        assert_eq!(bytes, b"ab");
    }
}
