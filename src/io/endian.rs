// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Traits for converting integers to and from byte representations.
//!
//! The packet envelope is little-endian throughout; CBOR arguments are
//! big-endian and are handled by the encoder directly.

use core::mem;

use crate::io;
use crate::io::Read;
use crate::io::Write;

/// A little-endian integer, which can be read and written.
///
/// This trait can be used for operating generically over little-endian integer
/// I/O.
pub trait LeInt: Sized + Copy {
    /// Reads a value of type `Self`, in little-endian order.
    fn read_from<R: Read>(r: R) -> Result<Self, io::Error>;

    /// Writes a value of type `Self`, in little-endian order.
    fn write_to<W: Write>(self, w: W) -> Result<(), io::Error>;
}

impl LeInt for u8 {
    #[inline]
    fn read_from<R: Read>(mut r: R) -> Result<Self, io::Error> {
        let mut bytes = [0; mem::size_of::<Self>()];
        r.read_bytes(&mut bytes)?;
        Ok(bytes[0])
    }

    #[inline]
    fn write_to<W: Write>(self, mut w: W) -> Result<(), io::Error> {
        w.write_bytes(&[self])
    }
}

macro_rules! le_int {
    ($($ty:ty => $read:ident, $write:ident;)*) => {$(
        impl LeInt for $ty {
            #[inline]
            fn read_from<R: Read>(mut r: R) -> Result<Self, io::Error> {
                use byteorder::ByteOrder as _;

                let mut bytes = [0; mem::size_of::<Self>()];
                r.read_bytes(&mut bytes)?;
                Ok(byteorder::LE::$read(&bytes))
            }

            #[inline]
            fn write_to<W: Write>(self, mut w: W) -> Result<(), io::Error> {
                use byteorder::ByteOrder as _;

                let mut bytes = [0; mem::size_of::<Self>()];
                byteorder::LE::$write(&mut bytes, self);
                w.write_bytes(&bytes)
            }
        }
    )*};
}

le_int! {
    u16 => read_u16, write_u16;
    u32 => read_u32, write_u32;
    u64 => read_u64, write_u64;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn token_layout() {
        let mut out = Vec::new();
        0x766f72706465626du64.write_to(&mut out).unwrap();
        assert_eq!(&out, b"mbedprov");

        let mut r = out.as_slice();
        assert_eq!(u64::read_from(&mut r).unwrap(), 0x766f72706465626d);
        assert_eq!(r.len(), 0);
    }
}
