// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Byte-oriented I/O.
//!
//! The CBOR encoder and the packet framer write through [`Write`]; the
//! packet parser pulls its fixed-width header fields out of a [`Read`].

pub mod endian;
pub mod read;
pub mod write;

pub use read::Read;
pub use write::StdWrite;
pub use write::Write;

/// An error from a [`Read`] or [`Write`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Indicates a read past the end of the input, or a write into a full
    /// buffer.
    BufferExhausted,

    /// Indicates any other failure, such as an I/O error from the file
    /// behind a [`StdWrite`].
    Internal,
}
