// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! CBOR parsing.
//!
//! The parser only accepts what the encoder produces: shortest-form
//! arguments, definite lengths, text map keys, and bignum tags for integers
//! beyond 64 bits. Map key order and duplicate keys are not checked, since
//! records deliberately keep insertion order and may repeat parameters.

use core::convert::TryFrom as _;
use core::convert::TryInto as _;

use crate::cbor::encode::MAJOR_ARRAY;
use crate::cbor::encode::MAJOR_BYTES;
use crate::cbor::encode::MAJOR_MAP;
use crate::cbor::encode::MAJOR_NINT;
use crate::cbor::encode::MAJOR_TAG;
use crate::cbor::encode::MAJOR_TEXT;
use crate::cbor::encode::MAJOR_UINT;
use crate::cbor::encode::TAG_NEG_BIGNUM;
use crate::cbor::encode::TAG_POS_BIGNUM;
use crate::cbor::Error;
use crate::cbor::Value;

/// The deepest nesting of arrays and maps the decoder will accept.
pub const MAX_DEPTH: usize = 16;

/// Decodes exactly one CBOR item from `bytes`.
///
/// Any bytes after the item are an error.
pub fn decode(bytes: &[u8]) -> Result<Value, Error> {
    untrusted::Input::from(bytes).read_all(Error::TrailingData, |r| {
        parse(r, 0)
    })
}

/// Reads an initial byte, returning the major type and the argument.
fn parse_head(buf: &mut untrusted::Reader) -> Result<(u8, u64), Error> {
    let initial = buf.read_byte()?;

    // For determinism, we *require* that the minimal encoding is used.
    let argument = match initial & 0b00011111 {
        b @ 0..=23 => b as u64,

        24 => {
            let n = buf.read_byte()?;
            check!(n >= 24, Error::NotMinimal);
            n as u64
        }

        25 => {
            let n = u16::from_be_bytes(read_array(buf)?);
            check!(n > u8::MAX as u16, Error::NotMinimal);
            n as u64
        }

        26 => {
            let n = u32::from_be_bytes(read_array(buf)?);
            check!(n > u16::MAX as u32, Error::NotMinimal);
            n as u64
        }

        27 => {
            let n = u64::from_be_bytes(read_array(buf)?);
            check!(n > u32::MAX as u64, Error::NotMinimal);
            n
        }

        // 28-30 are reserved.
        28..=30 => return fail!(Error::Unsupported),

        // 31 is indefinite-length encoding, which is banned.
        _ => return fail!(Error::Indefinite),
    };

    Ok((initial >> 5, argument))
}

fn read_array<const N: usize>(
    buf: &mut untrusted::Reader,
) -> Result<[u8; N], Error> {
    let slice = buf.read_bytes(N)?.as_slice_less_safe();
    slice.try_into().map_err(|_| Error::UnexpectedEof)
}

fn read_slice<'i>(
    buf: &mut untrusted::Reader<'i>,
    len: u64,
) -> Result<&'i [u8], Error> {
    let len = usize::try_from(len).map_err(|_| Error::UnexpectedEof)?;
    Ok(buf.read_bytes(len)?.as_slice_less_safe())
}

fn read_text(buf: &mut untrusted::Reader, len: u64) -> Result<String, Error> {
    let bytes = read_slice(buf, len)?;
    match core::str::from_utf8(bytes) {
        Ok(s) => Ok(s.into()),
        Err(_) => fail!(Error::BadUtf8),
    }
}

fn parse_bignum(
    buf: &mut untrusted::Reader,
    tag: u64,
) -> Result<Value, Error> {
    let (major, len) = parse_head(buf)?;
    check!(major == MAJOR_BYTES, Error::Unsupported);
    let bytes = read_slice(buf, len)?;

    // A bignum must be strictly wider than 64 bits; anything smaller has a
    // shorter encoding as a plain integer.
    check!(bytes.first() != Some(&0), Error::NotMinimal);
    check!(bytes.len() > 8, Error::NotMinimal);
    check!(bytes.len() <= 16, Error::OutOfRange);

    let mut be = [0u8; 16];
    be[16 - bytes.len()..].copy_from_slice(bytes);
    let magnitude = u128::from_be_bytes(be);
    let n = i128::try_from(magnitude).map_err(|_| Error::OutOfRange)?;

    Ok(Value::Int(if tag == TAG_POS_BIGNUM { n } else { -1 - n }))
}

fn parse(buf: &mut untrusted::Reader, depth: usize) -> Result<Value, Error> {
    check!(depth <= MAX_DEPTH, Error::TooDeep);

    let (major, arg) = parse_head(buf)?;
    match major {
        MAJOR_UINT => Ok(Value::Int(arg as i128)),
        MAJOR_NINT => Ok(Value::Int(-1 - arg as i128)),
        MAJOR_BYTES => Ok(Value::Bytes(read_slice(buf, arg)?.into())),
        MAJOR_TEXT => Ok(Value::Text(read_text(buf, arg)?)),
        MAJOR_ARRAY => {
            // No preallocation: `arg` is untrusted.
            let mut items = Vec::new();
            for _ in 0..arg {
                items.push(parse(buf, depth + 1)?);
            }
            Ok(Value::Array(items))
        }
        MAJOR_MAP => {
            let mut entries = Vec::new();
            for _ in 0..arg {
                let (key_major, key_len) = parse_head(buf)?;
                check!(key_major == MAJOR_TEXT, Error::NonTextKey);
                let key = read_text(buf, key_len)?;
                let value = parse(buf, depth + 1)?;
                entries.push((key, value));
            }
            Ok(Value::Map(entries))
        }
        MAJOR_TAG => match arg {
            TAG_POS_BIGNUM | TAG_NEG_BIGNUM => parse_bignum(buf, arg),
            _ => fail!(Error::Unsupported),
        },
        // Floats and simple values.
        _ => fail!(Error::Unsupported),
    }
}
