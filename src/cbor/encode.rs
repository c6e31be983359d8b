// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! CBOR encoding.

use core::convert::TryFrom as _;

use crate::cbor::Value;

pub(crate) const MAJOR_UINT: u8 = 0;
pub(crate) const MAJOR_NINT: u8 = 1;
pub(crate) const MAJOR_BYTES: u8 = 2;
pub(crate) const MAJOR_TEXT: u8 = 3;
pub(crate) const MAJOR_ARRAY: u8 = 4;
pub(crate) const MAJOR_MAP: u8 = 5;
pub(crate) const MAJOR_TAG: u8 = 6;

pub(crate) const TAG_POS_BIGNUM: u64 = 2;
pub(crate) const TAG_NEG_BIGNUM: u64 = 3;

/// Writes an initial byte plus argument, always in the shortest form.
fn write_head(out: &mut Vec<u8>, major: u8, arg: u64) {
    let ty = major << 5;
    if arg < 24 {
        out.push(ty | arg as u8);
    } else if let Ok(arg) = u8::try_from(arg) {
        out.push(ty | 24);
        out.push(arg);
    } else if let Ok(arg) = u16::try_from(arg) {
        out.push(ty | 25);
        out.extend_from_slice(&arg.to_be_bytes());
    } else if let Ok(arg) = u32::try_from(arg) {
        out.push(ty | 26);
        out.extend_from_slice(&arg.to_be_bytes());
    } else {
        out.push(ty | 27);
        out.extend_from_slice(&arg.to_be_bytes());
    }
}

fn write_int(out: &mut Vec<u8>, n: i128) {
    // Negative integers are stored as `-1 - arg`.
    let (major, magnitude) = if n >= 0 {
        (MAJOR_UINT, n as u128)
    } else {
        (MAJOR_NINT, (-1 - n) as u128)
    };

    if let Ok(arg) = u64::try_from(magnitude) {
        write_head(out, major, arg);
        return;
    }

    let tag = if major == MAJOR_UINT {
        TAG_POS_BIGNUM
    } else {
        TAG_NEG_BIGNUM
    };
    let bytes = magnitude.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    write_head(out, MAJOR_TAG, tag);
    write_head(out, MAJOR_BYTES, (bytes.len() - first) as u64);
    out.extend_from_slice(&bytes[first..]);
}

/// Appends the encoding of `value` to `out`.
pub(crate) fn encode_into(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Int(n) => write_int(out, *n),
        Value::Bytes(b) => {
            write_head(out, MAJOR_BYTES, b.len() as u64);
            out.extend_from_slice(b);
        }
        Value::Text(t) => {
            write_head(out, MAJOR_TEXT, t.len() as u64);
            out.extend_from_slice(t.as_bytes());
        }
        Value::Array(a) => {
            write_head(out, MAJOR_ARRAY, a.len() as u64);
            for v in a {
                encode_into(v, out);
            }
        }
        Value::Map(m) => {
            write_head(out, MAJOR_MAP, m.len() as u64);
            for (k, v) in m {
                write_head(out, MAJOR_TEXT, k.len() as u64);
                out.extend_from_slice(k.as_bytes());
                encode_into(v, out);
            }
        }
    }
}
