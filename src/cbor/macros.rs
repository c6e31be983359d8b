// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

/// Test-only macro for hand-writing (potentially invalid!) CBOR.
///
/// ```text
/// raw_cbor! {
///   // Anything implementing AsRef<[u8]> is copied verbatim.
///   "SchemeVersion"
///
///   // Hex bytes, whitespace ignored.
///   h"766f72706465626d"
///
///   // Head with major `type` and the shortest argument for `value`.
///   type:value
///
///   // Head whose argument is the byte length of `tokens`, then `tokens`.
///   type { tokens }
///
///   // Head whose argument is the number of comma-separated items, then the
///   // items themselves.
///   type [ tokens, tokens, tokens ]
///
///   // Any of the above with the argument forced to `len` bytes, for
///   // producing non-minimal encodings.
///   type@len:value
///   type@len { tokens }
///   type@len [ tokens, tokens ]
/// }
/// ```
macro_rules! raw_cbor {
    (@parse[$out:tt, $count:tt] $ty:tt$(@$len:tt)? {$($tt:tt)*} $($rest:tt)*) => {{
        let inner = raw_cbor!($($tt)*);
        raw_cbor!(@parse[$out, None] $ty$(@$len)?:(inner.len() as u64));
        $out.extend_from_slice(&inner);

        raw_cbor!(@parse[$out, $count] $($rest)*);
    }};
    (@parse[$out:tt, $count:tt] $ty:tt$(@$len:tt)? [] $($rest:tt)*) => {{
        raw_cbor!(@parse[$out, None] $ty$(@$len)?:0);
        raw_cbor!(@parse[$out, $count] $($rest)*);
    }};
    (@parse[$out:tt, $count:tt] $ty:tt$(@$len:tt)? [$($tt:tt)*] $($rest:tt)*) => {{
        let mut inner = Vec::<u8>::new();
        let mut count = 1;
        raw_cbor!(@parse[inner, (Some(&mut count))] $($tt)*);
        raw_cbor!(@parse[$out, None] $ty$(@$len)?:count);
        $out.extend_from_slice(&inner);

        raw_cbor!(@parse[$out, $count] $($rest)*);
    }};
    (@parse[$out:tt, $count:tt] $ty:tt$(@$len:tt)?:$arg:tt $($rest:tt)*) => {{
        let ty: u8 = $ty;
        assert!(ty < 8);
        let mut len: Option<u8> = None;
        $(len = Some($len);)?
        let arg: u64 = $arg;
        $out.extend_from_slice(&crate::cbor::macros::head(ty << 5, arg, len));

        raw_cbor!(@parse[$out, $count] $($rest)*);
    }};
    (@parse[$out:tt, $count:tt] ,) => {{
        let _ = $count.unwrap();
    }};
    (@parse[$out:tt, $count:tt] , $($rest:tt)*) => {{
        *$count.unwrap() += 1;
        raw_cbor!(@parse[$out, $count] $($rest)*);
    }};
    (@parse[$out:tt, $count:tt] h$imm:tt $($rest:tt)*) => {{
        let text: &'static str = $imm;
        let digits: String = text.split_whitespace().collect();
        $out.extend_from_slice(&hex::decode(&digits).unwrap());

        raw_cbor!(@parse[$out, $count] $($rest)*);
    }};
    (@parse[$out:tt, $count:tt] $imm:tt $($rest:tt)*) => {{
        $out.extend_from_slice($imm.as_ref());
        raw_cbor!(@parse[$out, $count] $($rest)*);
    }};
    (@parse[$out:tt, $count:tt]) => {{}};
    ($($tokens:tt)*) => {{
        let mut out = Vec::<u8>::new();
        #[allow(unused)] let _ = raw_cbor!(@parse[out, None] $($tokens)*);
        out
    }};
}

/// Builds an initial byte plus argument, either minimal or forced to `len`
/// extra bytes (`0` meaning the argument lives in the initial byte).
pub fn head(ty: u8, arg: u64, len: Option<u8>) -> Vec<u8> {
    let len = len.unwrap_or(match arg {
        0..=23 => 0,
        24..=0xff => 1,
        0x100..=0xffff => 2,
        0x1_0000..=0xffff_ffff => 4,
        _ => 8,
    });

    let mut out = Vec::new();
    match len {
        0 => {
            assert!(arg < 32);
            out.push(ty | (arg as u8));
        }
        1 => {
            assert!(arg <= u8::MAX as u64);
            out.push(ty | 24);
            out.push(arg as u8);
        }
        2 => {
            assert!(arg <= u16::MAX as u64);
            out.push(ty | 25);
            out.extend_from_slice(&(arg as u16).to_be_bytes());
        }
        4 => {
            assert!(arg <= u32::MAX as u64);
            out.push(ty | 26);
            out.extend_from_slice(&(arg as u32).to_be_bytes());
        }
        8 => {
            out.push(ty | 27);
            out.extend_from_slice(&arg.to_be_bytes());
        }
        l => panic!("invalid long-form: {}", l),
    }
    out
}

#[test]
fn test() {
    assert_eq!(raw_cbor!(0:0), [0]);
    assert_eq!(raw_cbor!(1:23), [0b001_10111]);
    assert_eq!(raw_cbor!(1:24), [0b001_11000, 24]);
    assert_eq!(raw_cbor!(1:256), [0b001_11001, 1, 0]);
    assert_eq!(raw_cbor!(1:65536), [0b001_11010, 0, 1, 0, 0]);
    assert_eq!(
        raw_cbor!(1:(1 << 32)),
        [0b001_11011, 0, 0, 0, 1, 0, 0, 0, 0]
    );
    assert_eq!(raw_cbor!(0@1:5), [0b000_11000, 5]);
    assert_eq!(raw_cbor!(4@2:5), [0b100_11001, 0, 5]);

    assert_eq!(raw_cbor!(3 { "Keys" }), [0x64, b'K', b'e', b'y', b's']);
    assert_eq!(raw_cbor!(h"de ad"), [0xde, 0xad]);
    assert_eq!(raw_cbor!(4 []), [0b100_00000]);
    assert_eq!(raw_cbor!(4 ["a", "b",]), [0b100_00010, b'a', b'b']);
}
