// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Internal `serde` helpers.

use core::convert::TryFrom as _;
use core::fmt;
use core::fmt::LowerHex;
use core::marker::PhantomData;

use serde::de;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serializer;


/// Helper for `de_radix`.
pub struct Radix<T>(PhantomData<T>);

/// Splits a `0b`, `0o` or `0x` prefix off of `s`, returning the radix it
/// names.
fn split_radix(s: &str) -> (u32, &str) {
    let prefix = s.get(..2).unwrap_or("");
    match prefix {
        "0b" | "0B" => (2, &s[2..]),
        "0o" | "0O" => (8, &s[2..]),
        "0x" | "0X" => (16, &s[2..]),
        _ => (10, s),
    }
}

macro_rules! impl_radix {
    ($($ty:ident)*) => {$(
        impl<'de> de::Visitor<'de> for Radix<$ty> {
            type Value = $ty;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "integer between {} and {}", $ty::MIN, $ty::MAX)
            }

            fn visit_str<E>(self, s: &str) -> Result<$ty, E>
                where E: de::Error,
            {
                let (neg, digits) = match s.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, s),
                };
                let (radix, digits) = split_radix(digits);

                u128::from_str_radix(digits, radix)
                    .ok()
                    .and_then(|mag| match (neg, i128::try_from(mag)) {
                        (false, n) => n.ok(),
                        (true, Ok(n)) => Some(-n),
                        // The magnitude of `i128::MIN` is one past `i128::MAX`.
                        (true, Err(_)) if mag == i128::MIN.unsigned_abs() => {
                            Some(i128::MIN)
                        }
                        (true, Err(_)) => None,
                    })
                    .and_then(|n| $ty::try_from(n).ok())
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(s), &self))
            }

            fn visit_u64<E>(self, n: u64) -> Result<$ty, E>
                where E: de::Error,
            {
                $ty::try_from(n).map_err(|_| {
                    E::invalid_value(de::Unexpected::Unsigned(n), &self)
                })
            }

            fn visit_i64<E>(self, n: i64) -> Result<$ty, E>
                where E: de::Error,
            {
                $ty::try_from(n).map_err(|_| {
                    E::invalid_value(de::Unexpected::Signed(n), &self)
                })
            }
        }
    )*}
}
impl_radix! {
    u64 i128
}

/// Deserializes an integer from either a string (which supports hex encoding)
/// or a normal integer.
///
/// Integers too wide for the format's native numbers, such as account IDs,
/// must be given as strings.
pub fn de_radix<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    Radix<T>: de::Visitor<'de, Value = T>,
{
    d.deserialize_any(Radix::<T>(PhantomData))
}

/// Serializes an integer as hex.
pub fn se_hex<S, X>(x: X, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    X: LowerHex,
{
    s.serialize_str(&format!("0x{:x}", x))
}

/// Deserializes a byte string from hex text.
pub fn de_hex_bytes<'de, D>(d: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(d)?;
    hex::decode(&text).map_err(de::Error::custom)
}

/// Serializes a byte string as lowercase hex text.
pub fn se_hex_bytes<S>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&hex::encode(bytes))
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct Ints {
        #[serde(deserialize_with = "de_radix")]
        wide: i128,
        #[serde(deserialize_with = "de_radix")]
        time: u64,
        #[serde(deserialize_with = "de_hex_bytes")]
        blob: Vec<u8>,
    }

    #[test]
    fn radix_and_hex() {
        let ints: Ints = serde_json::from_str(
            r#"{"wide": "0xA65369B6589987655264", "time": 1500000000, "blob": "0aFF"}"#,
        )
        .unwrap();
        assert_eq!(ints.wide, 0xA653_69B6_5899_8765_5264);
        assert_eq!(ints.time, 1_500_000_000);
        assert_eq!(ints.blob, [0x0a, 0xff]);

        let ints: Ints = serde_json::from_str(
            r#"{"wide": "-0b101", "time": "0o17", "blob": ""}"#,
        )
        .unwrap();
        assert_eq!(ints.wide, -5);
        assert_eq!(ints.time, 15);
        assert!(ints.blob.is_empty());
    }

    #[test]
    fn radix_extremes() {
        let wide = |text: &str| {
            let json =
                format!(r#"{{"wide": "{}", "time": 0, "blob": ""}}"#, text);
            serde_json::from_str::<Ints>(&json).map(|ints| ints.wide)
        };
        let min_hex = format!("-0x{:x}", i128::MIN.unsigned_abs());
        assert_eq!(wide(&min_hex).unwrap(), i128::MIN);
        assert_eq!(wide(&format!("{}", i128::MIN)).unwrap(), i128::MIN);
        assert_eq!(wide(&format!("0x{:x}", i128::MAX)).unwrap(), i128::MAX);
        assert_eq!(wide("-0").unwrap(), 0);
        assert!(wide("0x80000000000000000000000000000000").is_err());
        assert!(wide("-0x80000000000000000000000000000001").is_err());
    }

    #[test]
    fn radix_rejects() {
        for json in &[
            r#"{"wide": 0, "time": -1, "blob": ""}"#,
            r#"{"wide": "0xZZ", "time": 0, "blob": ""}"#,
            r#"{"wide": 0, "time": "0x10000000000000000", "blob": ""}"#,
            r#"{"wide": 0, "time": 0, "blob": "abc"}"#,
        ] {
            assert!(serde_json::from_str::<Ints>(json).is_err(), "{}", json);
        }
    }
}
