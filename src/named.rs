// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Enums whose variants carry a fixed on-the-wire name.
//!
//! Group names, entry field names and key types are all case-sensitive
//! strings in the encoded record. [`NamedEnum`] ties each Rust variant to
//! exactly one such string.

use core::fmt;

/// Represents a C-like enum that can be converted to and from a fixed
/// string representation.
///
/// The following identity must hold for all types T:
/// ```
/// # use factory_config::named::NamedEnum;
/// # fn test<T: NamedEnum + PartialEq + std::fmt::Debug>(x: T) {
/// assert_eq!(T::from_name(T::name(x)), Some(x));
/// # }
/// ```
pub trait NamedEnum: Sized + Copy {
    /// Converts `self` into its string representation.
    fn name(self) -> &'static str;

    /// Attempts to convert a value of `Self` from a string representation.
    fn from_name(name: &str) -> Option<Self>;

    /// Returns every variant, in declaration order.
    fn all() -> &'static [Self];
}

/// A deserialization-from-string error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NameFromStrError;

impl fmt::Display for NameFromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown variant")
    }
}

/// A convenience macro for generating `NamedEnum`-implementing enums.
///
/// Syntax is as follows:
/// ```text
/// named_enum! {
///     /// This is my enum.
///     pub enum MyEnum {
///         /// Variant `A`.
///         A = "a",
///         /// Variant `B`.
///         B = "b",
///     }
/// }
/// ```
///
/// With the `serde` feature enabled, the generated enum also serializes as
/// its name.
macro_rules! named_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident {
        $($(#[$meta_variant:meta])* $variant:ident = $value:literal,)*
    }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        $vis enum $name {
           $(
               $(#[$meta_variant])*
               $variant,
           )*
        }

        impl $crate::named::NamedEnum for $name {
            fn name(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $value,
                    )*
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(
                        $value => Some(Self::$variant),
                    )*
                    _ => None,
                }
            }

            fn all() -> &'static [Self] {
                &[$(Self::$variant,)*]
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                use $crate::named::NamedEnum;

                write!(f, "{}", self.name())
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::named::NameFromStrError;

            fn from_str(
                s: &str
            ) -> core::result::Result<Self, $crate::named::NameFromStrError> {
                use $crate::named::NamedEnum;

                $name::from_name(s).ok_or($crate::named::NameFromStrError)
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S>(&self, s: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                use $crate::named::NamedEnum;

                s.serialize_str(self.name())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(d: D) -> core::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                use $crate::named::NamedEnum;

                let name = <std::borrow::Cow<'de, str>>::deserialize(d)?;
                $name::from_name(&name).ok_or_else(|| {
                    <D::Error as serde::de::Error>::unknown_variant(
                        &name,
                        &[$($value,)*],
                    )
                })
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    named_enum! {
        /// An enum for testing.
        pub enum DemoEnum {
            /// First enum value
            First = "first",

            /// Second enum value
            Second = "Second.Value",
        }
    }

    #[test]
    fn from_name() {
        assert_eq!(DemoEnum::from_name("Second.Value"), Some(DemoEnum::Second));
        assert_eq!(DemoEnum::from_name("first"), Some(DemoEnum::First));
        assert_eq!(DemoEnum::from_name("First"), None);
        assert_eq!(DemoEnum::from_name("does not exist"), None);
    }

    #[test]
    fn name() {
        assert_eq!(DemoEnum::First.name(), "first");
        assert_eq!(DemoEnum::Second.to_string(), "Second.Value");
        assert_eq!(DemoEnum::all(), &[DemoEnum::First, DemoEnum::Second]);
        assert_eq!("first".parse::<DemoEnum>(), Ok(DemoEnum::First));
        assert_eq!("nope".parse::<DemoEnum>(), Err(NameFromStrError));
    }
}
