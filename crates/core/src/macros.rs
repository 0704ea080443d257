// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros for reducing boilerplate.

/// Give a fieldless `Copy` enum a stable numeric code and a `Display` name.
///
/// ```ignore
/// crate::coded_enum! {
///     Color {
///         Red => (1, "red"),
///         Blue => (2, "blue"),
///     }
/// }
/// ```
#[macro_export]
macro_rules! coded_enum {
    ($enum:ty { $( $variant:ident => ($code:expr, $name:expr) ),+ $(,)? }) => {
        impl $enum {
            /// Numeric code on the wire.
            pub fn code(self) -> u8 {
                match self {
                    $( Self::$variant => $code, )+
                }
            }
        }

        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant => $name, )+
                })
            }
        }
    };
}
