//! Unsigned 24-bit integers with a byte order fixed by the type.
//!
//! Both types are exactly 3 bytes with an alignment of 1, so they can be embedded in
//! `zerocopy`-mapped structures the same way as `zerocopy::byteorder::U16<BE>` and friends.

use crate::{Endian, Scalar};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Largest value representable in 24 bits.
pub const U24_MAX: u32 = 0x00ff_ffff;

/// Encodes the low 24 bits of `value` in the given byte order.
#[inline(always)]
pub fn encode_u24(value: u32, endian: Endian) -> [u8; 3] {
    let b = value.to_be_bytes();
    match endian {
        Endian::Big => [b[1], b[2], b[3]],
        Endian::Little => [b[3], b[2], b[1]],
    }
}

/// Decodes a 24-bit value in the given byte order.
#[inline(always)]
pub fn decode_u24(bytes: [u8; 3], endian: Endian) -> u32 {
    match endian {
        Endian::Big => u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]),
        Endian::Little => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]),
    }
}

/// A value did not fit in 24 bits.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("{0:#x} does not fit in 24 bits")]
pub struct U24OverflowError(pub usize);

macro_rules! u24_type {
    ($(#[$meta:meta])* $name:ident, $endian:expr) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, Default, Eq, PartialEq, Hash,
            FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned,
        )]
        #[repr(transparent)]
        pub struct $name([u8; 3]);

        impl $name {
            /// The byte order of this type.
            pub const ENDIAN: Endian = $endian;

            /// Largest representable value.
            pub const MAX: Self = Self([0xff; 3]);

            /// Creates a value from the low 24 bits of `value`. Higher bits are discarded.
            #[inline(always)]
            pub fn new(value: u32) -> Self {
                Self(encode_u24(value, Self::ENDIAN))
            }

            /// Returns the value.
            #[inline(always)]
            pub fn get(self) -> u32 {
                decode_u24(self.0, Self::ENDIAN)
            }

            /// Replaces the value with the low 24 bits of `value`.
            #[inline(always)]
            pub fn set(&mut self, value: u32) {
                *self = Self::new(value);
            }

            /// Returns the encoded bytes.
            pub fn to_array(self) -> [u8; 3] {
                self.0
            }

            /// Wraps already-encoded bytes.
            pub fn from_array(bytes: [u8; 3]) -> Self {
                Self(bytes)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self::new(value)
            }
        }

        /// Fails if `value` does not fit in 24 bits.
        impl TryFrom<usize> for $name {
            type Error = U24OverflowError;

            fn try_from(value: usize) -> Result<Self, Self::Error> {
                match u32::try_from(value) {
                    Ok(v) if v <= U24_MAX => Ok(Self::new(v)),
                    _ => Err(U24OverflowError(value)),
                }
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> u32 {
                value.get()
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}({:#08x})", stringify!($name), self.get())
            }
        }

        // The byte order is part of the type, so the runtime order is ignored.
        impl Scalar for $name {
            const SIZE: usize = 3;
            type Bytes = [u8; 3];

            #[inline(always)]
            fn from_bytes(bytes: Self::Bytes, _endian: Endian) -> Self {
                Self(bytes)
            }

            #[inline(always)]
            fn to_bytes(self, _endian: Endian) -> Self::Bytes {
                self.0
            }
        }
    };
}

u24_type!(
    /// Unsigned 24-bit integer stored most-significant byte first.
    U24Be,
    Endian::Big
);

u24_type!(
    /// Unsigned 24-bit integer stored least-significant byte first.
    U24Le,
    Endian::Little
);
