/// Byte order used to encode and decode multi-byte values.
///
/// Every `BinaryReader` and `BinaryWriter` carries one of these. It can be changed at any time;
/// the change only affects values read or written afterward.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Endian {
    /// Most-significant byte first.
    Big,
    /// Least-significant byte first.
    Little,
}

impl Endian {
    /// The byte order of the target platform.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endian = Endian::Big;

    /// The byte order of the target platform.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endian = Endian::Little;

    /// Returns `true` if values in this byte order can be used without swapping on this platform.
    #[inline(always)]
    pub fn is_native(self) -> bool {
        self == Self::NATIVE
    }

    /// Returns the other byte order.
    pub fn reversed(self) -> Self {
        match self {
            Self::Big => Self::Little,
            Self::Little => Self::Big,
        }
    }
}

impl core::fmt::Display for Endian {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Big => f.write_str("big-endian"),
            Self::Little => f.write_str("little-endian"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_matches_target() {
        let probe = 1u16.to_ne_bytes();
        let expected = if probe[0] == 1 {
            Endian::Little
        } else {
            Endian::Big
        };
        assert_eq!(Endian::NATIVE, expected);
        assert!(expected.is_native());
        assert!(!expected.reversed().is_native());
    }
}
