use crate::Endian;

/// A fixed-size value that can be packed into and unpacked from bytes in either byte order.
///
/// `SIZE` must equal the length of `Bytes`. Implementations for single-byte types ignore the
/// byte order.
pub trait Scalar: Copy {
    /// The number of bytes in the encoded form.
    const SIZE: usize;

    /// The encoded form, usually `[u8; SIZE]`.
    type Bytes: Copy + Default + AsRef<[u8]> + AsMut<[u8]>;

    /// Decodes a value from its encoded form.
    fn from_bytes(bytes: Self::Bytes, endian: Endian) -> Self;

    /// Encodes a value.
    fn to_bytes(self, endian: Endian) -> Self::Bytes;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                const SIZE: usize = core::mem::size_of::<$t>();
                type Bytes = [u8; core::mem::size_of::<$t>()];

                #[inline(always)]
                fn from_bytes(bytes: Self::Bytes, endian: Endian) -> Self {
                    match endian {
                        Endian::Big => <$t>::from_be_bytes(bytes),
                        Endian::Little => <$t>::from_le_bytes(bytes),
                    }
                }

                #[inline(always)]
                fn to_bytes(self, endian: Endian) -> Self::Bytes {
                    match endian {
                        Endian::Big => self.to_be_bytes(),
                        Endian::Little => self.to_le_bytes(),
                    }
                }
            }
        )*
    };
}

impl_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);

impl Scalar for bool {
    const SIZE: usize = 1;
    type Bytes = [u8; 1];

    /// Any non-zero byte decodes as `true`.
    fn from_bytes(bytes: Self::Bytes, _endian: Endian) -> Self {
        bytes[0] != 0
    }

    fn to_bytes(self, _endian: Endian) -> Self::Bytes {
        [self as u8]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u32_both_orders() {
        assert_eq!(0x01020304u32.to_bytes(Endian::Big), [1, 2, 3, 4]);
        assert_eq!(0x01020304u32.to_bytes(Endian::Little), [4, 3, 2, 1]);
        assert_eq!(u32::from_bytes([1, 2, 3, 4], Endian::Little), 0x04030201);
    }

    #[test]
    fn single_byte_never_swapped() {
        assert_eq!(0xabu8.to_bytes(Endian::Big), 0xabu8.to_bytes(Endian::Little));
        assert_eq!(i8::from_bytes([0xff], Endian::Big), -1);
        assert_eq!(i8::from_bytes([0xff], Endian::Little), -1);
    }

    #[test]
    fn sizes() {
        assert_eq!(<u16 as Scalar>::SIZE, 2);
        assert_eq!(<f64 as Scalar>::SIZE, 8);
        assert_eq!(<i128 as Scalar>::SIZE, 16);
        assert_eq!(<bool as Scalar>::SIZE, 1);
    }

    #[test]
    fn float_bits() {
        let bytes = 1.5f32.to_bytes(Endian::Big);
        assert_eq!(bytes, [0x3f, 0xc0, 0x00, 0x00]);
        assert_eq!(f32::from_bytes(bytes, Endian::Big), 1.5);
    }
}
