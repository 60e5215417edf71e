use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use zerocopy::byteorder::{BE, LE, U16};
use zerocopy::FromBytes;

use crate::u24::decode_u24;
use crate::{Endian, Scalar};

/// Result type for the fallible (non-`Option`) methods of `BinaryReader`.
pub type Result<T> = core::result::Result<T, ReaderError>;

/// Reads values from a slice of bytes, using a cursor and a runtime byte order.
///
/// The reader borrows its data and never allocates, except for the string accessors that
/// return owned strings. Any number of readers may share the same slice.
///
/// Typed reads are checked: if fewer than `size_of::<T>()` bytes remain at the cursor, they
/// return `None` and leave the cursor where it was. Callers that have already validated a
/// region can use [`BinaryReader::read_in_bounds`], which panics instead of returning `None`.
///
/// The string accessors are positional. They take an absolute byte offset and do not use or
/// move the cursor.
#[derive(Clone, Debug)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    offset: usize,
    endian: Endian,
}

impl<'a> BinaryReader<'a> {
    /// Constructor. The cursor starts at 0.
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Self {
            data,
            offset: 0,
            endian,
        }
    }

    /// The whole input, regardless of the cursor.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Length of the input in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position.
    pub fn tell(&self) -> usize {
        self.offset
    }

    /// Moves the cursor. The offset is not checked; a later read will fail if it is out of
    /// bounds.
    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Advances the cursor by `n` bytes, without checking bounds.
    pub fn skip(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n);
    }

    /// Number of bytes between the cursor and the end of the input. 0 if the cursor is past the
    /// end.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Byte order used by subsequent reads.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Changes the byte order. Only affects reads performed after this call.
    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Returns the `len` bytes at the cursor, or `None` if the input is too short.
    #[inline(always)]
    fn peek(&self, len: usize) -> Option<&'a [u8]> {
        let end = self.offset.checked_add(len)?;
        self.data.get(self.offset..end)
    }

    /// Reads a slice of bytes whose length is `len`. This function returns a slice reference
    /// to the bytes; it does not copy them.
    #[inline(always)]
    pub fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        let bytes = self.peek(len)?;
        self.offset += len;
        Some(bytes)
    }

    /// Reads a small array of bytes, with a constant length.
    #[inline(always)]
    pub fn read_cbytes<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.peek(N)?;
        let array = <[u8; N]>::try_from(bytes).ok()?;
        self.offset += N;
        Some(array)
    }

    /// Reads a value of type `T` at the cursor and advances the cursor by `T::SIZE`.
    ///
    /// Returns `None` without moving the cursor if fewer than `T::SIZE` bytes remain.
    #[inline(always)]
    pub fn read<T: Scalar>(&mut self) -> Option<T> {
        let src = self.peek(T::SIZE)?;
        let mut bytes = T::Bytes::default();
        bytes.as_mut().copy_from_slice(src);
        self.offset += T::SIZE;
        Some(T::from_bytes(bytes, self.endian))
    }

    /// Moves the cursor to `offset`, then behaves like [`BinaryReader::read`].
    ///
    /// The cursor stays at `offset` if the read fails.
    #[inline(always)]
    pub fn read_at<T: Scalar>(&mut self, offset: usize) -> Option<T> {
        self.seek(offset);
        self.read()
    }

    /// Reads a value of type `T` at the cursor, for callers that have already checked that
    /// enough data remains (for example with [`BinaryReader::remaining`]).
    ///
    /// # Panics
    ///
    /// Panics if fewer than `T::SIZE` bytes remain.
    #[inline(always)]
    pub fn read_in_bounds<T: Scalar>(&mut self) -> T {
        let mut bytes = T::Bytes::default();
        bytes
            .as_mut()
            .copy_from_slice(&self.data[self.offset..self.offset + T::SIZE]);
        self.offset += T::SIZE;
        T::from_bytes(bytes, self.endian)
    }

    /// Reads a 24-bit unsigned integer in the reader's byte order and advances the cursor by 3.
    ///
    /// Returns `None` without moving the cursor if fewer than 3 bytes remain.
    #[inline(always)]
    pub fn read_u24(&mut self) -> Option<u32> {
        let bytes = self.read_cbytes::<3>()?;
        Some(decode_u24(bytes, self.endian))
    }

    /// Moves the cursor to `offset`, then behaves like [`BinaryReader::read_u24`].
    pub fn read_u24_at(&mut self, offset: usize) -> Option<u32> {
        self.seek(offset);
        self.read_u24()
    }

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Option<u8> {
        self.read()
    }

    /// Reads a `u16` in the reader's byte order.
    #[inline(always)]
    pub fn read_u16(&mut self) -> Option<u16> {
        self.read()
    }

    /// Reads a `u32` in the reader's byte order.
    #[inline(always)]
    pub fn read_u32(&mut self) -> Option<u32> {
        self.read()
    }

    /// Reads a `u64` in the reader's byte order.
    #[inline(always)]
    pub fn read_u64(&mut self) -> Option<u64> {
        self.read()
    }

    /// Checks that `offset` is a valid start for a positional string read and returns the
    /// number of bytes available from there.
    fn string_window(&self, offset: usize) -> Result<usize> {
        if offset > self.data.len() {
            log::debug!(
                "rejected string read at offset {offset:#x}, input is {:#x} bytes",
                self.data.len()
            );
            return Err(ReaderError::OutOfRange {
                offset,
                len: self.data.len(),
            });
        }
        Ok(self.data.len() - offset)
    }

    /// Locates a NUL-terminated narrow string starting at `offset`.
    ///
    /// The string ends at the first zero byte, at the end of the input, or after `max_len`
    /// bytes, whichever comes first. A `max_len` larger than the rest of the input is clamped.
    /// The terminator is not included. The cursor is not used or moved.
    ///
    /// Fails with `ReaderError::OutOfRange` only if `offset` is past the end of the input.
    /// An `offset` equal to the input length yields an empty string.
    pub fn read_string_bytes(&self, offset: usize, max_len: Option<usize>) -> Result<&'a [u8]> {
        let available = self.string_window(offset)?;
        let limit = max_len.map_or(available, |m| m.min(available));
        let window = &self.data[offset..offset + limit];
        let len = window.iter().position(|&b| b == 0).unwrap_or(limit);
        Ok(&window[..len])
    }

    /// Same as [`BinaryReader::read_string_bytes`], but requires the string to be well-formed
    /// UTF-8. Fails with `ReaderError::Invalid` otherwise.
    pub fn read_str(&self, offset: usize, max_len: Option<usize>) -> Result<&'a str> {
        let bytes = self.read_string_bytes(offset, max_len)?;
        core::str::from_utf8(bytes).map_err(|_| ReaderError::Invalid)
    }

    /// Same as [`BinaryReader::read_string_bytes`], returning the string as `bstr::BStr`.
    ///
    /// The caller must handle validating that the string is well-formed UTF-8, if necessary.
    #[cfg(feature = "bstr")]
    pub fn read_string_bstr(&self, offset: usize, max_len: Option<usize>) -> Result<&'a bstr::BStr> {
        Ok(bstr::BStr::new(self.read_string_bytes(offset, max_len)?))
    }

    /// Same as [`BinaryReader::read_string_bytes`], returning the string as `Cow<str>`.
    ///
    /// Byte sequences that are not valid UTF-8 are replaced with the Unicode replacement
    /// character.
    pub fn read_string_lossy(&self, offset: usize, max_len: Option<usize>) -> Result<Cow<'a, str>> {
        let bytes = self.read_string_bytes(offset, max_len)?;
        Ok(String::from_utf8_lossy(bytes))
    }

    /// Reads a NUL-terminated wide string starting at byte offset `offset`.
    ///
    /// Wide characters are 16-bit code units (UTF-16), decoded in the reader's byte order,
    /// whatever the width of `wchar_t` on the platform that produced the data. `max_len` counts
    /// code units, not bytes. The string ends at the first zero unit, at the last complete unit
    /// of the input, or after `max_len` units, whichever comes first. A trailing odd byte is
    /// ignored. The cursor is not used or moved.
    ///
    /// Fails with `ReaderError::OutOfRange` only if `offset` is past the end of the input.
    pub fn read_wstring(&self, offset: usize, max_len: Option<usize>) -> Result<Vec<u16>> {
        let available = self.string_window(offset)? / 2;
        let limit = max_len.map_or(available, |m| m.min(available));
        let bytes = &self.data[offset..];

        let units: Vec<u16> = match self.endian {
            Endian::Big => {
                let (wchars, _) = <[U16<BE>]>::ref_from_prefix_with_elems(bytes, limit)
                    .map_err(|_| ReaderError::Invalid)?;
                wchars.iter().map(|c| c.get()).take_while(|&c| c != 0).collect()
            }
            Endian::Little => {
                let (wchars, _) = <[U16<LE>]>::ref_from_prefix_with_elems(bytes, limit)
                    .map_err(|_| ReaderError::Invalid)?;
                wchars.iter().map(|c| c.get()).take_while(|&c| c != 0).collect()
            }
        };
        Ok(units)
    }

    /// Same as [`BinaryReader::read_wstring`], but requires well-formed UTF-16. Fails with
    /// `ReaderError::Invalid` on unpaired surrogates.
    pub fn read_wstring_utf16(&self, offset: usize, max_len: Option<usize>) -> Result<String> {
        let units = self.read_wstring(offset, max_len)?;
        String::from_utf16(&units).map_err(|_| ReaderError::Invalid)
    }

    /// Same as [`BinaryReader::read_wstring`], converted to `String`. Unpaired surrogates are
    /// replaced with the Unicode replacement character.
    pub fn read_wstring_lossy(&self, offset: usize, max_len: Option<usize>) -> Result<String> {
        let units = self.read_wstring(offset, max_len)?;
        Ok(String::from_utf16_lossy(&units))
    }
}

/// Error type for the positional string reads of `BinaryReader`.
///
/// Running out of data during a typed read is not an error; those reads return `None`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ReaderError {
    /// A positional read started past the end of the input. This is a caller error (a bad
    /// offset), not truncated data.
    #[error("read at offset {offset:#x} is out of range for {len:#x} bytes of input")]
    OutOfRange {
        /// The requested offset.
        offset: usize,
        /// The length of the input.
        len: usize,
    },

    /// The requested data was found but is malformed.
    #[error("the data is malformed")]
    Invalid,
}
