use core::ops::{Deref, DerefMut};

use alloc::vec::Vec;

use crate::u24::encode_u24;
use crate::{BinaryReader, Endian, Scalar};

/// Result type for the fallible methods of `BinaryWriter`.
pub type Result<T> = core::result::Result<T, BinaryWriterError>;

/// Encodes binary values into a growable buffer, using a cursor and a runtime byte order.
///
/// Writes happen at the cursor, not necessarily at the end of the buffer. Writing past the end
/// grows the buffer; any gap between the old end and the cursor is filled with zeros.
///
/// The cursor may be moved past the end of the buffer with [`BinaryWriter::seek`] or
/// [`BinaryWriter::align_up`] without growing it. The gap is materialized by the next write or
/// by [`BinaryWriter::grow_buffer`].
#[derive(Clone, Debug)]
pub struct BinaryWriter {
    data: Vec<u8>,
    offset: usize,
    endian: Endian,
}

impl BinaryWriter {
    /// Creates an empty writer.
    pub fn new(endian: Endian) -> Self {
        Self {
            data: Vec::new(),
            offset: 0,
            endian,
        }
    }

    /// Creates an empty writer whose buffer has the given capacity.
    pub fn with_capacity(endian: Endian, len: usize) -> Self {
        Self {
            data: Vec::with_capacity(len),
            offset: 0,
            endian,
        }
    }

    /// Everything written so far.
    pub fn buffer(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the buffer. Resizing it does not move the cursor.
    pub fn buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// Length of the buffer. This can be less than [`BinaryWriter::tell`].
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position.
    pub fn tell(&self) -> usize {
        self.offset
    }

    /// Moves the cursor. Seeking past the end of the buffer does not grow it.
    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Byte order used by subsequent writes.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Changes the byte order. Bytes already in the buffer are left as they are.
    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Writes `bytes` at the cursor, growing the buffer if needed, and advances the cursor.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let end = self.offset + bytes.len();
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[self.offset..end].copy_from_slice(bytes);
        self.offset = end;
    }

    /// Writes a small, fixed-size array of bytes.
    pub fn write_cbytes<const N: usize>(&mut self, value: [u8; N]) {
        self.write_bytes(&value)
    }

    /// Writes `n` zero bytes.
    pub fn write_zeros(&mut self, n: usize) {
        let end = self.offset + n;
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[self.offset..end].fill(0);
        self.offset = end;
    }

    /// Writes `value` in the writer's byte order.
    #[inline(always)]
    pub fn write<T: Scalar>(&mut self, value: T) {
        self.write_bytes(value.to_bytes(self.endian).as_ref())
    }

    /// Writes a single `u8` value
    pub fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value])
    }

    /// Writes a single `u16` value
    pub fn write_u16(&mut self, value: u16) {
        self.write(value)
    }

    /// Writes a single `u32` value
    pub fn write_u32(&mut self, value: u32) {
        self.write(value)
    }

    /// Writes a single `u64` value
    pub fn write_u64(&mut self, value: u64) {
        self.write(value)
    }

    /// Writes the low 24 bits of `value` as 3 bytes in the writer's byte order. Higher bits are
    /// discarded.
    pub fn write_u24(&mut self, value: u32) {
        self.write_cbytes(encode_u24(value, self.endian))
    }

    /// Writes a single zero byte.
    pub fn write_nul(&mut self) {
        self.write_u8(0)
    }

    /// Writes the bytes of `s`, without a terminator.
    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes())
    }

    /// Writes the bytes of `s` followed by one zero byte.
    ///
    /// This does not check `s` for interior NULs.
    pub fn write_cstr(&mut self, s: &str) {
        self.write_cstr_bytes(s.as_bytes())
    }

    /// Writes `s` followed by one zero byte. `s` does not need to be UTF-8.
    pub fn write_cstr_bytes(&mut self, s: &[u8]) {
        self.write_bytes(s);
        self.write_nul();
    }

    /// Converts `s` to UTF-16 and writes the code units in the writer's byte order, without a
    /// terminator.
    pub fn write_wstr(&mut self, s: &str) {
        let num_utf16_code_units = s.encode_utf16().count();
        self.data.reserve(num_utf16_code_units * 2);
        for c in s.encode_utf16() {
            self.write(c);
        }
    }

    /// Same as [`BinaryWriter::write_wstr`], followed by one zero code unit.
    pub fn write_wcstr(&mut self, s: &str) {
        self.write_wstr(s);
        self.write(0u16);
    }

    /// Relocates the cursor to `offset` until the returned guard is dropped.
    ///
    /// The guard dereferences to the writer. When it is dropped, even during unwinding, the
    /// cursor goes back to where it was when `at` was called, whatever was done through the
    /// guard.
    pub fn at(&mut self, offset: usize) -> OffsetGuard<'_> {
        let saved = self.offset;
        self.offset = offset;
        OffsetGuard {
            writer: self,
            saved,
        }
    }

    /// Calls `f` with the cursor moved to `offset`, then restores the cursor.
    ///
    /// `f` receives the cursor position from before the move, so it can record offsets relative
    /// to it. This is how values that are only known later (such as the offset of data written
    /// after a header) are back-patched into space reserved earlier.
    pub fn run_at<R>(&mut self, offset: usize, f: impl FnOnce(&mut BinaryWriter, usize) -> R) -> R {
        let mut guard = self.at(offset);
        let saved = guard.saved_offset();
        f(&mut *guard, saved)
    }

    /// Writes `tell() - base` as a `T` at `offset`, leaving the cursor where it is.
    ///
    /// Fails with `BinaryWriterError::CannotEncode`, writing nothing, if `base` is past the
    /// cursor or the difference does not fit in `T`.
    pub fn write_current_offset_at<T>(&mut self, offset: usize, base: usize) -> Result<()>
    where
        T: Scalar + TryFrom<usize>,
    {
        self.run_at(offset, |w, current| -> Result<()> {
            let value = current
                .checked_sub(base)
                .and_then(|relative| T::try_from(relative).ok())
                .ok_or(BinaryWriterError::CannotEncode)?;
            w.write(value);
            Ok(())
        })
    }

    /// Moves the cursor up to the next multiple of `n`. No padding is written.
    pub fn align_up(&mut self, n: usize) {
        self.offset = crate::align_up(self.offset, n);
    }

    /// Moves the cursor up to the next multiple of `n` and materializes the padding as zeros.
    pub fn align_up_with_padding(&mut self, n: usize) {
        self.align_up(n);
        self.grow_buffer();
    }

    /// If the cursor is past the end of the buffer, grows the buffer up to the cursor, filling
    /// the gap with zeros.
    pub fn grow_buffer(&mut self) {
        if self.offset > self.data.len() {
            log::trace!(
                "growing buffer from {:#x} to {:#x} bytes",
                self.data.len(),
                self.offset
            );
            self.data.resize(self.offset, 0);
        }
    }

    /// Returns everything written so far and resets the writer to an empty buffer with the
    /// cursor at 0. The byte order is kept.
    pub fn finalize(&mut self) -> Vec<u8> {
        log::trace!("finalizing {:#x} bytes", self.data.len());
        self.offset = 0;
        core::mem::take(&mut self.data)
    }

    /// Extracts the buffer, consuming the writer.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Returns a reader over the current buffer, with the writer's byte order and the cursor
    /// at 0.
    ///
    /// The reader borrows the writer, so the writer cannot be modified while it is alive. Use
    /// [`BinaryWriter::snapshot`] to keep a copy and continue writing.
    pub fn reader(&self) -> BinaryReader<'_> {
        BinaryReader::new(&self.data, self.endian)
    }

    /// Returns a copy of the current buffer.
    pub fn snapshot(&self) -> Vec<u8> {
        self.data.clone()
    }
}

/// Scoped cursor relocation, created by [`BinaryWriter::at`].
pub struct OffsetGuard<'w> {
    writer: &'w mut BinaryWriter,
    saved: usize,
}

impl OffsetGuard<'_> {
    /// The cursor position that will be restored on drop.
    pub fn saved_offset(&self) -> usize {
        self.saved
    }
}

impl Deref for OffsetGuard<'_> {
    type Target = BinaryWriter;

    fn deref(&self) -> &BinaryWriter {
        self.writer
    }
}

impl DerefMut for OffsetGuard<'_> {
    fn deref_mut(&mut self) -> &mut BinaryWriter {
        self.writer
    }
}

impl Drop for OffsetGuard<'_> {
    fn drop(&mut self) {
        self.writer.offset = self.saved;
    }
}

/// Error type for some `write_*` functions of `BinaryWriter`.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum BinaryWriterError {
    /// Indicates that a value cannot be encoded, for example an offset that does not fit in the
    /// requested integer type.
    #[error("The data cannot be encoded")]
    CannotEncode,
}
