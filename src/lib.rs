//! Cursor-based binary readers and writers with a runtime byte order.
//!
//! [`BinaryReader`] reads typed values from a borrowed slice. [`BinaryWriter`] writes typed
//! values into a growable buffer at a movable cursor, and can go back to patch values that are
//! only known after later data has been written (see [`BinaryWriter::run_at`] and
//! [`BinaryWriter::write_current_offset_at`]).
//!
//! Both carry an [`Endian`] that can be changed at any time and applies to subsequent reads or
//! writes of multi-byte values. Values are converted with explicit per-type byte packing
//! ([`Scalar`]), never by reinterpreting memory.
//!
//! ```
//! use endian_binary_io::{BinaryWriter, Endian};
//!
//! let mut w = BinaryWriter::new(Endian::Big);
//! w.write(0u32); // offset of the name, patched below
//! w.write(0u32); // total size, patched below
//! w.write_current_offset_at::<u32>(0, 0).unwrap();
//! w.write_cstr("payload");
//! w.write_current_offset_at::<u32>(4, 0).unwrap();
//!
//! let mut r = w.reader();
//! assert_eq!(r.read::<u32>(), Some(8));
//! assert_eq!(r.read::<u32>(), Some(16));
//! assert_eq!(r.read_str(8, None), Ok("payload"));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod align;
mod endian;
mod reader;
mod scalar;
mod u24;
mod writer;


pub use align::{align_up, is_aligned};
pub use endian::Endian;
pub use reader::{BinaryReader, ReaderError};
pub use scalar::Scalar;
pub use u24::{decode_u24, encode_u24, U24Be, U24Le, U24OverflowError, U24_MAX};
pub use writer::{BinaryWriter, BinaryWriterError, OffsetGuard};
