//! Fixed-capacity byte cursor buffers for ctrlpack.
//!
//! This crate provides the linear, capacity-bounded memory region abstraction
//! the control serializer reads from and writes to. Both cursors track a
//! running offset and an overflow flag instead of panicking or growing:
//! an access past the region's capacity raises the flag and becomes a no-op,
//! so a single check after a batch of accesses tells whether all of them fit.
//!
//! # Overview
//!
//! - [`Reader`] - reads little-endian scalars from a borrowed byte slice
//! - [`Writer`] - writes little-endian scalars into a borrowed mutable slice
//!
//! Both support [`Reader::carve_out`] / [`Writer::carve_out`], which splits
//! the remaining capacity into a disjoint sub-region with an independent
//! cursor. Carved regions never overlap each other or their parent.
//!
//! # Example
//!
//! ```
//! use ctrlpack_buffers::{Reader, Writer};
//!
//! let mut backing = [0u8; 8];
//! let mut writer = Writer::new(&mut backing);
//! writer.u32(0x0403_0201);
//! writer.u32(0x0807_0605);
//! assert!(!writer.overflow());
//!
//! let mut reader = Reader::new(&backing);
//! assert_eq!(reader.u32(), 0x0403_0201);
//! assert_eq!(reader.u32(), 0x0807_0605);
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;
