//! Write cursor over a borrowed mutable byte slice.

use std::mem;

/// A write cursor over a fixed byte region.
///
/// The region never grows: a write that would pass the end sets the overflow
/// flag and writes nothing. The flag is sticky, so callers may issue a batch
/// of writes and check once before committing the result.
///
/// # Example
///
/// ```
/// use ctrlpack_buffers::Writer;
///
/// let mut backing = [0u8; 4];
/// let mut writer = Writer::new(&mut backing);
/// writer.u32(7);
/// assert!(!writer.overflow());
/// assert_eq!(backing, [7, 0, 0, 0]);
/// ```
pub struct Writer<'a> {
    data: &'a mut [u8],
    pos: usize,
    overflow: bool,
}

impl<'a> Writer<'a> {
    /// Creates a writer over the whole slice.
    pub fn new(data: &'a mut [u8]) -> Self {
        Self {
            data,
            pos: 0,
            overflow: false,
        }
    }

    /// Returns the running offset (bytes written into this region).
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Returns the number of writable bytes left.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true once any write or carve-out has exceeded the region.
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Splits off the next `size` bytes as an independent sub-writer.
    ///
    /// The parent cursor advances past the carved region, so successive
    /// carve-outs yield disjoint regions backed by non-overlapping memory.
    /// If fewer than `size` bytes remain, the overflow flag is set and an
    /// empty sub-writer is returned.
    ///
    /// The parent's running offset restarts at zero over the bytes that
    /// follow the carved region.
    pub fn carve_out(&mut self, size: usize) -> Writer<'a> {
        if self.overflow || size > self.remaining() {
            self.overflow = true;
            return Writer::new(&mut []);
        }
        let data = mem::take(&mut self.data);
        let (head, tail) = data.split_at_mut(self.pos + size);
        let (_, carved) = head.split_at_mut(self.pos);
        self.data = tail;
        self.pos = 0;
        Writer::new(carved)
    }

    fn put(&mut self, bytes: &[u8]) {
        if self.overflow || bytes.len() > self.remaining() {
            self.overflow = true;
            return;
        }
        self.data[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, v: u8) {
        self.put(&[v]);
    }

    /// Writes a boolean as 1 byte.
    #[inline]
    pub fn bool(&mut self, v: bool) {
        self.u8(v as u8);
    }

    /// Writes an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32(&mut self, v: u32) {
        self.put(&v.to_le_bytes());
    }

    /// Writes a signed 32-bit integer (little-endian).
    #[inline]
    pub fn i32(&mut self, v: i32) {
        self.put(&v.to_le_bytes());
    }

    /// Writes an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64(&mut self, v: u64) {
        self.put(&v.to_le_bytes());
    }

    /// Writes a signed 64-bit integer (little-endian).
    #[inline]
    pub fn i64(&mut self, v: i64) {
        self.put(&v.to_le_bytes());
    }
}
