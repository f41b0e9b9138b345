//! Read cursor over a borrowed byte slice.

/// A read cursor over a fixed byte region.
///
/// Reads advance a running offset. A read that would pass the end of the
/// region sets the overflow flag and returns zero instead; the flag is
/// sticky, so callers may issue a sequence of reads and check once.
///
/// # Example
///
/// ```
/// use ctrlpack_buffers::Reader;
///
/// let data = [0x01, 0x00, 0x00, 0x00];
/// let mut reader = Reader::new(&data);
/// assert_eq!(reader.u32(), 1);
/// assert_eq!(reader.offset(), 4);
/// ```
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    overflow: bool,
}

impl<'a> Reader<'a> {
    /// Creates a reader over the whole slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            overflow: false,
        }
    }

    /// Returns the running offset (bytes consumed from this region).
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Returns the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true once any read or carve-out has exceeded the region.
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Advances the cursor without reading.
    pub fn skip(&mut self, n: usize) {
        if self.overflow || n > self.remaining() {
            self.overflow = true;
        } else {
            self.pos += n;
        }
    }

    /// Splits off the next `size` bytes as an independent sub-reader.
    ///
    /// The parent cursor advances past the carved region, so successive
    /// carve-outs yield disjoint regions. If fewer than `size` bytes remain,
    /// the overflow flag is set and an empty sub-reader is returned.
    pub fn carve_out(&mut self, size: usize) -> Reader<'a> {
        if self.overflow || size > self.remaining() {
            self.overflow = true;
            return Reader::new(&[]);
        }
        let carved = &self.data[self.pos..self.pos + size];
        self.pos += size;
        Reader::new(carved)
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        if self.overflow || N > self.remaining() {
            self.overflow = true;
            return [0; N];
        }
        let mut bytes = [0; N];
        bytes.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        bytes
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    /// Reads a boolean (1 byte, non-zero = true).
    #[inline]
    pub fn bool(&mut self) -> bool {
        self.u8() != 0
    }

    /// Reads an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take::<4>())
    }

    /// Reads a signed 32-bit integer (little-endian).
    #[inline]
    pub fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take::<4>())
    }

    /// Reads an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64(&mut self) -> u64 {
        u64::from_le_bytes(self.take::<8>())
    }

    /// Reads a signed 64-bit integer (little-endian).
    #[inline]
    pub fn i64(&mut self) -> i64 {
        i64::from_le_bytes(self.take::<8>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        let data = [
            0x2a, 0x01, 0x78, 0x56, 0x34, 0x12, 0xff, 0xff, 0xff, 0xff,
        ];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8(), 0x2a);
        assert!(reader.bool());
        assert_eq!(reader.u32(), 0x1234_5678);
        assert_eq!(reader.i32(), -1);
        assert_eq!(reader.offset(), 10);
        assert!(!reader.overflow());
    }

    #[test]
    fn test_i64() {
        let data = (-2i64).to_le_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.i64(), -2);
    }

    #[test]
    fn test_overflow_rejects_all_later_reads() {
        let data = [0x01, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u32(), 0);
        assert!(reader.overflow());
        // The region would still hold a byte, but the cursor is poisoned.
        assert_eq!(reader.u8(), 0);
        assert!(reader.overflow());
    }

    #[test]
    fn test_carve_out_disjoint() {
        let data = [1, 2, 3, 4, 5];
        let mut reader = Reader::new(&data);
        let mut head = reader.carve_out(2);
        let mut tail = reader.carve_out(3);
        assert_eq!(head.u8(), 1);
        assert_eq!(head.u8(), 2);
        assert_eq!(tail.u8(), 3);
        assert_eq!(head.offset(), 2);
        assert_eq!(tail.offset(), 1);
    }

    #[test]
    fn test_carve_out_too_large() {
        let data = [1, 2, 3];
        let mut reader = Reader::new(&data);
        let sub = reader.carve_out(4);
        assert!(reader.overflow());
        assert_eq!(sub.remaining(), 0);
    }

    #[test]
    fn test_skip() {
        let data = [1, 2, 3, 4];
        let mut reader = Reader::new(&data);
        reader.skip(3);
        assert_eq!(reader.u8(), 4);
        reader.skip(1);
        assert!(reader.overflow());
    }
}
