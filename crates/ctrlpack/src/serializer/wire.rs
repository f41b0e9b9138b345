//! Fixed-layout wire records for the control exchange format.
//!
//! All fields are little-endian `u32`. Offsets stored in entry records are
//! relative to the start of the packet's value-data region, not to the
//! packet itself.

use ctrlpack_buffers::{Reader, Writer};

/// Version constant written into every packet header.
///
/// Decoders verify equality before interpreting anything else.
pub const CONTROLS_FORMAT_VERSION: u32 = 1;

/// Packet header, common to metadata-map and value-list packets.
///
/// `size` is the total encoded length including the header; `data_offset` is
/// the byte offset from the start of the header to the value-data region,
/// i.e. `Header::SIZE + entries * entry record size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    pub handle: u32,
    pub entries: u32,
    pub size: u32,
    pub data_offset: u32,
}

impl Header {
    /// Encoded size in bytes.
    pub const SIZE: usize = 20;

    pub fn write(&self, buffer: &mut Writer<'_>) {
        buffer.u32(self.version);
        buffer.u32(self.handle);
        buffer.u32(self.entries);
        buffer.u32(self.size);
        buffer.u32(self.data_offset);
    }

    pub fn read(buffer: &mut Reader<'_>) -> Self {
        Self {
            version: buffer.u32(),
            handle: buffer.u32(),
            entries: buffer.u32(),
            size: buffer.u32(),
            data_offset: buffer.u32(),
        }
    }
}

/// Per-control record of a metadata-map packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeEntry {
    pub id: u32,
    pub kind: u32,
    pub offset: u32,
}

impl RangeEntry {
    pub const SIZE: usize = 12;

    pub fn write(&self, buffer: &mut Writer<'_>) {
        buffer.u32(self.id);
        buffer.u32(self.kind);
        buffer.u32(self.offset);
    }

    pub fn read(buffer: &mut Reader<'_>) -> Self {
        Self {
            id: buffer.u32(),
            kind: buffer.u32(),
            offset: buffer.u32(),
        }
    }
}

/// Per-control record of a value-list packet.
///
/// `count` is always 1 in the current format; it reserves room for array
/// payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueEntry {
    pub id: u32,
    pub count: u32,
    pub kind: u32,
    pub offset: u32,
}

impl ValueEntry {
    pub const SIZE: usize = 16;

    pub fn write(&self, buffer: &mut Writer<'_>) {
        buffer.u32(self.id);
        buffer.u32(self.count);
        buffer.u32(self.kind);
        buffer.u32(self.offset);
    }

    pub fn read(buffer: &mut Reader<'_>) -> Self {
        Self {
            id: buffer.u32(),
            count: buffer.u32(),
            kind: buffer.u32(),
            offset: buffer.u32(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let hdr = Header {
            version: CONTROLS_FORMAT_VERSION,
            handle: 2,
            entries: 3,
            size: 60,
            data_offset: 44,
        };
        let mut backing = [0u8; Header::SIZE];
        let mut writer = Writer::new(&mut backing);
        hdr.write(&mut writer);
        assert_eq!(writer.offset(), Header::SIZE);
        assert!(!writer.overflow());
        assert_eq!(&backing[0..4], &[1, 0, 0, 0]);
        assert_eq!(&backing[4..8], &[2, 0, 0, 0]);

        let mut reader = Reader::new(&backing);
        assert_eq!(Header::read(&mut reader), hdr);
    }

    #[test]
    fn test_entry_record_sizes() {
        let mut backing = [0u8; RangeEntry::SIZE + ValueEntry::SIZE];
        let mut writer = Writer::new(&mut backing);
        RangeEntry {
            id: 1,
            kind: 2,
            offset: 0,
        }
        .write(&mut writer);
        assert_eq!(writer.offset(), RangeEntry::SIZE);
        ValueEntry {
            id: 1,
            count: 1,
            kind: 2,
            offset: 4,
        }
        .write(&mut writer);
        assert_eq!(writer.offset(), RangeEntry::SIZE + ValueEntry::SIZE);
        assert!(!writer.overflow());
    }
}
