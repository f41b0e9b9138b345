//! Control (de)serializer.
//!
//! Neither [`ControlInfoMap`] nor [`ControlList`] is a self-contained data
//! container: a map entry references a shared [`ControlId`], and a list
//! references a map for validation. Moving them between address spaces
//! therefore needs a context that maintains those associations on both ends;
//! the [`ControlSerializer`] is that context.
//!
//! Metadata maps serialize on their own. At deserialization time the
//! serializer recreates the `ControlId` instances (names are not carried on
//! the wire) and keeps them in an internal store from which the map is
//! populated.
//!
//! Value lists serialize with a numeric handle standing in for their map.
//! The serializer assigns the handle when a map is serialized, and records
//! the handle association when a map is serialized or deserialized, so a
//! later list exchange can resolve the handle back to the map on either end.
//! This makes ordering a caller obligation: a map must pass through a given
//! serializer before any list that references it, in both directions.
//! Violations surface as [`SerializerError::UnknownInfoMap`], never as
//! silently misbound data.

mod error;
pub mod wire;

pub use error::SerializerError;

use std::collections::HashMap;
use std::sync::Arc;

use ctrlpack_buffers::{Reader, Writer};
use tracing::{debug, error};

use crate::{ControlId, ControlInfoMap, ControlList, ControlRange, ControlType, ControlValue};
use wire::{Header, RangeEntry, ValueEntry, CONTROLS_FORMAT_VERSION};

fn store_value(value: &ControlValue, buffer: &mut Writer<'_>) {
    match value {
        // One placeholder byte keeps the offset ledger aligned with
        // binary_size().
        ControlValue::None => buffer.u8(0),
        ControlValue::Bool(v) => buffer.bool(*v),
        ControlValue::Int32(v) => buffer.i32(*v),
        // Two's-complement through the unsigned lane; bit-exact for
        // negative values.
        ControlValue::Int64(v) => buffer.u64(*v as u64),
    }
}

fn store_range(range: &ControlRange, buffer: &mut Writer<'_>) {
    store_value(range.min(), buffer);
    store_value(range.max(), buffer);
}

/// Decodes one value of the given wire type.
///
/// `None` here means the wire carried a discriminant outside the closed set;
/// nothing is consumed and a default value is returned, so the anomaly
/// surfaces as an offset mismatch on the next entry rather than as garbage.
fn load_value(control_type: Option<ControlType>, buffer: &mut Reader<'_>) -> ControlValue {
    match control_type {
        Some(ControlType::None) => {
            // Placeholder byte, no payload.
            buffer.skip(1);
            ControlValue::None
        }
        Some(ControlType::Bool) => ControlValue::Bool(buffer.bool()),
        Some(ControlType::Int32) => ControlValue::Int32(buffer.i32()),
        Some(ControlType::Int64) => ControlValue::Int64(buffer.u64() as i64),
        None => ControlValue::None,
    }
}

fn load_range(control_type: Option<ControlType>, buffer: &mut Reader<'_>) -> ControlRange {
    let min = load_value(control_type, buffer);
    let max = load_value(control_type, buffer);
    ControlRange::new(min, max)
}

/// Stateful serializer for control metadata maps and value lists.
///
/// One instance per communication endpoint, driven sequentially by whatever
/// owns that endpoint's protocol sequencing; there is no internal
/// synchronization. State grows as maps are exchanged and is released only
/// by [`reset`](ControlSerializer::reset).
#[derive(Debug, Default)]
pub struct ControlSerializer {
    serial: u32,
    /// Map instance -> handle, for resolving list bindings at encode time.
    info_map_handles: HashMap<usize, u32>,
    /// Handle -> map, for resolving list bindings at decode time. Kept in
    /// step with `info_map_handles` on every registration.
    info_maps: HashMap<u32, ControlInfoMap>,
    /// Identities recreated by map deserialization, kept alive here so the
    /// cached maps can share them.
    control_ids: Vec<Arc<ControlId>>,
}

impl ControlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all internal state.
    ///
    /// Handles assigned before the reset are forgotten on this endpoint:
    /// decoding a value list that references one fails with
    /// [`SerializerError::UnknownInfoMap`] until its map is exchanged again.
    /// Maps and identities already handed out remain usable by their
    /// holders; they are simply no longer resolvable here.
    pub fn reset(&mut self) {
        self.serial = 0;
        self.info_map_handles.clear();
        self.info_maps.clear();
        self.control_ids.clear();
    }

    /// Exact encoded size of `info` in bytes.
    ///
    /// Callers pre-size buffers from this; it is kept bit-for-bit consistent
    /// with [`serialize_info_map`](ControlSerializer::serialize_info_map).
    pub fn binary_size_info_map(info: &ControlInfoMap) -> usize {
        Header::SIZE
            + info.len() * RangeEntry::SIZE
            + info
                .iter()
                .map(|(_, range)| range.binary_size())
                .sum::<usize>()
    }

    /// Exact encoded size of `list` in bytes.
    pub fn binary_size_list(list: &ControlList) -> usize {
        Header::SIZE
            + list.len() * ValueEntry::SIZE
            + list
                .iter()
                .map(|(_, value)| value.binary_size())
                .sum::<usize>()
    }

    fn register_info_map(&mut self, info: ControlInfoMap, handle: u32) {
        // A map registered again gets a fresh handle; only the latest handle
        // resolves afterwards.
        if let Some(old) = self.info_map_handles.insert(info.instance_key(), handle) {
            if old != handle {
                self.info_maps.remove(&old);
            }
        }
        self.info_maps.insert(handle, info);
    }

    /// Serializes a metadata map into `buffer`, assigning it a fresh handle.
    ///
    /// The handle is embedded in the packet header and recorded internally
    /// so later value lists bound to `info` can reference it. On failure
    /// nothing is recorded.
    pub fn serialize_info_map(
        &mut self,
        info: &ControlInfoMap,
        buffer: &mut Writer<'_>,
    ) -> Result<(), SerializerError> {
        let entries_size = info.len() * RangeEntry::SIZE;
        let values_size: usize = info.iter().map(|(_, range)| range.binary_size()).sum();

        // Committed only once the packet is known to fit. Handle 0 is
        // reserved for unbound lists, so a wrapped serial skips it.
        let handle = self.serial.wrapping_add(1).max(1);

        let hdr = Header {
            version: CONTROLS_FORMAT_VERSION,
            handle,
            entries: info.len() as u32,
            size: (Header::SIZE + entries_size + values_size) as u32,
            data_offset: (Header::SIZE + entries_size) as u32,
        };
        hdr.write(buffer);

        let mut entries = buffer.carve_out(entries_size);
        let mut values = buffer.carve_out(values_size);

        for (id, range) in info.iter() {
            RangeEntry {
                id: id.id(),
                kind: id.control_type() as u32,
                offset: values.offset() as u32,
            }
            .write(&mut entries);
            store_range(range, &mut values);
        }

        if buffer.overflow() || entries.overflow() || values.overflow() {
            error!("cannot serialize ControlInfoMap: not enough space in buffer");
            return Err(SerializerError::InsufficientSpace);
        }

        self.serial = handle;
        self.register_info_map(info.clone(), handle);
        debug!(handle, entries = info.len(), "serialized ControlInfoMap");
        Ok(())
    }

    /// Serializes a value list into `buffer`.
    ///
    /// A list bound to a metadata map resolves the map to the handle it was
    /// assigned when it passed through this serializer; a map that never did
    /// is a referential-integrity failure. An unbound list is written with
    /// handle 0 and the peer binds it to the global catalog.
    pub fn serialize_list(
        &mut self,
        list: &ControlList,
        buffer: &mut Writer<'_>,
    ) -> Result<(), SerializerError> {
        let info_map_handle = match list.info_map() {
            Some(map) => match self.info_map_handles.get(&map.instance_key()) {
                Some(&handle) => handle,
                None => {
                    error!("cannot serialize ControlList: unknown ControlInfoMap");
                    return Err(SerializerError::UnknownInfoMap);
                }
            },
            None => 0,
        };

        let entries_size = list.len() * ValueEntry::SIZE;
        let values_size: usize = list.iter().map(|(_, value)| value.binary_size()).sum();

        let hdr = Header {
            version: CONTROLS_FORMAT_VERSION,
            handle: info_map_handle,
            entries: list.len() as u32,
            size: (Header::SIZE + entries_size + values_size) as u32,
            data_offset: (Header::SIZE + entries_size) as u32,
        };
        hdr.write(buffer);

        let mut entries = buffer.carve_out(entries_size);
        let mut values = buffer.carve_out(values_size);

        for (&id, value) in list {
            ValueEntry {
                id,
                count: 1,
                kind: value.control_type() as u32,
                offset: values.offset() as u32,
            }
            .write(&mut entries);
            store_value(value, &mut values);
        }

        if buffer.overflow() || entries.overflow() || values.overflow() {
            error!("cannot serialize ControlList: not enough space in buffer");
            return Err(SerializerError::InsufficientSpace);
        }

        Ok(())
    }

    fn read_header(buffer: &mut Reader<'_>) -> Result<Header, SerializerError> {
        let hdr = Header::read(buffer);
        if buffer.overflow() {
            error!("serialized packet too small");
            return Err(SerializerError::InsufficientSpace);
        }
        if hdr.version != CONTROLS_FORMAT_VERSION {
            error!(version = hdr.version, "unsupported controls format version");
            return Err(SerializerError::VersionMismatch(hdr.version));
        }
        Ok(hdr)
    }

    /// Deserializes a metadata map from `buffer` and caches it under the
    /// handle recorded in the packet header.
    ///
    /// The returned map shares the cached instance, so value lists decoded
    /// afterwards resolve to the very same map. Control identities are
    /// recreated with empty names. Any failure discards all partial results
    /// and leaves the caches untouched.
    pub fn deserialize_info_map(
        &mut self,
        buffer: &mut Reader<'_>,
    ) -> Result<ControlInfoMap, SerializerError> {
        let hdr = Self::read_header(buffer)?;

        let entries_size = (hdr.data_offset as usize).saturating_sub(Header::SIZE);
        let values_size = (hdr.size as usize).saturating_sub(hdr.data_offset as usize);
        // The declared entry count must account for the entries region
        // exactly; otherwise it cannot be trusted to bound the loop below.
        if hdr.entries as u64 * RangeEntry::SIZE as u64 != entries_size as u64 {
            error!(
                entries = hdr.entries,
                "entry count does not match entries region size"
            );
            return Err(SerializerError::InsufficientSpace);
        }
        let mut entries = buffer.carve_out(entries_size);
        let mut values = buffer.carve_out(values_size);
        if buffer.overflow() {
            error!("serialized packet too small");
            return Err(SerializerError::InsufficientSpace);
        }

        let mut map_entries = Vec::with_capacity(hdr.entries as usize);
        for i in 0..hdr.entries {
            let entry = RangeEntry::read(&mut entries);

            if entry.offset as usize != values.offset() {
                error!(entry = i, "bad data, entry offset mismatch");
                return Err(SerializerError::OffsetMismatch {
                    index: i,
                    recorded: entry.offset,
                    expected: values.offset() as u32,
                });
            }

            let control_type = ControlType::from_wire(entry.kind);
            let id = Arc::new(ControlId::new(
                entry.id,
                "",
                control_type.unwrap_or_default(),
            ));
            let range = load_range(control_type, &mut values);
            map_entries.push((id, range));
        }

        if entries.overflow() || values.overflow() {
            error!("serialized packet too small");
            return Err(SerializerError::InsufficientSpace);
        }

        self.control_ids
            .extend(map_entries.iter().map(|(id, _)| Arc::clone(id)));

        let map = ControlInfoMap::new(map_entries);
        self.register_info_map(map.clone(), hdr.handle);
        debug!(
            handle = hdr.handle,
            entries = map.len(),
            "deserialized ControlInfoMap"
        );
        Ok(map)
    }

    /// Deserializes a value list from `buffer`.
    ///
    /// A non-zero header handle must resolve to a metadata map this
    /// serializer has already serialized or deserialized; a zero handle
    /// binds the list to the global catalog.
    pub fn deserialize_list(
        &mut self,
        buffer: &mut Reader<'_>,
    ) -> Result<ControlList, SerializerError> {
        let hdr = Self::read_header(buffer)?;

        let entries_size = (hdr.data_offset as usize).saturating_sub(Header::SIZE);
        let values_size = (hdr.size as usize).saturating_sub(hdr.data_offset as usize);
        if hdr.entries as u64 * ValueEntry::SIZE as u64 != entries_size as u64 {
            error!(
                entries = hdr.entries,
                "entry count does not match entries region size"
            );
            return Err(SerializerError::InsufficientSpace);
        }
        let mut entries = buffer.carve_out(entries_size);
        let mut values = buffer.carve_out(values_size);
        if buffer.overflow() {
            error!("serialized packet too small");
            return Err(SerializerError::InsufficientSpace);
        }

        let mut list = if hdr.handle != 0 {
            match self.info_maps.get(&hdr.handle) {
                Some(map) => ControlList::with_info_map(map.clone()),
                None => {
                    error!(
                        handle = hdr.handle,
                        "cannot deserialize ControlList: unknown ControlInfoMap"
                    );
                    return Err(SerializerError::UnknownInfoMap);
                }
            }
        } else {
            ControlList::new()
        };

        for i in 0..hdr.entries {
            let entry = ValueEntry::read(&mut entries);

            if entry.offset as usize != values.offset() {
                error!(entry = i, "bad data, entry offset mismatch");
                return Err(SerializerError::OffsetMismatch {
                    index: i,
                    recorded: entry.offset,
                    expected: values.offset() as u32,
                });
            }

            let control_type = ControlType::from_wire(entry.kind);
            list.set(entry.id, load_value(control_type, &mut values));
        }

        if entries.overflow() || values.overflow() {
            error!("serialized packet too small");
            return Err(SerializerError::InsufficientSpace);
        }

        Ok(list)
    }
}
