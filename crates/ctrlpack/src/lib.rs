//! Control metadata and value serialization for cross-process exchange.
//!
//! `ctrlpack` moves typed, named parameters ("controls") between two
//! cooperating address spaces over a shared, size-bounded memory region:
//! a coordinator serializes the set of controls a component supports
//! (a [`ControlInfoMap`]) and batches of concrete values
//! ([`ControlList`]s) into a flat buffer, and the peer reconstructs them.
//!
//! The two entity kinds are serialized independently: a list packet does not
//! embed its map, it references it through a small integer handle. The
//! stateful [`ControlSerializer`] assigns handles, caches exchanged maps on
//! both ends, and validates handle references, truncation, and entry offset
//! continuity when decoding.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ctrlpack::{
//!     ControlId, ControlInfoMap, ControlList, ControlRange, ControlSerializer,
//!     ControlType,
//! };
//! use ctrlpack_buffers::{Reader, Writer};
//!
//! let map = ControlInfoMap::new(vec![(
//!     Arc::new(ControlId::new(1, "Enable", ControlType::Bool)),
//!     ControlRange::new(false.into(), true.into()),
//! )]);
//! let mut list = ControlList::with_info_map(map.clone());
//! list.set(1, true);
//!
//! let mut serializer = ControlSerializer::new();
//! let mut backing = vec![0u8; 128];
//! let mut writer = Writer::new(&mut backing);
//! serializer.serialize_info_map(&map, &mut writer).unwrap();
//! serializer.serialize_list(&list, &mut writer).unwrap();
//!
//! // The peer decodes with its own serializer, map first.
//! let mut peer = ControlSerializer::new();
//! let mut reader = Reader::new(&backing);
//! let decoded_map = peer.deserialize_info_map(&mut reader).unwrap();
//! let decoded_list = peer.deserialize_list(&mut reader).unwrap();
//! assert_eq!(decoded_map, map);
//! assert_eq!(decoded_list.get(1), Some(&true.into()));
//! ```

pub mod catalog;
mod id;
mod info_map;
mod list;
pub mod serializer;
mod value;

pub use id::{ControlId, ControlIdMap};
pub use info_map::ControlInfoMap;
pub use list::ControlList;
pub use serializer::{ControlSerializer, SerializerError};
pub use value::{ControlRange, ControlType, ControlValue};
