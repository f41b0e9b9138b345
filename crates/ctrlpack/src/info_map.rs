//! Metadata map: the set of controls a component supports and their bounds.

use std::sync::Arc;

use crate::{ControlId, ControlIdMap, ControlRange};

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<(Arc<ControlId>, ControlRange)>,
    idmap: ControlIdMap,
}

/// An ordered map from control identity to its legal value range.
///
/// The map is immutable after construction and cheap to clone: clones share
/// one allocation, and a clone is the *same* map for the purposes of the
/// serializer's handle bookkeeping. Entries keep their insertion order, which
/// is also the wire order.
#[derive(Debug, Clone, Default)]
pub struct ControlInfoMap {
    inner: Arc<Inner>,
}

impl ControlInfoMap {
    /// Builds a map from `(identity, range)` pairs, preserving their order.
    pub fn new(entries: Vec<(Arc<ControlId>, ControlRange)>) -> Self {
        let idmap = entries
            .iter()
            .map(|(id, _)| (id.id(), Arc::clone(id)))
            .collect();
        Self {
            inner: Arc::new(Inner { entries, idmap }),
        }
    }

    /// Number of controls in the map.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Iterates entries in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<ControlId>, &ControlRange)> {
        self.inner.entries.iter().map(|(id, range)| (id, range))
    }

    /// Looks up the range of a control by numeric id.
    pub fn get(&self, id: u32) -> Option<&ControlRange> {
        self.inner
            .entries
            .iter()
            .find(|(entry_id, _)| entry_id.id() == id)
            .map(|(_, range)| range)
    }

    /// The id-to-identity lookup table over this map's controls.
    pub fn idmap(&self) -> &ControlIdMap {
        &self.inner.idmap
    }

    /// Opaque identity of this map instance, shared by all clones.
    ///
    /// Two maps with equal content but separate allocations have distinct
    /// keys; the serializer's handle table is keyed on instances, not
    /// content.
    pub(crate) fn instance_key(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }
}

impl FromIterator<(Arc<ControlId>, ControlRange)> for ControlInfoMap {
    fn from_iter<I: IntoIterator<Item = (Arc<ControlId>, ControlRange)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl PartialEq for ControlInfoMap {
    /// Content equality over (id, type, range), in order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().zip(other.iter()).all(|((a_id, a_range), (b_id, b_range))| {
                a_id.id() == b_id.id()
                    && a_id.control_type() == b_id.control_type()
                    && a_range == b_range
            })
    }
}

impl Eq for ControlInfoMap {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ControlType, ControlValue};

    fn sample() -> ControlInfoMap {
        let enable = Arc::new(ControlId::new(1, "Enable", ControlType::Bool));
        let level = Arc::new(ControlId::new(2, "Level", ControlType::Int32));
        ControlInfoMap::new(vec![
            (
                enable,
                ControlRange::new(false.into(), true.into()),
            ),
            (
                level,
                ControlRange::new(0i32.into(), 100i32.into()),
            ),
        ])
    }

    #[test]
    fn test_order_and_lookup() {
        let map = sample();
        assert_eq!(map.len(), 2);
        let ids: Vec<u32> = map.iter().map(|(id, _)| id.id()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(
            map.get(2),
            Some(&ControlRange::new(0i32.into(), 100i32.into()))
        );
        assert_eq!(map.get(9), None);
        assert_eq!(map.idmap().len(), 2);
        assert_eq!(map.idmap()[&1].name(), "Enable");
    }

    #[test]
    fn test_clone_shares_identity() {
        let map = sample();
        let clone = map.clone();
        assert_eq!(map.instance_key(), clone.instance_key());

        let rebuilt = sample();
        assert_eq!(map, rebuilt);
        assert_ne!(map.instance_key(), rebuilt.instance_key());
    }

    #[test]
    fn test_content_equality_ignores_names() {
        let map = sample();
        let unnamed = ControlInfoMap::new(vec![
            (
                Arc::new(ControlId::new(1, "", ControlType::Bool)),
                ControlRange::new(false.into(), true.into()),
            ),
            (
                Arc::new(ControlId::new(2, "", ControlType::Int32)),
                ControlRange::new(ControlValue::Int32(0), ControlValue::Int32(100)),
            ),
        ]);
        assert_eq!(map, unnamed);
    }
}
