//! Value list: a batch of concrete control settings or readings.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::catalog;
use crate::{ControlIdMap, ControlInfoMap, ControlValue};

/// An ordered batch of `(control id, value)` pairs.
///
/// A list may be bound to a [`ControlInfoMap`] describing the controls it is
/// allowed to carry; an unbound list falls back to the process-wide catalog
/// of well-known controls. The binding travels across the wire as a handle,
/// so a bound list can only be serialized through a serializer that already
/// knows its map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlList {
    values: BTreeMap<u32, ControlValue>,
    info_map: Option<ControlInfoMap>,
}

impl ControlList {
    /// Creates an empty list bound to the global control catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list bound to `info_map`.
    pub fn with_info_map(info_map: ControlInfoMap) -> Self {
        Self {
            values: BTreeMap::new(),
            info_map: Some(info_map),
        }
    }

    /// The metadata map the list validates against, if bound to one.
    pub fn info_map(&self) -> Option<&ControlInfoMap> {
        self.info_map.as_ref()
    }

    /// The id catalog the list resolves identities against: the bound map's
    /// idmap, or the global catalog for an unbound list.
    pub fn idmap(&self) -> &ControlIdMap {
        match &self.info_map {
            Some(map) => map.idmap(),
            None => catalog::controls(),
        }
    }

    /// Sets the value of a control, replacing any previous value.
    pub fn set(&mut self, id: u32, value: impl Into<ControlValue>) {
        self.values.insert(id, value.into());
    }

    /// Returns the value of a control, if present.
    pub fn get(&self, id: u32) -> Option<&ControlValue> {
        self.values.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.values.contains_key(&id)
    }

    /// Number of values in the list.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(id, value)` pairs in ascending id order (the wire order).
    pub fn iter(&self) -> btree_map::Iter<'_, u32, ControlValue> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a ControlList {
    type Item = (&'a u32, &'a ControlValue);
    type IntoIter = btree_map::Iter<'a, u32, ControlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ControlId, ControlRange, ControlType};
    use std::sync::Arc;

    #[test]
    fn test_set_get_and_order() {
        let mut list = ControlList::new();
        list.set(9, 4i32);
        list.set(1, true);
        list.set(9, 5i32);

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(9), Some(&ControlValue::Int32(5)));
        assert!(list.contains(1));
        assert!(!list.contains(2));

        let ids: Vec<u32> = list.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 9]);
    }

    #[test]
    fn test_idmap_binding() {
        let map = ControlInfoMap::new(vec![(
            Arc::new(ControlId::new(4, "Mode", ControlType::Int32)),
            ControlRange::new(0i32.into(), 3i32.into()),
        )]);
        let bound = ControlList::with_info_map(map.clone());
        assert!(bound.idmap().contains_key(&4));
        assert_eq!(bound.info_map(), Some(&map));

        let unbound = ControlList::new();
        assert!(unbound.info_map().is_none());
        assert!(std::ptr::eq(unbound.idmap(), catalog::controls()));
    }
}
