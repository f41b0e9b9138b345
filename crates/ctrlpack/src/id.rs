//! Control identity.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ControlType;

/// Stable identity of one control: numeric id, display name, and value type.
///
/// Identities are immutable once created. Metadata maps and id catalogs share
/// them through [`Arc`]; an identity reconstructed from the wire carries an
/// empty name, since the name is not part of the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlId {
    id: u32,
    name: String,
    control_type: ControlType,
}

impl ControlId {
    pub fn new(id: u32, name: impl Into<String>, control_type: ControlType) -> Self {
        Self {
            id,
            name: name.into(),
            control_type,
        }
    }

    /// The numeric id of the control.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The display name of the control; empty when reconstructed from the wire.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type of the control's values.
    pub fn control_type(&self) -> ControlType {
        self.control_type
    }
}

/// Lookup table from numeric control id to its shared identity.
pub type ControlIdMap = HashMap<u32, Arc<ControlId>>;
