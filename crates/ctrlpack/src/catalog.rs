//! Process-wide catalog of well-known control ids.
//!
//! Value lists that carry no metadata-map handle resolve control identities
//! against this catalog instead. It is the shared vocabulary both endpoints
//! of an exchange agree on out of band.

use std::sync::{Arc, LazyLock};

use crate::{ControlId, ControlIdMap, ControlType};

/// Numeric ids of the well-known controls.
pub mod ids {
    pub const ENABLE: u32 = 1;
    pub const GAIN: u32 = 2;
    pub const EXPOSURE: u32 = 3;
    pub const FRAME_DURATION: u32 = 4;
}

static CONTROLS: LazyLock<ControlIdMap> = LazyLock::new(|| {
    [
        ControlId::new(ids::ENABLE, "Enable", ControlType::Bool),
        ControlId::new(ids::GAIN, "Gain", ControlType::Int32),
        ControlId::new(ids::EXPOSURE, "Exposure", ControlType::Int64),
        ControlId::new(ids::FRAME_DURATION, "FrameDuration", ControlType::Int64),
    ]
    .into_iter()
    .map(|id| (id.id(), Arc::new(id)))
    .collect()
});

/// The global id catalog used by unbound value lists.
pub fn controls() -> &'static ControlIdMap {
    &CONTROLS
}
