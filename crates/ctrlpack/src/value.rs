//! Typed control values and ranges.

use std::fmt;

/// Data type of a control value.
///
/// The set is closed; each type has a fixed wire width. The numeric
/// discriminants are part of the wire format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum ControlType {
    /// Invalid or absent value.
    #[default]
    None = 0,
    /// Boolean, 1 byte on the wire.
    Bool = 1,
    /// Signed 32-bit integer.
    Int32 = 2,
    /// Signed 64-bit integer.
    Int64 = 3,
}

impl ControlType {
    /// Maps a raw wire discriminant back to a type.
    ///
    /// Returns `None` for discriminants outside the closed set; the caller
    /// decides how to surface the anomaly.
    pub fn from_wire(raw: u32) -> Option<ControlType> {
        match raw {
            0 => Some(ControlType::None),
            1 => Some(ControlType::Bool),
            2 => Some(ControlType::Int32),
            3 => Some(ControlType::Int64),
            _ => None,
        }
    }

    /// Wire width in bytes of one value of this type.
    ///
    /// `None` is charged one placeholder byte so that every type has a
    /// defined width.
    pub fn binary_size(self) -> usize {
        match self {
            ControlType::None => 1,
            ControlType::Bool => 1,
            ControlType::Int32 => 4,
            ControlType::Int64 => 8,
        }
    }
}

/// One typed control value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlValue {
    /// Absent value.
    #[default]
    None,
    Bool(bool),
    Int32(i32),
    Int64(i64),
}

impl ControlValue {
    /// Returns the type of the stored value.
    pub fn control_type(&self) -> ControlType {
        match self {
            ControlValue::None => ControlType::None,
            ControlValue::Bool(_) => ControlType::Bool,
            ControlValue::Int32(_) => ControlType::Int32,
            ControlValue::Int64(_) => ControlType::Int64,
        }
    }

    /// Wire width in bytes of this value.
    pub fn binary_size(&self) -> usize {
        self.control_type().binary_size()
    }

    /// Returns the boolean payload, if the value holds one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ControlValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the 32-bit integer payload, if the value holds one.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ControlValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the 64-bit integer payload, if the value holds one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ControlValue::Int64(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for ControlValue {
    fn from(v: bool) -> Self {
        ControlValue::Bool(v)
    }
}

impl From<i32> for ControlValue {
    fn from(v: i32) -> Self {
        ControlValue::Int32(v)
    }
}

impl From<i64> for ControlValue {
    fn from(v: i64) -> Self {
        ControlValue::Int64(v)
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlValue::None => write!(f, "<none>"),
            ControlValue::Bool(v) => write!(f, "{v}"),
            ControlValue::Int32(v) => write!(f, "{v}"),
            ControlValue::Int64(v) => write!(f, "{v}"),
        }
    }
}

/// Legal bounds of a control: an inclusive `(min, max)` pair.
///
/// Both bounds carry the same type; the type is taken from the owning
/// metadata entry when a range crosses the wire, never re-read per bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlRange {
    min: ControlValue,
    max: ControlValue,
}

impl ControlRange {
    pub fn new(min: ControlValue, max: ControlValue) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> &ControlValue {
        &self.min
    }

    pub fn max(&self) -> &ControlValue {
        &self.max
    }

    /// Wire width in bytes of this range (min then max, no padding).
    pub fn binary_size(&self) -> usize {
        self.min.binary_size() + self.max.binary_size()
    }
}

impl fmt::Display for ControlRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_wire_mapping() {
        for ty in [
            ControlType::None,
            ControlType::Bool,
            ControlType::Int32,
            ControlType::Int64,
        ] {
            assert_eq!(ControlType::from_wire(ty as u32), Some(ty));
        }
        assert_eq!(ControlType::from_wire(4), None);
        assert_eq!(ControlType::from_wire(u32::MAX), None);
    }

    #[test]
    fn test_binary_sizes() {
        assert_eq!(ControlValue::None.binary_size(), 1);
        assert_eq!(ControlValue::Bool(true).binary_size(), 1);
        assert_eq!(ControlValue::Int32(-5).binary_size(), 4);
        assert_eq!(ControlValue::Int64(9).binary_size(), 8);
        let range = ControlRange::new(0i32.into(), 100i32.into());
        assert_eq!(range.binary_size(), 8);
    }

    #[test]
    fn test_typed_getters() {
        let value = ControlValue::from(42i32);
        assert_eq!(value.control_type(), ControlType::Int32);
        assert_eq!(value.as_i32(), Some(42));
        assert_eq!(value.as_bool(), None);
        assert_eq!(value.as_i64(), None);
    }
}
