//! Serializer error type.

use thiserror::Error;

/// Failures reported by the control serializer.
///
/// Every failure is terminal for the single operation that raised it and
/// leaves the serializer's caches untouched; callers decide whether to retry
/// the higher-level exchange.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SerializerError {
    /// The output or input buffer is too small for the packet.
    #[error("not enough space in buffer")]
    InsufficientSpace,
    /// The list references a metadata map this serializer has never seen.
    #[error("unknown control info map")]
    UnknownInfoMap,
    /// The packet header carries an unsupported format version.
    #[error("unsupported controls format version {0}")]
    VersionMismatch(u32),
    /// An entry's recorded payload offset disagrees with the running offset,
    /// indicating truncated or reordered data.
    #[error("entry {index} offset mismatch: recorded {recorded}, expected {expected}")]
    OffsetMismatch {
        index: u32,
        recorded: u32,
        expected: u32,
    },
}
