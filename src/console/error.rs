//! Console errors.

/// Errors returned by [`Console`](super::Console) operations.
///
/// Torn records are not errors: they mark the end of the surviving history
/// and are reported through [`StopReason`](super::StopReason) instead.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Ring capacity {capacity} is too small (need at least 2 bytes)")]
    CapacityTooSmall { capacity: usize },

    #[error("Unable to allocate {bytes} bytes for the console ring")]
    Allocation { bytes: usize },

    #[error("Record needs {needed} bytes but the ring only holds {capacity}")]
    RecordTooLarge { needed: usize, capacity: usize },

    #[error("Text contains a NUL byte at position {position}")]
    InteriorNul { position: usize },
}
