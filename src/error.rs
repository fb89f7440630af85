use thiserror::Error;

/// Errors reported by table construction and insertion.
///
/// Lookups and removals never fail; a missing key is reported as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// The requested geometry is unusable: the segment size must be non-zero
    /// and no larger than the capacity.
    #[error("invalid table geometry: capacity {capacity}, segment size {segment_size}")]
    InvalidGeometry {
        /// Requested total slot count.
        capacity: usize,
        /// Requested slots per segment.
        segment_size: usize,
    },
    /// The table is at its load limit. The table has not been modified.
    #[error("table is full: {len} entries at a load limit of {load_limit}")]
    CapacityExceeded {
        /// Number of live entries at the time of the refusal.
        len: usize,
        /// Maximum number of live entries the table accepts.
        load_limit: usize,
    },
    /// An add-only insertion found the key already present. The table has not
    /// been modified.
    #[error("key is already present")]
    DuplicateKey,
}
