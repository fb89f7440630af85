/// Segment size used when only a capacity is given.
pub const DEFAULT_SEGMENT_SIZE: usize = 32;

/// Capacity used by [`TableConfig::default`].
pub const DEFAULT_CAPACITY: usize = 1024;

/// Construction parameters for a table.
///
/// Both values are fixed for the lifetime of the table. They are validated
/// when the table is built, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Total number of slots.
    pub capacity: usize,
    /// Number of slots probed locally before spilling into the whole table.
    pub segment_size: usize,
}

impl TableConfig {
    /// Creates a configuration for `capacity` slots using the default segment
    /// size, clamped to the capacity for very small tables.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            segment_size: DEFAULT_SEGMENT_SIZE.min(capacity),
        }
    }

    /// Replaces the segment size.
    pub fn segment_size(mut self, segment_size: usize) -> Self {
        self.segment_size = segment_size;
        self
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_capacity_clamps_segment() {
        let config = TableConfig::new(8);
        assert_eq!(config.segment_size, 8);

        let config = TableConfig::new(0);
        assert_eq!(config.segment_size, 0);
    }

    #[test]
    fn default_geometry() {
        let config = TableConfig::default();
        assert_eq!(config.capacity, 1024);
        assert_eq!(config.segment_size, 32);
        assert_eq!(config.segment_size(16).segment_size, 16);
    }
}
