//! Probe sequence generation.
//!
//! Every key maps to a fixed, finite sequence of slot indices. The sequence
//! starts at the first slot of the key's segment and walks triangular offsets
//! (`0, 1, 3, 6, 10, ...`) for `segment_size` steps. If that local phase runs
//! out, a second phase starts just past the segment and walks triangular
//! offsets again for the remaining `capacity - segment_size` steps. Insert,
//! lookup and removal all consume the same sequence, which is what keeps
//! tombstoned chains valid.
//!
//! Triangular offsets taken modulo a non power-of-two capacity can repeat
//! before every slot is visited. When the capacity is a power of two the
//! global phase visits `capacity - segment_size` distinct slots.

use crate::error::TableError;

/// Folds a 64-bit hash into the 32 bits consumed by the table.
#[inline(always)]
pub fn fold_hash(hash: u64) -> u32 {
    (hash ^ (hash >> 32)) as u32
}

/// Validated table geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    capacity: usize,
    segment_size: usize,
}

impl Geometry {
    /// Validates `capacity >= segment_size > 0`.
    pub fn new(capacity: usize, segment_size: usize) -> Result<Self, TableError> {
        if segment_size == 0 || capacity < segment_size {
            return Err(TableError::InvalidGeometry {
                capacity,
                segment_size,
            });
        }

        Ok(Self {
            capacity,
            segment_size,
        })
    }

    /// Total number of slots.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots in a segment.
    #[inline(always)]
    pub fn segment_size(&self) -> usize {
        self.segment_size
    }

    /// The slot a hash maps to before any probing.
    #[inline(always)]
    pub fn home(&self, hash: u32) -> usize {
        hash as usize % self.capacity
    }

    /// First slot of the segment containing the hash's home slot.
    #[inline(always)]
    pub fn segment_start(&self, hash: u32) -> usize {
        (self.home(hash) / self.segment_size) * self.segment_size
    }

    /// Starts the probe sequence for `hash`.
    #[inline]
    pub fn probe(&self, hash: u32) -> ProbeSeq {
        ProbeSeq {
            capacity: self.capacity,
            segment_size: self.segment_size,
            base: self.segment_start(hash),
            offset: 0,
            step: 0,
            position: 0,
        }
    }
}

/// Iterator over the slot indices a key may occupy, in probe order.
///
/// Yields exactly `capacity` indices. The first `segment_size` of them belong
/// to the key's segment; the rest are the global spill.
#[derive(Debug, Clone)]
pub struct ProbeSeq {
    capacity: usize,
    segment_size: usize,
    // Start of the current phase.
    base: usize,
    // triangular(step) mod capacity.
    offset: usize,
    step: usize,
    position: usize,
}

impl ProbeSeq {
    /// Number of indices yielded so far.
    #[inline(always)]
    pub fn steps(&self) -> usize {
        self.position
    }

    /// Returns `true` once the sequence has left the segment-local phase.
    #[inline(always)]
    pub fn spilled(&self) -> bool {
        self.position > self.segment_size
    }

    #[inline(always)]
    fn wrap(&self, value: usize) -> usize {
        // Both operands are below `capacity`, so one subtraction is enough.
        if value >= self.capacity {
            value - self.capacity
        } else {
            value
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.position == self.capacity {
            return None;
        }

        if self.position == self.segment_size {
            self.base = self.wrap(self.base + self.segment_size);
            self.offset = 0;
            self.step = 0;
        }

        let index = self.wrap(self.base + self.offset);
        self.position += 1;
        self.step += 1;
        self.offset = self.wrap(self.offset + self.step % self.capacity);

        Some(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.capacity - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

impl core::iter::FusedIterator for ProbeSeq {}
