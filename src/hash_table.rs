//! The raw fixed-capacity table.
//!
//! [`HashTable`] stores values of type `V` in a flat slot array and leaves
//! hashing and key comparison to the caller: every operation takes a
//! precomputed 32-bit hash and an equality predicate. [`HashMap`] and
//! [`HashSet`] are built on top of it.
//!
//! [`HashMap`]: crate::HashMap
//! [`HashSet`]: crate::HashSet

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::mem;

use crate::config::TableConfig;
use crate::error::TableError;
use crate::probe::Geometry;

/// Largest number of live entries a table of `capacity` slots accepts.
#[inline(always)]
fn load_limit(capacity: usize) -> usize {
    ((capacity as u128 * 9) / 10) as usize
}

#[inline(always)]
fn hashtag(hash: u32) -> u8 {
    (hash >> 24) as u8
}

#[cold]
#[inline(never)]
fn probe_exhausted(hash: u32, populated: usize, capacity: usize) -> ! {
    log::error!(
        "no free slot for hash {hash:#010x} with {populated} of {capacity} slots occupied"
    );
    panic!(
        "probe sequence exhausted: no free slot for hash {hash:#010x} with {populated} of \
         {capacity} slots occupied"
    );
}

#[derive(Clone)]
enum Slot<V> {
    Empty,
    Tombstone,
    Occupied { hash: u32, value: V },
}

/// Where an insert scan stopped.
enum Landing {
    Match(usize),
    Free(usize),
}

/// Probe-length histogram.
///
/// `in_segment[i]` counts the entries found at position `i` of their probe
/// sequence; `spilled` counts entries that live in the global phase.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    /// Entries per in-segment probe position.
    pub in_segment: Vec<usize>,
    /// Entries placed after their segment was exhausted.
    pub spilled: usize,
}

#[cfg(any(test, feature = "stats"))]
impl ProbeHistogram {
    /// Prints the histogram as a horizontal bar chart.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        const WIDTH: usize = 60;

        let max = self
            .in_segment
            .iter()
            .copied()
            .chain(core::iter::once(self.spilled))
            .max()
            .unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let bar = |count: usize| "#".repeat((count * WIDTH).div_ceil(max));
        for (position, &count) in self.in_segment.iter().enumerate() {
            if count > 0 {
                println!("{position:>3} | {} ({count})", bar(count));
            }
        }
        println!(" SP | {} ({})", bar(self.spilled), self.spilled);
    }
}

/// Slot usage statistics.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of live entries.
    pub populated: usize,
    /// Maximum number of live entries.
    pub load_limit: usize,
    /// Total number of slots.
    pub capacity: usize,
    /// Slots per segment.
    pub segment_size: usize,
    /// Slots holding a tombstone.
    pub tombstones: usize,
    /// Slots never written since construction or the last clear.
    pub empty_slots: usize,
    /// Entries living outside their segment's local probe phase.
    pub spilled_entries: usize,
    /// Longest probe needed to reach any live entry.
    pub longest_probe: usize,
    /// `populated / capacity`.
    pub load_factor: f64,
    /// Bytes used by the slot array.
    pub total_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-prints the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Table Statistics ===");
        println!(
            "Population: {}/{} slots ({:.2}% load, limit {})",
            self.populated,
            self.capacity,
            self.load_factor * 100.0,
            self.load_limit
        );
        println!(
            "Slots: {} empty, {} tombstones",
            self.empty_slots, self.tombstones
        );
        println!(
            "Probing: {} spilled past a {}-slot segment, longest probe {}",
            self.spilled_entries, self.segment_size, self.longest_probe
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

/// A fixed-capacity open-addressing hash table.
///
/// Each value is placed at the first free slot of its probe sequence: a
/// triangular walk through the segment its hash falls into, followed by a
/// triangular walk over the rest of the table. Removal leaves a tombstone so
/// that probe sequences passing through the slot stay intact; later inserts
/// reuse tombstones.
///
/// The table never grows. Insertion is refused once nine tenths of the slots
/// hold live entries.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use seg_hash::hash_table::Entry;
/// # use seg_hash::hash_table::HashTable;
/// # use seg_hash::probe::fold_hash;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u32 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     fold_hash(hasher.finish())
/// # }
///
/// let mut table = HashTable::new(1024, 32).unwrap();
/// let hash = hash_id(123);
///
/// match table.entry(hash, |p: &Person| p.id == 123).unwrap() {
///     Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
///
/// assert_eq!(table.find(hash, |p| p.id == 123).unwrap().name, "Alice");
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    slots: Box<[Slot<V>]>,
    geometry: Geometry,

    populated: usize,
    tombstones: usize,
    load_limit: usize,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::String;
        use alloc::string::ToString;

        f.debug_struct("HashTable")
            .field(
                "segments",
                &self
                    .slots
                    .chunks(self.geometry.segment_size())
                    .map(|segment| {
                        segment
                            .iter()
                            .map(|slot| match slot {
                                Slot::Empty => "..".to_string(),
                                Slot::Tombstone => "xx".to_string(),
                                Slot::Occupied { hash, .. } => format!("{:02x}", hashtag(*hash)),
                            })
                            .collect::<Vec<String>>()
                            .join(", ")
                    })
                    .collect::<Vec<_>>(),
            )
            .field("populated", &self.populated)
            .field("tombstones", &self.tombstones)
            .field("load_limit", &self.load_limit)
            .finish()
    }
}

impl<V> HashTable<V> {
    /// Creates a table with `capacity` slots split into segments of
    /// `segment_size` slots.
    ///
    /// Fails with [`TableError::InvalidGeometry`] unless
    /// `capacity >= segment_size > 0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use seg_hash::hash_table::HashTable;
    /// # use seg_hash::TableError;
    /// #
    /// let table: HashTable<u64> = HashTable::new(1024, 32).unwrap();
    /// assert_eq!(table.capacity(), 1024);
    /// assert_eq!(table.load_limit(), 921);
    ///
    /// assert!(matches!(
    ///     HashTable::<u64>::new(16, 32),
    ///     Err(TableError::InvalidGeometry { .. })
    /// ));
    /// ```
    pub fn new(capacity: usize, segment_size: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig {
            capacity,
            segment_size,
        })
    }

    /// Creates a table from a [`TableConfig`].
    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        let geometry = Geometry::new(config.capacity, config.segment_size)?;
        let slots = (0..geometry.capacity())
            .map(|_| Slot::Empty)
            .collect::<Vec<_>>()
            .into_boxed_slice();
        let load_limit = load_limit(geometry.capacity());

        log::debug!(
            "created table: capacity={} segment_size={} load_limit={}",
            geometry.capacity(),
            geometry.segment_size(),
            load_limit
        );

        Ok(Self {
            slots,
            geometry,
            populated: 0,
            tombstones: 0,
            load_limit,
        })
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table holds no live entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.geometry.capacity()
    }

    /// Returns the number of slots per segment.
    #[inline]
    pub fn segment_size(&self) -> usize {
        self.geometry.segment_size()
    }

    /// Returns the table geometry.
    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Returns the largest number of live entries the table accepts.
    ///
    /// This is `capacity * 9 / 10`, rounded down.
    #[inline]
    pub fn load_limit(&self) -> usize {
        self.load_limit
    }

    /// Returns `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.populated as f64 / self.capacity() as f64
    }

    /// Returns the number of slots holding a tombstone.
    #[inline]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Removes every entry and tombstone. The capacity is unchanged.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }

        log::debug!(
            "cleared table: dropped {} entries and {} tombstones",
            self.populated,
            self.tombstones
        );

        self.populated = 0;
        self.tombstones = 0;
    }

    /// Walks the probe sequence until a match or an empty slot.
    #[inline]
    fn search(&self, hash: u32, eq: impl Fn(&V) -> bool) -> Option<usize> {
        if self.populated == 0 {
            return None;
        }

        for index in self.geometry.probe(hash) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied { hash: found, value } => {
                    if *found == hash && eq(value) {
                        return Some(index);
                    }
                }
            }
        }

        None
    }

    /// Single-pass insert scan.
    ///
    /// Remembers the first tombstone while continuing to look for a match, so
    /// an update never lands in an earlier tombstone next to its live entry.
    fn landing(&self, hash: u32, eq: impl Fn(&V) -> bool) -> Option<Landing> {
        let mut reusable = None;
        let mut probe = self.geometry.probe(hash);

        while let Some(index) = probe.next() {
            if probe.steps() == self.geometry.segment_size() + 1 {
                log::trace!(
                    "hash {hash:#010x} spilled out of segment at {}",
                    self.geometry.segment_start(hash)
                );
            }

            match &self.slots[index] {
                Slot::Empty => return Some(Landing::Free(reusable.unwrap_or(index))),
                Slot::Tombstone => {
                    reusable.get_or_insert(index);
                }
                Slot::Occupied { hash: found, value } => {
                    if *found == hash && eq(value) {
                        return Some(Landing::Match(index));
                    }
                }
            }
        }

        reusable.map(Landing::Free)
    }

    #[inline]
    fn occupied(&self, index: usize) -> &V {
        match &self.slots[index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!("slot {index} is not occupied"),
        }
    }

    #[inline]
    fn occupied_mut(&mut self, index: usize) -> &mut V {
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!("slot {index} is not occupied"),
        }
    }

    /// Replaces an occupied slot with a tombstone.
    fn take(&mut self, index: usize) -> V {
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.populated -= 1;
                self.tombstones += 1;
                value
            }
            _ => unreachable!("slot {index} is not occupied"),
        }
    }

    /// Finds a value by hash and equality predicate.
    ///
    /// The search stops at the first empty slot of the probe sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use seg_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new(64, 8).unwrap();
    /// table.entry(7, |&n: &u64| n == 42).unwrap().or_insert(42);
    ///
    /// assert_eq!(table.find(7, |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(7, |&n| n == 43), None);
    /// assert_eq!(table.find(9, |&n| n == 42), None);
    /// ```
    #[inline]
    pub fn find(&self, hash: u32, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let index = self.search(hash, eq)?;
        Some(self.occupied(index))
    }

    /// Finds a value by hash and equality predicate, returning a mutable
    /// reference.
    ///
    /// The caller must not change the parts of the value that the hash or the
    /// predicate depend on.
    #[inline]
    pub fn find_mut(&mut self, hash: u32, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let index = self.search(hash, eq)?;
        Some(self.occupied_mut(index))
    }

    /// Gets the entry for the given hash and equality predicate.
    ///
    /// The load limit is checked first: once the table holds
    /// [`load_limit`](Self::load_limit) entries this fails with
    /// [`TableError::CapacityExceeded`] without touching the table, even if the
    /// value is already present.
    ///
    /// A vacant entry points at the first tombstone seen on the probe
    /// sequence, or the first empty slot if there was no tombstone before it.
    ///
    /// # Panics
    ///
    /// Panics if the probe sequence visits no free slot even though the table
    /// is below its load limit. Triangular probing over a capacity that is not
    /// a power of two can skip slots, so this is reachable with such
    /// capacities under heavy local collisions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use seg_hash::hash_table::Entry;
    /// # use seg_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new(64, 8).unwrap();
    ///
    /// match table.entry(3, |&(k, _): &(u32, u32)| k == 1).unwrap() {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert((1, 10));
    ///     }
    ///     Entry::Occupied(mut entry) => {
    ///         entry.get_mut().1 = 10;
    ///     }
    /// }
    ///
    /// table
    ///     .entry(3, |&(k, _)| k == 1)
    ///     .unwrap()
    ///     .and_modify(|(_, v)| *v += 1);
    /// assert_eq!(table.find(3, |&(k, _)| k == 1), Some(&(1, 11)));
    /// ```
    pub fn entry(
        &mut self,
        hash: u32,
        eq: impl Fn(&V) -> bool,
    ) -> Result<Entry<'_, V>, TableError> {
        if self.populated >= self.load_limit {
            log::warn!(
                "refusing insert: {} entries at load limit {}",
                self.populated,
                self.load_limit
            );
            return Err(TableError::CapacityExceeded {
                len: self.populated,
                load_limit: self.load_limit,
            });
        }

        match self.landing(hash, eq) {
            Some(Landing::Match(index)) => {
                Ok(Entry::Occupied(OccupiedEntry { table: self, index }))
            }
            Some(Landing::Free(index)) => Ok(Entry::Vacant(VacantEntry {
                table: self,
                index,
                hash,
            })),
            None => probe_exhausted(hash, self.populated, self.capacity()),
        }
    }

    /// Removes a value by hash and equality predicate, leaving a tombstone in
    /// its slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use seg_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new(64, 8).unwrap();
    /// table.entry(5, |&n: &u64| n == 42).unwrap().or_insert(42);
    ///
    /// assert_eq!(table.remove(5, |&n| n == 42), Some(42));
    /// assert_eq!(table.remove(5, |&n| n == 42), None);
    /// assert!(table.is_empty());
    /// assert_eq!(table.tombstones(), 1);
    /// ```
    pub fn remove(&mut self, hash: u32, eq: impl Fn(&V) -> bool) -> Option<V> {
        let index = self.search(hash, eq)?;
        Some(self.take(index))
    }

    /// Returns an iterator over the live values in slot order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator over mutable references to the live values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            slots: self.slots.iter_mut(),
            remaining: self.populated,
        }
    }

    /// Removes and yields every live value, resetting all slots to empty.
    ///
    /// Slots are reset even if the iterator is dropped before it is
    /// exhausted. If the iterator is leaked, values it has not yielded yet
    /// stay in the table and remain counted.
    pub fn drain(&mut self) -> Drain<'_, V> {
        Drain {
            table: self,
            slot_index: 0,
        }
    }

    /// Returns the number of probes needed to reach a value, or `None` if it
    /// is absent.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_length(&self, hash: u32, eq: impl Fn(&V) -> bool) -> Option<usize> {
        for (position, index) in self.geometry.probe(hash).enumerate() {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied { hash: found, value } => {
                    if *found == hash && eq(value) {
                        return Some(position + 1);
                    }
                }
            }
        }

        None
    }

    /// Position of `index` within the probe sequence of `hash`.
    #[cfg(any(test, feature = "stats"))]
    fn placement(&self, index: usize, hash: u32) -> usize {
        self.geometry
            .probe(hash)
            .position(|candidate| candidate == index)
            .unwrap_or(self.capacity())
    }

    /// Computes a histogram of probe positions for the current entries.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> ProbeHistogram {
        let segment_size = self.segment_size();
        let mut histogram = ProbeHistogram {
            in_segment: alloc::vec![0; segment_size],
            spilled: 0,
        };

        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied { hash, .. } = slot {
                let position = self.placement(index, *hash);
                if position < segment_size {
                    histogram.in_segment[position] += 1;
                } else {
                    histogram.spilled += 1;
                }
            }
        }

        histogram
    }

    /// Returns slot usage and probing statistics.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let mut empty_slots = 0;
        let mut spilled_entries = 0;
        let mut longest_probe = 0;

        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => empty_slots += 1,
                Slot::Tombstone => {}
                Slot::Occupied { hash, .. } => {
                    let position = self.placement(index, *hash);
                    if position >= self.segment_size() {
                        spilled_entries += 1;
                    }
                    longest_probe = longest_probe.max(position + 1);
                }
            }
        }

        DebugStats {
            populated: self.populated,
            load_limit: self.load_limit,
            capacity: self.capacity(),
            segment_size: self.segment_size(),
            tombstones: self.tombstones,
            empty_slots,
            spilled_entries,
            longest_probe,
            load_factor: self.load_factor(),
            total_bytes: self.slots.len() * mem::size_of::<Slot<V>>(),
        }
    }
}

/// A view into a single entry in the table, which may be vacant or occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// The value is not present; the entry points at the slot it would use.
    Vacant(VacantEntry<'a, V>),
    /// The value is present.
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the value.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Applies `f` to the value if the entry is occupied.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }
}

/// A view into a vacant slot.
///
/// The slot is either empty or a tombstone that the insert will reuse.
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
    hash: u32,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Stores `value` in the slot and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        let VacantEntry { table, index, hash } = self;

        if let Slot::Tombstone = table.slots[index] {
            table.tombstones -= 1;
        }
        table.populated += 1;
        table.slots[index] = Slot::Occupied { hash, value };

        table.occupied_mut(index)
    }
}

/// A view into an occupied slot.
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value.
    pub fn get(&self) -> &V {
        self.table.occupied(self.index)
    }

    /// Gets a mutable reference to the value.
    pub fn get_mut(&mut self) -> &mut V {
        self.table.occupied_mut(self.index)
    }

    /// Converts the entry into a mutable reference bound to the table's
    /// lifetime.
    pub fn into_mut(self) -> &'a mut V {
        self.table.occupied_mut(self.index)
    }

    /// Replaces the value, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Removes the value, leaving a tombstone.
    pub fn remove(self) -> V {
        self.table.take(self.index)
    }
}

/// An iterator over the live values in a [`HashTable`].
///
/// This struct is created by the [`iter`] method on [`HashTable`]. Calling
/// [`iter`] again starts a fresh pass over the slots.
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for slot in self.slots.by_ref() {
            if let Slot::Occupied { value, .. } = slot {
                self.remaining -= 1;
                return Some(value);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// A mutable iterator over the live values in a [`HashTable`].
///
/// This struct is created by the [`iter_mut`] method on [`HashTable`].
///
/// [`iter_mut`]: HashTable::iter_mut
pub struct IterMut<'a, V> {
    slots: core::slice::IterMut<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for slot in self.slots.by_ref() {
            if let Slot::Occupied { value, .. } = slot {
                self.remaining -= 1;
                return Some(value);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

impl<V> FusedIterator for IterMut<'_, V> {}

/// A draining iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`].
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, V> {
    table: &'a mut HashTable<V>,
    slot_index: usize,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        while self.slot_index < self.table.slots.len() {
            let slot = &mut self.table.slots[self.slot_index];
            self.slot_index += 1;

            if let Slot::Occupied { .. } = slot {
                // Chains through this slot must stay walkable if the drain leaks.
                if let Slot::Occupied { value, .. } = mem::replace(slot, Slot::Tombstone) {
                    self.table.populated -= 1;
                    self.table.tombstones += 1;
                    return Some(value);
                }
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.table.populated, Some(self.table.populated))
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

impl<V> FusedIterator for Drain<'_, V> {}

impl<V> Drop for Drain<'_, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}

        for slot in self.table.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.table.tombstones = 0;
    }
}
