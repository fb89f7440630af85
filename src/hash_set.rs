use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::config::TableConfig;
use crate::equivalence::KeyEquivalence;
use crate::equivalence::NaturalEq;
use crate::error::TableError;
use crate::hash_table::Entry;
use crate::hash_table::HashTable;
use crate::probe::fold_hash;

/// A fixed-capacity hash set built on [`HashTable`].
///
/// Shares the map's capacity rules: adding a new value fails with
/// [`TableError::CapacityExceeded`] once nine tenths of the slots are live.
#[derive(Clone)]
pub struct HashSet<T, S, E = NaturalEq> {
    table: HashTable<T>,
    hash_builder: S,
    equivalence: E,
}

impl<T, S, E> Debug for HashSet<T, S, E>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a set with `capacity` slots and the default segment size.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use seg_hash::HashSet;
    ///
    /// let set: HashSet<i32, _> =
    ///     HashSet::with_capacity_and_hasher(128, RandomState::new()).unwrap();
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), 128);
    /// # }
    /// ```
    pub fn with_capacity_and_hasher(
        capacity: usize,
        hash_builder: S,
    ) -> Result<Self, TableError> {
        Self::with_equivalence(TableConfig::new(capacity), hash_builder, NaturalEq)
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a set with `capacity` slots using the default hasher builder.
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S, E> HashSet<T, S, E>
where
    T: Hash,
    S: BuildHasher,
    E: KeyEquivalence<T>,
{
    /// Creates a set that compares values with `equivalence`.
    pub fn with_equivalence(
        config: TableConfig,
        hash_builder: S,
        equivalence: E,
    ) -> Result<Self, TableError> {
        Ok(Self {
            table: HashTable::with_config(config)?,
            hash_builder,
            equivalence,
        })
    }

    #[inline]
    fn hash(&self, value: &T) -> u32 {
        fold_hash(self.hash_builder.hash_one(value))
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the total number of slots.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the largest number of values the set accepts.
    pub fn load_limit(&self) -> usize {
        self.table.load_limit()
    }

    /// Returns the number of slots per segment.
    pub fn segment_size(&self) -> usize {
        self.table.segment_size()
    }

    /// Returns `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Removes all values. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Adds a value to the set.
    ///
    /// Returns `Ok(true)` if the value was added and `Ok(false)` if an
    /// equivalent value was already present, in which case the stored value is
    /// kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use seg_hash::DefaultHashBuilder;
    /// use seg_hash::HashSet;
    ///
    /// let mut set: HashSet<_, DefaultHashBuilder> = HashSet::with_capacity(64).unwrap();
    /// assert_eq!(set.insert(2), Ok(true));
    /// assert_eq!(set.insert(2), Ok(false));
    /// assert_eq!(set.len(), 1);
    /// # }
    /// ```
    pub fn insert(&mut self, value: T) -> Result<bool, TableError> {
        let hash = self.hash(&value);
        let equivalence = &self.equivalence;
        match self
            .table
            .entry(hash, |v| equivalence.equivalent(v, &value))?
        {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(true)
            }
        }
    }

    /// Adds a value, replacing and returning an equivalent stored value.
    pub fn replace(&mut self, value: T) -> Result<Option<T>, TableError> {
        let hash = self.hash(&value);
        let equivalence = &self.equivalence;
        match self
            .table
            .entry(hash, |v| equivalence.equivalent(v, &value))?
        {
            Entry::Occupied(mut entry) => Ok(Some(entry.insert(value))),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(None)
            }
        }
    }

    /// Returns `true` if the set contains `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Returns the stored value equivalent to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        let hash = self.hash(value);
        self.table
            .find(hash, |v| self.equivalence.equivalent(v, value))
    }

    /// Removes `value`, returning `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the stored value equivalent to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let hash = self.hash(value);
        let equivalence = &self.equivalence;
        self.table
            .remove(hash, |v| equivalence.equivalent(v, value))
    }
}

impl<T, S, E> HashSet<T, S, E> {
    /// Returns an iterator over the values in slot order.
    pub fn iter(&self) -> crate::hash_table::Iter<'_, T> {
        self.table.iter()
    }

    /// Removes and yields every value.
    pub fn drain(&mut self) -> crate::hash_table::Drain<'_, T> {
        self.table.drain()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    fn new_set<T: Hash + Eq>() -> HashSet<T, SipHashBuilder> {
        let config = TableConfig::new(256).segment_size(16);
        HashSet::with_equivalence(config, SipHashBuilder::default(), NaturalEq).unwrap()
    }

    #[test]
    fn test_insert_contains_remove() {
        let mut set = new_set();
        assert_eq!(set.insert(1), Ok(true));
        assert_eq!(set.insert(2), Ok(true));
        assert_eq!(set.insert(1), Ok(false));
        assert_eq!(set.len(), 2);

        assert!(set.contains(&1));
        assert!(!set.contains(&3));
        assert_eq!(set.segment_size(), 16);
        assert_eq!(set.load_factor(), 2.0 / 256.0);

        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert!(!set.contains(&1));
        assert_eq!(set.take(&2), Some(2));
        assert!(set.is_empty());
    }

    #[test]
    fn test_with_capacity() {
        let set: HashSet<u8, SipHashBuilder> = HashSet::with_capacity(100).unwrap();
        assert_eq!(set.capacity(), 100);
        assert_eq!(set.load_limit(), 90);
        assert_eq!(set.segment_size(), 32);
        assert_eq!(set.load_factor(), 0.0);
        assert!(HashSet::<u8, SipHashBuilder>::with_capacity(0).is_err());
    }

    #[test]
    fn test_replace_keeps_single_copy() {
        let mut set = HashSet::with_equivalence(
            TableConfig::new(64),
            SipHashBuilder::default(),
            |a: &String, b: &String| a == b,
        )
        .unwrap();

        assert_eq!(set.replace("x".to_string()), Ok(None));
        assert_eq!(set.replace("x".to_string()), Ok(Some("x".to_string())));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&"x".to_string()), Some(&"x".to_string()));
    }

    #[test]
    fn test_load_limit() {
        let mut set = new_set();
        for i in 0..230u32 {
            assert_eq!(set.insert(i), Ok(true));
        }
        assert_eq!(set.load_limit(), 230);
        assert_eq!(
            set.insert(230),
            Err(TableError::CapacityExceeded {
                len: 230,
                load_limit: 230
            })
        );
        assert!(!set.contains(&230));
    }

    #[test]
    fn test_iter_and_drain() {
        let mut set = new_set();
        for i in 0..20 {
            set.insert(i).unwrap();
        }
        set.remove(&7);

        let mut values: Vec<i32> = set.iter().copied().collect();
        values.sort_unstable();
        assert_eq!(values.len(), 19);
        assert!(!values.contains(&7));

        assert_eq!(set.drain().count(), 19);
        assert!(set.is_empty());

        set.insert(1).unwrap();
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_debug() {
        let mut set = new_set();
        set.insert(5).unwrap();
        assert_eq!(alloc::format!("{set:?}"), "{5}");
    }
}
