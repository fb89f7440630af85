use core::fmt::Debug;
use core::iter::FusedIterator;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::config::TableConfig;
use crate::equivalence::KeyEquivalence;
use crate::equivalence::NaturalEq;
use crate::error::TableError;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::probe::fold_hash;

/// A fixed-capacity hash map built on [`HashTable`].
///
/// `HashMap<K, V, S, E>` hashes keys with the builder `S` and compares them
/// with the equivalence `E`, which defaults to the key's own `PartialEq`.
/// Capacity is chosen at construction and never changes; inserting a new key
/// fails with [`TableError::CapacityExceeded`] once nine tenths of the slots
/// are live.
#[derive(Clone)]
pub struct HashMap<K, V, S, E = NaturalEq> {
    table: HashTable<(K, V)>,
    hash_builder: S,
    equivalence: E,
}

impl<K, V, S, E> Debug for HashMap<K, V, S, E>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a map with `capacity` slots and the default segment size.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use seg_hash::HashMap;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let map: HashMap<i32, String, _> =
    ///     HashMap::with_capacity_and_hasher(1024, SimpleHasher).unwrap();
    /// assert_eq!(map.capacity(), 1024);
    /// assert_eq!(map.segment_size(), 32);
    /// ```
    pub fn with_capacity_and_hasher(
        capacity: usize,
        hash_builder: S,
    ) -> Result<Self, TableError> {
        Self::with_config_and_hasher(TableConfig::new(capacity), hash_builder)
    }

    /// Creates a map from a [`TableConfig`] and hasher builder.
    pub fn with_config_and_hasher(
        config: TableConfig,
        hash_builder: S,
    ) -> Result<Self, TableError> {
        Self::with_equivalence(config, hash_builder, NaturalEq)
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a map with `capacity` slots using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use seg_hash::DefaultHashBuilder;
    /// use seg_hash::HashMap;
    ///
    /// let map: HashMap<&str, u32, DefaultHashBuilder> = HashMap::with_capacity(256).unwrap();
    /// assert!(map.is_empty());
    /// assert_eq!(map.load_limit(), 230);
    /// # }
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    /// Creates a map from a [`TableConfig`] using the default hasher builder.
    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        Self::with_config_and_hasher(config, S::default())
    }
}

impl<K, V, S, E> HashMap<K, V, S, E>
where
    K: Hash,
    S: BuildHasher,
    E: KeyEquivalence<K>,
{
    /// Creates a map that compares keys with `equivalence`.
    ///
    /// Keys that `equivalence` considers equal must hash identically under
    /// `hash_builder`.
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
    fn hash(&self, key: &K) -> u32 {
        fold_hash(self.hash_builder.hash_one(key))
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the total number of slots.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the number of slots per segment.
    pub fn segment_size(&self) -> usize {
        self.table.segment_size()
    }

    /// Returns the largest number of entries the map accepts.
    pub fn load_limit(&self) -> usize {
        self.table.load_limit()
    }

    /// Returns `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns a reference to the underlying table.
    pub fn table(&self) -> &HashTable<(K, V)> {
        &self.table
    }

    /// Removes all entries. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Inserts a key-value pair, replacing the value of an existing key.
    ///
    /// Returns the previous value if the key was present. Fails with
    /// [`TableError::CapacityExceeded`], leaving the map untouched, once the
    /// map holds [`load_limit`](Self::load_limit) entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use seg_hash::DefaultHashBuilder;
    /// use seg_hash::HashMap;
    ///
    /// let mut map: HashMap<_, _, DefaultHashBuilder> = HashMap::with_capacity(64).unwrap();
    /// assert_eq!(map.insert(37, "a"), Ok(None));
    /// assert_eq!(map.insert(37, "b"), Ok(Some("a")));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// assert_eq!(map.len(), 1);
    /// # }
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, TableError> {
        let hash = self.hash(&key);
        let equivalence = &self.equivalence;
        match self
            .table
            .entry(hash, |(k, _)| equivalence.equivalent(k, &key))?
        {
            TableEntry::Occupied(mut entry) => {
                Ok(Some(core::mem::replace(&mut entry.get_mut().1, value)))
            }
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                Ok(None)
            }
        }
    }

    /// Inserts a key-value pair only if the key is absent.
    ///
    /// Fails with [`TableError::DuplicateKey`] if the key is present, or
    /// [`TableError::CapacityExceeded`] at the load limit; the map is
    /// untouched in both cases.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use seg_hash::DefaultHashBuilder;
    /// use seg_hash::HashMap;
    /// use seg_hash::TableError;
    ///
    /// let mut map: HashMap<_, _, DefaultHashBuilder> = HashMap::with_capacity(64).unwrap();
    /// *map.add("a", 1).unwrap() += 1;
    /// assert_eq!(map.add("a", 5), Err(TableError::DuplicateKey));
    /// assert_eq!(map.get(&"a"), Some(&2));
    /// # }
    /// ```
    pub fn add(&mut self, key: K, value: V) -> Result<&mut V, TableError> {
        let hash = self.hash(&key);
        let equivalence = &self.equivalence;
        match self
            .table
            .entry(hash, |(k, _)| equivalence.equivalent(k, &key))?
        {
            TableEntry::Occupied(_) => Err(TableError::DuplicateKey),
            TableEntry::Vacant(entry) => Ok(&mut entry.insert((key, value)).1),
        }
    }

    /// Returns a reference to the value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let hash = self.hash(key);
        self.table
            .find(hash, |(k, _)| self.equivalence.equivalent(k, key))
            .map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash(key);
        let equivalence = &self.equivalence;
        self.table
            .find_mut(hash, |(k, _)| equivalence.equivalent(k, key))
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// The slot becomes a tombstone and is reused by later inserts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use seg_hash::DefaultHashBuilder;
    /// use seg_hash::HashMap;
    ///
    /// let mut map: HashMap<_, _, DefaultHashBuilder> = HashMap::with_capacity(64).unwrap();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// # }
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and value if it was present.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hash(key);
        let equivalence = &self.equivalence;
        self.table
            .remove(hash, |(k, _)| equivalence.equivalent(k, key))
    }
}

impl<K, V, S, E> HashMap<K, V, S, E> {
    /// Returns an iterator over the key-value pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Removes and yields every entry.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }
}

/// An iterator over the entries of a [`HashMap`].
#[derive(Clone)]
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An iterator over the keys of a [`HashMap`].
#[derive(Clone)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`HashMap`].
#[derive(Clone)]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a [`HashMap`].
pub struct ValuesMut<'a, K, V> {
    inner: crate::hash_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// A draining iterator over the entries of a [`HashMap`].
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}

impl<K, V> FusedIterator for Drain<'_, K, V> {}
