/// Decides whether two keys are the same key.
///
/// Implementations must agree with the hasher used alongside them: keys that
/// are equivalent must produce the same hash, otherwise they land in
/// different probe sequences and are treated as distinct.
///
/// Any `Fn(&K, &K) -> bool` closure is an equivalence.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "foldhash")]
/// # {
/// use core::hash::Hash;
/// use core::hash::Hasher;
///
/// use seg_hash::HashMap;
/// use seg_hash::TableConfig;
///
/// // Only `id` takes part in hashing and equivalence.
/// struct Account {
///     id: u32,
///     _display_name: &'static str,
/// }
///
/// impl Hash for Account {
///     fn hash<H: Hasher>(&self, state: &mut H) {
///         self.id.hash(state);
///     }
/// }
///
/// let mut map = HashMap::with_equivalence(
///     TableConfig::new(64),
///     foldhash::fast::RandomState::default(),
///     |a: &Account, b: &Account| a.id == b.id,
/// )
/// .unwrap();
///
/// map.insert(Account { id: 1, _display_name: "old" }, 10).unwrap();
/// map.insert(Account { id: 1, _display_name: "new" }, 20).unwrap();
/// assert_eq!(map.len(), 1);
/// # }
/// ```
pub trait KeyEquivalence<K: ?Sized> {
    /// Returns `true` if `a` and `b` identify the same entry.
    fn equivalent(&self, a: &K, b: &K) -> bool;
}

/// The key type's own `PartialEq`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalEq;

impl<K: PartialEq + ?Sized> KeyEquivalence<K> for NaturalEq {
    #[inline(always)]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

impl<K: ?Sized, F> KeyEquivalence<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline(always)]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}
