use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;

use crate::DefaultHashBuilder;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::raw_alloc::AllocError;
use crate::raw_alloc::Global;
use crate::raw_alloc::RawAllocator;

/// A hash map implemented on the open-addressing `HashTable`.
///
/// `HashMap<K, V, S, A>` stores key-value pairs where keys implement
/// `Hash + Eq`, hashes them with a configurable hasher builder `S`, and
/// allocates through the raw allocator `A`. The underlying storage is the
/// crate's tombstone-based open-addressing [`HashTable`], shared with
/// [`HashSet`](crate::HashSet).
///
/// # Examples
///
/// ```rust
/// use probe_hash::HashMap;
///
/// let mut map = HashMap::new();
/// map.insert("Fernando", "Ritter");
/// map.insert("Lahude", "Xibata");
///
/// assert_eq!(map.get("Fernando"), Some(&"Ritter"));
/// assert_eq!(map.remove("Lahude"), Some("Xibata"));
/// assert_eq!(map.get("Lahude"), None);
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder, A: RawAllocator = Global> {
    table: HashTable<(K, V), A>,
    hash_builder: S,
}

impl<K, V, S, A> Debug for HashMap<K, V, S, A>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
    A: RawAllocator,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, S, A> HashMap<K, V, S, A>
where
    K: Hash + Eq,
    S: BuildHasher,
    A: RawAllocator,
{
    /// Creates a map with the given hasher builder, allocating from `alloc`.
    pub fn with_hasher_in(hash_builder: S, alloc: A) -> Self {
        Self {
            table: HashTable::new_in(alloc),
            hash_builder,
        }
    }

    /// Creates a map with the specified capacity and hasher builder,
    /// allocating from `alloc`.
    pub fn with_capacity_and_hasher_in(capacity: usize, hash_builder: S, alloc: A) -> Self {
        Self {
            table: HashTable::with_capacity_in(capacity, alloc),
            hash_builder,
        }
    }

    /// Returns the number of key-value pairs in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no key-value pairs.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of pairs the map can hold before resizing.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all pairs from the map, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Reserves capacity for at least `additional` more pairs.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Reserves capacity for at least `additional` more pairs, reporting
    /// allocator failure instead of aborting.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        self.table.try_reserve(additional)
    }

    /// Shrinks the map's storage as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key was already present its value is overwritten in place and
    /// the old value returned; the stored key is left unchanged and the
    /// length does not grow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(mut entry) => {
                let old_value = core::mem::replace(&mut entry.get_mut().1, value);
                Some(old_value)
            }
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, with matching
    /// `Hash` and `Eq`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashMap;
    ///
    /// let mut map: HashMap<String, i32> = HashMap::new();
    /// map.insert("one".to_string(), 1);
    /// assert_eq!(map.get("one"), Some(&1));
    /// assert_eq!(map.get("two"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find(hash, |(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Returns the stored key-value pair corresponding to the key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find(hash, |(k, _)| k.borrow() == key)
            .map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find_mut(hash, |(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// Removing the same key twice reports the removal once: the second call
    /// returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |(k, _)| k.borrow() == key)
    }

    /// Gets the entry for the given key for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashMap;
    ///
    /// let mut counts: HashMap<&str, u32> = HashMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.entry(word).or_insert(0) += 1;
    /// }
    /// assert_eq!(counts.get("a"), Some(&2));
    /// assert_eq!(counts.get("b"), Some(&1));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, A> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry }),
            TableEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        }
    }

    /// Returns an iterator over the key-value pairs of the map.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the pairs with mutable value references.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Retains only the pairs accepted by the predicate.
    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        self.table.retain(|entry| f(&entry.0, &mut entry.1));
    }

    /// Returns an iterator that removes and yields all key-value pairs.
    ///
    /// After calling `drain()` the map is empty; the capacity is kept.
    pub fn drain(&mut self) -> Drain<'_, K, V, A> {
        Drain {
            inner: self.table.drain(),
        }
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a map with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_hasher_in(hash_builder, Global)
    }

    /// Creates a map with the specified capacity and hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::with_capacity_and_hasher_in(capacity, hash_builder, Global)
    }
}

impl<K, V> HashMap<K, V>
where
    K: Hash + Eq,
{
    /// Creates an empty map using the default hasher builder.
    ///
    /// No memory is allocated until the first insert.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashMap;
    ///
    /// let map: HashMap<i32, String> = HashMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates a map that can hold at least `capacity` pairs without
    /// resizing, using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashMap;
    ///
    /// let map: HashMap<i32, String> = HashMap::with_capacity(100);
    /// assert!(map.capacity() >= 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, Q, V, S, A> Index<&Q> for HashMap<K, V, S, A>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
    A: RawAllocator,
{
    type Output = V;

    /// Returns a reference to the value for the given key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present. Use [`entry`] with `or_default` for
    /// insert-if-absent access.
    ///
    /// [`entry`]: HashMap::entry
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V, A: RawAllocator = Global> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, A>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, A>),
}

impl<'a, K, V, A: RawAllocator> Entry<'a, K, V, A> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V, A: RawAllocator> Entry<'a, K, V, A>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a
    /// mutable reference.
    ///
    /// This is the insert-if-absent access of a subscript operator: indexing
    /// a missing key creates it with `V::default()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashMap;
    ///
    /// let mut map: HashMap<i32, i32> = HashMap::new();
    /// *map.entry(1).or_default() = 10;
    /// *map.entry(2).or_default() = 100;
    /// assert_eq!(map[&1], 10);
    /// assert_eq!(map[&2], 100);
    /// ```
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V, A: RawAllocator = Global> {
    entry: crate::hash_table::VacantEntry<'a, (K, V), A>,
    key: K,
}

impl<'a, K, V, A: RawAllocator> VacantEntry<'a, K, V, A> {
    /// Gets a reference to the key that would be used when inserting a
    /// value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V, A: RawAllocator = Global> {
    entry: crate::hash_table::OccupiedEntry<'a, (K, V), A>,
}

impl<'a, K, V, A: RawAllocator> OccupiedEntry<'a, K, V, A> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Inserts a value into the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(&mut self.entry.get_mut().1, value)
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        self.entry.remove().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.entry.remove()
    }
}

/// An iterator over the key-value pairs of a `HashMap`.
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}

/// An iterator over the key-value pairs of a `HashMap` with mutable value
/// references.
pub struct IterMut<'a, K, V> {
    inner: crate::hash_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }
}

/// An iterator over the keys of a `HashMap`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a `HashMap`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// An iterator over mutable value references of a `HashMap`.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A draining iterator over the key-value pairs of a `HashMap`.
pub struct Drain<'a, K, V, A: RawAllocator = Global> {
    inner: crate::hash_table::Drain<'a, (K, V), A>,
}

impl<'a, K, V, A: RawAllocator> Iterator for Drain<'a, K, V, A> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<'a, K, V, S, A: RawAllocator> IntoIterator for &'a HashMap<K, V, S, A>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
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
            Self {
                k1: 0x736F_6D65_7073_6575,
                k2: 0x646F_7261_6E64_6F6D,
            }
        }
    }

    #[test]
    fn test_new_and_with_hasher() {
        let map: HashMap<i32, String> = HashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);

        let map2 = HashMap::<i32, String, _>::with_hasher(SipHashBuilder::default());
        assert!(map2.is_empty());
        assert_eq!(map2.len(), 0);
    }

    #[test]
    fn test_with_capacity() {
        let map: HashMap<i32, String> = HashMap::with_capacity(100);
        assert!(map.capacity() >= 100);
        assert!(map.is_empty());
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = HashMap::new();

        assert_eq!(map.insert(1, "hello".to_string()), None);
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());

        assert_eq!(map.get(&1), Some(&"hello".to_string()));
        assert_eq!(map.get(&2), None);

        assert_eq!(
            map.insert(1, "world".to_string()),
            Some("hello".to_string())
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"world".to_string()));
    }

    #[test]
    fn test_get_mut() {
        let mut map = HashMap::new();
        map.insert(1, "hello".to_string());

        if let Some(value) = map.get_mut(&1) {
            value.push_str(" world");
        }

        assert_eq!(map.get(&1), Some(&"hello world".to_string()));
        assert_eq!(map.get_mut(&2), None);
    }

    #[test]
    fn test_borrowed_key_lookup() {
        let mut map: HashMap<String, i32> = HashMap::new();
        map.insert("alpha".to_string(), 1);

        assert_eq!(map.get("alpha"), Some(&1));
        assert!(map.contains_key("alpha"));
        assert_eq!(map.remove("alpha"), Some(1));
        assert_eq!(map.get("alpha"), None);
    }

    #[test]
    fn test_contains_key() {
        let mut map = HashMap::new();
        assert!(!map.contains_key(&1));

        map.insert(1, "value");
        assert!(map.contains_key(&1));
        assert!(!map.contains_key(&2));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut map = HashMap::new();
        map.insert(1, "hello");
        map.insert(2, "world");

        assert_eq!(map.remove(&1), Some("hello"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove(&1), None);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&2));
    }

    #[test]
    fn test_remove_entry() {
        let mut map = HashMap::new();
        map.insert(1, "hello".to_string());

        assert_eq!(map.remove_entry(&1), Some((1, "hello".to_string())));
        assert_eq!(map.len(), 0);
        assert_eq!(map.remove_entry(&1), None);
    }

    #[test]
    fn test_clear() {
        let mut map = HashMap::new();
        map.insert(1, "hello");
        map.insert(2, "world");

        map.clear();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(!map.contains_key(&1));
        assert!(!map.contains_key(&2));
    }

    #[test]
    fn test_reserve() {
        let mut map = HashMap::<i32, String>::new();
        map.reserve(1000);
        assert!(map.capacity() >= 1000);
    }

    #[test]
    fn test_entry_api() {
        let mut map = HashMap::new();

        let value = map.entry(1).or_insert("hello".to_string());
        assert_eq!(value, &"hello".to_string());
        assert_eq!(map.len(), 1);

        let value = map.entry(1).or_insert("world".to_string());
        assert_eq!(value, &"hello".to_string());
        assert_eq!(map.len(), 1);

        map.entry(2).or_insert_with(|| "computed".to_string());
        assert_eq!(map.get(&2), Some(&"computed".to_string()));

        map.entry(1).and_modify(|v| v.push('!'));
        assert_eq!(map.get(&1), Some(&"hello!".to_string()));

        assert_eq!(map.entry(3).key(), &3);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_subscript_semantics() {
        let mut map: HashMap<i32, i32> = HashMap::new();
        *map.entry(1).or_default() = 10;
        *map.entry(2).or_default() = 100;
        *map.entry(3).or_default() = 1000;
        assert_eq!(map.len(), 3);
        assert_eq!(map[&1], 10);
        assert_eq!(map[&2], 100);
        assert_eq!(map[&3], 1000);
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn test_index_missing_key_panics() {
        let map: HashMap<i32, i32> = HashMap::new();
        let _ = map[&1];
    }

    #[test]
    fn test_collisions_at_small_capacity() {
        let mut map = HashMap::with_capacity(10);

        map.insert(10, 1);
        map.insert(100, 2);
        map.insert(1000, 3);
        assert_eq!(map.len(), 3);

        assert_eq!(map.get(&10), Some(&1));
        assert_eq!(map.get(&100), Some(&2));
        assert_eq!(map.get(&1000), Some(&3));
    }

    #[test]
    fn test_string_keys_and_removal() {
        let mut map: HashMap<String, String> = HashMap::new();
        map.insert("Fernando".to_string(), "Ritter".to_string());
        map.insert("Lahude".to_string(), "Xibata".to_string());

        assert_eq!(map.get("Fernando").map(String::as_str), Some("Ritter"));
        assert_eq!(map.get("Lahude").map(String::as_str), Some("Xibata"));

        assert!(map.remove("Lahude").is_some());
        assert_eq!(map.get("Lahude"), None);
        assert_eq!(map.get("Fernando").map(String::as_str), Some("Ritter"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_tombstone_then_reserve() {
        let mut map = HashMap::with_capacity(10);
        map.insert(10, 1);
        map.insert(100, 2);
        map.insert(1000, 3);

        assert_eq!(map.remove(&100), Some(2));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&100), None);

        map.reserve(100);
        assert_eq!(map.get(&10), Some(&1));
        assert_eq!(map.get(&1000), Some(&3));
        assert_eq!(map.get(&100), None);
    }

    #[test]
    fn test_rehashing_stress() {
        let mut map = HashMap::new();

        let mut last_capacity = 0;
        for i in 0i64..200_000 {
            map.insert(i, i * i);
            // Capacity only ever ratchets upward while inserting.
            assert!(map.capacity() >= last_capacity);
            last_capacity = map.capacity();
        }

        assert_eq!(map.len(), 200_000);
        for i in 0i64..200_000 {
            assert_eq!(map.get(&i), Some(&(i * i)));
        }
    }

    #[test]
    fn test_heavy_insertion_and_removal() {
        let mut map = HashMap::new();
        let num_elements = 500_000i64;

        for i in 0..num_elements {
            map.insert(i, i * 3);
        }
        for i in (0..num_elements).step_by(2) {
            map.remove(&i);
        }

        assert_eq!(map.len(), (num_elements / 2) as usize);
        for i in 0..num_elements {
            if i % 2 == 0 {
                assert_eq!(map.get(&i), None);
            } else {
                assert_eq!(map.get(&i), Some(&(i * 3)));
            }
        }
    }

    #[test]
    fn test_randomized_against_reference() {
        let mut map: HashMap<i32, i32> = HashMap::new();
        let mut reference: std::collections::HashMap<i32, i32> = std::collections::HashMap::new();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..100_000 {
            let op: u8 = rng.random_range(1..=100);
            let key: i32 = rng.random_range(1..=100_000);
            let value: i32 = rng.random_range(1..=1_000_000);

            if op <= 60 {
                assert_eq!(map.insert(key, value), reference.insert(key, value));
            } else if op <= 80 {
                assert_eq!(map.remove(&key), reference.remove(&key));
            } else {
                assert_eq!(map.contains_key(&key), reference.contains_key(&key));
                assert_eq!(map.get(&key), reference.get(&key));
            }
            assert_eq!(map.len(), reference.len());
        }

        for (key, value) in &reference {
            assert_eq!(map.get(key), Some(value));
        }
    }

    #[test]
    fn test_iterator_traverses_everything() {
        let mut map = HashMap::new();
        let num_elements = 100_000i64;
        for i in 0..num_elements {
            map.insert(i, i + 100);
        }

        let mut count = 0i64;
        for (key, value) in &map {
            assert_eq!(*value, *key + 100);
            count += 1;
        }
        assert_eq!(count, num_elements);
    }

    #[test]
    fn test_keys_values_and_values_mut() {
        let mut map = HashMap::new();
        map.insert(1, 10);
        map.insert(2, 20);

        let mut keys: Vec<i32> = map.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![1, 2]);

        let mut values: Vec<i32> = map.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, vec![10, 20]);

        for value in map.values_mut() {
            *value += 1;
        }
        assert_eq!(map.get(&1), Some(&11));
        assert_eq!(map.get(&2), Some(&21));
    }

    #[test]
    fn test_drain() {
        let mut map = HashMap::new();
        map.insert(1, "a");
        map.insert(2, "b");

        let mut pairs: Vec<(i32, &str)> = map.drain().collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(1, "a"), (2, "b")]);
        assert!(map.is_empty());

        map.insert(3, "c");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_retain() {
        let mut map = HashMap::new();
        for i in 0..100 {
            map.insert(i, i * 2);
        }
        map.retain(|&k, _| k % 10 == 0);
        assert_eq!(map.len(), 10);
        assert_eq!(map.get(&50), Some(&100));
        assert_eq!(map.get(&51), None);
    }

    #[test]
    fn test_explicit_hasher_still_works() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        for i in 0..1000 {
            map.insert(i, i.to_string());
        }
        for i in 0..1000 {
            assert_eq!(map.get(&i), Some(&i.to_string()));
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let mut map = HashMap::new();
        map.insert(1, "one".to_string());
        map.insert(2, "two".to_string());

        let mut cloned = map.clone();
        cloned.insert(3, "three".to_string());

        assert_eq!(map.len(), 2);
        assert_eq!(cloned.len(), 3);
        assert_eq!(cloned.get(&1), Some(&"one".to_string()));
    }

    #[test]
    fn test_debug_output() {
        let mut map = HashMap::new();
        map.insert(1, "a");
        let repr = format!("{map:?}");
        assert!(repr.contains("1"));
        assert!(repr.contains("a"));
    }
}
