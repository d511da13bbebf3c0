use core::any::TypeId;
use core::fmt::{self, Debug};
use core::hash::{BuildHasher, Hash};
use std::sync::{PoisonError, RwLock};

use hashbrown::hash_map::Entry;
use hashbrown::{Equivalent, HashMap};

use crate::hash::{FixedHashState, NoOpHashState};

// -----------------------------------------------------------------------------
// InstallOnceMap

/// A read-mostly concurrent map where each key is computed at most
/// once per winner: the first install of a key is the one every
/// caller observes afterwards.
///
/// Builders run outside the lock, so concurrent first use of unrelated
/// keys never blocks on a build. Two callers racing on the same key may
/// both build; only the first install is kept and the loser receives the
/// winner's value.
///
/// Values are handed out by clone, so `V` is usually an `Arc`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use jb_utils::InstallOnceMap;
///
/// let map: InstallOnceMap<&str, Arc<usize>> = InstallOnceMap::new();
/// let a = map.get_or_install_with("len", || Ok::<_, ()>(Arc::new(3))).unwrap();
/// let b = map.get_or_install_with("len", || Ok::<_, ()>(Arc::new(4))).unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct InstallOnceMap<K, V, S = FixedHashState> {
    map: RwLock<HashMap<K, V, S>>,
}

/// An [`InstallOnceMap`] keyed by [`TypeId`].
pub type TypeIdOnceMap<V> = InstallOnceMap<TypeId, V, NoOpHashState>;

impl<K, V, S: Default> InstallOnceMap<K, V, S> {
    /// Creates an empty map.
    #[inline]
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> InstallOnceMap<K, V, S> {
    /// Creates an empty map with the given hash state.
    #[inline]
    pub const fn with_hasher(hasher: S) -> Self {
        Self {
            map: RwLock::new(HashMap::with_hasher(hasher)),
        }
    }

    /// Returns the number of installed entries.
    pub fn len(&self) -> usize {
        self.map.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if nothing has been installed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every installed entry.
    ///
    /// Values already handed out stay alive in their holders.
    pub fn clear(&self) {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<K: Eq + Hash, V: Clone, S: BuildHasher> InstallOnceMap<K, V, S> {
    /// Returns a clone of the installed value.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Installs `value` unless the key is already present.
    ///
    /// Returns the value that ended up in the map, which is the existing
    /// one if another caller installed first.
    pub fn install(&self, key: K, value: V) -> V {
        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        match map.entry(key) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => entry.insert(value).clone(),
        }
    }

    /// Returns the installed value, building and installing it on first use.
    ///
    /// A failed build installs nothing, so a later call will retry.
    pub fn get_or_install_with<E>(
        &self,
        key: K,
        build: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = build()?;
        Ok(self.install(key, value))
    }

    /// Removes one entry, returning it.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }
}

impl<K, V, S: Default> Default for InstallOnceMap<K, V, S> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Debug for InstallOnceMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstallOnceMap")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::InstallOnceMap;

    #[test]
    fn failed_build_is_not_installed() {
        let map: InstallOnceMap<u32, Arc<str>> = InstallOnceMap::new();
        let err = map.get_or_install_with(1, || Err::<Arc<str>, _>("boom"));
        assert_eq!(err, Err("boom"));
        assert!(map.is_empty());

        let ok = map.get_or_install_with(1, || Ok::<_, &str>(Arc::from("one")));
        assert_eq!(ok.as_deref(), Ok("one"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn first_install_wins() {
        let map: InstallOnceMap<u32, Arc<u32>> = InstallOnceMap::new();
        let first = map.install(7, Arc::new(1));
        let second = map.install(7, Arc::new(2));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, 1);
    }

    #[test]
    fn concurrent_callers_observe_one_value() {
        let map: Arc<InstallOnceMap<&'static str, Arc<usize>>> = Arc::new(InstallOnceMap::new());
        let builds = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let map = Arc::clone(&map);
                let builds = Arc::clone(&builds);
                thread::spawn(move || {
                    map.get_or_install_with("key", || {
                        builds.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, ()>(Arc::new(i))
                    })
                    .unwrap()
                })
            })
            .collect();

        let values: Vec<Arc<usize>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winner = map.get("key").unwrap();
        assert!(values.iter().all(|v| Arc::ptr_eq(v, &winner)));
        assert!(builds.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn clear_and_remove() {
        let map: InstallOnceMap<u8, u8> = InstallOnceMap::new();
        map.install(1, 10);
        map.install(2, 20);
        assert_eq!(map.remove(&1), Some(10));
        map.clear();
        assert!(map.get(&2).is_none());
    }
}
