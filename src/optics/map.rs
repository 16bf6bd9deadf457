//! The lens on the value under a fixed map key.
//!
//! [`map_value`] reads the value for its key, or `None` when the key is
//! absent. Modifying only ever replaces the value of a key that is already
//! present: an absent key stays absent, and a function returning `None`
//! leaves the current value in place. The lens never grows or shrinks a map.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use fieldlens::optics::{map_value, Lens, Setter};
//!
//! let stock = HashMap::from([("bolt", 3)]);
//!
//! let bolts = map_value("bolt");
//! assert_eq!(bolts.get(&stock), Some(3));
//! let stock = bolts.modify(stock, |count: Option<i32>| count.map(|n| n + 1));
//! assert_eq!(stock["bolt"], 4);
//!
//! let nuts = map_value("nut");
//! let stock = nuts.set(stock, Some(10));
//! assert!(!stock.contains_key("nut"));
//! ```

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use super::{Lens, Setter};

/// A map that can look up and update values by key.
pub trait KeyedMap<K, V> {
    /// Returns the value for `key`, if present.
    fn value(&self, key: &K) -> Option<&V>;

    /// Returns a mutable reference to the value for `key`, if present.
    fn value_mut(&mut self, key: &K) -> Option<&mut V>;
}

impl<K, V, Q, H> KeyedMap<Q, V> for HashMap<K, V, H>
where
    K: Borrow<Q> + Eq + Hash,
    Q: Eq + Hash,
    H: BuildHasher,
{
    fn value(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }

    fn value_mut(&mut self, key: &Q) -> Option<&mut V> {
        self.get_mut(key)
    }
}

impl<K, V, Q> KeyedMap<Q, V> for BTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord,
{
    fn value(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }

    fn value_mut(&mut self, key: &Q) -> Option<&mut V> {
        self.get_mut(key)
    }
}

/// The lens on the value under one key of a map `M`.
pub struct MapValueLens<M, K, V> {
    key: K,
    _marker: PhantomData<fn(M) -> (M, V)>,
}

/// Returns the lens on the value under `key`.
#[must_use]
pub const fn map_value<M, K, V>(key: K) -> MapValueLens<M, K, V>
where
    M: KeyedMap<K, V>,
{
    MapValueLens {
        key,
        _marker: PhantomData,
    }
}

impl<M, K, V> MapValueLens<M, K, V> {
    /// Returns the key this lens focuses on.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }
}

impl<M, K, V> Setter<M, Option<V>> for MapValueLens<M, K, V>
where
    M: KeyedMap<K, V>,
    V: Clone,
{
    fn modify<F>(&self, source: M, mut function: F) -> M
    where
        F: FnMut(Option<V>) -> Option<V>,
    {
        let mut map = source;
        if let Some(slot) = map.value_mut(&self.key)
            && let Some(replacement) = function(Some(slot.clone()))
        {
            *slot = replacement;
        }
        map
    }
}

impl<M, K, V> Lens<M, Option<V>> for MapValueLens<M, K, V>
where
    M: KeyedMap<K, V>,
    V: Clone,
{
    fn get(&self, source: &M) -> Option<V> {
        source.value(&self.key).cloned()
    }
}

impl<M, K: Clone, V> Clone for MapValueLens<M, K, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<M, K: fmt::Debug, V> fmt::Debug for MapValueLens<M, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MapValueLens")
            .field("key", &self.key)
            .finish()
    }
}
