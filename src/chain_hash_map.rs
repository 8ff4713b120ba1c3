//! ChainHashMap: separate-chaining hash table with caller-supplied key operations.

use crate::chain::{Chain, Node, NodeId, Nodes};
use crate::error::{GrowError, TryInsertError};
use crate::key_ops::{FnKeys, KeyOps, StdKeys};
use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use log::{error, trace};
use slotmap::SlotMap;

/// Bucket count of the first allocation. Every later growth doubles it.
pub const INITIAL_BUCKETS: usize = 8;

/// Hash table mapping `K` to `V` with one collision chain per bucket.
///
/// The bucket array is empty until the first insert, then holds
/// `INITIAL_BUCKETS` chains and doubles whenever an insert finds
/// `len() >= capacity()`. Buckets are picked by masking the key hash with
/// `capacity() - 1`. The array never shrinks.
///
/// Keys and values are moved in by `insert` and moved back out by `insert`
/// (the replaced value), `remove` (the stored pair) and `delete_with`.
pub struct ChainHashMap<K, V, O = StdKeys> {
    ops: O,
    buckets: Vec<Chain>,
    nodes: Nodes<K, V>, // node storage; chains link through it
    reentrancy: DebugReentrancy,
}

impl<K, V> ChainHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_key_ops(StdKeys::default())
    }
}

impl<K, V> Default for ChainHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainHashMap<K, V, StdKeys<S>>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_key_ops(StdKeys::new(hasher))
    }
}

impl<K, V, H, E> ChainHashMap<K, V, FnKeys<H, E>>
where
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    /// Map whose keys are hashed by `hash` and compared by `equals`.
    /// `equals(a, b)` must imply `hash(a) == hash(b)`.
    pub fn with_key_fns(hash: H, equals: E) -> Self {
        Self::with_key_ops(FnKeys::new(hash, equals))
    }
}

impl<K, V, O> ChainHashMap<K, V, O> {
    /// Does not allocate; buckets are created by the first insert.
    pub fn with_key_ops(ops: O) -> Self {
        Self {
            ops,
            buckets: Vec::new(),
            nodes: SlotMap::with_key(),
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current bucket count: 0 before the first insert, then a power of two.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// log2 of `capacity()`, or `None` while no buckets are allocated.
    pub fn bucket_count_log2(&self) -> Option<u32> {
        match self.buckets.len() {
            0 => None,
            n => Some(n.trailing_zeros()),
        }
    }

    pub fn key_ops(&self) -> &O {
        &self.ops
    }

    /// Tear the map down, handing every stored key to `key_destructor` and
    /// then its value to `value_destructor`, bucket by bucket in chain
    /// order. Neither destructor runs when the map is empty.
    pub fn delete_with<KD, VD>(self, mut key_destructor: KD, mut value_destructor: VD)
    where
        KD: FnMut(K),
        VD: FnMut(V),
    {
        let Self {
            mut buckets,
            mut nodes,
            ..
        } = self;
        let mut destroyed = 0usize;
        for chain in buckets.iter_mut() {
            while let Some(node) = chain.pop_front(&mut nodes) {
                let (key, value) = node.into_parts();
                key_destructor(key);
                value_destructor(value);
                destroyed += 1;
            }
        }
        debug_assert!(nodes.is_empty() && buckets.iter().all(Chain::is_empty));
        trace!(
            "ChainHashMap teardown: {} entries destroyed across {} buckets",
            destroyed,
            buckets.len()
        );
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> Option<usize> {
        match self.buckets.len() {
            0 => None,
            n => Some((hash as usize) & (n - 1)),
        }
    }

    /// Replace `buckets` with one twice as large (or `INITIAL_BUCKETS`) and
    /// relink every node into it. The new array is fully allocated before
    /// any node moves, so on error nothing has changed.
    fn grow(buckets: &mut Vec<Chain>, nodes: &mut Nodes<K, V>) -> Result<(), GrowError> {
        let old_len = buckets.len();
        let new_len = next_bucket_count(old_len)?;

        let mut fresh: Vec<Chain> = Vec::new();
        fresh
            .try_reserve_exact(new_len)
            .map_err(|source| GrowError::AllocFailed {
                buckets: new_len,
                source,
            })?;
        fresh.resize(new_len, Chain::EMPTY);

        // Bucket `i` under the old mask lands in `i` or `i + old_len` under
        // the new one, depending on hash bit `old_len`.
        let mask = new_len - 1;
        for (i, chain) in buckets.iter().enumerate() {
            let (lo, hi) = chain.split(nodes, |n| {
                debug_assert_eq!((n.hash as usize) & (old_len - 1), i);
                (n.hash as usize) & mask != i
            });
            fresh[i] = lo;
            fresh[i + old_len] = hi;
        }

        trace!(
            "ChainHashMap grow: {} -> {} buckets, {} entries relinked",
            old_len,
            new_len,
            nodes.len()
        );
        *buckets = fresh;
        Ok(())
    }
}

fn next_bucket_count(current: usize) -> Result<usize, GrowError> {
    if current == 0 {
        return Ok(INITIAL_BUCKETS);
    }
    current
        .checked_mul(2)
        .ok_or(GrowError::CapacityOverflow { buckets: current })
}

impl<K, V, O> ChainHashMap<K, V, O>
where
    O: KeyOps<K>,
{
    fn find_node<Q>(&self, q: &Q) -> Option<(usize, NodeId)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        // Never hash or mask against an unallocated table.
        if self.buckets.is_empty() {
            return None;
        }
        let hash = KeyOps::<Q>::hash(&self.ops, q);
        let idx = self.bucket_index(hash)?;
        self.buckets[idx]
            .find(&self.nodes, |n| {
                n.hash == hash && KeyOps::<Q>::equals(&self.ops, n.key.borrow(), q)
            })
            .map(|id| (idx, id))
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let _g = self.reentrancy.enter();
        let (_, id) = self.find_node(key)?;
        self.nodes.get(id).map(|n| &n.value)
    }

    /// Like `get`, but also returns the stored key, which is the key from
    /// the first insert of this entry.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let _g = self.reentrancy.enter();
        let (_, id) = self.find_node(key)?;
        self.nodes.get(id).map(|n| (&n.key, &n.value))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let _g = self.reentrancy.enter();
        let (_, id) = self.find_node(key)?;
        self.nodes.get_mut(id).map(|n| &mut n.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let _g = self.reentrancy.enter();
        self.find_node(key).is_some()
    }

    /// Insert `key -> value`. If an equal key is already stored, only its
    /// value is replaced and the previous value is returned; the stored key
    /// is kept and `key` is dropped.
    ///
    /// Failing to grow the bucket array is unrecoverable here: the error is
    /// logged and the process aborts. Use `try_insert` to handle it.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.try_insert(key, value) {
            Ok(previous) => previous,
            Err(e) => {
                error!("ChainHashMap: {}; aborting", e.error);
                std::process::abort();
            }
        }
    }

    /// `insert` that reports growth failure instead of aborting. On error
    /// the map is exactly as it was and `key`/`value` come back inside the
    /// error. Node storage itself is still allocated infallibly.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, TryInsertError<K, V>> {
        let _g = self.reentrancy.enter();
        if self.nodes.len() >= self.buckets.len() {
            if let Err(error) = Self::grow(&mut self.buckets, &mut self.nodes) {
                return Err(TryInsertError { error, key, value });
            }
        }

        let hash = KeyOps::<K>::hash(&self.ops, &key);
        let idx = (hash as usize) & (self.buckets.len() - 1);
        let ops = &self.ops;
        let chain = &mut self.buckets[idx];
        if let Some(id) = chain.find(&self.nodes, |n| {
            n.hash == hash && KeyOps::<K>::equals(ops, &key, &n.key)
        }) {
            let node = &mut self.nodes[id];
            return Ok(Some(core::mem::replace(&mut node.value, value)));
        }

        chain.push_front(&mut self.nodes, Node::new(key, value, hash));
        Ok(None)
    }

    /// Remove the entry for `key`, returning the stored key and value.
    #[must_use = "the removed key and value are handed back to the caller"]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let _g = self.reentrancy.enter();
        let (idx, id) = self.find_node(key)?;
        self.buckets[idx]
            .remove(&mut self.nodes, id)
            .map(Node::into_parts)
    }

    /// Panics unless every node sits in the bucket its stored hash selects
    /// and `len() <= capacity()`.
    #[cfg(test)]
    pub(crate) fn assert_placement(&self) {
        assert!(self.len() <= self.capacity());
        let mut linked = 0usize;
        for (i, chain) in self.buckets.iter().enumerate() {
            for (_, n) in chain.iter(&self.nodes) {
                assert_eq!(self.bucket_index(n.hash), Some(i));
                assert_eq!(n.hash, KeyOps::<K>::hash(&self.ops, &n.key));
                linked += 1;
            }
        }
        assert_eq!(linked, self.len(), "every node is linked exactly once");
    }

    #[cfg(test)]
    pub(crate) fn chain_keys(&self, bucket: usize) -> Vec<&K> {
        self.buckets[bucket]
            .iter(&self.nodes)
            .map(|(_, n)| &n.key)
            .collect()
    }
}
