//! Hashing and equality for map keys.
//!
//! `ChainHashMap` never hashes or compares keys on its own; it asks its
//! `KeyOps`. Two providers ship with the crate: `FnKeys` wraps a pair of
//! caller closures, `StdKeys` defers to `K: Hash + Eq` through a
//! `BuildHasher`.

use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Hash and equality over keys of type `Q`.
///
/// Implementations must keep `equals(a, b)` an equivalence relation and
/// must return equal hashes for equal keys. The map does not check either;
/// violating them gives wrong answers, never memory unsafety.
///
/// A map over `K` needs `KeyOps<K>`. Lookups through a borrowed form `Q`
/// (`K: Borrow<Q>`) additionally need `KeyOps<Q>`, and the two must hash a
/// key and its borrowed form identically.
pub trait KeyOps<Q: ?Sized> {
    fn hash(&self, key: &Q) -> u64;
    fn equals(&self, a: &Q, b: &Q) -> bool;
}

/// Caller-supplied hash and equality closures.
#[derive(Clone, Copy)]
pub struct FnKeys<H, E> {
    hash: H,
    equals: E,
}

impl<H, E> FnKeys<H, E> {
    pub fn new(hash: H, equals: E) -> Self {
        Self { hash, equals }
    }
}

impl<H, E> fmt::Debug for FnKeys<H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnKeys").finish_non_exhaustive()
    }
}

impl<Q, H, E> KeyOps<Q> for FnKeys<H, E>
where
    Q: ?Sized,
    H: Fn(&Q) -> u64,
    E: Fn(&Q, &Q) -> bool,
{
    #[inline]
    fn hash(&self, key: &Q) -> u64 {
        (self.hash)(key)
    }

    #[inline]
    fn equals(&self, a: &Q, b: &Q) -> bool {
        (self.equals)(a, b)
    }
}

/// `Hash + Eq` keys hashed with a `BuildHasher`.
#[derive(Clone, Debug, Default)]
pub struct StdKeys<S = DefaultHashBuilder> {
    hasher: S,
}

impl<S> StdKeys<S> {
    pub fn new(hasher: S) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<Q, S> KeyOps<Q> for StdKeys<S>
where
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &Q) -> u64 {
        self.hasher.hash_one(key)
    }

    #[inline]
    fn equals(&self, a: &Q, b: &Q) -> bool {
        a == b
    }
}
