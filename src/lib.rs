//! chain-hashmap: a single-threaded, separate-chaining hash table whose
//! hashing and equality come from the caller.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a dictionary building block that does not commit to key or
//!   value types and never interprets keys beyond the caller's hash and
//!   equality functions.
//! - Layers:
//!   - `chain`: singly-linked collision chains threaded through a
//!     `slotmap` node arena (push-front, remove-by-node, traversal).
//!   - `KeyOps`: the hash/equality capability. `FnKeys` wraps two
//!     closures; `StdKeys<S>` uses `K: Hash + Eq` with a `BuildHasher`.
//!   - `ChainHashMap<K, V, O>`: bucket array, growth policy and the
//!     insert/lookup/remove algorithms.
//!
//! Constraints
//! - Single-threaded: the map is `!Sync`; it carries no locks.
//! - No allocation before the first insert. The first insert allocates
//!   `INITIAL_BUCKETS` (8) buckets; an insert that finds `len >= capacity`
//!   doubles the array first. The array never shrinks.
//! - Bucket of an entry is `hash & (capacity - 1)`, for the current
//!   capacity, for every entry, at every point between operations.
//! - Lookups and removals on a map that has never been inserted into return
//!   `None` without hashing.
//!
//! Ownership
//! - Keys and values are moved into the map on insert and moved back out:
//!   a replacing `insert` returns the previous value (the first key is kept),
//!   `remove` returns the stored `(K, V)`, and `delete_with` hands every
//!   surviving key and value to caller destructors. Dropping the map drops
//!   whatever it still holds.
//!
//! Hashing and rehashing
//! - Each node stores the hash computed at insertion. Growth relinks nodes
//!   using the stored hash only, so no user code runs while the table is
//!   being rebuilt, and equality is only consulted when hashes match.
//! - Growth splits each old chain into its two destination chains and keeps
//!   the relative order inside each. No order across chains is defined.
//!
//! Failure
//! - Absence is `None`. Failing to allocate (or overflowing) the next bucket
//!   array aborts the process from `insert`; `try_insert` returns it as a
//!   `TryInsertError` and leaves the map untouched.
//! - A debug-only reentrancy guard panics if a hash or equality function
//!   re-enters the map it is serving.

mod chain;
pub mod chain_hash_map;
mod chain_hash_map_proptest;
pub mod error;
pub mod key_ops;
mod reentrancy;

// Public surface
pub use chain_hash_map::{ChainHashMap, INITIAL_BUCKETS};
pub use error::{GrowError, TryInsertError};
pub use key_ops::{FnKeys, KeyOps, StdKeys};
