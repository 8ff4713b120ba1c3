#![allow(dead_code)]

// Shared helpers for integration tests: integer keys with an identity hash.

use chain_hashmap::{ChainHashMap, FnKeys};

pub type IntHash = fn(&i32) -> u64;
pub type IntEquals = fn(&i32, &i32) -> bool;
pub type IntMap<V> = ChainHashMap<i32, V, FnKeys<IntHash, IntEquals>>;

pub fn int_hash(k: &i32) -> u64 {
    *k as u64
}

pub fn int_equals(a: &i32, b: &i32) -> bool {
    a == b
}

pub fn int_map<V>() -> IntMap<V> {
    ChainHashMap::with_key_fns(int_hash as IntHash, int_equals as IntEquals)
}

/// Insert a key that must not be present yet.
pub fn insert_unique<V>(map: &mut IntMap<V>, key: i32, value: V) {
    if map.insert(key, value).is_some() {
        panic!("key {key} was already present");
    }
}
