#![cfg(test)]

// Property tests for ChainHashMap kept inside the crate so they can check
// bucket placement through test-only hooks.

use crate::chain_hash_map::ChainHashMap;
use crate::key_ops::{KeyOps, StdKeys};
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            1 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}".prop_map(|s| s)].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Replays `ops` against `sut` and a std HashMap model, checking after each
// op that answers agree and that every entry sits in its hash's bucket.
fn run_model<O>(
    mut sut: ChainHashMap<String, i32, O>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError>
where
    O: KeyOps<String> + KeyOps<str>,
{
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut last_capacity = 0usize;

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i].clone();
                let expected = model.insert(k.clone(), v);
                prop_assert_eq!(sut.insert(k, v), expected);
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let expected = model.remove_entry(k);
                prop_assert_eq!(sut.remove(k.as_str()), expected);
                prop_assert!(sut.get(k.as_str()).is_none());
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k.as_str()), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k.as_str()), model.get_mut(k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "get_mut disagreement: {:?} vs {:?}", s, m),
                }
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        let cap = sut.capacity();
        prop_assert!(cap >= last_capacity, "bucket array never shrinks");
        prop_assert!(cap == 0 || (cap >= 8 && cap.is_power_of_two()));
        last_capacity = cap;
        sut.assert_placement();
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap with
// the default `StdKeys` hashing.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let sut: ChainHashMap<String, i32> = ChainHashMap::new();
        run_model(sut, &pool, ops)?;
    }
}

// Weak hash: length only, so most keys share a chain.
#[derive(Clone, Copy, Debug, Default)]
struct LenKeys;
impl KeyOps<String> for LenKeys {
    fn hash(&self, key: &String) -> u64 {
        KeyOps::<str>::hash(self, key.as_str())
    }
    fn equals(&self, a: &String, b: &String) -> bool {
        a == b
    }
}
impl KeyOps<str> for LenKeys {
    fn hash(&self, key: &str) -> u64 {
        key.len() as u64
    }
    fn equals(&self, a: &str, b: &str) -> bool {
        a == b
    }
}

// Property: Same state-machine invariants as above under heavy collisions,
// which stresses chain removal from every position.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut: ChainHashMap<String, i32, LenKeys> = ChainHashMap::with_key_ops(LenKeys);
        run_model(sut, &pool, ops)?;
    }
}

// Property: closure-supplied key operations behave like `StdKeys`.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_fn_keys_match_std_keys(keys in proptest::collection::vec(any::<u16>(), 0..200)) {
        let mut by_fns = ChainHashMap::<u16, usize, _>::with_key_fns(
            |k: &u16| u64::from(*k).wrapping_mul(0x9e37_79b9_7f4a_7c15),
            |a: &u16, b: &u16| a == b,
        );
        let mut by_std: ChainHashMap<u16, usize, StdKeys> = ChainHashMap::new();
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(by_fns.insert(*k, i), by_std.insert(*k, i));
        }
        prop_assert_eq!(by_fns.len(), by_std.len());
        prop_assert_eq!(by_fns.capacity(), by_std.capacity());
        for k in &keys {
            prop_assert_eq!(by_fns.get(k), by_std.get(k));
        }
        by_fns.assert_placement();
        by_std.assert_placement();
    }
}
