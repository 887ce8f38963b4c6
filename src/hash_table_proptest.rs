#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can inspect
// chain layout through the crate-private bucket store.

use crate::hash_table::HashTable;
use crate::TableConfig;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations: indices shrink to earlier keys, the pool shrinks,
// and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    // Walk with a cursor, removing entries whose value has this low bit.
    CursorRemove(bool),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Put(i, v)),
            2 => idx.clone().prop_map(Op::Remove),
            2 => idx.clone().prop_map(Op::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(Op::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => any::<bool>().prop_map(Op::CursorRemove),
            1 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap.
// Invariants exercised after every op:
// - `put` returns the previous value exactly when the model had one.
// - `get`/`contains_key` parity, including borrowed `&str` lookups.
// - `remove` returns the model's value once, then `None`.
// - Cursor removal deletes exactly the selected entries and visits each
//   live entry once.
// - `len` equals the model size and the number of entries reachable by
//   walking every chain; no key appears twice.
fn run(
    mut sut: HashTable<Key, i32>,
    pool: Vec<String>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    let key = |i: usize| Key(pool[i].clone());

    for op in ops {
        match op {
            Op::Put(i, v) => {
                let k = key(i);
                prop_assert_eq!(sut.put(k.clone(), v), model.insert(k, v));
            }
            Op::Remove(i) => {
                let k = key(i);
                prop_assert_eq!(sut.remove(&k), model.remove(&k));
                prop_assert_eq!(sut.remove(&k), None);
            }
            Op::Get(i) => {
                let k = key(i);
                prop_assert_eq!(sut.get(&k), model.get(&k));
                prop_assert_eq!(sut.get(k.0.as_str()), model.get(&k));
            }
            Op::Contains(s) => {
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains_key(s.as_str()), has_model);
            }
            Op::Mutate(i, d) => {
                let k = key(i);
                if let Some(v) = sut.get_mut(&k) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(&k) {
                    *v = v.wrapping_add(d);
                }
            }
            Op::CursorRemove(odd) => {
                let before = model.len();
                let mut visited: BTreeMap<Key, i32> = BTreeMap::new();
                {
                    let mut c = sut.cursor_mut();
                    while let Ok((k, v)) = c.next() {
                        prop_assert!(visited.insert(k.clone(), *v).is_none(), "visited twice");
                        if (*v & 1 == 1) == odd {
                            let (rk, _) = c.remove().expect("entry just returned");
                            prop_assert!(c.remove().is_err());
                            model.remove(&rk);
                        }
                    }
                }
                prop_assert_eq!(visited.len(), before);
            }
            Op::Iterate => {
                let s: BTreeMap<Key, i32> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                let m: BTreeMap<Key, i32> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(s, m);
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        let mut reachable = 0;
        for b in 0..sut.buckets.capacity() {
            for k in sut.buckets.chain(b) {
                prop_assert!(model.contains_key(k), "stale key {:?} in chain", k);
                reachable += 1;
            }
        }
        prop_assert_eq!(reachable, model.len());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(HashTable::new(), pool, ops)?;
    }
}

// Same invariants starting from a single bucket with the default growth
// policy: every early insert collides and growth runs many times.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_growing_from_one_bucket((pool, ops) in arb_scenario()) {
        run(HashTable::with_capacity(1), pool, ops)?;
    }
}

// Worst case: one bucket that never grows, so every key shares a chain and
// every removal exercises head/middle/tail unlinking.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_single_chain((pool, ops) in arb_scenario()) {
        let sut = HashTable::with_config(
            TableConfig::new().with_initial_capacity(1).with_load_factor(1e9),
        ).unwrap();
        run(sut, pool, ops)?;
    }
}
