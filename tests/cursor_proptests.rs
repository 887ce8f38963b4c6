// CursorMut property tests.
//
// Property: a traversal that removes an arbitrary subset of entries, with
// arbitrary extra `has_next` lookaheads and stray `remove` calls mixed in,
// visits every entry exactly once and leaves exactly the unselected
// entries behind.
//  - Model: std HashMap built from the same inserts.
//  - Per step: `remove` succeeds only directly after `next`; a stray
//    `remove` fails with InvalidState and changes nothing.
//  - Final: len and contents equal the model minus the removed keys.
use chained_hashmap::{HashTable, IterError, TableConfig};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Copy, Debug)]
struct Step {
    remove: bool,
    lookahead: bool,
    stray_remove: bool,
}

fn arb_step() -> impl Strategy<Value = Step> {
    (any::<bool>(), any::<bool>(), prop::bool::weighted(0.1)).prop_map(
        |(remove, lookahead, stray_remove)| Step {
            remove,
            lookahead,
            stray_remove,
        },
    )
}

fn check(
    mut sut: HashTable<u16, u32>,
    keys: Vec<u16>,
    steps: Vec<Step>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<u16, u32> = HashMap::new();
    for (i, k) in keys.into_iter().enumerate() {
        sut.put(k, i as u32);
        model.insert(k, i as u32);
    }
    let total = model.len();

    let mut visited = BTreeSet::new();
    let mut removed = BTreeSet::new();
    {
        let mut c = sut.cursor_mut();
        let mut i = 0;
        while c.has_next() {
            let step = steps[i % steps.len()];
            i += 1;
            let (k, v) = c.next().expect("has_next promised an entry");
            let k = *k;
            prop_assert_eq!(model.get(&k), Some(&*v));
            prop_assert!(visited.insert(k), "key {} visited twice", k);
            if step.lookahead {
                let _ = c.has_next();
            }
            if step.remove {
                let (rk, _) = c.remove().expect("remove right after next");
                prop_assert_eq!(rk, k);
                removed.insert(k);
                if step.stray_remove {
                    prop_assert_eq!(c.remove(), Err(IterError::InvalidState));
                }
            }
        }
        prop_assert_eq!(c.next().err(), Some(IterError::Exhausted));
    }

    prop_assert_eq!(visited.len(), total);
    prop_assert_eq!(sut.len(), total - removed.len());
    for (k, v) in &model {
        if removed.contains(k) {
            prop_assert!(!sut.contains_key(k));
        } else {
            prop_assert_eq!(sut.get(k), Some(v));
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_cursor_removal_default_table(
        keys in proptest::collection::vec(any::<u16>(), 0..200),
        steps in proptest::collection::vec(arb_step(), 1..32),
    ) {
        check(HashTable::new(), keys, steps)?;
    }

    #[test]
    fn prop_cursor_removal_few_buckets(
        keys in proptest::collection::vec(0u16..64, 0..100),
        steps in proptest::collection::vec(arb_step(), 1..32),
    ) {
        let sut = HashTable::with_config(
            TableConfig::new().with_initial_capacity(3).with_load_factor(8.0),
        ).unwrap();
        check(sut, keys, steps)?;
    }
}
