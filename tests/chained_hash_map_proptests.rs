// ChainedHashMap property tests against the public API.
//
// Property 1: distinct-key count and load factor bound.
//  - Model: std HashMap receiving the same inserts/erases.
//  - Invariant: len() == model.len(); load_factor() <= max after inserts.
//  - Operations: insert_or_assign, get_or_insert_default, erase.
//
// Property 2: rehash correctness.
//  - Insert a batch of distinct keys large enough to force doublings.
//  - Invariant: every key resolves to its value via get and at.
use chain_hashmap::{ChainedHashMap, KeyNotFound};
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    #[test]
    fn prop_len_and_load_factor(
        ops in proptest::collection::vec(
            (0u8..=2u8, 0u16..200u16, any::<i64>()),
            1..400,
        )
    ) {
        let mut m: ChainedHashMap<u16, i64> = ChainedHashMap::new();
        let mut model: HashMap<u16, i64> = HashMap::new();

        for (op, k, v) in ops {
            match op {
                0 => {
                    let fresh = m.insert_or_assign(k, v);
                    prop_assert_eq!(fresh, model.insert(k, v).is_none());
                    prop_assert!(m.load_factor() <= m.max_load_factor());
                }
                1 => {
                    let got = *m.get_or_insert_default(k);
                    prop_assert_eq!(got, *model.entry(k).or_default());
                    prop_assert!(m.load_factor() <= m.max_load_factor());
                }
                2 => {
                    prop_assert_eq!(m.erase(&k), model.remove(&k).is_some());
                    prop_assert_eq!(m.at(&k), Err(KeyNotFound));
                    prop_assert_eq!(m.get(&k), None);
                }
                _ => unreachable!(),
            }
            prop_assert_eq!(m.len(), model.len());
        }

        prop_assert_eq!(m.iter().count(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(m.get(k), Some(*v));
        }
    }
}

proptest! {
    #[test]
    fn prop_rehash_keeps_entries(keys in proptest::collection::hash_set("[a-z0-9]{1,12}", 1..300)) {
        let mut m: ChainedHashMap<String, usize> = ChainedHashMap::new();
        let keys: Vec<String> = keys.into_iter().collect();
        for (i, k) in keys.iter().enumerate() {
            prop_assert!(m.insert_or_assign(k.clone(), i));
        }
        prop_assert_eq!(m.len(), keys.len());
        prop_assert!(m.load_factor() <= 0.75);
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(m.get(k.as_str()), Some(i));
            prop_assert_eq!(m.at(k.as_str()), Ok(&i));
        }
    }
}
