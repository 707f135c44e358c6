#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can
// inspect the bucket table directly.

use crate::chained_hash_map::ChainedHashMap;
use crate::config::MapConfig;
use crate::error::KeyNotFound;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

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

// Pool-indexed operations: indices shrink to earlier keys, pool length
// shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Default(usize),
    Erase(usize),
    Get(usize),
    At(usize),
    Contains(String),
    Mutate(usize, i32),
    Clear,
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::Default),
            3 => idx.clone().prop_map(OpI::Erase),
            2 => idx.clone().prop_map(OpI::Get),
            1 => idx.clone().prop_map(OpI::At),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Structural invariants of the bucket table:
// - `len` equals the sum of bucket lengths.
// - Every entry sits in `hash(key) % bucket_count`.
// - No key appears twice.
// - The bucket count is the initial count times a power of two.
fn check_table<S: BuildHasher>(sut: &ChainedHashMap<Key, i32, S>) -> Result<(), TestCaseError> {
    let mut seen = BTreeSet::new();
    let mut total = 0;
    for (index, bucket) in sut.buckets.iter().enumerate() {
        for e in bucket {
            prop_assert_eq!(sut.bucket_index(&e.key), index);
            prop_assert!(seen.insert(e.key.clone()), "duplicate key {:?}", e.key);
        }
        total += bucket.len();
    }
    prop_assert_eq!(total, sut.len());

    let ratio = sut.bucket_count() / sut.config().initial_buckets();
    prop_assert_eq!(sut.bucket_count() % sut.config().initial_buckets(), 0);
    prop_assert!(ratio.is_power_of_two());
    Ok(())
}

// State-machine equivalence against std::collections::HashMap:
// - insert_or_assign/get_or_insert_default report new keys exactly when the
//   model lacks them, and the load factor bound holds right after.
// - get/at/contains agree with the model; at reports KeyNotFound on absence.
// - erase returns the model's presence and never changes the bucket count.
// - clear restores the initial bucket count.
fn run_scenario<S: BuildHasher>(
    mut sut: ChainedHashMap<Key, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    let max = sut.max_load_factor();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(pool, i);
                let fresh = sut.insert_or_assign(k.clone(), v);
                prop_assert_eq!(fresh, model.insert(k, v).is_none());
                prop_assert!(sut.load_factor() <= max);
            }
            OpI::Default(i) => {
                let k = key_from(pool, i);
                let v = *sut.get_or_insert_default(k.clone());
                let mv = *model.entry(k).or_default();
                prop_assert_eq!(v, mv);
                prop_assert!(sut.load_factor() <= max);
            }
            OpI::Erase(i) => {
                let k = key_from(pool, i);
                let buckets = sut.bucket_count();
                prop_assert_eq!(sut.erase(&k), model.remove(&k).is_some());
                prop_assert!(!sut.contains(&k));
                prop_assert!(!sut.erase(&k), "second erase must report absence");
                prop_assert_eq!(sut.bucket_count(), buckets);
            }
            OpI::Get(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.get(&k), model.get(&k).copied());
            }
            OpI::At(i) => {
                let k = key_from(pool, i);
                match model.get(&k) {
                    Some(mv) => prop_assert_eq!(sut.at(&k), Ok(mv)),
                    None => prop_assert_eq!(sut.at(&k), Err(KeyNotFound)),
                }
            }
            OpI::Contains(s) => {
                let has = sut.contains(s.as_str());
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                match (sut.at_mut(&k), model.get_mut(&k)) {
                    (Ok(v), Some(mv)) => {
                        *v = v.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (Err(KeyNotFound), None) => {}
                    (s, m) => prop_assert!(false, "at_mut {:?} disagrees with model {:?}", s, m),
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.bucket_count(), sut.config().initial_buckets());
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<_> = sut.iter().map(|(k, _)| k.clone()).collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        // Post-conditions after each op
        check_table(&sut)?;
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }

    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(*v));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(ChainedHashMap::new(), &pool, ops)?;
    }

    // Same scenarios under a custom sizing policy.
    #[test]
    fn prop_state_machine_custom_config(
        (pool, ops) in arb_scenario(),
        initial in 1usize..=5,
        max in 0.25f64..3.0,
    ) {
        let config = MapConfig::new(initial, max).unwrap();
        run_scenario(ChainedHashMap::with_config(config), &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress chain scanning.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(ChainedHashMap::with_hasher(ConstBuildHasher), &pool, ops)?;
    }
}
