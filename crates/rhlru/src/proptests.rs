use super::*;

use proptest::prelude::*;
use std::hash::{BuildHasher, BuildHasherDefault, Hasher};

/// Hasher with only eight distinct outputs, forcing long probe runs
#[derive(Default)]
struct CollidingHasher(u64);

impl Hasher for CollidingHasher {
    fn finish(&self) -> u64 {
        self.0 & 0x7
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 = self.0.wrapping_mul(31).wrapping_add(u64::from(*b));
        }
    }
}

#[derive(Debug, Clone)]
enum Op {
    Put(u8, u16),
    PutWithEvicted(u8, u16),
    Get(u8),
    Peek(u8),
    Update(u8, u16),
    Remove(u8),
    Pop(u8),
    GrowCapacity(u8),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let key = 0u8..48;
    prop_oneof![
        6 => (key.clone(), any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
        3 => (key.clone(), any::<u16>()).prop_map(|(k, v)| Op::PutWithEvicted(k, v)),
        4 => key.clone().prop_map(Op::Get),
        2 => key.clone().prop_map(Op::Peek),
        2 => (key.clone(), any::<u16>()).prop_map(|(k, v)| Op::Update(k, v)),
        2 => key.clone().prop_map(Op::Remove),
        2 => key.prop_map(Op::Pop),
        1 => (0u8..8).prop_map(Op::GrowCapacity),
        1 => Just(Op::Clear),
    ]
}

/// Reference LRU: most recently used first
struct Model {
    entries: Vec<(u8, u16)>,
    capacity: usize,
}

impl Model {
    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    fn touch(&mut self, pos: usize) {
        let entry = self.entries.remove(pos);
        self.entries.insert(0, entry);
    }

    fn put(&mut self, key: u8, value: u16) -> Option<(bool, u8, u16)> {
        if let Some(pos) = self.position(key) {
            let old = self.entries[pos].1;
            self.entries[pos].1 = value;
            self.touch(pos);
            return Some((false, key, old));
        }
        if self.capacity == 0 {
            return None;
        }
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop().map(|(k, v)| (true, k, v))
        } else {
            None
        };
        self.entries.insert(0, (key, value));
        evicted
    }
}

fn run_ops<S: BuildHasher>(mut cache: LruCache<u8, u16, S>, capacity: usize, ops: Vec<Op>) {
    let mut model = Model {
        entries: Vec::new(),
        capacity,
    };

    for op in ops {
        match op {
            Op::Put(k, v) => {
                cache.put(k, v);
                model.put(k, v);
            }
            Op::PutWithEvicted(k, v) => {
                let got = cache.put_with_evicted(k, v).map(|d| {
                    let evicted = d.is_evicted();
                    let (k, v) = d.into_inner();
                    (evicted, k, v)
                });
                assert_eq!(got, model.put(k, v));
            }
            Op::Get(k) => {
                let expected = model.position(k).map(|pos| {
                    model.touch(pos);
                    model.entries[0].1
                });
                assert_eq!(cache.get(&k).copied(), expected);
            }
            Op::Peek(k) => {
                let expected = model.position(k).map(|pos| model.entries[pos].1);
                assert_eq!(cache.peek(&k).copied(), expected);
            }
            Op::Update(k, v) => {
                let expected = match model.position(k) {
                    Some(pos) => {
                        model.entries[pos].1 = v;
                        model.touch(pos);
                        true
                    }
                    None => false,
                };
                assert_eq!(cache.update(&k, v), expected);
            }
            Op::Remove(k) => {
                let expected = model.position(k).map(|pos| model.entries.remove(pos));
                assert_eq!(cache.remove(&k), expected.is_some());
            }
            Op::Pop(k) => {
                let expected = model.position(k).map(|pos| model.entries.remove(pos).1);
                assert_eq!(cache.pop(&k), expected);
            }
            Op::GrowCapacity(extra) => {
                model.capacity += usize::from(extra);
                cache.set_capacity(model.capacity);
            }
            Op::Clear => {
                model.entries.clear();
                cache.clear();
            }
        }

        assert_eq!(cache.len(), model.entries.len());
        assert!(cache.len() <= cache.capacity());
        let got: Vec<(u8, u16)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(got, model.entries);
        cache.check_invariants();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_matches_model(capacity in 0usize..24, ops in prop::collection::vec(op_strategy(), 1..300)) {
        run_ops(LruCache::new(capacity), capacity, ops);
    }

    #[test]
    fn prop_matches_model_colliding_hashes(capacity in 0usize..24, ops in prop::collection::vec(op_strategy(), 1..300)) {
        let hasher = BuildHasherDefault::<CollidingHasher>::default();
        run_ops(LruCache::with_hasher(capacity, hasher), capacity, ops);
    }
}
