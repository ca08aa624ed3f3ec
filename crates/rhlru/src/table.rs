//! Robin-hood open-addressing table mapping subhashes to arena indices
//!
//! Buckets carry a folded 32-bit hash and the arena index of the node holding
//! the key; index 0 (the arena sentinel) marks an empty bucket. Deletion uses
//! backward shifting, so there are no tombstones.

use std::mem;

/// Fill ratio the table is sized for, as a fraction (4/5)
const FILL_NUM: usize = 4;
const FILL_DEN: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Bucket {
    pub(crate) subhash: u32,
    pub(crate) index: u32,
}

impl Bucket {
    const EMPTY: Bucket = Bucket {
        subhash: 0,
        index: 0,
    };

    fn is_empty(&self) -> bool {
        self.index == 0
    }
}

/// Fold a 64-bit hash into 32 bits by adding the upper half to the lower half
#[inline]
pub(crate) fn fold_hash(hash: u64) -> u32 {
    (hash as u32).wrapping_add((hash >> 32) as u32)
}

/// Bucket count needed for `slots` arena slots at the target fill ratio
pub(crate) fn buckets_for(slots: usize) -> usize {
    let needed = slots
        .saturating_mul(FILL_DEN)
        .saturating_add(FILL_NUM - 1)
        / FILL_NUM;
    needed.next_power_of_two()
}

pub(crate) struct RobinHoodTable {
    buckets: Vec<Bucket>,
}

impl RobinHoodTable {
    pub(crate) fn new() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    /// Number of buckets (always zero or a power of two)
    pub(crate) fn len(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn mask(&self) -> usize {
        self.buckets.len() - 1
    }

    /// Distance of the bucket at `pos` from the home slot of `subhash`
    #[inline]
    fn psl(&self, pos: usize, subhash: u32) -> usize {
        pos.wrapping_sub(subhash as usize) & self.mask()
    }

    pub(crate) fn index_at(&self, pos: usize) -> u32 {
        self.buckets[pos].index
    }

    /// Probe for a bucket with `subhash` whose arena index satisfies `is_match`
    ///
    /// Stops as soon as an empty bucket or one closer to its home slot than the
    /// running probe distance shows up: insertion never lets an entry sit past
    /// a richer one, so the key cannot be further along.
    pub(crate) fn find(&self, subhash: u32, mut is_match: impl FnMut(u32) -> bool) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }

        let mask = self.mask();
        let mut pos = subhash as usize & mask;
        let mut dist = 0;
        loop {
            let bucket = self.buckets[pos];
            if bucket.is_empty() || self.psl(pos, bucket.subhash) < dist {
                return None;
            }
            if bucket.subhash == subhash && is_match(bucket.index) {
                return Some(pos);
            }
            pos = (pos + 1) & mask;
            dist += 1;
        }
    }

    /// Locate the bucket pointing at arena slot `index`
    pub(crate) fn find_index(&self, subhash: u32, index: u32) -> Option<usize> {
        self.find(subhash, |i| i == index)
    }

    /// Insert with robin-hood displacement
    ///
    /// The caller guarantees the key is absent and at least one bucket is free.
    pub(crate) fn insert(&mut self, subhash: u32, index: u32) {
        debug_assert!(index != 0, "arena index 0 is the empty marker");

        let mask = self.mask();
        let mut carried = Bucket { subhash, index };
        let mut pos = subhash as usize & mask;
        let mut dist = 0;
        loop {
            let occupant = self.buckets[pos];
            if occupant.is_empty() {
                self.buckets[pos] = carried;
                return;
            }
            let occupant_dist = self.psl(pos, occupant.subhash);
            if occupant_dist < dist {
                self.buckets[pos] = carried;
                carried = occupant;
                dist = occupant_dist;
            }
            pos = (pos + 1) & mask;
            dist += 1;
        }
    }

    /// Remove the bucket at `pos`, shifting the following run back by one
    pub(crate) fn remove_at(&mut self, pos: usize) {
        let mask = self.mask();
        let mut gap = pos;
        loop {
            let next = (gap + 1) & mask;
            let bucket = self.buckets[next];
            if bucket.is_empty() || self.psl(next, bucket.subhash) == 0 {
                self.buckets[gap] = Bucket::EMPTY;
                return;
            }
            self.buckets[gap] = bucket;
            gap = next;
        }
    }

    /// Empty every bucket, keeping the allocation
    pub(crate) fn clear(&mut self) {
        self.buckets.fill(Bucket::EMPTY);
    }

    /// Reallocate to `new_len` buckets and reinsert every occupied bucket
    pub(crate) fn resize(&mut self, new_len: usize) {
        debug_assert!(new_len.is_power_of_two());

        let old = mem::replace(&mut self.buckets, vec![Bucket::EMPTY; new_len]);
        let mut moved = 0usize;
        for bucket in old.into_iter().filter(|b| !b.is_empty()) {
            self.insert(bucket.subhash, bucket.index);
            moved += 1;
        }
        tracing::trace!(buckets = new_len, moved, "rehashed bucket table");
    }

    #[cfg(test)]
    pub(crate) fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Probe distance of the occupant at `pos`
    #[cfg(test)]
    pub(crate) fn psl_at(&self, pos: usize) -> usize {
        self.psl(pos, self.buckets[pos].subhash)
    }
}
