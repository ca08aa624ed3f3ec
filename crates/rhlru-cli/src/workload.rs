//! Synthetic operation streams driven against a shared cache

use anyhow::{ensure, Result};
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rhlru::SharedLruCache;
use serde::Serialize;

use crate::stats::CacheStats;

/// How keys are drawn from the key space
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    /// Uniformly random keys
    Uniform,
    /// Keys 0, 1, 2, ... wrapping at the key space
    Sequential,
    /// 90% of accesses hit the first 10% of the key space
    HotSet,
}

/// Parameters of one run
#[derive(Debug, Clone, Serialize)]
pub struct Workload {
    pub key_space: u64,
    pub ops: u64,
    pub read_ratio: f64,
    pub delete_ratio: f64,
    pub pattern: Pattern,
    pub threads: usize,
    pub seed: u64,
}

impl Workload {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.key_space >= 1, "key space must be at least 1");
        ensure!(self.threads >= 1, "at least one thread is required");
        ensure!(
            (0.0..=1.0).contains(&self.read_ratio) && (0.0..=1.0).contains(&self.delete_ratio),
            "ratios must lie in [0, 1]"
        );
        ensure!(
            self.read_ratio + self.delete_ratio <= 1.0,
            "read ratio + delete ratio must not exceed 1 (got {})",
            self.read_ratio + self.delete_ratio
        );
        Ok(())
    }

    /// Operations assigned to worker `worker`
    pub fn ops_for(&self, worker: usize) -> u64 {
        let threads = self.threads as u64;
        let base = self.ops / threads;
        if (worker as u64) < self.ops % threads {
            base + 1
        } else {
            base
        }
    }
}

/// Per-worker key source
struct KeyGen {
    rng: StdRng,
    pattern: Pattern,
    key_space: u64,
    cursor: u64,
}

impl KeyGen {
    fn new(pattern: Pattern, key_space: u64, seed: u64, start: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pattern,
            key_space,
            cursor: start % key_space,
        }
    }

    fn next_key(&mut self) -> u64 {
        match self.pattern {
            Pattern::Uniform => self.rng.gen_range(0..self.key_space),
            Pattern::Sequential => {
                let key = self.cursor;
                self.cursor = (self.cursor + 1) % self.key_space;
                key
            }
            Pattern::HotSet => {
                let hot = (self.key_space / 10).max(1);
                if self.rng.gen_bool(0.9) {
                    self.rng.gen_range(0..hot)
                } else {
                    self.rng.gen_range(0..self.key_space)
                }
            }
        }
    }

    fn roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Run one worker's share of the workload
///
/// Reads go through the cache and fill it on a miss; writes overwrite or
/// insert; deletes drop the key.
pub fn run_worker(cache: &SharedLruCache<u64, u64>, stats: &CacheStats, workload: &Workload, worker: usize) {
    let ops = workload.ops_for(worker);
    let start = workload.key_space / workload.threads as u64 * worker as u64;
    let mut keys = KeyGen::new(
        workload.pattern,
        workload.key_space,
        workload.seed.wrapping_add(worker as u64),
        start,
    );

    for n in 0..ops {
        let key = keys.next_key();
        let roll = keys.roll();

        if roll < workload.read_ratio {
            if cache.get(&key).is_some() {
                stats.record_hit();
            } else {
                stats.record_miss();
                let displaced = cache.put_with_evicted(key, key);
                stats.record_put(
                    displaced.as_ref().is_some_and(|d| !d.is_evicted()),
                    displaced.as_ref().is_some_and(|d| d.is_evicted()),
                );
            }
        } else if roll < workload.read_ratio + workload.delete_ratio {
            if cache.remove(&key) {
                stats.record_delete();
            }
        } else {
            let displaced = cache.put_with_evicted(key, n);
            stats.record_put(
                displaced.as_ref().is_some_and(|d| !d.is_evicted()),
                displaced.as_ref().is_some_and(|d| d.is_evicted()),
            );
        }
    }
    tracing::debug!(worker, ops, "worker finished");
}
