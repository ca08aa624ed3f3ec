//! rhlru workload driver - runs a synthetic access pattern against the cache

mod stats;
mod workload;

use anyhow::{Context, Result};
use clap::Parser;
use rhlru::{LruCache, SharedLruCache};
use serde::Serialize;
use std::thread;
use std::time::Instant;
use tracing::info;

use crate::stats::{CacheStats, StatsSnapshot};
use crate::workload::{run_worker, Pattern, Workload};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items)
    #[arg(short, long, default_value_t = 10000)]
    capacity: usize,

    /// Number of distinct keys
    #[arg(short, long, default_value_t = 50000)]
    key_space: u64,

    /// Total operations across all threads
    #[arg(short, long, default_value_t = 1_000_000)]
    ops: u64,

    /// Fraction of operations that are reads
    #[arg(long, default_value_t = 0.8)]
    read_ratio: f64,

    /// Fraction of operations that are deletes
    #[arg(long, default_value_t = 0.0)]
    delete_ratio: f64,

    /// Key access pattern
    #[arg(short, long, value_enum, default_value_t = Pattern::HotSet)]
    pattern: Pattern,

    /// Worker threads sharing one cache
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    workload: Workload,
    capacity: usize,
    len: usize,
    elapsed_secs: f64,
    ops_per_sec: f64,
    stats: StatsSnapshot,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let workload = Workload {
        key_space: args.key_space,
        ops: args.ops,
        read_ratio: args.read_ratio,
        delete_ratio: args.delete_ratio,
        pattern: args.pattern,
        threads: args.threads,
        seed: args.seed,
    };
    workload.validate().context("invalid workload")?;

    let cache = SharedLruCache::from_cache(
        LruCache::try_new(args.capacity).context("invalid cache capacity")?,
    );
    let stats = CacheStats::new();

    info!("Starting rhlru workload v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);
    info!(
        "Pattern: {:?}, key space: {}, ops: {}, threads: {}",
        workload.pattern, workload.key_space, workload.ops, workload.threads
    );

    let started = Instant::now();
    thread::scope(|scope| {
        for worker in 0..workload.threads {
            let (cache, stats, workload) = (&cache, &stats, &workload);
            scope.spawn(move || run_worker(cache, stats, workload, worker));
        }
    });
    let elapsed = started.elapsed().as_secs_f64();

    let report = Report {
        capacity: cache.capacity(),
        len: cache.len(),
        elapsed_secs: elapsed,
        ops_per_sec: if elapsed > 0.0 {
            workload.ops as f64 / elapsed
        } else {
            0.0
        },
        stats: stats.snapshot(),
        workload,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!("Finished in {:.3}s ({:.0} ops/sec)", report.elapsed_secs, report.ops_per_sec);
        info!(
            "Hits: {}, misses: {}, hit ratio: {:.2}%",
            report.stats.hits,
            report.stats.misses,
            report.stats.hit_ratio * 100.0
        );
        info!(
            "Inserts: {}, replacements: {}, evictions: {}, deletes: {}",
            report.stats.inserts,
            report.stats.replacements,
            report.stats.evictions,
            report.stats.deletes
        );
        info!("Cache holds {} of {} entries", report.len, report.capacity);
    }

    Ok(())
}
