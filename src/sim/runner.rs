// Batch benchmark runner: (draft slot x repetition) simulations with
// deterministic per-simulation seeds, optionally fanned out across cores.
//
// Each simulation owns an independent RNG stream derived from the master
// seed and its flat index, plus its own pool-availability and roster
// state, so parallel execution needs no locks and produces byte-identical
// results to a sequential run.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SimConfig;
use crate::draft::engine::simulate_draft;
use crate::pool::{Category, PlayerPool};
use crate::sim::evaluate::{evaluate_draft, Evaluation};

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Derive the seed for one simulation from the master seed and the
/// simulation's flat index, via one SplitMix64 mixing step. Index-based
/// (rather than drawing seeds serially from a master RNG) so execution
/// order cannot affect any simulation's stream.
pub fn derive_seed(master_seed: u64, index: u64) -> u64 {
    let mut z = master_seed.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// ---------------------------------------------------------------------------
// Batch execution
// ---------------------------------------------------------------------------

/// Options for one benchmark batch.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Draft slots to simulate (0-indexed).
    pub slots: Vec<usize>,
    pub sims_per_slot: usize,
    pub master_seed: u64,
    /// Fan simulations out across cores. Result order is identical either
    /// way.
    pub parallel: bool,
}

/// Run the batch and return one evaluation per simulation, in
/// (slot, repetition) order.
pub fn run_batch(pool: &PlayerPool, config: &SimConfig, opts: &BatchOptions) -> Vec<Evaluation> {
    let jobs: Vec<(usize, u64)> = opts
        .slots
        .iter()
        .flat_map(|&slot| (0..opts.sims_per_slot).map(move |_| slot))
        .enumerate()
        .map(|(flat, slot)| (slot, flat as u64))
        .collect();

    info!(
        sims = jobs.len(),
        slots = opts.slots.len(),
        seed = opts.master_seed,
        parallel = opts.parallel,
        "running benchmark batch"
    );

    let run_one = |&(slot, flat): &(usize, u64)| {
        let mut rng = StdRng::seed_from_u64(derive_seed(opts.master_seed, flat));
        let result = simulate_draft(pool, slot, config, &mut rng);
        evaluate_draft(&result, pool, config)
    };

    if opts.parallel {
        jobs.par_iter().map(run_one).collect()
    } else {
        jobs.iter().map(run_one).collect()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Aggregate statistics over a batch, the external optimizer's objective
/// surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub num_sims: usize,
    pub mean_wins: f64,
    pub std_wins: f64,
    /// Mean expected wins per draft slot, ascending by slot.
    pub per_slot: Vec<(usize, f64)>,
    /// Mean win rate per active category.
    pub cat_rates: Vec<(Category, f64)>,
    pub avg_hitters: f64,
    pub avg_pitchers: f64,
    pub avg_bench_pitchers: f64,
    pub avg_sp: f64,
    pub avg_rp: f64,
    pub avg_first_pitcher_round: Option<f64>,
}

pub fn summarize(results: &[Evaluation], config: &SimConfig) -> BatchSummary {
    let n = results.len().max(1) as f64;

    let mean_wins = results.iter().map(|r| r.expected_wins).sum::<f64>() / n;
    let variance = results
        .iter()
        .map(|r| (r.expected_wins - mean_wins).powi(2))
        .sum::<f64>()
        / n;

    let mut per_slot: Vec<(usize, f64)> = Vec::new();
    for r in results {
        match per_slot.iter_mut().find(|(slot, _)| *slot == r.my_slot) {
            Some((_, sum)) => *sum += r.expected_wins,
            None => per_slot.push((r.my_slot, r.expected_wins)),
        }
    }
    let counts: Vec<usize> = per_slot
        .iter()
        .map(|(slot, _)| results.iter().filter(|r| r.my_slot == *slot).count())
        .collect();
    for ((_, sum), count) in per_slot.iter_mut().zip(counts) {
        *sum /= count.max(1) as f64;
    }
    per_slot.sort_by_key(|(slot, _)| *slot);

    let cat_rates = config
        .categories
        .iter()
        .map(|&cat| {
            let total: f64 = results
                .iter()
                .flat_map(|r| &r.cat_win_probs)
                .filter(|(c, _)| *c == cat)
                .map(|(_, p)| p)
                .sum();
            (cat, total / n)
        })
        .collect();

    let first_rounds: Vec<usize> = results
        .iter()
        .filter_map(|r| r.first_pitcher_round)
        .collect();
    let avg_first_pitcher_round = if first_rounds.is_empty() {
        None
    } else {
        Some(first_rounds.iter().sum::<usize>() as f64 / first_rounds.len() as f64)
    };

    BatchSummary {
        num_sims: results.len(),
        mean_wins,
        std_wins: variance.sqrt(),
        per_slot,
        cat_rates,
        avg_hitters: results.iter().map(|r| r.hitter_count).sum::<usize>() as f64 / n,
        avg_pitchers: results.iter().map(|r| r.pitcher_count).sum::<usize>() as f64 / n,
        avg_bench_pitchers: results.iter().map(|r| r.bench_pitcher_count).sum::<usize>() as f64
            / n,
        avg_sp: results.iter().map(|r| r.sp_count).sum::<usize>() as f64 / n,
        avg_rp: results.iter().map(|r| r.rp_count).sum::<usize>() as f64 / n,
        avg_first_pitcher_round,
    }
}
