// Benchmark simulator entry point.
//
// Runs batches of Monte Carlo snake drafts over a pool snapshot and
// reports expected weekly category wins, optionally A/B comparing a set
// of knob overrides against the defaults on the same seed.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use rotosim::config::SimConfig;
use rotosim::pool::{loader, PlayerPool};
use rotosim::sim::report::{render_comparison, render_report, write_json};
use rotosim::sim::runner::{run_batch, summarize, BatchOptions};

/// Draft model benchmark simulator.
#[derive(Debug, Parser)]
#[command(name = "rotosim", version, about)]
struct Args {
    /// Pool snapshot: a .csv file, or a SQLite database for anything else.
    #[arg(long)]
    pool: PathBuf,

    /// Season to load from a SQLite snapshot.
    #[arg(long, default_value_t = 2026)]
    season: i32,

    /// Total simulations, distributed across slots.
    #[arg(short = 'n', long, default_value_t = 500)]
    num_sims: usize,

    /// Master seed; every simulation derives its own stream from it.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Single draft slot to test (1-indexed). Default: all slots.
    #[arg(long)]
    slot: Option<usize>,

    /// Optional TOML config file with a [simulation] table.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run simulations on one core instead of fanning out.
    #[arg(long)]
    sequential: bool,

    /// Run twice (defaults vs overrides) and print the delta.
    #[arg(long)]
    compare: bool,

    /// Write a JSON summary of the (last) batch to this path.
    #[arg(long)]
    json: Option<PathBuf>,

    // --- Tunable coefficients ---
    #[arg(long)]
    mcw_weight: Option<f64>,
    #[arg(long)]
    vona_weight_mcw: Option<f64>,
    #[arg(long)]
    vona_weight_bpa: Option<f64>,
    #[arg(long)]
    urgency_weight_mcw: Option<f64>,
    #[arg(long)]
    urgency_weight_bpa: Option<f64>,
    #[arg(long)]
    availability_discount: Option<f64>,
    #[arg(long)]
    bench_penalty_rate: Option<f64>,
    #[arg(long)]
    adp_sigma: Option<f64>,
    #[arg(long)]
    confidence_start: Option<usize>,
    #[arg(long)]
    confidence_end: Option<usize>,
}

/// Apply CLI knob overrides onto a config; returns display labels for the
/// overrides that were set.
fn apply_overrides(config: &mut SimConfig, args: &Args) -> Vec<String> {
    let mut applied = Vec::new();
    macro_rules! apply {
        ($field:ident) => {
            if let Some(v) = args.$field {
                config.$field = v;
                applied.push(format!("{}={}", stringify!($field), v));
            }
        };
    }
    apply!(mcw_weight);
    apply!(vona_weight_mcw);
    apply!(vona_weight_bpa);
    apply!(urgency_weight_mcw);
    apply!(urgency_weight_bpa);
    apply!(availability_discount);
    apply!(bench_penalty_rate);
    apply!(adp_sigma);
    apply!(confidence_start);
    apply!(confidence_end);
    applied
}

fn load_pool(args: &Args, config: &SimConfig) -> anyhow::Result<PlayerPool> {
    let is_csv = args
        .pool
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let pool = if is_csv {
        loader::load_pool_csv(&args.pool, &config.categories)
    } else {
        loader::load_pool_sqlite(&args.pool, args.season, &config.categories)
    }
    .with_context(|| format!("failed to load pool snapshot from {}", args.pool.display()))?;
    Ok(pool)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let base_config = match &args.config {
        Some(path) => SimConfig::load(path).context("failed to load configuration")?,
        None => SimConfig::default(),
    };

    let mut config = base_config.clone();
    let overrides = apply_overrides(&mut config, &args);
    let label = if overrides.is_empty() {
        "defaults".to_string()
    } else {
        overrides.join(", ")
    };

    let pool = load_pool(&args, &config)?;
    println!("Loaded {} players", pool.len());

    let slots: Vec<usize> = match args.slot {
        Some(slot) => vec![slot.saturating_sub(1)],
        None => (0..config.num_teams).collect(),
    };
    let sims_per_slot = (args.num_sims / slots.len()).max(1);
    let opts = BatchOptions {
        slots,
        sims_per_slot,
        master_seed: args.seed,
        parallel: !args.sequential,
    };

    if args.compare && !overrides.is_empty() {
        let baseline = summarize(&run_batch(&pool, &base_config, &opts), &base_config);
        let custom = summarize(&run_batch(&pool, &config, &opts), &config);

        println!("{}", render_report(&baseline, args.seed, "defaults"));
        println!("{}", render_report(&custom, args.seed, &label));
        println!("{}", render_comparison(&baseline, &custom, "defaults", &label));

        if let Some(path) = &args.json {
            write_json(path, &custom, args.seed, &label)?;
            println!("Summary written to {}", path.display());
        }
    } else {
        let summary = summarize(&run_batch(&pool, &config, &opts), &config);
        println!("{}", render_report(&summary, args.seed, &label));

        if let Some(path) = &args.json {
            write_json(path, &summary, args.seed, &label)?;
            println!("Summary written to {}", path.display());
        }
    }

    Ok(())
}

/// Tracing goes to stderr so stdout stays clean for the report.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rotosim=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
