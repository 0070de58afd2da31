// Benchmark report formatting: a human-readable terminal report, an A/B
// comparison, and a machine-readable JSON summary for the external
// optimizer.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::sim::runner::BatchSummary;

// ---------------------------------------------------------------------------
// Terminal report
// ---------------------------------------------------------------------------

/// Render a batch summary as a terminal report.
pub fn render_report(summary: &BatchSummary, seed: u64, label: &str) -> String {
    let mut out = String::new();

    let label_part = if label.is_empty() {
        String::new()
    } else {
        format!(" [{label}]")
    };
    let _ = writeln!(
        out,
        "Draft Model Benchmark ({} sims, seed={}){}",
        summary.num_sims, seed, label_part
    );
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(
        out,
        "Expected Weekly Wins:  {:.2} +/- {:.2}",
        summary.mean_wins, summary.std_wins
    );

    let _ = writeln!(out, "\nPer Slot:");
    for chunk in summary.per_slot.chunks(5) {
        let line: String = chunk
            .iter()
            .map(|(slot, wins)| format!("  {}: {:.2}", slot + 1, wins))
            .collect();
        let _ = writeln!(out, "{line}");
    }

    let _ = writeln!(out, "\nCategory Win Rates:");
    for chunk in summary.cat_rates.chunks(5) {
        let line: String = chunk
            .iter()
            .map(|(cat, rate)| format!("  {}: .{:02}", cat.label(), (rate * 100.0) as u32))
            .collect();
        let _ = writeln!(out, "{line}");
    }

    let _ = writeln!(out, "\nDraft Composition (avg):");
    let _ = writeln!(
        out,
        "  Hitters: {:.1}   Pitchers: {:.1} ({:.1} SP / {:.1} RP)   Bench P: {:.1}",
        summary.avg_hitters,
        summary.avg_pitchers,
        summary.avg_sp,
        summary.avg_rp,
        summary.avg_bench_pitchers
    );
    if let Some(round) = summary.avg_first_pitcher_round {
        let _ = writeln!(out, "  First pitcher picked at: round {round:.1}");
    }

    out
}

/// Render a side-by-side comparison of two batches (same seed, different
/// configs).
pub fn render_comparison(
    a: &BatchSummary,
    b: &BatchSummary,
    label_a: &str,
    label_b: &str,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{:^60}", "Comparison");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "  {label_a:30}: {:.3} wins/week", a.mean_wins);
    let _ = writeln!(out, "  {label_b:30}: {:.3} wins/week", b.mean_wins);
    let delta = b.mean_wins - a.mean_wins;
    let _ = writeln!(out, "  {:30}: {delta:+.3} wins/week", "Delta");

    let _ = writeln!(out, "\nPer-Category Delta:");
    for (cat, rate_a) in &a.cat_rates {
        let rate_b = b
            .cat_rates
            .iter()
            .find(|(c, _)| c == cat)
            .map(|(_, r)| *r)
            .unwrap_or(0.0);
        let d = rate_b - rate_a;
        let _ = writeln!(
            out,
            "  {:6}: {rate_a:.3} -> {rate_b:.3} ({d:+.3})",
            cat.label()
        );
    }

    out
}

// ---------------------------------------------------------------------------
// JSON summary
// ---------------------------------------------------------------------------

/// Machine-readable batch result, for the external optimizer.
#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    generated_at: String,
    label: &'a str,
    seed: u64,
    #[serde(flatten)]
    summary: &'a BatchSummary,
}

/// Write a JSON summary file for the batch.
pub fn write_json(
    path: &Path,
    summary: &BatchSummary,
    seed: u64,
    label: &str,
) -> anyhow::Result<()> {
    let payload = JsonSummary {
        generated_at: chrono::Utc::now().to_rfc3339(),
        label,
        seed,
        summary,
    };
    let text = serde_json::to_string_pretty(&payload)?;
    std::fs::write(path, text)?;
    Ok(())
}
