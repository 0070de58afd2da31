// Cross-sectional normalization of the remaining player pool.
//
// Raw category values arrive on whatever scale the provider used; within a
// draft what matters is how a player compares to who is *still available*.
// Stats are recomputed at most once per round (not per pick) by the engine.

use crate::pool::{Category, Player};

/// Threshold below which a standard deviation is treated as zero.
const STDEV_EPSILON: f64 = 1e-9;

/// Mean and standard deviation for one category across the available pool.
#[derive(Debug, Clone, Copy)]
pub struct PoolStats {
    pub mean: f64,
    pub stdev: f64,
}

impl Default for PoolStats {
    fn default() -> Self {
        PoolStats {
            mean: 0.0,
            stdev: 1.0,
        }
    }
}

/// Per-category pool statistics over the currently available players.
#[derive(Debug, Clone)]
pub struct CategoryStats {
    by_cat: [PoolStats; Category::COUNT],
}

impl CategoryStats {
    /// Compute stats for every active category over its role-relevant
    /// subset of the available players. Population (N-denominator) stdev;
    /// a degenerate stdev falls back to 1.0 so the z-division is a no-op.
    pub fn compute(available: &[&Player], active: &[Category]) -> Self {
        let mut by_cat = [PoolStats::default(); Category::COUNT];

        for &cat in active {
            let values: Vec<f64> = available
                .iter()
                .filter(|p| p.role == cat.role())
                .map(|p| p.values.get(cat))
                .collect();

            let n = values.len().max(1) as f64;
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let stdev = if variance > STDEV_EPSILON {
                variance.sqrt()
            } else {
                1.0
            };
            by_cat[cat.index()] = PoolStats { mean, stdev };
        }

        CategoryStats { by_cat }
    }

    pub fn get(&self, cat: Category) -> PoolStats {
        self.by_cat[cat.index()]
    }
}

/// A player's normalized value: the sum of (raw - mean)/stdev over the
/// active categories of their own role.
pub fn normalized_value(player: &Player, stats: &CategoryStats, active: &[Category]) -> f64 {
    active
        .iter()
        .filter(|c| c.role() == player.role)
        .map(|&cat| {
            let s = stats.get(cat);
            (player.values.get(cat) - s.mean) / s.stdev
        })
        .sum()
}
