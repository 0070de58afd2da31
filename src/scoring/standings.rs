// Category standings analysis: per-category rank, win probability, gaps to
// the neighboring teams, and the lock/target/punt/neutral strategy tags
// that steer the marginal-win estimator.

use serde::{Deserialize, Serialize};

use crate::pool::{Category, CategoryValues};

/// Own picks required before strategy classification produces any signal.
const STRATEGY_MIN_PICKS: usize = 6;

/// Minimum lead over the team below for a top-2 rank to count as locked.
const LOCK_GAP_MARGIN: f64 = 1.0;

/// Punt gap margin: base + (playoff_ratio - pivot) * slope. Leagues where
/// most teams make the playoffs can punt earlier and shallower.
const PUNT_GAP_BASE: f64 = 3.0;
const PUNT_GAP_SLOPE: f64 = 7.5;
const PUNT_RATIO_PIVOT: f64 = 0.4;

/// Playoff-spot ratio above which the target band widens downward and the
/// punt floor drops to the very bottom rank.
const GENEROUS_PLAYOFF_RATIO: f64 = 0.55;

/// Maximum categories that may be tagged punt at once.
const MAX_PUNTS: usize = 2;

// ---------------------------------------------------------------------------
// Rank / win probability primitives
// ---------------------------------------------------------------------------

/// Real-valued rank of `my_value` within `other_totals`: 1 + number of
/// strictly-ahead teams, with ties split evenly.
pub fn compute_rank(my_value: f64, other_totals: &[f64]) -> f64 {
    let mut teams_above = 0usize;
    let mut tied = 0usize;
    for &t in other_totals {
        if t > my_value {
            teams_above += 1;
        } else if t == my_value {
            tied += 1;
        }
    }
    teams_above as f64 + 1.0 + tied as f64 / 2.0
}

/// Expected weekly win probability for a category at the given rank.
/// Rank 1 of N wins every matchup, rank N wins none; a one-team field has
/// no opponents, so the probability degenerates to a coin flip.
pub fn win_prob_from_rank(rank: f64, num_teams: usize) -> f64 {
    if num_teams <= 1 {
        return 0.5;
    }
    (num_teams as f64 - rank) / (num_teams as f64 - 1.0)
}

// ---------------------------------------------------------------------------
// Rival totals
// ---------------------------------------------------------------------------

/// Per-category rival totals, sorted descending, excluding the simulated
/// team. Built once per pick from the running team totals.
#[derive(Debug, Clone)]
pub struct RivalTotals {
    by_cat: [Vec<f64>; Category::COUNT],
}

impl RivalTotals {
    pub fn from_team_totals(team_totals: &[CategoryValues], my_team: usize) -> Self {
        let mut by_cat: [Vec<f64>; Category::COUNT] = Default::default();
        for cat in Category::ALL {
            let mut vals: Vec<f64> = team_totals
                .iter()
                .enumerate()
                .filter(|(t, _)| *t != my_team)
                .map(|(_, totals)| totals.get(cat))
                .collect();
            vals.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
            by_cat[cat.index()] = vals;
        }
        RivalTotals { by_cat }
    }

    pub fn get(&self, cat: Category) -> &[f64] {
        &self.by_cat[cat.index()]
    }
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

/// Category-level strategy tag derived from current standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Rank 1-2 with a comfortable lead: further investment is wasted.
    Lock,
    /// Mid-table: marginal value flips weekly matchups.
    Target,
    /// Out of reach: stop investing entirely.
    Punt,
    Neutral,
}

/// One category's standing for the simulated team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStanding {
    pub category: Category,
    pub my_total: f64,
    pub rank: f64,
    pub win_prob: f64,
    /// Distance to the nearest team strictly above; 0.0 when leading.
    pub gap_above: f64,
    /// Distance to the nearest team strictly below; 0.0 when last.
    pub gap_below: f64,
    pub strategy: Strategy,
}

/// Analyze all active categories against the rival field. Strategies start
/// neutral; call `detect_strategy` to classify.
pub fn analyze_standings(
    my_totals: &CategoryValues,
    rivals: &RivalTotals,
    active: &[Category],
    num_teams: usize,
) -> Vec<CategoryStanding> {
    let mut standings = Vec::with_capacity(active.len());
    for &cat in active {
        let my_val = my_totals.get(cat);
        let other = rivals.get(cat);

        let rank = compute_rank(my_val, other);
        let win_prob = win_prob_from_rank(rank, num_teams);

        let gap_above = other
            .iter()
            .filter(|&&v| v > my_val)
            .map(|&v| v - my_val)
            .fold(f64::INFINITY, f64::min);
        let gap_below = other
            .iter()
            .filter(|&&v| v < my_val)
            .map(|&v| my_val - v)
            .fold(f64::INFINITY, f64::min);

        standings.push(CategoryStanding {
            category: cat,
            my_total: my_val,
            rank,
            win_prob,
            gap_above: if gap_above.is_finite() { gap_above } else { 0.0 },
            gap_below: if gap_below.is_finite() { gap_below } else { 0.0 },
            strategy: Strategy::Neutral,
        });
    }
    standings
}

/// Classify each standing as lock/target/punt/neutral.
///
/// Produces no signal before `STRATEGY_MIN_PICKS` own picks: early totals
/// are all noise. Band boundaries scale with the playoff-spot ratio, and
/// punts are capped at `MAX_PUNTS` (keeping the worst-ranked ones).
pub fn detect_strategy(
    standings: &mut [CategoryStanding],
    my_pick_count: usize,
    num_teams: usize,
    playoff_spots: usize,
) {
    if my_pick_count < STRATEGY_MIN_PICKS {
        return;
    }

    let n = num_teams as f64;
    let playoff_ratio = playoff_spots as f64 / n;
    let punt_gap = PUNT_GAP_BASE + (playoff_ratio - PUNT_RATIO_PIVOT) * PUNT_GAP_SLOPE;
    let generous = playoff_ratio >= GENEROUS_PLAYOFF_RATIO;
    let punt_rank_floor = if generous { n } else { n - 1.0 };
    let (target_low, target_high) = if generous { (3.0, 8.0) } else { (4.0, 7.0) };

    for s in standings.iter_mut() {
        s.strategy = if s.rank <= 2.0 && s.gap_below >= LOCK_GAP_MARGIN {
            Strategy::Lock
        } else if s.rank >= punt_rank_floor && s.gap_above >= punt_gap {
            Strategy::Punt
        } else if s.rank >= target_low && s.rank <= target_high {
            Strategy::Target
        } else {
            Strategy::Neutral
        };
    }

    // Keep only the two worst-ranked punts; revert the rest to neutral.
    let mut punts: Vec<usize> = standings
        .iter()
        .enumerate()
        .filter(|(_, s)| s.strategy == Strategy::Punt)
        .map(|(i, _)| i)
        .collect();
    if punts.len() > MAX_PUNTS {
        punts.sort_by(|&a, &b| {
            standings[b]
                .rank
                .partial_cmp(&standings[a].rank)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for &i in &punts[MAX_PUNTS..] {
            standings[i].strategy = Strategy::Neutral;
        }
    }
}

/// Look up the strategy for a category in a classified standings set.
/// Categories outside the active set are treated as neutral.
pub fn strategy_for(standings: &[CategoryStanding], cat: Category) -> Strategy {
    standings
        .iter()
        .find(|s| s.category == cat)
        .map(|s| s.strategy)
        .unwrap_or(Strategy::Neutral)
}
