// Post-draft evaluation: expected weekly category wins for the simulated
// team, plus the composition diagnostics used for regression and
// calibration testing.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::draft::engine::DraftResult;
use crate::pool::{Category, PlayerPool, Role};
use crate::scoring::standings::{compute_rank, win_prob_from_rank, RivalTotals};

/// Evaluation summary for one completed draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub my_slot: usize,
    /// Sum of per-category win probabilities.
    pub expected_wins: f64,
    /// Win probability per active category.
    pub cat_win_probs: Vec<(Category, f64)>,
    pub hitter_count: usize,
    pub pitcher_count: usize,
    /// 1-indexed round of the first pitcher pick, if any.
    pub first_pitcher_round: Option<usize>,
    pub bench_pitcher_count: usize,
    pub sp_count: usize,
    pub rp_count: usize,
}

/// Evaluate a completed draft against the full field.
///
/// Unlike the draft-time model, every active category counts here: a
/// punted category still loses its weekly matchups, and the evaluation
/// must price that in.
pub fn evaluate_draft(result: &DraftResult, pool: &PlayerPool, config: &SimConfig) -> Evaluation {
    let my_totals = &result.team_totals[result.my_slot];
    let rivals = RivalTotals::from_team_totals(&result.team_totals, result.my_slot);

    let mut cat_win_probs = Vec::with_capacity(config.categories.len());
    let mut expected_wins = 0.0;
    for &cat in &config.categories {
        let rank = compute_rank(my_totals.get(cat), rivals.get(cat));
        let prob = win_prob_from_rank(rank, config.num_teams);
        expected_wins += prob;
        cat_win_probs.push((cat, prob));
    }

    let first_pitcher_round = result.my_picks.iter().enumerate().find_map(|(i, pick)| {
        let player = &pool.players()[pick.pool_index];
        (player.role == Role::Pitcher).then_some(i + 1)
    });

    let comp = result.compositions[result.my_slot];

    Evaluation {
        my_slot: result.my_slot,
        expected_wins,
        cat_win_probs,
        hitter_count: comp.hitters,
        pitcher_count: comp.pitchers,
        first_pitcher_round,
        bench_pitcher_count: comp.bench_pitchers,
        sp_count: comp.sp,
        rp_count: comp.rp,
    }
}
