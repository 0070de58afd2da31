// Marginal category win (MCW) estimation: the expected fractional increase
// in weekly category wins from adding one candidate to the roster.

use crate::config::SimConfig;
use crate::pool::CategoryValues;
use crate::scoring::standings::{
    compute_rank, strategy_for, win_prob_from_rank, CategoryStanding, RivalTotals, Strategy,
};

/// Exponent for the gap-closing fractional credit. Super-linear so that
/// closing most of a gap is rewarded without over-crediting token progress.
/// Tuned empirically against the Monte Carlo objective; do not re-derive.
const GAP_CREDIT_EXPONENT: f64 = 1.5;

/// Scale for the gap-closing fractional credit, tuned alongside the
/// exponent above.
const GAP_CREDIT_SCALE: f64 = 0.55;

/// Estimate the marginal category wins from drafting this candidate.
///
/// For each active, non-punted category: re-rank my hypothetical total
/// with the candidate's value added and take the win-probability delta.
/// When the rank doesn't move but the candidate made real progress toward
/// the nearest team above, award fractional credit proportional to the
/// share of that gap closed. Lock categories are discounted and target
/// categories boosted by the configured multipliers.
pub fn compute_mcw(
    player_values: &CategoryValues,
    my_totals: &CategoryValues,
    rivals: &RivalTotals,
    standings: &[CategoryStanding],
    config: &SimConfig,
) -> f64 {
    let num_teams = config.num_teams;
    let mut mcw = 0.0;

    for &cat in &config.categories {
        let strategy = strategy_for(standings, cat);
        if strategy == Strategy::Punt {
            continue;
        }

        let player_val = player_values.get(cat);
        if player_val == 0.0 {
            continue;
        }

        let my_val = my_totals.get(cat);
        let new_val = my_val + player_val;
        let other = rivals.get(cat);

        let rank_before = compute_rank(my_val, other);
        let rank_after = compute_rank(new_val, other);
        let mut marginal =
            win_prob_from_rank(rank_after, num_teams) - win_prob_from_rank(rank_before, num_teams);

        if marginal == 0.0 && player_val > 0.0 {
            marginal = gap_credit(my_val, new_val, other, num_teams);
        }

        let weight = match strategy {
            Strategy::Lock => config.lock_mcw_weight,
            Strategy::Target => config.target_mcw_weight,
            Strategy::Punt | Strategy::Neutral => 1.0,
        };
        mcw += marginal * weight;
    }

    mcw
}

/// Fractional credit for closing part of the gap to the nearest team above
/// without passing anyone. Zero when leading the category or when the pick
/// actually overtook someone (the rank delta already credited that).
fn gap_credit(my_val: f64, new_val: f64, other: &[f64], num_teams: usize) -> f64 {
    let above_before: Vec<f64> = other.iter().copied().filter(|&v| v > my_val).collect();
    let above_after = other.iter().filter(|&&v| v > new_val).count();
    if above_before.is_empty() || above_after != above_before.len() {
        return 0.0;
    }

    let closest_above = above_before.iter().copied().fold(f64::INFINITY, f64::min);
    let gap_before = closest_above - my_val;
    if gap_before <= 0.0 {
        return 0.0;
    }
    let gap_after = closest_above - new_val;
    let gap_closed = (gap_before - gap_after) / gap_before;

    gap_closed.powf(GAP_CREDIT_EXPONENT) * GAP_CREDIT_SCALE / (num_teams as f64 - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Category;
    use crate::scoring::standings::{analyze_standings, detect_strategy};

    fn rivals_with(cat: Category, vals: &[f64]) -> RivalTotals {
        let mut teams: Vec<CategoryValues> = vals
            .iter()
            .map(|&v| {
                let mut t = CategoryValues::zero();
                t.set(cat, v);
                t
            })
            .collect();
        // Slot 0 is "me"; push a placeholder and exclude it.
        teams.insert(0, CategoryValues::zero());
        RivalTotals::from_team_totals(&teams, 0)
    }

    fn neutral_standings(cat: Category) -> Vec<CategoryStanding> {
        let totals = CategoryValues::zero();
        let rivals = rivals_with(cat, &[]);
        analyze_standings(&totals, &rivals, &[cat], 10)
    }

    #[test]
    fn zero_valued_category_contributes_nothing() {
        let cat = Category::Runs;
        let config = SimConfig::default();
        let player = CategoryValues::zero();
        let my = CategoryValues::zero();
        let rivals = rivals_with(cat, &[5.0, 3.0, 1.0]);
        let standings = neutral_standings(cat);
        assert_eq!(compute_mcw(&player, &my, &rivals, &standings, &config), 0.0);
    }

    #[test]
    fn overtaking_a_team_earns_the_win_prob_delta() {
        let cat = Category::Runs;
        let mut config = SimConfig::default();
        config.categories = vec![cat];
        let mut player = CategoryValues::zero();
        player.set(cat, 2.0);
        let mut my = CategoryValues::zero();
        my.set(cat, 4.0);
        // Rivals at 5 and 1: rank 2 -> rank 1 among 10 teams.
        let rivals = rivals_with(cat, &[5.0, 1.0]);
        let standings = neutral_standings(cat);

        let mcw = compute_mcw(&player, &my, &rivals, &standings, &config);
        let expected =
            win_prob_from_rank(1.0, 10) - win_prob_from_rank(2.0, 10);
        assert!((mcw - expected).abs() < 1e-9);
    }

    #[test]
    fn leading_category_gets_no_credit_for_piling_on() {
        let cat = Category::TotalBases;
        let mut config = SimConfig::default();
        config.categories = vec![cat];
        let mut player = CategoryValues::zero();
        player.set(cat, 3.0);
        let mut my = CategoryValues::zero();
        my.set(cat, 20.0);
        let rivals = rivals_with(cat, &[5.0, 4.0, 1.0]);
        let standings = neutral_standings(cat);
        assert_eq!(compute_mcw(&player, &my, &rivals, &standings, &config), 0.0);
    }

    #[test]
    fn partial_gap_close_earns_fractional_credit() {
        let cat = Category::Strikeouts;
        let mut config = SimConfig::default();
        config.categories = vec![cat];
        let mut player = CategoryValues::zero();
        player.set(cat, 1.0);
        let my = CategoryValues::zero();
        // Nearest team above at 2.0; closing half the gap.
        let rivals = rivals_with(cat, &[2.0]);
        let standings = neutral_standings(cat);

        let mcw = compute_mcw(&player, &my, &rivals, &standings, &config);
        let expected = 0.5_f64.powf(1.5) * 0.55 / 9.0;
        assert!((mcw - expected).abs() < 1e-9);
        assert!(mcw > 0.0);
    }

    #[test]
    fn punted_category_is_skipped() {
        let cat = Category::StolenBases;
        let mut config = SimConfig::default();
        config.categories = vec![cat];
        config.playoff_spots = 6;
        let mut player = CategoryValues::zero();
        player.set(cat, 1.0);
        let my = CategoryValues::zero();
        let field: Vec<f64> = (0..9).map(|i| 10.0 + i as f64).collect();
        let rivals = rivals_with(cat, &field);
        let mut standings = analyze_standings(&my, &rivals, &[cat], 10);
        detect_strategy(&mut standings, 10, 10, 6);
        assert_eq!(standings[0].strategy, Strategy::Punt);

        assert_eq!(compute_mcw(&player, &my, &rivals, &standings, &config), 0.0);
    }

    #[test]
    fn lock_discount_scales_credit() {
        let cat = Category::Rbi;
        let mut config = SimConfig::default();
        config.categories = vec![cat];
        config.lock_mcw_weight = 0.5;

        let mut player = CategoryValues::zero();
        player.set(cat, 2.0);
        let mut my = CategoryValues::zero();
        my.set(cat, 10.0);
        // One rival above at 11.0, rest far below; rank 2 -> 1 on pick.
        let rivals = rivals_with(cat, &[11.0, 1.0, 0.5]);
        let mut standings = analyze_standings(&my, &rivals, &[cat], 10);
        // Rank 2 with gap_below 9.0: a lock.
        detect_strategy(&mut standings, 10, 10, 6);
        assert_eq!(standings[0].strategy, Strategy::Lock);

        let mcw = compute_mcw(&player, &my, &rivals, &standings, &config);
        let raw = win_prob_from_rank(1.0, 10) - win_prob_from_rank(2.0, 10);
        assert!((mcw - raw * 0.5).abs() < 1e-9);
    }
}
