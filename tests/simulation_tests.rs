// End-to-end simulation tests against the library's public API.
//
// These exercise the full pick-by-pick engine on synthetic pools and
// verify the invariants a completed run must satisfy: schedule and roster
// accounting, slot eligibility, determinism, and the evaluation scenarios.

use rand::rngs::StdRng;
use rand::SeedableRng;

use rotosim::config::SimConfig;
use rotosim::draft::engine::simulate_draft;
use rotosim::pool::{Category, CategoryValues, Player, PlayerPool, Position, Role, Slot};
use rotosim::scoring::{compute_mcw, analyze_standings, detect_strategy, RivalTotals};
use rotosim::sim::runner::{run_batch, summarize, BatchOptions};
use rotosim::sim::evaluate_draft;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Build the benchmark scenario pool: 300 players with strictly increasing
/// ADP 1..300 (best player first), 60% hitters cycling through positions,
/// 40% pitchers split SP/RP, values decaying with overall rank.
fn scenario_pool() -> PlayerPool {
    let mut players = Vec::with_capacity(300);
    for i in 0..300u32 {
        let quality = (300 - i) as f64 / 30.0;
        let is_pitcher = i % 5 >= 3;

        let (role, positions, values) = if is_pitcher {
            let mut values = CategoryValues::zero();
            values.set(Category::Strikeouts, quality);
            values.set(Category::Era, quality * 0.8);
            values.set(Category::Whip, quality * 0.7);
            let positions = if i % 10 == 3 {
                values.set(Category::SavesHolds, quality * 0.9);
                vec![Position::ReliefPitcher]
            } else {
                values.set(Category::QualityStarts, quality * 0.9);
                vec![Position::StartingPitcher]
            };
            (Role::Pitcher, positions, values)
        } else {
            let mut values = CategoryValues::zero();
            values.set(Category::Runs, quality);
            values.set(Category::TotalBases, quality * 0.9);
            values.set(Category::Rbi, quality * 0.85);
            values.set(Category::StolenBases, quality * 0.4);
            values.set(Category::OnBasePct, quality * 0.6);
            let positions = match i % 8 {
                0 => vec![Position::Catcher],
                1 => vec![Position::FirstBase],
                2 => vec![Position::SecondBase],
                3 => vec![Position::ThirdBase],
                4 => vec![Position::ShortStop],
                _ => vec![Position::Outfield],
            };
            (Role::Hitter, positions, values)
        };

        players.push(Player {
            id: i,
            name: format!("Player {i}"),
            role,
            positions,
            values,
            total_value: 0.0,
            adp: Some(1.0 + i as f64),
        });
    }
    PlayerPool::new(players).unwrap()
}

// ===========================================================================
// Benchmark scenario: 10 teams, 25 rounds, 300 players, slot 5, seed 42
// ===========================================================================

#[test]
fn scenario_roster_is_complete_and_legal() {
    let pool = scenario_pool();
    let config = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);

    let result = simulate_draft(&pool, 5, &config, &mut rng);

    // Exactly 25 unique players drafted.
    assert_eq!(result.my_picks.len(), 25);
    let mut ids: Vec<u32> = result.my_picks.iter().map(|p| p.player_id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 25);

    // Every assigned slot is one the player is actually eligible for.
    for pick in &result.my_picks {
        let player = &pool.players()[pick.pool_index];
        assert!(
            player.eligible_slots().contains(&pick.slot),
            "{} assigned to ineligible slot {}",
            player.name,
            pick.slot
        );
    }

    // No slot over capacity.
    let caps = config.slot_capacities();
    let mut used = [0usize; Slot::COUNT];
    for pick in &result.my_picks {
        used[pick.slot.index()] += 1;
    }
    for slot in Slot::ALL {
        assert!(
            used[slot.index()] <= caps[slot.index()],
            "slot {} over capacity",
            slot
        );
    }
}

#[test]
fn full_run_drafts_every_scheduled_pick_once() {
    let pool = scenario_pool();
    let config = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);

    let result = simulate_draft(&pool, 5, &config, &mut rng);

    // 250 scheduled picks, 300 players: the schedule exhausts first.
    assert_eq!(result.pick_log.len(), config.total_picks());

    // Every drafted player appears on exactly one team.
    let mut ids: Vec<u32> = result.pick_log.iter().map(|&(_, id)| id).collect();
    ids.sort_unstable();
    let before = ids.len();
    ids.dedup();
    assert_eq!(ids.len(), before);

    // No team exceeds its total slot capacity.
    let per_team_cap = config.total_roster_size();
    for team in 0..config.num_teams {
        let count = result.pick_log.iter().filter(|&&(t, _)| t == team).count();
        assert!(count <= per_team_cap);
    }
}

#[test]
fn my_team_totals_match_rostered_values() {
    let pool = scenario_pool();
    let config = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);

    let result = simulate_draft(&pool, 5, &config, &mut rng);

    let mut expected = CategoryValues::zero();
    for pick in &result.my_picks {
        let player = &pool.players()[pick.pool_index];
        let weight = if pick.slot == Slot::Bench {
            match player.role {
                Role::Pitcher => config.pitcher_bench_contribution,
                Role::Hitter => config.hitter_bench_contribution,
            }
        } else {
            1.0
        };
        expected.add_scaled(&player.values, weight);
    }

    let actual = &result.team_totals[5];
    for cat in Category::ALL {
        assert!(
            (actual.get(cat) - expected.get(cat)).abs() < 1e-9,
            "totals mismatch in {}",
            cat
        );
    }
}

// ===========================================================================
// Determinism
// ===========================================================================

#[test]
fn identical_inputs_produce_identical_results() {
    let pool = scenario_pool();
    let config = SimConfig::default();

    let mut rng_a = StdRng::seed_from_u64(42);
    let mut rng_b = StdRng::seed_from_u64(42);
    let a = simulate_draft(&pool, 5, &config, &mut rng_a);
    let b = simulate_draft(&pool, 5, &config, &mut rng_b);

    assert_eq!(a, b);
}

#[test]
fn parallel_and_sequential_batches_agree() {
    let pool = scenario_pool();
    let mut config = SimConfig::default();
    config.num_rounds = 8; // keep the batch quick

    let base = BatchOptions {
        slots: (0..config.num_teams).collect(),
        sims_per_slot: 2,
        master_seed: 42,
        parallel: false,
    };
    let mut par = base.clone();
    par.parallel = true;

    let seq_results = run_batch(&pool, &config, &base);
    let par_results = run_batch(&pool, &config, &par);

    assert_eq!(seq_results.len(), par_results.len());
    for (a, b) in seq_results.iter().zip(&par_results) {
        assert_eq!(a.my_slot, b.my_slot);
        assert_eq!(a.expected_wins, b.expected_wins);
        assert_eq!(a.cat_win_probs, b.cat_win_probs);
    }

    let summary = summarize(&seq_results, &config);
    assert_eq!(summary.num_sims, 20);
}

// ===========================================================================
// Dominant-category scenario
// ===========================================================================

#[test]
fn runaway_category_leader_gets_no_further_mcw() {
    let config = SimConfig::default();
    let cat = Category::Runs;

    // My team leads Runs outright.
    let mut team_totals = vec![CategoryValues::zero(); config.num_teams];
    team_totals[0].set(cat, 50.0);
    for (t, totals) in team_totals.iter_mut().enumerate().skip(1) {
        totals.set(cat, t as f64);
    }

    let rivals = RivalTotals::from_team_totals(&team_totals, 0);
    let mut standings =
        analyze_standings(&team_totals[0], &rivals, &config.categories, config.num_teams);
    detect_strategy(&mut standings, 10, config.num_teams, config.playoff_spots);

    assert_eq!(standings[0].category, cat);
    assert_eq!(standings[0].rank, 1.0);
    assert_eq!(standings[0].win_prob, 1.0);

    // A further pick that only adds Runs contributes zero marginal wins:
    // there is no team above to close a gap against.
    let mut pick_values = CategoryValues::zero();
    pick_values.set(cat, 5.0);
    let mcw = compute_mcw(&pick_values, &team_totals[0], &rivals, &standings, &config);
    assert_eq!(mcw, 0.0);
}

// ===========================================================================
// Evaluation over a full run
// ===========================================================================

#[test]
fn evaluation_counts_every_active_category() {
    let pool = scenario_pool();
    let config = SimConfig::default();
    let mut rng = StdRng::seed_from_u64(42);

    let result = simulate_draft(&pool, 5, &config, &mut rng);
    let eval = evaluate_draft(&result, &pool, &config);

    assert_eq!(eval.cat_win_probs.len(), config.categories.len());
    assert!(eval.expected_wins >= 0.0);
    assert!(eval.expected_wins <= config.categories.len() as f64);
    assert_eq!(eval.hitter_count + eval.pitcher_count, 25);
    assert_eq!(eval.sp_count + eval.rp_count, eval.pitcher_count);
}

#[test]
fn composition_steering_still_completes_legally() {
    let pool = scenario_pool();
    let mut config = SimConfig::default();
    config.max_hitters = Some(10);
    config.target_sp = Some(6);
    config.target_rp = Some(4);
    let mut rng = StdRng::seed_from_u64(42);

    let result = simulate_draft(&pool, 5, &config, &mut rng);
    let eval = evaluate_draft(&result, &pool, &config);

    // Steering reweights scores but never breaks roster legality.
    assert_eq!(result.my_picks.len(), 25);
    assert_eq!(eval.hitter_count + eval.pitcher_count, 25);
    assert!(eval.expected_wins.is_finite());
}

#[test]
fn window_vona_and_scarcity_toggles_still_complete() {
    let pool = scenario_pool();
    let mut config = SimConfig::default();
    config.use_window_vona = true;
    config.use_slot_scarcity = true;
    config.use_variable_sigma = true;
    config.scale_bpa_urgency = true;
    let mut rng = StdRng::seed_from_u64(42);

    let result = simulate_draft(&pool, 0, &config, &mut rng);
    assert_eq!(result.my_picks.len(), config.num_rounds);
    let eval = evaluate_draft(&result, &pool, &config);
    assert!(eval.expected_wins.is_finite());
}
