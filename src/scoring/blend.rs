// Draft score blending: folds the marginal-win estimate, the value models,
// pick urgency, and roster fit into one rankable score per candidate.
//
// Early in a draft the standings are noise, so the score leans on best
// player available; as the picture firms up the category-aware side takes
// over along a confidence ramp.

use crate::config::SimConfig;
use crate::draft::opponent::{availability, sigma_for};
use crate::draft::roster::RosterState;
use crate::draft::TeamComposition;
use crate::pool::{CategoryValues, Player, Position, Role};
use crate::scoring::mcw::compute_mcw;
use crate::scoring::standings::{CategoryStanding, RivalTotals};
use crate::valuation::normalize::{normalized_value, CategoryStats};
use crate::valuation::replacement::{surplus_value, ReplacementLevels};
use crate::valuation::vona::PositionBoard;

/// Cap on the urgency signal, in picks.
const URGENCY_CAP: f64 = 15.0;

/// Draft progress beyond which bench-bound picks start paying a penalty.
const BENCH_PENALTY_PROGRESS_GATE: f64 = 0.15;

/// Hard floor for the bench penalty multiplier.
const BENCH_PENALTY_FLOOR: f64 = 0.35;

/// Softer floor while the bench still has room for streamable pitchers.
const STREAM_PITCHER_FLOOR: f64 = 0.75;

/// Bench pitchers worth carrying for streaming before the floor hardens.
const STREAM_PITCHER_ALLOWANCE: usize = 2;

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// Confidence in the standings signal: ramps 0 -> 1 across the configured
/// pick window.
pub fn standings_confidence(total_picks_made: usize, config: &SimConfig) -> f64 {
    let span = config.confidence_end as f64 - config.confidence_start as f64;
    if span <= 0.0 {
        return 1.0;
    }
    ((total_picks_made as f64 - config.confidence_start as f64) / span).clamp(0.0, 1.0)
}

/// How much of the player's ADP window this team has burned: positive once
/// waiting another turn likely loses the player.
pub fn urgency(adp: Option<f64>, current_pick: usize, picks_until_mine: usize) -> f64 {
    match adp {
        Some(adp) => {
            let adp_gap = adp - current_pick as f64;
            (picks_until_mine as f64 - adp_gap).clamp(0.0, URGENCY_CAP)
        }
        None => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Score context
// ---------------------------------------------------------------------------

/// Everything the blender needs about the world at one pick. Borrowed from
/// the engine's per-pick/per-round state; owns nothing.
pub struct ScoreContext<'a> {
    pub my_totals: &'a CategoryValues,
    pub rivals: &'a RivalTotals,
    pub standings: &'a [CategoryStanding],
    pub stats: &'a CategoryStats,
    pub board: &'a PositionBoard,
    pub levels: &'a ReplacementLevels,
    pub roster: &'a RosterState,
    pub composition: &'a TeamComposition,
    pub current_pick: usize,
    pub picks_until_mine: usize,
    pub my_pick_count: usize,
}

/// Composition steering: whether this candidate should be treated as
/// bench-grade because the team already hit its configured quota for the
/// candidate's kind.
fn steered_to_bench(player: &Player, composition: &TeamComposition, config: &SimConfig) -> bool {
    match player.role {
        Role::Hitter => config
            .max_hitters
            .is_some_and(|max| composition.hitters >= max),
        Role::Pitcher => match player.primary_position() {
            Position::ReliefPitcher => config
                .target_rp
                .is_some_and(|target| composition.rp >= target),
            _ => config
                .target_sp
                .is_some_and(|target| composition.sp >= target),
        },
    }
}

// ---------------------------------------------------------------------------
// Blended score
// ---------------------------------------------------------------------------

/// Score one roster-eligible candidate. Higher is better; the engine takes
/// the argmax over all available candidates.
pub fn score_candidate(player: &Player, ctx: &ScoreContext, config: &SimConfig) -> f64 {
    let active = &config.categories;
    let nv = normalized_value(player, ctx.stats, active);
    let vona = if config.use_window_vona {
        ctx.board
            .window_vona(player, ctx.current_pick, ctx.picks_until_mine, config)
    } else {
        ctx.board.vona(player)
    };
    let urg = urgency(player.adp, ctx.current_pick, ctx.picks_until_mine);

    let steered = steered_to_bench(player, ctx.composition, config);
    let starting_need = ctx.roster.has_starting_need(player) && !steered;

    let roster_fit = if config.use_slot_scarcity {
        if steered {
            0.0
        } else {
            ctx.roster.slot_scarcity(player)
        }
    } else if starting_need {
        1.0
    } else {
        0.0
    };

    let confidence = standings_confidence(ctx.current_pick, config);
    let draft_progress = (ctx.my_pick_count as f64 / config.num_rounds as f64).min(1.0);

    let bpa = if config.use_surplus_value {
        surplus_value(player, nv, ctx.levels)
    } else {
        nv
    };
    let bpa_urgency_weight = if config.scale_bpa_urgency {
        config.urgency_weight_bpa * draft_progress
    } else {
        config.urgency_weight_bpa
    };
    let bpa_score = bpa + vona * config.vona_weight_bpa + urg * bpa_urgency_weight;

    // Standings-aware blend needs at least two full rounds of data from
    // every team before the MCW signal means anything.
    let has_mcw = ctx.current_pick >= 2 * config.num_teams;

    let mut score = if has_mcw && confidence > 0.0 {
        let mcw = compute_mcw(&player.values, ctx.my_totals, ctx.rivals, ctx.standings, config);
        let mcw_score = mcw * config.mcw_weight * confidence
            + vona * config.vona_weight_mcw
            + urg * config.urgency_weight_mcw
            + roster_fit * draft_progress;
        mcw_score * confidence + bpa_score * (1.0 - confidence)
    } else {
        bpa_score
    };

    // Discount players likely to still be there next turn. Window VONA
    // already prices availability into the value signal, so skip the
    // discount to avoid counting it twice.
    if !config.use_window_vona {
        if let Some(adp) = player.adp {
            let avail = availability(
                adp,
                ctx.current_pick,
                ctx.picks_until_mine,
                sigma_for(player.adp, config),
            );
            score *= 1.0 - avail * config.availability_discount;
        }
    }

    // Bench penalty, once the draft is far enough along that bench-bound
    // picks displace real starters.
    if !starting_need && draft_progress > BENCH_PENALTY_PROGRESS_GATE {
        let floor = if player.role == Role::Pitcher
            && ctx.composition.bench_pitchers < STREAM_PITCHER_ALLOWANCE
        {
            STREAM_PITCHER_FLOOR
        } else {
            BENCH_PENALTY_FLOOR
        };
        score *= floor.max(1.0 - draft_progress * config.bench_penalty_rate);
    }

    score
}
