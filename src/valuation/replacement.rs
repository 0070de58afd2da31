// Replacement-level surplus value (VORP).
//
// The replacement level at a position is the normalized value of the last
// player who would still start somewhere in the league; surplus is how far
// a candidate clears the level at their best eligible position. This is
// what makes a scarce position's mediocre starter outrank a deep
// position's slightly better one.

use std::collections::HashMap;

use crate::config::SimConfig;
use crate::pool::{Player, Position, Slot};
use crate::valuation::normalize::{normalized_value, CategoryStats};

/// Per-position replacement levels over the currently available pool.
/// Recomputed at most once per round by the engine.
#[derive(Debug, Clone, Default)]
pub struct ReplacementLevels {
    by_pos: HashMap<Position, f64>,
}

/// The dedicated starting slot whose capacity sizes a position's starter
/// count. Positions without a dedicated slot (DH, two-way) draw from the
/// flex pool.
fn starting_slot_for(pos: Position) -> Slot {
    match pos {
        Position::Catcher => Slot::Catcher,
        Position::FirstBase => Slot::FirstBase,
        Position::SecondBase => Slot::SecondBase,
        Position::ThirdBase => Slot::ThirdBase,
        Position::ShortStop => Slot::ShortStop,
        Position::LeftField
        | Position::CenterField
        | Position::RightField
        | Position::Outfield => Slot::Outfield,
        Position::StartingPitcher => Slot::StartingPitcher,
        Position::ReliefPitcher => Slot::ReliefPitcher,
        Position::DesignatedHitter | Position::TwoWay => Slot::Utility,
    }
}

impl ReplacementLevels {
    /// Compute replacement levels for every position present among the
    /// available players.
    ///
    /// Per position: sort available normalized values descending; the
    /// replacement level sits at index (starting-slots-per-team × teams
    /// − 1), clamped to the last available player when the pool is
    /// shallower than the league's demand. Positions with zero configured
    /// slots get no entry.
    pub fn compute(
        available: &[&Player],
        stats: &CategoryStats,
        config: &SimConfig,
    ) -> ReplacementLevels {
        let caps = config.slot_capacities();
        let mut values_by_pos: HashMap<Position, Vec<f64>> = HashMap::new();

        for p in available {
            let nv = normalized_value(p, stats, &config.categories);
            for &pos in &p.positions {
                values_by_pos.entry(pos).or_default().push(nv);
            }
        }

        let mut by_pos = HashMap::with_capacity(values_by_pos.len());
        for (pos, mut values) in values_by_pos {
            let slots_per_team = caps[starting_slot_for(pos).index()];
            if slots_per_team == 0 {
                continue;
            }
            values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

            let idx = slots_per_team * config.num_teams - 1;
            let level = if idx < values.len() {
                values[idx]
            } else {
                // Pool shallower than league demand: the worst available
                // player is the replacement.
                *values.last().unwrap_or(&0.0)
            };
            by_pos.insert(pos, level);
        }

        ReplacementLevels { by_pos }
    }

    pub fn get(&self, pos: Position) -> Option<f64> {
        self.by_pos.get(&pos).copied()
    }
}

/// Surplus value: the candidate's normalized value over the replacement
/// level at their most favorable eligible position. Falls back to the
/// plain normalized value when no eligible position has a level.
pub fn surplus_value(player: &Player, nv: f64, levels: &ReplacementLevels) -> f64 {
    player
        .positions
        .iter()
        .filter_map(|&pos| levels.get(pos).map(|level| nv - level))
        .fold(None, |best: Option<f64>, s| {
            Some(best.map_or(s, |b| b.max(s)))
        })
        .unwrap_or(nv)
}
