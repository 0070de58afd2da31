// Value over next available (VONA).
//
// The positional cost of waiting: how much value disappears if this pick
// passes on a player and takes the next-best option at the same position.
// The window variant prices in *who will actually still be there* at the
// simulated team's next turn instead of the literal next player.

use std::collections::HashMap;

use crate::config::SimConfig;
use crate::draft::opponent::{availability, sigma_for, UNDRAFTED_ADP};
use crate::pool::{Player, Position};
use crate::valuation::normalize::{normalized_value, CategoryStats};

/// One available player on the position board.
#[derive(Debug, Clone, Copy)]
pub struct RankedPlayer {
    pub id: u32,
    pub value: f64,
    pub adp: Option<f64>,
}

/// Available players grouped by eligible position, sorted by normalized
/// value descending (id ascending on ties, for determinism). Rebuilt per
/// simulated-team pick from the current availability set.
#[derive(Debug, Clone, Default)]
pub struct PositionBoard {
    by_pos: HashMap<Position, Vec<RankedPlayer>>,
}

impl PositionBoard {
    pub fn build(available: &[&Player], stats: &CategoryStats, active: &[crate::pool::Category]) -> Self {
        let mut by_pos: HashMap<Position, Vec<RankedPlayer>> = HashMap::new();
        for p in available {
            let value = normalized_value(p, stats, active);
            for &pos in &p.positions {
                by_pos.entry(pos).or_default().push(RankedPlayer {
                    id: p.id,
                    value,
                    adp: p.adp,
                });
            }
        }
        for entries in by_pos.values_mut() {
            entries.sort_by(|a, b| {
                b.value
                    .partial_cmp(&a.value)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        PositionBoard { by_pos }
    }

    pub fn get(&self, pos: Position) -> &[RankedPlayer] {
        self.by_pos.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// VONA at the player's primary position: the gap to the next-best
    /// still-available player there. The last player at a position keeps
    /// their whole value; an unlisted player scores 0.
    pub fn vona(&self, player: &Player) -> f64 {
        let entries = self.get(player.primary_position());
        let Some(my_idx) = entries.iter().position(|e| e.id == player.id) else {
            return 0.0;
        };
        let my_value = entries[my_idx].value;
        match entries.get(my_idx + 1) {
            Some(next) => my_value - next.value,
            None => my_value,
        }
    }

    /// Window VONA: my value minus the expected value of the best
    /// alternative still available at my next turn.
    ///
    /// Walking rivals in value order, the chance a rival is the *first*
    /// available alternative is their own availability times the
    /// probability every better rival is already gone.
    pub fn window_vona(
        &self,
        player: &Player,
        current_pick: usize,
        picks_until_mine: usize,
        config: &SimConfig,
    ) -> f64 {
        let entries = self.get(player.primary_position());
        let mut my_value = None;
        let mut expected_replacement = 0.0;
        let mut all_better_gone = 1.0;

        for e in entries {
            if e.id == player.id {
                my_value = Some(e.value);
                continue;
            }
            let adp = e.adp.unwrap_or(UNDRAFTED_ADP);
            let avail = availability(
                adp,
                current_pick,
                picks_until_mine,
                sigma_for(e.adp, config),
            );
            expected_replacement += e.value * avail * all_better_gone;
            all_better_gone *= 1.0 - avail;
        }

        match my_value {
            Some(v) => v - expected_replacement,
            None => 0.0,
        }
    }
}
