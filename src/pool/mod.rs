// Player pool: the immutable snapshot of draftable players for one
// simulation run, plus the closed category/position/slot vocabulary the
// whole engine is keyed on.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod loader;

pub use loader::PoolError;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Whether a player (or category) belongs to the hitting or pitching side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Hitter,
    Pitcher,
}

/// Orientation of a category's underlying raw statistic.
///
/// Stored category *values* are always oriented so that higher is better;
/// the direction records whether the raw stat behind the value runs the
/// other way (ERA, WHIP).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// The closed set of scoring categories the engine understands.
///
/// Which of these are *active* in a given league is configuration
/// (`SimConfig::categories`); the enum itself carries the per-category
/// facts (role, raw-stat direction, display label) as data so that no
/// string-keyed category access exists anywhere in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "R")]
    Runs,
    #[serde(rename = "TB")]
    TotalBases,
    #[serde(rename = "RBI")]
    Rbi,
    #[serde(rename = "SB")]
    StolenBases,
    #[serde(rename = "OBP")]
    OnBasePct,
    #[serde(rename = "K")]
    Strikeouts,
    #[serde(rename = "QS")]
    QualityStarts,
    #[serde(rename = "ERA")]
    Era,
    #[serde(rename = "WHIP")]
    Whip,
    #[serde(rename = "SVHD")]
    SavesHolds,
}

impl Category {
    pub const COUNT: usize = 10;

    /// All categories, hitting first, in display order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Runs,
        Category::TotalBases,
        Category::Rbi,
        Category::StolenBases,
        Category::OnBasePct,
        Category::Strikeouts,
        Category::QualityStarts,
        Category::Era,
        Category::Whip,
        Category::SavesHolds,
    ];

    /// Dense index for array-backed per-category storage.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Which side of the roster this category is scored from.
    pub fn role(self) -> Role {
        match self {
            Category::Runs
            | Category::TotalBases
            | Category::Rbi
            | Category::StolenBases
            | Category::OnBasePct => Role::Hitter,
            Category::Strikeouts
            | Category::QualityStarts
            | Category::Era
            | Category::Whip
            | Category::SavesHolds => Role::Pitcher,
        }
    }

    /// Orientation of the raw stat behind this category.
    pub fn direction(self) -> Direction {
        match self {
            Category::Era | Category::Whip => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }

    /// Short display label ("R", "TB", ...).
    pub fn label(self) -> &'static str {
        match self {
            Category::Runs => "R",
            Category::TotalBases => "TB",
            Category::Rbi => "RBI",
            Category::StolenBases => "SB",
            Category::OnBasePct => "OBP",
            Category::Strikeouts => "K",
            Category::QualityStarts => "QS",
            Category::Era => "ERA",
            Category::Whip => "WHIP",
            Category::SavesHolds => "SVHD",
        }
    }

    /// Parse a display label back into a category. Case-insensitive.
    pub fn from_label(s: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-category `f64` values, densely indexed by `Category`.
///
/// Used both for a player's category values and for a team's running
/// totals. A category the player does not contribute to is simply 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryValues([f64; Category::COUNT]);

impl CategoryValues {
    pub fn zero() -> Self {
        CategoryValues::default()
    }

    pub fn get(&self, cat: Category) -> f64 {
        self.0[cat.index()]
    }

    pub fn set(&mut self, cat: Category, value: f64) {
        self.0[cat.index()] = value;
    }

    /// Add `other`, scaled by `weight`, into self. Used for team totals
    /// (weight < 1.0 for bench-assigned players).
    pub fn add_scaled(&mut self, other: &CategoryValues, weight: f64) {
        for i in 0..Category::COUNT {
            self.0[i] += other.0[i] * weight;
        }
    }

    /// Sum of values over the given categories.
    pub fn sum_over(&self, cats: &[Category]) -> f64 {
        cats.iter().map(|&c| self.get(c)).sum()
    }
}

// ---------------------------------------------------------------------------
// Positions and roster slots
// ---------------------------------------------------------------------------

/// A player's eligible field position, as delivered by the pool provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Catcher,
    FirstBase,
    SecondBase,
    ThirdBase,
    ShortStop,
    LeftField,
    CenterField,
    RightField,
    Outfield,
    DesignatedHitter,
    StartingPitcher,
    ReliefPitcher,
    TwoWay,
}

impl Position {
    /// Parse a provider position string ("C", "1B", "OF", "TWP", ...).
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "C" => Some(Position::Catcher),
            "1B" => Some(Position::FirstBase),
            "2B" => Some(Position::SecondBase),
            "3B" => Some(Position::ThirdBase),
            "SS" => Some(Position::ShortStop),
            "LF" => Some(Position::LeftField),
            "CF" => Some(Position::CenterField),
            "RF" => Some(Position::RightField),
            "OF" => Some(Position::Outfield),
            "DH" => Some(Position::DesignatedHitter),
            "SP" => Some(Position::StartingPitcher),
            "RP" => Some(Position::ReliefPitcher),
            "TWP" => Some(Position::TwoWay),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::ShortStop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
            Position::Outfield => "OF",
            Position::DesignatedHitter => "DH",
            Position::StartingPitcher => "SP",
            Position::ReliefPitcher => "RP",
            Position::TwoWay => "TWP",
        }
    }

    /// Roster slots this position can occupy, most restrictive first
    /// (dedicated slot, then flex, then bench). The greedy assignment in
    /// `RosterState` relies on this ordering.
    pub fn eligible_slots(self) -> &'static [Slot] {
        match self {
            Position::Catcher => &[Slot::Catcher, Slot::Utility, Slot::Bench],
            Position::FirstBase => &[Slot::FirstBase, Slot::Utility, Slot::Bench],
            Position::SecondBase => &[Slot::SecondBase, Slot::Utility, Slot::Bench],
            Position::ThirdBase => &[Slot::ThirdBase, Slot::Utility, Slot::Bench],
            Position::ShortStop => &[Slot::ShortStop, Slot::Utility, Slot::Bench],
            Position::LeftField
            | Position::CenterField
            | Position::RightField
            | Position::Outfield => &[Slot::Outfield, Slot::Utility, Slot::Bench],
            Position::DesignatedHitter => &[Slot::Utility, Slot::Bench],
            Position::StartingPitcher => &[Slot::StartingPitcher, Slot::Pitcher, Slot::Bench],
            Position::ReliefPitcher => &[Slot::ReliefPitcher, Slot::Pitcher, Slot::Bench],
            Position::TwoWay => &[
                Slot::Utility,
                Slot::StartingPitcher,
                Slot::Pitcher,
                Slot::Bench,
            ],
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// A roster slot type. Capacities come from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Catcher,
    FirstBase,
    SecondBase,
    ThirdBase,
    ShortStop,
    Outfield,
    Utility,
    StartingPitcher,
    ReliefPitcher,
    Pitcher,
    Bench,
}

impl Slot {
    pub const COUNT: usize = 11;

    pub const ALL: [Slot; Slot::COUNT] = [
        Slot::Catcher,
        Slot::FirstBase,
        Slot::SecondBase,
        Slot::ThirdBase,
        Slot::ShortStop,
        Slot::Outfield,
        Slot::Utility,
        Slot::StartingPitcher,
        Slot::ReliefPitcher,
        Slot::Pitcher,
        Slot::Bench,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse a roster-config key ("C", "OF", "UTIL", "BE", ...).
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "C" => Some(Slot::Catcher),
            "1B" => Some(Slot::FirstBase),
            "2B" => Some(Slot::SecondBase),
            "3B" => Some(Slot::ThirdBase),
            "SS" => Some(Slot::ShortStop),
            "OF" => Some(Slot::Outfield),
            "UTIL" => Some(Slot::Utility),
            "SP" => Some(Slot::StartingPitcher),
            "RP" => Some(Slot::ReliefPitcher),
            "P" => Some(Slot::Pitcher),
            "BE" | "BN" => Some(Slot::Bench),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Slot::Catcher => "C",
            Slot::FirstBase => "1B",
            Slot::SecondBase => "2B",
            Slot::ThirdBase => "3B",
            Slot::ShortStop => "SS",
            Slot::Outfield => "OF",
            Slot::Utility => "UTIL",
            Slot::StartingPitcher => "SP",
            Slot::ReliefPitcher => "RP",
            Slot::Pitcher => "P",
            Slot::Bench => "BE",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One draftable player. Immutable once loaded; a single pool snapshot is
/// shared read-only across a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub role: Role,
    /// Eligible positions, provider order. Never empty in a valid pool.
    pub positions: Vec<Position>,
    /// Per-category values; categories the player doesn't contribute to are 0.
    pub values: CategoryValues,
    /// Aggregate value across the player's own-role categories.
    pub total_value: f64,
    /// Average draft position estimate. None when the provider has no data.
    pub adp: Option<f64>,
}

impl Player {
    /// Roster slots this player can occupy, in most-restrictive-first order
    /// across all eligible positions, deduplicated.
    pub fn eligible_slots(&self) -> Vec<Slot> {
        let mut seen = 0u16;
        let mut ordered = Vec::with_capacity(4);
        for pos in &self.positions {
            for &slot in pos.eligible_slots() {
                let bit = 1u16 << slot.index();
                if seen & bit == 0 {
                    seen |= bit;
                    ordered.push(slot);
                }
            }
        }
        ordered
    }

    /// For pitchers without explicit position data: infer SP vs RP from
    /// which pitching categories the player actually produces in.
    pub fn pitcher_kind(&self) -> Position {
        if self.values.get(Category::QualityStarts) != 0.0 {
            Position::StartingPitcher
        } else if self.values.get(Category::SavesHolds) != 0.0 {
            Position::ReliefPitcher
        } else {
            Position::StartingPitcher
        }
    }

    /// The single position used for VONA/replacement lookups: the pitcher
    /// kind for pitchers, otherwise the first eligible position.
    pub fn primary_position(&self) -> Position {
        match self.role {
            Role::Pitcher => self
                .positions
                .iter()
                .copied()
                .find(|p| {
                    matches!(p, Position::StartingPitcher | Position::ReliefPitcher)
                })
                .unwrap_or_else(|| self.pitcher_kind()),
            Role::Hitter => self.positions.first().copied().unwrap_or(Position::Outfield),
        }
    }

    /// Active categories relevant to this player's role.
    pub fn role_categories(&self, active: &[Category]) -> Vec<Category> {
        active
            .iter()
            .copied()
            .filter(|c| c.role() == self.role)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

/// Immutable snapshot of all draftable players for one run, ordered by the
/// provider's overall rank.
#[derive(Debug, Clone)]
pub struct PlayerPool {
    players: Vec<Player>,
}

impl PlayerPool {
    /// Build a pool, validating the config-time invariants the engine
    /// relies on: unique ids and at least one resolvable slot per player.
    pub fn new(players: Vec<Player>) -> Result<Self, PoolError> {
        let mut seen = std::collections::HashSet::with_capacity(players.len());
        for p in &players {
            if !seen.insert(p.id) {
                return Err(PoolError::DuplicateId { id: p.id });
            }
            if p.positions.is_empty() {
                return Err(PoolError::NoEligibleSlots {
                    id: p.id,
                    name: p.name.clone(),
                });
            }
        }
        Ok(PlayerPool { players })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
