// Draft mechanics: roster state, the rival pick policy, and the
// pick-by-pick simulation engine.

pub mod engine;
pub mod opponent;
pub mod roster;

pub use engine::{simulate_draft, DraftResult, PickRecord};
pub use roster::RosterState;

use serde::{Deserialize, Serialize};

/// Running composition counters for one team's roster, updated as picks
/// are assigned. Drives composition steering and post-draft diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamComposition {
    pub hitters: usize,
    pub pitchers: usize,
    pub sp: usize,
    pub rp: usize,
    pub bench_pitchers: usize,
}
