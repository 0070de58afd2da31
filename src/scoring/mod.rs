// Candidate scoring: category standings, marginal category wins, and the
// blended draft score.

pub mod blend;
pub mod mcw;
pub mod standings;

pub use blend::{score_candidate, standings_confidence, urgency, ScoreContext};
pub use mcw::compute_mcw;
pub use standings::{
    analyze_standings, compute_rank, detect_strategy, win_prob_from_rank, CategoryStanding,
    RivalTotals, Strategy,
};
