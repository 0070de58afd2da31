// Probabilistic pick availability and the rival decision policy.
//
// Availability asks "will this player still be on the board at my next
// turn?", modeled as a normal distribution around the player's ADP.
// Opponents draft by perturbing ADP with Gaussian noise and taking the
// first player that fits their roster.

use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::config::SimConfig;
use crate::draft::roster::RosterState;
use crate::pool::Player;

/// ADP assigned to players the provider has no draft data for. Far enough
/// out that ADP-driven opponents never reach for them.
pub const UNDRAFTED_ADP: f64 = 999.0;

/// Floor for sigma so the availability model degenerates to a step
/// function instead of dividing by zero.
const SIGMA_EPSILON: f64 = 1e-9;

/// ADP-dependent sigma parameters: early picks are predictable, late
/// picks are noise.
const VARIABLE_SIGMA_BASE: f64 = 10.0;
const VARIABLE_SIGMA_SLOPE: f64 = 0.1;

// ---------------------------------------------------------------------------
// Normal CDF
// ---------------------------------------------------------------------------

/// Standard normal CDF via the Abramowitz-Stegun rational approximation,
/// clamped to exactly 0/1 beyond |x| = 8.
fn normal_cdf(x: f64) -> f64 {
    if x < -8.0 {
        return 0.0;
    }
    if x > 8.0 {
        return 1.0;
    }
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let abs_x = x.abs();
    let t = 1.0 / (1.0 + P * abs_x);
    let y = 1.0
        - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-abs_x * abs_x / 2.0).exp();
    0.5 * (1.0 + sign * y)
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// Probability the player is still available `picks_until_mine` picks from
/// now, given their ADP and the noise width sigma.
pub fn availability(adp: f64, current_pick: usize, picks_until_mine: usize, sigma: f64) -> f64 {
    let target_pick = (current_pick + picks_until_mine) as f64;
    let z = (target_pick - adp) / sigma.max(SIGMA_EPSILON);
    (1.0 - normal_cdf(z)).clamp(0.0, 1.0)
}

/// Resolve the sigma for a player: fixed, or ADP-dependent when the
/// variable-sigma model is on.
pub fn sigma_for(adp: Option<f64>, config: &SimConfig) -> f64 {
    if config.use_variable_sigma {
        VARIABLE_SIGMA_BASE + VARIABLE_SIGMA_SLOPE * adp.unwrap_or(UNDRAFTED_ADP)
    } else {
        config.adp_sigma
    }
}

// ---------------------------------------------------------------------------
// Opponent pick policy
// ---------------------------------------------------------------------------

/// Choose a rival team's pick: perturb every available player's ADP with
/// Gaussian noise (bench-only fits get an ADP penalty; real opponents
/// reach for starters), sort ascending, and take the first that fits the
/// roster. Falls back to the best-noised player outright if nothing fits,
/// so a run never stalls on a rigid roster.
///
/// Returns an index into `players`, or None when the pool is exhausted.
pub fn opponent_pick(
    players: &[Player],
    available: &[bool],
    roster: &RosterState,
    config: &SimConfig,
    rng: &mut StdRng,
) -> Option<usize> {
    let mut candidates: Vec<(f64, usize)> = Vec::new();

    for (idx, p) in players.iter().enumerate() {
        if !available[idx] {
            continue;
        }
        let adp = p.adp.unwrap_or(UNDRAFTED_ADP);
        let sigma = sigma_for(p.adp, config);
        let noise = Normal::new(0.0, sigma.max(SIGMA_EPSILON))
            .map(|d| d.sample(rng))
            .unwrap_or(0.0);
        let mut noisy_adp = adp + noise;
        if !roster.has_starting_need(p) {
            noisy_adp += config.opp_bench_adp_penalty;
        }
        candidates.push((noisy_adp, idx));
    }

    candidates.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });

    candidates
        .iter()
        .find(|&&(_, idx)| roster.can_add(&players[idx]))
        .or_else(|| candidates.first())
        .map(|&(_, idx)| idx)
}
