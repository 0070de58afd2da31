// Simulation configuration: every scoring weight and threshold as a named,
// versionable knob with documented defaults, loadable from a TOML file.
//
// The core performs no validation of knob ranges and no hyperparameter
// search; an external optimizer varies these values and reads the
// evaluator's aggregate metric as its objective.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pool::{Category, Slot};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[simulation]` table in a config TOML file.
#[derive(Debug, Deserialize)]
struct SimFile {
    simulation: SimConfig,
}

/// All tunable knobs for one simulation run.
///
/// Field defaults are the calibrated production values; the weight
/// coefficients were tuned by an external optimizer against the expected
/// weekly category wins objective.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // --- League shape ---
    pub num_teams: usize,
    pub num_rounds: usize,
    pub playoff_spots: usize,
    /// Roster slot capacities, keyed by slot label ("C", "OF", "BE", ...).
    pub roster: HashMap<String, usize>,
    /// Active scoring categories. Defaults to all ten.
    pub categories: Vec<Category>,

    // --- MCW strategy multipliers ---
    /// MCW credit multiplier for locked categories (rank 1-2, big gap below).
    pub lock_mcw_weight: f64,
    /// MCW credit multiplier for targeted categories (mid-table, flippable).
    pub target_mcw_weight: f64,

    // --- Draft score coefficients ---
    pub mcw_weight: f64,
    pub vona_weight_mcw: f64,
    pub vona_weight_bpa: f64,
    pub urgency_weight_mcw: f64,
    pub urgency_weight_bpa: f64,

    // --- Post-score adjustments ---
    pub availability_discount: f64,
    pub bench_penalty_rate: f64,

    // --- Bench contribution (how much bench stats count in team totals) ---
    /// Pitchers contribute more from the bench in daily leagues (streamed
    /// starters, rotated relievers).
    pub pitcher_bench_contribution: f64,
    pub hitter_bench_contribution: f64,

    // --- Opponent model ---
    pub adp_sigma: f64,
    /// ADP penalty applied when an opponent could only bench the player.
    pub opp_bench_adp_penalty: f64,

    // --- Feature toggles ---
    /// Scale the BPA-phase urgency term by draft progress.
    pub scale_bpa_urgency: bool,
    /// Use 1/remaining-capacity slot scarcity instead of binary roster fit.
    pub use_slot_scarcity: bool,
    /// Use ADP-dependent sigma = 10 + 0.1 * ADP instead of the fixed value.
    pub use_variable_sigma: bool,
    /// Use availability-weighted window VONA instead of literal next-best.
    pub use_window_vona: bool,
    /// Use per-position replacement-adjusted surplus value in BPA.
    pub use_surplus_value: bool,

    // --- Standings confidence ramp ---
    pub confidence_start: usize,
    pub confidence_end: usize,

    // --- Composition steering (None = unconstrained) ---
    pub target_sp: Option<usize>,
    pub target_rp: Option<usize>,
    pub max_hitters: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            num_teams: 10,
            num_rounds: 25,
            playoff_spots: 6,
            roster: default_roster(),
            categories: Category::ALL.to_vec(),

            lock_mcw_weight: 1.0,
            target_mcw_weight: 1.0,

            mcw_weight: 21.0,
            vona_weight_mcw: 0.16,
            vona_weight_bpa: 0.42,
            urgency_weight_mcw: 0.02,
            urgency_weight_bpa: 0.55,

            availability_discount: 0.19,
            bench_penalty_rate: 0.63,

            pitcher_bench_contribution: 0.45,
            hitter_bench_contribution: 0.20,

            adp_sigma: 18.0,
            opp_bench_adp_penalty: 15.0,

            scale_bpa_urgency: false,
            use_slot_scarcity: false,
            use_variable_sigma: false,
            use_window_vona: false,
            use_surplus_value: true,

            confidence_start: 40,
            confidence_end: 81,

            target_sp: None,
            target_rp: None,
            max_hitters: None,
        }
    }
}

fn default_roster() -> HashMap<String, usize> {
    let mut m = HashMap::new();
    m.insert("C".to_string(), 1);
    m.insert("1B".to_string(), 1);
    m.insert("2B".to_string(), 1);
    m.insert("3B".to_string(), 1);
    m.insert("SS".to_string(), 1);
    m.insert("OF".to_string(), 3);
    m.insert("UTIL".to_string(), 2);
    m.insert("SP".to_string(), 3);
    m.insert("RP".to_string(), 2);
    m.insert("P".to_string(), 2);
    m.insert("BE".to_string(), 8);
    m
}

impl SimConfig {
    /// Load a config from a TOML file with a `[simulation]` table. Absent
    /// keys fall back to the documented defaults.
    pub fn load(path: &Path) -> Result<SimConfig, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        let file: SimFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(file.simulation)
    }

    /// Slot capacities as a dense array indexed by `Slot`. Unknown roster
    /// keys are ignored.
    pub fn slot_capacities(&self) -> [usize; Slot::COUNT] {
        let mut caps = [0usize; Slot::COUNT];
        for (key, &count) in &self.roster {
            if let Some(slot) = Slot::from_config_key(key) {
                caps[slot.index()] = count;
            }
        }
        caps
    }

    /// Total roster capacity per team.
    pub fn total_roster_size(&self) -> usize {
        self.slot_capacities().iter().sum()
    }

    /// Total picks in a full draft schedule.
    pub fn total_picks(&self) -> usize {
        self.num_teams * self.num_rounds
    }

    /// Active categories for the given role.
    pub fn role_categories(&self, role: crate::pool::Role) -> Vec<Category> {
        self.categories
            .iter()
            .copied()
            .filter(|c| c.role() == role)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Role;

    #[test]
    fn defaults_fill_a_ten_team_league() {
        let config = SimConfig::default();
        assert_eq!(config.num_teams, 10);
        assert_eq!(config.num_rounds, 25);
        assert_eq!(config.total_roster_size(), 25);
        assert_eq!(config.total_picks(), 250);
        assert_eq!(config.categories.len(), Category::COUNT);
    }

    #[test]
    fn slot_capacities_map_known_keys() {
        let config = SimConfig::default();
        let caps = config.slot_capacities();
        assert_eq!(caps[Slot::Outfield.index()], 3);
        assert_eq!(caps[Slot::Bench.index()], 8);
        assert_eq!(caps[Slot::Utility.index()], 2);
    }

    #[test]
    fn unknown_roster_keys_ignored() {
        let mut config = SimConfig::default();
        config.roster.insert("XX".to_string(), 4);
        assert_eq!(config.total_roster_size(), 25);
    }

    #[test]
    fn partial_toml_overrides_keep_defaults() {
        let text = r#"
            [simulation]
            num_teams = 12
            mcw_weight = 15.0
            categories = ["R", "TB", "K", "ERA"]
        "#;
        let file: SimFile = toml::from_str(text).unwrap();
        let config = file.simulation;
        assert_eq!(config.num_teams, 12);
        assert_eq!(config.mcw_weight, 15.0);
        assert_eq!(config.num_rounds, 25);
        assert_eq!(config.categories.len(), 4);
        assert_eq!(config.role_categories(Role::Pitcher).len(), 2);
    }
}
