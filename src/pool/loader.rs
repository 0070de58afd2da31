// Pool snapshot loading (CSV and SQLite).
//
// The engine itself never performs I/O; these loaders turn a provider
// snapshot into a validated `PlayerPool` up front. Malformed CSV rows are
// skipped with a warning rather than failing the whole load.

use std::io::Read;
use std::path::Path;

use rusqlite::Connection;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use super::{Category, CategoryValues, Player, PlayerPool, Position, Role};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to read pool file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("duplicate player id {id} in pool snapshot")]
    DuplicateId { id: u32 },

    #[error("player {id} ({name}) has no resolvable roster slot")]
    NoEligibleSlots { id: u32, name: String },
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

/// One pool snapshot CSV row. Category columns use the display labels;
/// a missing value deserializes to 0.0.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawPoolRow {
    id: u32,
    name: String,
    role: String,
    /// Slash-separated eligible positions, e.g. "2B/SS" or "SP".
    #[serde(default)]
    positions: String,
    #[serde(default)]
    adp: Option<f64>,
    /// Aggregate value; recomputed from category values when absent.
    #[serde(default)]
    total: Option<f64>,
    #[serde(default)]
    R: f64,
    #[serde(default)]
    TB: f64,
    #[serde(default)]
    RBI: f64,
    #[serde(default)]
    SB: f64,
    #[serde(default)]
    OBP: f64,
    #[serde(default)]
    K: f64,
    #[serde(default)]
    QS: f64,
    #[serde(default)]
    ERA: f64,
    #[serde(default)]
    WHIP: f64,
    #[serde(default)]
    SVHD: f64,
}

impl RawPoolRow {
    fn values(&self) -> CategoryValues {
        let mut v = CategoryValues::zero();
        v.set(Category::Runs, self.R);
        v.set(Category::TotalBases, self.TB);
        v.set(Category::Rbi, self.RBI);
        v.set(Category::StolenBases, self.SB);
        v.set(Category::OnBasePct, self.OBP);
        v.set(Category::Strikeouts, self.K);
        v.set(Category::QualityStarts, self.QS);
        v.set(Category::Era, self.ERA);
        v.set(Category::Whip, self.WHIP);
        v.set(Category::SavesHolds, self.SVHD);
        v
    }
}

// ---------------------------------------------------------------------------
// Shared row -> Player conversion
// ---------------------------------------------------------------------------

fn parse_role(s: &str) -> Option<Role> {
    match s.to_lowercase().as_str() {
        "hitter" => Some(Role::Hitter),
        "pitcher" => Some(Role::Pitcher),
        _ => None,
    }
}

fn parse_positions(s: &str) -> Vec<Position> {
    s.split('/')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter_map(|t| {
            let pos = Position::from_str_pos(t);
            if pos.is_none() {
                warn!("ignoring unknown position token '{t}'");
            }
            pos
        })
        .collect()
}

fn build_player(
    id: u32,
    name: String,
    role: Role,
    positions_str: &str,
    values: CategoryValues,
    total: Option<f64>,
    adp: Option<f64>,
    active: &[Category],
) -> Player {
    let mut positions = parse_positions(positions_str);

    let mut player = Player {
        id,
        name,
        role,
        positions: Vec::new(),
        values,
        total_value: 0.0,
        adp,
    };

    // Pitchers with no explicit position data: infer SP/RP from production.
    if positions.is_empty() && role == Role::Pitcher {
        positions.push(player.pitcher_kind());
    }
    player.positions = positions;

    player.total_value = total.unwrap_or_else(|| {
        let own = player.role_categories(active);
        player.values.sum_over(&own)
    });

    player
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a pool snapshot from a CSV file.
pub fn load_pool_csv(path: &Path, active: &[Category]) -> Result<PlayerPool, PoolError> {
    let file = std::fs::File::open(path).map_err(|e| PoolError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_pool_from_reader(file, &path.display().to_string(), active)
}

fn load_pool_from_reader<R: Read>(
    rdr: R,
    path: &str,
    active: &[Category],
) -> Result<PlayerPool, PoolError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();

    for result in reader.deserialize::<RawPoolRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed pool row: {e}");
                continue;
            }
        };
        let Some(role) = parse_role(&raw.role) else {
            warn!("skipping player '{}': unknown role '{}'", raw.name, raw.role);
            continue;
        };
        let values = raw.values();
        players.push(build_player(
            raw.id,
            raw.name.trim().to_string(),
            role,
            &raw.positions,
            values,
            raw.total,
            raw.adp,
            active,
        ));
    }

    if players.is_empty() {
        warn!("pool snapshot {path} produced no players");
    }
    PlayerPool::new(players)
}

// ---------------------------------------------------------------------------
// SQLite loader
// ---------------------------------------------------------------------------

/// Load a pool snapshot from the provider's SQLite database.
///
/// Expects the ingestion schema: a `rankings` table with one value column
/// per category plus role/ADP, joined to `players` for identity and
/// eligible positions, filtered by season and ordered by overall rank.
pub fn load_pool_sqlite(path: &Path, season: i32, active: &[Category]) -> Result<PlayerPool, PoolError> {
    let conn = Connection::open(path)?;
    load_pool_from_conn(&conn, season, active)
}

fn load_pool_from_conn(
    conn: &Connection,
    season: i32,
    active: &[Category],
) -> Result<PlayerPool, PoolError> {
    let mut stmt = conn.prepare(
        "SELECT r.player_id, r.total_value,
                r.val_r, r.val_tb, r.val_rbi, r.val_sb, r.val_obp,
                r.val_k, r.val_qs, r.val_era, r.val_whip, r.val_svhd,
                r.role, r.adp,
                p.name, p.positions
         FROM rankings r
         JOIN players p ON r.player_id = p.player_id
         WHERE r.season = ?1
         ORDER BY r.overall_rank",
    )?;

    let mut rows = stmt.query([season])?;
    let mut players = Vec::new();

    while let Some(row) = rows.next()? {
        let id: u32 = row.get(0)?;
        let total: Option<f64> = row.get(1)?;

        let mut values = CategoryValues::zero();
        for (i, cat) in Category::ALL.iter().enumerate() {
            let v: Option<f64> = row.get(2 + i)?;
            values.set(*cat, v.unwrap_or(0.0));
        }

        let role_str: String = row.get(12)?;
        let adp: Option<f64> = row.get(13)?;
        let name: String = row.get(14)?;
        let positions_str: Option<String> = row.get(15)?;

        let Some(role) = parse_role(&role_str) else {
            warn!("skipping player '{name}': unknown role '{role_str}'");
            continue;
        };

        players.push(build_player(
            id,
            name,
            role,
            positions_str.as_deref().unwrap_or(""),
            values,
            total,
            adp,
            active,
        ));
    }

    PlayerPool::new(players)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVE: &[Category] = &Category::ALL;

    const SAMPLE_CSV: &str = "\
id,name,role,positions,adp,total,R,TB,RBI,SB,OBP,K,QS,ERA,WHIP,SVHD
1,Alpha Hitter,hitter,2B/SS,3.5,6.0,1.5,1.5,1.0,1.0,1.0,0,0,0,0,0
2,Beta Pitcher,pitcher,SP,10.2,,0,0,0,0,0,2.0,1.5,1.0,0.5,0
3,Gamma Closer,pitcher,,25.0,,0,0,0,0,0,0.5,0,0.2,0.1,1.8
";

    #[test]
    fn csv_loads_players_with_positions() {
        let pool = load_pool_from_reader(SAMPLE_CSV.as_bytes(), "test.csv", ACTIVE).unwrap();
        assert_eq!(pool.len(), 3);

        let alpha = &pool.players()[0];
        assert_eq!(alpha.role, Role::Hitter);
        assert_eq!(alpha.positions, vec![Position::SecondBase, Position::ShortStop]);
        assert_eq!(alpha.adp, Some(3.5));
        // Explicit total column wins over the recomputed sum.
        assert_eq!(alpha.total_value, 6.0);
    }

    #[test]
    fn csv_recomputes_missing_total_over_own_role() {
        let pool = load_pool_from_reader(SAMPLE_CSV.as_bytes(), "test.csv", ACTIVE).unwrap();
        let beta = &pool.players()[1];
        // K + QS + ERA + WHIP + SVHD = 2.0 + 1.5 + 1.0 + 0.5 + 0 = 5.0
        assert!((beta.total_value - 5.0).abs() < 1e-9);
    }

    #[test]
    fn csv_infers_pitcher_position_from_production() {
        let pool = load_pool_from_reader(SAMPLE_CSV.as_bytes(), "test.csv", ACTIVE).unwrap();
        let gamma = &pool.players()[2];
        // No positions column, but SVHD production marks a reliever.
        assert_eq!(gamma.positions, vec![Position::ReliefPitcher]);
    }

    #[test]
    fn csv_skips_unknown_role_rows() {
        let csv = "\
id,name,role,positions,adp,total,R,TB,RBI,SB,OBP,K,QS,ERA,WHIP,SVHD
1,Good,hitter,C,1.0,1.0,1,0,0,0,0,0,0,0,0,0
2,Bad,coach,C,2.0,1.0,1,0,0,0,0,0,0,0,0,0
";
        let pool = load_pool_from_reader(csv.as_bytes(), "test.csv", ACTIVE).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.players()[0].name, "Good");
    }

    fn seed_db(conn: &Connection) {
        conn.execute_batch(
            "CREATE TABLE players (
                 player_id INTEGER PRIMARY KEY,
                 name TEXT NOT NULL,
                 positions TEXT
             );
             CREATE TABLE rankings (
                 player_id INTEGER NOT NULL,
                 season INTEGER NOT NULL,
                 overall_rank INTEGER NOT NULL,
                 total_value REAL,
                 val_r REAL, val_tb REAL, val_rbi REAL, val_sb REAL, val_obp REAL,
                 val_k REAL, val_qs REAL, val_era REAL, val_whip REAL, val_svhd REAL,
                 role TEXT NOT NULL,
                 adp REAL
             );
             INSERT INTO players VALUES (10, 'DB Hitter', '1B');
             INSERT INTO players VALUES (11, 'DB Pitcher', 'RP');
             INSERT INTO rankings VALUES
                 (10, 2026, 1, 4.0, 1.0, 1.0, 1.0, 0.5, 0.5, 0, 0, 0, 0, 0, 'hitter', 5.0),
                 (11, 2026, 2, NULL, 0, 0, 0, 0, 0, 0.5, 0, 0.3, 0.2, 1.5, 'pitcher', NULL),
                 (12, 2025, 1, 1.0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 'hitter', 1.0);",
        )
        .unwrap();
        // Season-2025 row has no players entry on purpose; the join drops it.
    }

    #[test]
    fn sqlite_loads_season_rows_in_rank_order() {
        let conn = Connection::open_in_memory().unwrap();
        seed_db(&conn);
        let pool = load_pool_from_conn(&conn, 2026, ACTIVE).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.players()[0].id, 10);
        assert_eq!(pool.players()[1].id, 11);
    }

    #[test]
    fn sqlite_null_total_recomputed_and_null_adp_none() {
        let conn = Connection::open_in_memory().unwrap();
        seed_db(&conn);
        let pool = load_pool_from_conn(&conn, 2026, ACTIVE).unwrap();
        let rp = &pool.players()[1];
        assert_eq!(rp.adp, None);
        // K + ERA + WHIP + SVHD = 0.5 + 0.3 + 0.2 + 1.5 = 2.5
        assert!((rp.total_value - 2.5).abs() < 1e-9);
    }
}
