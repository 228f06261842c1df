//! Bet group persistence.
//!
//! Two on-disk forms. The MessagePack snapshot is the round-trip format:
//! `load_group(save_group(g))` reconstructs the tree, every bet's state,
//! and the aggregates exactly. The JSON export is a hierarchical document
//! for display tooling and is write-only from this crate's point of view.

use std::fs;
use std::path::Path;

use crate::betgroup::BetGroup;
use crate::error::TrackerError;

/// Write the binary snapshot. Last write wins; no durability beyond that.
pub fn save_group(path: &Path, group: &BetGroup) -> Result<(), TrackerError> {
    let bytes = rmp_serde::to_vec_named(group)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Read a binary snapshot back. Unreadable or schema-mismatched input is
/// fatal to this load only.
pub fn load_group(path: &Path) -> Result<BetGroup, TrackerError> {
    let bytes = fs::read(path)?;
    Ok(rmp_serde::from_slice(&bytes)?)
}

/// Render the evaluated tree as a pretty-printed JSON document.
pub fn export_json(group: &BetGroup) -> Result<String, TrackerError> {
    serde_json::to_string_pretty(group).map_err(|e| TrackerError::Serialization(e.to_string()))
}

/// Write the JSON export next to wherever the caller keeps its outputs.
pub fn export_json_to(path: &Path, group: &BetGroup) -> Result<(), TrackerError> {
    fs::write(path, export_json(group)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bet::Bet;
    use crate::models::{Game, Team, TeamInGame};
    use crate::parser::parse_bet_text;

    fn make_game(home: (&str, i32), away: (&str, i32), is_over: bool) -> Game {
        let side = |name: &str, score: i32, is_home_team: bool| TeamInGame {
            team: Team {
                full_name: name.to_string(),
                short_name: name.to_string(),
                abbreviation: name.to_string(),
                logo_url: String::new(),
            },
            score,
            is_home_team,
        };
        Game {
            teams: [side(home.0, home.1, true), side(away.0, away.1, false)],
            date: "20250920".to_string(),
            is_over,
            is_neutral_site: false,
        }
    }

    fn make_week() -> BetGroup {
        let bet = |text: &str, odds: i32, game: Game| {
            Bet::from_draft(&parse_bet_text(text).unwrap(), "Jake", odds, game).unwrap()
        };

        let mut locks = BetGroup::new("locks");
        locks
            .new_bet(bet("Ducks -7.5", -130, make_game(("Ducks", 34), ("Beavers", 14), true)))
            .unwrap();
        locks
            .new_bet(bet("Ducks TTP O 43.5", -150, make_game(("Ducks", 44), ("Beavers", 10), true)))
            .unwrap();

        let mut dogs = BetGroup::new("dogs");
        dogs.new_bet(bet("Bears ML", 295, make_game(("Bears", 0), ("Sun Devils", 0), false)))
            .unwrap();

        let mut week = BetGroup::new("Week 5");
        week.new_sub_group(locks).unwrap();
        week.new_sub_group(dogs).unwrap();
        week.evaluate().unwrap();
        week
    }

    #[test]
    fn test_snapshot_round_trip() {
        let week = make_week();

        let path = std::env::temp_dir().join(format!("bets_store_test_{}.bets", std::process::id()));
        save_group(&path, &week).unwrap();
        let loaded = load_group(&path).unwrap();
        let _ = fs::remove_file(&path);

        // Structure, per-bet state, and aggregates all survive.
        assert_eq!(loaded, week);
        assert_eq!(
            (loaded.hits, loaded.misses, loaded.pushes, loaded.pendings),
            (week.hits, week.misses, week.pushes, week.pendings)
        );
        assert_eq!(loaded.profit, week.profit);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = std::env::temp_dir().join(format!("bets_store_bad_{}.bets", std::process::id()));
        fs::write(&path, b"not a snapshot").unwrap();
        let result = load_group(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(TrackerError::Serialization(_))));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("bets_store_definitely_missing.bets");
        assert!(load_group(&path).is_err());
    }

    #[test]
    fn test_json_export_shape() {
        let doc = export_json(&make_week()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc).unwrap();

        assert_eq!(value["name"], "Week 5");
        assert!(value["sub_groups"]["locks"]["bets"].is_array());
        assert_eq!(
            value["sub_groups"]["locks"]["bets"][0]["market"]["bet_type"],
            "spread"
        );
        assert_eq!(value["sub_groups"]["dogs"]["pendings"], 1);
    }
}
