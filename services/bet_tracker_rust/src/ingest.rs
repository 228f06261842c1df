//! Weekly bet-sheet ingestion.
//!
//! Input document, one file per week:
//!
//! ```json
//! {
//!   "cfb_friday": "20250919",
//!   "shows": {
//!     "Locks of the Week": {
//!       "Jake": [["Oregon Ducks TTP O 43.5", -150]],
//!       "David": [["Michigan Wolverines -2.5", -108]]
//!     }
//!   }
//! }
//! ```
//!
//! Category maps nest arbitrarily; a leaf list belongs to the bettor named
//! by its key. A line that fails to parse or resolve is reported per item
//! and skipped - one bad line never aborts the week.

use std::collections::BTreeMap;

use log::warn;
use serde::Deserialize;

use bets_rust_core::{parse_bet_text, resolver, Bet, BetGroup, GameSnapshot, TrackerError};

#[derive(Debug, Deserialize)]
pub struct WeekInput {
    pub cfb_friday: String,
    pub shows: BTreeMap<String, CategoryNode>,
}

/// Either more nesting or a bettor's bet lines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CategoryNode {
    Bets(Vec<(String, i32)>),
    Groups(BTreeMap<String, CategoryNode>),
}

/// One skipped bet line and why.
#[derive(Debug)]
pub struct IngestFailure {
    pub category: String,
    pub text: String,
    pub reason: String,
}

/// Build the week's group tree from the input document, resolving every
/// bet line against the snapshot pool. Skipped lines come back alongside
/// the tree; structural failures abort.
pub fn build_week_group(
    week_name: &str,
    input: &WeekInput,
    snapshots: &[GameSnapshot],
) -> Result<(BetGroup, Vec<IngestFailure>), TrackerError> {
    let mut week = BetGroup::new(week_name);
    let mut failures = Vec::new();

    for (show_name, node) in &input.shows {
        let show = build_category(show_name, node, snapshots, &mut failures)?;
        week.new_sub_group(show)?;
    }

    week.evaluate()?;
    Ok((week, failures))
}

fn build_category(
    name: &str,
    node: &CategoryNode,
    snapshots: &[GameSnapshot],
    failures: &mut Vec<IngestFailure>,
) -> Result<BetGroup, TrackerError> {
    let mut group = BetGroup::new(name);

    match node {
        CategoryNode::Groups(children) => {
            for (child_name, child_node) in children {
                group.new_sub_group(build_category(child_name, child_node, snapshots, failures)?)?;
            }
        }
        CategoryNode::Bets(lines) => {
            // Leaf list: the category name is the bettor.
            for (text, odds) in lines {
                match ingest_line(text, *odds, name, snapshots) {
                    Ok(bet) => group.new_bet(bet)?,
                    Err(err) => {
                        warn!("skipping bet {text:?} under {name:?}: {err}");
                        failures.push(IngestFailure {
                            category: name.to_string(),
                            text: text.clone(),
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }
    }

    Ok(group)
}

fn ingest_line(
    text: &str,
    odds: i32,
    bettor: &str,
    snapshots: &[GameSnapshot],
) -> Result<Bet, TrackerError> {
    let draft = parse_bet_text(text)?;
    let game = resolver::find_game(&draft.team, draft.opponent.as_deref(), snapshots)?;
    Bet::from_draft(&draft, bettor, odds, game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bets_rust_core::{BetResult, Team, TeamInGame};

    fn side(name: &str, score: i32, home: bool) -> TeamInGame {
        TeamInGame {
            team: Team {
                full_name: name.to_string(),
                short_name: name.to_string(),
                abbreviation: name.to_string(),
                logo_url: String::new(),
            },
            score,
            is_home_team: home,
        }
    }

    fn pool() -> Vec<GameSnapshot> {
        vec![
            GameSnapshot {
                teams: [side("Oregon Ducks", 44, true), side("Oregon State Beavers", 10, false)],
                date: "20250920".to_string(),
                is_final: true,
                is_neutral_site: false,
            },
            GameSnapshot {
                teams: [side("Maryland Terrapins", 0, false), side("Wisconsin Badgers", 0, true)],
                date: "20250920".to_string(),
                is_final: false,
                is_neutral_site: false,
            },
        ]
    }

    fn week_input(doc: serde_json::Value) -> WeekInput {
        serde_json::from_value(doc).unwrap()
    }

    #[test]
    fn test_nested_document_builds_matching_tree() {
        let input = week_input(serde_json::json!({
            "cfb_friday": "20250919",
            "shows": {
                "The Big Show": {
                    "Jake": [["Oregon Ducks TTP O 43.5", -150]],
                    "David": [["Maryland Terrapins ML", 295]]
                }
            }
        }));

        let (week, failures) = build_week_group("Week 5", &input, &pool()).unwrap();
        assert!(failures.is_empty());

        let show = &week.sub_groups()["The Big Show"];
        let jake = &show.sub_groups()["Jake"];
        assert_eq!(jake.bets().len(), 1);
        assert_eq!(jake.bets()[0].result, BetResult::Hit);
        assert_eq!(jake.bets()[0].bettor, "Jake");

        let david = &show.sub_groups()["David"];
        assert_eq!(david.bets()[0].result, BetResult::Pending);

        assert_eq!((week.hits, week.pendings), (1, 1));
    }

    #[test]
    fn test_bad_lines_are_reported_not_fatal() {
        let input = week_input(serde_json::json!({
            "cfb_friday": "20250919",
            "shows": {
                "Jake": [
                    ["Oregon Ducks TTP O 43.5", -150],
                    ["this is not a bet", -110],
                    ["Michigan Wolverines ML", 150],
                    ["Maryland Terrapins ML", 0]
                ]
            }
        }));

        let (week, failures) = build_week_group("Week 5", &input, &pool()).unwrap();

        // One parse failure, one unresolvable game, one zero-odds line.
        assert_eq!(failures.len(), 3);
        assert!(failures.iter().any(|f| f.text == "this is not a bet"));
        assert!(failures.iter().any(|f| f.text == "Michigan Wolverines ML"));
        assert!(failures.iter().any(|f| f.text == "Maryland Terrapins ML"));

        // The good line still made it in.
        let jake = &week.sub_groups()["Jake"];
        assert_eq!(jake.bets().len(), 1);
        assert_eq!(week.hits, 1);
    }
}
