//! Shared domain models for the bets tracker.

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

// ============================================================================
// Teams
// ============================================================================

/// A college football team as identified by the scoreboard feed.
///
/// Identity is the case-sensitive `full_name`; `short_name` and
/// `abbreviation` are accepted as aliases anywhere a team is looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub full_name: String,
    pub short_name: String,
    pub abbreviation: String,
    pub logo_url: String,
}

impl Team {
    /// True when `name` equals any of the three identifying names.
    pub fn is_called(&self, name: &str) -> bool {
        self.full_name == name || self.short_name == name || self.abbreviation == name
    }
}

/// A team inside a specific game, carrying its score in that game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInGame {
    pub team: Team,
    pub score: i32,
    pub is_home_team: bool,
}

// ============================================================================
// Games
// ============================================================================

/// A single game between two teams.
///
/// Team order is fetch order, not home/away; each entry carries its own
/// `is_home_team` flag. `date` is the fixed-width `YYYYMMDD` form used by
/// the scoreboard query API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub teams: [TeamInGame; 2],
    pub date: String,
    pub is_over: bool,
    pub is_neutral_site: bool,
}

impl Game {
    /// Look up a team by full name, short name, or abbreviation.
    pub fn team(&self, name: &str) -> Result<&TeamInGame, TrackerError> {
        self.teams
            .iter()
            .find(|t| t.team.is_called(name))
            .ok_or_else(|| TrackerError::TeamNotInGame(name.to_string()))
    }

    /// Look up the opponent of the named team.
    pub fn opposing_team(&self, name: &str) -> Result<&TeamInGame, TrackerError> {
        if self.teams[0].team.is_called(name) {
            Ok(&self.teams[1])
        } else if self.teams[1].team.is_called(name) {
            Ok(&self.teams[0])
        } else {
            Err(TrackerError::TeamNotInGame(name.to_string()))
        }
    }

    /// Sum of both teams' scores.
    pub fn combined_score(&self) -> i32 {
        self.teams[0].score + self.teams[1].score
    }
}
