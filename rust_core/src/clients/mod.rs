//! External score-source clients and their boundary types.

pub mod espn;

pub use espn::EspnClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::models::{Game, TeamInGame};

/// One scoreboard entry: the same team-identifying fields as a [`Game`],
/// plus current scores and a finality flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub teams: [TeamInGame; 2],
    pub date: String,
    pub is_final: bool,
    pub is_neutral_site: bool,
}

impl GameSnapshot {
    pub fn to_game(&self) -> Game {
        Game {
            teams: self.teams.clone(),
            date: self.date.clone(),
            is_over: self.is_final,
            is_neutral_site: self.is_neutral_site,
        }
    }
}

/// Source of current scores for a date or date range.
///
/// Dates are `YYYYMMDD`. A failed fetch returns [`TrackerError::ScoreFetch`]
/// and the caller aborts whatever refresh was in progress; no retries here.
#[async_trait]
pub trait ScoreSource {
    async fn fetch_scores(
        &self,
        start_date: &str,
        end_date: Option<&str>,
    ) -> Result<Vec<GameSnapshot>, TrackerError>;
}
