//! ESPN college-football scoreboard client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::warn;
use reqwest::Client;
use serde_json::Value;

use super::{GameSnapshot, ScoreSource};
use crate::error::TrackerError;
use crate::models::{Team, TeamInGame};

const ESPN_CFB_SCOREBOARD_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/football/college-football/scoreboard";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct EspnClient {
    client: Client,
}

impl EspnClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Fetch the scoreboard for a college football weekend: the given
    /// Friday plus the following Saturday.
    pub async fn fetch_weekend_scores(
        &self,
        friday: &str,
    ) -> Result<Vec<GameSnapshot>, TrackerError> {
        let saturday = next_day(friday)?;
        self.fetch_scores(friday, Some(&saturday)).await
    }

    async fn fetch_scoreboard(&self, dates: &str) -> Result<Value, TrackerError> {
        let url = format!("{ESPN_CFB_SCOREBOARD_URL}?dates={dates}");
        let resp = self.client.get(&url).send().await?;
        let data = resp.json().await?;
        Ok(data)
    }
}

impl Default for EspnClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScoreSource for EspnClient {
    async fn fetch_scores(
        &self,
        start_date: &str,
        end_date: Option<&str>,
    ) -> Result<Vec<GameSnapshot>, TrackerError> {
        let dates = match end_date {
            Some(end) => format!("{start_date}-{end}"),
            None => start_date.to_string(),
        };
        let data = self.fetch_scoreboard(&dates).await?;
        Ok(parse_scoreboard(&data))
    }
}

/// Advance a `YYYYMMDD` date by one day.
pub fn next_day(date: &str) -> Result<String, TrackerError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y%m%d")
        .map_err(|_| TrackerError::InvalidDate(date.to_string()))?;
    let next = parsed
        .succ_opt()
        .ok_or_else(|| TrackerError::InvalidDate(date.to_string()))?;
    Ok(next.format("%Y%m%d").to_string())
}

/// Parse a scoreboard document into snapshots.
///
/// Pure function over the fetched JSON so fixtures can exercise it.
/// Events without exactly two competitors are skipped with a warning.
/// A game is final when any competitor carries the `winner` key.
pub fn parse_scoreboard(data: &Value) -> Vec<GameSnapshot> {
    let mut snapshots = Vec::new();

    let Some(events) = data["events"].as_array() else {
        return snapshots;
    };

    for event in events {
        let competition = &event["competitions"][0];
        let is_neutral_site = competition["neutralSite"].as_bool().unwrap_or(false);
        let date = competition["date"]
            .as_str()
            .and_then(iso_to_yyyymmdd)
            .unwrap_or_default();

        let Some(competitors) = competition["competitors"].as_array() else {
            continue;
        };

        let mut teams = Vec::new();
        let mut is_final = false;

        for competitor in competitors {
            let team = &competitor["team"];
            teams.push(TeamInGame {
                team: Team {
                    full_name: team["displayName"].as_str().unwrap_or_default().to_string(),
                    short_name: team["shortDisplayName"]
                        .as_str()
                        .unwrap_or_default()
                        .to_string(),
                    abbreviation: team["abbreviation"].as_str().unwrap_or_default().to_string(),
                    logo_url: team["logo"].as_str().unwrap_or_default().to_string(),
                },
                score: competitor["score"]
                    .as_str()
                    .and_then(|s| s.parse::<i32>().ok())
                    .unwrap_or(0),
                is_home_team: competitor["homeAway"].as_str() == Some("home"),
            });

            if competitor.get("winner").is_some() {
                is_final = true;
            }
        }

        match <[TeamInGame; 2]>::try_from(teams) {
            Ok(pair) => snapshots.push(GameSnapshot {
                teams: pair,
                date,
                is_final,
                is_neutral_site,
            }),
            Err(bad) => warn!("skipping scoreboard event with {} competitors", bad.len()),
        }
    }

    snapshots
}

/// `2025-09-20T19:30Z` -> `20250920`. The scoreboard emits a handful of
/// timestamp shapes, so only the date part is read.
fn iso_to_yyyymmdd(iso: &str) -> Option<String> {
    let date = iso.get(..10)?;
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(parsed.format("%Y%m%d").to_string())
}
