//! Game resolution against a scoreboard snapshot pool.
//!
//! Matching is alias-exact: a name hits when it equals a competitor's full
//! name, short name, or abbreviation. No fuzzy matching is used to resolve;
//! the nearest-name score is computed only as a diagnostic when resolution
//! fails.

use log::warn;
use strsim::jaro_winkler;

use crate::clients::GameSnapshot;
use crate::error::TrackerError;
use crate::models::Game;

/// Find the game involving `team` (and `opponent`, when given) in the
/// snapshot pool.
///
/// When an opponent is named, both teams must appear in the same snapshot.
pub fn find_game(
    team: &str,
    opponent: Option<&str>,
    snapshots: &[GameSnapshot],
) -> Result<Game, TrackerError> {
    for snapshot in snapshots {
        let team_found = snapshot.teams.iter().any(|t| t.team.is_called(team));
        let opponent_found = match opponent {
            Some(name) => snapshot.teams.iter().any(|t| t.team.is_called(name)),
            None => true,
        };
        if team_found && opponent_found {
            return Ok(snapshot.to_game());
        }
    }

    if let Some((closest, score)) = closest_team_name(team, snapshots) {
        warn!(
            "no game found for {team:?}; closest scoreboard name was {closest:?} ({score:.2})"
        );
    }
    Err(TrackerError::GameNotFound {
        team: team.to_string(),
        opponent: opponent.map(str::to_string),
    })
}

/// Refresh a game's scores and final flag in place from the snapshot pool.
///
/// The game is re-found by its two stored full names; a snapshot carrying
/// both names but a different date is rejected rather than applied.
pub fn update_game_score(game: &mut Game, snapshots: &[GameSnapshot]) -> Result<(), TrackerError> {
    let team = game.teams[0].team.full_name.clone();
    let opponent = game.teams[1].team.full_name.clone();

    let updated = find_game(&team, Some(&opponent), snapshots)?;
    if updated.date != game.date {
        warn!(
            "found {team:?} vs {opponent:?} dated {}, not the stored {}",
            updated.date, game.date
        );
        return Err(TrackerError::GameNotFound {
            team,
            opponent: Some(opponent),
        });
    }

    game.is_over = updated.is_over;
    for updated_team in &updated.teams {
        for team_in_game in &mut game.teams {
            if team_in_game.team.full_name == updated_team.team.full_name {
                team_in_game.score = updated_team.score;
            }
        }
    }
    Ok(())
}

/// Highest jaro-winkler score over every name in the pool. Diagnostic only.
fn closest_team_name(target: &str, snapshots: &[GameSnapshot]) -> Option<(String, f64)> {
    snapshots
        .iter()
        .flat_map(|s| s.teams.iter())
        .map(|t| {
            (
                t.team.full_name.clone(),
                jaro_winkler(target, &t.team.full_name),
            )
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
}
