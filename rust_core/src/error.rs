//! Error taxonomy for bet ingestion, resolution, and persistence.
//!
//! Per-bet failures (`UnrecognizedBetText`, `GameNotFound`, `ZeroOdds`) are
//! reported item-by-item during batch ingestion and never abort the batch.
//! `Structure` indicates a programmer error in group construction and aborts
//! the offending operation. `ScoreFetch` aborts an in-progress refresh with
//! prior state untouched. `Serialization` is fatal to the one load or save
//! that raised it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("unrecognized bet text: {0:?}")]
    UnrecognizedBetText(String),

    #[error("no game found for team {team:?} (opponent: {opponent:?})")]
    GameNotFound {
        team: String,
        opponent: Option<String>,
    },

    #[error("game does not contain team: {0}")]
    TeamNotInGame(String),

    #[error("bet group structure violation: {0}")]
    Structure(String),

    #[error("odds must be a nonzero American line")]
    ZeroOdds,

    #[error("invalid date {0:?}, expected YYYYMMDD")]
    InvalidDate(String),

    #[error("score fetch failed: {0}")]
    ScoreFetch(#[from] reqwest::Error),

    #[error("snapshot serialization failed: {0}")]
    Serialization(String),
}

impl From<rmp_serde::encode::Error> for TrackerError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        TrackerError::Serialization(err.to_string())
    }
}

impl From<rmp_serde::decode::Error> for TrackerError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        TrackerError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Serialization(err.to_string())
    }
}
