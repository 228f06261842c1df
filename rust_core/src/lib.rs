//! Bets tracker core - wager parsing, settlement, and aggregation.
//!
//! This crate provides:
//! - Free-text bet parsing into typed market variants
//! - Settlement of each variant against game scores (hit/miss/push/pending)
//! - Hierarchical bet groups with recomputed win/loss records
//! - Game resolution and score refresh against scoreboard snapshots
//! - MessagePack snapshots and JSON export of evaluated trees

pub mod bet;
pub mod betgroup;
pub mod clients;
pub mod error;
pub mod models;
pub mod parser;
pub mod resolver;
pub mod store;

pub use bet::{Bet, BetResult, Market};
pub use betgroup::BetGroup;
pub use clients::{EspnClient, GameSnapshot, ScoreSource};
pub use error::TrackerError;
pub use models::{Game, Team, TeamInGame};
pub use parser::{parse_bet_text, BetDraft, DraftMarket};
