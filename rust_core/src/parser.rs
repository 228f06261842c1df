//! Free-text bet parsing.
//!
//! Wager descriptions have no fixed grammar; they match one of six known
//! shapes, tried in a fixed priority order:
//!
//! 1. Moneyline   `"Maryland Terrapins ML"`
//! 2. Over        `"Baylor Bears vs Arizona State Sun Devils O 59.5"`
//! 3. Under       `"Rutgers Scarlet Knights/Iowa Hawkeyes U 47.5"`
//! 4. Team over   `"Oregon Ducks TTP O 43.5"`
//! 5. Team under  `"Texas Longhorns TTP U 21.5"`
//! 6. Spread      `"Florida State Seminoles -44.5"` (catch-all, always last)
//!
//! The order is load-bearing. The spread shape is a strict superset of the
//! team-total shapes ("Oregon Ducks TTP O" reads as a team name followed by
//! a number), and the team-total shapes overlap the totals shapes under a
//! loose read. Reordering the table changes how ambiguous strings parse;
//! the tests pin the order down case by case.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::TrackerError;

/// Market shape captured from raw text, before game resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DraftMarket {
    Moneyline,
    Over { points: f64 },
    Under { points: f64 },
    TeamOver { points: f64 },
    TeamUnder { points: f64 },
    Spread { spread: f64 },
}

/// A parsed but unresolved wager: team name(s) and market shape only.
///
/// Resolution against a game pool is a separate step; parsing is a pure
/// function of the text.
#[derive(Debug, Clone, PartialEq)]
pub struct BetDraft {
    pub team: String,
    pub opponent: Option<String>,
    pub market: DraftMarket,
}

type Constructor = fn(&Captures) -> Option<BetDraft>;

static PATTERNS: OnceLock<Vec<(Regex, Constructor)>> = OnceLock::new();

/// The ordered (pattern, constructor) table. First match wins.
fn patterns() -> &'static [(Regex, Constructor)] {
    PATTERNS.get_or_init(|| {
        vec![
            (
                Regex::new(r"^(.*?)\s+ML$").unwrap(),
                moneyline_draft as Constructor,
            ),
            (
                Regex::new(r"^(.+?)(?:/|\s+vs\s+)(.+?)\s+O\s+(\d+\.\d)$").unwrap(),
                over_draft as Constructor,
            ),
            (
                Regex::new(r"^(.+?)(?:/|\s+vs\s+)(.+?)\s+U\s+(\d+\.\d)$").unwrap(),
                under_draft as Constructor,
            ),
            (
                Regex::new(r"^(.*?)\s+TTP\s+O\s+(\d*\.?\d+)$").unwrap(),
                team_over_draft as Constructor,
            ),
            (
                Regex::new(r"^(.*?)\s+TTP\s+U\s+(\d*\.?\d+)$").unwrap(),
                team_under_draft as Constructor,
            ),
            (
                Regex::new(r"^(.*?)\s+([+-]?\d*\.?\d+)$").unwrap(),
                spread_draft as Constructor,
            ),
        ]
    })
}

/// Parse a free-text wager description into a [`BetDraft`].
///
/// Patterns are tried strictly in table order; text matching none of them
/// fails with [`TrackerError::UnrecognizedBetText`].
pub fn parse_bet_text(text: &str) -> Result<BetDraft, TrackerError> {
    for (pattern, constructor) in patterns() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(draft) = constructor(&caps) {
                return Ok(draft);
            }
        }
    }
    Err(TrackerError::UnrecognizedBetText(text.to_string()))
}

fn moneyline_draft(caps: &Captures) -> Option<BetDraft> {
    Some(BetDraft {
        team: caps[1].to_string(),
        opponent: None,
        market: DraftMarket::Moneyline,
    })
}

fn over_draft(caps: &Captures) -> Option<BetDraft> {
    Some(BetDraft {
        team: caps[1].to_string(),
        opponent: Some(caps[2].to_string()),
        market: DraftMarket::Over {
            points: caps[3].parse().ok()?,
        },
    })
}

fn under_draft(caps: &Captures) -> Option<BetDraft> {
    Some(BetDraft {
        team: caps[1].to_string(),
        opponent: Some(caps[2].to_string()),
        market: DraftMarket::Under {
            points: caps[3].parse().ok()?,
        },
    })
}

fn team_over_draft(caps: &Captures) -> Option<BetDraft> {
    Some(BetDraft {
        team: caps[1].to_string(),
        opponent: None,
        market: DraftMarket::TeamOver {
            points: caps[2].parse().ok()?,
        },
    })
}

fn team_under_draft(caps: &Captures) -> Option<BetDraft> {
    Some(BetDraft {
        team: caps[1].to_string(),
        opponent: None,
        market: DraftMarket::TeamUnder {
            points: caps[2].parse().ok()?,
        },
    })
}

fn spread_draft(caps: &Captures) -> Option<BetDraft> {
    Some(BetDraft {
        team: caps[1].to_string(),
        opponent: None,
        market: DraftMarket::Spread {
            spread: caps[2].parse().ok()?,
        },
    })
}
