//! Typed bet variants and settlement.
//!
//! Each market is a variant of the closed [`Market`] sum type with its own
//! settlement arm, dispatched exhaustively. A bet's `result` and
//! `unit_profit` are always derived from the current game state: they are
//! recomputed by [`Bet::evaluate`], never asserted independently, and
//! evaluation is idempotent for a given score.

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::models::{Game, Team};
use crate::parser::{BetDraft, DraftMarket};

// ============================================================================
// Results
// ============================================================================

/// Settlement outcome of a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetResult {
    Pending,
    Hit,
    Miss,
    Push,
}

impl BetResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetResult::Pending => "pending",
            BetResult::Hit => "hit",
            BetResult::Miss => "miss",
            BetResult::Push => "push",
        }
    }

    /// Pending is the only unsettled state.
    pub fn is_settled(&self) -> bool {
        !matches!(self, BetResult::Pending)
    }
}

// ============================================================================
// Markets
// ============================================================================

/// Market-specific bet parameters.
///
/// `taking_team` is the resolved team snapshot at bet creation; score
/// lookups during settlement go through the game by full name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "bet_type", rename_all = "snake_case")]
pub enum Market {
    Moneyline {
        taking_team: Team,
    },
    Spread {
        taking_team: Team,
        taking_spread: f64,
    },
    Over {
        taking_points: f64,
    },
    Under {
        taking_points: f64,
    },
    TeamOver {
        taking_team: Team,
        taking_points: f64,
    },
    TeamUnder {
        taking_team: Team,
        taking_points: f64,
    },
}

// ============================================================================
// Bets
// ============================================================================

/// A placed wager against a specific game.
///
/// Odds are American and nonzero. Profit is per one unit staked
/// (stake-folded model: there is no wager field).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub bettor: String,
    pub odds: i32,
    pub game: Game,
    pub market: Market,
    pub result: BetResult,
    pub unit_profit: f64,
}

impl Bet {
    /// Build a bet from a parsed draft and a resolved game, then evaluate it.
    pub fn from_draft(
        draft: &BetDraft,
        bettor: &str,
        odds: i32,
        game: Game,
    ) -> Result<Bet, TrackerError> {
        if odds == 0 {
            return Err(TrackerError::ZeroOdds);
        }

        let market = match draft.market {
            DraftMarket::Moneyline => Market::Moneyline {
                taking_team: game.team(&draft.team)?.team.clone(),
            },
            DraftMarket::Spread { spread } => Market::Spread {
                taking_team: game.team(&draft.team)?.team.clone(),
                taking_spread: spread,
            },
            DraftMarket::Over { points } => Market::Over {
                taking_points: points,
            },
            DraftMarket::Under { points } => Market::Under {
                taking_points: points,
            },
            DraftMarket::TeamOver { points } => Market::TeamOver {
                taking_team: game.team(&draft.team)?.team.clone(),
                taking_points: points,
            },
            DraftMarket::TeamUnder { points } => Market::TeamUnder {
                taking_team: game.team(&draft.team)?.team.clone(),
                taking_points: points,
            },
        };

        let mut bet = Bet {
            bettor: bettor.to_string(),
            odds,
            game,
            market,
            result: BetResult::Pending,
            unit_profit: 0.0,
        };
        bet.evaluate()?;
        Ok(bet)
    }

    /// Recompute `result` and `unit_profit` from the current game state.
    ///
    /// A game that is not over settles as Pending with zero profit no
    /// matter the market. Idempotent: evaluating twice against the same
    /// score yields the same result.
    pub fn evaluate(&mut self) -> Result<(), TrackerError> {
        self.result = if !self.game.is_over {
            BetResult::Pending
        } else {
            match &self.market {
                Market::Moneyline { taking_team } => {
                    let taking = self.game.team(&taking_team.full_name)?.score;
                    let against = self.game.opposing_team(&taking_team.full_name)?.score;
                    // No push: a tie settles as a miss.
                    if taking > against {
                        BetResult::Hit
                    } else {
                        BetResult::Miss
                    }
                }
                Market::Spread {
                    taking_team,
                    taking_spread,
                } => {
                    let taking = self.game.team(&taking_team.full_name)?.score;
                    let against = self.game.opposing_team(&taking_team.full_name)?.score;
                    // One formula covers favorites (negative line) and
                    // underdogs (positive line) alike.
                    let adjusted = taking as f64 + taking_spread;
                    if adjusted > against as f64 {
                        BetResult::Hit
                    } else if adjusted == against as f64 {
                        BetResult::Push
                    } else {
                        BetResult::Miss
                    }
                }
                Market::Over { taking_points } => {
                    line_result(self.game.combined_score() as f64, *taking_points, true)
                }
                Market::Under { taking_points } => {
                    line_result(self.game.combined_score() as f64, *taking_points, false)
                }
                Market::TeamOver {
                    taking_team,
                    taking_points,
                } => {
                    let taking = self.game.team(&taking_team.full_name)?.score;
                    line_result(taking as f64, *taking_points, true)
                }
                Market::TeamUnder {
                    taking_team,
                    taking_points,
                } => {
                    let taking = self.game.team(&taking_team.full_name)?.score;
                    line_result(taking as f64, *taking_points, false)
                }
            }
        };

        self.unit_profit = settled_unit_profit(self.result, self.odds);
        Ok(())
    }
}

/// Score-versus-line settlement shared by the four totals markets.
/// Landing exactly on the line is always a push.
fn line_result(score: f64, line: f64, over: bool) -> BetResult {
    if score == line {
        BetResult::Push
    } else if (score > line) == over {
        BetResult::Hit
    } else {
        BetResult::Miss
    }
}

/// American-odds payout per unit staked.
fn settled_unit_profit(result: BetResult, odds: i32) -> f64 {
    match result {
        BetResult::Hit => {
            if odds > 0 {
                odds as f64 / 100.0
            } else {
                100.0 / odds.abs() as f64
            }
        }
        BetResult::Miss => -1.0,
        BetResult::Push | BetResult::Pending => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamInGame;
    use crate::parser::parse_bet_text;

    fn make_team(full: &str, abbr: &str) -> Team {
        Team {
            full_name: full.to_string(),
            short_name: full.split_whitespace().next().unwrap().to_string(),
            abbreviation: abbr.to_string(),
            logo_url: String::new(),
        }
    }

    fn make_game(home: (&str, &str, i32), away: (&str, &str, i32), is_over: bool) -> Game {
        Game {
            teams: [
                TeamInGame {
                    team: make_team(home.0, home.1),
                    score: home.2,
                    is_home_team: true,
                },
                TeamInGame {
                    team: make_team(away.0, away.1),
                    score: away.2,
                    is_home_team: false,
                },
            ],
            date: "20250920".to_string(),
            is_over,
            is_neutral_site: false,
        }
    }

    fn make_bet(text: &str, odds: i32, game: Game) -> Bet {
        let draft = parse_bet_text(text).unwrap();
        Bet::from_draft(&draft, "Jake", odds, game).unwrap()
    }

    #[test]
    fn test_non_final_game_is_pending_for_every_market() {
        let texts = [
            "Oregon Ducks ML",
            "Oregon Ducks -7.5",
            "Oregon Ducks vs Washington Huskies O 50.5",
            "Oregon Ducks/Washington Huskies U 50.5",
            "Oregon Ducks TTP O 30.5",
            "Oregon Ducks TTP U 30.5",
        ];
        for text in texts {
            let game = make_game(("Oregon Ducks", "ORE", 21), ("Washington Huskies", "WASH", 7), false);
            let bet = make_bet(text, -110, game);
            assert_eq!(bet.result, BetResult::Pending, "{text}");
            assert_eq!(bet.unit_profit, 0.0, "{text}");
        }
    }

    #[test]
    fn test_moneyline_payouts() {
        let winner = make_game(("Maryland Terrapins", "MD", 31), ("Wisconsin Badgers", "WIS", 24), true);
        let bet = make_bet("Maryland Terrapins ML", 295, winner.clone());
        assert_eq!(bet.result, BetResult::Hit);
        assert!((bet.unit_profit - 2.95).abs() < 1e-9);

        let bet = make_bet("Maryland Terrapins ML", -130, winner);
        assert_eq!(bet.result, BetResult::Hit);
        assert!((bet.unit_profit - 100.0 / 130.0).abs() < 1e-9);

        let loser = make_game(("Maryland Terrapins", "MD", 24), ("Wisconsin Badgers", "WIS", 31), true);
        let bet = make_bet("Maryland Terrapins ML", 295, loser);
        assert_eq!(bet.result, BetResult::Miss);
        assert_eq!(bet.unit_profit, -1.0);
    }

    #[test]
    fn test_moneyline_tie_is_a_miss() {
        let game = make_game(("Army Black Knights", "ARMY", 21), ("Navy Midshipmen", "NAVY", 21), true);
        let bet = make_bet("Army Black Knights ML", 110, game);
        assert_eq!(bet.result, BetResult::Miss);
    }

    #[test]
    fn test_spread_favorite_and_underdog() {
        // FSU wins by 45, covering -44.5.
        let game = make_game(("Florida State Seminoles", "FSU", 66), ("Kent State Golden Flashes", "KENT", 21), true);
        let bet = make_bet("Florida State Seminoles -44.5", -130, game.clone());
        assert_eq!(bet.result, BetResult::Hit);

        // Underdog +44.5 on the same game loses by exactly 45: a miss.
        let bet = make_bet("Kent State Golden Flashes +44.5", -110, game.clone());
        assert_eq!(bet.result, BetResult::Miss);

        // Underdog +46.5 keeps it inside the number.
        let bet = make_bet("Kent State Golden Flashes +46.5", -110, game);
        assert_eq!(bet.result, BetResult::Hit);
    }

    #[test]
    fn test_spread_push_on_exact_margin() {
        let game = make_game(("Missouri Tigers", "MIZ", 30), ("Kansas Jayhawks", "KU", 20), true);
        let bet = make_bet("Missouri Tigers -10", -110, game.clone());
        assert_eq!(bet.result, BetResult::Push);
        assert_eq!(bet.unit_profit, 0.0);

        let bet = make_bet("Kansas Jayhawks +10", -110, game);
        assert_eq!(bet.result, BetResult::Push);
    }

    #[test]
    fn test_mirrored_spreads_never_both_hit() {
        let game = make_game(("Michigan Wolverines", "MICH", 27), ("Ohio State Buckeyes", "OSU", 24), true);
        for spread in [1.0, 2.5, 3.0, 3.5, 10.0] {
            let fav = make_bet(&format!("Michigan Wolverines -{spread}"), -110, game.clone());
            let dog = make_bet(&format!("Ohio State Buckeyes +{spread}"), -110, game.clone());
            assert!(
                !(fav.result == BetResult::Hit && dog.result == BetResult::Hit),
                "both sides hit at {spread}"
            );
        }
    }

    #[test]
    fn test_total_over_under_and_push() {
        let game = make_game(("Baylor Bears", "BAY", 35), ("Arizona State Sun Devils", "ASU", 28), true);

        let bet = make_bet("Baylor Bears vs Arizona State Sun Devils O 59.5", -110, game.clone());
        assert_eq!(bet.result, BetResult::Hit);

        let bet = make_bet("Baylor Bears vs Arizona State Sun Devils U 59.5", -110, game.clone());
        assert_eq!(bet.result, BetResult::Miss);

        // Combined 63 exactly on a 63.0 line: push both ways.
        let bet = make_bet("Baylor Bears/Arizona State Sun Devils O 63.0", -110, game.clone());
        assert_eq!(bet.result, BetResult::Push);
        assert_eq!(bet.unit_profit, 0.0);

        let bet = make_bet("Baylor Bears/Arizona State Sun Devils U 63.0", -110, game);
        assert_eq!(bet.result, BetResult::Push);
    }

    #[test]
    fn test_team_totals() {
        let game = make_game(("Oregon Ducks", "ORE", 44), ("Oregon State Beavers", "ORST", 10), true);

        let bet = make_bet("Oregon Ducks TTP O 43.5", -150, game.clone());
        assert_eq!(bet.result, BetResult::Hit);

        let bet = make_bet("Oregon Ducks TTP U 43.5", 120, game.clone());
        assert_eq!(bet.result, BetResult::Miss);

        let bet = make_bet("Oregon State Beavers TTP O 10", -110, game);
        assert_eq!(bet.result, BetResult::Push);
    }

    #[test]
    fn test_reevaluation_after_score_update() {
        let mut bet = make_bet(
            "Oregon Ducks ML",
            150,
            make_game(("Oregon Ducks", "ORE", 0), ("Washington Huskies", "WASH", 0), false),
        );
        assert_eq!(bet.result, BetResult::Pending);

        bet.game.teams[0].score = 28;
        bet.game.teams[1].score = 20;
        bet.game.is_over = true;
        bet.evaluate().unwrap();
        assert_eq!(bet.result, BetResult::Hit);
        assert!((bet.unit_profit - 1.5).abs() < 1e-9);

        // Idempotent against the same score.
        bet.evaluate().unwrap();
        assert_eq!(bet.result, BetResult::Hit);
        assert!((bet.unit_profit - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_odds_rejected() {
        let draft = parse_bet_text("Oregon Ducks ML").unwrap();
        let game = make_game(("Oregon Ducks", "ORE", 0), ("Washington Huskies", "WASH", 0), false);
        assert!(matches!(
            Bet::from_draft(&draft, "Jake", 0, game),
            Err(TrackerError::ZeroOdds)
        ));
    }
}
