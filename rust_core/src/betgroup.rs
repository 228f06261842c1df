//! Hierarchical bet grouping and record aggregation.
//!
//! A group either owns bets (leaf) or named child groups (branch), never
//! both; the two mutators enforce the invariant. Aggregates are recomputed
//! from scratch on every [`BetGroup::evaluate`] walk — nothing is maintained
//! incrementally, so any mutation below a node must be followed by a
//! recompute before the rollup is trusted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bet::{Bet, BetResult};
use crate::clients::GameSnapshot;
use crate::error::TrackerError;
use crate::resolver;

/// A named node in the bet tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetGroup {
    pub name: String,
    pub description: Option<String>,
    bets: Vec<Bet>,
    sub_groups: BTreeMap<String, BetGroup>,
    pub hits: u32,
    pub misses: u32,
    pub pushes: u32,
    pub pendings: u32,
    pub profit: f64,
}

impl BetGroup {
    pub fn new(name: &str) -> Self {
        BetGroup {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_description(name: &str, description: &str) -> Self {
        BetGroup {
            name: name.to_string(),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    pub fn sub_groups(&self) -> &BTreeMap<String, BetGroup> {
        &self.sub_groups
    }

    pub fn is_leaf(&self) -> bool {
        self.sub_groups.is_empty()
    }

    /// Add a bet to a leaf group.
    ///
    /// Fails if this group already holds child groups.
    pub fn new_bet(&mut self, bet: Bet) -> Result<(), TrackerError> {
        if !self.sub_groups.is_empty() {
            return Err(TrackerError::Structure(format!(
                "group {:?} holds sub-groups and cannot take bets",
                self.name
            )));
        }
        self.bets.push(bet);
        Ok(())
    }

    /// Add a child group to a branch group, keyed by the child's name.
    ///
    /// Fails if this group already holds bets.
    pub fn new_sub_group(&mut self, group: BetGroup) -> Result<(), TrackerError> {
        if !self.bets.is_empty() {
            return Err(TrackerError::Structure(format!(
                "group {:?} holds bets and cannot take sub-groups",
                self.name
            )));
        }
        self.sub_groups.insert(group.name.clone(), group);
        Ok(())
    }

    /// Re-evaluate every bet in the tree against its game's current state,
    /// then recompute all aggregates bottom-up, overwriting prior values.
    pub fn evaluate(&mut self) -> Result<(), TrackerError> {
        for bet in &mut self.bets {
            bet.evaluate()?;
        }
        for child in self.sub_groups.values_mut() {
            child.evaluate()?;
        }
        self.recompute_record();
        Ok(())
    }

    fn recompute_record(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.pushes = 0;
        self.pendings = 0;
        self.profit = 0.0;

        for bet in &self.bets {
            match bet.result {
                BetResult::Hit => self.hits += 1,
                BetResult::Miss => self.misses += 1,
                BetResult::Push => self.pushes += 1,
                BetResult::Pending => self.pendings += 1,
            }
            self.profit += bet.unit_profit;
        }

        for child in self.sub_groups.values() {
            self.hits += child.hits;
            self.misses += child.misses;
            self.pushes += child.pushes;
            self.pendings += child.pendings;
            self.profit += child.profit;
        }
    }

    /// Flatten several groups into one evaluated leaf group.
    ///
    /// Bets are concatenated in input order, descendants included, with no
    /// deduplication.
    pub fn merge(
        name: &str,
        description: &str,
        groups: &[BetGroup],
    ) -> Result<BetGroup, TrackerError> {
        let mut merged = BetGroup::with_description(name, description);
        for group in groups {
            group.collect_bets(&mut merged.bets);
        }
        merged.evaluate()?;
        Ok(merged)
    }

    fn collect_bets(&self, out: &mut Vec<Bet>) {
        out.extend(self.bets.iter().cloned());
        for child in self.sub_groups.values() {
            child.collect_bets(out);
        }
    }

    /// Earliest and latest game date over all leaf bets, or `None` for an
    /// empty tree. Lexicographic comparison is correct only because the
    /// dates are fixed-width zero-padded `YYYYMMDD` strings.
    pub fn date_span(&self) -> Option<(String, String)> {
        let mut span: Option<(String, String)> = None;
        self.fold_dates(&mut span);
        span
    }

    fn fold_dates(&self, span: &mut Option<(String, String)>) {
        for bet in &self.bets {
            let date = &bet.game.date;
            match span {
                None => *span = Some((date.clone(), date.clone())),
                Some((earliest, latest)) => {
                    if date < earliest {
                        *earliest = date.clone();
                    }
                    if date > latest {
                        *latest = date.clone();
                    }
                }
            }
        }
        for child in self.sub_groups.values() {
            child.fold_dates(span);
        }
    }

    /// Update game scores throughout the tree from a snapshot pool.
    ///
    /// Only bets still pending are touched unless `force` is set; settled
    /// results stay frozen. The caller re-evaluates afterwards. Any
    /// resolution failure aborts the walk with the error.
    pub fn refresh(&mut self, snapshots: &[GameSnapshot], force: bool) -> Result<(), TrackerError> {
        for bet in &mut self.bets {
            if !force && bet.result != BetResult::Pending {
                continue;
            }
            resolver::update_game_score(&mut bet.game, snapshots)?;
        }
        for child in self.sub_groups.values_mut() {
            child.refresh(snapshots, force)?;
        }
        Ok(())
    }
}
