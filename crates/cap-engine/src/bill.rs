//! Bills and their voting state machine.
//!
//! A bill's content is immutable once proposed; only the [`Ballot`] moves.
//! The ballot's position is an explicit [`Phase`] with a total transition
//! function. A bill only moves forward through its phases; a vote that
//! fails to resolve does not produce a terminal "rejected" state, the
//! bill simply stalls where it stands.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::member::{Principal, Timestamp};

/// How a member votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    Yea,
    Nay,
    Abstain,
}

/// Running yea/nay/abstain counts for one chamber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub yea: u32,
    pub nay: u32,
    pub abstain: u32,
}

impl Tally {
    pub(crate) fn record(&mut self, choice: VoteChoice) {
        match choice {
            VoteChoice::Yea => self.yea += 1,
            VoteChoice::Nay => self.nay += 1,
            VoteChoice::Abstain => self.abstain += 1,
        }
    }

    /// Total votes cast.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.yea + self.nay + self.abstain
    }
}

/// Position of a bill in its voting state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Collecting House votes.
    House,
    /// House passed; collecting Senate votes.
    Senate,
    /// Senate split evenly; waiting on the vice president.
    TieBreak,
    /// Both chambers passed; waiting on the president.
    Presidential,
    /// Presidential decision recorded; no further votes.
    Closed,
}

/// Static bill content fixed at proposal time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillMetadata {
    pub title: String,
    pub enacting_clause: String,
    pub proposed_at: Timestamp,
    pub effective_at: Timestamp,
}

/// Mutable voting sub-state of a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub phase: Phase,
    pub passed_house: bool,
    pub passed_senate: bool,
    /// True only once the president has signed with Yea.
    pub passed: bool,
    pub voting_allowed: bool,
    pub house_tally: Tally,
    pub senate_tally: Tally,
    pub house_voted: BTreeSet<Principal>,
    pub senate_voted: BTreeSet<Principal>,
    pub presidential_decision: Option<VoteChoice>,
    pub presidential_vote_cast: bool,
}

impl Ballot {
    pub(crate) fn new() -> Self {
        Self {
            phase: Phase::House,
            passed_house: false,
            passed_senate: false,
            passed: false,
            voting_allowed: true,
            house_tally: Tally::default(),
            senate_tally: Tally::default(),
            house_voted: BTreeSet::new(),
            senate_voted: BTreeSet::new(),
            presidential_decision: None,
            presidential_vote_cast: false,
        }
    }

    /// Whether the Senate split evenly and the vice president must decide.
    #[must_use]
    pub fn tie_break_required(&self) -> bool {
        self.phase == Phase::TieBreak
    }
}

impl Default for Ballot {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry in the bill ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub metadata: BillMetadata,
    pub sponsors: BTreeSet<Principal>,
    pub cosponsors: BTreeSet<Principal>,
    pub sections: Vec<String>,
    pub definitions: Vec<String>,
    pub ballot: Ballot,
}

/// Proposal input: everything except the voting sub-state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillDraft {
    pub title: String,
    pub enacting_clause: String,
    pub effective_at: Timestamp,
    pub sponsors: Vec<Principal>,
    #[serde(default)]
    pub cosponsors: Vec<Principal>,
    pub sections: Vec<String>,
    #[serde(default)]
    pub definitions: Vec<String>,
}
