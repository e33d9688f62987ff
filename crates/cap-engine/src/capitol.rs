//! The single-writer governance aggregate.
//!
//! [`Capitol`] owns the roster, the bill ledger, and the nomination
//! registry, and funnels every mutation through `&mut self` so a host can
//! serialize calls behind one lock. Dispatch inside [`Capitol::cast_vote`]
//! checks the vice president before any phase gate — the tie-break lands
//! out of band, when the Senate itself has no votes left to give.

use serde::{Deserialize, Serialize};

use crate::bill::{Ballot, Bill, BillDraft, BillMetadata, Phase, VoteChoice};
use crate::error::{GovernanceError, GovernanceResult};
use crate::member::{MemberDraft, Principal, Role, Timestamp};
use crate::nomination::{Nomination, NominationDraft, NominationRegistry};
use crate::roster::Roster;

/// What a successful ratification did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatificationOutcome {
    /// Below quorum; the caller's ratification was recorded.
    Recorded {
        ratification_count: usize,
        threshold: usize,
    },
    /// Quorum strictly exceeded; the candidate now holds a seat and the
    /// nomination is retired.
    Seated(Nomination),
}

/// Entire governance state plus the administrator fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capitol {
    admin: Principal,
    roster: Roster,
    bills: Vec<Bill>,
    nominations: NominationRegistry,
}

impl Capitol {
    /// Create an empty state. The creator principal is the administrator
    /// for the lifetime of the value.
    #[must_use]
    pub fn new(admin: Principal) -> Self {
        Self {
            admin,
            roster: Roster::new(),
            bills: Vec::new(),
            nominations: NominationRegistry::new(),
        }
    }

    #[must_use]
    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn nominations(&self) -> &NominationRegistry {
        &self.nominations
    }

    /// Number of bills ever proposed.
    #[must_use]
    pub fn bill_count(&self) -> usize {
        self.bills.len()
    }

    /// Bill at a ledger position.
    ///
    /// # Errors
    ///
    /// `InvalidBillIndex` when the index is out of range.
    pub fn bill(&self, index: usize) -> GovernanceResult<&Bill> {
        self.bills.get(index).ok_or(GovernanceError::InvalidBillIndex)
    }

    /// Direct admission by the administrator.
    ///
    /// # Errors
    ///
    /// `NotOwner` for any other caller, then everything
    /// [`Roster::register`] can return.
    pub fn add_member(
        &mut self,
        caller: &Principal,
        now: Timestamp,
        draft: MemberDraft,
    ) -> GovernanceResult<()> {
        if caller != &self.admin {
            return Err(GovernanceError::NotOwner);
        }
        self.roster.register(draft, now)
    }

    /// Propose a bill. Returns its ledger index.
    ///
    /// # Errors
    ///
    /// `NotActiveMember`, `SponsorRequired`, `SectionRequired`,
    /// `EffectiveDatePast`, `InvalidSponsor`, `InvalidCosponsor`.
    pub fn propose_bill(
        &mut self,
        caller: &Principal,
        now: Timestamp,
        draft: BillDraft,
    ) -> GovernanceResult<usize> {
        if !self.roster.is_active(caller, now) {
            return Err(GovernanceError::NotActiveMember);
        }
        if draft.sponsors.is_empty() {
            return Err(GovernanceError::SponsorRequired);
        }
        if draft.sections.is_empty() {
            return Err(GovernanceError::SectionRequired);
        }
        if draft.effective_at < now {
            return Err(GovernanceError::EffectiveDatePast);
        }
        for sponsor in &draft.sponsors {
            if !self.roster.is_active(sponsor, now) {
                return Err(GovernanceError::InvalidSponsor(sponsor.clone()));
            }
        }
        for cosponsor in &draft.cosponsors {
            if !self.roster.is_active(cosponsor, now) {
                return Err(GovernanceError::InvalidCosponsor(cosponsor.clone()));
            }
        }

        let bill = Bill {
            metadata: BillMetadata {
                title: draft.title,
                enacting_clause: draft.enacting_clause,
                proposed_at: now,
                effective_at: draft.effective_at,
            },
            sponsors: draft.sponsors.into_iter().collect(),
            cosponsors: draft.cosponsors.into_iter().collect(),
            sections: draft.sections,
            definitions: draft.definitions,
            ballot: Ballot::new(),
        };
        self.bills.push(bill);
        let index = self.bills.len() - 1;
        tracing::info!(bill = index, "bill proposed");
        Ok(index)
    }

    /// Cast a vote or an executive decision on a bill.
    ///
    /// The vice president is dispatched first, whatever the ballot's phase:
    /// with a tie pending the decision resolves it, otherwise the call
    /// fails `NoTieBreakRequired` regardless of the choice. After that the
    /// ballot's phase decides who may act.
    ///
    /// # Errors
    ///
    /// `InvalidBillIndex`, `NoTieBreakRequired`, `NotCurrentVp`,
    /// `OnlyPresident`, `VotingClosed`, `NotActiveMember`, `OnlyHouse`,
    /// `OnlySenate`, `AlreadyVoted`.
    pub fn cast_vote(
        &mut self,
        caller: &Principal,
        now: Timestamp,
        bill_index: usize,
        choice: VoteChoice,
    ) -> GovernanceResult<()> {
        let Some(bill) = self.bills.get_mut(bill_index) else {
            return Err(GovernanceError::InvalidBillIndex);
        };
        let ballot = &mut bill.ballot;

        if self.roster.current_vice_president(now) == Some(caller) {
            if ballot.phase != Phase::TieBreak {
                return Err(GovernanceError::NoTieBreakRequired);
            }
            // The decision is not tallied; it directly settles the Senate
            // outcome. A Nay returns the bill to its exhausted Senate
            // phase, where it stalls unless the chamber later grows.
            ballot.passed_senate = choice == VoteChoice::Yea;
            ballot.phase = if ballot.passed_senate {
                Phase::Presidential
            } else {
                Phase::Senate
            };
            tracing::info!(bill = bill_index, decision = ?choice, "senate tie broken");
            return Ok(());
        }

        match ballot.phase {
            Phase::TieBreak => Err(GovernanceError::NotCurrentVp),
            Phase::Presidential => {
                if self.roster.current_president(now) != Some(caller) {
                    return Err(GovernanceError::OnlyPresident);
                }
                ballot.presidential_decision = Some(choice);
                ballot.presidential_vote_cast = true;
                ballot.passed = choice == VoteChoice::Yea;
                ballot.voting_allowed = false;
                ballot.phase = Phase::Closed;
                tracing::info!(bill = bill_index, passed = ballot.passed, "bill closed");
                Ok(())
            }
            Phase::Closed => Err(GovernanceError::VotingClosed),
            Phase::House => {
                if !self.roster.is_active(caller, now) {
                    return Err(GovernanceError::NotActiveMember);
                }
                if self.roster.role_of(caller) != Some(Role::House) {
                    return Err(GovernanceError::OnlyHouse);
                }
                if !ballot.house_voted.insert(caller.clone()) {
                    return Err(GovernanceError::AlreadyVoted);
                }
                ballot.house_tally.record(choice);
                // Resolution runs at full participation against the live
                // chamber size. A failed or tied outcome leaves the phase
                // as-is; only a strict majority advances.
                if ballot.house_voted.len() == self.roster.chamber_size(Role::House)
                    && ballot.house_tally.yea > ballot.house_tally.nay
                {
                    ballot.passed_house = true;
                    ballot.phase = Phase::Senate;
                    tracing::info!(bill = bill_index, "bill passed the House");
                }
                Ok(())
            }
            Phase::Senate => {
                if !self.roster.is_active(caller, now) {
                    return Err(GovernanceError::NotActiveMember);
                }
                if self.roster.role_of(caller) != Some(Role::Senate) {
                    return Err(GovernanceError::OnlySenate);
                }
                if !ballot.senate_voted.insert(caller.clone()) {
                    return Err(GovernanceError::AlreadyVoted);
                }
                ballot.senate_tally.record(choice);
                if ballot.senate_voted.len() == self.roster.chamber_size(Role::Senate) {
                    if ballot.senate_tally.yea > ballot.senate_tally.nay {
                        ballot.passed_senate = true;
                        ballot.phase = Phase::Presidential;
                        tracing::info!(bill = bill_index, "bill passed the Senate");
                    } else if ballot.senate_tally.yea == ballot.senate_tally.nay {
                        ballot.phase = Phase::TieBreak;
                        tracing::info!(bill = bill_index, "senate tied; tie-break pending");
                    }
                }
                Ok(())
            }
        }
    }

    /// Nominate a candidate for a chamber seat.
    ///
    /// # Errors
    ///
    /// `NotActiveMember`, `InvalidNominationRole`, `InvalidAddress`,
    /// `AlreadyMember`, `AlreadyNominated`, plus the chamber district
    /// rules.
    pub fn nominate_member(
        &mut self,
        caller: &Principal,
        now: Timestamp,
        draft: NominationDraft,
    ) -> GovernanceResult<()> {
        if !self.roster.is_active(caller, now) {
            return Err(GovernanceError::NotActiveMember);
        }
        if !draft.role.is_chamber() {
            return Err(GovernanceError::InvalidNominationRole);
        }
        if draft.candidate.is_null() {
            return Err(GovernanceError::InvalidAddress);
        }
        if self.roster.is_registered(&draft.candidate) {
            return Err(GovernanceError::AlreadyMember);
        }
        if self.nominations.contains(&draft.candidate) {
            return Err(GovernanceError::AlreadyNominated);
        }
        match draft.role {
            Role::House if draft.district == 0 => {
                return Err(GovernanceError::HouseDistrictRequired)
            }
            Role::Senate if draft.district != 0 => {
                return Err(GovernanceError::SenateDistrictMustBeZero)
            }
            _ => {}
        }

        tracing::info!(candidate = %draft.candidate, role = %draft.role, "member nominated");
        self.nominations.insert(Nomination {
            candidate: draft.candidate,
            first_name: draft.first_name,
            last_name: draft.last_name,
            role: draft.role,
            state: draft.state,
            district: draft.district,
            nominated_at: now,
            ratification_count: 0,
            ratifiers: std::collections::BTreeSet::new(),
            ratified: false,
        });
        Ok(())
    }

    /// Ratify a pending nomination.
    ///
    /// The threshold is `floor(chamber_size / 2)` of the candidate's target
    /// chamber, read fresh on every call; the count must strictly exceed it
    /// to seat the candidate. The seating ratification registers the
    /// candidate and retires the nomination in one step — if registration
    /// fails (say the chamber filled up meanwhile), the whole call fails
    /// and the nomination is left exactly as it was.
    ///
    /// # Errors
    ///
    /// `NotActiveMember`, `NominationNotFound`, `AlreadyRatified`, plus
    /// registration failures on the seating call.
    pub fn ratify_member(
        &mut self,
        caller: &Principal,
        now: Timestamp,
        candidate: &Principal,
    ) -> GovernanceResult<RatificationOutcome> {
        if !self.roster.is_active(caller, now) {
            return Err(GovernanceError::NotActiveMember);
        }

        let (threshold, seats, draft) = {
            let Some(nomination) = self.nominations.get(candidate) else {
                return Err(GovernanceError::NominationNotFound);
            };
            if nomination.ratifiers.contains(caller) {
                return Err(GovernanceError::AlreadyRatified);
            }
            let threshold = self.roster.chamber_size(nomination.role) / 2;
            let seats = nomination.ratification_count + 1 > threshold;
            let draft = seats.then(|| MemberDraft {
                principal: nomination.candidate.clone(),
                first_name: nomination.first_name.clone(),
                last_name: nomination.last_name.clone(),
                role: nomination.role,
                state: nomination.state.clone(),
                district: nomination.district,
            });
            (threshold, seats, draft)
        };

        if seats {
            if let Some(draft) = draft {
                self.roster.register(draft, now)?;
            }
            let Some(mut nomination) = self.nominations.remove(candidate) else {
                return Err(GovernanceError::NominationNotFound);
            };
            nomination.ratifiers.insert(caller.clone());
            nomination.ratification_count += 1;
            nomination.ratified = true;
            tracing::info!(candidate = %candidate, "nomination ratified; candidate seated");
            Ok(RatificationOutcome::Seated(nomination))
        } else {
            let Some(nomination) = self.nominations.get_mut(candidate) else {
                return Err(GovernanceError::NominationNotFound);
            };
            nomination.ratifiers.insert(caller.clone());
            nomination.ratification_count += 1;
            Ok(RatificationOutcome::Recorded {
                ratification_count: nomination.ratification_count,
                threshold,
            })
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// With full participation, the House passes a bill exactly when
        /// yeas strictly outnumber nays, resolved on the final ballot.
        #[test]
        fn house_resolution_is_strict_majority(votes in proptest::collection::vec(0u8..3, 1..12)) {
            let admin = Principal::new("admin");
            let mut capitol = Capitol::new(admin.clone());
            for i in 0..votes.len() {
                capitol.add_member(&admin, 0, MemberDraft {
                    principal: Principal::new(format!("rep-{i}")),
                    first_name: "A".into(),
                    last_name: "B".into(),
                    role: Role::House,
                    state: "VT".into(),
                    district: u32::try_from(i).unwrap_or(0) + 1,
                }).expect("seat");
            }
            let index = capitol.propose_bill(&Principal::new("rep-0"), 0, BillDraft {
                title: "Act".into(),
                enacting_clause: "Enacted".into(),
                effective_at: 0,
                sponsors: vec![Principal::new("rep-0")],
                cosponsors: vec![],
                sections: vec!["s1".into()],
                definitions: vec![],
            }).expect("proposed");

            let mut yeas = 0u32;
            let mut nays = 0u32;
            for (i, vote) in votes.iter().enumerate() {
                let choice = match *vote {
                    0 => { yeas += 1; VoteChoice::Yea }
                    1 => { nays += 1; VoteChoice::Nay }
                    _ => VoteChoice::Abstain,
                };
                capitol
                    .cast_vote(&Principal::new(format!("rep-{i}")), 0, index, choice)
                    .expect("vote");
            }

            let ballot = &capitol.bill(index).expect("bill").ballot;
            prop_assert_eq!(ballot.passed_house, yeas > nays);
            prop_assert_eq!(ballot.phase == Phase::Senate, yeas > nays);
            prop_assert_eq!(ballot.house_tally.total() as usize, votes.len());
        }
    }
}
