//! The member roster: who holds a seat, and until when.
//!
//! Seat lists are append-only. A lapsed term does not free the slot; the
//! member stays in the chamber sequence and keeps counting toward chamber
//! size. Whether a member may act is always the derived [`Roster::is_active`]
//! predicate, never a stored flag.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GovernanceError, GovernanceResult};
use crate::member::{Member, MemberDraft, Principal, Role, Timestamp};

/// Constitutional size of the House.
pub const HOUSE_SEATS: usize = 435;

/// Constitutional size of the Senate.
pub const SENATE_SEATS: usize = 100;

/// Owns every registered member, the chamber seat lists, and the two
/// executive slots.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Roster {
    /// Every identity ever registered. Entries are never removed.
    members: HashMap<Principal, Member>,
    house: Vec<Principal>,
    senate: Vec<Principal>,
    vice_president: Option<Principal>,
    president: Option<Principal>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a new member.
    ///
    /// Registration is one-time per identity: a principal that ever held a
    /// term can never register again, even after the term lapses. The two
    /// executive offices are the exception in the other direction — the
    /// slot itself is reusable once the incumbent's term has elapsed.
    ///
    /// # Errors
    ///
    /// `AlreadyMember`, `HouseFull`/`SenateFull`, `HouseDistrictRequired`,
    /// `SenateDistrictMustBeZero`, `VpActive`, `PresidentActive`.
    pub fn register(&mut self, draft: MemberDraft, now: Timestamp) -> GovernanceResult<()> {
        if self.members.contains_key(&draft.principal) {
            return Err(GovernanceError::AlreadyMember);
        }

        let district = match draft.role {
            Role::House => {
                if draft.district == 0 {
                    return Err(GovernanceError::HouseDistrictRequired);
                }
                if self.house.len() >= HOUSE_SEATS {
                    return Err(GovernanceError::HouseFull);
                }
                draft.district
            }
            Role::Senate => {
                if draft.district != 0 {
                    return Err(GovernanceError::SenateDistrictMustBeZero);
                }
                if self.senate.len() >= SENATE_SEATS {
                    return Err(GovernanceError::SenateFull);
                }
                0
            }
            Role::VicePresident => {
                if self.current_vice_president(now).is_some() {
                    return Err(GovernanceError::VpActive);
                }
                0
            }
            Role::President => {
                if self.current_president(now).is_some() {
                    return Err(GovernanceError::PresidentActive);
                }
                0
            }
            // Delegates hold no district and no seat list.
            Role::NonVoting => 0,
        };

        let term_duration = draft.role.term_duration();
        let member = Member {
            first_name: draft.first_name,
            last_name: draft.last_name,
            role: draft.role,
            term_start: now,
            term_duration,
            term_end: now + term_duration,
            state: draft.state,
            district,
        };

        match draft.role {
            Role::House => self.house.push(draft.principal.clone()),
            Role::Senate => self.senate.push(draft.principal.clone()),
            Role::VicePresident => self.vice_president = Some(draft.principal.clone()),
            Role::President => self.president = Some(draft.principal.clone()),
            Role::NonVoting => {}
        }

        tracing::info!(
            principal = %draft.principal,
            role = %member.role,
            term_end = member.term_end,
            "member registered"
        );
        self.members.insert(draft.principal, member);
        Ok(())
    }

    /// Whether the principal holds a term that has not yet ended.
    #[must_use]
    pub fn is_active(&self, principal: &Principal, now: Timestamp) -> bool {
        self.members
            .get(principal)
            .is_some_and(|m| m.is_active(now))
    }

    /// Whether the principal was ever registered, active or not.
    #[must_use]
    pub fn is_registered(&self, principal: &Principal) -> bool {
        self.members.contains_key(principal)
    }

    /// Role of a registered principal.
    #[must_use]
    pub fn role_of(&self, principal: &Principal) -> Option<Role> {
        self.members.get(principal).map(|m| m.role)
    }

    /// Full record of a registered principal.
    #[must_use]
    pub fn member(&self, principal: &Principal) -> Option<&Member> {
        self.members.get(principal)
    }

    /// Number of seats ever filled in a chamber, lapsed terms included.
    /// Non-chamber roles have no seat list and report zero.
    #[must_use]
    pub fn chamber_size(&self, role: Role) -> usize {
        match role {
            Role::House => self.house.len(),
            Role::Senate => self.senate.len(),
            Role::NonVoting | Role::VicePresident | Role::President => 0,
        }
    }

    /// The vice president whose term is still running, if any.
    #[must_use]
    pub fn current_vice_president(&self, now: Timestamp) -> Option<&Principal> {
        self.vice_president
            .as_ref()
            .filter(|p| self.is_active(p, now))
    }

    /// The president whose term is still running, if any.
    #[must_use]
    pub fn current_president(&self, now: Timestamp) -> Option<&Principal> {
        self.president.as_ref().filter(|p| self.is_active(p, now))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Activity flips true -> false exactly once, at term_end.
        #[test]
        fn activity_is_monotone_over_time(start in 0u64..1_000_000, probe in 0u64..u32::MAX as u64) {
            let mut roster = Roster::new();
            roster.register(
                MemberDraft {
                    principal: Principal::new("m"),
                    first_name: "A".into(),
                    last_name: "B".into(),
                    role: Role::Senate,
                    state: "VT".into(),
                    district: 0,
                },
                start,
            ).expect("register");

            let p = Principal::new("m");
            let term_end = roster.member(&p).expect("present").term_end;
            let now = start + probe;
            prop_assert_eq!(roster.is_active(&p, now), now < term_end);
        }

        /// Chamber size never shrinks as registrations accumulate.
        #[test]
        fn chamber_size_is_append_only(count in 1usize..20) {
            let mut roster = Roster::new();
            let mut previous = 0;
            for i in 0..count {
                roster.register(
                    MemberDraft {
                        principal: Principal::new(format!("rep-{i}")),
                        first_name: "A".into(),
                        last_name: "B".into(),
                        role: Role::House,
                        state: "VT".into(),
                        district: 1,
                    },
                    (i as u64) * 1_000,
                ).expect("register");
                let size = roster.chamber_size(Role::House);
                prop_assert!(size > previous);
                previous = size;
            }
        }
    }
}
