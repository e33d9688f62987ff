//! Pending nominations awaiting peer ratification.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::member::{Principal, Role, Timestamp};

/// A candidate proposed for a chamber seat, collecting ratifications.
///
/// Lives in the registry from nomination until the ratification that pushes
/// the count strictly past the threshold, at which point the candidate is
/// registered and the nomination retired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nomination {
    pub candidate: Principal,
    pub first_name: String,
    pub last_name: String,
    /// House or Senate only.
    pub role: Role,
    pub state: String,
    pub district: u32,
    pub nominated_at: Timestamp,
    pub ratification_count: usize,
    pub ratifiers: BTreeSet<Principal>,
    /// False while pending; flips on the retiring ratification.
    pub ratified: bool,
}

/// Nomination input from a sitting member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominationDraft {
    pub candidate: Principal,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub state: String,
    pub district: u32,
}

/// Live nominations, at most one per candidate.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NominationRegistry {
    pending: BTreeMap<Principal, Nomination>,
}

impl NominationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, candidate: &Principal) -> bool {
        self.pending.contains_key(candidate)
    }

    #[must_use]
    pub fn get(&self, candidate: &Principal) -> Option<&Nomination> {
        self.pending.get(candidate)
    }

    pub(crate) fn get_mut(&mut self, candidate: &Principal) -> Option<&mut Nomination> {
        self.pending.get_mut(candidate)
    }

    pub(crate) fn insert(&mut self, nomination: Nomination) {
        self.pending.insert(nomination.candidate.clone(), nomination);
    }

    pub(crate) fn remove(&mut self, candidate: &Principal) -> Option<Nomination> {
        self.pending.remove(candidate)
    }

    /// Pending nominations in candidate order.
    pub fn iter(&self) -> impl Iterator<Item = &Nomination> {
        self.pending.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
