//! Members, roles, and term arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical time in seconds, supplied by the host on every call.
///
/// The engine only ever compares timestamps and adds durations to them;
/// it has no opinion on where time comes from.
pub type Timestamp = u64;

/// One civil year of logical seconds (365 days).
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Opaque, comparable caller identity.
///
/// The engine never inspects the contents beyond equality and the null
/// check; whatever identity scheme the host uses maps onto this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Wrap a host-supplied identity string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the principal as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The null principal carries no identity at all.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Principal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Seat type a member holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    House,
    Senate,
    NonVoting,
    VicePresident,
    President,
}

impl Role {
    /// Term length granted at registration.
    #[must_use]
    pub const fn term_duration(self) -> u64 {
        match self {
            Self::House | Self::NonVoting => 2 * SECONDS_PER_YEAR,
            Self::Senate => 6 * SECONDS_PER_YEAR,
            Self::VicePresident | Self::President => 4 * SECONDS_PER_YEAR,
        }
    }

    /// Whether the role occupies a chamber seat list.
    #[must_use]
    pub const fn is_chamber(self) -> bool {
        matches!(self, Self::House | Self::Senate)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::House => "House",
            Self::Senate => "Senate",
            Self::NonVoting => "NonVoting",
            Self::VicePresident => "VicePresident",
            Self::President => "President",
        };
        f.write_str(name)
    }
}

/// A registered member. Created exactly once per identity, never deleted;
/// the member simply stops being active once the clock passes `term_end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub term_start: Timestamp,
    pub term_duration: u64,
    /// Always `term_start + term_duration`.
    pub term_end: Timestamp,
    /// Two-letter state code.
    pub state: String,
    /// Nonzero exactly for House members.
    pub district: u32,
}

impl Member {
    /// A member is active while the term has not yet ended.
    #[must_use]
    pub const fn is_active(&self, now: Timestamp) -> bool {
        self.term_end > now
    }
}

/// Registration input: everything the roster needs to seat a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDraft {
    pub principal: Principal,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub state: String,
    pub district: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_durations_follow_the_role_table() {
        assert_eq!(Role::House.term_duration(), 2 * SECONDS_PER_YEAR);
        assert_eq!(Role::Senate.term_duration(), 6 * SECONDS_PER_YEAR);
        assert_eq!(Role::NonVoting.term_duration(), 2 * SECONDS_PER_YEAR);
        assert_eq!(Role::VicePresident.term_duration(), 4 * SECONDS_PER_YEAR);
        assert_eq!(Role::President.term_duration(), 4 * SECONDS_PER_YEAR);
    }

    #[test]
    fn activity_ends_exactly_at_term_end() {
        let member = Member {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role: Role::Senate,
            term_start: 100,
            term_duration: 50,
            term_end: 150,
            state: "NY".into(),
            district: 0,
        };
        assert!(member.is_active(100));
        assert!(member.is_active(149));
        assert!(!member.is_active(150));
        assert!(!member.is_active(151));
    }

    #[test]
    fn null_principal_is_empty() {
        assert!(Principal::new("").is_null());
        assert!(!Principal::new("someone").is_null());
    }

    #[test]
    fn principal_serde_is_transparent() {
        let p = Principal::new("abc-123");
        let json = serde_json::to_string(&p).expect("serialize");
        assert_eq!(json, "\"abc-123\"");
        let back: Principal = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, p);
    }
}
