//! Failure taxonomy for governance operations.
//!
//! Every failure is synchronous and leaves state untouched. Callers may
//! resubmit with corrected inputs or wait for state to change (a term
//! expiring, a voting phase advancing); the engine itself never retries.

use crate::member::Principal;

/// Result alias used throughout the engine.
pub type GovernanceResult<T> = Result<T, GovernanceError>;

/// Errors returned by governance operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GovernanceError {
    // ── Authorization: wrong principal for the required role ──
    /// Caller is not the administrator fixed at construction.
    #[error("caller is not the administrator")]
    NotOwner,

    /// Caller is not the vice president whose term is still running.
    #[error("caller is not the current vice president")]
    NotCurrentVp,

    /// A bill awaiting executive decision accepts only the president.
    #[error("only the current president may decide this bill")]
    OnlyPresident,

    /// A bill in its House phase accepts only House members.
    #[error("only House members may vote during the House phase")]
    OnlyHouse,

    /// A bill in its Senate phase accepts only Senate members.
    #[error("only Senate members may vote during the Senate phase")]
    OnlySenate,

    // ── Eligibility: caller or target not an active member ──
    /// Caller has no registered term, or the term has lapsed.
    #[error("caller is not an active member")]
    NotActiveMember,

    /// A listed sponsor is not an active member.
    #[error("sponsor {0} is not an active member")]
    InvalidSponsor(Principal),

    /// A listed cosponsor is not an active member.
    #[error("cosponsor {0} is not an active member")]
    InvalidCosponsor(Principal),

    // ── Capacity and structural violations ──
    /// Every House seat is taken.
    #[error("the House is at capacity")]
    HouseFull,

    /// Every Senate seat is taken.
    #[error("the Senate is at capacity")]
    SenateFull,

    /// House seats require a nonzero district.
    #[error("House members must carry a nonzero district")]
    HouseDistrictRequired,

    /// Senate seats are statewide; the district must be zero.
    #[error("Senate members must carry district zero")]
    SenateDistrictMustBeZero,

    /// The candidate principal is null.
    #[error("candidate principal is null")]
    InvalidAddress,

    // ── State conflicts ──
    /// The principal already holds a registered term, current or lapsed.
    /// Registration is one-time per identity, forever.
    #[error("principal is already a registered member")]
    AlreadyMember,

    /// A live nomination already exists for the candidate.
    #[error("candidate already has a pending nomination")]
    AlreadyNominated,

    /// The caller already voted on this bill in this chamber.
    #[error("caller has already voted on this bill")]
    AlreadyVoted,

    /// A vice president whose term has not lapsed is in office.
    #[error("an active vice president is already in office")]
    VpActive,

    /// A president whose term has not lapsed is in office.
    #[error("an active president is already in office")]
    PresidentActive,

    /// The vice president may only act while a Senate tie is pending.
    #[error("no tie-break is pending on this bill")]
    NoTieBreakRequired,

    /// No live nomination exists for the candidate.
    #[error("no pending nomination for this candidate")]
    NominationNotFound,

    /// Each principal ratifies a given nomination at most once.
    #[error("caller has already ratified this nomination")]
    AlreadyRatified,

    /// Only House and Senate seats are filled by nomination.
    #[error("only House and Senate seats can be nominated")]
    InvalidNominationRole,

    // ── Proposal validation ──
    /// A bill requires at least one sponsor.
    #[error("a bill requires at least one sponsor")]
    SponsorRequired,

    /// A bill requires at least one section.
    #[error("a bill requires at least one section")]
    SectionRequired,

    /// A bill cannot take effect before it is proposed.
    #[error("effective date is in the past")]
    EffectiveDatePast,

    // ── Protocol closed ──
    /// The bill has received its presidential decision.
    #[error("voting on this bill is closed")]
    VotingClosed,

    /// The bill ledger has no entry at this index.
    #[error("no bill exists at this index")]
    InvalidBillIndex,
}

impl GovernanceError {
    /// Stable machine-readable code for API surfaces.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotOwner => "NOT_OWNER",
            Self::NotCurrentVp => "NOT_CURRENT_VP",
            Self::OnlyPresident => "ONLY_PRESIDENT",
            Self::OnlyHouse => "ONLY_HOUSE",
            Self::OnlySenate => "ONLY_SENATE",
            Self::NotActiveMember => "NOT_ACTIVE_MEMBER",
            Self::InvalidSponsor(_) => "INVALID_SPONSOR",
            Self::InvalidCosponsor(_) => "INVALID_COSPONSOR",
            Self::HouseFull => "HOUSE_FULL",
            Self::SenateFull => "SENATE_FULL",
            Self::HouseDistrictRequired => "HOUSE_DISTRICT_REQUIRED",
            Self::SenateDistrictMustBeZero => "SENATE_DISTRICT_MUST_BE_ZERO",
            Self::InvalidAddress => "INVALID_ADDRESS",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::AlreadyNominated => "ALREADY_NOMINATED",
            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::VpActive => "VP_ACTIVE",
            Self::PresidentActive => "PRESIDENT_ACTIVE",
            Self::NoTieBreakRequired => "NO_TIE_BREAK_REQUIRED",
            Self::NominationNotFound => "NOMINATION_NOT_FOUND",
            Self::AlreadyRatified => "ALREADY_RATIFIED",
            Self::InvalidNominationRole => "INVALID_NOMINATION_ROLE",
            Self::SponsorRequired => "SPONSOR_REQUIRED",
            Self::SectionRequired => "SECTION_REQUIRED",
            Self::EffectiveDatePast => "EFFECTIVE_DATE_PAST",
            Self::VotingClosed => "VOTING_CLOSED",
            Self::InvalidBillIndex => "INVALID_BILL_INDEX",
        }
    }
}
