//! REST API handlers and `OpenAPI` documentation.
//!
//! Every state-changing endpoint reads the caller identity from the
//! `X-Caller-Principal` header and stamps the call with the service clock
//! before handing it to the governance engine. Engine failures surface as
//! RFC 7807 problem bodies with stable machine-readable codes.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]
// Required for Axum handler signatures - the bodies themselves are sync
#![allow(clippy::unused_async)]

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{OpenApi, ToSchema};

use cap_engine::{
    Ballot, Bill, BillDraft, GovernanceError, Member, MemberDraft, Nomination, NominationDraft,
    Phase, Principal, RatificationOutcome, Role, Tally, Timestamp, VoteChoice,
};

use crate::state::AppState;

/// Header carrying the opaque caller identity.
pub const CALLER_HEADER: &str = "x-caller-principal";

// ─── Problem details ─────────────────────────────────────────────────────────

/// Serialize a `StatusCode` as its `u16` representation.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires `&T` signature
fn serialize_status_code<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

/// RFC 7807 Problem Details error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    /// Human-readable explanation specific to this occurrence
    pub detail: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ProblemExtensions>,
}

/// Extended error information with a stable machine-readable code.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemExtensions {
    /// Error code, stable across releases
    pub code: String,
}

impl ProblemDetails {
    fn new(status: StatusCode, title: &str, detail: String, code: &str) -> Self {
        Self {
            problem_type: format!("https://capitol.dev/errors/{}", code.to_ascii_lowercase()),
            title: title.to_string(),
            status,
            detail,
            extensions: Some(ProblemExtensions {
                code: code.to_string(),
            }),
        }
    }

    /// Create an internal server error response.
    #[must_use]
    pub fn internal_error(detail: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            detail.to_string(),
            "INTERNAL_ERROR",
        )
    }

    /// The request carried no usable caller identity.
    #[must_use]
    pub fn caller_required() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Caller Required",
            format!("the {CALLER_HEADER} header must carry a nonempty principal"),
            "CALLER_REQUIRED",
        )
    }

    /// No member registered under the requested principal.
    #[must_use]
    pub fn member_not_found(principal: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "Member Not Found",
            format!("no member registered under principal '{principal}'"),
            "MEMBER_NOT_FOUND",
        )
    }
}

/// HTTP status for each governance failure kind.
const fn status_for(err: &GovernanceError) -> StatusCode {
    match err {
        GovernanceError::NotOwner
        | GovernanceError::NotCurrentVp
        | GovernanceError::OnlyPresident
        | GovernanceError::OnlyHouse
        | GovernanceError::OnlySenate
        | GovernanceError::NotActiveMember => StatusCode::FORBIDDEN,

        GovernanceError::InvalidBillIndex | GovernanceError::NominationNotFound => {
            StatusCode::NOT_FOUND
        }

        GovernanceError::AlreadyMember
        | GovernanceError::AlreadyNominated
        | GovernanceError::AlreadyVoted
        | GovernanceError::AlreadyRatified
        | GovernanceError::VpActive
        | GovernanceError::PresidentActive
        | GovernanceError::HouseFull
        | GovernanceError::SenateFull
        | GovernanceError::NoTieBreakRequired
        | GovernanceError::VotingClosed => StatusCode::CONFLICT,

        GovernanceError::HouseDistrictRequired
        | GovernanceError::SenateDistrictMustBeZero
        | GovernanceError::InvalidAddress
        | GovernanceError::InvalidNominationRole
        | GovernanceError::SponsorRequired
        | GovernanceError::SectionRequired
        | GovernanceError::EffectiveDatePast
        | GovernanceError::InvalidSponsor(_)
        | GovernanceError::InvalidCosponsor(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl From<GovernanceError> for ProblemDetails {
    fn from(err: GovernanceError) -> Self {
        Self::new(
            status_for(&err),
            "Governance Rule Violation",
            err.to_string(),
            err.code(),
        )
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

// ─── Caller identity extractor ───────────────────────────────────────────────

/// Opaque caller identity pulled from the [`CALLER_HEADER`] header.
#[derive(Debug, Clone)]
pub struct CallerPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CallerPrincipal
where
    S: Send + Sync,
{
    type Rejection = ProblemDetails;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .trim();
        if value.is_empty() {
            return Err(ProblemDetails::caller_required());
        }
        Ok(Self(Principal::new(value)))
    }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

/// Seat type, as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MemberRole {
    House,
    Senate,
    NonVoting,
    VicePresident,
    President,
}

impl From<MemberRole> for Role {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::House => Self::House,
            MemberRole::Senate => Self::Senate,
            MemberRole::NonVoting => Self::NonVoting,
            MemberRole::VicePresident => Self::VicePresident,
            MemberRole::President => Self::President,
        }
    }
}

impl From<Role> for MemberRole {
    fn from(role: Role) -> Self {
        match role {
            Role::House => Self::House,
            Role::Senate => Self::Senate,
            Role::NonVoting => Self::NonVoting,
            Role::VicePresident => Self::VicePresident,
            Role::President => Self::President,
        }
    }
}

/// A yea/nay/abstain ballot choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BallotChoice {
    Yea,
    Nay,
    Abstain,
}

impl From<BallotChoice> for VoteChoice {
    fn from(choice: BallotChoice) -> Self {
        match choice {
            BallotChoice::Yea => Self::Yea,
            BallotChoice::Nay => Self::Nay,
            BallotChoice::Abstain => Self::Abstain,
        }
    }
}

impl From<VoteChoice> for BallotChoice {
    fn from(choice: VoteChoice) -> Self {
        match choice {
            VoteChoice::Yea => Self::Yea,
            VoteChoice::Nay => Self::Nay,
            VoteChoice::Abstain => Self::Abstain,
        }
    }
}

/// Where a bill currently sits in the voting process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BallotPhase {
    House,
    Senate,
    TieBreak,
    Presidential,
    Closed,
}

impl From<Phase> for BallotPhase {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::House => Self::House,
            Phase::Senate => Self::Senate,
            Phase::TieBreak => Self::TieBreak,
            Phase::Presidential => Self::Presidential,
            Phase::Closed => Self::Closed,
        }
    }
}

/// Request to admit a member directly (administrator only).
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub principal: String,
    pub first_name: String,
    pub last_name: String,
    pub role: MemberRole,
    pub state: String,
    #[serde(default)]
    pub district: u32,
}

/// Request to propose a bill.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProposeBillRequest {
    pub title: String,
    pub enacting_clause: String,
    pub effective_at: Timestamp,
    pub sponsors: Vec<String>,
    #[serde(default)]
    pub cosponsors: Vec<String>,
    pub sections: Vec<String>,
    #[serde(default)]
    pub definitions: Vec<String>,
}

/// Request to cast a vote or executive decision on a bill.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CastVoteRequest {
    pub choice: BallotChoice,
}

/// Request to nominate a candidate for a chamber seat.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NominateRequest {
    pub candidate: String,
    pub first_name: String,
    pub last_name: String,
    pub role: MemberRole,
    pub state: String,
    #[serde(default)]
    pub district: u32,
}

/// A registered member, with activity computed at the current clock.
#[derive(Debug, Serialize, ToSchema)]
pub struct MemberResponse {
    pub principal: String,
    pub first_name: String,
    pub last_name: String,
    pub role: MemberRole,
    pub state: String,
    pub district: u32,
    pub term_start: Timestamp,
    pub term_end: Timestamp,
    pub active: bool,
}

impl MemberResponse {
    fn from_member(principal: &Principal, member: &Member, now: Timestamp) -> Self {
        Self {
            principal: principal.to_string(),
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            role: member.role.into(),
            state: member.state.clone(),
            district: member.district,
            term_start: member.term_start,
            term_end: member.term_end,
            active: member.is_active(now),
        }
    }
}

/// Index of a freshly proposed bill.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProposeBillResponse {
    pub index: usize,
}

/// Length of the append-only bill ledger.
#[derive(Debug, Serialize, ToSchema)]
pub struct BillHistoryResponse {
    pub count: usize,
}

/// Yea/nay/abstain counts for one chamber.
#[derive(Debug, Serialize, ToSchema)]
pub struct TallyCounts {
    pub yea: u32,
    pub nay: u32,
    pub abstain: u32,
}

impl From<Tally> for TallyCounts {
    fn from(tally: Tally) -> Self {
        Self {
            yea: tally.yea,
            nay: tally.nay,
            abstain: tally.abstain,
        }
    }
}

/// Snapshot of a bill's voting sub-state.
#[derive(Debug, Serialize, ToSchema)]
pub struct BallotStatus {
    pub phase: BallotPhase,
    pub passed_house: bool,
    pub passed_senate: bool,
    pub passed: bool,
    pub voting_allowed: bool,
    pub tie_break_required: bool,
    pub house_tally: TallyCounts,
    pub senate_tally: TallyCounts,
    pub house_votes_cast: usize,
    pub senate_votes_cast: usize,
    pub presidential_vote_cast: bool,
}

impl From<&Ballot> for BallotStatus {
    fn from(ballot: &Ballot) -> Self {
        Self {
            phase: ballot.phase.into(),
            passed_house: ballot.passed_house,
            passed_senate: ballot.passed_senate,
            passed: ballot.passed,
            voting_allowed: ballot.voting_allowed,
            tie_break_required: ballot.tie_break_required(),
            house_tally: ballot.house_tally.into(),
            senate_tally: ballot.senate_tally.into(),
            house_votes_cast: ballot.house_voted.len(),
            senate_votes_cast: ballot.senate_voted.len(),
            presidential_vote_cast: ballot.presidential_vote_cast,
        }
    }
}

/// Full bill view: immutable content plus the live ballot.
#[derive(Debug, Serialize, ToSchema)]
pub struct BillResponse {
    pub index: usize,
    pub title: String,
    pub enacting_clause: String,
    pub proposed_at: Timestamp,
    pub effective_at: Timestamp,
    pub sponsors: Vec<String>,
    pub cosponsors: Vec<String>,
    pub sections: Vec<String>,
    pub definitions: Vec<String>,
    pub ballot: BallotStatus,
}

impl BillResponse {
    fn from_bill(index: usize, bill: &Bill) -> Self {
        Self {
            index,
            title: bill.metadata.title.clone(),
            enacting_clause: bill.metadata.enacting_clause.clone(),
            proposed_at: bill.metadata.proposed_at,
            effective_at: bill.metadata.effective_at,
            sponsors: bill.sponsors.iter().map(ToString::to_string).collect(),
            cosponsors: bill.cosponsors.iter().map(ToString::to_string).collect(),
            sections: bill.sections.clone(),
            definitions: bill.definitions.clone(),
            ballot: BallotStatus::from(&bill.ballot),
        }
    }
}

/// A pending nomination with its live quorum target.
#[derive(Debug, Serialize, ToSchema)]
pub struct NominationView {
    pub candidate: String,
    pub first_name: String,
    pub last_name: String,
    pub role: MemberRole,
    pub state: String,
    pub district: u32,
    pub nominated_at: Timestamp,
    pub ratification_count: usize,
    /// Current floor(chamber size / 2); the count must strictly exceed it.
    pub threshold: usize,
}

impl NominationView {
    fn from_nomination(nomination: &Nomination, threshold: usize) -> Self {
        Self {
            candidate: nomination.candidate.to_string(),
            first_name: nomination.first_name.clone(),
            last_name: nomination.last_name.clone(),
            role: nomination.role.into(),
            state: nomination.state.clone(),
            district: nomination.district,
            nominated_at: nomination.nominated_at,
            ratification_count: nomination.ratification_count,
            threshold,
        }
    }
}

/// Pending nominations.
#[derive(Debug, Serialize, ToSchema)]
pub struct NominationsResponse {
    pub nominations: Vec<NominationView>,
}

/// A ratification that was recorded without reaching quorum.
#[derive(Debug, Serialize, ToSchema)]
pub struct RatificationProgress {
    pub ratification_count: usize,
    pub threshold: usize,
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// Admit a member directly
///
/// Administrator-only: the caller principal must match the identity fixed
/// at startup.
///
/// # Errors
///
/// Returns `ProblemDetails` when the caller is not the administrator or
/// the seat cannot be filled.
#[utoipa::path(
    post,
    path = "/members",
    tag = "Roster",
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member admitted", body = MemberResponse),
        (status = 403, description = "Caller is not the administrator", body = ProblemDetails),
        (status = 409, description = "Seat conflict", body = ProblemDetails),
        (status = 422, description = "Invalid member data", body = ProblemDetails)
    )
)]
pub async fn add_member(
    State(state): State<AppState>,
    CallerPrincipal(caller): CallerPrincipal,
    Json(request): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ProblemDetails> {
    let now = state.now();
    let principal = Principal::new(request.principal);

    let member = state.with_capitol(|capitol| {
        capitol.add_member(
            &caller,
            now,
            MemberDraft {
                principal: principal.clone(),
                first_name: request.first_name,
                last_name: request.last_name,
                role: request.role.into(),
                state: request.state,
                district: request.district,
            },
        )?;
        Ok::<_, GovernanceError>(capitol.roster().member(&principal).cloned())
    })?;

    member.map_or_else(
        || Err(ProblemDetails::internal_error("member vanished after registration")),
        |member| {
            Ok((
                StatusCode::CREATED,
                Json(MemberResponse::from_member(&principal, &member, now)),
            ))
        },
    )
}

/// Look up a member
///
/// # Errors
///
/// Returns `ProblemDetails` when no member is registered under the
/// principal.
#[utoipa::path(
    get,
    path = "/members/{principal}",
    tag = "Roster",
    params(("principal" = String, Path, description = "Member principal")),
    responses(
        (status = 200, description = "Member found", body = MemberResponse),
        (status = 404, description = "Unknown principal", body = ProblemDetails)
    )
)]
pub async fn get_member(
    State(state): State<AppState>,
    Path(principal): Path<String>,
) -> Result<Json<MemberResponse>, ProblemDetails> {
    let now = state.now();
    let principal = Principal::new(principal);

    let member = state.with_capitol(|capitol| capitol.roster().member(&principal).cloned());
    member.map_or_else(
        || Err(ProblemDetails::member_not_found(principal.as_str())),
        |member| Ok(Json(MemberResponse::from_member(&principal, &member, now))),
    )
}

/// Propose a bill
///
/// # Errors
///
/// Returns `ProblemDetails` when the caller is not an active member or
/// the draft is invalid.
#[utoipa::path(
    post,
    path = "/bills",
    tag = "Bills",
    request_body = ProposeBillRequest,
    responses(
        (status = 201, description = "Bill appended to the ledger", body = ProposeBillResponse),
        (status = 403, description = "Caller is not an active member", body = ProblemDetails),
        (status = 422, description = "Invalid bill draft", body = ProblemDetails)
    )
)]
pub async fn propose_bill(
    State(state): State<AppState>,
    CallerPrincipal(caller): CallerPrincipal,
    Json(request): Json<ProposeBillRequest>,
) -> Result<(StatusCode, Json<ProposeBillResponse>), ProblemDetails> {
    let now = state.now();
    let draft = BillDraft {
        title: request.title,
        enacting_clause: request.enacting_clause,
        effective_at: request.effective_at,
        sponsors: request.sponsors.into_iter().map(Principal::new).collect(),
        cosponsors: request.cosponsors.into_iter().map(Principal::new).collect(),
        sections: request.sections,
        definitions: request.definitions,
    };

    let index = state.with_capitol(|capitol| capitol.propose_bill(&caller, now, draft))?;
    Ok((StatusCode::CREATED, Json(ProposeBillResponse { index })))
}

/// Ledger length
#[utoipa::path(
    get,
    path = "/bills",
    tag = "Bills",
    responses(
        (status = 200, description = "Number of bills ever proposed", body = BillHistoryResponse)
    )
)]
pub async fn get_bill_history(State(state): State<AppState>) -> Json<BillHistoryResponse> {
    let count = state.with_capitol(|capitol| capitol.bill_count());
    Json(BillHistoryResponse { count })
}

/// Bill content and ballot
///
/// # Errors
///
/// Returns `ProblemDetails` when the index is out of range.
#[utoipa::path(
    get,
    path = "/bills/{index}",
    tag = "Bills",
    params(("index" = usize, Path, description = "Ledger position")),
    responses(
        (status = 200, description = "Bill found", body = BillResponse),
        (status = 404, description = "No bill at this index", body = ProblemDetails)
    )
)]
pub async fn get_bill(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<BillResponse>, ProblemDetails> {
    let bill = state.with_capitol(|capitol| capitol.bill(index).cloned())?;
    Ok(Json(BillResponse::from_bill(index, &bill)))
}

/// Cast a vote on a bill
///
/// House and Senate members vote during their chamber's phase; the vice
/// president resolves a pending Senate tie; the president signs or vetoes
/// once both chambers have passed the bill.
///
/// # Errors
///
/// Returns `ProblemDetails` when the caller may not act in the bill's
/// current phase.
#[utoipa::path(
    post,
    path = "/bills/{index}/votes",
    tag = "Bills",
    params(("index" = usize, Path, description = "Ledger position")),
    request_body = CastVoteRequest,
    responses(
        (status = 200, description = "Vote recorded", body = BallotStatus),
        (status = 403, description = "Caller may not vote in this phase", body = ProblemDetails),
        (status = 404, description = "No bill at this index", body = ProblemDetails),
        (status = 409, description = "Vote conflicts with the ballot state", body = ProblemDetails)
    )
)]
pub async fn cast_vote(
    State(state): State<AppState>,
    CallerPrincipal(caller): CallerPrincipal,
    Path(index): Path<usize>,
    Json(request): Json<CastVoteRequest>,
) -> Result<Json<BallotStatus>, ProblemDetails> {
    let now = state.now();

    let ballot = state.with_capitol(|capitol| {
        capitol.cast_vote(&caller, now, index, request.choice.into())?;
        Ok::<_, GovernanceError>(capitol.bill(index)?.ballot.clone())
    })?;
    Ok(Json(BallotStatus::from(&ballot)))
}

/// Nominate a candidate
///
/// # Errors
///
/// Returns `ProblemDetails` when the caller is inactive or the candidate
/// cannot be nominated.
#[utoipa::path(
    post,
    path = "/nominations",
    tag = "Nominations",
    request_body = NominateRequest,
    responses(
        (status = 201, description = "Nomination opened", body = NominationView),
        (status = 403, description = "Caller is not an active member", body = ProblemDetails),
        (status = 409, description = "Candidate already registered or nominated", body = ProblemDetails),
        (status = 422, description = "Invalid nomination", body = ProblemDetails)
    )
)]
pub async fn nominate_member(
    State(state): State<AppState>,
    CallerPrincipal(caller): CallerPrincipal,
    Json(request): Json<NominateRequest>,
) -> Result<(StatusCode, Json<NominationView>), ProblemDetails> {
    let now = state.now();
    let candidate = Principal::new(request.candidate);
    let role: Role = request.role.into();

    let view = state.with_capitol(|capitol| {
        capitol.nominate_member(
            &caller,
            now,
            NominationDraft {
                candidate: candidate.clone(),
                first_name: request.first_name,
                last_name: request.last_name,
                role,
                state: request.state,
                district: request.district,
            },
        )?;
        let threshold = capitol.roster().chamber_size(role) / 2;
        Ok::<_, GovernanceError>(
            capitol
                .nominations()
                .get(&candidate)
                .map(|nomination| NominationView::from_nomination(nomination, threshold)),
        )
    })?;

    view.map_or_else(
        || Err(ProblemDetails::internal_error("nomination vanished after creation")),
        |view| Ok((StatusCode::CREATED, Json(view))),
    )
}

/// Pending nominations
#[utoipa::path(
    get,
    path = "/nominations",
    tag = "Nominations",
    responses(
        (status = 200, description = "Live nominations", body = NominationsResponse)
    )
)]
pub async fn get_nominations(State(state): State<AppState>) -> Json<NominationsResponse> {
    let nominations = state.with_capitol(|capitol| {
        capitol
            .nominations()
            .iter()
            .map(|nomination| {
                let threshold = capitol.roster().chamber_size(nomination.role) / 2;
                NominationView::from_nomination(nomination, threshold)
            })
            .collect()
    });
    Json(NominationsResponse { nominations })
}

/// Ratify a nomination
///
/// The ratification that pushes the count strictly past the threshold
/// seats the candidate and retires the nomination.
///
/// # Errors
///
/// Returns `ProblemDetails` when the caller is inactive, the nomination
/// does not exist, or the caller already ratified it.
#[utoipa::path(
    post,
    path = "/nominations/{candidate}/ratifications",
    tag = "Nominations",
    params(("candidate" = String, Path, description = "Candidate principal")),
    responses(
        (status = 200, description = "Ratification recorded below quorum", body = RatificationProgress),
        (status = 201, description = "Quorum exceeded; candidate seated", body = MemberResponse),
        (status = 403, description = "Caller is not an active member", body = ProblemDetails),
        (status = 404, description = "No such nomination", body = ProblemDetails),
        (status = 409, description = "Caller already ratified", body = ProblemDetails)
    )
)]
pub async fn ratify_member(
    State(state): State<AppState>,
    CallerPrincipal(caller): CallerPrincipal,
    Path(candidate): Path<String>,
) -> Result<Response, ProblemDetails> {
    let now = state.now();
    let candidate = Principal::new(candidate);

    let outcome = state.with_capitol(|capitol| {
        let outcome = capitol.ratify_member(&caller, now, &candidate)?;
        let member = match &outcome {
            RatificationOutcome::Seated(nomination) => {
                capitol.roster().member(&nomination.candidate).cloned()
            }
            RatificationOutcome::Recorded { .. } => None,
        };
        Ok::<_, GovernanceError>((outcome, member))
    })?;

    match outcome {
        (
            RatificationOutcome::Recorded {
                ratification_count,
                threshold,
            },
            _,
        ) => Ok(Json(RatificationProgress {
            ratification_count,
            threshold,
        })
        .into_response()),
        (RatificationOutcome::Seated(_), Some(member)) => Ok((
            StatusCode::CREATED,
            Json(MemberResponse::from_member(&candidate, &member, now)),
        )
            .into_response()),
        (RatificationOutcome::Seated(_), None) => {
            Err(ProblemDetails::internal_error("seated member vanished"))
        }
    }
}

// ─── OpenAPI document ────────────────────────────────────────────────────────

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Capitol API",
        version = "1.0.0",
        description = "Legislative governance: roster, bills, and nominations",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "REST API v1")
    ),
    paths(
        add_member,
        get_member,
        propose_bill,
        get_bill_history,
        get_bill,
        cast_vote,
        nominate_member,
        get_nominations,
        ratify_member
    ),
    components(schemas(
        AddMemberRequest,
        ProposeBillRequest,
        CastVoteRequest,
        NominateRequest,
        MemberResponse,
        ProposeBillResponse,
        BillHistoryResponse,
        BillResponse,
        BallotStatus,
        TallyCounts,
        NominationView,
        NominationsResponse,
        RatificationProgress,
        MemberRole,
        BallotChoice,
        BallotPhase,
        ProblemDetails,
        ProblemExtensions
    ))
)]
pub struct ApiDoc;
