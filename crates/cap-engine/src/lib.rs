//! Governance state machine for Capitol.
//!
//! This crate owns the whole legislative process as one in-memory value:
//! a bounded two-chamber roster plus two executive offices, an append-only
//! bill ledger with a per-bill voting state machine, and a peer-ratified
//! nomination registry.
//!
//! # Key principles
//!
//! 1. **Host supplies time and identity**: every state-changing call takes
//!    the caller principal and the current logical timestamp as arguments;
//!    the engine never reads a clock or a session.
//! 2. **Single writer**: all mutation goes through `&mut Capitol`. A host
//!    serializes calls behind one lock or one event loop; there are no
//!    internal suspension points.
//! 3. **Fail-or-commit**: a call either applies every one of its writes or
//!    returns a [`GovernanceError`] having written nothing.
//! 4. **Expiry is derived**: a member's term lapses by comparison against
//!    the supplied timestamp, never by a removal transaction.
//!
//! # Usage
//!
//! ```
//! use cap_engine::{Capitol, MemberDraft, Principal, Role};
//!
//! let admin = Principal::new("admin");
//! let mut capitol = Capitol::new(admin.clone());
//! capitol.add_member(
//!     &admin,
//!     0,
//!     MemberDraft {
//!         principal: Principal::new("rep-1"),
//!         first_name: "Ada".into(),
//!         last_name: "Lovelace".into(),
//!         role: Role::House,
//!         state: "NY".into(),
//!         district: 12,
//!     },
//! )
//! .expect("seat available");
//! ```

pub mod bill;
pub mod capitol;
pub mod error;
pub mod member;
pub mod nomination;
pub mod roster;

pub use bill::{Ballot, Bill, BillDraft, BillMetadata, Phase, Tally, VoteChoice};
pub use capitol::{Capitol, RatificationOutcome};
pub use error::{GovernanceError, GovernanceResult};
pub use member::{Member, MemberDraft, Principal, Role, Timestamp, SECONDS_PER_YEAR};
pub use nomination::{Nomination, NominationDraft, NominationRegistry};
